#![forbid(unsafe_code)]

//! Single-line versus multi-line measurement of a textarea.
//!
//! [`measure`] answers: at this candidate width, how many visual lines does
//! the content need, and how tall is exactly one line?
//!
//! 1. Force the inline width to the candidate and the height to `auto`.
//! 2. Read the natural content height.
//! 3. Restore the inline size (always, including on error).
//! 4. Derive the line count and single-line height from computed style.
//!
//! # Invariants
//!
//! 1. `single_line_height_px >= config.single_line_min_px`.
//! 2. `line_count >= 1`, and `is_overflowing == (line_count > 1)`.
//! 3. The surface's inline size after the call equals the one before it.
//!
//! # Failure Modes
//!
//! A detached surface or a non-positive candidate width yields
//! [`MeasureError::MeasurementUnavailable`]. Hosts treat every error as a
//! single line; see [`TextMeasurementResult::assume_single_line`].

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::error::MeasureError;
use crate::metrics::{AutosizeConfig, ComputedStyle, FontMetrics};

/// A CSS size value for an inline `width` or `height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeValue {
    Auto,
    Px(f64),
    Percent(f64),
}

impl fmt::Display for SizeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// Inline `width` / `height` of a surface. `None` means not set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InlineSize {
    pub width: Option<SizeValue>,
    pub height: Option<SizeValue>,
}

/// A text field whose layout can be measured.
///
/// Implemented by the view layer over a real element, and by
/// [`VirtualTextarea`](crate::VirtualTextarea) for deterministic hosts.
pub trait MeasureSurface {
    /// Whether the surface is attached to something that performs layout.
    fn is_attached(&self) -> bool;

    /// Current rendered width in px.
    fn offset_width(&self) -> f64;

    /// Current inline width and height.
    fn inline_size(&self) -> InlineSize;

    /// Replace the inline width and height.
    fn set_inline_size(&mut self, size: InlineSize) -> Result<(), MeasureError>;

    /// Natural content height in px under the current inline size,
    /// padding included.
    fn scroll_height(&self) -> Result<f64, MeasureError>;

    /// Computed line height and vertical padding.
    fn computed_style(&self) -> ComputedStyle;
}

/// Restores a surface's inline size when dropped.
pub struct StyleGuard<'a, S: MeasureSurface + ?Sized> {
    surface: &'a mut S,
    saved: InlineSize,
}

impl<'a, S: MeasureSurface + ?Sized> StyleGuard<'a, S> {
    /// Snapshot the current inline size.
    pub fn new(surface: &'a mut S) -> Self {
        let saved = surface.inline_size();
        Self { surface, saved }
    }

    /// The inline size that will be restored.
    #[must_use]
    pub fn saved(&self) -> InlineSize {
        self.saved
    }
}

impl<S: MeasureSurface + ?Sized> Deref for StyleGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: MeasureSurface + ?Sized> DerefMut for StyleGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: MeasureSurface + ?Sized> Drop for StyleGuard<'_, S> {
    fn drop(&mut self) {
        if let Err(err) = self.surface.set_inline_size(self.saved) {
            tracing::warn!(error = %err, "failed to restore inline size after measurement");
        }
    }
}

/// Outcome of one measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMeasurementResult {
    /// Visual lines at the candidate width; at least 1.
    pub line_count: u32,
    /// Height for single-line mode, padding included.
    pub single_line_height_px: f64,
    /// `line_count > 1`.
    pub is_overflowing: bool,
    /// Raw natural height the surface reported.
    pub natural_height_px: f64,
}

impl TextMeasurementResult {
    /// Derive the result from a natural height and resolved metrics.
    #[must_use]
    pub fn from_natural_height(
        natural_height_px: f64,
        metrics: &FontMetrics,
        config: &AutosizeConfig,
    ) -> Self {
        let content_px = natural_height_px - metrics.vertical_padding_px();
        let lines = (content_px / metrics.line_height_px).ceil();
        let line_count = if lines.is_finite() && lines > 1.0 {
            lines.min(f64::from(u32::MAX)) as u32
        } else {
            1
        };

        let one_line_px = metrics.one_line_height_px();
        let candidate_px = if line_count == 1 {
            one_line_px.max(natural_height_px)
        } else {
            one_line_px
        };

        Self {
            line_count,
            single_line_height_px: config.single_line_min_px.max(candidate_px),
            is_overflowing: line_count > 1,
            natural_height_px,
        }
    }

    /// Result used when measurement fails: one line at `single_line_height_px`.
    #[must_use]
    pub fn assume_single_line(single_line_height_px: f64) -> Self {
        Self {
            line_count: 1,
            single_line_height_px,
            is_overflowing: false,
            natural_height_px: 0.0,
        }
    }
}

/// Measure `surface` as if it were `candidate_width_px` wide.
pub fn measure<S: MeasureSurface + ?Sized>(
    surface: &mut S,
    candidate_width_px: f64,
    config: &AutosizeConfig,
) -> Result<TextMeasurementResult, MeasureError> {
    if !surface.is_attached() {
        return Err(MeasureError::unavailable("surface is detached"));
    }
    if !candidate_width_px.is_finite() || candidate_width_px <= 0.0 {
        return Err(MeasureError::unavailable(format!(
            "candidate width {candidate_width_px}px is not positive"
        )));
    }

    let natural_height_px = {
        let mut guard = StyleGuard::new(surface);
        guard.set_inline_size(InlineSize {
            width: Some(SizeValue::Px(candidate_width_px)),
            height: Some(SizeValue::Auto),
        })?;
        guard.scroll_height()?
    };
    if !natural_height_px.is_finite() || natural_height_px < 0.0 {
        return Err(MeasureError::unavailable(format!(
            "surface reported height {natural_height_px}px"
        )));
    }

    let metrics = FontMetrics::from_computed(&surface.computed_style(), config);
    let result = TextMeasurementResult::from_natural_height(natural_height_px, &metrics, config);
    tracing::trace!(
        candidate_width_px,
        natural_height_px,
        line_count = result.line_count,
        single_line_height_px = result.single_line_height_px,
        "measured textarea"
    );
    Ok(result)
}
