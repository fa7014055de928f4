#![forbid(unsafe_code)]

//! Responsive textarea controller.
//!
//! [`ResponsiveAutosizer`] owns a [`MeasureSurface`] and decides when to
//! measure it and at which width. It switches between two modes:
//!
//! - **single-line**: a pill next to the action buttons, fixed at the
//!   measured single-line height;
//! - **multi-line**: a full-width block, 120 px tall, growing to 200 px.
//!
//! # Width tracking
//!
//! Entering multi-line mode widens the textarea to 100%, so its own width no
//! longer says whether the text would fit next to the buttons. The
//! controller caches the rendered width while in single-line mode and keeps
//! measuring against that cached width while in multi-line mode. Measuring
//! the widened element instead makes the mode flip back and forth.
//!
//! # Triggers
//!
//! | Event | Handling |
//! |---|---|
//! | text input | [`on_input`](ResponsiveAutosizer::on_input) requests a frame; work runs in [`on_frame`](ResponsiveAutosizer::on_frame) |
//! | element resize | [`on_resize`](ResponsiveAutosizer::on_resize) measures immediately |
//! | multi-line → single-line | a re-validation frame re-reads the width after the layout switch |
//!
//! Frame requests coalesce: ten keystrokes before the next tick cost one
//! measurement. A frame that fires after the surface was detached does
//! nothing.
//!
//! # Example
//!
//! ```
//! use panefit_text::{AutosizeConfig, ResponsiveAutosizer, VirtualTextarea};
//!
//! let textarea = VirtualTextarea::new(10.0, 400.0)
//!     .with_reserved_px(100.0)
//!     .with_padding("5px", "5px");
//! let mut sizer = ResponsiveAutosizer::new(textarea, AutosizeConfig::default());
//! sizer.mount();
//! assert!(!sizer.is_overflow());
//!
//! sizer.surface_mut().set_text("a".repeat(45));
//! sizer.on_input();
//! sizer.on_frame();
//! assert!(sizer.is_overflow());
//! ```

use std::fmt;

use bitflags::bitflags;
use panefit_core::frame::{FrameScheduler, ScheduleOutcome};

use crate::measure::{MeasureSurface, SizeValue, TextMeasurementResult, measure};
use crate::metrics::AutosizeConfig;

bitflags! {
    /// Why a frame was requested.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RemeasureReason: u8 {
        /// Text changed.
        const INPUT = 1 << 0;
        /// Left multi-line mode; the rendered width must be re-read.
        const MODE_EXIT = 1 << 1;
        /// Host asked for a re-check.
        const EXPLICIT = 1 << 2;
    }
}

/// CSS `flex` shorthand for the textarea.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexMode {
    /// `flex: 1`
    Grow,
    /// `flex: none`
    None,
}

impl fmt::Display for FlexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Grow => "1",
            Self::None => "none",
        })
    }
}

/// Inline sizing the view applies to the textarea.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextareaStyle {
    pub height: SizeValue,
    pub min_height: SizeValue,
    pub max_height: SizeValue,
    pub width: SizeValue,
    pub flex: FlexMode,
}

type OverflowCallback = Box<dyn FnMut(bool)>;

/// Drives measurement of one textarea and tracks its layout mode.
pub struct ResponsiveAutosizer<S> {
    surface: S,
    config: AutosizeConfig,
    force_single_line: bool,
    overflow: bool,
    single_line_height_px: f64,
    single_line_width_px: f64,
    frames: FrameScheduler<RemeasureReason>,
    last: Option<TextMeasurementResult>,
    on_overflow_change: Option<OverflowCallback>,
    measurements: u64,
    fallbacks: u64,
}

impl<S: MeasureSurface> ResponsiveAutosizer<S> {
    /// Wrap `surface`. Starts in single-line mode at the configured minimum
    /// height; call [`mount`](Self::mount) once the surface is laid out.
    #[must_use]
    pub fn new(surface: S, config: AutosizeConfig) -> Self {
        Self {
            surface,
            single_line_height_px: config.single_line_min_px,
            config,
            force_single_line: false,
            overflow: false,
            single_line_width_px: 0.0,
            frames: FrameScheduler::new(),
            last: None,
            on_overflow_change: None,
            measurements: 0,
            fallbacks: 0,
        }
    }

    /// Never report overflow.
    #[must_use]
    pub fn with_force_single_line(mut self, force: bool) -> Self {
        self.force_single_line = force;
        self
    }

    /// Called with the overflow flag after every measurement.
    #[must_use]
    pub fn with_overflow_callback(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_overflow_change = Some(Box::new(callback));
        self
    }

    /// Replace the overflow callback.
    pub fn set_overflow_callback(&mut self, callback: impl FnMut(bool) + 'static) {
        self.on_overflow_change = Some(Box::new(callback));
    }

    /// Toggle forced single-line mode. Takes effect at the next measurement.
    pub fn set_force_single_line(&mut self, force: bool) {
        self.force_single_line = force;
    }

    /// First measurement after the surface is laid out.
    pub fn mount(&mut self) -> TextMeasurementResult {
        self.check()
    }

    /// Text changed. The measurement is deferred to the next frame.
    pub fn on_input(&mut self) -> ScheduleOutcome {
        self.frames.request(RemeasureReason::INPUT)
    }

    /// Request a deferred re-check for any other reason.
    pub fn request_check(&mut self) -> ScheduleOutcome {
        self.frames.request(RemeasureReason::EXPLICIT)
    }

    /// The element was resized. Measures immediately.
    pub fn on_resize(&mut self) -> TextMeasurementResult {
        self.check()
    }

    /// Run the pending frame, if any.
    ///
    /// Returns `None` when nothing was pending, when the surface is gone,
    /// or when a re-validation frame was overtaken by a switch back to
    /// multi-line mode.
    pub fn on_frame(&mut self) -> Option<TextMeasurementResult> {
        let ticket = self.frames.take()?;
        if !self.surface.is_attached() {
            tracing::debug!(reasons = ?ticket.reasons, "surface detached; frame dropped");
            return None;
        }
        if ticket.reasons == RemeasureReason::MODE_EXIT && self.overflow {
            return None;
        }
        tracing::trace!(
            reasons = ?ticket.reasons,
            requests = ticket.requests,
            "autosize frame"
        );
        Some(self.check())
    }

    /// Drop any pending frame. The surface stays owned by the autosizer.
    pub fn unmount(&mut self) {
        if self.frames.cancel() {
            tracing::trace!("pending autosize frame cancelled");
        }
    }

    /// Whether the textarea is in multi-line mode.
    #[must_use]
    pub fn is_overflow(&self) -> bool {
        self.overflow
    }

    /// Height used while in single-line mode.
    #[must_use]
    pub fn single_line_height_px(&self) -> f64 {
        self.single_line_height_px
    }

    /// Width cached while in single-line mode, once known.
    #[must_use]
    pub fn single_line_width_px(&self) -> Option<f64> {
        (self.single_line_width_px > 0.0).then_some(self.single_line_width_px)
    }

    /// Most recent measurement.
    #[must_use]
    pub fn last_measurement(&self) -> Option<&TextMeasurementResult> {
        self.last.as_ref()
    }

    /// Whether a frame is waiting.
    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        self.frames.is_pending()
    }

    /// Measurements attempted so far.
    #[must_use]
    pub fn measurements(&self) -> u64 {
        self.measurements
    }

    /// Measurements that failed and fell back to a single line.
    #[must_use]
    pub fn fallbacks(&self) -> u64 {
        self.fallbacks
    }

    #[must_use]
    pub fn config(&self) -> &AutosizeConfig {
        &self.config
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Give the surface back.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Inline sizing for the current mode.
    #[must_use]
    pub fn textarea_style(&self) -> TextareaStyle {
        let single = SizeValue::Px(self.single_line_height_px);
        if self.overflow {
            TextareaStyle {
                height: SizeValue::Px(self.config.multi_line_height_px),
                min_height: single,
                max_height: SizeValue::Px(self.config.multi_line_max_height_px),
                width: SizeValue::Percent(100.0),
                flex: FlexMode::None,
            }
        } else {
            TextareaStyle {
                height: single,
                min_height: single,
                max_height: single,
                width: SizeValue::Auto,
                flex: FlexMode::Grow,
            }
        }
    }

    /// Pick the width, then measure and apply.
    fn check(&mut self) -> TextMeasurementResult {
        let rendered = self.surface.offset_width();
        if !self.overflow {
            self.single_line_width_px = rendered;
        }
        let width = if self.overflow && self.single_line_width_px > 0.0 {
            self.single_line_width_px
        } else {
            rendered
        };
        self.run(width)
    }

    fn run(&mut self, width_px: f64) -> TextMeasurementResult {
        self.measurements += 1;
        let result = match measure(&mut self.surface, width_px, &self.config) {
            Ok(result) => result,
            Err(err) => {
                self.fallbacks += 1;
                tracing::debug!(error = %err, width_px, "measurement failed; assuming single line");
                TextMeasurementResult::assume_single_line(self.single_line_height_px)
            }
        };

        self.single_line_height_px = result.single_line_height_px;
        let overflow = result.is_overflowing && !self.force_single_line;
        if overflow != self.overflow {
            tracing::debug!(
                overflow,
                line_count = result.line_count,
                width_px,
                "textarea layout mode changed"
            );
            if self.overflow {
                self.frames.request(RemeasureReason::MODE_EXIT);
            }
            self.overflow = overflow;
        }
        self.last = Some(result);
        if let Some(callback) = self.on_overflow_change.as_mut() {
            callback(overflow);
        }
        result
    }
}

impl<S: fmt::Debug> fmt::Debug for ResponsiveAutosizer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponsiveAutosizer")
            .field("surface", &self.surface)
            .field("overflow", &self.overflow)
            .field("single_line_height_px", &self.single_line_height_px)
            .field("single_line_width_px", &self.single_line_width_px)
            .field("force_single_line", &self.force_single_line)
            .field("pending_frame", &self.frames.is_pending())
            .field("has_callback", &self.on_overflow_change.is_some())
            .finish()
    }
}
