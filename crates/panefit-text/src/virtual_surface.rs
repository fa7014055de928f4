#![forbid(unsafe_code)]

//! A deterministic textarea for hosts without a layout engine.
//!
//! Text is laid out on a fixed grid: every display cell is `cell_width_px`
//! wide and every line is one line-height tall. The rendered width follows
//! the inline width the same way a flex-row textarea does:
//!
//! | inline width | rendered width |
//! |---|---|
//! | `Npx` | `N` |
//! | `P%` | `P%` of the container |
//! | `auto` / unset | container minus the reserved sibling width |
//!
//! Height follows the content unless an explicit px height is larger.

use crate::error::MeasureError;
use crate::measure::{InlineSize, MeasureSurface, SizeValue};
use crate::metrics::{AutosizeConfig, ComputedStyle, FontMetrics};
use crate::wrap;

/// In-memory [`MeasureSurface`] backed by [`wrap::line_count`].
#[derive(Debug, Clone)]
pub struct VirtualTextarea {
    text: String,
    cell_width_px: f64,
    container_width_px: f64,
    reserved_px: f64,
    style: ComputedStyle,
    inline: InlineSize,
    attached: bool,
    fail_scroll_reads: bool,
    fail_style_writes: bool,
    style_writes: u64,
}

impl VirtualTextarea {
    /// An attached, empty textarea with a 20px line height and no padding.
    #[must_use]
    pub fn new(cell_width_px: f64, container_width_px: f64) -> Self {
        Self {
            text: String::new(),
            cell_width_px,
            container_width_px,
            reserved_px: 0.0,
            style: ComputedStyle::new("20px", "0px", "0px"),
            inline: InlineSize::default(),
            attached: true,
            fail_scroll_reads: false,
            fail_style_writes: false,
            style_writes: 0,
        }
    }

    /// Width taken by siblings on the same row (send buttons and the like).
    #[must_use]
    pub fn with_reserved_px(mut self, reserved_px: f64) -> Self {
        self.reserved_px = reserved_px;
        self
    }

    /// Set the computed line height, e.g. `"20px"` or `"normal"`.
    #[must_use]
    pub fn with_line_height(mut self, line_height: impl Into<String>) -> Self {
        self.style.line_height = line_height.into();
        self
    }

    /// Set the computed vertical padding.
    #[must_use]
    pub fn with_padding(mut self, top: impl Into<String>, bottom: impl Into<String>) -> Self {
        self.style.padding_top = top.into();
        self.style.padding_bottom = bottom.into();
        self
    }

    /// Set the content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Replace the content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Current content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Resize the surrounding container.
    pub fn set_container_width(&mut self, container_width_px: f64) {
        self.container_width_px = container_width_px;
    }

    /// Remove from layout. Measurements fail until [`attach`](Self::attach).
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Return to layout.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Make [`MeasureSurface::scroll_height`] fail.
    pub fn fail_scroll_reads(&mut self, fail: bool) {
        self.fail_scroll_reads = fail;
    }

    /// Make [`MeasureSurface::set_inline_size`] fail.
    pub fn fail_style_writes(&mut self, fail: bool) {
        self.fail_style_writes = fail;
    }

    /// Number of accepted inline-size writes.
    #[must_use]
    pub fn style_writes(&self) -> u64 {
        self.style_writes
    }

    /// Visual lines at the current rendered width.
    #[must_use]
    pub fn visual_lines(&self) -> usize {
        let columns = if self.cell_width_px > 0.0 {
            (self.offset_width() / self.cell_width_px).floor().max(1.0) as usize
        } else {
            usize::MAX
        };
        wrap::line_count(&self.text, columns)
    }
}

impl MeasureSurface for VirtualTextarea {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn offset_width(&self) -> f64 {
        if !self.attached {
            return 0.0;
        }
        let width = match self.inline.width {
            Some(SizeValue::Px(px)) => px,
            Some(SizeValue::Percent(pct)) => self.container_width_px * pct / 100.0,
            Some(SizeValue::Auto) | None => self.container_width_px - self.reserved_px,
        };
        width.max(0.0)
    }

    fn inline_size(&self) -> InlineSize {
        self.inline
    }

    fn set_inline_size(&mut self, size: InlineSize) -> Result<(), MeasureError> {
        if self.fail_style_writes {
            return Err(MeasureError::StyleWrite {
                property: "width",
                detail: "style is read-only".to_owned(),
            });
        }
        self.inline = size;
        self.style_writes += 1;
        Ok(())
    }

    fn scroll_height(&self) -> Result<f64, MeasureError> {
        if !self.attached {
            return Err(MeasureError::unavailable("surface is detached"));
        }
        if self.fail_scroll_reads {
            return Err(MeasureError::unavailable("layout engine unavailable"));
        }
        let metrics = FontMetrics::from_computed(&self.style, &AutosizeConfig::default());
        let content = self.visual_lines() as f64 * metrics.line_height_px
            + metrics.vertical_padding_px();
        Ok(match self.inline.height {
            Some(SizeValue::Px(px)) => content.max(px),
            _ => content,
        })
    }

    fn computed_style(&self) -> ComputedStyle {
        self.style.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::measure;

    fn textarea() -> VirtualTextarea {
        VirtualTextarea::new(10.0, 400.0)
            .with_reserved_px(100.0)
            .with_padding("5px", "5px")
    }

    #[test]
    fn rendered_width_follows_inline_width() {
        let mut ta = textarea();
        assert_eq!(ta.offset_width(), 300.0);
        ta.set_inline_size(InlineSize {
            width: Some(SizeValue::Percent(100.0)),
            height: None,
        })
        .unwrap();
        assert_eq!(ta.offset_width(), 400.0);
        ta.set_inline_size(InlineSize {
            width: Some(SizeValue::Px(120.0)),
            height: None,
        })
        .unwrap();
        assert_eq!(ta.offset_width(), 120.0);
    }

    #[test]
    fn scroll_height_counts_wrapped_lines() {
        let ta = textarea().with_text("a".repeat(65));
        // 300px / 10px = 30 columns -> 3 lines.
        assert_eq!(ta.visual_lines(), 3);
        assert_eq!(ta.scroll_height().unwrap(), 70.0);
    }

    #[test]
    fn explicit_height_is_a_minimum() {
        let mut ta = textarea().with_text("hi");
        ta.set_inline_size(InlineSize {
            width: None,
            height: Some(SizeValue::Px(120.0)),
        })
        .unwrap();
        assert_eq!(ta.scroll_height().unwrap(), 120.0);
    }

    #[test]
    fn reference_scenarios() {
        let config = AutosizeConfig::default();

        let mut ta = textarea().with_text("hello");
        let single = measure(&mut ta, 300.0, &config).unwrap();
        assert_eq!(single.line_count, 1);
        assert!(!single.is_overflowing);
        assert_eq!(single.single_line_height_px, 30.0);

        ta.set_text("a".repeat(75));
        let multi = measure(&mut ta, 300.0, &config).unwrap();
        assert_eq!(multi.line_count, 3);
        assert!(multi.is_overflowing);
        assert_eq!(multi.single_line_height_px, 30.0);
    }

    #[test]
    fn detached_surface_fails() {
        let mut ta = textarea();
        ta.detach();
        assert_eq!(ta.offset_width(), 0.0);
        assert!(ta.scroll_height().is_err());
        ta.attach();
        assert!(ta.scroll_height().is_ok());
    }

    #[test]
    fn failed_writes_leave_style_untouched() {
        let mut ta = textarea().with_text("hello");
        ta.fail_style_writes(true);
        let err = measure(&mut ta, 300.0, &AutosizeConfig::default()).unwrap_err();
        assert!(matches!(err, MeasureError::StyleWrite { .. }));
        assert_eq!(ta.inline_size(), InlineSize::default());
        assert_eq!(ta.style_writes(), 0);
    }

    #[test]
    fn normal_line_height_uses_fallback() {
        let ta = VirtualTextarea::new(10.0, 300.0)
            .with_line_height("normal")
            .with_text("x");
        assert_eq!(ta.scroll_height().unwrap(), 20.0);
    }
}
