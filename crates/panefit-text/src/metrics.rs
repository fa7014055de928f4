#![forbid(unsafe_code)]

//! Font metrics read from computed style, and autosizer sizing constants.
//!
//! Computed style values arrive as strings (`"20px"`, `"normal"`, `""`).
//! [`parse_px`] reads the leading number the way browsers coerce them;
//! anything without a leading number falls back to the configured default.
//!
//! # Defaults
//!
//! | Setting | Value |
//! |---|---|
//! | single-line minimum height | 30 px |
//! | multi-line height | 120 px |
//! | multi-line max height | 200 px |
//! | fallback line height | 20 px |
//! | fallback padding | 0 px |

use serde::{Deserialize, Serialize};

/// Sizing constants for the responsive textarea.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosizeConfig {
    /// Floor for the single-line height.
    pub single_line_min_px: f64,
    /// Fixed height while in multi-line mode.
    pub multi_line_height_px: f64,
    /// Max height while in multi-line mode.
    pub multi_line_max_height_px: f64,
    /// Used when the computed line height is not a positive number.
    pub fallback_line_height_px: f64,
    /// Used when a computed padding is not a number.
    pub fallback_padding_px: f64,
}

impl Default for AutosizeConfig {
    fn default() -> Self {
        Self {
            single_line_min_px: 30.0,
            multi_line_height_px: 120.0,
            multi_line_max_height_px: 200.0,
            fallback_line_height_px: 20.0,
            fallback_padding_px: 0.0,
        }
    }
}

/// Raw computed-style strings relevant to measurement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    pub line_height: String,
    pub padding_top: String,
    pub padding_bottom: String,
}

impl ComputedStyle {
    /// Build from the three raw values.
    #[must_use]
    pub fn new(
        line_height: impl Into<String>,
        padding_top: impl Into<String>,
        padding_bottom: impl Into<String>,
    ) -> Self {
        Self {
            line_height: line_height.into(),
            padding_top: padding_top.into(),
            padding_bottom: padding_bottom.into(),
        }
    }
}

/// Resolved vertical metrics in px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub line_height_px: f64,
    pub padding_top_px: f64,
    pub padding_bottom_px: f64,
}

impl FontMetrics {
    /// Metrics from already-resolved numbers.
    #[must_use]
    pub const fn new(line_height_px: f64, padding_top_px: f64, padding_bottom_px: f64) -> Self {
        Self {
            line_height_px,
            padding_top_px,
            padding_bottom_px,
        }
    }

    /// Parse computed style, substituting fallbacks for unusable values.
    ///
    /// A line height of `0`, a negative one, or `"normal"` uses
    /// [`AutosizeConfig::fallback_line_height_px`].
    #[must_use]
    pub fn from_computed(style: &ComputedStyle, config: &AutosizeConfig) -> Self {
        let line_height_px = parse_px(&style.line_height)
            .filter(|v| *v > 0.0)
            .unwrap_or(config.fallback_line_height_px);
        let padding = |raw: &str| parse_px(raw).unwrap_or(config.fallback_padding_px);
        Self {
            line_height_px,
            padding_top_px: padding(&style.padding_top),
            padding_bottom_px: padding(&style.padding_bottom),
        }
    }

    /// Top plus bottom padding.
    #[must_use]
    pub fn vertical_padding_px(&self) -> f64 {
        self.padding_top_px + self.padding_bottom_px
    }

    /// Height of exactly one line including padding, rounded up.
    #[must_use]
    pub fn one_line_height_px(&self) -> f64 {
        (self.line_height_px + self.vertical_padding_px()).ceil()
    }
}

/// Leading decimal number of a CSS value, ignoring whatever follows.
///
/// `"20px"` and `"20"` give `20`, `"1.5em"` gives `1.5`, `"1.2.3"` gives
/// `1.2`. Returns `None` when there is no leading number.
#[must_use]
pub fn parse_px(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
