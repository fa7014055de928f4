#![forbid(unsafe_code)]

//! Pane configuration as data.
//!
//! Widths are CSS-like strings resolved against the container at layout
//! time, so a config can mix fixed (`"300px"`), relative (`"20%"`), and
//! font-relative (`"18rem"`) widths.
//!
//! # Loading
//!
//! ```toml
//! [left]
//! width = "280px"
//! min_width = "200px"
//! collapsed_width = "48px"
//!
//! [center]
//! min_width = "40%"
//!
//! [right]
//! default_collapsed = true
//! ```
//!
//! ```rust,ignore
//! let config = TripleSplitPaneConfig::from_toml_file("panes.toml")?;
//! ```
//!
//! # Defaults
//!
//! Side panes: width `300px`, min width `200px`, collapsed width `0px`,
//! icon shown when compact, initially expanded. Center: min width `400px`.

#[cfg(feature = "config")]
use std::path::Path;

use panefit_core::length::CssLength;
use serde::{Deserialize, Serialize};

use crate::split_pane::{PanelSide, PanelSpec};

/// Configuration for a collapsible side pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Width while expanded.
    pub width: CssLength,
    /// Smallest width while expanded.
    pub min_width: CssLength,
    /// Width while collapsed; `0` hides the pane, positive keeps an icon rail.
    pub collapsed_width: CssLength,
    /// Show the collapse icon while in icon-rail mode.
    pub show_icon_when_compact: bool,
    /// Start collapsed.
    pub default_collapsed: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: CssLength::px(300.0),
            min_width: CssLength::px(200.0),
            collapsed_width: CssLength::ZERO,
            show_icon_when_compact: true,
            default_collapsed: false,
        }
    }
}

impl PanelConfig {
    /// Resolve to pixel widths for a container.
    #[must_use]
    pub fn resolve(&self, side: PanelSide, container_px: f64, collapsed: bool) -> PanelSpec {
        PanelSpec::new(
            side,
            finite_px(self.width, container_px),
            finite_px(self.collapsed_width, container_px),
            finite_px(self.min_width, container_px),
        )
        .with_collapsed(collapsed)
    }

    /// Whether the collapsed pane keeps a visible rail.
    ///
    /// Percent widths resolve against a zero container here, so only
    /// absolute collapsed widths produce a rail.
    #[must_use]
    pub fn has_rail(&self) -> bool {
        finite_px(self.collapsed_width, 0.0) > 0.0
    }

    /// Build from raw width strings as a markup host passes them.
    ///
    /// A missing width takes the default; a present one is read leniently
    /// ([`CssLength::parse_lenient`]) and falls back to `0px` when nothing
    /// numeric can be read, which hides the pane instead of failing.
    #[must_use]
    pub fn from_css(
        width: Option<&str>,
        min_width: Option<&str>,
        collapsed_width: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            width: lenient_or(width, defaults.width),
            min_width: lenient_or(min_width, defaults.min_width),
            collapsed_width: lenient_or(collapsed_width, defaults.collapsed_width),
            ..defaults
        }
    }

    fn validate_into(&self, side: PanelSide, errors: &mut Vec<String>) {
        // Relative widths can only be compared once a container is known.
        if self.width.is_relative()
            || self.min_width.is_relative()
            || self.collapsed_width.is_relative()
        {
            return;
        }
        let width = self.width.resolve(0.0);
        let min = self.min_width.resolve(0.0);
        let collapsed = self.collapsed_width.resolve(0.0);
        if min > width {
            errors.push(format!(
                "{side}: min_width {} exceeds width {}",
                self.min_width, self.width
            ));
        }
        if collapsed > width {
            errors.push(format!(
                "{side}: collapsed_width {} exceeds width {}",
                self.collapsed_width, self.width
            ));
        }
    }
}

/// Configuration for the center pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterConfig {
    /// Width the center keeps before side panes start shrinking.
    pub min_width: CssLength,
}

impl CenterConfig {
    /// Build from a raw `min-width` string; see [`PanelConfig::from_css`].
    #[must_use]
    pub fn from_css(min_width: Option<&str>) -> Self {
        Self {
            min_width: lenient_or(min_width, Self::default().min_width),
        }
    }

    /// Minimum center width in pixels for a container.
    #[must_use]
    pub fn resolve(&self, container_px: f64) -> f64 {
        finite_px(self.min_width, container_px)
    }
}

impl Default for CenterConfig {
    fn default() -> Self {
        Self {
            min_width: CssLength::px(400.0),
        }
    }
}

/// Resolve `length`, treating a result that overflowed to infinity as 0.
fn finite_px(length: CssLength, container_px: f64) -> f64 {
    let px = length.resolve(container_px);
    if px.is_finite() { px } else { 0.0 }
}

fn lenient_or(raw: Option<&str>, default: CssLength) -> CssLength {
    raw.map_or(default, |s| {
        CssLength::parse_lenient(s).unwrap_or(CssLength::ZERO)
    })
}

/// Full three-pane configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripleSplitPaneConfig {
    pub left: PanelConfig,
    pub center: CenterConfig,
    pub right: PanelConfig,
}

impl TripleSplitPaneConfig {
    /// Config for one side pane. `Center` has no panel config.
    #[must_use]
    pub fn panel(&self, side: PanelSide) -> Option<&PanelConfig> {
        match side {
            PanelSide::Left => Some(&self.left),
            PanelSide::Right => Some(&self.right),
            PanelSide::Center => None,
        }
    }

    /// Human-readable validation problems; empty when the config is sound.
    #[must_use]
    pub fn problems(&self) -> Vec<String> {
        let mut errors = Vec::new();
        self.left.validate_into(PanelSide::Left, &mut errors);
        self.right.validate_into(PanelSide::Right, &mut errors);
        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validate()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validate()
    }

    /// Serialize to pretty TOML.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::TomlSerialize)
    }

    #[cfg(feature = "config")]
    fn validate(self) -> Result<Self, ConfigError> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(problems))
        }
    }
}

/// Errors from loading a pane configuration.
#[cfg(feature = "config")]
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// TOML serialization error.
    TomlSerialize(toml::ser::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

#[cfg(feature = "config")]
impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::TomlSerialize(e) => write!(f, "TOML serialize error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

#[cfg(feature = "config")]
impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::TomlSerialize(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_sizing() {
        let config = TripleSplitPaneConfig::default();
        assert_eq!(config.left.width, CssLength::px(300.0));
        assert_eq!(config.left.min_width, CssLength::px(200.0));
        assert_eq!(config.left.collapsed_width, CssLength::ZERO);
        assert!(config.left.show_icon_when_compact);
        assert!(!config.left.default_collapsed);
        assert_eq!(config.right, config.left);
        assert_eq!(config.center.min_width, CssLength::px(400.0));
        assert!(config.problems().is_empty());
    }

    #[test]
    fn resolve_against_container() {
        let panel = PanelConfig {
            width: CssLength::percent(25.0),
            ..PanelConfig::default()
        };
        let spec = panel.resolve(PanelSide::Left, 1200.0, false);
        assert_eq!(spec.expanded_width_px, 300.0);
        assert_eq!(spec.min_width_px, 200.0);
        assert_eq!(spec.collapsed_width_px, 0.0);
        assert!(!spec.collapsed);
    }

    #[test]
    fn non_finite_lengths_resolve_to_zero() {
        let panel = PanelConfig {
            width: CssLength::px(f64::INFINITY),
            min_width: CssLength::percent(f64::MAX),
            ..PanelConfig::default()
        };
        let spec = panel.resolve(PanelSide::Left, 1000.0, false);
        assert_eq!(spec.expanded_width_px, 0.0);
        assert_eq!(spec.min_width_px, 0.0);

        let center = CenterConfig {
            min_width: CssLength::px(f64::NAN),
        };
        assert_eq!(center.resolve(1000.0), 0.0);
    }

    #[test]
    fn css_strings_read_leniently() {
        let panel = PanelConfig::from_css(Some("1.2.3px"), None, Some("wide"));
        assert_eq!(panel.width, CssLength::px(1.2));
        assert_eq!(panel.min_width, CssLength::px(200.0));
        assert_eq!(panel.collapsed_width, CssLength::ZERO);
        assert!(panel.show_icon_when_compact);

        assert_eq!(CenterConfig::from_css(None).min_width, CssLength::px(400.0));
        assert_eq!(CenterConfig::from_css(Some("40%")).resolve(1000.0), 400.0);
    }

    #[test]
    fn rail_detection() {
        let mut panel = PanelConfig::default();
        assert!(!panel.has_rail());
        panel.collapsed_width = CssLength::px(48.0);
        assert!(panel.has_rail());
        panel.collapsed_width = CssLength::percent(5.0);
        assert!(!panel.has_rail());
    }

    #[test]
    fn problems_flag_inverted_widths() {
        let mut config = TripleSplitPaneConfig::default();
        config.right.min_width = CssLength::px(500.0);
        let problems = config.problems();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].starts_with("right"));
    }

    #[test]
    fn relative_widths_skip_comparison() {
        let mut config = TripleSplitPaneConfig::default();
        config.left.width = CssLength::percent(10.0);
        config.left.min_width = CssLength::px(5000.0);
        assert!(config.problems().is_empty());
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_override() {
        let toml = r#"
            [left]
            width = "280px"
            collapsed_width = "48px"

            [center]
            min_width = "40%"

            [right]
            default_collapsed = true
        "#;
        let config = TripleSplitPaneConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.left.width, CssLength::px(280.0));
        assert_eq!(config.left.min_width, CssLength::px(200.0));
        assert_eq!(config.left.collapsed_width, CssLength::px(48.0));
        assert_eq!(config.center.min_width, CssLength::percent(40.0));
        assert!(config.right.default_collapsed);
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_bad_length_is_parse_error() {
        let err = TripleSplitPaneConfig::from_toml_str("[left]\nwidth = \"wide\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_validation_error() {
        let json = r#"{ "left": { "width": "100px", "min_width": "200px" } }"#;
        let err = TripleSplitPaneConfig::from_json_str(json).unwrap_err();
        match err {
            ConfigError::Validation(problems) => assert_eq!(problems.len(), 1),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_round_trip() {
        let mut config = TripleSplitPaneConfig::default();
        config.right.collapsed_width = CssLength::rem(3.0);
        let text = config.to_toml_string().unwrap();
        let back = TripleSplitPaneConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_file_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panes.toml");
        std::fs::write(&path, "[center]\nmin_width = \"320px\"\n").unwrap();
        let config = TripleSplitPaneConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.center.min_width, CssLength::px(320.0));

        let missing = TripleSplitPaneConfig::from_toml_file(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
