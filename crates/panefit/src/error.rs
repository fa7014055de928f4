#![forbid(unsafe_code)]

//! Unified error type and graceful degradation.
//!
//! Every panefit subsystem reports its own typed error. [`Error`] wraps them
//! so hosts can use `?` across crates, and [`Error::degradation`] says how
//! to keep rendering instead of failing:
//!
//! | Error | Action |
//! |---|---|
//! | measurement unavailable, style write refused | [`AssumeSingleLine`](DegradationAction::AssumeSingleLine) |
//! | infeasible pane floors | [`UseFloorWidths`](DegradationAction::UseFloorWidths) |
//! | invalid container width | [`ReusePreviousLayout`](DegradationAction::ReusePreviousLayout) |
//! | bad length, bad panel, bad config | [`UseDefaults`](DegradationAction::UseDefaults) |
//! | I/O | [`Propagate`](DegradationAction::Propagate) |

use std::fmt;

use panefit_core::LengthParseError;
#[cfg(feature = "config")]
use panefit_layout::ConfigError;
use panefit_layout::LayoutError;
use panefit_text::MeasureError;

/// Top-level error type for panefit hosts.
#[derive(Debug)]
pub enum Error {
    /// A CSS-like length could not be parsed.
    Length(LengthParseError),
    /// Textarea measurement failed.
    Measure(MeasureError),
    /// Split-pane layout input was rejected.
    Layout(LayoutError),
    /// Pane configuration could not be loaded.
    #[cfg(feature = "config")]
    Config(ConfigError),
    /// Raw I/O error.
    Io(std::io::Error),
}

/// Standard result type for panefit APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// What the host should do instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradationAction {
    /// Keep the textarea in single-line mode at its last known height.
    AssumeSingleLine,
    /// Give each side pane its floor and let the center compress.
    UseFloorWidths,
    /// Keep the last computed pane widths.
    ReusePreviousLayout,
    /// Fall back to the default configuration value.
    UseDefaults,
    /// Nothing sensible to fall back to; hand the error to the caller.
    Propagate,
}

impl Error {
    /// Recovery action for this error.
    #[must_use]
    pub fn degradation(&self) -> DegradationAction {
        match self {
            Self::Length(_) => DegradationAction::UseDefaults,
            Self::Measure(_) => DegradationAction::AssumeSingleLine,
            Self::Layout(LayoutError::InfeasibleConstraints { .. }) => {
                DegradationAction::UseFloorWidths
            }
            Self::Layout(LayoutError::InvalidContainer { .. }) => {
                DegradationAction::ReusePreviousLayout
            }
            Self::Layout(LayoutError::InvalidPanel { .. }) => DegradationAction::UseDefaults,
            #[cfg(feature = "config")]
            Self::Config(ConfigError::Io(_)) => DegradationAction::Propagate,
            #[cfg(feature = "config")]
            Self::Config(_) => DegradationAction::UseDefaults,
            Self::Io(_) => DegradationAction::Propagate,
        }
    }

    /// Short label for log fields.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Length(_) => "length",
            Self::Measure(_) => "measure",
            Self::Layout(_) => "layout",
            #[cfg(feature = "config")]
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }

    /// Whether rendering can continue.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.degradation() != DegradationAction::Propagate
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(e) => write!(f, "length: {e}"),
            Self::Measure(e) => write!(f, "measure: {e}"),
            Self::Layout(e) => write!(f, "layout: {e}"),
            #[cfg(feature = "config")]
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Io(e) => write!(f, "I/O: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Length(e) => Some(e),
            Self::Measure(e) => Some(e),
            Self::Layout(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Config(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<LengthParseError> for Error {
    fn from(e: LengthParseError) -> Self {
        Self::Length(e)
    }
}

impl From<MeasureError> for Error {
    fn from(e: MeasureError) -> Self {
        Self::Measure(e)
    }
}

impl From<LayoutError> for Error {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

#[cfg(feature = "config")]
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
