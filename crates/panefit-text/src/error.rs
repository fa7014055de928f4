#![forbid(unsafe_code)]

//! Measurement errors.

use std::fmt;

/// Why a textarea could not be measured.
///
/// Callers never surface these to users. The autosizer maps every variant
/// to "assume a single line" and keeps rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasureError {
    /// The surface is detached, zero-sized, or has no layout engine.
    MeasurementUnavailable { reason: String },
    /// An inline style write was rejected.
    StyleWrite {
        property: &'static str,
        detail: String,
    },
}

impl MeasureError {
    pub(crate) fn unavailable(reason: impl Into<String>) -> Self {
        Self::MeasurementUnavailable {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MeasurementUnavailable { reason } => {
                write!(f, "measurement unavailable: {reason}")
            }
            Self::StyleWrite { property, detail } => {
                write!(f, "failed to write inline {property}: {detail}")
            }
        }
    }
}

impl std::error::Error for MeasureError {}
