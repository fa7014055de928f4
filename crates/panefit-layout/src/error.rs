#![forbid(unsafe_code)]

//! Layout errors.

use std::fmt;

use crate::split_pane::PanelSide;

/// Errors reported by the split-pane layer.
///
/// None of these abort a render: [`allocate`](crate::allocate) never fails,
/// and the controller keeps its previous layout when it sees bad input.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Container width is negative, NaN, or infinite.
    InvalidContainer { width_px: f64 },
    /// A panel spec breaks its own invariants.
    InvalidPanel { side: PanelSide, detail: String },
    /// The side-panel floors plus the center minimum exceed the container.
    InfeasibleConstraints { floors_px: f64, container_px: f64 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidContainer { width_px } => {
                write!(f, "invalid container width: {width_px}px")
            }
            Self::InvalidPanel { side, detail } => write!(f, "invalid {side} panel: {detail}"),
            Self::InfeasibleConstraints {
                floors_px,
                container_px,
            } => write!(
                f,
                "infeasible constraints: floors need {floors_px}px, container has {container_px}px"
            ),
        }
    }
}

impl std::error::Error for LayoutError {}
