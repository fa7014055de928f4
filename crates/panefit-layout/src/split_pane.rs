#![forbid(unsafe_code)]

//! Three-pane width allocation.
//!
//! A container holds a left pane, a center pane, and a right pane. The side
//! panes have an expanded width, a collapsed width (`0` = hidden, positive =
//! icon rail), and a minimum width. The center pane fills what is left and
//! must keep at least `center_min_width_px`.
//!
//! [`allocate`] answers one question: what widths should the side panes get
//! for this container?
//!
//! 1. Start from each side's current width (collapsed or expanded).
//! 2. If the center already gets its minimum, return those widths untouched.
//! 3. Otherwise compute the excess and take it from the side panes in
//!    proportion to their current widths, clamping each to its floor.
//!
//! # Invariants
//!
//! 1. A resolved side width is never below its floor: the collapsed width
//!    while collapsed, the minimum width while expanded (for specs that pass
//!    [`PanelSpec::validate`]).
//! 2. When the center fits at current widths the result equals the current
//!    widths exactly.
//! 3. `allocate` is pure and total: no I/O, no panics, same inputs give the
//!    same output.
//!
//! # Failure Modes
//!
//! When the floors plus the center minimum exceed the container, the floors
//! win and the center is squeezed below its minimum
//! ([`AllocationStatus::CenterCompressed`]). Clamping does not hand one
//! side's unused reduction to the other side, so the center can also end up
//! compressed while the floors are technically feasible.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

const EPSILON: f64 = 1e-9;

/// Pane position within the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelSide {
    Left,
    Center,
    Right,
}

impl fmt::Display for PanelSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        })
    }
}

/// Width declaration and collapse state for one pane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub id: PanelSide,
    pub expanded_width_px: f64,
    pub collapsed_width_px: f64,
    pub min_width_px: f64,
    pub collapsed: bool,
}

impl PanelSpec {
    /// An expanded pane.
    #[must_use]
    pub const fn new(
        id: PanelSide,
        expanded_width_px: f64,
        collapsed_width_px: f64,
        min_width_px: f64,
    ) -> Self {
        Self {
            id,
            expanded_width_px,
            collapsed_width_px,
            min_width_px,
            collapsed: false,
        }
    }

    /// Set the collapse state.
    #[must_use]
    pub const fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Width the pane occupies before any shrinking.
    #[must_use]
    pub fn current_width_px(&self) -> f64 {
        if self.collapsed {
            self.collapsed_width_px
        } else {
            self.expanded_width_px
        }
    }

    /// Smallest width the pane may be resolved to.
    #[must_use]
    pub fn floor_px(&self) -> f64 {
        if self.collapsed {
            self.collapsed_width_px
        } else {
            self.min_width_px
        }
    }

    /// Check the panel's own invariants.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let fields = [
            ("expanded width", self.expanded_width_px),
            ("collapsed width", self.collapsed_width_px),
            ("min width", self.min_width_px),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(self.invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.collapsed_width_px > self.expanded_width_px {
            return Err(self.invalid(format!(
                "collapsed width {} exceeds expanded width {}",
                self.collapsed_width_px, self.expanded_width_px
            )));
        }
        if self.min_width_px > self.expanded_width_px {
            return Err(self.invalid(format!(
                "min width {} exceeds expanded width {}",
                self.min_width_px, self.expanded_width_px
            )));
        }
        if self.id == PanelSide::Center && self.collapsed {
            return Err(self.invalid("center pane cannot collapse".to_owned()));
        }
        Ok(())
    }

    fn invalid(&self, detail: String) -> LayoutError {
        LayoutError::InvalidPanel {
            side: self.id,
            detail,
        }
    }
}

/// How [`allocate`] arrived at its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    /// Current widths already leave the center its minimum.
    Unchanged,
    /// Side panes were shrunk and the center now meets its minimum.
    Shrunk,
    /// Side panes hit their floors; the center is below its minimum.
    CenterCompressed,
}

/// Resolved side-pane widths for one container width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub left_width_px: f64,
    pub right_width_px: f64,
    pub container_width_px: f64,
    pub center_min_width_px: f64,
    pub status: AllocationStatus,
}

impl LayoutResult {
    /// Width left for the center pane. Negative when the floors overflow
    /// the container.
    #[must_use]
    pub fn center_width_px(&self) -> f64 {
        self.container_width_px - self.left_width_px - self.right_width_px
    }

    /// Whether the center got at least its minimum.
    #[must_use]
    pub fn center_meets_minimum(&self) -> bool {
        self.center_width_px() + EPSILON >= self.center_min_width_px
    }

    /// Left width as an inline style value (`"250px"`).
    #[must_use]
    pub fn left_css(&self) -> String {
        format!("{}px", self.left_width_px)
    }

    /// Right width as an inline style value.
    #[must_use]
    pub fn right_css(&self) -> String {
        format!("{}px", self.right_width_px)
    }
}

/// Resolve side-pane widths so the center keeps `center_min_width_px`.
///
/// See the [module docs](self) for the algorithm and its guarantees.
#[must_use]
pub fn allocate(
    container_width_px: f64,
    left: PanelSpec,
    right: PanelSpec,
    center_min_width_px: f64,
) -> LayoutResult {
    let current_left = left.current_width_px();
    let current_right = right.current_width_px();
    let remaining = container_width_px - current_left - current_right;

    let mut result = LayoutResult {
        left_width_px: current_left,
        right_width_px: current_right,
        container_width_px,
        center_min_width_px,
        status: AllocationStatus::Unchanged,
    };

    if remaining >= center_min_width_px {
        return result;
    }

    let excess = current_left + current_right + center_min_width_px - container_width_px;
    let side_total = current_left + current_right;
    let (left_ratio, right_ratio) = if side_total > 0.0 {
        let left_ratio = current_left / side_total;
        (left_ratio, 1.0 - left_ratio)
    } else {
        (0.0, 0.0)
    };

    result.left_width_px = left.floor_px().max(current_left - excess * left_ratio);
    result.right_width_px = right.floor_px().max(current_right - excess * right_ratio);
    result.status = if result.center_meets_minimum() {
        AllocationStatus::Shrunk
    } else {
        AllocationStatus::CenterCompressed
    };

    tracing::debug!(
        container_px = container_width_px,
        excess_px = excess,
        left_px = result.left_width_px,
        right_px = result.right_width_px,
        status = ?result.status,
        "side panes shrunk"
    );

    result
}

/// Validate inputs, then [`allocate`].
pub fn try_allocate(
    container_width_px: f64,
    left: PanelSpec,
    right: PanelSpec,
    center_min_width_px: f64,
) -> Result<LayoutResult, LayoutError> {
    if !container_width_px.is_finite() || container_width_px < 0.0 {
        return Err(LayoutError::InvalidContainer {
            width_px: container_width_px,
        });
    }
    if !center_min_width_px.is_finite() || center_min_width_px < 0.0 {
        return Err(LayoutError::InvalidPanel {
            side: PanelSide::Center,
            detail: format!("min width must be a non-negative number, got {center_min_width_px}"),
        });
    }
    left.validate()?;
    right.validate()?;
    Ok(allocate(container_width_px, left, right, center_min_width_px))
}

/// Whether both floors and the center minimum fit in the container.
#[must_use]
pub fn floors_feasible(
    container_width_px: f64,
    left: PanelSpec,
    right: PanelSpec,
    center_min_width_px: f64,
) -> bool {
    left.floor_px() + right.floor_px() + center_min_width_px <= container_width_px
}
