#![forbid(unsafe_code)]

//! Stateful three-pane controller.
//!
//! [`TripleSplitPane`] owns the collapse flags of the two side panes and the
//! last container width it was told about. Every resize and every collapse
//! toggle recomputes the side widths with [`allocate`]; the view applies the
//! result as inline widths.
//!
//! # Lifecycle
//!
//! ```text
//!   new(config) ──► Unmeasured (configured widths, unresolved)
//!        │
//!   on_resize(w) ──► Measured(LayoutResult)  ◄── toggle_left / toggle_right
//!        │
//!     detach() ──► Unmeasured
//! ```
//!
//! # Example
//!
//! ```
//! use panefit_layout::{TripleSplitPane, TripleSplitPaneConfig};
//!
//! let mut pane = TripleSplitPane::new(TripleSplitPaneConfig::default());
//! pane.on_resize(900.0);
//! assert_eq!(pane.left_css(), "250px");
//!
//! pane.toggle_left();
//! assert_eq!(pane.left_css(), "0px");
//! assert_eq!(pane.right_css(), "300px");
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use panefit_core::length::CssLength;

use crate::config::{PanelConfig, TripleSplitPaneConfig};
use crate::error::LayoutError;
use crate::resize::{ResizeHub, ResizeSubscription};
use crate::split_pane::{AllocationStatus, LayoutResult, PanelSide, allocate, floors_feasible};

/// Side widths as the view should apply them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaneLayout {
    /// No container width known yet; widths are the configured lengths.
    Unmeasured { left: CssLength, right: CssLength },
    /// Widths resolved for a concrete container.
    Measured(LayoutResult),
}

impl PaneLayout {
    /// The resolved result, if measured.
    #[must_use]
    pub fn result(&self) -> Option<&LayoutResult> {
        match self {
            Self::Measured(result) => Some(result),
            Self::Unmeasured { .. } => None,
        }
    }
}

/// Collapse state plus last computed layout for a left/center/right split.
#[derive(Debug, Clone)]
pub struct TripleSplitPane {
    config: TripleSplitPaneConfig,
    left_collapsed: bool,
    right_collapsed: bool,
    container_px: Option<f64>,
    layout: PaneLayout,
    diagnostic: Option<LayoutError>,
    recomputes: u64,
}

impl TripleSplitPane {
    /// Build a controller. Collapse flags start from `default_collapsed`.
    #[must_use]
    pub fn new(config: TripleSplitPaneConfig) -> Self {
        let left_collapsed = config.left.default_collapsed;
        let right_collapsed = config.right.default_collapsed;
        let layout = PaneLayout::Unmeasured {
            left: current_length(&config.left, left_collapsed),
            right: current_length(&config.right, right_collapsed),
        };
        Self {
            config,
            left_collapsed,
            right_collapsed,
            container_px: None,
            layout,
            diagnostic: None,
            recomputes: 0,
        }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &TripleSplitPaneConfig {
        &self.config
    }

    /// Container width changed.
    ///
    /// A non-finite or negative width is ignored and the previous layout
    /// is kept.
    pub fn on_resize(&mut self, container_px: f64) -> &PaneLayout {
        if !container_px.is_finite() || container_px < 0.0 {
            tracing::warn!(container_px, "ignoring invalid container width");
            return &self.layout;
        }
        self.container_px = Some(container_px);
        self.recompute();
        &self.layout
    }

    /// The container went away; fall back to configured widths.
    pub fn detach(&mut self) {
        self.container_px = None;
        self.recompute();
    }

    /// Flip the left pane between collapsed and expanded.
    pub fn toggle_left(&mut self) -> &PaneLayout {
        self.left_collapsed = !self.left_collapsed;
        self.recompute();
        &self.layout
    }

    /// Flip the right pane between collapsed and expanded.
    pub fn toggle_right(&mut self) -> &PaneLayout {
        self.right_collapsed = !self.right_collapsed;
        self.recompute();
        &self.layout
    }

    /// Set a side pane's collapse state. Returns whether anything changed.
    pub fn set_collapsed(&mut self, side: PanelSide, collapsed: bool) -> Result<bool, LayoutError> {
        let flag = match side {
            PanelSide::Left => &mut self.left_collapsed,
            PanelSide::Right => &mut self.right_collapsed,
            PanelSide::Center => {
                return Err(LayoutError::InvalidPanel {
                    side,
                    detail: "center pane cannot collapse".to_owned(),
                });
            }
        };
        if *flag == collapsed {
            return Ok(false);
        }
        *flag = collapsed;
        self.recompute();
        Ok(true)
    }

    /// Whether a pane is collapsed. The center never is.
    #[must_use]
    pub fn is_collapsed(&self, side: PanelSide) -> bool {
        match side {
            PanelSide::Left => self.left_collapsed,
            PanelSide::Right => self.right_collapsed,
            PanelSide::Center => false,
        }
    }

    /// Collapsed into a visible icon rail rather than hidden.
    #[must_use]
    pub fn is_compact(&self, side: PanelSide) -> bool {
        self.is_collapsed(side) && self.config.panel(side).is_some_and(PanelConfig::has_rail)
    }

    /// Whether the collapse icon is drawn while the pane is compact.
    #[must_use]
    pub fn shows_icon_when_compact(&self, side: PanelSide) -> bool {
        self.config
            .panel(side)
            .is_some_and(|panel| panel.show_icon_when_compact)
    }

    /// The center header offers an expand button while the left pane is
    /// collapsed.
    #[must_use]
    pub fn shows_left_expand_button(&self) -> bool {
        self.left_collapsed
    }

    /// Current layout.
    #[must_use]
    pub fn layout(&self) -> &PaneLayout {
        &self.layout
    }

    /// Last container width, if attached.
    #[must_use]
    pub fn container_px(&self) -> Option<f64> {
        self.container_px
    }

    /// Left width as an inline style value.
    #[must_use]
    pub fn left_css(&self) -> String {
        match &self.layout {
            PaneLayout::Unmeasured { left, .. } => length_css(*left),
            PaneLayout::Measured(result) => result.left_css(),
        }
    }

    /// Right width as an inline style value.
    #[must_use]
    pub fn right_css(&self) -> String {
        match &self.layout {
            PaneLayout::Unmeasured { right, .. } => length_css(*right),
            PaneLayout::Measured(result) => result.right_css(),
        }
    }

    /// Center `min-width` style value.
    #[must_use]
    pub fn center_min_css(&self) -> String {
        self.config.center.min_width.to_string()
    }

    /// Why the current layout is best-effort, if it is.
    ///
    /// Set to [`LayoutError::InfeasibleConstraints`] while the side floors
    /// plus the center minimum exceed the container; cleared by the next
    /// recompute that fits.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&LayoutError> {
        self.diagnostic.as_ref()
    }

    /// Number of layout recomputations so far.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    fn recompute(&mut self) {
        self.recomputes += 1;
        let Some(container_px) = self.container_px else {
            self.layout = PaneLayout::Unmeasured {
                left: current_length(&self.config.left, self.left_collapsed),
                right: current_length(&self.config.right, self.right_collapsed),
            };
            self.diagnostic = None;
            return;
        };

        let left = self
            .config
            .left
            .resolve(PanelSide::Left, container_px, self.left_collapsed);
        let right = self
            .config
            .right
            .resolve(PanelSide::Right, container_px, self.right_collapsed);
        let center_min = self.config.center.resolve(container_px);

        let result = allocate(container_px, left, right, center_min);

        self.diagnostic = if floors_feasible(container_px, left, right, center_min) {
            None
        } else {
            let floors_px = left.floor_px() + right.floor_px() + center_min;
            if self.diagnostic.is_none() {
                tracing::warn!(
                    container_px,
                    floors_px,
                    "pane floors exceed container; center will be compressed"
                );
            }
            Some(LayoutError::InfeasibleConstraints {
                floors_px,
                container_px,
            })
        };

        if result.status != AllocationStatus::Unchanged {
            tracing::debug!(
                container_px,
                left = %result.left_css(),
                right = %result.right_css(),
                "constrained pane widths"
            );
        }
        self.layout = PaneLayout::Measured(result);
    }
}

fn current_length(panel: &PanelConfig, collapsed: bool) -> CssLength {
    if collapsed {
        panel.collapsed_width
    } else {
        panel.width
    }
}

fn length_css(length: CssLength) -> String {
    if length.value().is_finite() {
        length.to_string()
    } else {
        CssLength::ZERO.to_string()
    }
}

/// Recompute `pane` whenever `hub` emits. Dropping the returned
/// subscription stops the updates.
pub fn bind_resize(pane: &Rc<RefCell<TripleSplitPane>>, hub: &ResizeHub) -> ResizeSubscription {
    let weak = Rc::downgrade(pane);
    hub.subscribe(move |width| {
        let Some(pane) = weak.upgrade() else {
            return;
        };
        match pane.try_borrow_mut() {
            Ok(mut pane) => {
                pane.on_resize(width);
            }
            Err(_) => tracing::warn!(width, "pane busy during resize; update skipped"),
        }
    })
}
