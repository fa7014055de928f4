#![forbid(unsafe_code)]

//! Split-pane layout: width allocation and triple-pane state.
//!
//! # Role in panefit
//! `panefit-layout` resolves the widths of a left / center / right pane
//! arrangement. The pure [`allocate`] function keeps the center pane at
//! or above its minimum by shrinking the side panes in proportion to their
//! current widths, never below their floors. [`TripleSplitPane`] wraps it
//! with collapse toggles, container resize handling, and configuration.
//!
//! # Modules
//! - [`split_pane`]: [`PanelSpec`], [`LayoutResult`], [`allocate`].
//! - [`triple_pane`]: the stateful controller a view binds to.
//! - [`config`]: serde configuration with CSS-like widths.
//! - [`resize`]: listener hub with drop-to-unsubscribe guards.

pub mod config;
pub mod error;
pub mod resize;
pub mod split_pane;
pub mod triple_pane;

pub use config::{CenterConfig, PanelConfig, TripleSplitPaneConfig};
#[cfg(feature = "config")]
pub use config::ConfigError;
pub use error::LayoutError;
pub use resize::{ResizeHub, ResizeSubscription};
pub use split_pane::{
    AllocationStatus, LayoutResult, PanelSide, PanelSpec, allocate, floors_feasible, try_allocate,
};
pub use triple_pane::{PaneLayout, TripleSplitPane, bind_resize};
