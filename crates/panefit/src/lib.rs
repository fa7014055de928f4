#![forbid(unsafe_code)]

//! panefit public facade.
//!
//! Re-exports the common types from the panefit crates and a prelude for
//! day-to-day use:
//!
//! - split-pane width allocation ([`allocate`], [`TripleSplitPane`]);
//! - textarea autosizing ([`ResponsiveAutosizer`], [`measure`]);
//! - message sender rules ([`SenderPolicy`], [`ResponsiveSender`]).
//!
//! ```
//! use panefit::prelude::*;
//!
//! let left = PanelSpec::new(PanelSide::Left, 300.0, 0.0, 200.0);
//! let right = PanelSpec::new(PanelSide::Right, 300.0, 0.0, 200.0);
//! let result = allocate(900.0, left, right, 400.0);
//! assert_eq!(result.left_width_px, 250.0);
//! assert_eq!(result.center_width_px(), 400.0);
//! ```

pub mod error;

pub use error::{DegradationAction, Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use panefit_core::event::{KeyCode, KeyEvent, Modifiers};
pub use panefit_core::frame::{FrameScheduler, ScheduleOutcome};
pub use panefit_core::length::{CssLength, LengthParseError, resolve_width};
#[cfg(feature = "log-init")]
pub use panefit_core::logging::init_subscriber;
pub use panefit_core::logging::LogFormat;

// --- Layout re-exports -----------------------------------------------------

pub use panefit_layout::{
    AllocationStatus, LayoutError, LayoutResult, PaneLayout, PanelConfig, PanelSide, PanelSpec,
    ResizeHub, ResizeSubscription, TripleSplitPane, TripleSplitPaneConfig, allocate, bind_resize,
    try_allocate,
};

// --- Text re-exports -------------------------------------------------------

pub use panefit_text::{
    AutosizeConfig, MeasureError, MeasureSurface, ResponsiveAutosizer, TextMeasurementResult,
    TextareaStyle, VirtualTextarea, measure,
};

// --- Widget re-exports -----------------------------------------------------

pub use panefit_widgets::{
    InputRowLayout, ResponsiveSender, SenderCallbacks, SenderContext, SenderLayout, SenderPolicy,
    SubmitReason,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AutosizeConfig, CssLength, Error, KeyCode, KeyEvent, LayoutResult, Modifiers, PanelSide,
        PanelSpec, ResponsiveAutosizer, ResponsiveSender, Result, SenderPolicy, TripleSplitPane,
        TripleSplitPaneConfig, VirtualTextarea, allocate, measure,
    };

    pub use crate::{core, layout, text, widgets};
}

pub use panefit_core as core;
pub use panefit_layout as layout;
pub use panefit_text as text;
pub use panefit_widgets as widgets;
