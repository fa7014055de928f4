#![forbid(unsafe_code)]

//! Textarea autosizing: one line or many?
//!
//! # Role in panefit
//! `panefit-text` decides whether a chat-style input fits on one line next
//! to its buttons or needs to become a multi-line block, and how tall the
//! single line should be.
//!
//! # Modules
//! - [`measure`]: the [`MeasureSurface`] trait, the style save/restore
//!   guard, and the pure [`measure`](measure::measure) step.
//! - [`autosize`]: [`ResponsiveAutosizer`], which picks the width to measure
//!   at and defers input-driven work to the next frame.
//! - [`metrics`]: computed-style parsing and [`AutosizeConfig`].
//! - [`wrap`]: Unicode-aware visual line breaking.
//! - [`virtual_surface`]: [`VirtualTextarea`], a grid-based surface.

pub mod autosize;
pub mod error;
pub mod measure;
pub mod metrics;
pub mod virtual_surface;
pub mod wrap;

pub use autosize::{FlexMode, RemeasureReason, ResponsiveAutosizer, TextareaStyle};
pub use error::MeasureError;
pub use measure::{
    InlineSize, MeasureSurface, SizeValue, StyleGuard, TextMeasurementResult, measure,
};
pub use metrics::{AutosizeConfig, ComputedStyle, FontMetrics, parse_px};
pub use virtual_surface::VirtualTextarea;
pub use wrap::{display_width, line_count, wrap_lines};
