#![forbid(unsafe_code)]

//! Core: shared primitives for the panefit layout crates.
//!
//! # Role in panefit
//! `panefit-core` holds the small pieces both algorithms lean on:
//!
//! - **length**: CSS-like width strings (`"300px"`, `"20%"`, `"1.5rem"`)
//!   resolved to pixels against a container width.
//! - **event**: key events and modifier flags consumed by the sender
//!   submit policy.
//! - **frame**: a once-per-frame coalescing scheduler standing in for
//!   `requestAnimationFrame`.
//! - **logging**: optional `tracing-subscriber` bootstrap for hosts.

pub mod event;
pub mod frame;
pub mod length;
pub mod logging;

pub use event::{KeyCode, KeyEvent, Modifiers};
pub use frame::{FrameScheduler, FrameTicket, ScheduleOutcome};
pub use length::{CssLength, LengthParseError, LengthUnit, REM_PX, resolve_width};
