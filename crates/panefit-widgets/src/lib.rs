#![forbid(unsafe_code)]

//! Message sender behavior.
//!
//! # Role in panefit
//! `panefit-widgets` is the headless half of a chat input: it decides
//! whether the send button is enabled and why not, where attach requests
//! go, when Enter submits, and whether the input row is a pill or a
//! block. Rendering stays with the host.
//!
//! # Modules
//! - [`sender`]: [`SenderPolicy`] rules and [`SenderCallbacks`] dispatch.
//! - [`responsive_sender`]: [`ResponsiveSender`], which joins those rules to
//!   a [`ResponsiveAutosizer`](panefit_text::ResponsiveAutosizer).

pub mod responsive_sender;
pub mod sender;

pub use responsive_sender::{
    ActionState, ButtonAlignment, InputRowLayout, ResponsiveSender, SenderLayout, TextInput,
};
pub use sender::{
    AttachContext, AttachRoute, SenderCallbacks, SenderContext, SenderPolicy, SubmitContext,
    SubmitOutcome, SubmitReason, default_can_send,
};
