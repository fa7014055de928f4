#![forbid(unsafe_code)]

//! Send and attach rules for a message sender.
//!
//! The sender's buttons are enabled from a [`SenderContext`] snapshot:
//! the draft text, the attachments, and the host's `send_disabled` /
//! `generating` flags.
//!
//! # Send gating
//!
//! By default a message can be sent when its trimmed text is non-empty and
//! the host is neither disabled nor generating. A custom predicate replaces
//! that rule. When sending is not allowed, the reason is, in order:
//!
//! 1. whatever a custom reason function returns;
//! 2. [`SubmitReason::Invalid`] when a custom predicate is in use;
//! 3. `Generating`, then `Disabled`, then `Empty`, then `Unknown`.
//!
//! # Attach routing
//!
//! An attach request goes to the limit handler when the attachment limit is
//! reached, else to the context-aware request handler if one is set, else
//! to the plain attach handler.
//!
//! # Submit on Enter
//!
//! Only a plain Enter submits: no Shift / Alt / Ctrl / Super, no IME
//! composition in progress, and not already handled by an earlier handler.

use std::fmt;

use panefit_core::event::{KeyCode, KeyEvent};
use serde::{Deserialize, Serialize};

/// Why a send is not allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitReason {
    Empty,
    Disabled,
    Generating,
    Invalid,
    Unknown,
}

impl fmt::Display for SubmitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "empty",
            Self::Disabled => "disabled",
            Self::Generating => "generating",
            Self::Invalid => "invalid",
            Self::Unknown => "unknown",
        })
    }
}

/// What the send rules look at.
#[derive(Debug)]
pub struct SenderContext<'a, A> {
    pub value: &'a str,
    pub attachments: &'a [A],
    pub send_disabled: bool,
    pub generating: bool,
}

impl<A> Clone for SenderContext<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for SenderContext<'_, A> {}

/// Reported on every submit attempt, sendable or not.
#[derive(Debug)]
pub struct SubmitContext<'a, A> {
    pub sender: SenderContext<'a, A>,
    pub can_send: bool,
    /// Set exactly when `can_send` is false.
    pub reason: Option<SubmitReason>,
}

/// Handed to attach handlers.
#[derive(Debug)]
pub struct AttachContext<'a, A> {
    pub attachments: &'a [A],
    pub attachments_count: usize,
    pub max_attachments: Option<usize>,
    pub accept: Option<&'a str>,
    pub size_limit: Option<u64>,
}

/// Where an attach request went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachRoute {
    /// The limit was reached.
    LimitExceeded,
    /// Delivered to the context-aware request handler.
    Request,
    /// Delivered to the plain attach handler (or dropped if there is none).
    Legacy,
}

/// Result of [`SenderCallbacks::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub sent: bool,
    pub reason: Option<SubmitReason>,
}

type CanSendFn<A> = Box<dyn Fn(&SenderContext<'_, A>) -> bool>;
type ReasonFn<A> = Box<dyn Fn(&SenderContext<'_, A>) -> Option<SubmitReason>>;

/// Send, attach, and submit-key rules.
pub struct SenderPolicy<A> {
    can_send: Option<CanSendFn<A>>,
    disabled_reason: Option<ReasonFn<A>>,
    max_attachments: Option<usize>,
    accept: Option<String>,
    size_limit: Option<u64>,
    submit_on_enter: bool,
}

impl<A> Default for SenderPolicy<A> {
    fn default() -> Self {
        Self {
            can_send: None,
            disabled_reason: None,
            max_attachments: None,
            accept: None,
            size_limit: None,
            submit_on_enter: false,
        }
    }
}

impl<A> SenderPolicy<A> {
    /// Default rules: no attachment limit, Enter does not submit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default send rule.
    #[must_use]
    pub fn with_can_send(
        mut self,
        predicate: impl Fn(&SenderContext<'_, A>) -> bool + 'static,
    ) -> Self {
        self.can_send = Some(Box::new(predicate));
        self
    }

    /// Custom reason for a disabled send. Returning `None` falls back to
    /// the built-in reasons.
    #[must_use]
    pub fn with_disabled_reason(
        mut self,
        reason: impl Fn(&SenderContext<'_, A>) -> Option<SubmitReason> + 'static,
    ) -> Self {
        self.disabled_reason = Some(Box::new(reason));
        self
    }

    #[must_use]
    pub fn with_max_attachments(mut self, max: usize) -> Self {
        self.max_attachments = Some(max);
        self
    }

    /// Accepted file types, passed through to attach handlers.
    #[must_use]
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Per-file size limit in bytes, passed through to attach handlers.
    #[must_use]
    pub fn with_size_limit(mut self, bytes: u64) -> Self {
        self.size_limit = Some(bytes);
        self
    }

    #[must_use]
    pub fn with_submit_on_enter(mut self, enabled: bool) -> Self {
        self.submit_on_enter = enabled;
        self
    }

    #[must_use]
    pub fn max_attachments(&self) -> Option<usize> {
        self.max_attachments
    }

    #[must_use]
    pub fn submit_on_enter(&self) -> bool {
        self.submit_on_enter
    }

    /// Whether `ctx` may be sent.
    #[must_use]
    pub fn can_send(&self, ctx: &SenderContext<'_, A>) -> bool {
        match &self.can_send {
            Some(predicate) => predicate(ctx),
            None => default_can_send(ctx),
        }
    }

    /// Why `ctx` may not be sent; `None` when it may.
    #[must_use]
    pub fn send_disabled_reason(&self, ctx: &SenderContext<'_, A>) -> Option<SubmitReason> {
        if self.can_send(ctx) {
            return None;
        }
        self.disabled_reason
            .as_ref()
            .and_then(|reason| reason(ctx))
            .or_else(|| Some(self.builtin_reason(ctx)))
    }

    fn builtin_reason(&self, ctx: &SenderContext<'_, A>) -> SubmitReason {
        if self.can_send.is_some() {
            SubmitReason::Invalid
        } else if ctx.generating {
            SubmitReason::Generating
        } else if ctx.send_disabled {
            SubmitReason::Disabled
        } else if ctx.value.trim().is_empty() {
            SubmitReason::Empty
        } else {
            SubmitReason::Unknown
        }
    }

    /// Snapshot passed to submit handlers.
    #[must_use]
    pub fn submit_context<'a>(&self, ctx: SenderContext<'a, A>) -> SubmitContext<'a, A> {
        SubmitContext {
            sender: ctx,
            can_send: self.can_send(&ctx),
            reason: self.send_disabled_reason(&ctx),
        }
    }

    /// Whether another attachment is allowed.
    #[must_use]
    pub fn can_attach(&self, attachments_count: usize) -> bool {
        self.max_attachments
            .is_none_or(|max| attachments_count < max)
    }

    /// Snapshot passed to attach handlers.
    #[must_use]
    pub fn attach_context<'a>(&'a self, attachments: &'a [A]) -> AttachContext<'a, A> {
        AttachContext {
            attachments,
            attachments_count: attachments.len(),
            max_attachments: self.max_attachments,
            accept: self.accept.as_deref(),
            size_limit: self.size_limit,
        }
    }

    /// Whether `key` should submit the message.
    #[must_use]
    pub fn should_submit_on_key(&self, key: &KeyEvent) -> bool {
        self.submit_on_enter
            && !key.handled
            && key.code == KeyCode::Enter
            && !key.has_modifiers()
            && !key.composing
    }
}

impl<A> fmt::Debug for SenderPolicy<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderPolicy")
            .field("custom_can_send", &self.can_send.is_some())
            .field("custom_reason", &self.disabled_reason.is_some())
            .field("max_attachments", &self.max_attachments)
            .field("accept", &self.accept)
            .field("size_limit", &self.size_limit)
            .field("submit_on_enter", &self.submit_on_enter)
            .finish()
    }
}

/// Built-in send rule: trimmed text present, not disabled, not generating.
#[must_use]
pub fn default_can_send<A>(ctx: &SenderContext<'_, A>) -> bool {
    !ctx.value.trim().is_empty() && !ctx.send_disabled && !ctx.generating
}

type SendFn = Box<dyn FnMut()>;
type SubmitFn<A> = Box<dyn FnMut(&SubmitContext<'_, A>)>;
type AttachFn<A> = Box<dyn FnMut(&AttachContext<'_, A>)>;
type KeyFn = Box<dyn FnMut(&mut KeyEvent)>;

/// Optional host handlers, dispatched according to a [`SenderPolicy`].
pub struct SenderCallbacks<A> {
    on_send: Option<SendFn>,
    on_submit: Option<SubmitFn<A>>,
    on_attach: Option<SendFn>,
    on_attach_request: Option<AttachFn<A>>,
    on_attach_limit_exceed: Option<AttachFn<A>>,
    on_key_down: Option<KeyFn>,
}

impl<A> Default for SenderCallbacks<A> {
    fn default() -> Self {
        Self {
            on_send: None,
            on_submit: None,
            on_attach: None,
            on_attach_request: None,
            on_attach_limit_exceed: None,
            on_key_down: None,
        }
    }
}

impl<A> SenderCallbacks<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fired when a submit is allowed.
    #[must_use]
    pub fn on_send(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_send = Some(Box::new(f));
        self
    }

    /// Fired on every submit attempt.
    #[must_use]
    pub fn on_submit(mut self, f: impl FnMut(&SubmitContext<'_, A>) + 'static) -> Self {
        self.on_submit = Some(Box::new(f));
        self
    }

    /// Plain attach handler, used when no request handler is set.
    #[must_use]
    pub fn on_attach(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_attach = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_attach_request(mut self, f: impl FnMut(&AttachContext<'_, A>) + 'static) -> Self {
        self.on_attach_request = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_attach_limit_exceed(
        mut self,
        f: impl FnMut(&AttachContext<'_, A>) + 'static,
    ) -> Self {
        self.on_attach_limit_exceed = Some(Box::new(f));
        self
    }

    /// Runs before the submit-on-Enter check; may mark the event handled.
    #[must_use]
    pub fn on_key_down(mut self, f: impl FnMut(&mut KeyEvent) + 'static) -> Self {
        self.on_key_down = Some(Box::new(f));
        self
    }

    /// Report the attempt, then send if allowed.
    pub fn submit(&mut self, policy: &SenderPolicy<A>, ctx: SenderContext<'_, A>) -> SubmitOutcome {
        let submit = policy.submit_context(ctx);
        if let Some(on_submit) = self.on_submit.as_mut() {
            on_submit(&submit);
        }
        if submit.can_send {
            if let Some(on_send) = self.on_send.as_mut() {
                on_send();
            }
        } else {
            tracing::debug!(reason = ?submit.reason, "submit blocked");
        }
        SubmitOutcome {
            sent: submit.can_send,
            reason: submit.reason,
        }
    }

    /// Route an attach request.
    pub fn request_attach(&mut self, policy: &SenderPolicy<A>, attachments: &[A]) -> AttachRoute {
        let ctx = policy.attach_context(attachments);
        if !policy.can_attach(ctx.attachments_count) {
            if let Some(on_limit) = self.on_attach_limit_exceed.as_mut() {
                on_limit(&ctx);
            }
            return AttachRoute::LimitExceeded;
        }
        if let Some(on_request) = self.on_attach_request.as_mut() {
            on_request(&ctx);
            return AttachRoute::Request;
        }
        if let Some(on_attach) = self.on_attach.as_mut() {
            on_attach();
        }
        AttachRoute::Legacy
    }

    /// Key handling for the input. Returns the submit outcome when the key
    /// submitted; the event is then marked handled.
    pub fn key_down(
        &mut self,
        policy: &SenderPolicy<A>,
        key: &mut KeyEvent,
        ctx: SenderContext<'_, A>,
    ) -> Option<SubmitOutcome> {
        if let Some(on_key_down) = self.on_key_down.as_mut() {
            on_key_down(key);
        }
        if !policy.should_submit_on_key(key) {
            return None;
        }
        key.mark_handled();
        Some(self.submit(policy, ctx))
    }
}

impl<A> fmt::Debug for SenderCallbacks<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderCallbacks")
            .field("on_send", &self.on_send.is_some())
            .field("on_submit", &self.on_submit.is_some())
            .field("on_attach", &self.on_attach.is_some())
            .field("on_attach_request", &self.on_attach_request.is_some())
            .field("on_attach_limit_exceed", &self.on_attach_limit_exceed.is_some())
            .field("on_key_down", &self.on_key_down.is_some())
            .finish()
    }
}
