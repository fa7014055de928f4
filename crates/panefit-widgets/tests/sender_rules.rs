//! Property and logging tests for the sender rules.

use std::sync::{Arc, Mutex};

use panefit_core::event::{KeyCode, KeyEvent, Modifiers};
use panefit_widgets::{SenderCallbacks, SenderContext, SenderPolicy, SubmitReason};
use proptest::prelude::*;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

fn ctx<'a>(value: &'a str, send_disabled: bool, generating: bool) -> SenderContext<'a, u8> {
    SenderContext {
        value,
        attachments: &[],
        send_disabled,
        generating,
    }
}

fn modifiers_strategy() -> impl Strategy<Value = Modifiers> {
    (0u8..16).prop_map(Modifiers::from_bits_truncate)
}

proptest! {
    #[test]
    fn reason_present_exactly_when_blocked(
        value in "[ a-z\\t\\n]{0,12}",
        send_disabled in any::<bool>(),
        generating in any::<bool>(),
    ) {
        let policy = SenderPolicy::<u8>::new();
        let c = ctx(&value, send_disabled, generating);
        let can_send = policy.can_send(&c);
        let reason = policy.send_disabled_reason(&c);
        prop_assert_eq!(can_send, reason.is_none());
        prop_assert_eq!(
            can_send,
            !value.trim().is_empty() && !send_disabled && !generating
        );
        prop_assert_ne!(reason, Some(SubmitReason::Unknown));
        prop_assert_ne!(reason, Some(SubmitReason::Invalid));
        if generating {
            prop_assert_eq!(reason, Some(SubmitReason::Generating));
        }
    }

    #[test]
    fn submit_sends_iff_allowed(
        value in "[ a-z]{0,8}",
        send_disabled in any::<bool>(),
        generating in any::<bool>(),
    ) {
        let sends = Arc::new(Mutex::new(0u32));
        let reports = Arc::new(Mutex::new(0u32));
        let (s, r) = (Arc::clone(&sends), Arc::clone(&reports));
        let policy = SenderPolicy::<u8>::new();
        let mut callbacks = SenderCallbacks::new()
            .on_send(move || *s.lock().unwrap() += 1)
            .on_submit(move |_| *r.lock().unwrap() += 1);
        let c = ctx(&value, send_disabled, generating);
        let outcome = callbacks.submit(&policy, c);
        prop_assert_eq!(outcome.sent, policy.can_send(&c));
        prop_assert_eq!(*sends.lock().unwrap(), u32::from(outcome.sent));
        prop_assert_eq!(*reports.lock().unwrap(), 1);
    }

    #[test]
    fn only_plain_enter_submits(
        modifiers in modifiers_strategy(),
        composing in any::<bool>(),
        handled in any::<bool>(),
        enabled in any::<bool>(),
    ) {
        let policy = SenderPolicy::<u8>::new().with_submit_on_enter(enabled);
        let mut key = KeyEvent::new(KeyCode::Enter)
            .with_modifiers(modifiers)
            .composing(composing);
        if handled {
            key.mark_handled();
        }
        let expected = enabled && modifiers.is_empty() && !composing && !handled;
        prop_assert_eq!(policy.should_submit_on_key(&key), expected);
    }

    #[test]
    fn attach_limit_is_exclusive(count in 0usize..10, max in 0usize..10) {
        let policy = SenderPolicy::<u8>::new().with_max_attachments(max);
        prop_assert_eq!(policy.can_attach(count), count < max);
        prop_assert!(SenderPolicy::<u8>::new().can_attach(count));
    }
}

#[derive(Default, Clone)]
struct Messages(Arc<Mutex<Vec<String>>>);

struct MessageVisitor<'a>(&'a mut String);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        use std::fmt::Write;
        let _ = write!(self.0, "{}={:?} ", field.name(), value);
    }
}

impl<S: tracing::Subscriber> Layer<S> for Messages {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut line = String::new();
        event.record(&mut MessageVisitor(&mut line));
        self.0.lock().unwrap().push(line);
    }
}

#[test]
fn blocked_submit_is_logged_with_reason() {
    let messages = Messages::default();
    let subscriber = Registry::default().with(messages.clone());
    tracing::subscriber::with_default(subscriber, || {
        let policy = SenderPolicy::<u8>::new();
        let mut callbacks = SenderCallbacks::new();
        callbacks.submit(&policy, ctx("hello", false, true));
        callbacks.submit(&policy, ctx("hello", false, false));
    });
    let lines = messages.0.lock().unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("submit blocked"));
    assert!(lines[0].contains("Generating"));
}
