#![forbid(unsafe_code)]

//! A message composer that lays itself out as a pill or a block.
//!
//! [`ResponsiveSender`] ties a [`ResponsiveAutosizer`] to the send rules in
//! [`sender`](crate::sender). While the draft fits on one line the input
//! row is a horizontal pill with the buttons beside the text; once it wraps
//! the row becomes a column and the buttons drop below, aligned to the end.
//!
//! The view layer renders from [`ResponsiveSender::layout`] and
//! [`ResponsiveSender::action_state`] and forwards its events:
//!
//! | View event | Call |
//! |---|---|
//! | text changed | [`input`](ResponsiveSender::input) |
//! | animation frame | [`on_frame`](ResponsiveSender::on_frame) |
//! | textarea resized | [`on_resize`](ResponsiveSender::on_resize) |
//! | key down in the textarea | [`key_down`](ResponsiveSender::key_down) |
//! | send button | [`submit`](ResponsiveSender::submit) |
//! | attach button | [`request_attach`](ResponsiveSender::request_attach) |

use std::fmt;

use panefit_core::event::KeyEvent;
use panefit_core::frame::ScheduleOutcome;
use panefit_text::{
    AutosizeConfig, MeasureSurface, ResponsiveAutosizer, TextMeasurementResult, TextareaStyle,
    VirtualTextarea,
};

use crate::sender::{
    AttachRoute, SenderCallbacks, SenderContext, SenderPolicy, SubmitOutcome, SubmitReason,
};

/// A measurable surface whose text the sender can set.
pub trait TextInput: MeasureSurface {
    fn set_value(&mut self, value: &str);
}

impl TextInput for VirtualTextarea {
    fn set_value(&mut self, value: &str) {
        self.set_text(value);
    }
}

/// Direction of the input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRowLayout {
    /// Text and buttons side by side.
    Row,
    /// Text above, buttons below.
    Column,
}

/// Cross-axis alignment of the button group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAlignment {
    Center,
    End,
}

/// Everything the view needs to lay out the composer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SenderLayout {
    pub row: InputRowLayout,
    pub buttons: ButtonAlignment,
    pub textarea: TextareaStyle,
}

impl SenderLayout {
    /// Layout for an overflow state.
    #[must_use]
    pub fn for_overflow(is_overflow: bool, textarea: TextareaStyle) -> Self {
        if is_overflow {
            Self {
                row: InputRowLayout::Column,
                buttons: ButtonAlignment::End,
                textarea,
            }
        } else {
            Self {
                row: InputRowLayout::Row,
                buttons: ButtonAlignment::Center,
                textarea,
            }
        }
    }
}

/// State for rendering the action buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionState {
    pub can_send: bool,
    pub send_disabled_reason: Option<SubmitReason>,
    pub attachments_count: usize,
    pub max_attachments: Option<usize>,
    pub can_attach: bool,
    pub is_overflow: bool,
}

/// Responsive composer state.
pub struct ResponsiveSender<S, A> {
    autosizer: ResponsiveAutosizer<S>,
    policy: SenderPolicy<A>,
    callbacks: SenderCallbacks<A>,
    value: String,
    attachments: Vec<A>,
    send_disabled: bool,
    generating: bool,
    input_disabled: bool,
}

impl<S: TextInput, A> ResponsiveSender<S, A> {
    #[must_use]
    pub fn new(surface: S, config: AutosizeConfig) -> Self {
        Self {
            autosizer: ResponsiveAutosizer::new(surface, config),
            policy: SenderPolicy::new(),
            callbacks: SenderCallbacks::new(),
            value: String::new(),
            attachments: Vec::new(),
            send_disabled: false,
            generating: false,
            input_disabled: false,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: SenderPolicy<A>) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_callbacks(mut self, callbacks: SenderCallbacks<A>) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Keep the pill layout no matter how long the draft gets.
    #[must_use]
    pub fn with_force_single_line(mut self, force: bool) -> Self {
        self.autosizer.set_force_single_line(force);
        self
    }

    /// Called with the overflow flag after every measurement.
    #[must_use]
    pub fn with_overflow_callback(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.autosizer.set_overflow_callback(callback);
        self
    }

    /// First measurement once the view is laid out.
    pub fn mount(&mut self) -> TextMeasurementResult {
        self.autosizer.mount()
    }

    /// The draft changed.
    pub fn input(&mut self, value: impl Into<String>) -> ScheduleOutcome {
        self.value = value.into();
        self.autosizer.surface_mut().set_value(&self.value);
        self.autosizer.on_input()
    }

    pub fn on_frame(&mut self) -> Option<TextMeasurementResult> {
        self.autosizer.on_frame()
    }

    pub fn on_resize(&mut self) -> TextMeasurementResult {
        self.autosizer.on_resize()
    }

    /// Cancel deferred work before the view goes away.
    pub fn unmount(&mut self) {
        self.autosizer.unmount();
    }

    /// Key pressed in the textarea. Returns the submit outcome when the key
    /// submitted the draft.
    pub fn key_down(&mut self, key: &mut KeyEvent) -> Option<SubmitOutcome> {
        if self.input_disabled {
            return None;
        }
        let ctx = SenderContext {
            value: &self.value,
            attachments: &self.attachments,
            send_disabled: self.send_disabled,
            generating: self.generating,
        };
        self.callbacks.key_down(&self.policy, key, ctx)
    }

    /// Send button pressed.
    pub fn submit(&mut self) -> SubmitOutcome {
        let ctx = SenderContext {
            value: &self.value,
            attachments: &self.attachments,
            send_disabled: self.send_disabled,
            generating: self.generating,
        };
        self.callbacks.submit(&self.policy, ctx)
    }

    /// Attach button pressed.
    pub fn request_attach(&mut self) -> AttachRoute {
        self.callbacks.request_attach(&self.policy, &self.attachments)
    }

    pub fn push_attachment(&mut self, attachment: A) {
        self.attachments.push(attachment);
    }

    pub fn remove_attachment(&mut self, index: usize) -> Option<A> {
        (index < self.attachments.len()).then(|| self.attachments.remove(index))
    }

    #[must_use]
    pub fn attachments(&self) -> &[A] {
        &self.attachments
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_generating(&mut self, generating: bool) {
        self.generating = generating;
    }

    pub fn set_send_disabled(&mut self, disabled: bool) {
        self.send_disabled = disabled;
    }

    pub fn set_input_disabled(&mut self, disabled: bool) {
        self.input_disabled = disabled;
    }

    #[must_use]
    pub fn is_overflow(&self) -> bool {
        self.autosizer.is_overflow()
    }

    #[must_use]
    pub fn context(&self) -> SenderContext<'_, A> {
        SenderContext {
            value: &self.value,
            attachments: &self.attachments,
            send_disabled: self.send_disabled,
            generating: self.generating,
        }
    }

    #[must_use]
    pub fn can_send(&self) -> bool {
        self.policy.can_send(&self.context())
    }

    #[must_use]
    pub fn send_disabled_reason(&self) -> Option<SubmitReason> {
        self.policy.send_disabled_reason(&self.context())
    }

    #[must_use]
    pub fn can_attach(&self) -> bool {
        self.policy.can_attach(self.attachments.len())
    }

    /// Layout for the current overflow state.
    #[must_use]
    pub fn layout(&self) -> SenderLayout {
        SenderLayout::for_overflow(self.is_overflow(), self.autosizer.textarea_style())
    }

    #[must_use]
    pub fn action_state(&self) -> ActionState {
        let ctx = self.context();
        ActionState {
            can_send: self.policy.can_send(&ctx),
            send_disabled_reason: self.policy.send_disabled_reason(&ctx),
            attachments_count: self.attachments.len(),
            max_attachments: self.policy.max_attachments(),
            can_attach: self.can_attach(),
            is_overflow: self.is_overflow(),
        }
    }

    #[must_use]
    pub fn autosizer(&self) -> &ResponsiveAutosizer<S> {
        &self.autosizer
    }

    pub fn autosizer_mut(&mut self) -> &mut ResponsiveAutosizer<S> {
        &mut self.autosizer
    }
}

impl<S: fmt::Debug, A> fmt::Debug for ResponsiveSender<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponsiveSender")
            .field("autosizer", &self.autosizer)
            .field("policy", &self.policy)
            .field("value_len", &self.value.len())
            .field("attachments", &self.attachments.len())
            .field("send_disabled", &self.send_disabled)
            .field("generating", &self.generating)
            .field("input_disabled", &self.input_disabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panefit_core::event::{KeyCode, Modifiers};
    use panefit_text::{InlineSize, SizeValue};
    use std::cell::Cell;
    use std::rc::Rc;

    type Composer = ResponsiveSender<VirtualTextarea, String>;

    fn composer() -> Composer {
        let textarea = VirtualTextarea::new(10.0, 400.0)
            .with_reserved_px(100.0)
            .with_padding("5px", "5px");
        let mut sender = ResponsiveSender::new(textarea, AutosizeConfig::default());
        sender.mount();
        sender
    }

    fn render(sender: &mut Composer) {
        let style = sender.layout().textarea;
        sender
            .autosizer_mut()
            .surface_mut()
            .set_inline_size(InlineSize {
                width: Some(style.width),
                height: Some(style.height),
            })
            .unwrap();
    }

    fn type_text(sender: &mut Composer, text: &str) {
        sender.input(text);
        sender.on_frame();
        render(sender);
    }

    #[test]
    fn starts_as_pill() {
        let sender = composer();
        let layout = sender.layout();
        assert_eq!(layout.row, InputRowLayout::Row);
        assert_eq!(layout.buttons, ButtonAlignment::Center);
        assert_eq!(layout.textarea.width, SizeValue::Auto);
    }

    #[test]
    fn long_draft_becomes_block_and_back() {
        let mut sender = composer();
        type_text(&mut sender, &"word ".repeat(10));
        let layout = sender.layout();
        assert_eq!(layout.row, InputRowLayout::Column);
        assert_eq!(layout.buttons, ButtonAlignment::End);
        assert_eq!(layout.textarea.height, SizeValue::Px(120.0));

        type_text(&mut sender, "hi");
        sender.on_frame();
        assert_eq!(sender.layout().row, InputRowLayout::Row);
    }

    #[test]
    fn action_state_tracks_flags() {
        let mut sender = composer().with_policy(SenderPolicy::new().with_max_attachments(1));
        let state = sender.action_state();
        assert!(!state.can_send);
        assert_eq!(state.send_disabled_reason, Some(SubmitReason::Empty));
        assert!(state.can_attach);

        sender.input("hello");
        sender.push_attachment("a.png".to_owned());
        let state = sender.action_state();
        assert!(state.can_send);
        assert_eq!(state.send_disabled_reason, None);
        assert!(!state.can_attach);
        assert_eq!(state.attachments_count, 1);

        sender.set_generating(true);
        assert_eq!(sender.send_disabled_reason(), Some(SubmitReason::Generating));
    }

    #[test]
    fn enter_submits_only_when_enabled() {
        let sends = Rc::new(Cell::new(0));
        let sends_in = Rc::clone(&sends);
        let mut sender = composer()
            .with_policy(SenderPolicy::new().with_submit_on_enter(true))
            .with_callbacks(SenderCallbacks::new().on_send(move || sends_in.set(sends_in.get() + 1)));
        sender.input("hello");

        let mut shift_enter = KeyEvent::new(KeyCode::Enter).with_modifiers(Modifiers::SHIFT);
        assert!(sender.key_down(&mut shift_enter).is_none());

        let mut enter = KeyEvent::new(KeyCode::Enter);
        assert_eq!(sender.key_down(&mut enter).map(|o| o.sent), Some(true));
        assert!(enter.handled);

        sender.set_input_disabled(true);
        let mut enter = KeyEvent::new(KeyCode::Enter);
        assert!(sender.key_down(&mut enter).is_none());
        assert_eq!(sends.get(), 1);
    }

    #[test]
    fn attachments_can_be_removed() {
        let mut sender = composer();
        sender.push_attachment("a".to_owned());
        sender.push_attachment("b".to_owned());
        assert_eq!(sender.remove_attachment(0).as_deref(), Some("a"));
        assert_eq!(sender.remove_attachment(5), None);
        assert_eq!(sender.attachments(), ["b".to_owned()]);
    }

    #[test]
    fn forced_single_line_stays_a_pill() {
        let textarea = VirtualTextarea::new(10.0, 400.0).with_reserved_px(100.0);
        let mut sender: Composer =
            ResponsiveSender::new(textarea, AutosizeConfig::default()).with_force_single_line(true);
        sender.mount();
        type_text(&mut sender, &"word ".repeat(20));
        assert_eq!(sender.layout().row, InputRowLayout::Row);
    }
}
