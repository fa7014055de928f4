#![forbid(unsafe_code)]

//! Container resize notifications.
//!
//! A view layer owns one [`ResizeHub`] per observed container and calls
//! [`ResizeHub::emit`] from its resize observer. Interested parties
//! subscribe with a closure and receive a [`ResizeSubscription`]; dropping
//! the subscription unregisters the closure, so registration and teardown
//! are always paired.
//!
//! Only the latest width matters. Listeners are called synchronously in
//! subscription order and nothing is queued.
//!
//! # Re-entrancy
//!
//! Listeners may drop subscriptions (including their own) or subscribe new
//! listeners while an emit is running. Removals take effect immediately;
//! new listeners first hear the next emit.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

type Listener = Box<dyn FnMut(f64)>;

#[derive(Default)]
struct Registry {
    listeners: FxHashMap<u64, Listener>,
    next_id: u64,
    emit_depth: u32,
    removed_while_emitting: Vec<u64>,
    last_width: Option<f64>,
}

/// Fan-out point for container width changes.
#[derive(Clone, Default)]
pub struct ResizeHub {
    inner: Rc<RefCell<Registry>>,
}

impl ResizeHub {
    /// Create a hub with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until the returned
    /// subscription is dropped.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(&self, listener: impl FnMut(f64) + 'static) -> ResizeSubscription {
        let mut reg = self.inner.borrow_mut();
        reg.next_id += 1;
        let id = reg.next_id;
        reg.listeners.insert(id, Box::new(listener));
        tracing::trace!(listener = id, "resize listener registered");
        ResizeSubscription {
            registry: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Deliver a new container width to every listener.
    pub fn emit(&self, width_px: f64) {
        let mut taken = {
            let mut reg = self.inner.borrow_mut();
            reg.last_width = Some(width_px);
            reg.emit_depth += 1;
            std::mem::take(&mut reg.listeners)
        };

        let mut ids: Vec<u64> = taken.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            if self.inner.borrow().removed_while_emitting.contains(&id) {
                continue;
            }
            if let Some(listener) = taken.get_mut(&id) {
                listener(width_px);
            }
        }

        let mut reg = self.inner.borrow_mut();
        reg.emit_depth -= 1;
        let removed = if reg.emit_depth == 0 {
            std::mem::take(&mut reg.removed_while_emitting)
        } else {
            reg.removed_while_emitting.clone()
        };
        for (id, listener) in taken {
            if !removed.contains(&id) {
                reg.listeners.insert(id, listener);
            }
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Whether no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width passed to the most recent emit.
    #[must_use]
    pub fn last_width(&self) -> Option<f64> {
        self.inner.borrow().last_width
    }
}

impl fmt::Debug for ResizeHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = self.inner.borrow();
        f.debug_struct("ResizeHub")
            .field("listeners", &reg.listeners.len())
            .field("last_width", &reg.last_width)
            .finish()
    }
}

/// Registration guard returned by [`ResizeHub::subscribe`].
pub struct ResizeSubscription {
    registry: Weak<RefCell<Registry>>,
    id: u64,
}

impl ResizeSubscription {
    /// Unregister now. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {}

    /// Whether the hub that issued this subscription is still alive.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.registry.strong_count() > 0
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let Ok(mut reg) = registry.try_borrow_mut() else {
            tracing::warn!(listener = self.id, "resize registry busy; listener leaked");
            return;
        };
        if reg.listeners.remove(&self.id).is_none() && reg.emit_depth > 0 {
            reg.removed_while_emitting.push(self.id);
        }
        tracing::trace!(listener = self.id, "resize listener removed");
    }
}

impl fmt::Debug for ResizeSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeSubscription")
            .field("id", &self.id)
            .field("live", &self.is_live())
            .finish()
    }
}
