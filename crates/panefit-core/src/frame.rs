#![forbid(unsafe_code)]

//! Once-per-frame deferred work.
//!
//! Hosts that measure layout from input handlers must not touch element
//! styles while the keystroke is still being processed. Instead they ask
//! for a frame and do the work when the next animation-frame tick fires.
//!
//! [`FrameScheduler`] keeps at most one pending frame. Requests that land
//! while a frame is already pending are coalesced into it: their reasons
//! are OR-ed together and the request counter is bumped, but no second
//! callback is queued.
//!
//! # Usage
//!
//! ```
//! use panefit_core::frame::{FrameScheduler, ScheduleOutcome};
//!
//! let mut frames: FrameScheduler<u8> = FrameScheduler::new();
//! assert_eq!(frames.request(0b01), ScheduleOutcome::Scheduled);
//! assert_eq!(frames.request(0b10), ScheduleOutcome::Coalesced);
//!
//! // Host animation-frame tick:
//! let ticket = frames.take().unwrap();
//! assert_eq!(ticket.reasons, 0b11);
//! assert_eq!(ticket.requests, 2);
//! assert!(frames.take().is_none());
//! ```
//!
//! # Cancellation
//!
//! There is no cancellation token. [`FrameScheduler::cancel`] drops the
//! pending frame, and callers that may outlive their target (an unmounted
//! element) re-check the target when the ticket is taken.

use std::ops::BitOr;

use web_time::{Duration, Instant};

/// Result of [`FrameScheduler::request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// A new frame was queued; the host should arm its frame callback.
    Scheduled,
    /// Merged into an already pending frame.
    Coalesced,
}

/// A frame handed to the host when its tick fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTicket<R> {
    /// Union of every reason requested since the frame was scheduled.
    pub reasons: R,
    /// Number of requests folded into this frame.
    pub requests: u32,
    /// Time between the first request and the tick.
    pub waited: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Pending<R> {
    reasons: R,
    requests: u32,
    since: Instant,
}

/// Coalesces deferred work into a single pending frame.
///
/// Not thread-safe; owned by the single UI thread that drives it.
#[derive(Debug, Clone)]
pub struct FrameScheduler<R> {
    pending: Option<Pending<R>>,
    frames_run: u64,
    coalesced: u64,
}

impl<R> Default for FrameScheduler<R> {
    fn default() -> Self {
        Self {
            pending: None,
            frames_run: 0,
            coalesced: 0,
        }
    }
}

impl<R: Copy + BitOr<Output = R>> FrameScheduler<R> {
    /// Create an idle scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a frame for `reason`.
    pub fn request(&mut self, reason: R) -> ScheduleOutcome {
        match self.pending.as_mut() {
            Some(pending) => {
                pending.reasons = pending.reasons | reason;
                pending.requests = pending.requests.saturating_add(1);
                self.coalesced = self.coalesced.saturating_add(1);
                ScheduleOutcome::Coalesced
            }
            None => {
                self.pending = Some(Pending {
                    reasons: reason,
                    requests: 1,
                    since: Instant::now(),
                });
                ScheduleOutcome::Scheduled
            }
        }
    }

    /// Consume the pending frame, if any. Call from the host's frame tick.
    pub fn take(&mut self) -> Option<FrameTicket<R>> {
        let pending = self.pending.take()?;
        self.frames_run = self.frames_run.saturating_add(1);
        Some(FrameTicket {
            reasons: pending.reasons,
            requests: pending.requests,
            waited: pending.since.elapsed(),
        })
    }

    /// Drop the pending frame. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Whether a frame is queued.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Reasons accumulated for the pending frame.
    #[must_use]
    pub fn pending_reasons(&self) -> Option<R> {
        self.pending.map(|p| p.reasons)
    }

    /// Frames handed out via [`take`](Self::take).
    #[must_use]
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// Requests merged into an already pending frame.
    #[must_use]
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_scheduler_has_nothing_to_take() {
        let mut frames: FrameScheduler<u8> = FrameScheduler::new();
        assert!(!frames.is_pending());
        assert!(frames.take().is_none());
        assert_eq!(frames.frames_run(), 0);
    }

    #[test]
    fn requests_within_a_frame_coalesce() {
        let mut frames: FrameScheduler<u8> = FrameScheduler::new();
        assert_eq!(frames.request(1), ScheduleOutcome::Scheduled);
        assert_eq!(frames.request(1), ScheduleOutcome::Coalesced);
        assert_eq!(frames.request(4), ScheduleOutcome::Coalesced);
        assert_eq!(frames.pending_reasons(), Some(5));
        assert_eq!(frames.coalesced(), 2);

        let ticket = frames.take().unwrap();
        assert_eq!(ticket.reasons, 5);
        assert_eq!(ticket.requests, 3);
        assert_eq!(frames.frames_run(), 1);
    }

    #[test]
    fn next_request_after_take_schedules_again() {
        let mut frames: FrameScheduler<u8> = FrameScheduler::new();
        frames.request(1);
        frames.take();
        assert_eq!(frames.request(2), ScheduleOutcome::Scheduled);
        assert_eq!(frames.take().unwrap().reasons, 2);
    }

    #[test]
    fn cancel_drops_pending_frame() {
        let mut frames: FrameScheduler<u8> = FrameScheduler::new();
        assert!(!frames.cancel());
        frames.request(1);
        assert!(frames.cancel());
        assert!(frames.take().is_none());
        assert_eq!(frames.frames_run(), 0);
    }
}
