//! Deferred next-frame actions.
//!
//! Some interactions only make sense once the new state is on screen: a
//! dropdown that just opened wants its selected option scrolled into view, a
//! time panel wants the chosen slot near the top. Components ask for this with
//! [`Command::next_frame`](crate::Command::next_frame); the runtime keeps the
//! request in a [`FrameQueue`] and delivers the message after the next draw.
//!
//! Requests are keyed by [`FrameId`]. Each component instance allocates its
//! own id once, so scheduling twice before a draw keeps only the latest
//! request, and closing or unmounting can cancel it.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a deferred frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

impl FrameId {
    /// Allocate a process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        FrameId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Pending next-frame messages, in scheduling order.
///
/// After a draw the runtime calls [`FrameQueue::begin_frame`] and pulls the
/// due messages one at a time with [`FrameQueue::pop_due`]. A request
/// cancelled while earlier ones are being delivered is never delivered, and
/// requests scheduled during delivery wait for the following frame.
pub struct FrameQueue<Msg> {
    pending: Vec<(FrameId, Msg)>,
    due: VecDeque<(FrameId, Msg)>,
}

impl<Msg> FrameQueue<Msg> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            due: VecDeque::new(),
        }
    }

    /// Queue `msg` for the next frame, replacing an earlier request with the same id.
    pub fn schedule(&mut self, id: FrameId, msg: Msg) {
        if let Some(slot) = self.pending.iter_mut().find(|(pending, _)| *pending == id) {
            slot.1 = msg;
        } else {
            self.pending.push((id, msg));
        }
        tracing::trace!(?id, pending = self.pending.len(), "frame scheduled");
    }

    /// Drop the request with this id. Returns whether one was pending.
    pub fn cancel(&mut self, id: FrameId) -> bool {
        let before = self.pending.len() + self.due.len();
        self.pending.retain(|(pending, _)| *pending != id);
        self.due.retain(|(due, _)| *due != id);
        let cancelled = self.pending.len() + self.due.len() != before;
        if cancelled {
            tracing::trace!(?id, "frame cancelled");
        }
        cancelled
    }

    /// Mark everything scheduled so far as due. Called once per drawn frame.
    pub fn begin_frame(&mut self) {
        self.due.extend(self.pending.drain(..));
    }

    /// Next due message that has not been cancelled.
    pub fn pop_due(&mut self) -> Option<Msg> {
        self.due.pop_front().map(|(_, msg)| msg)
    }

    /// Remove and return every pending message at once.
    pub fn take(&mut self) -> Vec<Msg> {
        self.begin_frame();
        self.due.drain(..).map(|(_, msg)| msg).collect()
    }

    pub fn is_pending(&self, id: FrameId) -> bool {
        self.pending
            .iter()
            .chain(self.due.iter())
            .any(|(pending, _)| *pending == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len() + self.due.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.due.is_empty()
    }
}

impl<Msg> Default for FrameQueue<Msg> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(FrameId::next(), FrameId::next());
    }

    #[test]
    fn take_returns_in_schedule_order() {
        let mut queue = FrameQueue::new();
        queue.schedule(FrameId::next(), "a");
        queue.schedule(FrameId::next(), "b");
        assert_eq!(queue.take(), vec!["a", "b"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn rescheduling_replaces_pending_request() {
        let mut queue = FrameQueue::new();
        let id = FrameId::next();
        queue.schedule(id, 1);
        queue.schedule(id, 2);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.take(), vec![2]);
    }

    #[test]
    fn cancel_during_delivery_skips_due_request() {
        let mut queue = FrameQueue::new();
        let first = FrameId::next();
        let second = FrameId::next();
        queue.schedule(first, "close");
        queue.schedule(second, "scroll");
        queue.begin_frame();

        assert_eq!(queue.pop_due(), Some("close"));
        // delivering "close" cancels the scroll and schedules a new request
        assert!(queue.cancel(second));
        queue.schedule(first, "again");
        assert_eq!(queue.pop_due(), None);
        assert!(queue.is_pending(first));

        queue.begin_frame();
        assert_eq!(queue.pop_due(), Some("again"));
        assert!(queue.is_empty());
    }

    #[test]
    fn cancel_removes_only_that_id() {
        let mut queue = FrameQueue::new();
        let keep = FrameId::next();
        let gone = FrameId::next();
        queue.schedule(keep, "keep");
        queue.schedule(gone, "gone");

        assert!(queue.cancel(gone));
        assert!(!queue.cancel(gone));
        assert!(queue.is_pending(keep));
        assert_eq!(queue.take(), vec!["keep"]);
    }
}
