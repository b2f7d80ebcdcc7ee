//! Single-slot, newest-wins hand-off between a hand-source thread and the
//! main loop.
//!
//! Sources call [`FrameMailbox::publish`] whenever a detection completes; the
//! main loop calls [`FrameMailbox::take_latest`] once per iteration.  Frames
//! never queue: a publish overwrites whatever has not been taken yet, and a
//! frame older than the one already taken is never handed out.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::landmark::Landmark;

/// One batch of hands from the vision model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    /// Assigned by the mailbox; strictly increasing per mailbox.
    #[serde(default)]
    pub seq:   u64,
    pub hands: Vec<Vec<Landmark>>,
}

impl HandFrame {
    pub fn new(hands: Vec<Vec<Landmark>>) -> Self {
        HandFrame { seq: 0, hands }
    }
}

#[derive(Debug, Default)]
struct Slot {
    pending:    Option<HandFrame>,
    next_seq:   u64,
    taken_seq:  u64,
    closed:     bool,
}

/// Cloneable handle; every clone refers to the same slot.
#[derive(Clone, Debug, Default)]
pub struct FrameMailbox {
    inner: Arc<Mutex<Slot>>,
}

impl FrameMailbox {
    pub fn new() -> Self {
        FrameMailbox::default()
    }

    /// Stamp `frame` with the next sequence number and make it the pending
    /// frame.  Returns the sequence number, or `None` once the mailbox is
    /// closed.
    pub fn publish(&self, mut frame: HandFrame) -> Option<u64> {
        let mut slot = self.inner.lock();
        if slot.closed {
            return None;
        }
        slot.next_seq += 1;
        frame.seq = slot.next_seq;
        let seq = frame.seq;
        slot.pending = Some(frame);
        Some(seq)
    }

    /// Publish a frame whose sequence number was assigned elsewhere (e.g. a
    /// recorded stream).  Frames not newer than the pending or already-taken
    /// frame are dropped; returns whether the frame was accepted.
    pub fn publish_sequenced(&self, frame: HandFrame) -> bool {
        let mut slot = self.inner.lock();
        if slot.closed {
            return false;
        }
        let newest = slot
            .pending
            .as_ref()
            .map_or(slot.taken_seq, |p| p.seq.max(slot.taken_seq));
        if frame.seq <= newest {
            tracing::trace!(seq = frame.seq, newest, "dropping stale frame");
            return false;
        }
        slot.next_seq = slot.next_seq.max(frame.seq);
        slot.pending = Some(frame);
        true
    }

    /// Take the pending frame if it is newer than the last one taken.
    pub fn take_latest(&self) -> Option<HandFrame> {
        let mut slot = self.inner.lock();
        let frame = slot.pending.take()?;
        if frame.seq <= slot.taken_seq {
            return None;
        }
        slot.taken_seq = frame.seq;
        Some(frame)
    }

    /// Stop accepting frames and drop anything pending.
    pub fn close(&self) {
        let mut slot = self.inner.lock();
        slot.closed = true;
        slot.pending = None;
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
