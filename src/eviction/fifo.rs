//! FIFO (First-In-First-Out) eviction policy.
//!
//! Evicts resident frames in the order they were first bound. Re-accessing
//! a resident frame does not move it — this is what distinguishes it from
//! LRU, and it is the discipline the reference FIFO implementation is
//! specified to have.

use std::collections::VecDeque;

use crate::common::FrameId;

/// FIFO eviction policy: evicts the oldest currently-resident frame.
#[derive(Debug)]
pub struct FifoPolicy {
    /// Frame ids in binding order (front = oldest).
    order: VecDeque<FrameId>,
}

impl FifoPolicy {
    pub fn new(pool_size: usize) -> Self {
        Self {
            order: VecDeque::with_capacity(pool_size),
        }
    }

    pub fn on_load(&mut self, frame_id: FrameId) {
        self.order.push_back(frame_id);
    }

    /// No-op: a FIFO policy's victim order is fixed at load time.
    pub fn on_access(&mut self, _frame_id: FrameId) {}

    pub fn on_free(&mut self, frame_id: FrameId) {
        self.order.retain(|&f| f != frame_id);
    }

    /// Evict the oldest resident frame, or `None` if nothing is tracked.
    pub fn evict(&mut self) -> Option<FrameId> {
        self.order.pop_front()
    }
}
