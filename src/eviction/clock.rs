//! Clock (second-chance) eviction policy.
//!
//! A rotating hand sweeps `[0, pool_size)`, clearing reference bits as it
//! passes and stopping on the first frame whose bit is already clear. This
//! mirrors the reference `ClockEvictMgr`: `Load` clears a frame's bit,
//! `Access` sets it, `Free` clears it, `Evict` advances the hand.

use crate::common::FrameId;

/// CLOCK / second-chance eviction policy.
#[derive(Debug)]
pub struct ClockPolicy {
    /// One reference bit per physical frame, indexed by `FrameId::0`.
    reference_bit: Vec<bool>,
    /// Rotating hand, an index into `reference_bit`.
    hand: usize,
    /// Frames currently tracked as resident (bit meaningful iff present).
    resident: Vec<bool>,
}

impl ClockPolicy {
    pub fn new(pool_size: usize) -> Self {
        Self {
            reference_bit: vec![false; pool_size],
            hand: 0,
            resident: vec![false; pool_size],
        }
    }

    pub fn on_load(&mut self, frame_id: FrameId) {
        self.reference_bit[frame_id.0] = false;
        self.resident[frame_id.0] = true;
    }

    pub fn on_access(&mut self, frame_id: FrameId) {
        self.reference_bit[frame_id.0] = true;
    }

    pub fn on_free(&mut self, frame_id: FrameId) {
        self.reference_bit[frame_id.0] = false;
        self.resident[frame_id.0] = false;
    }

    /// Advance the hand, clearing set bits as it passes over resident
    /// frames, until it lands on a resident frame whose bit is already
    /// clear. Returns `None` if no frame is resident.
    pub fn evict(&mut self) -> Option<FrameId> {
        let size = self.reference_bit.len();
        if size == 0 || !self.resident.iter().any(|&r| r) {
            return None;
        }

        loop {
            if self.resident[self.hand] {
                if self.reference_bit[self.hand] {
                    self.reference_bit[self.hand] = false;
                    self.hand = (self.hand + 1) % size;
                } else {
                    let victim = FrameId::new(self.hand);
                    self.hand = (self.hand + 1) % size;
                    return Some(victim);
                }
            } else {
                self.hand = (self.hand + 1) % size;
            }
        }
    }
}
