//! Eviction policies (replacers) for the free-frame allocator.
//!
//! Two policies are implemented:
//! - [`fifo::FifoPolicy`] - evicts resident frames in arrival order.
//! - [`clock::ClockPolicy`] - second-chance/CLOCK, a cheap LRU approximation.
//!
//! Both are driven through the same hand-dispatched [`Policy`] enum rather
//! than a trait object: the set of policies is small and fixed, and a sum
//! type lets the compiler check exhaustiveness instead of relying on dynamic
//! dispatch for two variants.

mod clock;
mod fifo;

pub use clock::ClockPolicy;
pub use fifo::FifoPolicy;

use crate::common::FrameId;

/// Name of the environment variable consulted by [`Policy::from_env`].
pub const EVICT_ALG_ENV: &str = "EVICT_ALG";

/// Selects which eviction policy a [`crate::manager::MemoryManager`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Fifo,
    Clock,
}

impl PolicyKind {
    /// Read `EVICT_ALG` from the environment: the literal value `"FIFO"`
    /// selects [`PolicyKind::Fifo`], anything else (including unset)
    /// defaults to [`PolicyKind::Clock`].
    pub fn from_env() -> Self {
        match std::env::var(EVICT_ALG_ENV) {
            Ok(val) if val == "FIFO" => PolicyKind::Fifo,
            _ => PolicyKind::Clock,
        }
    }
}

/// The active eviction policy, dispatched by hand over its two variants.
#[derive(Debug)]
pub enum Policy {
    Fifo(FifoPolicy),
    Clock(ClockPolicy),
}

impl Policy {
    /// Construct the policy named by `kind`, sized for `pool_size` frames.
    pub fn new(kind: PolicyKind, pool_size: usize) -> Self {
        match kind {
            PolicyKind::Fifo => Policy::Fifo(FifoPolicy::new(pool_size)),
            PolicyKind::Clock => Policy::Clock(ClockPolicy::new(pool_size)),
        }
    }

    /// Called exactly once when a frame is first bound to a resident page
    /// (either from the free list or right after an eviction). Always
    /// clears any stale reference state the frame carried from a previous
    /// occupant.
    pub fn on_load(&mut self, frame_id: FrameId) {
        match self {
            Policy::Fifo(p) => p.on_load(frame_id),
            Policy::Clock(p) => p.on_load(frame_id),
        }
    }

    /// Called when a resident frame is touched again (a cache hit). For
    /// FIFO this is a no-op; for CLOCK it sets the reference bit.
    pub fn on_access(&mut self, frame_id: FrameId) {
        match self {
            Policy::Fifo(p) => p.on_access(frame_id),
            Policy::Clock(p) => p.on_access(frame_id),
        }
    }

    /// Remove a frame from the policy's bookkeeping, e.g. because its page
    /// was released. The frame must not be considered again until the next
    /// `on_load`.
    pub fn on_free(&mut self, frame_id: FrameId) {
        match self {
            Policy::Fifo(p) => p.on_free(frame_id),
            Policy::Clock(p) => p.on_free(frame_id),
        }
    }

    /// Select and remove a victim among the frames currently resident.
    /// Returns `None` if nothing is tracked (pool empty or brand new).
    pub fn evict(&mut self) -> Option<FrameId> {
        match self {
            Policy::Fifo(p) => p.evict(),
            Policy::Clock(p) => p.evict(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_kind_from_env_default_clock() {
        std::env::remove_var(EVICT_ALG_ENV);
        assert_eq!(PolicyKind::from_env(), PolicyKind::Clock);
    }

    #[test]
    fn test_policy_kind_from_env_fifo() {
        std::env::set_var(EVICT_ALG_ENV, "FIFO");
        assert_eq!(PolicyKind::from_env(), PolicyKind::Fifo);
        std::env::remove_var(EVICT_ALG_ENV);
    }

    #[test]
    fn test_policy_kind_from_env_unknown_defaults_clock() {
        std::env::set_var(EVICT_ALG_ENV, "LRU");
        assert_eq!(PolicyKind::from_env(), PolicyKind::Clock);
        std::env::remove_var(EVICT_ALG_ENV);
    }
}
