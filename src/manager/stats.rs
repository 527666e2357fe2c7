//! Memory manager statistics.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counters tracked by the manager across its lifetime.
///
/// `stat_num_access` and `stat_num_miss` are the counters named in the
/// external interface; `evictions` is additional telemetry in the same
/// spirit, tracked the way the teacher's buffer pool tracks it.
#[derive(Debug, Default)]
pub struct ManagerStats {
    pub stat_num_access: AtomicU64,
    pub stat_num_miss: AtomicU64,
    pub evictions: AtomicU64,
}

impl ManagerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_access(&self) {
        self.stat_num_access.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.stat_num_miss.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            stat_num_access: self.stat_num_access.load(Ordering::Relaxed),
            stat_num_miss: self.stat_num_miss.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time, non-atomic copy of [`ManagerStats`] safe to print,
/// compare, or assert against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub stat_num_access: u64,
    pub stat_num_miss: u64,
    pub evictions: u64,
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ access: {}, miss: {}, evictions: {} }}",
            self.stat_num_access, self.stat_num_miss, self.evictions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_start_at_zero() {
        let stats = ManagerStats::new();
        let snap = stats.snapshot();
        assert_eq!(snap.stat_num_access, 0);
        assert_eq!(snap.stat_num_miss, 0);
        assert_eq!(snap.evictions, 0);
    }

    #[test]
    fn test_stats_record_and_snapshot() {
        let stats = ManagerStats::new();
        stats.record_access();
        stats.record_access();
        stats.record_miss();
        stats.record_eviction();

        let snap = stats.snapshot();
        assert_eq!(snap.stat_num_access, 2);
        assert_eq!(snap.stat_num_miss, 1);
        assert_eq!(snap.evictions, 1);
    }
}
