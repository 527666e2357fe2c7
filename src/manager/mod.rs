//! The coordinator layer: free-frame allocation, the page table, stats,
//! and the [`MemoryManager`] that ties them together with the eviction
//! policy and swap store.

mod allocator;
mod coordinator;
mod page_table;
mod stats;

pub use coordinator::MemoryManager;
pub use page_table::PageTableEntry;
pub use stats::{ManagerStats, StatsSnapshot};

use crate::common::{Config, Result};
use crate::eviction::PolicyKind;

/// Construct a manager with `frame_count` frames under `policy`, with the
/// swap directory defaulted to the process temp dir. A thin convenience
/// wrapper; [`MemoryManager::new`] with an explicit [`Config`] is the full
/// constructor for callers that need to override the swap directory.
pub fn new_manager(frame_count: usize, policy: PolicyKind) -> Result<MemoryManager> {
    MemoryManager::new(Config::new(frame_count)?.with_policy(policy))
}
