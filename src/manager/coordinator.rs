//! Memory Manager - the coordinator owning frames, page table, allocator,
//! eviction policy, and swap store.
//!
//! # Thread Safety
//! All mutable state (frames, page table, allocator, policy, owner index)
//! lives behind a single `parking_lot::Mutex`, acquired at the entry of
//! each public operation and held across the entire locate-or-fault path.
//! This is the simplest design that preserves the manager's invariants;
//! `stats` is tracked separately with atomics since it needs no
//! synchronization with the rest of the state.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::common::config::PAGE_SIZE;
use crate::common::error::{Error, Result};
use crate::common::{ArrayId, Config, FrameId, VirtualPageId};
use crate::eviction::Policy;
use crate::manager::allocator::FreeFrameAllocator;
use crate::manager::page_table::{PageTable, PageTableEntry};
use crate::manager::stats::ManagerStats;
use crate::storage::{Frame, SwapStore};
use crate::array_list::ArrayList;

/// All state mutated under the coordinator's single lock.
struct ManagerState {
    frames: Vec<Frame>,
    page_table: PageTable,
    allocator: FreeFrameAllocator,
    policy: Policy,
    /// Reverse index: which `(array_id, vid)` a resident frame holds.
    owner: Vec<Option<(ArrayId, VirtualPageId)>>,
    next_array_id: u64,
}

/// The coordinator: owns the frame pool, page table, allocator, eviction
/// policy, and swap store; exposes `Allocate / Release / Read / Write`.
pub struct MemoryManager {
    state: Mutex<ManagerState>,
    swap: SwapStore,
    stats: ManagerStats,
    pool_size: usize,
    poisoned: AtomicBool,
}

impl MemoryManager {
    /// Construct a manager from `config`.
    ///
    /// # Errors
    /// Returns `Error::InvalidPoolSize` if `config.pool_size()` is 0 (the
    /// same precondition `Config::new` already enforces).
    pub fn new(config: Config) -> Result<Self> {
        let pool_size = config.pool_size();
        if pool_size == 0 {
            return Err(Error::InvalidPoolSize);
        }

        let frames = (0..pool_size).map(|_| Frame::new()).collect();
        let owner = vec![None; pool_size];

        Ok(Self {
            state: Mutex::new(ManagerState {
                frames,
                page_table: PageTable::new(),
                allocator: FreeFrameAllocator::new(pool_size),
                policy: Policy::new(config.policy(), pool_size),
                owner,
                next_array_id: 0,
            }),
            swap: SwapStore::new(config.swap_dir())?,
            stats: ManagerStats::new(),
            pool_size,
            poisoned: AtomicBool::new(false),
        })
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn stats(&self) -> &ManagerStats {
        &self.stats
    }

    fn check_poisoned(&self) -> Result<()> {
        if self.poisoned.load(Ordering::Relaxed) {
            Err(Error::Poisoned)
        } else {
            Ok(())
        }
    }

    /// Run a swap-store operation, poisoning the coordinator if it fails
    /// with an I/O error (per spec, swap I/O failures are unrecoverable).
    fn swap_guarded<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(Error::Io(_)) = &result {
            log::warn!("swap store I/O failure, poisoning memory manager");
            self.poisoned.store(true, Ordering::Relaxed);
        }
        result
    }

    /// `Allocate(size) -> ArrayList`. `size` is an element count.
    pub fn allocate(&self, size_elements: usize) -> Result<ArrayList<'_>> {
        self.check_poisoned()?;

        let page_count = size_elements.div_ceil(PAGE_SIZE).max(1);
        if page_count > self.pool_size {
            return Err(Error::Capacity {
                pool_size: self.pool_size,
            });
        }

        let mut state = self.state.lock();
        let array_id = ArrayId::new(state.next_array_id);
        state.next_array_id += 1;
        state.page_table.allocate_row(array_id, page_count);
        drop(state);

        log::debug!("allocated array {} with {} pages", array_id, page_count);
        Ok(ArrayList::new(self, array_id, size_elements))
    }

    /// `Release(array_id)`: frees every frame/swap blob the array still
    /// owns and removes it from the page table. Reached through
    /// [`ArrayList::release`], which consumes the handle.
    pub(crate) fn release(&self, array_id: ArrayId) -> Result<()> {
        self.check_poisoned()?;

        let mut state = self.state.lock();
        let len = state
            .page_table
            .row_len(array_id)
            .ok_or(Error::UnknownArray(array_id.0))?;

        for i in 0..len {
            let vid = VirtualPageId::new(i);
            match state.page_table.get(array_id, vid) {
                Some(PageTableEntry::Unallocated) | None => {}
                Some(PageTableEntry::Resident(frame_id)) => {
                    state.allocator.free(frame_id);
                    state.policy.on_free(frame_id);
                    state.owner[frame_id.0] = None;
                }
                Some(PageTableEntry::OnDisk) => {
                    let result = self.swap.remove(array_id, vid);
                    self.swap_guarded(result)?;
                }
            }
        }

        state.page_table.remove_row(array_id);
        log::debug!("released array {}", array_id);
        Ok(())
    }

    /// `Read(array_id, vid, offset) -> value`.
    pub fn read(&self, array_id: ArrayId, vid: VirtualPageId, offset: usize) -> Result<i32> {
        self.check_poisoned()?;
        let mut state = self.state.lock();
        let frame_id = self.locate_or_fault(&mut state, array_id, vid)?;
        state.frames[frame_id.0].read(offset)
    }

    /// `Write(array_id, vid, offset, value)`.
    pub fn write(
        &self,
        array_id: ArrayId,
        vid: VirtualPageId,
        offset: usize,
        value: i32,
    ) -> Result<()> {
        self.check_poisoned()?;
        let mut state = self.state.lock();
        let frame_id = self.locate_or_fault(&mut state, array_id, vid)?;
        state.frames[frame_id.0].write(offset, value)
    }

    /// The locate-or-fault algorithm: resolves `(array_id, vid)` to a
    /// resident frame, loading or allocating as needed.
    ///
    /// `on_access` fires only on the cache-hit path; first-touch and
    /// fault-in paths call `on_load` instead and do not additionally chain
    /// `on_access` — a frame that was just bound has not yet been "used
    /// again" in the sense the eviction policies' second-chance semantics
    /// require (see the worked CLOCK scenario this resolves).
    fn locate_or_fault(
        &self,
        state: &mut ManagerState,
        array_id: ArrayId,
        vid: VirtualPageId,
    ) -> Result<FrameId> {
        let len = state
            .page_table
            .row_len(array_id)
            .ok_or(Error::UnknownArray(array_id.0))?;
        if vid.0 >= len {
            return Err(Error::RowBounds {
                array_id: array_id.0,
                vid: vid.0,
                len,
            });
        }

        self.stats.record_access();

        match state.page_table.get(array_id, vid) {
            Some(PageTableEntry::Resident(frame_id)) => {
                state.policy.on_access(frame_id);
                Ok(frame_id)
            }
            Some(PageTableEntry::Unallocated) => {
                self.stats.record_miss();
                let frame_id = self.get_or_evict_frame(state)?;
                state.frames[frame_id.0].clear();
                state.page_table.set(array_id, vid, PageTableEntry::Resident(frame_id));
                state.owner[frame_id.0] = Some((array_id, vid));
                state.policy.on_load(frame_id);
                log::trace!("first touch {}:{} -> {}", array_id, vid, frame_id);
                Ok(frame_id)
            }
            Some(PageTableEntry::OnDisk) => {
                self.stats.record_miss();
                let frame_id = self.get_or_evict_frame(state)?;
                let result = self.swap.get(array_id, vid, &mut state.frames[frame_id.0]);
                self.swap_guarded(result)?;
                let result = self.swap.remove(array_id, vid);
                self.swap_guarded(result)?;
                state.page_table.set(array_id, vid, PageTableEntry::Resident(frame_id));
                state.owner[frame_id.0] = Some((array_id, vid));
                state.policy.on_load(frame_id);
                log::trace!("fault-in {}:{} -> {}", array_id, vid, frame_id);
                Ok(frame_id)
            }
            None => Err(Error::UnknownArray(array_id.0)),
        }
    }

    /// Obtain a frame from the free list, evicting (and paging out) the
    /// policy's chosen victim if the free list is empty.
    fn get_or_evict_frame(&self, state: &mut ManagerState) -> Result<FrameId> {
        if let Some(frame_id) = state.allocator.alloc() {
            return Ok(frame_id);
        }

        let victim = state.policy.evict().ok_or(Error::Capacity {
            pool_size: self.pool_size,
        })?;
        self.page_out(state, victim)?;
        Ok(victim)
    }

    /// Persist a resident frame's contents to swap and mark its page table
    /// entry `ON_DISK`.
    fn page_out(&self, state: &mut ManagerState, frame_id: FrameId) -> Result<()> {
        let (array_id, vid) = state.owner[frame_id.0]
            .take()
            .expect("evicted frame must have an owner");

        let result = self.swap.put(array_id, vid, &state.frames[frame_id.0]);
        self.swap_guarded(result)?;

        state.page_table.set(array_id, vid, PageTableEntry::OnDisk);
        self.stats.record_eviction();
        log::trace!("paged out {}:{} from {}", array_id, vid, frame_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eviction::PolicyKind;
    use tempfile::tempdir;

    fn manager(pool_size: usize, policy: PolicyKind) -> (MemoryManager, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let cfg = Config::new(pool_size).unwrap().with_policy(policy).with_swap_dir(dir.path());
        (MemoryManager::new(cfg).unwrap(), dir)
    }

    #[test]
    fn test_first_touch_reads_zero() {
        let (mgr, _dir) = manager(4, PolicyKind::Fifo);
        let arr = mgr.allocate(PAGE_SIZE).unwrap();
        assert_eq!(mgr.read(arr.array_id(), VirtualPageId::new(0), 0).unwrap(), 0);
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let (mgr, _dir) = manager(4, PolicyKind::Fifo);
        let arr = mgr.allocate(PAGE_SIZE).unwrap();
        let array_id = arr.array_id();
        mgr.write(array_id, VirtualPageId::new(0), 10, 99).unwrap();
        assert_eq!(mgr.read(array_id, VirtualPageId::new(0), 10).unwrap(), 99);
    }

    #[test]
    fn test_s1_page_fault_beyond_pool() {
        let (mgr, _dir) = manager(10, PolicyKind::Fifo);
        let arr = mgr.allocate(4000).unwrap();

        for i in 0..4000 {
            arr.write(i, 1).unwrap();
        }
        for i in 0..4000 {
            assert_eq!(arr.read(i).unwrap(), 1);
        }
        assert!(mgr.stats().snapshot().stat_num_miss >= 4);
    }

    #[test]
    fn test_s2_eviction_round_trip() {
        let (mgr, _dir) = manager(2, PolicyKind::Fifo);
        let arr = mgr.allocate(3 * PAGE_SIZE).unwrap();
        let array_id = arr.array_id();

        for i in 0..3usize {
            mgr.write(array_id, VirtualPageId::new(i), 0, (i as i32) + 1).unwrap();
        }

        assert_eq!(mgr.read(array_id, VirtualPageId::new(0), 0).unwrap(), 1);
        assert_eq!(mgr.read(array_id, VirtualPageId::new(1), 0).unwrap(), 2);
        assert_eq!(mgr.read(array_id, VirtualPageId::new(2), 0).unwrap(), 3);
        assert!(mgr.stats().snapshot().stat_num_miss >= 3);
    }

    #[test]
    fn test_s6_capacity_error_does_not_consume_array_id() {
        let (mgr, _dir) = manager(2, PolicyKind::Fifo);
        assert!(matches!(
            mgr.allocate(3 * PAGE_SIZE),
            Err(Error::Capacity { .. })
        ));

        let arr = mgr.allocate(PAGE_SIZE).unwrap();
        assert_eq!(arr.array_id(), ArrayId::new(0));
    }

    #[test]
    fn test_release_cleans_swap_s4() {
        let (mgr, _dir) = manager(2, PolicyKind::Fifo);
        let arr = mgr.allocate(6 * PAGE_SIZE).unwrap();
        let array_id = arr.array_id();

        for i in 0..6usize {
            mgr.write(array_id, VirtualPageId::new(i), 0, i as i32).unwrap();
        }

        arr.release().unwrap();
        for i in 0..6usize {
            assert!(!mgr.swap.contains(array_id, VirtualPageId::new(i)));
        }
        assert!(matches!(
            mgr.read(array_id, VirtualPageId::new(0), 0),
            Err(Error::UnknownArray(_))
        ));
    }

    #[test]
    fn test_bounds_errors() {
        let (mgr, _dir) = manager(2, PolicyKind::Fifo);
        let arr = mgr.allocate(PAGE_SIZE).unwrap();
        let array_id = arr.array_id();

        assert!(matches!(
            mgr.read(array_id, VirtualPageId::new(1), 0),
            Err(Error::RowBounds { .. })
        ));
        assert!(matches!(
            mgr.read(array_id, VirtualPageId::new(0), PAGE_SIZE),
            Err(Error::Bounds { .. })
        ));
    }

    #[test]
    fn test_concurrent_disjoint_writes_s5() {
        use std::sync::Arc;
        use std::thread;

        let dir = tempdir().unwrap();
        let cfg = Config::new(10).unwrap().with_policy(PolicyKind::Clock).with_swap_dir(dir.path());
        let mgr = Arc::new(MemoryManager::new(cfg).unwrap());
        let array_id = mgr.allocate(10 * PAGE_SIZE).unwrap().array_id();

        let handles: Vec<_> = (0..10i32)
            .map(|t| {
                let mgr = Arc::clone(&mgr);
                thread::spawn(move || {
                    mgr.write(array_id, VirtualPageId::new(t as usize), 0, t).unwrap();
                    let got = mgr.read(array_id, VirtualPageId::new(t as usize), 0).unwrap();
                    assert_eq!(got, t);
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
    }

    /// Checks invariants 1-4 of the reachable-state property list against
    /// the coordinator's internal state directly.
    fn assert_state_invariants(mgr: &MemoryManager) {
        let state = mgr.state.lock();

        let mut bound_frames = 0usize;
        for (&array_id, row) in state.page_table.rows() {
            for (i, entry) in row.iter().enumerate() {
                let vid = VirtualPageId::new(i);
                match *entry {
                    PageTableEntry::Resident(frame_id) => {
                        bound_frames += 1;
                        assert_eq!(
                            state.owner[frame_id.0],
                            Some((array_id, vid)),
                            "frame {frame_id} claims ({array_id}, {vid}) but owner disagrees"
                        );
                        assert!(
                            !mgr.swap.contains(array_id, vid),
                            "resident page ({array_id}, {vid}) must not also have a swap blob"
                        );
                    }
                    PageTableEntry::OnDisk => {
                        assert!(
                            mgr.swap.contains(array_id, vid),
                            "ON_DISK page ({array_id}, {vid}) has no swap blob"
                        );
                    }
                    PageTableEntry::Unallocated => {
                        assert!(!mgr.swap.contains(array_id, vid));
                    }
                }
            }
        }

        let free = state.allocator.free_count();
        assert_eq!(free + bound_frames, mgr.pool_size, "invariant 2 violated");
    }

    proptest::proptest! {
        /// Property-based replay of invariants 1-4: a random sequence of
        /// Allocate/Read/Write/Release over a small pool must never leave
        /// the coordinator in a state violating them.
        #[test]
        fn test_invariants_hold_across_random_op_sequences(
            ops in proptest::collection::vec(0u8..4, 1..40)
        ) {
            let (mgr, _dir) = manager(3, PolicyKind::Clock);
            let mut arrays: Vec<ArrayId> = Vec::new();

            for op in ops {
                match op {
                    0 => {
                        if let Ok(arr) = mgr.allocate(PAGE_SIZE) {
                            arrays.push(arr.array_id());
                        }
                    }
                    1 if !arrays.is_empty() => {
                        let array_id = arrays[0];
                        let _ = mgr.write(array_id, VirtualPageId::new(0), 0, 7);
                    }
                    2 if !arrays.is_empty() => {
                        let array_id = arrays[0];
                        let _ = mgr.read(array_id, VirtualPageId::new(0), 0);
                    }
                    3 if !arrays.is_empty() => {
                        let array_id = arrays.remove(0);
                        let _ = mgr.release(array_id);
                    }
                    _ => {}
                }
                assert_state_invariants(&mgr);
            }
        }
    }
}
