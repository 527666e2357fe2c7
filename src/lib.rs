//! vmarray - a user-space virtual-memory manager for fixed-size arrays of
//! integers, with pluggable eviction policies and disk-backed swap.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            vmarray                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │             ArrayList (array_list/)                      │   │
//! │  │        flat index -> (vid, offset) adapter                │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Memory Manager (manager/)                      │   │
//! │  │   Allocate / Release / Read / Write, single coordinator  │   │
//! │  │   lock over page table + allocator + eviction policy     │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                      ↓                    ↓                     │
//! │  ┌───────────────────────────┐  ┌──────────────────────────┐   │
//! │  │  Eviction Policy (eviction/)│  │  Swap Store (storage/)  │   │
//! │  │     FIFO | CLOCK            │  │   key -> blob on disk    │   │
//! │  └───────────────────────────┘  └──────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (ids, `Error`, `Config`)
//! - [`manager`] - The coordinator: free-frame allocator, page table, stats,
//!   and [`manager::MemoryManager`] itself
//! - [`eviction`] - FIFO and CLOCK replacement policies
//! - [`storage`] - Page frames and the on-disk swap store
//! - [`array_list`] - [`array_list::ArrayList`], the per-array handle
//!
//! # Quick Start
//! ```no_run
//! use vmarray::common::{Config, PAGE_SIZE};
//! use vmarray::manager::MemoryManager;
//!
//! let mgr = MemoryManager::new(Config::new(16).unwrap()).unwrap();
//! let arr = mgr.allocate(4 * PAGE_SIZE).unwrap();
//! arr.write(0, 42).unwrap();
//! assert_eq!(arr.read(0).unwrap(), 42);
//! ```

pub mod array_list;
pub mod common;
pub mod eviction;
pub mod manager;
pub mod storage;

pub use array_list::ArrayList;
pub use common::config::PAGE_SIZE;
pub use common::{ArrayId, Config, Error, FrameId, Result, VirtualPageId};
pub use eviction::PolicyKind;
pub use manager::{new_manager, MemoryManager};
