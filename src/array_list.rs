//! ArrayList - a thin adapter over the memory manager.
//!
//! Converts a flat element index into `(vid, offset)` and forwards to the
//! owning [`MemoryManager`]. It holds no state machine of its own and owns
//! no frames; `(array_id, len)` plus a non-owning reference to the manager
//! is all it needs. This replaces the reference implementation's owning
//! back-pointer cycle between the array handle and its manager.

use crate::common::config::PAGE_SIZE;
use crate::common::error::{Error, Result};
use crate::common::{ArrayId, VirtualPageId};
use crate::manager::MemoryManager;

/// A handle to one allocated array. Produced by
/// [`MemoryManager::allocate`], invalidated by [`ArrayList::release`].
pub struct ArrayList<'a> {
    array_id: ArrayId,
    len: usize,
    manager: &'a MemoryManager,
}

impl<'a> ArrayList<'a> {
    pub(crate) fn new(manager: &'a MemoryManager, array_id: ArrayId, len: usize) -> Self {
        Self {
            array_id,
            len,
            manager,
        }
    }

    pub fn array_id(&self) -> ArrayId {
        self.array_id
    }

    /// Number of elements, not pages.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn locate(&self, index: usize) -> Result<(VirtualPageId, usize)> {
        if index >= self.len {
            return Err(Error::RowBounds {
                array_id: self.array_id.0,
                vid: index,
                len: self.len,
            });
        }
        Ok((VirtualPageId::new(index / PAGE_SIZE), index % PAGE_SIZE))
    }

    /// Read the element at flat index `index`.
    pub fn read(&self, index: usize) -> Result<i32> {
        let (vid, offset) = self.locate(index)?;
        self.manager.read(self.array_id, vid, offset)
    }

    /// Write `value` at flat index `index`.
    pub fn write(&self, index: usize, value: i32) -> Result<()> {
        let (vid, offset) = self.locate(index)?;
        self.manager.write(self.array_id, vid, offset, value)
    }

    /// Release this array: returns every resident frame and swap blob it
    /// owns to the manager. The handle is consumed and cannot be used
    /// again, enforced here at compile time rather than by convention.
    pub fn release(self) -> Result<()> {
        self.manager.release(self.array_id)
    }
}
