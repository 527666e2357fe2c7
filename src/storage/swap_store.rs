//! Swap Store - an on-disk key→blob store keyed by `(array_id, vid)`.
//!
//! Evicted page contents are persisted here and faulted back in on demand.
//! The store itself does not serialize concurrent access to a key; the
//! coordinator guarantees at most one in-flight operation per key.

use std::path::PathBuf;

use crate::common::{ArrayId, Result, VirtualPageId};
use crate::storage::frame::Frame;

/// Persists page-sized blobs to files under a fixed directory.
pub struct SwapStore {
    dir: PathBuf,
}

impl SwapStore {
    /// Open a swap store rooted at `dir`. The directory is created if it
    /// does not already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Deterministic, reversible, collision-free file name for a key.
    fn path_for(&self, array_id: ArrayId, vid: VirtualPageId) -> PathBuf {
        self.dir.join(format!("arr{}_vid{}.page", array_id.0, vid.0))
    }

    /// Write `frame`'s contents to the blob for `(array_id, vid)`,
    /// overwriting any prior value.
    pub fn put(&self, array_id: ArrayId, vid: VirtualPageId, frame: &Frame) -> Result<()> {
        frame.flush_to(&self.path_for(array_id, vid))?;
        Ok(())
    }

    /// Load the blob for `(array_id, vid)` into `frame`. Fails if no blob
    /// has been written for this key.
    pub fn get(&self, array_id: ArrayId, vid: VirtualPageId, frame: &mut Frame) -> Result<()> {
        frame.load_from(&self.path_for(array_id, vid))?;
        Ok(())
    }

    /// Delete the blob for `(array_id, vid)`.
    pub fn remove(&self, array_id: ArrayId, vid: VirtualPageId) -> Result<()> {
        std::fs::remove_file(self.path_for(array_id, vid))?;
        Ok(())
    }

    /// Whether a blob exists for `(array_id, vid)`. Used by tests that
    /// assert swap cleanup (S4).
    pub fn contains(&self, array_id: ArrayId, vid: VirtualPageId) -> bool {
        self.path_for(array_id, vid).exists()
    }
}
