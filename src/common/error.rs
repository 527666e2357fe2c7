//! Error types for vmarray.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors the memory manager can surface.
///
/// A single enum keeps error handling consistent across every component
/// (allocator, eviction policy, swap store, page table, coordinator).
#[derive(Debug, Error)]
pub enum Error {
    /// The request needs more pages than the pool has frames, or the
    /// eviction policy had nothing left to evict.
    #[error("requested size exceeds pool capacity of {pool_size} frames")]
    Capacity { pool_size: usize },

    /// A manager or config was constructed with a pool size of zero.
    #[error("pool size must be greater than zero")]
    InvalidPoolSize,

    /// An offset into a page, or a virtual page id into an array, fell
    /// outside the valid range.
    #[error("offset {offset} out of bounds (page size is {page_size})")]
    Bounds { offset: usize, page_size: usize },

    /// A virtual page id does not belong to the array it was used with.
    #[error("vid {vid} out of bounds for array {array_id} (length {len})")]
    RowBounds { array_id: u64, vid: usize, len: usize },

    /// An array id has never been allocated, or has already been released.
    #[error("unknown array id {0}")]
    UnknownArray(u64),

    /// I/O error from swap-store operations.
    #[error("swap store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The coordinator is poisoned after a prior unrecoverable I/O failure
    /// and can no longer be trusted to serve requests.
    #[error("memory manager is poisoned after a prior I/O failure")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Capacity { pool_size: 4 };
        assert_eq!(
            format!("{}", err),
            "requested size exceeds pool capacity of 4 frames"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Ok(42)
        }
        assert_eq!(might_fail().unwrap(), 42);
    }
}
