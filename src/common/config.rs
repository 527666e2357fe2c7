//! Configuration constants and the manager's builder.

use std::path::{Path, PathBuf};

use crate::common::error::{Error, Result};
use crate::eviction::PolicyKind;

/// Number of 4-byte words in a page frame.
///
/// Matches the reference manager's page size. A page is therefore
/// `PAGE_SIZE * 4` bytes on disk.
pub const PAGE_SIZE: usize = 1024;

/// Construction parameters for a [`crate::manager::MemoryManager`].
///
/// Mirrors the reference's constructor arguments (pool size, policy, swap
/// directory) as an explicit builder rather than a long parameter list.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) pool_size: usize,
    pub(crate) policy: PolicyKind,
    pub(crate) swap_dir: PathBuf,
}

impl Config {
    /// Start a config for a pool of `pool_size` frames. Policy defaults to
    /// `EVICT_ALG`'s value (Clock unless the env var is literally `FIFO`);
    /// swap_dir defaults to the process temp dir.
    ///
    /// # Errors
    /// Returns `Error::InvalidPoolSize` if `pool_size` is 0.
    pub fn new(pool_size: usize) -> Result<Self> {
        if pool_size == 0 {
            return Err(Error::InvalidPoolSize);
        }
        Ok(Self {
            pool_size,
            policy: PolicyKind::from_env(),
            swap_dir: std::env::temp_dir(),
        })
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_swap_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.swap_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    pub fn swap_dir(&self) -> &Path {
        &self.swap_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size() {
        assert_eq!(PAGE_SIZE, 1024);
    }

    #[test]
    fn test_config_defaults() {
        std::env::remove_var(crate::eviction::EVICT_ALG_ENV);
        let cfg = Config::new(8).unwrap();
        assert_eq!(cfg.pool_size(), 8);
        assert_eq!(cfg.policy(), PolicyKind::Clock);
    }

    #[test]
    fn test_config_builder_overrides() {
        let cfg = Config::new(4)
            .unwrap()
            .with_policy(PolicyKind::Fifo)
            .with_swap_dir("/tmp/vmarray-test");
        assert_eq!(cfg.policy(), PolicyKind::Fifo);
        assert_eq!(cfg.swap_dir(), Path::new("/tmp/vmarray-test"));
    }

    #[test]
    fn test_config_zero_pool_errors() {
        assert!(matches!(Config::new(0), Err(Error::InvalidPoolSize)));
    }
}
