use crate::error::Result;

/// Abstract key-value port the retention store persists through.
///
/// This is the seam where the browser's local storage sits in the web build;
/// here it is implemented by [`MemBackend`](super::mem_backend::MemBackend)
/// for tests and [`FsBackend`](super::fs_backend::FsBackend) for the CLI.
pub trait StorageBackend {
    /// Read the raw value stored under `key`.
    /// Returns Ok(None) if nothing is stored there.
    /// Returns Err only when the storage itself cannot be read (disabled, permissions).
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the raw value stored under `key`.
    /// MUST leave either the old or the new value in place, never a partial write.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
