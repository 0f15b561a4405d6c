//! # Storage Layer
//!
//! The retention state is a single JSON blob kept under one key. Where that
//! key lives is abstracted behind [`StorageBackend`], a minimal `get`/`set`
//! port over raw strings.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one `<key>.json` file per key, written atomically
//!   (used by the CLI, defaults to the platform data directory)
//! - [`mem_backend::MemBackend`]: in-memory map for tests, with switches to
//!   simulate disabled storage and failing writes
//!
//! ## RetentionStore
//!
//! [`RetentionStore`] owns the codec and the failure policy on top of a backend:
//!
//! ```text
//! load()    absent | unreadable | not JSON | other version | invalid  ->  defaults
//! save()    serialize + set, error returned
//! commit()  save(), error logged and handed to the write-failure hook
//! inspect() classify the stored value without touching it
//! ```
//!
//! Every mutation reads the whole record, changes it, and writes the whole
//! record back. There is no revision check, so two writers interleaving their
//! read-modify-write cycles lose one update (last writer wins).

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod retention_store;

pub use backend::StorageBackend;
pub use retention_store::{RetentionStore, StorageHealth};
