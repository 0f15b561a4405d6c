//! # ExtractPics Retention Store
//!
//! The ExtractPics image extractor remembers a little about each user between
//! visits: recent scans, a few preferences, cumulative usage counters, and
//! whether the email prompt has already been shown. This crate owns that
//! state. It is a **UI-agnostic library**; the bundled `extractpics` binary is
//! just one client, used to inspect and edit a file-backed copy of the state.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - RetentionApi: one method per operation                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Read-modify-write of the whole RetentionState            │
//! │  - Streak arithmetic, history cap, email gate               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend port: FsBackend, MemBackend               │
//! │  - RetentionStore: JSON codec + fail-soft policy            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure policy
//!
//! Retention state is a convenience, so nothing here may break the page using
//! it. Reads that hit missing, unreadable, corrupt or outdated data return
//! defaults. Writes that fail are logged through `tracing`, reported to an
//! optional hook, and flagged on the returned [`commands::CmdResult`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic per operation
//! - [`store`]: Storage port and the retention codec
//! - [`model`]: Persisted types and schema constants
//! - [`clock`]: Injectable time source
//! - [`config`]: Configuration for the file-backed store
//! - [`error`]: Error types

pub mod api;
pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;
