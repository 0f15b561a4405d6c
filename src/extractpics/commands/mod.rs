//! # Command Layer
//!
//! Business logic for every retention operation. Each command takes a
//! [`RetentionStore`], loads the full state, applies one change, and commits
//! the full state back. Write failures never surface as errors here: the
//! result is flagged `unsaved` and carries a warning message instead, so a UI
//! can keep running as if nothing happened.

use crate::clock::Clock;
use crate::model::{HistoryEntry, Preferences, RetentionState, Stats};
use crate::store::{RetentionStore, StorageBackend, StorageHealth};

pub mod doctor;
pub mod email;
pub mod history;
pub mod preferences;
pub mod state;
pub mod stats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_entries: Vec<HistoryEntry>,
    pub listed_entries: Vec<HistoryEntry>,
    pub preferences: Option<Preferences>,
    pub stats: Option<Stats>,
    pub state: Option<RetentionState>,
    pub health: Option<StorageHealth>,
    /// Set when the change was applied in memory but the write was dropped.
    pub unsaved: bool,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_entries(mut self, entries: Vec<HistoryEntry>) -> Self {
        self.affected_entries = entries;
        self
    }

    pub fn with_listed_entries(mut self, entries: Vec<HistoryEntry>) -> Self {
        self.listed_entries = entries;
        self
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_state(mut self, state: RetentionState) -> Self {
        self.state = Some(state);
        self
    }
}

/// Commit `state`, flagging `result` if the write was dropped.
pub(crate) fn persist<B: StorageBackend, C: Clock>(
    store: &RetentionStore<B, C>,
    state: &RetentionState,
    result: &mut CmdResult,
) {
    if !store.commit(state) {
        result.unsaved = true;
        result.add_message(CmdMessage::warning(
            "Storage is unavailable; this change will not be remembered.",
        ));
    }
}
