//! Persisted retention types.
//!
//! The whole client state is one [`RetentionState`] record, serialized as a
//! camelCase JSON object under a single storage key:
//!
//! ```text
//! {
//!   "version": 1,
//!   "history": [ { "id", "url", "timestamp", "imageCount", "thumbnailUrl"?, "scanMode" } ],
//!   "preferences": { "defaultScanMode", "defaultMode", "soundEnabled", "lastMinWidth" },
//!   "stats": { "totalExtractions", ..., "longestStreak" },
//!   "emailCaptureShown": false,
//!   "emailCapturedAt"?: 1700000000000
//! }
//! ```
//!
//! All timestamps are epoch milliseconds. A record whose `version` differs
//! from [`SCHEMA_VERSION`] is never migrated; it is replaced by defaults.

use crate::error::{Result, RetentionError};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;
pub const MAX_HISTORY: usize = 50;
pub const EMAIL_CAPTURE_THRESHOLD: u64 = 5;
pub const DAY_MS: i64 = 86_400_000;
pub const DEFAULT_STORAGE_KEY: &str = "extractpics_retention";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    #[default]
    Quick,
    Deep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractMode {
    #[default]
    Single,
    Batch,
}

/// One completed scan, as reported by the extraction tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub url: String,
    pub timestamp: i64,
    pub image_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub scan_mode: ScanMode,
}

/// A history entry before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHistoryEntry {
    pub url: String,
    pub timestamp: i64,
    pub image_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub scan_mode: ScanMode,
}

impl NewHistoryEntry {
    pub fn new(
        url: impl Into<String>,
        timestamp: i64,
        image_count: u64,
        scan_mode: ScanMode,
    ) -> Self {
        Self {
            url: url.into(),
            timestamp,
            image_count,
            thumbnail_url: None,
            scan_mode,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(thumbnail_url.into());
        self
    }

    pub fn into_entry(self, id: String) -> HistoryEntry {
        HistoryEntry {
            id,
            url: self.url,
            timestamp: self.timestamp,
            image_count: self.image_count,
            thumbnail_url: self.thumbnail_url,
            scan_mode: self.scan_mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub default_scan_mode: ScanMode,
    pub default_mode: ExtractMode,
    pub sound_enabled: bool,
    pub last_min_width: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_scan_mode: ScanMode::Quick,
            default_mode: ExtractMode::Single,
            sound_enabled: true,
            last_min_width: 0,
        }
    }
}

/// Partial preference update. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_scan_mode: Option<ScanMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_mode: Option<ExtractMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_min_width: Option<u32>,
}

impl PreferencesPatch {
    pub fn is_empty(&self) -> bool {
        self.default_scan_mode.is_none()
            && self.default_mode.is_none()
            && self.sound_enabled.is_none()
            && self.last_min_width.is_none()
    }

    pub fn apply(&self, prefs: &mut Preferences) {
        if let Some(mode) = self.default_scan_mode {
            prefs.default_scan_mode = mode;
        }
        if let Some(mode) = self.default_mode {
            prefs.default_mode = mode;
        }
        if let Some(enabled) = self.sound_enabled {
            prefs.sound_enabled = enabled;
        }
        if let Some(width) = self.last_min_width {
            prefs.last_min_width = width;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_extractions: u64,
    pub total_images_extracted: u64,
    pub batch_extractions: u64,
    pub deep_scans: u64,
    pub first_visit: i64,
    pub last_visit: i64,
    pub visit_count: u64,
    pub current_streak: u64,
    pub longest_streak: u64,
}

impl Stats {
    pub fn new(now: i64) -> Self {
        Self {
            total_extractions: 0,
            total_images_extracted: 0,
            batch_extractions: 0,
            deep_scans: 0,
            first_visit: now,
            last_visit: now,
            visit_count: 1,
            current_streak: 1,
            longest_streak: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionState {
    pub version: u32,
    pub history: Vec<HistoryEntry>,
    pub preferences: Preferences,
    pub stats: Stats,
    pub email_capture_shown: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_captured_at: Option<i64>,
}

impl RetentionState {
    /// Fresh defaults for a browser that has never been seen, stamped with `now`.
    pub fn new(now: i64) -> Self {
        Self {
            version: SCHEMA_VERSION,
            history: Vec::new(),
            preferences: Preferences::default(),
            stats: Stats::new(now),
            email_capture_shown: false,
            email_captured_at: None,
        }
    }

    /// Checks the structural invariants a persisted record must hold.
    pub fn validate(&self) -> Result<()> {
        if self.version != SCHEMA_VERSION {
            return Err(RetentionError::VersionMismatch {
                found: Some(u64::from(self.version)),
                expected: SCHEMA_VERSION,
            });
        }
        if self.history.len() > MAX_HISTORY {
            return Err(RetentionError::InvalidState(format!(
                "history holds {} entries (max {})",
                self.history.len(),
                MAX_HISTORY
            )));
        }
        let stats = &self.stats;
        if stats.current_streak > stats.longest_streak {
            return Err(RetentionError::InvalidState(format!(
                "current streak {} exceeds longest streak {}",
                stats.current_streak, stats.longest_streak
            )));
        }
        if stats.batch_extractions > stats.total_extractions
            || stats.deep_scans > stats.total_extractions
        {
            return Err(RetentionError::InvalidState(
                "batch or deep scan count exceeds total extractions".to_string(),
            ));
        }
        Ok(())
    }
}
