//! # API Facade
//!
//! [`RetentionApi`] is the single entry point UI code talks to: the history
//! list, preference toggles, stats displays, the email-capture modal, and the
//! extraction tool's completion callback all go through it.
//!
//! The facade only dispatches. Logic lives in `commands/*.rs`, persistence in
//! `store/`. Getters return plain values; mutators return a [`CmdResult`] whose
//! `unsaved` flag reports a dropped write without ever failing the caller.
//!
//! Typical consumer flow:
//!
//! ```text
//! app load        -> record_visit()
//! scan finished   -> add_to_history(entry); record_extraction(n, batch, deep)
//! after scan      -> should_show_email_capture() ? show modal, mark_email_capture_shown()
//! form submitted  -> mark_email_captured()
//! ```

use crate::clock::{Clock, SystemClock};
use crate::commands;
use crate::error::Result;
use crate::model::{
    HistoryEntry, NewHistoryEntry, Preferences, PreferencesPatch, RetentionState, Stats,
};
use crate::store::{RetentionStore, StorageBackend};

pub use crate::commands::stats::{StatsSummary, VisitBucket};
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

pub struct RetentionApi<B: StorageBackend, C: Clock = SystemClock> {
    store: RetentionStore<B, C>,
}

impl<B: StorageBackend, C: Clock> RetentionApi<B, C> {
    pub fn new(store: RetentionStore<B, C>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RetentionStore<B, C> {
        &self.store
    }

    // --- Whole record ---

    pub fn get_storage(&self) -> RetentionState {
        commands::state::get(&self.store)
    }

    pub fn set_storage(&self, state: &RetentionState) -> CmdResult {
        commands::state::set(&self.store, state)
    }

    pub fn reset(&self) -> CmdResult {
        commands::state::reset(&self.store)
    }

    pub fn export_state(&self) -> Result<String> {
        commands::state::export(&self.store)
    }

    pub fn import_state(&self, json: &str) -> Result<CmdResult> {
        commands::state::import(&self.store, json)
    }

    pub fn doctor(&self) -> CmdResult {
        commands::doctor::run(&self.store)
    }

    // --- History ---

    pub fn add_to_history(&self, entry: NewHistoryEntry) -> CmdResult {
        commands::history::add(&self.store, entry)
    }

    pub fn get_history(&self) -> Vec<HistoryEntry> {
        commands::history::list(&self.store)
    }

    pub fn clear_history(&self) -> CmdResult {
        commands::history::clear(&self.store)
    }

    pub fn remove_from_history(&self, id: &str) -> CmdResult {
        commands::history::remove(&self.store, id)
    }

    // --- Preferences ---

    pub fn get_preferences(&self) -> Preferences {
        commands::preferences::get(&self.store)
    }

    pub fn update_preferences(&self, patch: &PreferencesPatch) -> CmdResult {
        commands::preferences::update(&self.store, patch)
    }

    // --- Stats ---

    pub fn get_stats(&self) -> Stats {
        commands::stats::get(&self.store)
    }

    pub fn record_extraction(
        &self,
        image_count: u64,
        is_batch: bool,
        is_deep_scan: bool,
    ) -> CmdResult {
        commands::stats::record_extraction(&self.store, image_count, is_batch, is_deep_scan)
    }

    pub fn record_visit(&self) -> CmdResult {
        commands::stats::record_visit(&self.store)
    }

    pub fn summary(&self) -> StatsSummary {
        commands::stats::summary(&self.store)
    }

    // --- Email capture ---

    pub fn should_show_email_capture(&self) -> bool {
        commands::email::should_show(&self.store)
    }

    pub fn mark_email_capture_shown(&self) -> CmdResult {
        commands::email::mark_shown(&self.store)
    }

    pub fn mark_email_captured(&self) -> CmdResult {
        commands::email::mark_captured(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::model::{ScanMode, SCHEMA_VERSION};
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::{mem_store, T0};
    use std::rc::Rc;

    fn api() -> RetentionApi<MemBackend, Rc<ManualClock>> {
        let (store, _clock) = mem_store();
        RetentionApi::new(store)
    }

    #[test]
    fn dispatches_history_operations() {
        let api = api();
        let added =
            api.add_to_history(NewHistoryEntry::new("https://a.test", T0, 1, ScanMode::Quick));
        let id = added.affected_entries[0].id.clone();

        assert_eq!(api.get_history().len(), 1);
        assert_eq!(api.remove_from_history(&id).affected_entries.len(), 1);
        assert!(api.get_history().is_empty());
        assert!(api.clear_history().affected_entries.is_empty());
    }

    #[test]
    fn dispatches_stats_and_email_operations() {
        let api = api();
        for _ in 0..5 {
            api.record_extraction(2, false, false);
        }
        assert_eq!(api.get_stats().total_extractions, 5);
        assert_eq!(api.summary().average_images_per_extraction, 2.0);
        assert!(api.should_show_email_capture());
        api.mark_email_capture_shown();
        assert!(!api.should_show_email_capture());
        api.mark_email_captured();
        assert_eq!(api.get_storage().email_captured_at, Some(T0));
    }

    #[test]
    fn dispatches_state_operations() {
        let api = api();
        api.update_preferences(&PreferencesPatch {
            sound_enabled: Some(false),
            ..Default::default()
        });
        assert!(!api.get_preferences().sound_enabled);

        let exported = api.export_state().unwrap();
        api.reset();
        assert!(api.get_preferences().sound_enabled);

        api.import_state(&exported).unwrap();
        assert!(!api.get_preferences().sound_enabled);
        assert_eq!(api.get_storage().version, SCHEMA_VERSION);
        assert!(api.doctor().health.unwrap().is_healthy());
        assert!(!api.record_visit().unsaved);
    }
}
