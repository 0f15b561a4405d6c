use crate::clock::Clock;
use crate::commands::{persist, CmdMessage, CmdResult};
use crate::model::{Preferences, PreferencesPatch};
use crate::store::{RetentionStore, StorageBackend};

pub fn get<B: StorageBackend, C: Clock>(store: &RetentionStore<B, C>) -> Preferences {
    store.load().preferences
}

pub fn update<B: StorageBackend, C: Clock>(
    store: &RetentionStore<B, C>,
    patch: &PreferencesPatch,
) -> CmdResult {
    let mut state = store.load();
    let mut result = CmdResult::default();

    if patch.is_empty() {
        result.add_message(CmdMessage::info("No preferences to change."));
        return result.with_preferences(state.preferences);
    }

    patch.apply(&mut state.preferences);
    persist(store, &state, &mut result);
    result.add_message(CmdMessage::success("Preferences updated."));
    result.with_preferences(state.preferences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExtractMode, ScanMode};
    use crate::test_utils::mem_store;

    #[test]
    fn get_returns_defaults_on_fresh_store() {
        let (store, _clock) = mem_store();
        assert_eq!(get(&store), Preferences::default());
    }

    #[test]
    fn update_merges_only_supplied_keys() {
        let (store, _clock) = mem_store();
        update(
            &store,
            &PreferencesPatch {
                default_mode: Some(ExtractMode::Batch),
                last_min_width: Some(320),
                ..Default::default()
            },
        );

        let result = update(
            &store,
            &PreferencesPatch {
                sound_enabled: Some(false),
                ..Default::default()
            },
        );

        let prefs = get(&store);
        assert_eq!(result.preferences.as_ref(), Some(&prefs));
        assert_eq!(prefs.default_mode, ExtractMode::Batch);
        assert_eq!(prefs.last_min_width, 320);
        assert!(!prefs.sound_enabled);
        assert_eq!(prefs.default_scan_mode, ScanMode::Quick);
    }

    #[test]
    fn update_leaves_other_state_alone() {
        let (store, _clock) = mem_store();
        let mut seeded = store.load();
        seeded.stats.total_extractions = 9;
        seeded.email_capture_shown = true;
        store.save(&seeded).unwrap();

        update(
            &store,
            &PreferencesPatch {
                default_scan_mode: Some(ScanMode::Deep),
                ..Default::default()
            },
        );

        let after = store.load();
        assert_eq!(after.stats, seeded.stats);
        assert!(after.email_capture_shown);
        assert_eq!(after.preferences.default_scan_mode, ScanMode::Deep);
    }

    #[test]
    fn empty_patch_does_not_write() {
        let (store, _clock) = mem_store();
        let result = update(&store, &PreferencesPatch::default());
        assert_eq!(store.backend().write_count(), 0);
        assert_eq!(result.preferences, Some(Preferences::default()));
    }
}
