use crate::clock::Clock;
use crate::commands::{persist, CmdMessage, CmdResult};
use crate::error::{Result, RetentionError};
use crate::model::RetentionState;
use crate::store::retention_store::decode;
use crate::store::{RetentionStore, StorageBackend};

pub fn get<B: StorageBackend, C: Clock>(store: &RetentionStore<B, C>) -> RetentionState {
    store.load()
}

/// Overwrite the whole record.
///
/// A record that `load` would discard is never written: the stored data is
/// kept and the result comes back flagged `unsaved`.
pub fn set<B: StorageBackend, C: Clock>(
    store: &RetentionStore<B, C>,
    state: &RetentionState,
) -> CmdResult {
    let mut result = CmdResult::default();
    if let Err(e) = state.validate() {
        tracing::warn!(error = %e, "refusing to store invalid retention state");
        result.unsaved = true;
        result.add_message(CmdMessage::warning(format!("State not saved: {}", e)));
        return result;
    }
    persist(store, state, &mut result);
    result.with_state(state.clone())
}

/// Replace everything with fresh defaults stamped at the current time.
pub fn reset<B: StorageBackend, C: Clock>(store: &RetentionStore<B, C>) -> CmdResult {
    let state = store.defaults();
    let mut result = CmdResult::default();
    persist(store, &state, &mut result);
    result.add_message(CmdMessage::success("Retention state reset."));
    result.with_state(state)
}

pub fn export<B: StorageBackend, C: Clock>(store: &RetentionStore<B, C>) -> Result<String> {
    serde_json::to_string_pretty(&store.load()).map_err(RetentionError::Serialization)
}

/// Load a previously exported record. Rejected records leave storage untouched.
pub fn import<B: StorageBackend, C: Clock>(
    store: &RetentionStore<B, C>,
    json: &str,
) -> Result<CmdResult> {
    let state = decode(json)?;
    let mut result = CmdResult::default();
    persist(store, &state, &mut result);
    result.add_message(CmdMessage::success(format!(
        "Imported state with {} history entr{}",
        state.history.len(),
        if state.history.len() == 1 { "y" } else { "ies" }
    )));
    Ok(result.with_state(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{history, stats, MessageLevel};
    use crate::model::{NewHistoryEntry, ScanMode, SCHEMA_VERSION};
    use crate::test_utils::{mem_store, T0};

    #[test]
    fn set_then_get_roundtrips() {
        let (store, _clock) = mem_store();
        let mut state = RetentionState::new(T0 - 10);
        state.stats.total_extractions = 3;
        state.stats.deep_scans = 1;
        state.email_capture_shown = true;

        let result = set(&store, &state);
        assert!(!result.unsaved);
        assert_eq!(get(&store), state);
    }

    #[test]
    fn set_with_unavailable_storage_does_not_panic() {
        let (store, _clock) = mem_store();
        store.backend().set_simulate_unavailable(true);

        let result = set(&store, &RetentionState::new(1));
        assert!(result.unsaved);
        assert_eq!(get(&store), RetentionState::new(T0));
    }

    #[test]
    fn reset_discards_everything() {
        let (store, clock) = mem_store();
        history::add(
            &store,
            NewHistoryEntry::new("https://x.test", T0, 2, ScanMode::Deep),
        );
        stats::record_extraction(&store, 2, false, true);
        clock.advance(1_000);

        reset(&store);
        assert_eq!(get(&store), RetentionState::new(T0 + 1_000));
    }

    #[test]
    fn export_import_roundtrip_into_fresh_store() {
        let (source, _clock) = mem_store();
        history::add(
            &source,
            NewHistoryEntry::new("https://x.test", T0, 2, ScanMode::Deep),
        );
        stats::record_extraction(&source, 2, true, true);
        let exported = export(&source).unwrap();

        let (target, _clock) = mem_store();
        let result = import(&target, &exported).unwrap();

        assert_eq!(result.state.as_ref(), Some(&get(&source)));
        assert_eq!(get(&target), get(&source));
    }

    #[test]
    fn import_rejects_foreign_version_without_writing() {
        let (store, _clock) = mem_store();
        let mut old = RetentionState::new(1);
        old.version = SCHEMA_VERSION + 1;
        let json = serde_json::to_string(&old).unwrap();

        let err = import(&store, &json).unwrap_err();
        assert!(matches!(err, RetentionError::VersionMismatch { .. }));
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn set_refuses_state_that_would_not_load() {
        let (store, _clock) = mem_store();
        history::add(
            &store,
            NewHistoryEntry::new("https://keep.test", T0, 4, ScanMode::Quick),
        );
        stats::record_extraction(&store, 4, false, false);
        let before = get(&store);
        let writes = store.backend().write_count();

        let mut broken = before.clone();
        broken.stats.current_streak = 2;
        broken.stats.longest_streak = 1;
        let result = set(&store, &broken);

        assert!(result.unsaved);
        assert!(result.state.is_none());
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(store.backend().write_count(), writes);
        assert_eq!(get(&store), before);
    }

    #[test]
    fn import_rejects_current_version_with_broken_invariants() {
        let (store, _clock) = mem_store();
        let mut broken = RetentionState::new(1);
        broken.stats.batch_extractions = 3;
        let json = serde_json::to_string(&broken).unwrap();

        let err = import(&store, &json).unwrap_err();
        assert!(matches!(err, RetentionError::InvalidState(_)));
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn import_rejects_garbage() {
        let (store, _clock) = mem_store();
        assert!(matches!(
            import(&store, "not json at all"),
            Err(RetentionError::Serialization(_))
        ));
    }
}
