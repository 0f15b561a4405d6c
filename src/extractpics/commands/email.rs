use crate::clock::Clock;
use crate::commands::{persist, CmdMessage, CmdResult};
use crate::model::{RetentionState, EMAIL_CAPTURE_THRESHOLD};
use crate::store::{RetentionStore, StorageBackend};

pub fn is_due(state: &RetentionState) -> bool {
    state.email_captured_at.is_none()
        && !state.email_capture_shown
        && state.stats.total_extractions >= EMAIL_CAPTURE_THRESHOLD
}

pub fn should_show<B: StorageBackend, C: Clock>(store: &RetentionStore<B, C>) -> bool {
    is_due(&store.load())
}

pub fn mark_shown<B: StorageBackend, C: Clock>(store: &RetentionStore<B, C>) -> CmdResult {
    let mut state = store.load();
    let mut result = CmdResult::default();
    if state.email_capture_shown {
        result.add_message(CmdMessage::info("Email prompt already marked as shown."));
        return result;
    }

    state.email_capture_shown = true;
    persist(store, &state, &mut result);
    result.add_message(CmdMessage::success("Email prompt marked as shown."));
    result
}

/// Stamps the capture time once; later calls keep the first timestamp.
pub fn mark_captured<B: StorageBackend, C: Clock>(store: &RetentionStore<B, C>) -> CmdResult {
    let mut state = store.load();
    let mut result = CmdResult::default();
    if state.email_captured_at.is_some() {
        result.add_message(CmdMessage::info("Email already captured."));
        return result;
    }

    state.email_captured_at = Some(store.now());
    persist(store, &state, &mut result);
    result.add_message(CmdMessage::success("Email capture recorded."));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::stats::record_extraction;
    use crate::test_utils::{mem_store, T0};

    fn extract(store: &crate::test_utils::TestStore, times: u64) {
        for _ in 0..times {
            record_extraction(store, 1, false, false);
        }
    }

    #[test]
    fn gate_opens_at_threshold() {
        let (store, _clock) = mem_store();
        extract(&store, EMAIL_CAPTURE_THRESHOLD - 1);
        assert!(!should_show(&store));

        extract(&store, 1);
        assert!(should_show(&store));
    }

    #[test]
    fn shown_closes_gate() {
        let (store, _clock) = mem_store();
        extract(&store, 8);
        mark_shown(&store);

        assert!(!should_show(&store));
        assert!(store.load().email_capture_shown);
    }

    #[test]
    fn captured_closes_gate_even_before_threshold() {
        let (store, clock) = mem_store();
        clock.advance(42);
        mark_captured(&store);
        extract(&store, 10);

        assert!(!should_show(&store));
        assert_eq!(store.load().email_captured_at, Some(T0 + 42));
    }

    #[test]
    fn captured_timestamp_is_set_once() {
        let (store, clock) = mem_store();
        mark_captured(&store);
        clock.advance(5_000);
        let result = mark_captured(&store);

        assert_eq!(store.load().email_captured_at, Some(T0));
        assert!(!result.unsaved);
    }
}
