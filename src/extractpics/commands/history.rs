use crate::clock::Clock;
use crate::commands::{persist, CmdMessage, CmdResult};
use crate::model::{HistoryEntry, NewHistoryEntry, MAX_HISTORY};
use crate::store::{RetentionStore, StorageBackend};
use uuid::Uuid;

/// `<now-ms>-<12 random hex chars>`
fn generate_id(now: i64) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", now, &suffix[..12])
}

pub fn add<B: StorageBackend, C: Clock>(
    store: &RetentionStore<B, C>,
    entry: NewHistoryEntry,
) -> CmdResult {
    let mut state = store.load();
    let entry = entry.into_entry(generate_id(store.now()));

    state.history.insert(0, entry.clone());
    state.history.truncate(MAX_HISTORY);

    let mut result = CmdResult::default();
    persist(store, &state, &mut result);
    result.add_message(CmdMessage::success(format!(
        "Recorded {} image(s) from {}",
        entry.image_count, entry.url
    )));
    result.with_affected_entries(vec![entry])
}

pub fn list<B: StorageBackend, C: Clock>(store: &RetentionStore<B, C>) -> Vec<HistoryEntry> {
    store.load().history
}

pub fn clear<B: StorageBackend, C: Clock>(store: &RetentionStore<B, C>) -> CmdResult {
    let mut state = store.load();
    let removed = std::mem::take(&mut state.history);

    let mut result = CmdResult::default();
    persist(store, &state, &mut result);
    result.add_message(CmdMessage::success(format!(
        "Cleared {} history entr{}",
        removed.len(),
        if removed.len() == 1 { "y" } else { "ies" }
    )));
    result.with_affected_entries(removed)
}

/// Unknown ids leave the stored record untouched (no write happens).
pub fn remove<B: StorageBackend, C: Clock>(store: &RetentionStore<B, C>, id: &str) -> CmdResult {
    let mut state = store.load();
    let mut result = CmdResult::default();

    let Some(pos) = state.history.iter().position(|e| e.id == id) else {
        result.add_message(CmdMessage::info(format!("No history entry with id {}", id)));
        return result;
    };

    let removed = state.history.remove(pos);
    persist(store, &state, &mut result);
    result.add_message(CmdMessage::success(format!("Removed {}", removed.url)));
    result.with_affected_entries(vec![removed])
}
