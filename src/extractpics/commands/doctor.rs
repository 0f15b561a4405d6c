use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult};
use crate::store::{RetentionStore, StorageBackend, StorageHealth};

/// Report what is stored under the key. Never modifies storage.
pub fn run<B: StorageBackend, C: Clock>(store: &RetentionStore<B, C>) -> CmdResult {
    let health = store.inspect();
    let mut result = CmdResult::default();

    result.add_message(match &health {
        StorageHealth::Healthy { history_len } => CmdMessage::success(format!(
            "Retention state is healthy ({} history entries).",
            history_len
        )),
        StorageHealth::Missing => {
            CmdMessage::info("No retention state stored yet; defaults will be used.")
        }
        StorageHealth::Unavailable(reason) => {
            CmdMessage::error(format!("Storage is unavailable: {}", reason))
        }
        StorageHealth::Corrupt(reason) => CmdMessage::warning(format!(
            "Stored state is not valid JSON and will be replaced by defaults: {}",
            reason
        )),
        StorageHealth::VersionMismatch { found } => CmdMessage::warning(format!(
            "Stored state has schema version {} and will be replaced by defaults.",
            found.map_or_else(|| "none".to_string(), |v| v.to_string())
        )),
        StorageHealth::Invalid(reason) => CmdMessage::warning(format!(
            "Stored state does not match the schema and will be replaced by defaults: {}",
            reason
        )),
    });

    result.health = Some(health);
    result
}
