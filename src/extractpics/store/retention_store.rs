use super::backend::StorageBackend;
use crate::clock::{Clock, SystemClock};
use crate::error::{Result, RetentionError};
use crate::model::{RetentionState, DEFAULT_STORAGE_KEY, SCHEMA_VERSION};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Classification of whatever currently sits under the storage key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageHealth {
    /// Nothing stored yet.
    Missing,
    /// The backend refused the read.
    Unavailable(String),
    /// The stored value is not JSON.
    Corrupt(String),
    /// JSON with a `version` other than the current schema (or none at all).
    VersionMismatch { found: Option<u64> },
    /// Current version, but the record does not fit the schema or its invariants.
    Invalid(String),
    Healthy { history_len: usize },
}

impl StorageHealth {
    pub fn is_healthy(&self) -> bool {
        matches!(self, StorageHealth::Healthy { .. })
    }
}

type WriteErrorHook = Box<dyn Fn(&RetentionError)>;

/// Reads and writes the single [`RetentionState`] record through a backend.
///
/// Reads never fail: anything short of a well-formed record of the current
/// schema version is replaced by defaults. Writes come in two flavours,
/// [`save`](Self::save) which reports the error and [`commit`](Self::commit)
/// which logs it and carries on.
pub struct RetentionStore<B: StorageBackend, C: Clock = SystemClock> {
    pub(crate) backend: B,
    clock: C,
    key: String,
    pretty: bool,
    on_write_error: Option<WriteErrorHook>,
}

impl<B: StorageBackend> RetentionStore<B, SystemClock> {
    pub fn with_backend(backend: B) -> Self {
        Self::with_clock(backend, SystemClock)
    }
}

impl<B: StorageBackend, C: Clock> RetentionStore<B, C> {
    pub fn with_clock(backend: B, clock: C) -> Self {
        Self {
            backend,
            clock,
            key: DEFAULT_STORAGE_KEY.to_string(),
            pretty: false,
            on_write_error: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Register a callback invoked whenever [`commit`](Self::commit) drops a write.
    pub fn on_write_error(mut self, hook: impl Fn(&RetentionError) + 'static) -> Self {
        self.on_write_error = Some(Box::new(hook));
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn now(&self) -> i64 {
        self.clock.now_ms()
    }

    pub fn defaults(&self) -> RetentionState {
        RetentionState::new(self.now())
    }

    /// Current state, or defaults if the stored record is absent or unusable.
    pub fn load(&self) -> RetentionState {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no retention state stored, using defaults");
                return self.defaults();
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "retention storage unreadable, using defaults");
                return self.defaults();
            }
        };

        match decode(&raw) {
            Ok(state) => state,
            Err(RetentionError::VersionMismatch { found, expected }) => {
                info!(
                    key = %self.key,
                    ?found,
                    expected,
                    "retention schema changed, discarding stored state"
                );
                self.defaults()
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "stored retention state is unusable, using defaults");
                self.defaults()
            }
        }
    }

    /// Serialize and write the full record.
    pub fn save(&self, state: &RetentionState) -> Result<()> {
        let content = if self.pretty {
            serde_json::to_string_pretty(state)
        } else {
            serde_json::to_string(state)
        }
        .map_err(RetentionError::Serialization)?;
        self.backend.set(&self.key, &content)
    }

    /// [`save`](Self::save) that never fails the caller. Returns whether the
    /// write landed.
    pub fn commit(&self, state: &RetentionState) -> bool {
        match self.save(state) {
            Ok(()) => true,
            Err(err) => {
                warn!(key = %self.key, error = %err, "dropping retention state write");
                if let Some(hook) = &self.on_write_error {
                    hook(&err);
                }
                false
            }
        }
    }

    pub fn inspect(&self) -> StorageHealth {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return StorageHealth::Missing,
            Err(err) => return StorageHealth::Unavailable(err.to_string()),
        };
        let value = match parse_raw(&raw) {
            Ok(value) => value,
            Err(err) => return StorageHealth::Corrupt(err.to_string()),
        };
        if let Err(found) = check_version(&value) {
            return StorageHealth::VersionMismatch { found };
        }
        match into_state(value) {
            Ok(state) => StorageHealth::Healthy {
                history_len: state.history.len(),
            },
            Err(err) => StorageHealth::Invalid(err.to_string()),
        }
    }
}

/// Decode a raw stored record, rejecting anything but a valid current-version state.
pub fn decode(raw: &str) -> Result<RetentionState> {
    let value = parse_raw(raw)?;
    check_version(&value).map_err(|found| RetentionError::VersionMismatch {
        found,
        expected: SCHEMA_VERSION,
    })?;
    into_state(value)
}

fn parse_raw(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).map_err(RetentionError::Serialization)
}

fn check_version(value: &Value) -> std::result::Result<(), Option<u64>> {
    let found = value.get("version").and_then(Value::as_u64);
    if found == Some(u64::from(SCHEMA_VERSION)) {
        Ok(())
    } else {
        Err(found)
    }
}

fn into_state(value: Value) -> Result<RetentionState> {
    let state: RetentionState =
        serde_json::from_value(value).map_err(RetentionError::Serialization)?;
    state.validate()?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::model::{NewHistoryEntry, ScanMode};
    use crate::store::mem_backend::MemBackend;
    use std::cell::Cell;
    use std::rc::Rc;

    const NOW: i64 = 1_700_000_000_000;

    fn store() -> RetentionStore<MemBackend, ManualClock> {
        RetentionStore::with_clock(MemBackend::new(), ManualClock::new(NOW))
    }

    #[test]
    fn load_missing_returns_defaults() {
        let store = store();
        assert_eq!(store.load(), RetentionState::new(NOW));
        assert_eq!(store.inspect(), StorageHealth::Missing);
    }

    #[test]
    fn save_then_load_roundtrips() {
        let store = store();
        let mut state = RetentionState::new(5);
        state.history.push(
            NewHistoryEntry::new("https://a.test", 9, 4, ScanMode::Quick)
                .with_thumbnail("https://a.test/t.png")
                .into_entry("9-x".into()),
        );
        state.email_captured_at = Some(77);

        store.save(&state).unwrap();
        assert_eq!(store.load(), state);
        assert_eq!(store.inspect(), StorageHealth::Healthy { history_len: 1 });
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let store = store();
        store.backend().insert_raw(DEFAULT_STORAGE_KEY, "{not json");
        assert_eq!(store.load(), RetentionState::new(NOW));
        assert!(matches!(store.inspect(), StorageHealth::Corrupt(_)));
    }

    #[test]
    fn older_version_falls_back_to_defaults() {
        let store = store();
        let mut old = RetentionState::new(1);
        old.stats.total_extractions = 12;
        old.version = SCHEMA_VERSION - 1;
        store
            .backend()
            .insert_raw(DEFAULT_STORAGE_KEY, &serde_json::to_string(&old).unwrap());

        assert_eq!(store.load(), RetentionState::new(NOW));
        assert_eq!(
            store.inspect(),
            StorageHealth::VersionMismatch {
                found: Some(u64::from(SCHEMA_VERSION - 1))
            }
        );
    }

    #[test]
    fn missing_version_is_a_mismatch() {
        let store = store();
        store.backend().insert_raw(DEFAULT_STORAGE_KEY, r#"{"history": []}"#);
        assert_eq!(store.load(), RetentionState::new(NOW));
        assert_eq!(
            store.inspect(),
            StorageHealth::VersionMismatch { found: None }
        );
    }

    #[test]
    fn partial_record_is_never_returned() {
        let store = store();
        store
            .backend()
            .insert_raw(DEFAULT_STORAGE_KEY, r#"{"version": 1, "history": []}"#);
        assert_eq!(store.load(), RetentionState::new(NOW));
        assert!(matches!(store.inspect(), StorageHealth::Invalid(_)));
    }

    #[test]
    fn unavailable_storage_reads_defaults() {
        let store = store();
        store.save(&RetentionState::new(3)).unwrap();
        store.backend().set_simulate_unavailable(true);

        assert_eq!(store.load(), RetentionState::new(NOW));
        assert!(matches!(store.inspect(), StorageHealth::Unavailable(_)));
    }

    #[test]
    fn commit_swallows_write_errors_and_calls_hook() {
        let failures = Rc::new(Cell::new(0));
        let seen = failures.clone();
        let store = store().on_write_error(move |_| seen.set(seen.get() + 1));
        store.backend().set_simulate_write_error(true);

        assert!(!store.commit(&RetentionState::new(1)));
        assert!(store.save(&RetentionState::new(1)).is_err());
        assert_eq!(failures.get(), 1);
        assert_eq!(store.backend().raw(DEFAULT_STORAGE_KEY), None);
    }

    #[test]
    fn custom_key_and_pretty_output() {
        let store = store().with_key("other").with_pretty_json(true);
        assert!(store.commit(&RetentionState::new(1)));

        let raw = store.backend().raw("other").unwrap();
        assert!(raw.contains('\n'));
        assert_eq!(store.backend().raw(DEFAULT_STORAGE_KEY), None);
    }
}
