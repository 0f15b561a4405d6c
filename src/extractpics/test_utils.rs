use crate::clock::ManualClock;
use crate::store::mem_backend::MemBackend;
use crate::store::RetentionStore;
use std::rc::Rc;

pub const T0: i64 = 1_700_000_000_000;

pub type TestStore = RetentionStore<MemBackend, Rc<ManualClock>>;

/// In-memory store plus a handle on its clock, starting at [`T0`].
pub fn mem_store() -> (TestStore, Rc<ManualClock>) {
    let clock = Rc::new(ManualClock::new(T0));
    let store = RetentionStore::with_clock(MemBackend::new(), clock.clone());
    (store, clock)
}
