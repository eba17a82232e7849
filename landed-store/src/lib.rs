pub mod autosave;
pub mod decode;
pub mod hydrate;
pub mod kv;

pub use autosave::{Autosaver, WRITE_DEBOUNCE};
pub use hydrate::{
    FX_KEY, FX_TTL_MS, FxSnapshot, PersistedState, STATE_KEY, STATE_TTL_MS, hydrate,
    load_fx_snapshot, persist, persist_fx,
};
pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
