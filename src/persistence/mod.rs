//! Board persistence
//!
//! The whole board is one JSON record under a single fixed key. Writes
//! overwrite; reset removes the key. Storage failures are reported as
//! `StoreError` and never touch the in-memory board.

pub mod error;
pub mod record;
pub mod store;

pub use error::StoreError;
pub use record::PersistedRecord;
#[cfg(target_arch = "wasm32")]
pub use store::LocalStorage;
pub use store::{MemoryStorage, ScoreboardStore, StorageBackend};
