//! Key-value storage seam and the board's save/load/clear contract

use std::collections::HashMap;

use super::error::StoreError;
use super::record::PersistedRecord;
use crate::board::ScoreboardState;
use crate::consts::STORAGE_KEY;

/// String key-value storage, shaped after the browser's `Storage` API
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory storage for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// Grab the window's LocalStorage. Missing storage (e.g. blocked by the
    /// browser) is reported on each operation rather than here.
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - scoreboard will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StoreError> {
        self.storage.as_ref().ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl StorageBackend for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StoreError::Backend(format!("{:?}", e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Backend(format!("{:?}", e)))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StoreError::Backend(format!("{:?}", e)))
    }
}

/// Saves and restores the whole board under `STORAGE_KEY`
pub struct ScoreboardStore<S: StorageBackend> {
    backend: S,
}

impl<S: StorageBackend> ScoreboardStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    /// Overwrite the stored record with `state`
    pub fn save(&mut self, state: &ScoreboardState) -> Result<(), StoreError> {
        let json = PersistedRecord::from(state).encode()?;
        self.backend.set_item(STORAGE_KEY, &json)?;
        log::debug!(
            "Scoreboard saved ({} - {})",
            state.team_one.score,
            state.team_two.score
        );
        Ok(())
    }

    /// Read the stored board. `Ok(None)` means nothing usable was saved.
    pub fn load(&self) -> Result<Option<ScoreboardState>, StoreError> {
        let Some(text) = self.backend.get_item(STORAGE_KEY)? else {
            log::info!("No saved scoreboard found");
            return Ok(None);
        };
        let state = PersistedRecord::decode(&text).map(ScoreboardState::from);
        if let Some(ref s) = state {
            log::info!(
                "Restored scoreboard ({} - {})",
                s.team_one.score,
                s.team_two.score
            );
        }
        Ok(state)
    }

    /// Remove the stored record entirely
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.backend.remove_item(STORAGE_KEY)?;
        log::info!("Saved scoreboard cleared");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::board::Team;
    use proptest::prelude::*;

    /// Backend that rejects writes, like a full LocalStorage quota
    #[derive(Default)]
    pub(crate) struct FullStorage {
        pub inner: MemoryStorage,
    }

    impl StorageBackend for FullStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("QuotaExceededError".to_string()))
        }

        fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
            self.inner.remove_item(key)
        }
    }

    #[test]
    fn test_load_empty_is_none() {
        let store = ScoreboardStore::new(MemoryStorage::new());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = ScoreboardStore::new(MemoryStorage::new());
        let mut state = ScoreboardState::new();
        state.set_name(Team::One, "Ørn & \"Co\" <3");
        state.adjust_score(Team::One, 4);
        state.adjust_score(Team::One, -1);
        state.adjust_score(Team::Two, 1);
        state.declare_winner();

        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), Some(state));
    }

    #[test]
    fn test_save_overwrites() {
        let mut store = ScoreboardStore::new(MemoryStorage::new());
        let mut state = ScoreboardState::new();
        store.save(&state).unwrap();
        state.adjust_score(Team::Two, 9);
        store.save(&state).unwrap();
        assert_eq!(store.backend().len(), 1);
        assert_eq!(store.load().unwrap().unwrap().team_two.score, 9);
    }

    #[test]
    fn test_clear_forgets_state() {
        let mut store = ScoreboardStore::new(MemoryStorage::new());
        let mut state = ScoreboardState::new();
        state.adjust_score(Team::One, 3);
        store.save(&state).unwrap();

        state.reset();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(store.load().unwrap().unwrap_or_default(), ScoreboardState::new());
    }

    #[test]
    fn test_malformed_record_loads_as_none() {
        let mut backend = MemoryStorage::new();
        backend.set_item(STORAGE_KEY, "{oops").unwrap();
        let store = ScoreboardStore::new(backend);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_blank_name_survives_round_trip() {
        let mut store = ScoreboardStore::new(MemoryStorage::new());
        let mut state = ScoreboardState::new();
        state.set_name(Team::One, "   ");
        store.save(&state).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.name(Team::One), "   ");
        assert_eq!(loaded.display_name(Team::One), "Team A");
    }

    #[test]
    fn test_failed_save_reports_error() {
        let mut store = ScoreboardStore::new(FullStorage::default());
        let err = store.save(&ScoreboardState::new()).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            score_one in any::<u32>(),
            score_two in any::<u32>(),
            name_one in ".*",
            name_two in "\\PC*",
            winner in prop::option::of(prop::bool::ANY),
        ) {
            let mut state = ScoreboardState::new();
            state.team_one.score = score_one;
            state.team_two.score = score_two;
            state.set_name(Team::One, name_one);
            state.set_name(Team::Two, name_two);
            match winner {
                Some(true) => state.team_one.is_winner = true,
                Some(false) => state.team_two.is_winner = true,
                None => {}
            }

            let mut store = ScoreboardStore::new(MemoryStorage::new());
            store.save(&state).unwrap();
            prop_assert_eq!(store.load().unwrap(), Some(state));
        }
    }
}
