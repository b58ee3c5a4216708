//! Durable per-user records backed by a whole-file JSON snapshot.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use skycast_core::StoreError;
use skycast_geo::Location;

/// Opaque numeric user identifier; stored under its decimal string form.
pub type UserId = i64;

/// Durable state for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The location most recently confirmed for this user.
    #[serde(default)]
    pub current: Option<Location>,
    /// Unique by location id, insertion order preserved.
    #[serde(default)]
    pub favorites: Vec<Location>,
}

impl UserRecord {
    pub fn is_favorite(&self, location_id: &str) -> bool {
        self.favorites.iter().any(|c| c.id == location_id)
    }
}

/// File-backed store of all user records.
///
/// The in-memory map is authoritative; every mutation rewrites the whole
/// snapshot. The mutex serializes mutations so no two writes interleave on
/// the backing file. Per-user event ordering is the caller's concern.
pub struct UserStore {
    path: PathBuf,
    users: Mutex<HashMap<String, UserRecord>>,
}

impl UserStore {
    /// Open the store, loading the snapshot if one exists.
    ///
    /// A missing file starts an empty store. An unreadable or malformed
    /// file is a fatal condition: the process must not run with unknown
    /// user state.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let users = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
        } else {
            HashMap::new()
        };

        tracing::info!(path = %path.display(), "user store opened");
        Ok(Self {
            path,
            users: Mutex::new(users),
        })
    }

    /// Fetch a user's record, creating and persisting a default one on
    /// first sight.
    pub fn get_or_create(&self, user: UserId) -> Result<UserRecord, StoreError> {
        let mut users = self.users.lock();
        let key = user.to_string();
        if !users.contains_key(&key) {
            users.insert(key.clone(), UserRecord::default());
            self.flush(&users)?;
        }
        Ok(users.get(&key).cloned().unwrap_or_default())
    }

    /// Set the user's current location.
    pub fn set_current(&self, user: UserId, location: Location) -> Result<(), StoreError> {
        let mut users = self.users.lock();
        users.entry(user.to_string()).or_default().current = Some(location);
        self.flush(&users)
    }

    /// Add a location to the user's favorites.
    ///
    /// Idempotent by location id: returns false and writes nothing when a
    /// favorite with the same id is already present.
    pub fn add_favorite(&self, user: UserId, location: Location) -> Result<bool, StoreError> {
        let mut users = self.users.lock();
        let record = users.entry(user.to_string()).or_default();
        if record.is_favorite(&location.id) {
            return Ok(false);
        }
        record.favorites.push(location);
        self.flush(&users)?;
        Ok(true)
    }

    /// Remove a favorite by location id. No-op when absent.
    pub fn remove_favorite(&self, user: UserId, location_id: &str) -> Result<bool, StoreError> {
        let mut users = self.users.lock();
        let record = users.entry(user.to_string()).or_default();
        let before = record.favorites.len();
        record.favorites.retain(|c| c.id != location_id);
        if record.favorites.len() == before {
            return Ok(false);
        }
        self.flush(&users)?;
        Ok(true)
    }

    /// Rewrite the whole snapshot atomically: write a temp sibling, then
    /// rename over the live file.
    fn flush(&self, users: &HashMap<String, UserRecord>) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(users)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use tempfile::TempDir;

    fn berlin() -> Location {
        Location {
            id: "2950159".to_string(),
            name: "Berlin".to_string(),
            country: "Germany".to_string(),
            admin1: "Berlin".to_string(),
            latitude: 52.52437,
            longitude: 13.41053,
        }
    }

    fn hamburg() -> Location {
        Location {
            id: "2911298".to_string(),
            name: "Hamburg".to_string(),
            country: "Germany".to_string(),
            admin1: "Hamburg".to_string(),
            latitude: 53.55073,
            longitude: 9.99302,
        }
    }

    fn open_store(dir: &TempDir) -> UserStore {
        UserStore::open(dir.path().join("users.json")).unwrap()
    }

    #[test]
    fn test_get_or_create_persists_default_record() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let record = store.get_or_create(7).unwrap();
        assert!(record.current.is_none());
        assert!(record.favorites.is_empty());

        // The lazily created record survives a reload.
        let reopened = open_store(&dir);
        assert_eq!(reopened.get_or_create(7).unwrap(), record);
    }

    #[test]
    fn test_set_current_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        store.set_current(7, berlin()).unwrap();

        let reopened = open_store(&dir);
        let record = reopened.get_or_create(7).unwrap();
        assert_eq!(record.current, Some(berlin()));
    }

    #[test]
    fn test_add_favorite_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        assert!(store.add_favorite(7, berlin()).unwrap());
        assert!(!store.add_favorite(7, berlin()).unwrap());

        let record = store.get_or_create(7).unwrap();
        assert_eq!(record.favorites.len(), 1);
    }

    #[test]
    fn test_favorites_preserve_insertion_order() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        store.add_favorite(7, berlin()).unwrap();
        store.add_favorite(7, hamburg()).unwrap();

        let reopened = open_store(&dir);
        let record = reopened.get_or_create(7).unwrap();
        assert_eq!(record.favorites, vec![berlin(), hamburg()]);
    }

    #[test]
    fn test_remove_favorite_absent_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        store.add_favorite(7, berlin()).unwrap();
        assert!(!store.remove_favorite(7, "no-such-id").unwrap());
        assert_eq!(store.get_or_create(7).unwrap().favorites.len(), 1);

        assert!(store.remove_favorite(7, "2950159").unwrap());
        assert!(store.get_or_create(7).unwrap().favorites.is_empty());
    }

    #[test]
    fn test_users_are_independent() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        store.add_favorite(1, berlin()).unwrap();
        store.set_current(2, hamburg()).unwrap();

        let one = store.get_or_create(1).unwrap();
        let two = store.get_or_create(2).unwrap();
        assert!(one.current.is_none());
        assert_eq!(one.favorites.len(), 1);
        assert_eq!(two.current, Some(hamburg()));
        assert!(two.favorites.is_empty());
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert!(store.get_or_create(1).unwrap().favorites.is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = UserStore::open(&path);
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_snapshot_is_keyed_by_string_user_id() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.set_current(42, berlin()).unwrap();

        let contents = std::fs::read_to_string(dir.path().join("users.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert!(value.get("42").is_some());
    }
}
