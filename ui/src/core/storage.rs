//! Local persistence: identity registry, remembered user and per-user scan
//! history, all kept as JSON strings in a key-value store.
//!
//! Every read and write touches a single key; there are no multi-key
//! transactions and the last write wins.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use api::ScanHistoryItem;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

pub const USERS_KEY: &str = "eco-sort-users";
pub const REMEMBERED_USER_KEY: &str = "eco-sort-remembered-user";
pub const HISTORY_KEY: &str = "eco-sort-history";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("`{key}` holds unreadable data: {reason}")]
    Corrupt { key: String, reason: String },
    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process store, used in tests and when no durable backend is reachable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{KeyValueStore, StorageError};

    /// `window.localStorage`.
    pub struct BrowserStore {
        storage: web_sys::Storage,
    }

    impl BrowserStore {
        pub fn open() -> Result<Self, StorageError> {
            let storage = web_sys::window()
                .ok_or_else(|| StorageError::Unavailable("window unavailable".into()))?
                .local_storage()
                .map_err(|_| StorageError::Unavailable("localStorage access denied".into()))?
                .ok_or_else(|| StorageError::Unavailable("localStorage missing".into()))?;
            Ok(Self { storage })
        }
    }

    impl KeyValueStore for BrowserStore {
        fn get(&self, key: &str) -> Option<String> {
            self.storage.get_item(key).ok().flatten()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.storage
                .set_item(key, value)
                .map_err(|err| StorageError::Write {
                    key: key.to_string(),
                    reason: format!("{err:?}"),
                })
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.storage
                .remove_item(key)
                .map_err(|err| StorageError::Write {
                    key: key.to_string(),
                    reason: format!("{err:?}"),
                })
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    use tracing::warn;

    use super::{KeyValueStore, StorageError};

    /// Whole-map JSON file, rewritten on every change.
    pub struct FileStore {
        path: PathBuf,
        entries: RefCell<BTreeMap<String, String>>,
    }

    impl FileStore {
        /// Store under the platform data directory.
        pub fn open_default() -> Result<Self, StorageError> {
            let dirs = directories::ProjectDirs::from("org", "EcoSort", "EcoSort")
                .ok_or_else(|| StorageError::Unavailable("no home directory".into()))?;
            Self::open(dirs.data_dir().join("store.json"))
        }

        pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
            let path = path.into();
            let entries = match std::fs::read_to_string(&path) {
                Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                    warn!("Ignoring unreadable store {}: {err}", path.display());
                    BTreeMap::new()
                }),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
                Err(err) => return Err(StorageError::Unavailable(err.to_string())),
            };
            Ok(Self {
                path,
                entries: RefCell::new(entries),
            })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        /// Write `staged` to disk, then make it the in-memory state.
        fn commit(&self, key: &str, staged: BTreeMap<String, String>) -> Result<(), StorageError> {
            let write_err = |reason: String| StorageError::Write {
                key: key.to_string(),
                reason,
            };
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
            }
            let raw = serde_json::to_string_pretty(&staged).map_err(|e| write_err(e.to_string()))?;
            std::fs::write(&self.path, raw).map_err(|e| write_err(e.to_string()))?;
            *self.entries.borrow_mut() = staged;
            Ok(())
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            let mut staged = self.entries.borrow().clone();
            staged.insert(key.to_string(), value.to_string());
            self.commit(key, staged)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            let mut staged = self.entries.borrow().clone();
            staged.remove(key);
            self.commit(key, staged)
        }
    }
}

/// Best durable store for the running platform, falling back to memory.
pub fn platform_store() -> Rc<dyn KeyValueStore> {
    #[cfg(target_arch = "wasm32")]
    let opened = BrowserStore::open().map(|s| Rc::new(s) as Rc<dyn KeyValueStore>);
    #[cfg(not(target_arch = "wasm32"))]
    let opened = FileStore::open_default().map(|s| Rc::new(s) as Rc<dyn KeyValueStore>);

    opened.unwrap_or_else(|err| {
        warn!("Falling back to in-memory storage: {err}");
        Rc::new(MemoryStore::new())
    })
}

/// Typed access to the app's keys.
#[derive(Clone)]
pub struct AppStorage {
    kv: Rc<dyn KeyValueStore>,
    history_limit: usize,
}

impl AppStorage {
    pub fn new(kv: Rc<dyn KeyValueStore>, history_limit: usize) -> Self {
        Self { kv, history_limit }
    }

    pub fn in_memory(history_limit: usize) -> Self {
        Self::new(Rc::new(MemoryStore::new()), history_limit)
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    pub fn registered_identities(&self) -> Vec<String> {
        self.kv
            .get(USERS_KEY)
            .and_then(|raw| {
                serde_json::from_str(&raw)
                    .inspect_err(|err| warn!("Identity registry is unreadable: {err}"))
                    .ok()
            })
            .unwrap_or_default()
    }

    pub fn is_registered(&self, identity: &str) -> bool {
        self.registered_identities().iter().any(|i| i == identity)
    }

    pub fn register_identity(&self, identity: &str) -> Result<(), StorageError> {
        let mut users = self.registered_identities();
        users.push(identity.to_string());
        self.write_json(USERS_KEY, &users)
    }

    pub fn remembered_user(&self) -> Option<String> {
        self.kv.get(REMEMBERED_USER_KEY).filter(|u| !u.is_empty())
    }

    pub fn remember_user(&self, identity: &str) -> Result<(), StorageError> {
        self.kv.set(REMEMBERED_USER_KEY, identity)
    }

    pub fn forget_user(&self) -> Result<(), StorageError> {
        self.kv.remove(REMEMBERED_USER_KEY)
    }

    /// Newest-first history for `user`. Entries that no longer decode are
    /// skipped; an unreadable archive reads as empty.
    pub fn load_history(&self, user: &str) -> Vec<ScanHistoryItem> {
        let entries = match self.history_archive() {
            Ok(archive) => archive.get(user).cloned(),
            Err(err) => {
                warn!("{err}");
                None
            }
        };
        let Some(Value::Array(entries)) = entries else {
            return Vec::new();
        };
        entries
            .into_iter()
            .filter_map(|entry| {
                serde_json::from_value(entry)
                    .inspect_err(|err| warn!("Skipping unreadable scan for {user}: {err}"))
                    .ok()
            })
            .collect()
    }

    /// Put `item` first in `user`'s history, trimming to the configured cap.
    /// Stored entries are kept as-is, readable or not. Nothing is written
    /// when the archive itself cannot be parsed. Returns the stored length.
    pub fn prepend_history(&self, user: &str, item: ScanHistoryItem) -> Result<usize, StorageError> {
        let mut archive = self.history_archive()?;
        let mut entries = match archive.get(user).cloned() {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                return Err(StorageError::Corrupt {
                    key: HISTORY_KEY.to_string(),
                    reason: format!("history for {user} is not a list"),
                })
            }
        };

        let encoded = serde_json::to_value(&item).map_err(|source| StorageError::Encode {
            key: HISTORY_KEY.to_string(),
            source,
        })?;
        entries.insert(0, encoded);
        entries.truncate(self.history_limit);
        let len = entries.len();

        archive.insert(user.to_string(), Value::Array(entries));
        self.write_json(HISTORY_KEY, &archive)?;
        Ok(len)
    }

    fn history_archive(&self) -> Result<Map<String, Value>, StorageError> {
        match self.kv.get(HISTORY_KEY) {
            None => Ok(Map::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|err| StorageError::Corrupt {
                key: HISTORY_KEY.to_string(),
                reason: err.to_string(),
            }),
        }
    }

    fn write_json<T: serde::Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.kv.set(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> ScanHistoryItem {
        ScanHistoryItem {
            id: id.into(),
            timestamp: 0,
            thumbnail: String::new(),
            results: Vec::new(),
        }
    }

    #[test]
    fn registry_round_trips_through_json() {
        let storage = AppStorage::in_memory(50);
        assert!(!storage.is_registered("ada@example.com"));
        storage.register_identity("ada@example.com").unwrap();
        storage.register_identity("bob@example.com").unwrap();
        assert_eq!(
            storage.registered_identities(),
            vec!["ada@example.com", "bob@example.com"]
        );
    }

    #[test]
    fn corrupt_registry_reads_as_empty() {
        let kv = Rc::new(MemoryStore::new());
        kv.set(USERS_KEY, "{not json").unwrap();
        let storage = AppStorage::new(kv, 50);
        assert!(storage.registered_identities().is_empty());
    }

    #[test]
    fn remembered_user_is_cleared_by_forget() {
        let storage = AppStorage::in_memory(50);
        storage.remember_user("ada@example.com").unwrap();
        assert_eq!(storage.remembered_user().as_deref(), Some("ada@example.com"));
        storage.forget_user().unwrap();
        assert_eq!(storage.remembered_user(), None);
    }

    #[test]
    fn history_is_capped_newest_first_per_user() {
        let storage = AppStorage::in_memory(50);
        assert_eq!(storage.history_limit(), 50);
        for n in 0..51 {
            storage.prepend_history("ada", item(&format!("scan_{n}"))).unwrap();
        }
        storage.prepend_history("bob", item("bob_1")).unwrap();

        let ada = storage.load_history("ada");
        assert_eq!(ada.len(), 50);
        assert_eq!(ada[0].id, "scan_50");
        assert_eq!(ada[49].id, "scan_1");
        assert!(ada.iter().all(|i| i.id != "scan_0"));
        assert_eq!(storage.load_history("bob").len(), 1);
        assert!(storage.load_history("carol").is_empty());
    }

    #[test]
    fn archive_keeps_user_insertion_order() {
        let kv = Rc::new(MemoryStore::new());
        let storage = AppStorage::new(kv.clone(), 50);
        storage.prepend_history("zed", item("z")).unwrap();
        storage.prepend_history("amy", item("a")).unwrap();
        let raw = kv.get(HISTORY_KEY).unwrap();
        assert!(raw.find("zed").unwrap() < raw.find("amy").unwrap());
    }

    #[test]
    fn prepend_keeps_unreadable_entries_of_every_user() {
        let kv = Rc::new(MemoryStore::new());
        let seeded = serde_json::json!({
            "ada": [
                { "id": "old_1", "timestamp": 1, "thumbnail": "", "results": [] },
                { "id": "old_2", "timestamp": 2, "thumbnail": "" }
            ],
            "bob": [{ "id": "bob_1", "timestamp": 3 }]
        });
        kv.set(HISTORY_KEY, &seeded.to_string()).unwrap();
        let storage = AppStorage::new(kv.clone(), 50);

        assert_eq!(storage.prepend_history("ada", item("new")).unwrap(), 3);

        let archive: Value = serde_json::from_str(&kv.get(HISTORY_KEY).unwrap()).unwrap();
        let ids: Vec<&str> = archive["ada"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["new", "old_1", "old_2"]);
        assert_eq!(archive["bob"], seeded["bob"]);

        let ada: Vec<String> = storage.load_history("ada").into_iter().map(|i| i.id).collect();
        assert_eq!(ada, vec!["new", "old_1"]);
        assert!(storage.load_history("bob").is_empty());
    }

    #[test]
    fn unparseable_archive_blocks_history_writes() {
        let kv = Rc::new(MemoryStore::new());
        kv.set(HISTORY_KEY, "{not json").unwrap();
        let storage = AppStorage::new(kv.clone(), 50);

        let err = storage.prepend_history("ada", item("new")).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { ref key, .. } if key == HISTORY_KEY));
        assert_eq!(kv.get(HISTORY_KEY).as_deref(), Some("{not json"));
        assert!(storage.load_history("ada").is_empty());
    }

    #[test]
    fn non_list_history_is_left_alone() {
        let kv = Rc::new(MemoryStore::new());
        kv.set(HISTORY_KEY, r#"{"ada":"oops","bob":[]}"#).unwrap();
        let storage = AppStorage::new(kv.clone(), 50);

        assert!(storage.prepend_history("ada", item("new")).is_err());
        assert_eq!(storage.prepend_history("bob", item("b")).unwrap(), 1);
        let archive: Value = serde_json::from_str(&kv.get(HISTORY_KEY).unwrap()).unwrap();
        assert_eq!(archive["ada"], "oops");
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod file_store {
        use super::super::*;
        use std::path::PathBuf;

        fn scratch(name: &str) -> PathBuf {
            std::env::temp_dir().join(format!("ecosort-{name}-{}", uuid::Uuid::new_v4()))
        }

        #[test]
        fn entries_survive_reopen() {
            let dir = scratch("reopen");
            let store = FileStore::open(dir.join("store.json")).unwrap();
            store.set(USERS_KEY, r#"["ada@example.com"]"#).unwrap();
            store.set(REMEMBERED_USER_KEY, "ada@example.com").unwrap();
            store.remove(REMEMBERED_USER_KEY).unwrap();

            let reopened = FileStore::open(store.path()).unwrap();
            assert_eq!(reopened.get(USERS_KEY).as_deref(), Some(r#"["ada@example.com"]"#));
            assert_eq!(reopened.get(REMEMBERED_USER_KEY), None);
            std::fs::remove_dir_all(dir).unwrap();
        }

        #[test]
        fn failed_write_leaves_memory_unchanged() {
            let blocker = scratch("blocker");
            let store = FileStore::open(blocker.join("store.json")).unwrap();
            // A regular file where the parent directory should be.
            std::fs::write(&blocker, "").unwrap();

            assert!(matches!(
                store.set(REMEMBERED_USER_KEY, "ada@example.com"),
                Err(StorageError::Write { .. })
            ));
            assert_eq!(store.get(REMEMBERED_USER_KEY), None);
            std::fs::remove_file(blocker).unwrap();
        }
    }
}
