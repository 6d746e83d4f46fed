use crate::domain::ports::KeyValueStore;
use crate::utils::error::{HelperError, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex.lock().map_err(|_| HelperError::StorageError {
        message: "store lock poisoned".to_string(),
    })
}

const EMPTY_ORIGIN_STEM: &str = "@default";

/// Volatile store with an optional size quota (key + value bytes).
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.items)?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = lock(&self.items)?;

        if let Some(quota) = self.quota {
            let used: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = used + key.len() + value.len();
            if needed > quota {
                return Err(HelperError::QuotaExceeded { needed, quota });
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        lock(&self.items)?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        lock(&self.items)?.clear();
        Ok(())
    }
}

/// Persistent store: one JSON file per origin, rewritten on every mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    pub fn open<P: AsRef<Path>>(dir: P, origin: &str) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let path = dir.join(format!("{}.json", sanitize_origin(origin)));
        let items = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!("Opened store {} ({} keys)", path.display(), items.len());

        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(lock(&self.items)?.keys().cloned().collect())
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.items)?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = lock(&self.items)?;
        let previous = items.insert(key.to_string(), value.to_string());

        // 寫檔失敗時還原記憶體內容
        if let Err(e) = self.persist(&items) {
            match previous {
                Some(old) => items.insert(key.to_string(), old),
                None => items.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = lock(&self.items)?;
        if let Some(old) = items.remove(key) {
            if let Err(e) = self.persist(&items) {
                items.insert(key.to_string(), old);
                return Err(e);
            }
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut items = lock(&self.items)?;
        let previous = std::mem::take(&mut *items);
        if let Err(e) = self.persist(&items) {
            *items = previous;
            return Err(e);
        }
        Ok(())
    }
}

/// Percent-encodes `origin` into a file stem; distinct origins never share a file.
fn sanitize_origin(origin: &str) -> String {
    if origin.is_empty() {
        // '@' 一定會被編碼，不會與任何 origin 撞名
        return EMPTY_ORIGIN_STEM.to_string();
    }

    url::form_urlencoded::byte_serialize(origin.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_basic_operations() {
        let store = MemoryStore::new();
        store.set_item("theme", "\"dark\"").unwrap();
        assert_eq!(store.get_item("theme").unwrap().as_deref(), Some("\"dark\""));

        store.remove_item("theme").unwrap();
        assert_eq!(store.get_item("theme").unwrap(), None);

        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_quota() {
        let store = MemoryStore::with_quota(10);
        store.set_item("k", "12345").unwrap();
        // 覆寫同一個 key 時不重複計算舊值
        store.set_item("k", "123456789").unwrap();

        let err = store.set_item("other", "x").unwrap_err();
        assert!(matches!(err, HelperError::QuotaExceeded { quota: 10, .. }));
        assert_eq!(store.get_item("other").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileStore::open(dir.path(), "https://crm.example.ru").unwrap();
            store.set_item("filters", "{\"status\":\"new\"}").unwrap();
            store.set_item("page", "3").unwrap();
            store.remove_item("page").unwrap();
        }

        let store = FileStore::open(dir.path(), "https://crm.example.ru").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["filters".to_string()]);
        assert_eq!(
            store.get_item("filters").unwrap().as_deref(),
            Some("{\"status\":\"new\"}")
        );
    }

    #[test]
    fn test_file_store_is_scoped_by_origin() {
        let dir = TempDir::new().unwrap();
        let a = FileStore::open(dir.path(), "https://a.example").unwrap();
        let b = FileStore::open(dir.path(), "https://b.example").unwrap();

        a.set_item("key", "1").unwrap();
        assert_eq!(b.get_item("key").unwrap(), None);
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_file_store_rejects_corrupted_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("@default.json"), "{ not json").unwrap();

        let result = FileStore::open(dir.path(), "");
        assert!(matches!(result, Err(HelperError::SerializationError(_))));
    }

    #[test]
    fn test_sanitize_origin() {
        assert_eq!(
            sanitize_origin("https://crm.example.ru:8080"),
            "https%3A%2F%2Fcrm.example.ru%3A8080"
        );
        assert_eq!(sanitize_origin(""), "@default");
        assert_eq!(sanitize_origin("a*b"), "a%2Ab");
    }

    #[test]
    fn test_sanitize_origin_keeps_origins_apart() {
        let origins = [
            "https://a.b:1",
            "https___a.b_1",
            "https_//a.b:1",
            "default",
            "@default",
            "",
            "a%2Ab",
            "a*b",
        ];
        let stems: std::collections::HashSet<String> =
            origins.iter().map(|o| sanitize_origin(o)).collect();
        assert_eq!(stems.len(), origins.len());
    }

    #[test]
    fn test_file_store_rolls_back_failed_writes() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path(), "https://crm.example.ru").unwrap();
        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();

        // 以目錄佔住檔案路徑，讓之後的寫入失敗
        std::fs::remove_file(store.path()).unwrap();
        std::fs::create_dir(store.path()).unwrap();

        assert!(store.remove_item("a").is_err());
        assert!(store.clear().is_err());
        assert!(store.set_item("c", "3").is_err());
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.get_item("a").unwrap().as_deref(), Some("1"));
    }
}
