use front_helpers::domain::ports::KeyValueStore;
use front_helpers::{FileStore, JsonStorage, MemoryStore};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct DashboardState {
    period: String,
    widgets: Vec<String>,
    collapsed: bool,
    revenue_goal: f64,
}

fn sample_state() -> DashboardState {
    DashboardState {
        period: "month".to_string(),
        widgets: vec!["sales".to_string(), "tasks".to_string()],
        collapsed: true,
        revenue_goal: 1_250_000.5,
    }
}

#[test]
fn test_round_trip_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let origin = "https://crm.example.ru";

    {
        let storage = JsonStorage::new(FileStore::open(dir.path(), origin).unwrap());
        assert!(storage.set("dashboard", &sample_state()));
    }

    // 模擬重新載入頁面
    let storage = JsonStorage::new(FileStore::open(dir.path(), origin).unwrap());
    let restored: Option<DashboardState> = storage.get("dashboard", None);
    assert_eq!(restored, Some(sample_state()));
}

#[test]
fn test_missing_key_returns_supplied_default() {
    let storage = JsonStorage::new(MemoryStore::new());
    assert_eq!(storage.get("never-written", json!({"page": 1})), json!({"page": 1}));
    assert_eq!(storage.get("never-written", "fallback".to_string()), "fallback");
}

#[test]
fn test_corrupted_entry_on_disk_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path(), "https://crm.example.ru").unwrap();
    store.set_item("dashboard", "{\"period\":").unwrap();

    let storage = JsonStorage::new(store);
    let state = storage.get("dashboard", sample_state());
    assert_eq!(state, sample_state());
}

#[test]
fn test_remove_and_clear_persist() {
    let dir = TempDir::new().unwrap();
    let origin = "http://localhost:3000";

    {
        let storage = JsonStorage::new(FileStore::open(dir.path(), origin).unwrap());
        storage.set("a", &1);
        storage.set("b", &2);
        storage.set("c", &3);
        storage.remove("b");
    }

    let store = FileStore::open(dir.path(), origin).unwrap();
    assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "c".to_string()]);

    let storage = JsonStorage::new(store);
    storage.clear();

    let store = FileStore::open(dir.path(), origin).unwrap();
    assert!(store.keys().unwrap().is_empty());
}

#[test]
fn test_quota_failure_reports_false_and_keeps_old_value() {
    let storage = JsonStorage::new(MemoryStore::with_quota(32));
    assert!(storage.set("note", "короткая"));
    assert!(!storage.set("note", &"длинная заметка ".repeat(10)));
    assert_eq!(storage.get("note", String::new()), "короткая");
}
