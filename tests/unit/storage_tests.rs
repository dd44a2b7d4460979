// ==============================
// tests/unit/storage_tests.rs
// ==============================
//! Unit tests for the flat-file user store's on-disk format
use authgate_backend::storage::{FlatFileUserStore, UserRecord, UserStore, USERS_FILE};
use tempfile::TempDir;

#[tokio::test]
async fn test_users_file_is_a_json_array_of_records() {
    let temp_dir = TempDir::new().unwrap();
    let store = FlatFileUserStore::new(temp_dir.path()).unwrap();
    let alice = store
        .insert(UserRecord::new("alice", "$scrypt$ln=4,r=8,p=1$c2FsdA$aGFzaA"))
        .await
        .unwrap();

    let raw = std::fs::read_to_string(temp_dir.path().join(USERS_FILE)).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entries = doc.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], alice.id.as_str());
    assert_eq!(entries[0]["username"], "alice");
    assert!(entries[0]["password_hash"].as_str().unwrap().starts_with("$scrypt$"));
    assert!(entries[0]["created_at"].is_string());
}

#[tokio::test]
async fn test_empty_users_file_is_an_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(USERS_FILE), "").unwrap();

    let store = FlatFileUserStore::new(temp_dir.path()).unwrap();
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_store_creates_missing_data_dir() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("a").join("b");

    let store = FlatFileUserStore::new(&nested).unwrap();
    store.insert(UserRecord::new("erin", "hash")).await.unwrap();
    assert!(nested.join(USERS_FILE).exists());
}
