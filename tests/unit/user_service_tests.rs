// ==============================
// tests/unit/user_service_tests.rs
// ==============================
//! Unit tests for registration and login against both store backends
use authgate_backend::auth::UserService;
use authgate_backend::storage::{FlatFileUserStore, InMemoryUserStore, UserStore};
use authgate_backend::AppError;
use authgate_common::Credentials;
use std::sync::Arc;
use tempfile::TempDir;

fn service_over(store: Arc<dyn UserStore>) -> UserService {
    UserService::with_hash_cost(store, 4)
}

#[tokio::test]
async fn test_alice_example() {
    let users = service_over(Arc::new(InMemoryUserStore::new()));

    let registered = users
        .register(Credentials::new("alice", "secret1"))
        .await
        .unwrap();
    assert_eq!(registered.username, "alice");

    let logged_in = users
        .login(Credentials::new("alice", "secret1"))
        .await
        .unwrap();
    assert_eq!(logged_in.id, registered.id);
    assert_eq!(logged_in.username, "alice");

    let err = users
        .login(Credentials::new("alice", "wrong-password"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Auth));
}

#[tokio::test]
async fn test_registration_persists_across_services() {
    let temp_dir = TempDir::new().unwrap();

    let registered = {
        let store = FlatFileUserStore::new(temp_dir.path()).unwrap();
        service_over(Arc::new(store))
            .register(Credentials::new("carol", "hunter22"))
            .await
            .unwrap()
    };

    let store = FlatFileUserStore::new(temp_dir.path()).unwrap();
    let users = service_over(Arc::new(store));

    let logged_in = users
        .login(Credentials::new("carol", "hunter22"))
        .await
        .unwrap();
    assert_eq!(logged_in, registered);

    let err = users
        .register(Credentials::new("carol", "hunter22"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_concurrent_registrations_yield_one_winner() {
    let temp_dir = TempDir::new().unwrap();
    let store = FlatFileUserStore::new(temp_dir.path()).unwrap();
    let users = Arc::new(service_over(Arc::new(store.clone())));

    let mut handles = Vec::new();
    for i in 0..8 {
        let users = users.clone();
        handles.push(tokio::spawn(async move {
            users
                .register(Credentials::new("dave", format!("password{i}")))
                .await
        }));
    }

    let mut ok = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => ok += 1,
            Err(AppError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(ok, 1);
    assert_eq!(conflicts, 7);
    assert_eq!(store.len().await, 1);
}
