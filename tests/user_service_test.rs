//! Use case tests against in-memory storage and the real Argon2 encoder.

use std::sync::Arc;

use tokio_test::{assert_err, assert_ok};

use user_api::domain::{CreateUser, Email, UpdateUser};
use user_api::errors::AppError;
use user_api::infra::{Argon2PasswordEncoder, MemoryPersistence, UnitOfWork};
use user_api::services::{UserManager, UserService};
use user_api::with_transaction;

fn setup() -> (Arc<MemoryPersistence>, UserManager<MemoryPersistence>) {
    let store = Arc::new(MemoryPersistence::new());
    let service = UserManager::new(Arc::clone(&store), Arc::new(Argon2PasswordEncoder::new()));
    (store, service)
}

fn input(name: &str, email: &str) -> CreateUser {
    CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        password: "password123".to_string(),
    }
}

#[tokio::test]
async fn test_create_and_get_user() {
    let (_, service) = setup();

    let created = assert_ok!(service.create_user(input("Alice", "alice@example.com")).await);
    let fetched = assert_ok!(service.get_user(created.id).await);

    assert_eq!(created, fetched);
    assert_eq!(fetched.name, "Alice");
}

#[tokio::test]
async fn test_password_is_stored_hashed() {
    let (store, service) = setup();
    let created = assert_ok!(service.create_user(input("Alice", "alice@example.com")).await);

    let id = created.id;
    let stored = with_transaction!(read_only store, |ctx| ctx.users().find_by_id(id).await)
        .unwrap()
        .unwrap();

    assert_ne!(stored.password().as_str(), "password123");
    assert!(stored.password().as_str().starts_with("$argon2"));
}

#[tokio::test]
async fn test_corporate_email_rejects_digit_name() {
    let (_, service) = setup();

    let err = assert_err!(service.create_user(input("John3", "john3@company.com")).await);
    assert!(matches!(err, AppError::InvalidNameFormat(_)));

    assert_ok!(service.create_user(input("John3", "john3@gmail.com")).await);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let (_, service) = setup();
    assert_ok!(service.create_user(input("Alice", "a@b.com")).await);

    let err = assert_err!(service.create_user(input("Bob", "a@b.com")).await);
    assert!(matches!(err, AppError::DuplicateEmail(_)));

    assert_eq!(service.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_short_password_rejected() {
    let (_, service) = setup();

    let mut weak = input("Alice", "alice@example.com");
    weak.password = "1234567".to_string();

    let err = assert_err!(service.create_user(weak).await);
    assert!(matches!(err, AppError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_update_own_email_is_allowed() {
    let (_, service) = setup();
    let created = assert_ok!(service.create_user(input("Alice", "alice@example.com")).await);

    let update = UpdateUser {
        name: Some("Alicia".into()),
        email: Some("alice@example.com".into()),
        password: None,
    };
    let updated = assert_ok!(service.update_user(created.id, update).await);

    assert_eq!(updated.name, "Alicia");
    assert_eq!(updated.email, "alice@example.com");
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_update_to_taken_email_fails() {
    let (_, service) = setup();
    let alice = assert_ok!(service.create_user(input("Alice", "alice@example.com")).await);
    assert_ok!(service.create_user(input("Bob", "bob@example.com")).await);

    let update = UpdateUser {
        email: Some("bob@example.com".into()),
        ..Default::default()
    };
    let err = assert_err!(service.update_user(alice.id, update).await);
    assert!(matches!(err, AppError::DuplicateEmail(_)));

    // Failed update leaves the stored user untouched
    let unchanged = assert_ok!(service.get_user(alice.id).await);
    assert_eq!(unchanged.email, "alice@example.com");
}

#[tokio::test]
async fn test_update_password_rehashes() {
    let (store, service) = setup();
    let created = assert_ok!(service.create_user(input("Alice", "alice@example.com")).await);
    let id = created.id;

    let before = with_transaction!(read_only store, |ctx| ctx.users().find_by_id(id).await)
        .unwrap()
        .unwrap();

    let update = UpdateUser {
        password: Some("another-password".into()),
        ..Default::default()
    };
    assert_ok!(service.update_user(id, update).await);

    let after = with_transaction!(read_only store, |ctx| ctx.users().find_by_id(id).await)
        .unwrap()
        .unwrap();
    assert_ne!(before.password(), after.password());
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let (_, service) = setup();
    let created = assert_ok!(service.create_user(input("Alice", "alice@example.com")).await);

    assert_ok!(service.delete_user(created.id).await);

    let err = assert_err!(service.get_user(created.id).await);
    assert!(matches!(err, AppError::NotFound(_)));

    let err = assert_err!(service.delete_user(created.id).await);
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_list_users_empty_then_ordered() {
    let (_, service) = setup();
    assert!(service.list_users().await.unwrap().is_empty());

    for (name, email) in [("Alice", "alice@example.com"), ("Bob", "bob@example.com")] {
        assert_ok!(service.create_user(input(name, email)).await);
    }

    let ids: Vec<_> = service.list_users().await.unwrap().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_email_lookup_is_case_sensitive() {
    let (store, service) = setup();
    assert_ok!(service.create_user(input("Alice", "alice@example.com")).await);

    let upper = Email::new("ALICE@example.com").unwrap();
    let exists = with_transaction!(read_only store, |ctx| ctx.users().exists_by_email(&upper).await);
    assert!(!exists.unwrap());
}
