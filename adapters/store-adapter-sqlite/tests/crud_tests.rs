//! Store adapter CRUD operation tests
//!
//! Tests create, read, and delete operations for users, device tokens, and
//! the notification audit log against a temporary database.

use std::collections::HashMap;

use herald_store_adapter_sqlite::StoreAdapterSqlite;
use herald_types::audit_adapter::{AuditAdapter, CreateNotification};
use herald_types::token_adapter::TokenAdapter;
use herald_types::types::now;
use herald_types::user_adapter::{CreateUser, UserAdapter};
use tempfile::TempDir;

async fn create_test_adapter() -> (StoreAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter = StoreAdapterSqlite::new(temp_dir.path().join("store.db"))
		.await
		.expect("Failed to create adapter");

	(adapter, temp_dir)
}

fn sample_user<'a>(user_id: &'a str, email: &'a str, role: &'a str, approved: bool) -> CreateUser<'a> {
	CreateUser { user_id, email, name: None, role, approved }
}

#[tokio::test]
async fn test_create_and_read_user() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.create_user(&sample_user("u-1", "alice@example.com", "customer", true))
		.await
		.expect("Should create user");

	let user = adapter.read_user("u-1").await.expect("Should read user");
	let user = user.expect("User should exist");
	assert_eq!(&*user.email, "alice@example.com");
	assert!(user.approved);

	let missing = adapter.read_user("u-404").await.expect("Should not error on miss");
	assert!(missing.is_none());
}

#[tokio::test]
async fn test_read_user_by_email_matches_exactly() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.create_user(&sample_user("u-1", "bob@example.com", "admin", true))
		.await
		.expect("Should create user");

	let user = adapter
		.read_user_by_email("bob@example.com")
		.await
		.expect("Should read user")
		.expect("User should exist");
	assert_eq!(&*user.user_id, "u-1");

	// The adapter does exact matching; normalization is the resolver's job
	let miss = adapter.read_user_by_email("Bob@Example.com").await.expect("Should not error");
	assert!(miss.is_none());
}

#[tokio::test]
async fn test_list_users_by_role_excludes_unapproved() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.create_user(&sample_user("u-1", "a@example.com", "driver", true))
		.await
		.expect("Should create user");
	adapter
		.create_user(&sample_user("u-2", "b@example.com", "driver", false))
		.await
		.expect("Should create user");
	adapter
		.create_user(&sample_user("u-3", "c@example.com", "admin", true))
		.await
		.expect("Should create user");

	let drivers = adapter.list_users_by_role("driver").await.expect("Should list users");
	assert_eq!(drivers.len(), 1);
	assert_eq!(&*drivers[0].user_id, "u-1");

	let none = adapter.list_users_by_role("courier").await.expect("Should list users");
	assert!(none.is_empty());
}

#[tokio::test]
async fn test_device_token_lifecycle() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.create_device_token("u-1", "phone", "tok-1")
		.await
		.expect("Should create token");
	adapter
		.create_device_token("u-1", "tablet", "tok-2")
		.await
		.expect("Should create token");
	adapter
		.create_device_token("u-2", "phone", "tok-3")
		.await
		.expect("Should create token");

	let tokens = adapter.list_device_tokens("u-1").await.expect("Should list tokens");
	assert_eq!(tokens.len(), 2);

	// Unknown users have zero tokens, not an error
	let empty = adapter.list_device_tokens("u-404").await.expect("Should list tokens");
	assert!(empty.is_empty());

	adapter.delete_device_token("u-1", "phone").await.expect("Should delete token");
	let tokens = adapter.list_device_tokens("u-1").await.expect("Should list tokens");
	assert_eq!(tokens.len(), 1);
	assert_eq!(&*tokens[0].device_id, "tablet");
}

#[tokio::test]
async fn test_device_token_upsert_replaces() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.create_device_token("u-1", "phone", "tok-old")
		.await
		.expect("Should create token");
	adapter
		.create_device_token("u-1", "phone", "tok-new")
		.await
		.expect("Should upsert token");

	let tokens = adapter.list_device_tokens("u-1").await.expect("Should list tokens");
	assert_eq!(tokens.len(), 1, "a (user, device) pair maps to at most one live token");
	assert_eq!(&*tokens[0].token, "tok-new");
}

#[tokio::test]
async fn test_notification_create_and_list() {
	let (adapter, _temp) = create_test_adapter().await;

	let data: HashMap<Box<str>, Box<str>> =
		HashMap::from([(Box::from("type"), Box::from("admin_message"))]);
	let sent_at = now().expect("Should read clock");

	let id = adapter
		.create_notification(&CreateNotification {
			user_id: "u-1",
			title: "Hello",
			body: "First message",
			data: &data,
			sent_at,
		})
		.await
		.expect("Should create notification");
	assert!(id > 0);

	adapter
		.create_notification(&CreateNotification {
			user_id: "u-1",
			title: "Hello again",
			body: "Second message",
			data: &data,
			sent_at,
		})
		.await
		.expect("Should create notification");

	let notifications = adapter.list_notifications("u-1").await.expect("Should list");
	assert_eq!(notifications.len(), 2);
	assert_eq!(&*notifications[0].title, "Hello again", "newest first");
	assert!(!notifications[0].is_read, "read flag initialized false");
	assert_eq!(
		notifications[0].data.get("type").map(AsRef::as_ref),
		Some("admin_message")
	);

	let other = adapter.list_notifications("u-2").await.expect("Should list");
	assert!(other.is_empty());
}

// vim: ts=4
