//! SQLite-backed store adapter for Herald.
//!
//! One pool backs all three store traits: the user store, the per-device
//! token registry, and the notification audit log.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

mod device;
mod notification;
mod user;

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use herald_types::audit_adapter::{AuditAdapter, CreateNotification, NotificationView};
use herald_types::prelude::*;
use herald_types::token_adapter::{DeviceToken, TokenAdapter};
use herald_types::user_adapter::{CreateUser, User, UserAdapter};

#[derive(Debug)]
pub struct StoreAdapterSqlite {
	db: SqlitePool,
}

impl StoreAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> ClResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DB connect error: {:#?}", err))
			.or(Err(Error::DbError))?;

		init_db(&db)
			.await
			.inspect_err(|err| error!("DB init error: {:#?}", err))
			.or(Err(Error::DbError))?;

		Ok(Self { db })
	}
}

#[async_trait]
impl UserAdapter for StoreAdapterSqlite {
	async fn read_user(&self, user_id: &str) -> ClResult<Option<User>> {
		user::read(&self.db, user_id).await
	}

	async fn read_user_by_email(&self, email: &str) -> ClResult<Option<User>> {
		user::read_by_email(&self.db, email).await
	}

	async fn list_users_by_role(&self, role: &str) -> ClResult<Vec<User>> {
		user::list_by_role(&self.db, role).await
	}

	async fn create_user(&self, user: &CreateUser<'_>) -> ClResult<()> {
		user::create(&self.db, user).await
	}
}

#[async_trait]
impl TokenAdapter for StoreAdapterSqlite {
	async fn list_device_tokens(&self, user_id: &str) -> ClResult<Vec<DeviceToken>> {
		device::list(&self.db, user_id).await
	}

	async fn create_device_token(
		&self,
		user_id: &str,
		device_id: &str,
		token: &str,
	) -> ClResult<()> {
		device::create(&self.db, user_id, device_id, token).await
	}

	async fn delete_device_token(&self, user_id: &str, device_id: &str) -> ClResult<()> {
		device::delete(&self.db, user_id, device_id).await
	}
}

#[async_trait]
impl AuditAdapter for StoreAdapterSqlite {
	async fn create_notification(&self, notification: &CreateNotification<'_>) -> ClResult<u64> {
		notification::create(&self.db, notification).await
	}

	async fn list_notifications(&self, user_id: &str) -> ClResult<Vec<NotificationView>> {
		notification::list(&self.db, user_id).await
	}
}

async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Users //
	///////////
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS users (
		user_id text NOT NULL,
		email text NOT NULL,
		name text,
		role text NOT NULL,
		approved boolean NOT NULL DEFAULT false,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(user_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_role ON users(role, approved)")
		.execute(&mut *tx)
		.await?;

	// Device tokens //
	///////////////////
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS devices (
		user_id text NOT NULL,
		device_id text NOT NULL,
		token text NOT NULL,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(user_id, device_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Notification history //
	//////////////////////////
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS notifications (
		notification_id integer NOT NULL,
		user_id text NOT NULL,
		title text NOT NULL,
		body text NOT NULL,
		data json,
		sent_at datetime NOT NULL,
		is_read boolean NOT NULL DEFAULT false,
		PRIMARY KEY(notification_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications(user_id)")
		.execute(&mut *tx)
		.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
