//! Notification audit log database operations

use std::collections::HashMap;

use herald_types::audit_adapter::{CreateNotification, NotificationView};
use herald_types::prelude::*;
use sqlx::{Row, SqlitePool};

/// Append an audit entry, returning its id
pub async fn create(db: &SqlitePool, notification: &CreateNotification<'_>) -> ClResult<u64> {
	let data_json = serde_json::to_string(notification.data)
		.map_err(|e| Error::Internal(format!("Failed to serialize notification data: {}", e)))?;

	let result = sqlx::query(
		"INSERT INTO notifications (user_id, title, body, data, sent_at, is_read)
		 VALUES (?, ?, ?, ?, ?, false)",
	)
	.bind(notification.user_id)
	.bind(notification.title)
	.bind(notification.body)
	.bind(&data_json)
	.bind(notification.sent_at.0)
	.execute(db)
	.await
	.or(Err(Error::DbError))?;

	Ok(result.last_insert_rowid() as u64)
}

/// List a user's notification history, newest first
pub async fn list(db: &SqlitePool, user_id: &str) -> ClResult<Vec<NotificationView>> {
	let rows = sqlx::query(
		"SELECT notification_id, user_id, title, body, data, sent_at, is_read
		 FROM notifications
		 WHERE user_id = ?
		 ORDER BY sent_at DESC, notification_id DESC",
	)
	.bind(user_id)
	.fetch_all(db)
	.await
	.or(Err(Error::DbError))?;

	let mut notifications = Vec::with_capacity(rows.len());
	for row in rows {
		let data_json: Option<String> = row.try_get("data").or(Err(Error::DbError))?;
		let data: HashMap<Box<str>, Box<str>> = match data_json {
			Some(json) => serde_json::from_str(&json)
				.map_err(|e| Error::Internal(format!("Invalid notification data JSON: {}", e)))?,
			None => HashMap::new(),
		};

		notifications.push(NotificationView {
			notification_id: row.try_get::<i64, _>("notification_id").or(Err(Error::DbError))?
				as u64,
			user_id: row.try_get("user_id").or(Err(Error::DbError))?,
			title: row.try_get("title").or(Err(Error::DbError))?,
			body: row.try_get("body").or(Err(Error::DbError))?,
			data,
			sent_at: Timestamp(row.try_get("sent_at").or(Err(Error::DbError))?),
			is_read: row.try_get("is_read").or(Err(Error::DbError))?,
		});
	}

	Ok(notifications)
}

// vim: ts=4
