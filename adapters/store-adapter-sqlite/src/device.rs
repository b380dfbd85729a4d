//! Device token registry database operations

use herald_types::prelude::*;
use herald_types::token_adapter::DeviceToken;
use sqlx::{Row, SqlitePool};

/// List the live tokens registered for a user
pub async fn list(db: &SqlitePool, user_id: &str) -> ClResult<Vec<DeviceToken>> {
	let rows = sqlx::query("SELECT user_id, device_id, token FROM devices WHERE user_id = ?")
		.bind(user_id)
		.fetch_all(db)
		.await
		.or(Err(Error::DbError))?;

	let mut tokens = Vec::with_capacity(rows.len());
	for row in rows {
		tokens.push(DeviceToken {
			token: row.try_get("token").or(Err(Error::DbError))?,
			user_id: row.try_get("user_id").or(Err(Error::DbError))?,
			device_id: row.try_get("device_id").or(Err(Error::DbError))?,
		});
	}

	Ok(tokens)
}

/// Upsert the token for a `(user_id, device_id)` pair
pub async fn create(db: &SqlitePool, user_id: &str, device_id: &str, token: &str) -> ClResult<()> {
	sqlx::query("INSERT OR REPLACE INTO devices (user_id, device_id, token) VALUES (?, ?, ?)")
		.bind(user_id)
		.bind(device_id)
		.bind(token)
		.execute(db)
		.await
		.or(Err(Error::DbError))?;

	Ok(())
}

/// Delete a device's token entry
pub async fn delete(db: &SqlitePool, user_id: &str, device_id: &str) -> ClResult<()> {
	sqlx::query("DELETE FROM devices WHERE user_id = ? AND device_id = ?")
		.bind(user_id)
		.bind(device_id)
		.execute(db)
		.await
		.or(Err(Error::DbError))?;

	Ok(())
}

// vim: ts=4
