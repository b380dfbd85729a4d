//! User store database operations

use herald_types::prelude::*;
use herald_types::user_adapter::{CreateUser, User};
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

fn map_user(row: &SqliteRow) -> Result<User, sqlx::Error> {
	Ok(User {
		user_id: row.try_get("user_id")?,
		email: row.try_get("email")?,
		name: row.try_get("name")?,
		role: row.try_get("role")?,
		approved: row.try_get("approved")?,
	})
}

/// Read one user by id
pub async fn read(db: &SqlitePool, user_id: &str) -> ClResult<Option<User>> {
	let row = sqlx::query("SELECT user_id, email, name, role, approved FROM users WHERE user_id = ?")
		.bind(user_id)
		.fetch_optional(db)
		.await
		.or(Err(Error::DbError))?;

	row.as_ref().map(map_user).transpose().or(Err(Error::DbError))
}

/// Read one user by an already-normalized email address.
/// The first match is authoritative.
pub async fn read_by_email(db: &SqlitePool, email: &str) -> ClResult<Option<User>> {
	let row = sqlx::query(
		"SELECT user_id, email, name, role, approved FROM users WHERE email = ? LIMIT 1",
	)
	.bind(email)
	.fetch_optional(db)
	.await
	.or(Err(Error::DbError))?;

	row.as_ref().map(map_user).transpose().or(Err(Error::DbError))
}

/// List approved users carrying a role
pub async fn list_by_role(db: &SqlitePool, role: &str) -> ClResult<Vec<User>> {
	let rows = sqlx::query(
		"SELECT user_id, email, name, role, approved FROM users WHERE role = ? AND approved",
	)
	.bind(role)
	.fetch_all(db)
	.await
	.or(Err(Error::DbError))?;

	rows.iter().map(|row| map_user(row).or(Err(Error::DbError))).collect()
}

/// Create a user record
pub async fn create(db: &SqlitePool, user: &CreateUser<'_>) -> ClResult<()> {
	sqlx::query("INSERT INTO users (user_id, email, name, role, approved) VALUES (?, ?, ?, ?, ?)")
		.bind(user.user_id)
		.bind(user.email)
		.bind(user.name)
		.bind(user.role)
		.bind(user.approved)
		.execute(db)
		.await
		.or(Err(Error::DbError))?;

	Ok(())
}

// vim: ts=4
