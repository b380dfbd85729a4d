//! Adapter for the user store.
//!
//! The dispatcher only reads users; account lifecycle lives outside this
//! service. `create_user` exists as storage plumbing for seeding and tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;

/// A recipient candidate as stored in the user store.
///
/// Emails are stored normalized (trimmed, lowercased); lookups expect the
/// caller to pass an already-normalized address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	pub user_id: Box<str>,
	pub email: Box<str>,
	pub name: Option<Box<str>>,
	/// Open role tag, e.g. "customer", "admin", "driver"
	pub role: Box<str>,
	#[serde(rename = "isApproved")]
	pub approved: bool,
}

/// Data needed to create a user record
#[derive(Debug)]
pub struct CreateUser<'a> {
	pub user_id: &'a str,
	pub email: &'a str,
	pub name: Option<&'a str>,
	pub role: &'a str,
	pub approved: bool,
}

#[async_trait]
pub trait UserAdapter: Debug + Send + Sync {
	/// Reads a user by id. Returns `Ok(None)` when no user matches.
	async fn read_user(&self, user_id: &str) -> ClResult<Option<User>>;

	/// Reads one user by an already-normalized email address.
	///
	/// At most one match is expected; when the store holds duplicates the
	/// first match is authoritative. Returns `Ok(None)` on a miss.
	async fn read_user_by_email(&self, email: &str) -> ClResult<Option<User>>;

	/// Lists every user carrying `role` whose approval flag is set.
	/// Unapproved users are excluded at the store level.
	async fn list_users_by_role(&self, role: &str) -> ClResult<Vec<User>>;

	async fn create_user(&self, user: &CreateUser<'_>) -> ClResult<()>;
}

// vim: ts=4
