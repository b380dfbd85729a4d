//! Adapter for the per-device delivery token registry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;

/// One live delivery token.
///
/// A `(user_id, device_id)` pair maps to at most one live token. Token
/// strings themselves are transport-assigned and not guaranteed unique
/// across users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceToken {
	pub token: Box<str>,
	pub user_id: Box<str>,
	pub device_id: Box<str>,
}

#[async_trait]
pub trait TokenAdapter: Debug + Send + Sync {
	/// Lists the live tokens registered for a user.
	///
	/// A user with no registered devices (or an unknown user id) contributes
	/// an empty list, not an error.
	async fn list_device_tokens(&self, user_id: &str) -> ClResult<Vec<DeviceToken>>;

	/// Upserts the token for a `(user_id, device_id)` pair.
	async fn create_device_token(
		&self,
		user_id: &str,
		device_id: &str,
		token: &str,
	) -> ClResult<()>;

	/// Deletes a device's token entry, used when the transport reports the
	/// token permanently invalid.
	async fn delete_device_token(&self, user_id: &str, device_id: &str) -> ClResult<()>;
}

// vim: ts=4
