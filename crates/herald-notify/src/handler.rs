//! HTTP handlers for the direct notification entry points.

use axum::{
	Json,
	extract::{Path, State},
	routing::{get, post},
};
use serde::Deserialize;
use std::collections::HashMap;

use crate::fanout::{self, FanOutResult};
use crate::prelude::*;
use herald_types::audit_adapter::NotificationView;

/// Request body for notifying a single recipient by email
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyUserRequest {
	pub recipient_email: Option<Box<str>>,
	pub message: Option<Box<str>>,
	pub title: Option<Box<str>>,
}

impl NotifyUserRequest {
	/// Checks required fields before any store access. Absent and empty
	/// values are both rejected.
	fn validate(&self) -> ClResult<(&str, &str)> {
		match (present(self.recipient_email.as_deref()), present(self.message.as_deref())) {
			(Some(email), Some(message)) => Ok((email, message)),
			_ => Err(Error::ValidationError(
				"missing required parameters: recipientEmail, message".to_string(),
			)),
		}
	}
}

/// Request body for sending a file-received notification to a single
/// recipient
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyFileRequest {
	pub recipient_email: Option<Box<str>>,
	pub file_name: Option<Box<str>>,
	pub file_url: Option<Box<str>>,
	pub title: Option<Box<str>>,
	pub message: Option<Box<str>>,
}

impl NotifyFileRequest {
	fn validate(&self) -> ClResult<(&str, &str, &str)> {
		match (
			present(self.recipient_email.as_deref()),
			present(self.file_name.as_deref()),
			present(self.file_url.as_deref()),
		) {
			(Some(email), Some(file_name), Some(file_url)) => Ok((email, file_name, file_url)),
			_ => Err(Error::ValidationError(
				"missing required parameters: recipientEmail, fileName, fileUrl".to_string(),
			)),
		}
	}
}

/// Request body for broadcasting to a role
#[derive(Debug, Deserialize)]
pub struct NotifyRoleRequest {
	pub role: Option<Box<str>>,
	pub title: Option<Box<str>>,
	pub body: Option<Box<str>>,
	#[serde(default)]
	pub data: HashMap<Box<str>, Box<str>>,
}

impl NotifyRoleRequest {
	fn validate(&self) -> ClResult<(&str, &str, &str)> {
		match (
			present(self.role.as_deref()),
			present(self.title.as_deref()),
			present(self.body.as_deref()),
		) {
			(Some(role), Some(title), Some(body)) => Ok((role, title, body)),
			_ => Err(Error::ValidationError(
				"missing required parameters: role, title, body".to_string(),
			)),
		}
	}
}

fn present(value: Option<&str>) -> Option<&str> {
	value.filter(|v| !v.trim().is_empty())
}

/// POST /api/notify/user
///
/// Resolves the recipient by email and fans the message out to every
/// registered device. Store unavailability is converted into a
/// failure-shaped result so the caller always receives a structured
/// response; only missing parameters are rejected outright.
pub async fn post_notify_user(
	State(app): State<App>,
	Json(body): Json<NotifyUserRequest>,
) -> Result<Json<FanOutResult>, Error> {
	let (email, message) = body.validate()?;
	info!(email = %email, "Notification requested");

	let result =
		match fanout::notify_user_by_email(&app, email, message, body.title.as_deref()).await {
			Ok(result) => result,
			Err(err) => {
				error!(email = %email, error = %err, "Notification fan-out failed");
				FanOutResult::error_single(&err)
			}
		};

	Ok(Json(result))
}

/// POST /api/notify/file
///
/// Sends a file-received notification to a single recipient by email. The
/// payload points the client at the delivered file; title and message fall
/// back to defaults when omitted.
pub async fn post_notify_file(
	State(app): State<App>,
	Json(body): Json<NotifyFileRequest>,
) -> Result<Json<FanOutResult>, Error> {
	let (email, file_name, file_url) = body.validate()?;
	info!(email = %email, file_name = %file_name, "File notification requested");

	let result = match fanout::notify_file_to_customer(
		&app,
		email,
		file_name,
		file_url,
		body.title.as_deref(),
		body.message.as_deref(),
	)
	.await
	{
		Ok(result) => result,
		Err(err) => {
			error!(email = %email, error = %err, "File notification fan-out failed");
			FanOutResult::error_single(&err)
		}
	};

	Ok(Json(result))
}

/// POST /api/notify/role
///
/// Broadcasts to every approved member of the role.
pub async fn post_notify_role(
	State(app): State<App>,
	Json(body): Json<NotifyRoleRequest>,
) -> Result<Json<FanOutResult>, Error> {
	let (role, title, text) = body.validate()?;
	info!(role = %role, "Role broadcast requested");

	let result = match fanout::notify_role(&app, role, title, text, body.data.clone()).await {
		Ok(result) => result,
		Err(err) => {
			error!(role = %role, error = %err, "Role broadcast failed");
			FanOutResult::error_broadcast(&err)
		}
	};

	Ok(Json(result))
}

/// GET /api/notifications/{user_id}
///
/// A user's notification history, newest first.
pub async fn get_notifications(
	State(app): State<App>,
	Path(user_id): Path<String>,
) -> Result<Json<Vec<NotificationView>>, Error> {
	let notifications = app.audit_adapter.list_notifications(&user_id).await?;
	Ok(Json(notifications))
}

/// Routes contributed by this crate.
pub fn routes() -> axum::Router<App> {
	axum::Router::new()
		.route("/api/notify/user", post(post_notify_user))
		.route("/api/notify/file", post(post_notify_file))
		.route("/api/notify/role", post(post_notify_role))
		.route("/api/notifications/{user_id}", get(get_notifications))
}


// vim: ts=4
