//! Fan-out orchestration.
//!
//! Sequences resolution, token lookup, per-token dispatch, pruning, and
//! audit into the supported flows. Per-token dispatches run
//! concurrently, bounded by the configured fan-out width; pruning and audit
//! writes run only after the full outcome set is collected, so every side
//! effect sees the true counts.

use futures::{StreamExt, stream};
use serde::Serialize;
use std::{collections::HashMap, sync::Arc};

use herald_types::push_transport::NotificationPayload;
use herald_types::token_adapter::DeviceToken;

use crate::audit;
use crate::dispatch::{DispatchOutcome, dispatch};
use crate::prelude::*;
use crate::resolver;

/// Title used when a single-recipient caller does not supply one.
pub const DEFAULT_TITLE: &str = "New notification";

/// Defaults for the file-delivery flow when the caller omits them.
pub const FILE_RECEIVED_TITLE: &str = "You received a new file";
pub const FILE_RECEIVED_MESSAGE: &str = "A new file has been sent to you";

/// Aggregated outcome of one fan-out invocation.
///
/// `success` is true iff at least one send was delivered; partial success is
/// reported as overall success with accurate counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FanOutResult {
	pub success: bool,
	pub message: Box<str>,
	pub success_count: u32,
	pub failure_count: u32,
	/// Single-recipient flows only: distinguishes "recipient does not exist
	/// or is not approved" from "recipient exists but has no devices".
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_found: Option<bool>,
}

impl FanOutResult {
	/// Failure shape for store unavailability during a single-recipient
	/// call: direct callers always receive a structured response.
	pub fn error_single(err: &Error) -> Self {
		Self {
			success: false,
			message: err.to_string().into(),
			success_count: 0,
			failure_count: 1,
			user_found: Some(false),
		}
	}

	/// Failure shape for store unavailability during a role broadcast.
	pub fn error_broadcast(err: &Error) -> Self {
		Self {
			success: false,
			message: err.to_string().into(),
			success_count: 0,
			failure_count: 0,
			user_found: None,
		}
	}
}

/// Notifies a single recipient identified by email address.
///
/// Resolution misses (unknown address, unapproved customer) yield
/// `userFound: false`. A resolved recipient with no registered devices is
/// modeled as exactly one failure. One audit record is written for the
/// recipient once all their tokens were attempted.
pub async fn notify_user_by_email(
	app: &App,
	email: &str,
	message: &str,
	title: Option<&str>,
) -> ClResult<FanOutResult> {
	let title = title.unwrap_or(DEFAULT_TITLE);

	let Some(user) = resolver::find_user_by_email(app, email).await? else {
		return Ok(FanOutResult {
			success: false,
			message: format!("User not found or not approved: {}", email).into(),
			success_count: 0,
			failure_count: 1,
			user_found: Some(false),
		});
	};

	let tokens = app.token_adapter.list_device_tokens(&user.user_id).await?;
	if tokens.is_empty() {
		return Ok(FanOutResult {
			success: false,
			message: format!("No device tokens registered for: {}", user.email).into(),
			success_count: 0,
			failure_count: 1,
			user_found: Some(true),
		});
	}

	let payload = NotificationPayload::new(title, message)
		.with_data("type", "admin_message")
		.with_data("senderType", "admin")
		.with_data("timestamp", now_millis()?.to_string());

	let outcomes = dispatch_all(app, tokens, &payload).await;
	let (success_count, failure_count) = tally(&outcomes);

	prune_invalid_tokens(app, &outcomes).await;
	audit::record_notification(app, &user.user_id, &payload).await;

	info!(
		email = %user.email,
		success = success_count,
		failed = failure_count,
		"Notification fan-out complete"
	);

	Ok(FanOutResult {
		success: success_count > 0,
		message: if success_count > 0 {
			format!("Notification sent to: {}", user.email).into()
		} else {
			format!("Notification could not be delivered to: {}", user.email).into()
		},
		success_count,
		failure_count,
		user_found: Some(true),
	})
}

/// Sends a file-received notification to a single recipient by email.
///
/// Same resolution and aggregation contract as [`notify_user_by_email`]; the
/// payload carries the file reference under `type: file_received` so clients
/// can open the file from the notification.
pub async fn notify_file_to_customer(
	app: &App,
	email: &str,
	file_name: &str,
	file_url: &str,
	title: Option<&str>,
	message: Option<&str>,
) -> ClResult<FanOutResult> {
	let title = title.unwrap_or(FILE_RECEIVED_TITLE);
	let message = message.unwrap_or(FILE_RECEIVED_MESSAGE);

	let Some(user) = resolver::find_user_by_email(app, email).await? else {
		return Ok(FanOutResult {
			success: false,
			message: format!("User not found or not approved: {}", email).into(),
			success_count: 0,
			failure_count: 1,
			user_found: Some(false),
		});
	};

	let tokens = app.token_adapter.list_device_tokens(&user.user_id).await?;
	if tokens.is_empty() {
		return Ok(FanOutResult {
			success: false,
			message: format!("No device tokens registered for: {}", user.email).into(),
			success_count: 0,
			failure_count: 1,
			user_found: Some(true),
		});
	}

	let payload = NotificationPayload::new(title, format!("{} - {}", file_name, message))
		.with_data("type", "file_received")
		.with_data("fileName", file_name)
		.with_data("fileUrl", file_url)
		.with_data("senderType", "admin")
		.with_data("timestamp", now_millis()?.to_string());

	let outcomes = dispatch_all(app, tokens, &payload).await;
	let (success_count, failure_count) = tally(&outcomes);

	prune_invalid_tokens(app, &outcomes).await;
	audit::record_notification(app, &user.user_id, &payload).await;

	info!(
		email = %user.email,
		file_name = %file_name,
		success = success_count,
		failed = failure_count,
		"File notification fan-out complete"
	);

	Ok(FanOutResult {
		success: success_count > 0,
		message: if success_count > 0 {
			format!("File notification sent to: {}", user.email).into()
		} else {
			format!("File notification could not be delivered to: {}", user.email).into()
		},
		success_count,
		failure_count,
		user_found: Some(true),
	})
}

/// Broadcasts a notification to every approved member of a role.
///
/// An audit record accompanies each successful send (one per delivered
/// token's owning user), not a single aggregate. A role with nobody to
/// notify is a soft failure: `success: false` with zero counts.
pub async fn notify_role(
	app: &App,
	role: &str,
	title: &str,
	body: &str,
	data: HashMap<Box<str>, Box<str>>,
) -> ClResult<FanOutResult> {
	let members = resolver::list_role_members(app, role).await?;

	let mut tokens = Vec::new();
	for member in &members {
		tokens.extend(app.token_adapter.list_device_tokens(&member.user_id).await?);
	}
	info!(role = %role, count = tokens.len(), "Resolved tokens for role broadcast");

	if tokens.is_empty() {
		return Ok(FanOutResult {
			success: false,
			message: format!("No tokens found for role: {}", role).into(),
			success_count: 0,
			failure_count: 0,
			user_found: None,
		});
	}

	let mut payload = NotificationPayload::new(title, body);
	payload.data = data;
	payload.data.insert("timestamp".into(), now_millis()?.to_string().into());

	let outcomes = dispatch_all(app, tokens, &payload).await;
	let (success_count, failure_count) = tally(&outcomes);

	prune_invalid_tokens(app, &outcomes).await;
	for outcome in &outcomes {
		if let DispatchOutcome::Delivered { token } = outcome {
			audit::record_notification(app, &token.user_id, &payload).await;
		}
	}

	info!(
		role = %role,
		success = success_count,
		failed = failure_count,
		"Role broadcast complete"
	);

	Ok(FanOutResult {
		success: success_count > 0,
		message: format!("Sent {} notifications successfully", success_count).into(),
		success_count,
		failure_count,
		user_found: None,
	})
}

/// Notifies a single recipient by user id.
///
/// No existence check is made at this stage: an unknown id simply resolves
/// to zero tokens, which reports the same one-failure shape as a known
/// recipient without devices.
pub async fn notify_user_id(
	app: &App,
	user_id: &str,
	title: &str,
	body: &str,
	data: HashMap<Box<str>, Box<str>>,
) -> ClResult<FanOutResult> {
	let tokens = app.token_adapter.list_device_tokens(user_id).await?;
	if tokens.is_empty() {
		return Ok(FanOutResult {
			success: false,
			message: format!("No device tokens registered for user: {}", user_id).into(),
			success_count: 0,
			failure_count: 1,
			user_found: Some(true),
		});
	}

	let mut payload = NotificationPayload::new(title, body);
	payload.data = data;
	payload.data.insert("timestamp".into(), now_millis()?.to_string().into());

	let outcomes = dispatch_all(app, tokens, &payload).await;
	let (success_count, failure_count) = tally(&outcomes);

	prune_invalid_tokens(app, &outcomes).await;
	audit::record_notification(app, user_id, &payload).await;

	info!(
		user_id = %user_id,
		success = success_count,
		failed = failure_count,
		"Notification fan-out complete"
	);

	Ok(FanOutResult {
		success: success_count > 0,
		message: if success_count > 0 {
			format!("Notification sent to user: {}", user_id).into()
		} else {
			format!("Notification could not be delivered to user: {}", user_id).into()
		},
		success_count,
		failure_count,
		user_found: Some(true),
	})
}

/// Dispatches one payload to every token, at most `fan_out_width` transport
/// calls in flight at a time. Ordering between tokens is not guaranteed.
async fn dispatch_all(
	app: &App,
	tokens: Vec<DeviceToken>,
	payload: &NotificationPayload,
) -> Vec<DispatchOutcome> {
	let width = app.opts.fan_out_width.max(1);
	stream::iter(tokens)
		.map(|token| {
			let transport = Arc::clone(&app.push_transport);
			async move { dispatch(transport.as_ref(), token, payload).await }
		})
		.buffer_unordered(width)
		.collect()
		.await
}

fn tally(outcomes: &[DispatchOutcome]) -> (u32, u32) {
	let success = outcomes.iter().filter(|outcome| outcome.is_delivered()).count() as u32;
	let failure = outcomes.len() as u32 - success;
	(success, failure)
}

/// Removes registry entries for permanently failed tokens. Best-effort: the
/// delivery outcome already happened and outranks registry hygiene.
async fn prune_invalid_tokens(app: &App, outcomes: &[DispatchOutcome]) {
	for outcome in outcomes {
		if let DispatchOutcome::PermanentFailure { token, .. } = outcome {
			match app.token_adapter.delete_device_token(&token.user_id, &token.device_id).await {
				Ok(()) => {
					info!(
						user_id = %token.user_id,
						device_id = %token.device_id,
						"Pruned invalid token"
					);
				}
				Err(err) => {
					warn!(
						user_id = %token.user_id,
						device_id = %token.device_id,
						error = %err,
						"Failed to prune invalid token"
					);
				}
			}
		}
	}
}

// vim: ts=4
