//! Best-effort audit recording.

use herald_types::audit_adapter::CreateNotification;
use herald_types::push_transport::NotificationPayload;

use crate::prelude::*;

/// Appends the durable audit entry for a recipient.
///
/// Audit history is a convenience surface; a failed write must never fail the
/// dispatch that produced it, so errors are logged and swallowed.
pub async fn record_notification(app: &App, user_id: &str, payload: &NotificationPayload) {
	let sent_at = match now() {
		Ok(ts) => ts,
		Err(err) => {
			warn!(user_id = %user_id, error = %err, "Skipping audit record, no timestamp");
			return;
		}
	};

	let record = CreateNotification {
		user_id,
		title: &payload.title,
		body: &payload.body,
		data: &payload.data,
		sent_at,
	};

	match app.audit_adapter.create_notification(&record).await {
		Ok(id) => {
			debug!(user_id = %user_id, notification_id = id, "Audit record saved");
		}
		Err(err) => {
			warn!(user_id = %user_id, error = %err, "Failed to save audit record");
		}
	}
}

// vim: ts=4
