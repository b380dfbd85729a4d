//! Event-driven notification triggers.
//!
//! Subscribers reacting to creation of "file shared" and "file uploaded"
//! store records. An event has no caller waiting on an answer, so these
//! handlers produce no result and every failure is logged and swallowed.

use serde::Deserialize;
use std::{collections::HashMap, sync::Arc};

use herald_core::events::{EVENT_FILE_SHARED, EVENT_FILE_UPLOADED};

use crate::fanout;
use crate::prelude::*;

/// Fields of a newly created "file shared" record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSharedRecord {
	pub file_name: Box<str>,
	pub file_url: Box<str>,
	pub shared_by: Box<str>,
	pub share_with_role: Box<str>,
	#[serde(default)]
	pub description: Option<Box<str>>,
}

/// Fields of a newly created "file uploaded" record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadedRecord {
	pub file_name: Box<str>,
	pub file_url: Box<str>,
	pub uploaded_by: Box<str>,
	#[serde(default)]
	pub file_type: Option<Box<str>>,
}

/// Registers this crate's record-creation subscribers on the event bus.
pub fn register(app: &App) {
	app.events
		.subscribe(EVENT_FILE_SHARED, Arc::new(|app, record| Box::pin(on_file_shared(app, record))));
	app.events.subscribe(
		EVENT_FILE_UPLOADED,
		Arc::new(|app, record| Box::pin(on_file_uploaded(app, record))),
	);
}

async fn on_file_shared(app: App, record: serde_json::Value) {
	if let Err(err) = handle_file_shared(&app, record).await {
		error!(error = %err, "file_shared handler failed");
	}
}

async fn handle_file_shared(app: &App, record: serde_json::Value) -> ClResult<()> {
	let record: FileSharedRecord = serde_json::from_value(record)
		.map_err(|err| Error::ValidationError(format!("malformed file_shared record: {}", err)))?;

	// Sharer lookup is display-only, fall back rather than fail
	let sender_name = match app.user_adapter.read_user(&record.shared_by).await {
		Ok(Some(user)) => user.email,
		Ok(None) => Box::from("Admin"),
		Err(err) => {
			warn!(user_id = %record.shared_by, error = %err, "Could not resolve sharer");
			Box::from("Admin")
		}
	};

	let data: HashMap<Box<str>, Box<str>> = HashMap::from([
		(Box::from("type"), Box::from("file_shared")),
		(Box::from("fileName"), record.file_name.clone()),
		(Box::from("fileUrl"), record.file_url.clone()),
		(Box::from("senderName"), sender_name),
		(Box::from("description"), record.description.clone().unwrap_or_default()),
	]);

	let result = fanout::notify_role(
		app,
		&record.share_with_role,
		"New file shared",
		&format!("{} has been shared", record.file_name),
		data,
	)
	.await?;

	info!(
		role = %record.share_with_role,
		success = result.success_count,
		failed = result.failure_count,
		"File share notification complete"
	);
	Ok(())
}

async fn on_file_uploaded(app: App, record: serde_json::Value) {
	if let Err(err) = handle_file_uploaded(&app, record).await {
		error!(error = %err, "file_uploaded handler failed");
	}
}

async fn handle_file_uploaded(app: &App, record: serde_json::Value) -> ClResult<()> {
	let record: FileUploadedRecord = serde_json::from_value(record)
		.map_err(|err| Error::ValidationError(format!("malformed file_uploaded record: {}", err)))?;

	let data: HashMap<Box<str>, Box<str>> = HashMap::from([
		(Box::from("type"), Box::from("file_uploaded")),
		(Box::from("fileName"), record.file_name.clone()),
		(Box::from("fileUrl"), record.file_url.clone()),
		(Box::from("fileType"), record.file_type.clone().unwrap_or_else(|| "unknown".into())),
	]);

	let result = fanout::notify_user_id(
		app,
		&record.uploaded_by,
		"File upload complete",
		&format!("{} uploaded successfully", record.file_name),
		data,
	)
	.await?;

	info!(
		user_id = %record.uploaded_by,
		success = result.success_count,
		failed = result.failure_count,
		"File upload notification complete"
	);
	Ok(())
}

// vim: ts=4
