//! Event-driven trigger tests: subscribers reacting to record creation.

mod common;

use serde_json::json;

use herald_core::events::{EVENT_FILE_SHARED, EVENT_FILE_UPLOADED};
use herald_notify::events;
use herald_types::push_transport::SendStatus;

use common::test_app;

#[tokio::test]
async fn file_shared_record_broadcasts_to_the_target_role() {
	let h = test_app();
	events::register(&h.app);

	h.store.add_user("sharer", "boss@example.com", "admin", true);
	h.store.add_user("u-1", "a@example.com", "driver", true);
	h.store.add_user("u-2", "b@example.com", "driver", true);
	h.store.add_token("u-1", "phone", "t1");
	h.store.add_token("u-2", "phone", "t2");

	h.app
		.events
		.emit(
			&h.app,
			EVENT_FILE_SHARED,
			json!({
				"fileName": "routes.pdf",
				"fileUrl": "https://files.example.com/routes.pdf",
				"sharedBy": "sharer",
				"shareWithRole": "driver",
				"description": "updated routes"
			}),
		)
		.await;

	let attempted = h.transport.attempted();
	assert_eq!(attempted.len(), 2);

	// An audit entry follows each successful send
	assert_eq!(h.store.audit_records_for("u-1").len(), 1);
	assert_eq!(h.store.audit_records_for("u-2").len(), 1);

	let data = &h.store.audit_records_for("u-1")[0].data;
	assert_eq!(data.get("type").map(AsRef::as_ref), Some("file_shared"));
	assert_eq!(data.get("fileName").map(AsRef::as_ref), Some("routes.pdf"));
	assert_eq!(data.get("senderName").map(AsRef::as_ref), Some("boss@example.com"));
}

#[tokio::test]
async fn file_shared_prunes_invalid_tokens() {
	let h = test_app();
	events::register(&h.app);

	h.store.add_user("u-1", "a@example.com", "driver", true);
	h.store.add_token("u-1", "phone", "t-dead");
	h.transport.script("t-dead", SendStatus::TokenNotRegistered);

	h.app
		.events
		.emit(
			&h.app,
			EVENT_FILE_SHARED,
			json!({
				"fileName": "a.txt",
				"fileUrl": "https://files.example.com/a.txt",
				"sharedBy": "nobody",
				"shareWithRole": "driver"
			}),
		)
		.await;

	assert!(h.store.tokens_for("u-1").is_empty(), "invalid token pruned by the event flow");
	assert_eq!(h.store.audit_count(), 0);
}

#[tokio::test]
async fn file_uploaded_record_notifies_the_uploader() {
	let h = test_app();
	events::register(&h.app);

	h.store.add_user("u-9", "up@example.com", "customer", true);
	h.store.add_token("u-9", "phone", "t9");

	h.app
		.events
		.emit(
			&h.app,
			EVENT_FILE_UPLOADED,
			json!({
				"fileName": "scan.png",
				"fileUrl": "https://files.example.com/scan.png",
				"uploadedBy": "u-9",
				"fileType": "image/png"
			}),
		)
		.await;

	assert_eq!(h.transport.attempted(), vec![Box::<str>::from("t9")]);

	let records = h.store.audit_records_for("u-9");
	assert_eq!(records.len(), 1);
	assert_eq!(records[0].data.get("type").map(AsRef::as_ref), Some("file_uploaded"));
	assert_eq!(records[0].data.get("fileType").map(AsRef::as_ref), Some("image/png"));
}

#[tokio::test]
async fn malformed_records_are_swallowed() {
	let h = test_app();
	events::register(&h.app);

	// Missing every required field; the subscriber logs and returns
	h.app.events.emit(&h.app, EVENT_FILE_SHARED, json!({ "unexpected": true })).await;
	h.app.events.emit(&h.app, EVENT_FILE_UPLOADED, json!("not even an object")).await;

	assert!(h.transport.attempted().is_empty());
	assert_eq!(h.store.audit_count(), 0);
}

#[tokio::test]
async fn store_failures_in_event_flows_are_swallowed() {
	let h = test_app();
	events::register(&h.app);
	h.store.set_unavailable();

	// No caller is waiting on an event, so this must simply log
	h.app
		.events
		.emit(
			&h.app,
			EVENT_FILE_UPLOADED,
			json!({
				"fileName": "a.txt",
				"fileUrl": "https://files.example.com/a.txt",
				"uploadedBy": "u-1"
			}),
		)
		.await;

	assert!(h.transport.attempted().is_empty());
}

// vim: ts=4
