//! Record-creation event bus.
//!
//! The document store signals creation of certain records ("file shared",
//! "file uploaded") by emitting an event carrying the new record's fields.
//! Feature crates register handlers against the event class name at startup.
//! A handler produces no result: nothing is waiting on an event, so handlers
//! log their own failures and never propagate them.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use crate::prelude::*;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Handler invoked with the newly created record's fields.
pub type EventHandler = Arc<dyn Fn(App, serde_json::Value) -> BoxFuture<'static, ()> + Send + Sync>;

/// Emitted when a "file shared" record is created.
pub const EVENT_FILE_SHARED: &str = "file_shared";
/// Emitted when a "file uploaded" record is created.
pub const EVENT_FILE_UPLOADED: &str = "file_uploaded";

#[derive(Default)]
pub struct EventBus {
	handlers: RwLock<HashMap<Box<str>, Vec<EventHandler>>>,
}

impl EventBus {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `handler` against a named event class.
	pub fn subscribe(&self, event: &str, handler: EventHandler) {
		let mut handlers = match self.handlers.write() {
			Ok(guard) => guard,
			Err(poisoned) => poisoned.into_inner(),
		};
		handlers.entry(event.into()).or_default().push(handler);
	}

	/// Delivers a newly created record to every handler subscribed to `event`.
	pub async fn emit(&self, app: &App, event: &str, record: serde_json::Value) {
		let subscribed: Vec<EventHandler> = {
			let handlers = match self.handlers.read() {
				Ok(guard) => guard,
				Err(poisoned) => poisoned.into_inner(),
			};
			handlers.get(event).cloned().unwrap_or_default()
		};

		if subscribed.is_empty() {
			debug!(event = %event, "No handlers subscribed");
			return;
		}

		for handler in subscribed {
			handler(Arc::clone(app), record.clone()).await;
		}
	}
}

impl std::fmt::Debug for EventBus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let count = match self.handlers.read() {
			Ok(guard) => guard.values().map(Vec::len).sum::<usize>(),
			Err(_) => 0,
		};
		f.debug_struct("EventBus").field("handlers", &count).finish()
	}
}

// vim: ts=4
