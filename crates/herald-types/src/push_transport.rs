//! Adapter for the push delivery transport.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt::Debug};

/// Notification content sent to one device.
///
/// Immutable once constructed for a given send; the destination token is the
/// only thing that varies across recipients of "the same" notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
	/// Notification title
	pub title: Box<str>,
	/// Notification body text
	pub body: Box<str>,
	/// Structured data: caller-supplied keys plus system-injected keys
	/// such as `type` and a millisecond `timestamp`.
	#[serde(default)]
	pub data: HashMap<Box<str>, Box<str>>,
}

impl NotificationPayload {
	pub fn new(title: impl Into<Box<str>>, body: impl Into<Box<str>>) -> Self {
		Self { title: title.into(), body: body.into(), data: HashMap::new() }
	}

	pub fn with_data(mut self, key: impl Into<Box<str>>, value: impl Into<Box<str>>) -> Self {
		self.data.insert(key.into(), value.into());
		self
	}
}

/// Result of handing one payload to the transport for one token.
///
/// This is a closed enumeration so outcome classification is a value-level
/// match instead of string inspection. Transport implementations fold every
/// error they encounter into one of these variants; the `send` call itself
/// never fails.
#[derive(Debug, Clone)]
pub enum SendStatus {
	/// Accepted by the transport for delivery
	Sent,
	/// The registration token is no longer registered (device uninstalled
	/// or token rotated away)
	TokenNotRegistered,
	/// The token is syntactically or semantically invalid
	TokenInvalid(Box<str>),
	/// Any other failure: network, quota, transport-side 5xx
	Failed(Box<str>),
}

#[async_trait]
pub trait PushTransport: Debug + Send + Sync {
	/// Attempts delivery of `payload` to a single device token.
	async fn send(&self, token: &str, payload: &NotificationPayload) -> SendStatus;
}

// vim: ts=4
