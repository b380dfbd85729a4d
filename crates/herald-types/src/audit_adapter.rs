//! Adapter for the durable notification audit log.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt::Debug};

use crate::prelude::*;

/// Data for one audit entry. The record is user-facing history, not delivery
/// diagnostics: one entry summarizes that an attempt was made for a
/// recipient, regardless of how many device tokens were involved.
#[derive(Debug)]
pub struct CreateNotification<'a> {
	pub user_id: &'a str,
	pub title: &'a str,
	pub body: &'a str,
	pub data: &'a HashMap<Box<str>, Box<str>>,
	pub sent_at: Timestamp,
}

/// A stored audit entry as read back for history listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
	pub notification_id: u64,
	pub user_id: Box<str>,
	pub title: Box<str>,
	pub body: Box<str>,
	pub data: HashMap<Box<str>, Box<str>>,
	pub sent_at: Timestamp,
	pub is_read: bool,
}

#[async_trait]
pub trait AuditAdapter: Debug + Send + Sync {
	/// Appends an audit entry, returning its id. Never updates prior records.
	async fn create_notification(&self, notification: &CreateNotification<'_>) -> ClResult<u64>;

	/// Lists a user's notification history, newest first.
	async fn list_notifications(&self, user_id: &str) -> ClResult<Vec<NotificationView>>;
}

// vim: ts=4
