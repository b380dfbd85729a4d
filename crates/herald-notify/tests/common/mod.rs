//! In-memory fake adapters for exercising the fan-out flows.
//!
//! One fake store implements all three store traits (like the production
//! SQLite adapter); the fake transport is scripted per token string and
//! records every attempted send.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use herald_core::{Adapters, App, AppBuilderOpts, AppState};
use herald_types::audit_adapter::{AuditAdapter, CreateNotification, NotificationView};
use herald_types::error::{ClResult, Error};
use herald_types::push_transport::{NotificationPayload, PushTransport, SendStatus};
use herald_types::token_adapter::{DeviceToken, TokenAdapter};
use herald_types::user_adapter::{CreateUser, User, UserAdapter};

#[derive(Debug, Default)]
pub struct FakeStore {
	users: Mutex<Vec<User>>,
	tokens: Mutex<Vec<DeviceToken>>,
	notifications: Mutex<Vec<NotificationView>>,
	unavailable: Mutex<bool>,
}

impl FakeStore {
	pub fn add_user(&self, user_id: &str, email: &str, role: &str, approved: bool) {
		self.users.lock().unwrap().push(User {
			user_id: user_id.into(),
			email: email.into(),
			name: None,
			role: role.into(),
			approved,
		});
	}

	pub fn add_token(&self, user_id: &str, device_id: &str, token: &str) {
		self.tokens.lock().unwrap().push(DeviceToken {
			token: token.into(),
			user_id: user_id.into(),
			device_id: device_id.into(),
		});
	}

	/// Every store call fails with `DbError` from now on.
	pub fn set_unavailable(&self) {
		*self.unavailable.lock().unwrap() = true;
	}

	pub fn tokens_for(&self, user_id: &str) -> Vec<DeviceToken> {
		self.tokens
			.lock()
			.unwrap()
			.iter()
			.filter(|t| &*t.user_id == user_id)
			.cloned()
			.collect()
	}

	pub fn audit_records_for(&self, user_id: &str) -> Vec<NotificationView> {
		self.notifications
			.lock()
			.unwrap()
			.iter()
			.filter(|n| &*n.user_id == user_id)
			.cloned()
			.collect()
	}

	pub fn audit_count(&self) -> usize {
		self.notifications.lock().unwrap().len()
	}

	fn check_available(&self) -> ClResult<()> {
		if *self.unavailable.lock().unwrap() { Err(Error::DbError) } else { Ok(()) }
	}
}

#[async_trait]
impl UserAdapter for FakeStore {
	async fn read_user(&self, user_id: &str) -> ClResult<Option<User>> {
		self.check_available()?;
		Ok(self.users.lock().unwrap().iter().find(|u| &*u.user_id == user_id).cloned())
	}

	async fn read_user_by_email(&self, email: &str) -> ClResult<Option<User>> {
		self.check_available()?;
		Ok(self.users.lock().unwrap().iter().find(|u| &*u.email == email).cloned())
	}

	async fn list_users_by_role(&self, role: &str) -> ClResult<Vec<User>> {
		self.check_available()?;
		Ok(self
			.users
			.lock()
			.unwrap()
			.iter()
			.filter(|u| &*u.role == role && u.approved)
			.cloned()
			.collect())
	}

	async fn create_user(&self, user: &CreateUser<'_>) -> ClResult<()> {
		self.check_available()?;
		self.add_user(user.user_id, user.email, user.role, user.approved);
		Ok(())
	}
}

#[async_trait]
impl TokenAdapter for FakeStore {
	async fn list_device_tokens(&self, user_id: &str) -> ClResult<Vec<DeviceToken>> {
		self.check_available()?;
		Ok(self.tokens_for(user_id))
	}

	async fn create_device_token(
		&self,
		user_id: &str,
		device_id: &str,
		token: &str,
	) -> ClResult<()> {
		self.check_available()?;
		self.add_token(user_id, device_id, token);
		Ok(())
	}

	async fn delete_device_token(&self, user_id: &str, device_id: &str) -> ClResult<()> {
		self.check_available()?;
		self.tokens
			.lock()
			.unwrap()
			.retain(|t| !(&*t.user_id == user_id && &*t.device_id == device_id));
		Ok(())
	}
}

#[async_trait]
impl AuditAdapter for FakeStore {
	async fn create_notification(&self, notification: &CreateNotification<'_>) -> ClResult<u64> {
		self.check_available()?;
		let mut records = self.notifications.lock().unwrap();
		let id = records.len() as u64 + 1;
		records.push(NotificationView {
			notification_id: id,
			user_id: notification.user_id.into(),
			title: notification.title.into(),
			body: notification.body.into(),
			data: notification.data.clone(),
			sent_at: notification.sent_at,
			is_read: false,
		});
		Ok(id)
	}

	async fn list_notifications(&self, user_id: &str) -> ClResult<Vec<NotificationView>> {
		self.check_available()?;
		let mut records = self.audit_records_for(user_id);
		records.reverse();
		Ok(records)
	}
}

/// Transport scripted per token string; unscripted tokens are delivered.
#[derive(Debug, Default)]
pub struct FakeTransport {
	statuses: Mutex<HashMap<Box<str>, SendStatus>>,
	sent: Mutex<Vec<Box<str>>>,
}

impl FakeTransport {
	pub fn script(&self, token: &str, status: SendStatus) {
		self.statuses.lock().unwrap().insert(token.into(), status);
	}

	/// Tokens in attempted order (unordered across a concurrent fan-out).
	pub fn attempted(&self) -> Vec<Box<str>> {
		self.sent.lock().unwrap().clone()
	}
}

#[async_trait]
impl PushTransport for FakeTransport {
	async fn send(&self, token: &str, _payload: &NotificationPayload) -> SendStatus {
		self.sent.lock().unwrap().push(token.into());
		self.statuses.lock().unwrap().get(token).cloned().unwrap_or(SendStatus::Sent)
	}
}

pub struct TestHarness {
	pub store: Arc<FakeStore>,
	pub transport: Arc<FakeTransport>,
	pub app: App,
}

pub fn test_app() -> TestHarness {
	let store = Arc::new(FakeStore::default());
	let transport = Arc::new(FakeTransport::default());
	let app = AppState::build(
		AppBuilderOpts::default(),
		Adapters {
			user_adapter: store.clone(),
			token_adapter: store.clone(),
			audit_adapter: store.clone(),
			push_transport: transport.clone(),
		},
	);
	TestHarness { store, transport, app }
}

// vim: ts=4
