//! App state type

use std::sync::Arc;

use crate::events::EventBus;

use herald_types::audit_adapter::AuditAdapter;
use herald_types::push_transport::PushTransport;
use herald_types::token_adapter::TokenAdapter;
use herald_types::user_adapter::UserAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,
	pub events: EventBus,

	pub user_adapter: Arc<dyn UserAdapter>,
	pub token_adapter: Arc<dyn TokenAdapter>,
	pub audit_adapter: Arc<dyn AuditAdapter>,
	pub push_transport: Arc<dyn PushTransport>,
}

pub type App = Arc<AppState>;

/// Adapter bundle handed to [`AppState::build`] by the composition root.
pub struct Adapters {
	pub user_adapter: Arc<dyn UserAdapter>,
	pub token_adapter: Arc<dyn TokenAdapter>,
	pub audit_adapter: Arc<dyn AuditAdapter>,
	pub push_transport: Arc<dyn PushTransport>,
}

#[derive(Debug, Clone)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	/// Upper bound on concurrent per-token transport calls within one fan-out
	pub fan_out_width: usize,
}

impl Default for AppBuilderOpts {
	fn default() -> Self {
		Self { listen: "127.0.0.1:3000".into(), fan_out_width: 10 }
	}
}

impl AppState {
	pub fn build(opts: AppBuilderOpts, adapters: Adapters) -> App {
		Arc::new(Self {
			opts,
			events: EventBus::new(),
			user_adapter: adapters.user_adapter,
			token_adapter: adapters.token_adapter,
			audit_adapter: adapters.audit_adapter,
			push_transport: adapters.push_transport,
		})
	}
}

// vim: ts=4
