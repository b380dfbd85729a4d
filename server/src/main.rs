//! Herald server composition root.
//!
//! Reads configuration from the environment, wires the SQLite store adapter
//! and the FCM transport into the app state, registers the record-creation
//! subscribers, and serves the HTTP entry points.

use std::{env, path::PathBuf, sync::Arc};

use herald_core::{Adapters, AppBuilderOpts, AppState};
use herald_push_transport_fcm::PushTransportFcm;
use herald_store_adapter_sqlite::StoreAdapterSqlite;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.init();

	let listen: Box<str> =
		env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:3000".to_string()).into();
	let db_dir = PathBuf::from(env::var("DB_DIR").unwrap_or_else(|_| "./data".to_string()));
	let fan_out_width =
		env::var("FANOUT_WIDTH").ok().and_then(|width| width.parse().ok()).unwrap_or(10);
	let fcm_endpoint = env::var("FCM_ENDPOINT").map_err(|_| "FCM_ENDPOINT not configured")?;
	let fcm_auth_token = env::var("FCM_AUTH_TOKEN").map_err(|_| "FCM_AUTH_TOKEN not configured")?;

	std::fs::create_dir_all(&db_dir)?;
	let store = Arc::new(StoreAdapterSqlite::new(db_dir.join("store.db")).await?);
	let transport = Arc::new(PushTransportFcm::new(fcm_endpoint, fcm_auth_token)?);

	let app = AppState::build(
		AppBuilderOpts { listen: listen.clone(), fan_out_width },
		Adapters {
			user_adapter: store.clone(),
			token_adapter: store.clone(),
			audit_adapter: store,
			push_transport: transport,
		},
	);

	herald_notify::events::register(&app);

	let router = herald_notify::routes().with_state(app);

	tracing::info!(listen = %listen, version = herald_core::app::VERSION, "Starting herald server");
	let listener = tokio::net::TcpListener::bind(&*listen).await?;
	axum::serve(listener, router).await?;

	Ok(())
}

// vim: ts=4
