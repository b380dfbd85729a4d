//! FCM push transport adapter.
//!
//! Speaks the FCM HTTP v1 message shape over an HTTP/2 client and folds
//! every response into the closed [`SendStatus`] enumeration, keeping
//! outcome classification a value-level match for the dispatcher.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::Serialize;
use std::collections::HashMap;

use herald_types::error::{ClResult, Error};
use herald_types::push_transport::{NotificationPayload, PushTransport, SendStatus};

/// FCM HTTP v1 request body
/// See: https://firebase.google.com/docs/reference/fcm/rest/v1/projects.messages
#[derive(Debug, Serialize)]
struct FcmRequest<'a> {
	message: FcmMessage<'a>,
}

#[derive(Debug, Serialize)]
struct FcmMessage<'a> {
	token: &'a str,
	notification: FcmNotification<'a>,
	data: &'a HashMap<Box<str>, Box<str>>,
}

#[derive(Debug, Serialize)]
struct FcmNotification<'a> {
	title: &'a str,
	body: &'a str,
}

type HttpsClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

pub struct PushTransportFcm {
	client: HttpsClient,
	endpoint: Box<str>,
	auth_token: Box<str>,
}

impl PushTransportFcm {
	/// `endpoint` is the project's full `messages:send` URL; `auth_token` a
	/// pre-provisioned OAuth2 bearer token. Minting the token from a service
	/// account is left to the deployment environment.
	pub fn new(endpoint: impl Into<Box<str>>, auth_token: impl Into<Box<str>>) -> ClResult<Self> {
		let connector = HttpsConnectorBuilder::new()
			.with_native_roots()
			.map_err(|e| {
				Error::ConfigError(format!("no native root CA certificates found: {}", e))
			})?
			.https_only()
			.enable_http2()
			.build();
		let client = Client::builder(TokioExecutor::new()).http2_only(true).build(connector);

		Ok(Self { client, endpoint: endpoint.into(), auth_token: auth_token.into() })
	}
}

impl std::fmt::Debug for PushTransportFcm {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PushTransportFcm").field("endpoint", &self.endpoint).finish_non_exhaustive()
	}
}

#[async_trait]
impl PushTransport for PushTransportFcm {
	async fn send(&self, token: &str, payload: &NotificationPayload) -> SendStatus {
		let request_body = FcmRequest {
			message: FcmMessage {
				token,
				notification: FcmNotification { title: &payload.title, body: &payload.body },
				data: &payload.data,
			},
		};
		let body_json = match serde_json::to_vec(&request_body) {
			Ok(json) => json,
			Err(e) => {
				return SendStatus::Failed(format!("payload serialization error: {}", e).into());
			}
		};

		let request = match hyper::Request::builder()
			.method(hyper::Method::POST)
			.uri(&*self.endpoint)
			.header("Content-Type", "application/json")
			.header("Authorization", format!("Bearer {}", self.auth_token))
			.body(Full::new(Bytes::from(body_json)))
		{
			Ok(req) => req,
			Err(e) => return SendStatus::Failed(format!("request build error: {}", e).into()),
		};

		match self.client.request(request).await {
			Ok(response) => {
				let status = response.status();
				let body_bytes = response.into_body().collect().await.ok().map(|b| b.to_bytes());
				let body_str =
					body_bytes.as_ref().and_then(|b| std::str::from_utf8(b).ok()).unwrap_or("");
				classify_response(status, body_str)
			}
			Err(e) => SendStatus::Failed(format!("network error: {}", e).into()),
		}
	}
}

/// Maps an FCM HTTP v1 response onto the transport outcome enumeration.
///
/// FCM reports a dead registration as 404 with error status `UNREGISTERED`
/// and a malformed token as 400 with `INVALID_ARGUMENT`. Anything else,
/// including auth trouble, throttling, and 5xx, is a non-token failure.
fn classify_response(status: hyper::StatusCode, body: &str) -> SendStatus {
	if status.is_success() {
		return SendStatus::Sent;
	}

	let error_status = error_status(body);
	match status {
		hyper::StatusCode::NOT_FOUND | hyper::StatusCode::GONE => SendStatus::TokenNotRegistered,
		hyper::StatusCode::BAD_REQUEST if error_status.as_deref() == Some("INVALID_ARGUMENT") => {
			SendStatus::TokenInvalid(format!("HTTP {}: {}", status, body).into())
		}
		_ if error_status.as_deref() == Some("UNREGISTERED") => SendStatus::TokenNotRegistered,
		_ => SendStatus::Failed(format!("HTTP {}", status).into()),
	}
}

/// Pulls `error.status` out of an FCM error response body.
fn error_status(body: &str) -> Option<String> {
	let value: serde_json::Value = serde_json::from_str(body).ok()?;
	Some(value.get("error")?.get("status")?.as_str()?.to_owned())
}


// vim: ts=4
