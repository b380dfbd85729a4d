//! Single-token dispatch and outcome classification.

use herald_types::push_transport::{NotificationPayload, PushTransport, SendStatus};
use herald_types::token_adapter::DeviceToken;

use crate::prelude::*;

/// Classified outcome of one delivery attempt.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
	Delivered {
		token: DeviceToken,
	},
	/// Delivery failed but the token may still be good (network trouble,
	/// quota, transport-side 5xx). The token is kept; no retry happens
	/// within this invocation.
	TransientFailure {
		token: DeviceToken,
		error: Box<str>,
	},
	/// The transport reported the registration token unregistered or
	/// invalid. The registry entry gets pruned.
	PermanentFailure {
		token: DeviceToken,
		error: Box<str>,
	},
}

impl DispatchOutcome {
	pub fn is_delivered(&self) -> bool {
		matches!(self, Self::Delivered { .. })
	}

	pub fn token(&self) -> &DeviceToken {
		match self {
			Self::Delivered { token }
			| Self::TransientFailure { token, .. }
			| Self::PermanentFailure { token, .. } => token,
		}
	}
}

/// Sends `payload` to one token and classifies the result.
///
/// A transport error is permanent if and only if it reports the token
/// unregistered or invalid; every other error is transient.
pub async fn dispatch(
	transport: &dyn PushTransport,
	token: DeviceToken,
	payload: &NotificationPayload,
) -> DispatchOutcome {
	match transport.send(&token.token, payload).await {
		SendStatus::Sent => {
			debug!(user_id = %token.user_id, device_id = %token.device_id, "Notification sent");
			DispatchOutcome::Delivered { token }
		}
		SendStatus::TokenNotRegistered => {
			info!(
				user_id = %token.user_id,
				device_id = %token.device_id,
				"Token no longer registered"
			);
			DispatchOutcome::PermanentFailure { token, error: "token not registered".into() }
		}
		SendStatus::TokenInvalid(error) => {
			info!(
				user_id = %token.user_id,
				device_id = %token.device_id,
				error = %error,
				"Token invalid"
			);
			DispatchOutcome::PermanentFailure { token, error }
		}
		SendStatus::Failed(error) => {
			warn!(
				user_id = %token.user_id,
				device_id = %token.device_id,
				error = %error,
				"Delivery failed"
			);
			DispatchOutcome::TransientFailure { token, error }
		}
	}
}


// vim: ts=4
