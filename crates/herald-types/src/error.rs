//! Error type shared by every Herald crate.

use axum::{Json, http::StatusCode, response::IntoResponse};

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	DbError,
	ValidationError(String),
	Internal(String),
	ServiceUnavailable(String),
	ConfigError(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::DbError => write!(f, "database error"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::ServiceUnavailable(msg) => write!(f, "service unavailable: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let (status, message) = match &self {
			Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
			Error::ValidationError(_) => (StatusCode::BAD_REQUEST, self.to_string()),
			Error::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
			_ => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
		};
		(status, Json(serde_json::json!({ "error": message }))).into_response()
	}
}

// vim: ts=4
