//! Small shared value types.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ClResult, Error};

/// Unix timestamp in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

/// Current time in seconds.
pub fn now() -> ClResult<Timestamp> {
	let dur = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map_err(|_| Error::Internal("system clock before epoch".into()))?;
	Ok(Timestamp(dur.as_secs() as i64))
}

/// Current time in milliseconds, for transport payload data fields.
pub fn now_millis() -> ClResult<i64> {
	let dur = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map_err(|_| Error::Internal("system clock before epoch".into()))?;
	Ok(dur.as_millis() as i64)
}

// vim: ts=4
