//! Notification fan-out dispatcher.
//!
//! Resolves a recipient specification (email address, user id, or role) into
//! the set of live device tokens, sends the payload to each token, classifies
//! every per-token outcome, prunes permanently invalid tokens from the
//! registry, records durable audit history, and aggregates success/failure
//! counts for the caller.
//!
//! # Entry points
//!
//! - [`fanout::notify_user_by_email`] - single recipient by email
//! - [`fanout::notify_file_to_customer`] - file-received notification for a
//!   single recipient by email
//! - [`fanout::notify_role`] - broadcast to every approved member of a role
//! - [`fanout::notify_user_id`] - single recipient by user id
//! - [`events::register`] - subscribers reacting to `file_shared` /
//!   `file_uploaded` record creation
//! - [`handler`] - the HTTP surface for the two direct entry points

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod audit;
pub mod dispatch;
pub mod events;
pub mod fanout;
pub mod handler;
pub mod resolver;

mod prelude;

pub use dispatch::DispatchOutcome;
pub use fanout::{
	FanOutResult, notify_file_to_customer, notify_role, notify_user_by_email, notify_user_id,
};
pub use handler::routes;

// vim: ts=4
