//! Recipient resolution.
//!
//! Maps a recipient specification to eligible users. A miss is never an
//! error: callers turn an absent result into their `userFound: false` branch.
//! Only store unavailability surfaces as `Err`.

use crate::prelude::*;
use herald_types::user_adapter::User;

/// Members of this role must be approved before they receive notifications.
const ROLE_CUSTOMER: &str = "customer";

/// Normalizes an email address for lookup (trim + lowercase).
pub fn normalize_email(email: &str) -> String {
	email.trim().to_lowercase()
}

/// Finds a user by email address.
///
/// The address is normalized before lookup. A matched customer whose approval
/// flag is unset resolves to `None`, the same outcome as no match: approval
/// gating happens at resolution time, not later.
pub async fn find_user_by_email(app: &App, email: &str) -> ClResult<Option<User>> {
	let normalized = normalize_email(email);

	let Some(user) = app.user_adapter.read_user_by_email(&normalized).await? else {
		info!(email = %normalized, "User not found");
		return Ok(None);
	};

	if user.role.as_ref() == ROLE_CUSTOMER && !user.approved {
		info!(email = %normalized, "User found but not approved");
		return Ok(None);
	}

	debug!(email = %normalized, user_id = %user.user_id, "User found");
	Ok(Some(user))
}

/// Lists the approved members of a role. The store excludes unapproved users
/// for every role, not only customers.
pub async fn list_role_members(app: &App, role: &str) -> ClResult<Vec<User>> {
	let members = app.user_adapter.list_users_by_role(role).await?;
	debug!(role = %role, count = members.len(), "Resolved role members");
	Ok(members)
}


// vim: ts=4
