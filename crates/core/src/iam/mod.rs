use std::fmt;
use thiserror::Error;

mod auth;

pub use self::auth::*;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
	#[error("Not enough permissions to perform this action")]
	NotAllowed {
		actor: String,
		action: String,
		resource: String,
	},
}

/// The kind of operation being checked against an actor
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
	View,
	Edit,
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Action::View => f.write_str("View"),
			Action::Edit => f.write_str("Edit"),
		}
	}
}

/// Checks whether the actor may reach the given namespace and database.
///
/// Record level (anonymous) actors may reach whichever namespace and
/// database their session selected, with table permissions applied on
/// top. System actors are confined to the level they were defined on.
pub fn check_access(auth: &Auth, action: Action, ns: &str, db: &str) -> Result<(), Error> {
	let allowed = match auth.level() {
		Level::No | Level::Root => true,
		Level::Namespace(n) => n == ns,
		Level::Database(n, d) => n == ns && d == db,
	};
	match allowed {
		true => Ok(()),
		false => Err(Error::NotAllowed {
			actor: auth.to_string(),
			action: action.to_string(),
			resource: format!("database '{db}' in namespace '{ns}'"),
		}),
	}
}

/// Checks whether the actor may change schema definitions
pub fn check_define(auth: &Auth, ns: &str, db: &str) -> Result<(), Error> {
	match auth.level() {
		Level::No => Err(Error::NotAllowed {
			actor: auth.to_string(),
			action: Action::Edit.to_string(),
			resource: format!("definitions of database '{db}' in namespace '{ns}'"),
		}),
		_ => check_access(auth, Action::Edit, ns, db),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn namespace_actor_is_confined() {
		let auth = Auth::for_ns("test");
		assert!(check_access(&auth, Action::Edit, "test", "any").is_ok());
		assert!(check_access(&auth, Action::Edit, "other", "any").is_err());
	}

	#[test]
	fn database_actor_is_confined() {
		let auth = Auth::for_db("test", "test");
		assert!(check_access(&auth, Action::View, "test", "test").is_ok());
		assert!(check_access(&auth, Action::View, "test", "other").is_err());
	}

	#[test]
	fn anonymous_actor_cannot_define() {
		let auth = Auth::default();
		assert!(check_access(&auth, Action::Edit, "test", "test").is_ok());
		assert!(check_define(&auth, "test", "test").is_err());
		assert!(check_define(&Auth::for_root(), "test", "test").is_ok());
	}
}
