use crate::cnf::MAX_COMPUTATION_DEPTH;
use crate::dbs::Scope;
use crate::err::Error;
use crate::iam::Auth;
use crate::val::Value;
use std::sync::Arc;

/// An Options is passed around when processing a set of query
/// statements.
///
/// An Options contains specific information for how
/// to process each particular statement, including the selected
/// namespace and database, the authenticated actor, and the
/// enclosing documents of any nested statement.
#[derive(Clone, Debug)]
pub struct Options {
	/// The name of the engine instance
	pub(crate) kv: Arc<str>,
	/// The currently selected Namespace
	pub(crate) ns: Option<Arc<str>>,
	/// The currently selected Database
	pub(crate) db: Option<Arc<str>>,
	/// Approximately how large is the current call stack?
	dive: u32,
	/// Connection authentication data
	pub(crate) auth: Arc<Auth>,
	/// Is authentication enabled on this datastore?
	pub(crate) auth_enabled: bool,
	/// Should we run permissions checks?
	pub(crate) perms: bool,
	/// Must tables be defined before use?
	pub(crate) strict: bool,
	/// The documents enclosing the current statement
	pub(crate) scope: Scope,
}

impl Options {
	pub fn new(kv: &str) -> Self {
		Self {
			kv: Arc::from(kv),
			ns: None,
			db: None,
			dive: *MAX_COMPUTATION_DEPTH,
			auth: Arc::new(Auth::default()),
			auth_enabled: true,
			perms: true,
			strict: false,
			scope: Scope::default(),
		}
	}

	// --------------------------------------------------

	/// Specify which Namespace should be used for
	/// code which uses this `Options` object.
	pub fn with_ns(mut self, ns: Option<Arc<str>>) -> Self {
		self.ns = ns;
		self
	}

	/// Specify which Database should be used for
	/// code which uses this `Options` object.
	pub fn with_db(mut self, db: Option<Arc<str>>) -> Self {
		self.db = db;
		self
	}

	/// Specify the authentication options for subsequent
	/// code which uses this `Options`, with chaining.
	pub fn with_auth(mut self, auth: Arc<Auth>) -> Self {
		self.auth = auth;
		self
	}

	/// Specify whether tables must be defined before use
	pub fn with_strict(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}

	/// Specify whether authentication is enabled
	pub fn with_auth_enabled(mut self, auth_enabled: bool) -> Self {
		self.auth_enabled = auth_enabled;
		self
	}

	// --------------------------------------------------

	/// Create a new Options object for a subquery,
	/// reducing the remaining computation depth
	pub fn dive(&self, cost: u8) -> Result<Self, Error> {
		match self.dive.checked_sub(cost as u32) {
			Some(dive) => Ok(Self {
				dive,
				..self.clone()
			}),
			None => Err(Error::ComputationDepthExceeded),
		}
	}

	/// Create a new Options object with permissions toggled
	pub fn new_with_perms(&self, perms: bool) -> Self {
		Self {
			perms,
			..self.clone()
		}
	}

	/// Create a new Options object for a statement nested
	/// inside the given document
	pub fn new_with_frame(&self, doc: Value) -> Self {
		Self {
			scope: self.scope.push(doc),
			..self.clone()
		}
	}

	// --------------------------------------------------

	/// Get currently selected NS
	pub fn ns(&self) -> Result<&str, Error> {
		self.ns.as_deref().ok_or(Error::NsEmpty)
	}

	/// Get currently selected DB
	pub fn db(&self) -> Result<&str, Error> {
		self.db.as_deref().ok_or(Error::DbEmpty)
	}

	/// Get currently selected NS and DB
	pub fn ns_db(&self) -> Result<(&str, &str), Error> {
		Ok((self.ns()?, self.db()?))
	}

	/// Validate Options for Database
	pub fn valid_for_db(&self) -> Result<(), Error> {
		if self.ns.is_none() {
			return Err(Error::NsEmpty);
		}
		if self.db.is_none() {
			return Err(Error::DbEmpty);
		}
		Ok(())
	}

	/// Whether table permissions apply to the current actor
	pub fn check_perms(&self) -> bool {
		// Check if permissions are enabled for this sub-process
		if !self.perms {
			return false;
		}
		// Check if server auth is disabled
		if !self.auth_enabled {
			return false;
		}
		// Only record level actors are subject to table permissions
		self.auth.is_anon()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dive_runs_out() {
		let mut opt = Options::new("tessera");
		for _ in 0..*MAX_COMPUTATION_DEPTH {
			opt = opt.dive(1).unwrap();
		}
		assert!(matches!(opt.dive(1), Err(Error::ComputationDepthExceeded)));
	}

	#[test]
	fn missing_namespace_or_database() {
		let opt = Options::new("tessera");
		assert!(matches!(opt.valid_for_db(), Err(Error::NsEmpty)));
		let opt = opt.with_ns(Some("test".into()));
		assert!(matches!(opt.valid_for_db(), Err(Error::DbEmpty)));
		let opt = opt.with_db(Some("test".into()));
		assert_eq!(opt.ns_db().unwrap(), ("test", "test"));
	}

	#[test]
	fn permissions_apply_to_anonymous_actors() {
		let opt = Options::new("tessera");
		assert!(opt.check_perms());
		assert!(!opt.new_with_perms(false).check_perms());
		assert!(!opt.clone().with_auth_enabled(false).check_perms());
		assert!(!opt.with_auth(Arc::new(Auth::for_root())).check_perms());
	}
}
