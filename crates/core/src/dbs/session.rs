use crate::ctx::MutableContext;
use crate::iam::Auth;
use crate::val::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Specifies the current session information when processing a query.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Session {
	/// The current [`Auth`] information
	pub au: Arc<Auth>,
	/// The current connection ID
	pub id: Option<String>,
	/// The currently selected namespace
	pub ns: Option<String>,
	/// The currently selected database
	pub db: Option<String>,
}

impl Session {
	/// Create a session with root authentication
	pub fn owner() -> Session {
		Session {
			au: Arc::new(Auth::for_root()),
			..Session::default()
		}
	}
	/// Create a session with namespace authentication
	pub fn for_ns(ns: &str) -> Session {
		Session {
			ns: Some(ns.to_owned()),
			au: Arc::new(Auth::for_ns(ns)),
			..Session::default()
		}
	}
	/// Create a session with database authentication
	pub fn for_db(ns: &str, db: &str) -> Session {
		Session {
			ns: Some(ns.to_owned()),
			db: Some(db.to_owned()),
			au: Arc::new(Auth::for_db(ns, db)),
			..Session::default()
		}
	}
	/// Create an anonymous session, subject to table permissions
	pub fn viewer() -> Session {
		Session::default()
	}
	/// Set the selected namespace for the session
	pub fn with_ns(mut self, ns: &str) -> Session {
		self.ns = Some(ns.to_owned());
		self
	}
	/// Set the selected database for the session
	pub fn with_db(mut self, db: &str) -> Session {
		self.db = Some(db.to_owned());
		self
	}
	/// Retrieves the selected namespace
	pub(crate) fn ns(&self) -> Option<Arc<str>> {
		self.ns.as_deref().map(Into::into)
	}
	/// Retrieves the selected database
	pub(crate) fn db(&self) -> Option<Arc<str>> {
		self.db.as_deref().map(Into::into)
	}
	/// Expose the session details as the `$session` parameter
	pub(crate) fn context(&self, mut ctx: MutableContext) -> MutableContext {
		let mut val = BTreeMap::new();
		val.insert("id".to_owned(), Value::from(self.id.clone()));
		val.insert("ns".to_owned(), Value::from(self.ns.clone()));
		val.insert("db".to_owned(), Value::from(self.db.clone()));
		ctx.add_value("session", Arc::new(Value::from(val)));
		ctx
	}
}
