use std::fmt;

/// The level at which an actor was authenticated
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Level {
	/// An anonymous or record level actor
	#[default]
	No,
	/// A system actor with access to everything
	Root,
	/// A system actor defined on a namespace
	Namespace(String),
	/// A system actor defined on a database
	Database(String, String),
}

/// Specifies the current authentication for the datastore execution context.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Auth {
	level: Level,
}

impl Auth {
	pub fn new(level: Level) -> Self {
		Self {
			level,
		}
	}

	pub fn for_root() -> Self {
		Self::new(Level::Root)
	}

	pub fn for_ns(ns: &str) -> Self {
		Self::new(Level::Namespace(ns.to_owned()))
	}

	pub fn for_db(ns: &str, db: &str) -> Self {
		Self::new(Level::Database(ns.to_owned(), db.to_owned()))
	}

	pub fn level(&self) -> &Level {
		&self.level
	}

	/// Check if the current auth is anonymous
	pub fn is_anon(&self) -> bool {
		matches!(self.level, Level::No)
	}
}

impl fmt::Display for Auth {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match &self.level {
			Level::No => f.write_str("Anonymous"),
			Level::Root => f.write_str("Root"),
			Level::Namespace(ns) => write!(f, "Namespace actor on '{ns}'"),
			Level::Database(ns, db) => write!(f, "Database actor on '{ns}/{db}'"),
		}
	}
}
