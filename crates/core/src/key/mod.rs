//! How the keys are structured in the key value store
///
/// crate::key::database::tb             /{kv}*{ns}*{db}!tb{tb}
///
/// crate::key::table::all               /{kv}*{ns}*{db}*{tb}
/// crate::key::table::ev                /{kv}*{ns}*{db}*{tb}!ev{ev}
/// crate::key::table::fd                /{kv}*{ns}*{db}*{tb}!fd{fd}
/// crate::key::table::ix                /{kv}*{ns}*{db}*{tb}!ix{ix}
/// crate::key::table::lq                /{kv}*{ns}*{db}*{tb}!lq{lq}
/// crate::key::table::st                /{kv}*{ns}*{db}*{tb}!st
///
/// crate::key::index                    /{kv}*{ns}*{db}*{tb}+{ix}*{fd}{id}
///
/// crate::key::thing                    /{kv}*{ns}*{db}*{tb}*{id}
///
pub mod database;
pub mod index;
pub mod table;
pub mod thing;

use crate::err::Error;
use crate::val::{Id, Thing};
use std::fmt;

/// Encodes a key layout into its ordered byte representation
pub trait KeyEncode {
	fn encode(&self) -> Result<Vec<u8>, Error>;
}

/// Decodes a key layout from its ordered byte representation
pub trait KeyDecode<'a>: Sized {
	fn decode(bytes: &'a [u8]) -> Result<Self, Error>;
}

/// The fully qualified location of a record, or of a whole
/// table when the record identifier is absent.
///
/// The derived ordering matches the ordering of the encoded
/// bytes, so keys sort by namespace, database, table and id.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct StorageKey {
	pub kv: String,
	pub ns: String,
	pub db: String,
	pub tb: String,
	pub id: Option<Id>,
}

impl StorageKey {
	pub fn new(kv: &str, ns: &str, db: &str, tb: &str, id: Option<Id>) -> Self {
		Self {
			kv: kv.to_owned(),
			ns: ns.to_owned(),
			db: db.to_owned(),
			tb: tb.to_owned(),
			id,
		}
	}

	/// The key of a record in the same namespace and database
	pub fn record(&self, tb: &str, id: Id) -> Self {
		Self {
			kv: self.kv.clone(),
			ns: self.ns.clone(),
			db: self.db.clone(),
			tb: tb.to_owned(),
			id: Some(id),
		}
	}

	/// The record id this key points to, if any
	pub fn thing(&self) -> Option<Thing> {
		self.id.as_ref().map(|id| Thing::new(self.tb.as_str(), id.clone()))
	}

	pub fn encode(&self) -> Result<Vec<u8>, Error> {
		match &self.id {
			Some(id) => thing::new(&self.kv, &self.ns, &self.db, &self.tb, id).encode(),
			None => table::all::new(&self.kv, &self.ns, &self.db, &self.tb).encode(),
		}
	}

	pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
		// A record key is a table key with an id appended
		match thing::Thing::decode(bytes) {
			Ok(k) => Ok(Self::new(k.kv, k.ns, k.db, k.tb, Some(k.id))),
			Err(_) => {
				let k = table::all::All::decode(bytes)?;
				Ok(Self::new(k.kv, k.ns, k.db, k.tb, None))
			}
		}
	}
}

impl fmt::Display for StorageKey {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "/{}/{}/{}/{}", self.kv, self.ns, self.db, self.tb)?;
		if let Some(id) = &self.id {
			write!(f, "/{id}")?;
		}
		Ok(())
	}
}
