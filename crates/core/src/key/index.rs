//! Stores an index entry
use crate::err::Error;
use crate::key::KeyEncode;
use crate::val::{Array, Id};
use serde::{Deserialize, Serialize};

/// An index entry for a set of field values.
///
/// Unique indexes store a single entry per value set, with no
/// record id, whose value is the record id owning the value set.
/// Other indexes store one entry per record.
#[derive(Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Index<'a> {
	__: u8,
	pub kv: &'a str,
	_a: u8,
	pub ns: &'a str,
	_b: u8,
	pub db: &'a str,
	_c: u8,
	pub tb: &'a str,
	_d: u8,
	pub ix: &'a str,
	_e: u8,
	pub fd: Array,
	pub id: Option<Id>,
}
impl_key!(Index);

pub fn new<'a>(
	kv: &'a str,
	ns: &'a str,
	db: &'a str,
	tb: &'a str,
	ix: &'a str,
	fd: Array,
	id: Option<Id>,
) -> Index<'a> {
	Index::new(kv, ns, db, tb, ix, fd, id)
}

/// The start of the keyspace of a single index
pub fn prefix(kv: &str, ns: &str, db: &str, tb: &str, ix: &str) -> Result<Vec<u8>, Error> {
	let mut k = super::table::all::new(kv, ns, db, tb).encode()?;
	k.push(b'+');
	k.extend_from_slice(ix.as_bytes());
	k.extend_from_slice(&[0x00, b'*', 0x00]);
	Ok(k)
}

/// The end of the keyspace of a single index
pub fn suffix(kv: &str, ns: &str, db: &str, tb: &str, ix: &str) -> Result<Vec<u8>, Error> {
	let mut k = super::table::all::new(kv, ns, db, tb).encode()?;
	k.push(b'+');
	k.extend_from_slice(ix.as_bytes());
	k.extend_from_slice(&[0x00, b'*', 0xff]);
	Ok(k)
}

impl<'a> Index<'a> {
	pub fn new(
		kv: &'a str,
		ns: &'a str,
		db: &'a str,
		tb: &'a str,
		ix: &'a str,
		fd: Array,
		id: Option<Id>,
	) -> Self {
		Self {
			__: b'/',
			kv,
			_a: b'*',
			ns,
			_b: b'*',
			db,
			_c: b'*',
			tb,
			_d: b'+',
			ix,
			_e: b'*',
			fd,
			id,
		}
	}
}
