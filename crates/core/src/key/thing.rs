//! Stores a record document
use crate::err::Error;
use crate::key::KeyEncode;
use crate::val::Id;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Thing<'a> {
	__: u8,
	pub kv: &'a str,
	_a: u8,
	pub ns: &'a str,
	_b: u8,
	pub db: &'a str,
	_c: u8,
	pub tb: &'a str,
	_d: u8,
	pub id: Id,
}
impl_key!(Thing);

pub fn new<'a>(kv: &'a str, ns: &'a str, db: &'a str, tb: &'a str, id: &Id) -> Thing<'a> {
	Thing::new(kv, ns, db, tb, id.to_owned())
}

pub fn prefix(kv: &str, ns: &str, db: &str, tb: &str) -> Result<Vec<u8>, Error> {
	let mut k = super::table::all::new(kv, ns, db, tb).encode()?;
	k.extend_from_slice(&[b'*', 0x00]);
	Ok(k)
}

pub fn suffix(kv: &str, ns: &str, db: &str, tb: &str) -> Result<Vec<u8>, Error> {
	let mut k = super::table::all::new(kv, ns, db, tb).encode()?;
	k.extend_from_slice(&[b'*', 0xff]);
	Ok(k)
}

impl<'a> Thing<'a> {
	pub fn new(kv: &'a str, ns: &'a str, db: &'a str, tb: &'a str, id: Id) -> Self {
		Self {
			__: b'/',
			kv,
			_a: b'*',
			ns,
			_b: b'*',
			db,
			_c: b'*',
			tb,
			_d: b'*',
			id,
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::key::KeyDecode;

	#[test]
	fn key() {
		use super::*;
		#[rustfmt::skip]
		let val = Thing::new(
			"tessera",
			"testns",
			"testdb",
			"testtb",
			"testid".into(),
		);
		let enc = Thing::encode(&val).unwrap();
		assert_eq!(enc, b"/tessera\0*testns\0*testdb\0*testtb\0*\0\0\0\x01testid\0");

		let dec = Thing::decode(&enc).unwrap();
		assert_eq!(val, dec);
	}

	#[test]
	fn range() {
		let val = super::prefix("tessera", "testns", "testdb", "testtb").unwrap();
		assert_eq!(val, b"/tessera\0*testns\0*testdb\0*testtb\0*\0");
		let val = super::suffix("tessera", "testns", "testdb", "testtb").unwrap();
		assert_eq!(val, b"/tessera\0*testns\0*testdb\0*testtb\0*\xff");
	}
}
