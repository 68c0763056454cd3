//! Stores the running statistics of a table
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct St<'a> {
	__: u8,
	pub kv: &'a str,
	_a: u8,
	pub ns: &'a str,
	_b: u8,
	pub db: &'a str,
	_c: u8,
	pub tb: &'a str,
	_d: u8,
	_e: u8,
	_f: u8,
}
impl_key!(St);

pub fn new<'a>(kv: &'a str, ns: &'a str, db: &'a str, tb: &'a str) -> St<'a> {
	St::new(kv, ns, db, tb)
}

impl<'a> St<'a> {
	pub fn new(kv: &'a str, ns: &'a str, db: &'a str, tb: &'a str) -> Self {
		Self {
			__: b'/',
			kv,
			_a: b'*',
			ns,
			_b: b'*',
			db,
			_c: b'*',
			tb,
			_d: b'!',
			_e: b's',
			_f: b't',
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::key::{KeyDecode, KeyEncode};

	#[test]
	fn key() {
		use super::*;
		let val = St::new("tessera", "testns", "testdb", "testtb");
		let enc = St::encode(&val).unwrap();
		assert_eq!(enc, b"/tessera\0*testns\0*testdb\0*testtb\0!st");

		let dec = St::decode(&enc).unwrap();
		assert_eq!(val, dec);
	}
}
