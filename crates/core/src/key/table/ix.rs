//! Stores a DEFINE INDEX config definition
use crate::err::Error;
use crate::key::KeyEncode;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Ix<'a> {
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
	pub ix: &'a str,
}
impl_key!(Ix);

pub fn new<'a>(kv: &'a str, ns: &'a str, db: &'a str, tb: &'a str, ix: &'a str) -> Ix<'a> {
	Ix::new(kv, ns, db, tb, ix)
}

pub fn prefix(kv: &str, ns: &str, db: &str, tb: &str) -> Result<Vec<u8>, Error> {
	let mut k = super::all::new(kv, ns, db, tb).encode()?;
	k.extend_from_slice(&[b'!', b'i', b'x', 0x00]);
	Ok(k)
}

pub fn suffix(kv: &str, ns: &str, db: &str, tb: &str) -> Result<Vec<u8>, Error> {
	let mut k = super::all::new(kv, ns, db, tb).encode()?;
	k.extend_from_slice(&[b'!', b'i', b'x', 0xff]);
	Ok(k)
}

impl<'a> Ix<'a> {
	pub fn new(kv: &'a str, ns: &'a str, db: &'a str, tb: &'a str, ix: &'a str) -> Self {
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
			_e: b'i',
			_f: b'x',
			ix,
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
		let val = Ix::new(
			"tessera",
			"testns",
			"testdb",
			"testtb",
			"testix",
		);
		let enc = Ix::encode(&val).unwrap();
		assert_eq!(enc, b"/tessera\0*testns\0*testdb\0*testtb\0!ixtestix\0");

		let dec = Ix::decode(&enc).unwrap();
		assert_eq!(val, dec);
	}
}
