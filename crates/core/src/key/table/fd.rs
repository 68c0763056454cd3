//! Stores a DEFINE FIELD config definition
use crate::err::Error;
use crate::key::KeyEncode;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Fd<'a> {
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
	pub fd: &'a str,
}
impl_key!(Fd);

pub fn new<'a>(kv: &'a str, ns: &'a str, db: &'a str, tb: &'a str, fd: &'a str) -> Fd<'a> {
	Fd::new(kv, ns, db, tb, fd)
}

pub fn prefix(kv: &str, ns: &str, db: &str, tb: &str) -> Result<Vec<u8>, Error> {
	let mut k = super::all::new(kv, ns, db, tb).encode()?;
	k.extend_from_slice(&[b'!', b'f', b'd', 0x00]);
	Ok(k)
}

pub fn suffix(kv: &str, ns: &str, db: &str, tb: &str) -> Result<Vec<u8>, Error> {
	let mut k = super::all::new(kv, ns, db, tb).encode()?;
	k.extend_from_slice(&[b'!', b'f', b'd', 0xff]);
	Ok(k)
}

impl<'a> Fd<'a> {
	pub fn new(kv: &'a str, ns: &'a str, db: &'a str, tb: &'a str, fd: &'a str) -> Self {
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
			_e: b'f',
			_f: b'd',
			fd,
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
		let val = Fd::new(
			"tessera",
			"testns",
			"testdb",
			"testtb",
			"testfd",
		);
		let enc = Fd::encode(&val).unwrap();
		assert_eq!(enc, b"/tessera\0*testns\0*testdb\0*testtb\0!fdtestfd\0");

		let dec = Fd::decode(&enc).unwrap();
		assert_eq!(val, dec);
	}
}
