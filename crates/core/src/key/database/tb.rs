//! Stores a DEFINE TABLE config definition
use crate::err::Error;
use crate::key::KeyEncode;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Tb<'a> {
	__: u8,
	pub kv: &'a str,
	_a: u8,
	pub ns: &'a str,
	_b: u8,
	pub db: &'a str,
	_c: u8,
	_d: u8,
	_e: u8,
	pub tb: &'a str,
}
impl_key!(Tb);

pub fn new<'a>(kv: &'a str, ns: &'a str, db: &'a str, tb: &'a str) -> Tb<'a> {
	Tb::new(kv, ns, db, tb)
}

pub fn prefix(kv: &str, ns: &str, db: &str) -> Result<Vec<u8>, Error> {
	let mut k = Prefix::new(kv, ns, db).encode()?;
	k.extend_from_slice(&[b'!', b't', b'b', 0x00]);
	Ok(k)
}

pub fn suffix(kv: &str, ns: &str, db: &str) -> Result<Vec<u8>, Error> {
	let mut k = Prefix::new(kv, ns, db).encode()?;
	k.extend_from_slice(&[b'!', b't', b'b', 0xff]);
	Ok(k)
}

impl<'a> Tb<'a> {
	pub fn new(kv: &'a str, ns: &'a str, db: &'a str, tb: &'a str) -> Self {
		Self {
			__: b'/',
			kv,
			_a: b'*',
			ns,
			_b: b'*',
			db,
			_c: b'!',
			_d: b't',
			_e: b'b',
			tb,
		}
	}
}

/// The key prefix for all keys under a database
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Serialize, Deserialize)]
struct Prefix<'a> {
	__: u8,
	kv: &'a str,
	_a: u8,
	ns: &'a str,
	_b: u8,
	db: &'a str,
}
impl_key!(Prefix);

impl<'a> Prefix<'a> {
	fn new(kv: &'a str, ns: &'a str, db: &'a str) -> Self {
		Self {
			__: b'/',
			kv,
			_a: b'*',
			ns,
			_b: b'*',
			db,
		}
	}
}
