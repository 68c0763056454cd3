//! Stores a DEFINE EVENT config definition
use crate::err::Error;
use crate::key::KeyEncode;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Ev<'a> {
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
	pub ev: &'a str,
}
impl_key!(Ev);

pub fn new<'a>(kv: &'a str, ns: &'a str, db: &'a str, tb: &'a str, ev: &'a str) -> Ev<'a> {
	Ev::new(kv, ns, db, tb, ev)
}

pub fn prefix(kv: &str, ns: &str, db: &str, tb: &str) -> Result<Vec<u8>, Error> {
	let mut k = super::all::new(kv, ns, db, tb).encode()?;
	k.extend_from_slice(&[b'!', b'e', b'v', 0x00]);
	Ok(k)
}

pub fn suffix(kv: &str, ns: &str, db: &str, tb: &str) -> Result<Vec<u8>, Error> {
	let mut k = super::all::new(kv, ns, db, tb).encode()?;
	k.extend_from_slice(&[b'!', b'e', b'v', 0xff]);
	Ok(k)
}

impl<'a> Ev<'a> {
	pub fn new(kv: &'a str, ns: &'a str, db: &'a str, tb: &'a str, ev: &'a str) -> Self {
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
			_e: b'e',
			_f: b'v',
			ev,
		}
	}
}
