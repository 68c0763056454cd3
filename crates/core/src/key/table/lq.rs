//! Stores a LIVE SELECT query definition on the table
use crate::err::Error;
use crate::key::KeyEncode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The value of the lq is the live statement.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Lq<'a> {
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
	#[serde(with = "uuid::serde::compact")]
	pub lq: Uuid,
}
impl_key!(Lq);

pub fn new<'a>(kv: &'a str, ns: &'a str, db: &'a str, tb: &'a str, lq: Uuid) -> Lq<'a> {
	Lq::new(kv, ns, db, tb, lq)
}

pub fn prefix(kv: &str, ns: &str, db: &str, tb: &str) -> Result<Vec<u8>, Error> {
	let mut k = super::all::new(kv, ns, db, tb).encode()?;
	k.extend_from_slice(&[b'!', b'l', b'q', 0x00]);
	Ok(k)
}

pub fn suffix(kv: &str, ns: &str, db: &str, tb: &str) -> Result<Vec<u8>, Error> {
	let mut k = super::all::new(kv, ns, db, tb).encode()?;
	k.extend_from_slice(&[b'!', b'l', b'q', 0xff]);
	Ok(k)
}

impl<'a> Lq<'a> {
	pub fn new(kv: &'a str, ns: &'a str, db: &'a str, tb: &'a str, lq: Uuid) -> Self {
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
			_e: b'l',
			_f: b'q',
			lq,
		}
	}
}
