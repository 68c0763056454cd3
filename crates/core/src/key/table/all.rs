//! Stores the key prefix for all keys under a table
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct All<'a> {
	__: u8,
	pub kv: &'a str,
	_a: u8,
	pub ns: &'a str,
	_b: u8,
	pub db: &'a str,
	_c: u8,
	pub tb: &'a str,
}
impl_key!(All);

pub fn new<'a>(kv: &'a str, ns: &'a str, db: &'a str, tb: &'a str) -> All<'a> {
	All::new(kv, ns, db, tb)
}

impl<'a> All<'a> {
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
		}
	}
}
