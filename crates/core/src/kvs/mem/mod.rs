#![cfg(feature = "kv-mem")]

use crate::err::Error;
use crate::kvs::{Key, Val};
use std::ops::Range;

const TARGET: &str = "tessera::core::kvs::mem";

/// The in-memory `echodb` engine
pub struct Datastore {
	db: echodb::Db<Key, Val>,
}

/// A transaction against the in-memory engine.
///
/// Write transactions are serialised by the engine, so a
/// second writer waits until the first has finished.
pub struct Transaction {
	/// Is the transaction complete?
	done: bool,
	/// Is the transaction writeable?
	write: bool,
	/// The underlying datastore transaction
	inner: echodb::Tx<Key, Val>,
}

impl Drop for Transaction {
	fn drop(&mut self) {
		if !self.done && self.write {
			warn!(target: TARGET, "A write transaction was dropped without being committed or cancelled");
		}
	}
}

impl Datastore {
	/// Open a new, empty store
	pub(crate) async fn new() -> Result<Datastore, Error> {
		Ok(Datastore {
			db: echodb::db::new(),
		})
	}

	/// Start a new transaction
	pub(crate) async fn transaction(&self, write: bool) -> Result<Transaction, Error> {
		let inner = self.db.begin(write).await.map_err(|e| Error::Tx(e.to_string()))?;
		Ok(Transaction {
			done: false,
			write,
			inner,
		})
	}
}

impl Transaction {
	/// Fail unless the transaction is open, and writeable when a write is requested
	fn ready(&self, write: bool) -> Result<(), Error> {
		if self.done {
			return Err(Error::TxFinished);
		}
		if write && !self.write {
			return Err(Error::TxReadonly);
		}
		Ok(())
	}

	pub(crate) fn closed(&self) -> bool {
		self.done
	}

	pub(crate) async fn cancel(&mut self) -> Result<(), Error> {
		self.ready(false)?;
		self.done = true;
		self.inner.cancel()?;
		Ok(())
	}

	pub(crate) async fn commit(&mut self) -> Result<(), Error> {
		self.ready(true)?;
		self.done = true;
		self.inner.commit()?;
		Ok(())
	}

	pub(crate) async fn get(&mut self, key: Key) -> Result<Option<Val>, Error> {
		self.ready(false)?;
		Ok(self.inner.get(key)?)
	}

	/// Insert or update a key
	pub(crate) async fn set(&mut self, key: Key, val: Val) -> Result<(), Error> {
		self.ready(true)?;
		Ok(self.inner.set(key, val)?)
	}

	/// Insert a key which must not exist yet
	pub(crate) async fn put(&mut self, key: Key, val: Val) -> Result<(), Error> {
		self.ready(true)?;
		Ok(self.inner.put(key, val)?)
	}

	/// Insert a key if its current value matches the check
	pub(crate) async fn putc(&mut self, key: Key, val: Val, chk: Option<Val>) -> Result<(), Error> {
		self.ready(true)?;
		Ok(self.inner.putc(key, val, chk)?)
	}

	/// Retrieve at most `limit` pairs of a range, in key order
	pub(crate) async fn scan(&mut self, rng: Range<Key>, limit: u32) -> Result<Vec<(Key, Val)>, Error> {
		self.ready(false)?;
		Ok(self.inner.scan(rng, limit)?)
	}
}
