use super::{Key, Val};
use crate::cnf::NORMAL_FETCH_SIZE;
use crate::dbs::Notification;
use crate::err::Error;
use crate::expr::statements::{
	DefineEventStatement, DefineFieldStatement, DefineIndexStatement, DefineTableStatement,
	LiveStatement,
};
use crate::key::KeyEncode;
use crate::kvs::TableStats;
use crate::val::{Thing, Value};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::fmt::Debug;
use std::ops::Range;
use tracing::instrument;

const TARGET: &str = "tessera::core::kvs::tx";

/// A set of undoable updates and requests against a dataset.
#[non_exhaustive]
pub struct Transaction {
	pub(super) inner: Inner,
	/// Live query notifications produced by this transaction,
	/// delivered only once the transaction has committed
	pub(super) notifications: Vec<Notification>,
}

#[allow(clippy::large_enum_variant)]
pub(super) enum Inner {
	#[cfg(feature = "kv-mem")]
	Mem(super::mem::Transaction),
}

impl fmt::Display for Transaction {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		#![allow(unused_variables)]
		match &self.inner {
			#[cfg(feature = "kv-mem")]
			Inner::Mem(_) => write!(f, "memory"),
			#[allow(unreachable_patterns)]
			_ => write!(f, "none"),
		}
	}
}

macro_rules! expand_inner {
	( $v:expr, $arm:pat_param => $b:block ) => {
		match $v {
			#[cfg(feature = "kv-mem")]
			Inner::Mem($arm) => $b,
			#[allow(unreachable_patterns)]
			_ => Err(Error::Unreachable("no storage engine is enabled".to_owned())),
		}
	};
}

impl Transaction {
	pub(super) fn new(inner: Inner) -> Self {
		Self {
			inner,
			notifications: Vec::new(),
		}
	}

	// --------------------------------------------------
	// Integral methods
	// --------------------------------------------------

	/// Check if transaction is finished.
	///
	/// If the transaction has been cancelled or committed,
	/// then this function will return [`true`], and any further
	/// calls to functions on this transaction will result
	/// in a [`Error::TxFinished`] error.
	pub fn closed(&self) -> bool {
		trace!(target: TARGET, "Closed");
		match &self.inner {
			#[cfg(feature = "kv-mem")]
			Inner::Mem(v) => v.closed(),
			#[allow(unreachable_patterns)]
			_ => true,
		}
	}

	/// Cancel a transaction.
	///
	/// This reverses all changes made within the transaction,
	/// and drops any buffered notifications.
	#[instrument(level = "trace", target = "tessera::core::kvs::tx", skip_all)]
	pub async fn cancel(&mut self) -> Result<(), Error> {
		trace!(target: TARGET, "Cancel");
		self.notifications.clear();
		expand_inner!(&mut self.inner, v => { v.cancel().await })
	}

	/// Commit a transaction.
	///
	/// This attempts to commit all changes made within the transaction.
	#[instrument(level = "trace", target = "tessera::core::kvs::tx", skip_all)]
	pub async fn commit(&mut self) -> Result<(), Error> {
		trace!(target: TARGET, "Commit");
		expand_inner!(&mut self.inner, v => { v.commit().await })
	}

	/// Fetch a key from the datastore.
	pub async fn get<K>(&mut self, key: K) -> Result<Option<Val>, Error>
	where
		K: Into<Key> + Debug,
	{
		let key = key.into();
		trace!(target: TARGET, "Get {:?}", key);
		expand_inner!(&mut self.inner, v => { v.get(key).await })
	}

	/// Insert or update a key in the datastore.
	pub async fn set<K, V>(&mut self, key: K, val: V) -> Result<(), Error>
	where
		K: Into<Key> + Debug,
		V: Into<Val> + Debug,
	{
		let key = key.into();
		trace!(target: TARGET, "Set {:?}", key);
		expand_inner!(&mut self.inner, v => { v.set(key, val.into()).await })
	}

	/// Insert a key if it doesn't exist in the datastore.
	pub async fn put<K, V>(&mut self, key: K, val: V) -> Result<(), Error>
	where
		K: Into<Key> + Debug,
		V: Into<Val> + Debug,
	{
		let key = key.into();
		trace!(target: TARGET, "Put {:?}", key);
		expand_inner!(&mut self.inner, v => { v.put(key, val.into()).await })
	}

	/// Update a key in the datastore if the current value matches a condition.
	///
	/// A condition of [`None`] requires the key to be absent.
	pub async fn putc<K, V>(&mut self, key: K, val: V, chk: Option<V>) -> Result<(), Error>
	where
		K: Into<Key> + Debug,
		V: Into<Val> + Debug,
	{
		let key = key.into();
		trace!(target: TARGET, "Putc {:?}", key);
		expand_inner!(&mut self.inner, v => { v.putc(key, val.into(), chk.map(Into::into)).await })
	}

	/// Retrieve a specific range of keys from the datastore.
	///
	/// This function fetches at most `limit` key-value pairs, in order,
	/// from the range `beg..end`.
	pub async fn scan<K>(&mut self, rng: Range<K>, limit: u32) -> Result<Vec<(Key, Val)>, Error>
	where
		K: Into<Key> + Debug,
	{
		let rng = Range {
			start: rng.start.into(),
			end: rng.end.into(),
		};
		trace!(target: TARGET, "Scan {:?} - {:?}", rng.start, rng.end);
		expand_inner!(&mut self.inner, v => { v.scan(rng, limit).await })
	}

	/// Retrieve every key-value pair in a range, in batches.
	pub async fn getr<K>(&mut self, rng: Range<K>) -> Result<Vec<(Key, Val)>, Error>
	where
		K: Into<Key> + Debug,
	{
		let beg: Key = rng.start.into();
		let end: Key = rng.end.into();
		let mut next = beg;
		let mut out = Vec::new();
		loop {
			let res = self.scan(next.clone()..end.clone(), *NORMAL_FETCH_SIZE).await?;
			let len = res.len();
			match res.last() {
				Some((k, _)) => {
					// Continue just past the last key
					next = k.clone();
					next.push(0x00);
				}
				None => break,
			}
			out.extend(res);
			if len < *NORMAL_FETCH_SIZE as usize {
				break;
			}
		}
		Ok(out)
	}

	// --------------------------------------------------
	// Notification methods
	// --------------------------------------------------

	/// Buffer a live query notification until commit
	pub fn buffer_notification(&mut self, notification: Notification) {
		self.notifications.push(notification);
	}

	/// Take the notifications buffered by this transaction
	pub fn take_notifications(&mut self) -> Vec<Notification> {
		std::mem::take(&mut self.notifications)
	}

	// --------------------------------------------------
	// Definition methods
	// --------------------------------------------------

	/// Retrieve a specific table definition.
	pub async fn get_tb(
		&mut self,
		kv: &str,
		ns: &str,
		db: &str,
		tb: &str,
	) -> Result<Option<DefineTableStatement>, Error> {
		let key = crate::key::database::tb::new(kv, ns, db, tb).encode()?;
		self.get_decoded(key).await
	}

	/// Store a table definition.
	pub async fn set_tb(
		&mut self,
		kv: &str,
		ns: &str,
		db: &str,
		tb: &DefineTableStatement,
	) -> Result<(), Error> {
		let key = crate::key::database::tb::new(kv, ns, db, &tb.name).encode()?;
		self.set_encoded(key, tb).await
	}

	/// Retrieve all field definitions for a specific table.
	pub async fn all_fd(
		&mut self,
		kv: &str,
		ns: &str,
		db: &str,
		tb: &str,
	) -> Result<Vec<DefineFieldStatement>, Error> {
		let beg = crate::key::table::fd::prefix(kv, ns, db, tb)?;
		let end = crate::key::table::fd::suffix(kv, ns, db, tb)?;
		self.all_decoded(beg..end).await
	}

	/// Store a field definition.
	pub async fn set_fd(
		&mut self,
		kv: &str,
		ns: &str,
		db: &str,
		fd: &DefineFieldStatement,
	) -> Result<(), Error> {
		let name = fd.name.to_string();
		let key = crate::key::table::fd::new(kv, ns, db, &fd.what, &name).encode()?;
		self.set_encoded(key, fd).await
	}

	/// Retrieve all index definitions for a specific table.
	pub async fn all_ix(
		&mut self,
		kv: &str,
		ns: &str,
		db: &str,
		tb: &str,
	) -> Result<Vec<DefineIndexStatement>, Error> {
		let beg = crate::key::table::ix::prefix(kv, ns, db, tb)?;
		let end = crate::key::table::ix::suffix(kv, ns, db, tb)?;
		self.all_decoded(beg..end).await
	}

	/// Store an index definition.
	pub async fn set_ix(
		&mut self,
		kv: &str,
		ns: &str,
		db: &str,
		ix: &DefineIndexStatement,
	) -> Result<(), Error> {
		let key = crate::key::table::ix::new(kv, ns, db, &ix.what, &ix.name).encode()?;
		self.set_encoded(key, ix).await
	}

	/// Retrieve all event definitions for a specific table.
	pub async fn all_ev(
		&mut self,
		kv: &str,
		ns: &str,
		db: &str,
		tb: &str,
	) -> Result<Vec<DefineEventStatement>, Error> {
		let beg = crate::key::table::ev::prefix(kv, ns, db, tb)?;
		let end = crate::key::table::ev::suffix(kv, ns, db, tb)?;
		self.all_decoded(beg..end).await
	}

	/// Store an event definition.
	pub async fn set_ev(
		&mut self,
		kv: &str,
		ns: &str,
		db: &str,
		ev: &DefineEventStatement,
	) -> Result<(), Error> {
		let key = crate::key::table::ev::new(kv, ns, db, &ev.what, &ev.name).encode()?;
		self.set_encoded(key, ev).await
	}

	/// Retrieve all live queries for a specific table.
	pub async fn all_lq(
		&mut self,
		kv: &str,
		ns: &str,
		db: &str,
		tb: &str,
	) -> Result<Vec<LiveStatement>, Error> {
		let beg = crate::key::table::lq::prefix(kv, ns, db, tb)?;
		let end = crate::key::table::lq::suffix(kv, ns, db, tb)?;
		self.all_decoded(beg..end).await
	}

	/// Store a live query.
	pub async fn set_lq(
		&mut self,
		kv: &str,
		ns: &str,
		db: &str,
		lq: &LiveStatement,
	) -> Result<(), Error> {
		let key = crate::key::table::lq::new(kv, ns, db, &lq.what, lq.id).encode()?;
		self.set_encoded(key, lq).await
	}

	// --------------------------------------------------
	// Record methods
	// --------------------------------------------------

	/// Fetch a record, returning [`Value::None`] when it does not exist.
	pub async fn get_record(
		&mut self,
		kv: &str,
		ns: &str,
		db: &str,
		rid: &Thing,
	) -> Result<Value, Error> {
		let key = crate::key::thing::new(kv, ns, db, &rid.tb, &rid.id).encode()?;
		Ok(self.get_decoded(key).await?.unwrap_or_default())
	}

	/// Fetch the running statistics of a table.
	pub async fn get_stats(
		&mut self,
		kv: &str,
		ns: &str,
		db: &str,
		tb: &str,
	) -> Result<TableStats, Error> {
		let key = crate::key::table::st::new(kv, ns, db, tb).encode()?;
		Ok(self.get_decoded(key).await?.unwrap_or_default())
	}

	/// Store the running statistics of a table.
	pub async fn set_stats(
		&mut self,
		kv: &str,
		ns: &str,
		db: &str,
		tb: &str,
		st: &TableStats,
	) -> Result<(), Error> {
		let key = crate::key::table::st::new(kv, ns, db, tb).encode()?;
		self.set_encoded(key, st).await
	}

	async fn get_decoded<T: DeserializeOwned>(&mut self, key: Key) -> Result<Option<T>, Error> {
		match self.get(key).await? {
			Some(v) => Ok(Some(bincode::deserialize(&v)?)),
			None => Ok(None),
		}
	}

	async fn set_encoded<T: Serialize>(&mut self, key: Key, val: &T) -> Result<(), Error> {
		let val = bincode::serialize(val)?;
		self.set(key, val).await
	}

	async fn all_decoded<T: DeserializeOwned>(&mut self, rng: Range<Key>) -> Result<Vec<T>, Error> {
		let res = self.getr(rng).await?;
		res.into_iter().map(|(_, v)| Ok(bincode::deserialize(&v)?)).collect()
	}
}

#[cfg(test)]
mod tests {
	use crate::expr::statements::DefineIndexStatement;
	use crate::kvs::Datastore;
	use crate::val::{Thing, Value};

	#[test_log::test(tokio::test)]
	async fn scan_pages_through_large_ranges() {
		let ds = Datastore::new("memory").await.unwrap();
		let mut tx = ds.transaction(true).await.unwrap();
		for i in 0..175u32 {
			let key = format!("test{i:04}").into_bytes();
			tx.set(key, vec![0u8]).await.unwrap();
		}
		let res = tx.getr(b"test".to_vec()..b"tesu".to_vec()).await.unwrap();
		assert_eq!(res.len(), 175);
		assert_eq!(res[0].0, b"test0000".to_vec());
		assert_eq!(res[174].0, b"test0174".to_vec());
		tx.cancel().await.unwrap();
	}

	#[test_log::test(tokio::test)]
	async fn definitions_are_scoped_to_their_table() {
		let ds = Datastore::new("memory").await.unwrap();
		let mut tx = ds.transaction(true).await.unwrap();
		let ix = DefineIndexStatement {
			name: "email".to_owned(),
			what: "person".to_owned(),
			cols: vec!["email".into()],
			uniq: true,
		};
		tx.set_ix("tessera", "test", "test", &ix).await.unwrap();
		assert_eq!(tx.all_ix("tessera", "test", "test", "person").await.unwrap(), vec![ix]);
		assert!(tx.all_ix("tessera", "test", "test", "animal").await.unwrap().is_empty());
		assert!(tx.all_ix("tessera", "test", "other", "person").await.unwrap().is_empty());
		tx.cancel().await.unwrap();
	}

	#[test_log::test(tokio::test)]
	async fn missing_record_is_none() {
		let ds = Datastore::new("memory").await.unwrap();
		let mut tx = ds.transaction(false).await.unwrap();
		let rid = Thing::new("person", "tobie");
		let val = tx.get_record("tessera", "test", "test", &rid).await.unwrap();
		assert_eq!(val, Value::None);
		tx.cancel().await.unwrap();
	}

	#[test_log::test(tokio::test)]
	async fn finished_transaction_rejects_writes() {
		let ds = Datastore::new("memory").await.unwrap();
		let mut tx = ds.transaction(true).await.unwrap();
		tx.commit().await.unwrap();
		assert!(tx.closed());
		assert!(matches!(tx.set(b"k".to_vec(), b"v".to_vec()).await, Err(crate::err::Error::TxFinished)));
	}

	#[test_log::test(tokio::test)]
	async fn conditional_put_requires_a_missing_key() {
		let ds = Datastore::new("memory").await.unwrap();
		let mut tx = ds.transaction(true).await.unwrap();
		tx.putc(b"k".to_vec(), b"a".to_vec(), None).await.unwrap();
		let res = tx.putc(b"k".to_vec(), b"b".to_vec(), None).await;
		assert!(matches!(res, Err(crate::err::Error::TxConditionNotMet)));
		assert_eq!(tx.get(b"k".to_vec()).await.unwrap(), Some(b"a".to_vec()));
		tx.cancel().await.unwrap();
	}

	#[test_log::test(tokio::test)]
	async fn readonly_transaction_rejects_writes() {
		let ds = Datastore::new("memory").await.unwrap();
		let mut tx = ds.transaction(false).await.unwrap();
		assert!(matches!(tx.put(b"k".to_vec(), b"v".to_vec()).await, Err(crate::err::Error::TxReadonly)));
		tx.cancel().await.unwrap();
	}
}
