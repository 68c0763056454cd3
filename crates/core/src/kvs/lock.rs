use crate::cnf::LOCK_TIMEOUT_MILLIS;
use crate::err::Error;
use crate::key::StorageKey;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};

const TARGET: &str = "tessera::core::kvs::lock";

/// Hands out exclusive per-record locks, keyed on the
/// encoded storage key of the record.
///
/// Lock entries only live for as long as somebody holds or
/// waits for them, so the map does not grow with the number
/// of records ever written.
#[derive(Default)]
pub struct LockManager {
	locks: DashMap<Vec<u8>, Arc<Mutex<()>>>,
}

impl fmt::Debug for LockManager {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("LockManager").field("held", &self.locks.len()).finish()
	}
}

impl LockManager {
	pub fn new() -> Self {
		Self::default()
	}

	/// The number of records currently locked or waited on
	pub fn len(&self) -> usize {
		self.locks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.locks.is_empty()
	}

	/// Acquire the lock for a record, waiting at most the configured lock timeout
	pub async fn lock(self: &Arc<Self>, key: &StorageKey) -> Result<LockGuard, Error> {
		self.lock_with_timeout(key, Duration::from_millis(*LOCK_TIMEOUT_MILLIS)).await
	}

	/// Acquire the lock for a record, waiting at most the given duration
	pub async fn lock_with_timeout(
		self: &Arc<Self>,
		key: &StorageKey,
		timeout: Duration,
	) -> Result<LockGuard, Error> {
		let enc = key.encode()?;
		// The map shard is only held while cloning the mutex
		let mutex = self.locks.entry(enc.clone()).or_default().value().clone();
		trace!(target: TARGET, "Locking {key}");
		match tokio::time::timeout(timeout, mutex.lock_owned()).await {
			Ok(guard) => Ok(LockGuard {
				key: enc,
				guard: Some(guard),
				owner: self.clone(),
			}),
			Err(_) => {
				// Clean up the entry if nobody else is waiting
				self.locks.remove_if(&enc, |_, m| Arc::strong_count(m) == 1);
				Err(Error::LockTimeout {
					key: key.to_string(),
				})
			}
		}
	}
}

/// Holds a record lock, releasing it when dropped
pub struct LockGuard {
	key: Vec<u8>,
	guard: Option<OwnedMutexGuard<()>>,
	owner: Arc<LockManager>,
}

impl Drop for LockGuard {
	fn drop(&mut self) {
		// Release the mutex before checking for other holders
		drop(self.guard.take());
		self.owner.locks.remove_if(&self.key, |_, m| Arc::strong_count(m) == 1);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(id: &str) -> StorageKey {
		StorageKey::new("tessera", "test", "test", "person", Some(id.into()))
	}

	#[tokio::test]
	async fn lock_is_released_on_drop() {
		let locks = Arc::new(LockManager::new());
		let guard = locks.lock(&key("tobie")).await.unwrap();
		assert_eq!(locks.len(), 1);
		drop(guard);
		assert!(locks.is_empty());
	}

	#[tokio::test]
	async fn second_locker_times_out() {
		let locks = Arc::new(LockManager::new());
		let _guard = locks.lock(&key("tobie")).await.unwrap();
		let res = locks.lock_with_timeout(&key("tobie"), Duration::from_millis(10)).await;
		assert!(matches!(res, Err(Error::LockTimeout { .. })));
		// Other records are unaffected
		let other = locks.lock_with_timeout(&key("jaime"), Duration::from_millis(10)).await;
		assert!(other.is_ok());
	}

	#[tokio::test]
	async fn waiter_acquires_after_release() {
		let locks = Arc::new(LockManager::new());
		let guard = locks.lock(&key("tobie")).await.unwrap();
		let waiter = {
			let locks = locks.clone();
			tokio::spawn(async move { locks.lock(&key("tobie")).await.map(drop) })
		};
		tokio::time::sleep(Duration::from_millis(10)).await;
		drop(guard);
		waiter.await.unwrap().unwrap();
		assert!(locks.is_empty());
	}
}
