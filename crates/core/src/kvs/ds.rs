use super::tx::{Inner as TxInner, Transaction};
use crate::channel::{self, Receiver, Sender};
use crate::cnf::DEFAULT_KV_NAME;
use crate::ctx::MutableContext;
use crate::dbs::{Executor, Notification, Options, Response, Session, Variables};
use crate::err::Error;
use crate::expr::Query;
use crate::kvs::LockManager;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use uuid::Uuid;

const TARGET: &str = "tessera::core::kvs::ds";

/// The maximum number of undelivered live query notifications
const LQ_CHANNEL_SIZE: usize = 1_000;

/// The underlying datastore instance which stores the dataset.
#[allow(dead_code)]
#[non_exhaustive]
pub struct Datastore {
	// The unique id of this datastore, used in notifications
	id: Uuid,
	// The engine instance name written into every key
	name: Arc<str>,
	// The inner datastore type
	inner: Inner,
	// Whether this datastore runs in strict mode by default
	strict: bool,
	// Whether authentication is enabled on this datastore
	auth_enabled: bool,
	// The maximum duration timeout for running multiple statements in a query
	query_timeout: Option<Duration>,
	// The live query notification channel
	notification_channel: Option<(Sender<Notification>, Receiver<Notification>)>,
	// The per-record locks held by running documents
	locks: Arc<LockManager>,
}

#[allow(clippy::large_enum_variant)]
pub(super) enum Inner {
	#[cfg(feature = "kv-mem")]
	Mem(super::mem::Datastore),
}

impl fmt::Display for Datastore {
	#[allow(unused_variables)]
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match &self.inner {
			#[cfg(feature = "kv-mem")]
			Inner::Mem(_) => write!(f, "memory"),
			#[allow(unreachable_patterns)]
			_ => write!(f, "none"),
		}
	}
}

impl Datastore {
	/// Creates a new datastore instance
	///
	/// ```rust,no_run
	/// # use tessera_core::kvs::Datastore;
	/// # use tessera_core::err::Error;
	/// # #[tokio::main]
	/// # async fn main() -> Result<(), Error> {
	/// let ds = Datastore::new("memory").await?;
	/// # Ok(())
	/// # }
	/// ```
	pub async fn new(path: &str) -> Result<Datastore, Error> {
		// Initiate the desired datastore
		let inner = match path {
			"memory" => {
				#[cfg(feature = "kv-mem")]
				{
					info!(target: TARGET, "Starting kvs store in {}", path);
					let v = super::mem::Datastore::new().await.map(Inner::Mem);
					info!(target: TARGET, "Started kvs store in {}", path);
					v
				}
				#[cfg(not(feature = "kv-mem"))]
				return Err(Error::Ds("Cannot connect to the `memory` storage engine as it is not enabled in this build".to_owned()));
			}
			// The datastore path is not valid
			_ => {
				info!(target: TARGET, "Unable to load the specified datastore {}", path);
				Err(Error::Ds("Unable to load the specified datastore".into()))
			}
		}?;
		// Set the properties on the datastore
		Ok(Self {
			id: Uuid::new_v4(),
			name: Arc::from(DEFAULT_KV_NAME),
			inner,
			strict: false,
			auth_enabled: false,
			query_timeout: None,
			notification_channel: None,
			locks: Arc::new(LockManager::new()),
		})
	}

	/// Specify the engine instance name written into every key
	pub fn with_name(mut self, name: &str) -> Self {
		self.name = Arc::from(name);
		self
	}

	/// Specify whether this Datastore should run in strict mode
	pub fn with_strict_mode(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}

	/// Specify whether this datastore should enable live query notifications
	pub fn with_notifications(mut self) -> Self {
		self.notification_channel = Some(channel::bounded(LQ_CHANNEL_SIZE));
		self
	}

	/// Set a global query timeout for this Datastore
	pub fn with_query_timeout(mut self, duration: Option<Duration>) -> Self {
		self.query_timeout = duration;
		self
	}

	/// Set whether authentication is enabled for this Datastore
	pub fn with_auth_enabled(mut self, enabled: bool) -> Self {
		self.auth_enabled = enabled;
		self
	}

	/// The number of records currently locked by running documents
	pub fn locked(&self) -> usize {
		self.locks.len()
	}

	/// Create a new transaction on this datastore
	///
	/// ```rust,no_run
	/// use tessera_core::kvs::Datastore;
	/// use tessera_core::err::Error;
	///
	/// #[tokio::main]
	/// async fn main() -> Result<(), Error> {
	///     let ds = Datastore::new("memory").await?;
	///     let mut tx = ds.transaction(true).await?;
	///     tx.put(b"key".to_vec(), b"val".to_vec()).await?;
	///     tx.commit().await?;
	///     Ok(())
	/// }
	/// ```
	pub async fn transaction(&self, write: bool) -> Result<Transaction, Error> {
		#[allow(unused_variables)]
		let inner = match &self.inner {
			#[cfg(feature = "kv-mem")]
			Inner::Mem(v) => {
				let tx = v.transaction(write).await?;
				TxInner::Mem(tx)
			}
			#[allow(unreachable_patterns)]
			_ => return Err(Error::Unreachable("no storage engine is enabled".to_owned())),
		};
		Ok(Transaction::new(inner))
	}

	/// Execute a query
	///
	/// ```rust,no_run
	/// use tessera_core::dbs::Session;
	/// use tessera_core::err::Error;
	/// use tessera_core::expr::statements::CreateStatement;
	/// use tessera_core::expr::Expr;
	/// use tessera_core::kvs::Datastore;
	/// use tessera_core::val::Table;
	///
	/// #[tokio::main]
	/// async fn main() -> Result<(), Error> {
	///     let ds = Datastore::new("memory").await?;
	///     let ses = Session::owner().with_ns("test").with_db("test");
	///     let stm = CreateStatement {
	///         what: vec![Expr::Table(Table::from("person"))],
	///         ..Default::default()
	///     };
	///     let res = ds.execute(stm, &ses, None).await?;
	///     Ok(())
	/// }
	/// ```
	#[instrument(level = "debug", target = "tessera::core::kvs::ds", skip_all)]
	pub async fn execute(
		&self,
		qry: impl Into<Query>,
		sess: &Session,
		vars: Option<Variables>,
	) -> Result<Vec<Response>, Error> {
		let qry = qry.into();
		// Check that there is something to run
		if qry.is_empty() {
			return Err(Error::QueryEmpty);
		}
		// Create a new query options
		let opt = Options::new(&self.name)
			.with_ns(sess.ns())
			.with_db(sess.db())
			.with_auth(sess.au.clone())
			.with_strict(self.strict)
			.with_auth_enabled(self.auth_enabled);
		// Create a default context
		let mut ctx = MutableContext::background();
		// Set the global query timeout
		if let Some(timeout) = self.query_timeout {
			ctx.add_timeout(timeout)?;
		}
		// Attach the record locks
		ctx.set_locks(self.locks.clone());
		// Start an execution context
		let ctx = sess.context(ctx);
		// Store the query variables
		let ctx = vars.unwrap_or_default().attach(ctx)?;
		// Process all statements
		Executor::new(self).execute(ctx.freeze(), opt, qry).await
	}

	/// Subscribe to live notifications
	///
	/// ```rust,no_run
	/// use tessera_core::kvs::Datastore;
	/// use tessera_core::err::Error;
	///
	/// #[tokio::main]
	/// async fn main() -> Result<(), Error> {
	///     let ds = Datastore::new("memory").await?.with_notifications();
	///     if let Some(channel) = ds.notifications() {
	///         while let Ok(v) = channel.recv().await {
	///             println!("Received notification: {v}");
	///         }
	///     }
	///     Ok(())
	/// }
	/// ```
	pub fn notifications(&self) -> Option<Receiver<Notification>> {
		self.notification_channel.as_ref().map(|v| v.1.clone())
	}

	/// Deliver the notifications of a committed transaction
	pub(crate) fn send_notifications(&self, notifications: Vec<Notification>) {
		if let Some((chn, _)) = &self.notification_channel {
			for n in notifications {
				if let Err(e) = chn.try_send(n) {
					warn!(target: TARGET, "Unable to deliver live query notification: {e}");
				}
			}
		}
	}
}
