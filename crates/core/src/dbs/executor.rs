use crate::ctx::{Context, MutableContext};
use crate::dbs::{Options, Response, Transaction};
use crate::err::Error;
use crate::expr::{Query, Statement};
use crate::kvs::Datastore;
use crate::val::Value;
use futures::lock::Mutex;
use std::sync::Arc;
use trice::Instant;

const TARGET: &str = "tessera::core::dbs::executor";

/// Runs the statements of a query in order, each
/// within its own write transaction
pub(crate) struct Executor<'a> {
	kvs: &'a Datastore,
}

impl<'a> Executor<'a> {
	pub(crate) fn new(kvs: &'a Datastore) -> Executor<'a> {
		Executor {
			kvs,
		}
	}

	pub(crate) async fn execute(
		&mut self,
		ctx: Context,
		opt: Options,
		qry: Query,
	) -> Result<Vec<Response>, Error> {
		// Initialise array of responses
		let mut out: Vec<Response> = Vec::with_capacity(qry.len());
		// Process all statements in query
		for stm in qry.into_iter() {
			// Log the statement
			debug!(target: TARGET, "Executing: {}", stm);
			// Get the statement start time
			let now = Instant::now();
			// Process a single statement
			let res = self.process(&ctx, &opt, &stm).await;
			// Produce the response
			out.push(Response {
				time: now.elapsed(),
				result: res,
			});
		}
		// Return responses
		Ok(out)
	}

	async fn process(&self, ctx: &Context, opt: &Options, stm: &Statement) -> Result<Value, Error> {
		// Start a new write transaction
		let txn: Transaction = Arc::new(Mutex::new(self.kvs.transaction(true).await?));
		// Attach the transaction to the context
		let mut c = MutableContext::new(ctx);
		c.set_transaction(txn.clone());
		let c = c.freeze();
		// Process the statement
		let res = match stm {
			Statement::Create(v) => v.compute(&c, opt, None).await,
			Statement::Select(v) => v.compute(&c, opt, None).await,
			Statement::Define(v) => v.compute(&c, opt).await,
			Statement::Live(v) => v.compute(&c, opt).await,
		};
		// Catch a query timeout which expired at the very end
		let res = match ctx.done() {
			Some(reason) if res.is_ok() => Err(reason.into()),
			_ => res,
		};
		// Finalise the transaction
		let mut run = txn.lock().await;
		match res {
			Ok(v) => {
				run.commit().await?;
				// Deliver live notifications only once committed
				self.kvs.send_notifications(run.take_notifications());
				Ok(v)
			}
			Err(e) => {
				if let Err(err) = run.cancel().await {
					warn!(target: TARGET, "Unable to cancel transaction: {err}");
				}
				Err(e)
			}
		}
	}
}
