use crate::cnf::MAX_CONCURRENT_TASKS;
use crate::ctx::{Canceller, Context, MutableContext};
use crate::dbs::{Options, Processed, Target};
use crate::doc::Document;
use crate::err::Error;
use crate::expr::statements::CreateStatement;
use crate::val::Value;
use futures::{stream, StreamExt};
use std::mem;

const TARGET: &str = "tessera::core::dbs::iterator";

/// Collects the outcome of every document created by a statement.
///
/// Targets are expanded up front and processed with bounded
/// concurrency, while the results keep the order in which the
/// targets were resolved. The first failure stops the run.
#[derive(Default)]
pub(crate) struct Iterator {
	// Iterator status
	run: Canceller,
	// Iterator runtime error
	error: Option<Error>,
	// Iterator output results
	results: Vec<Value>,
	// Iterator input values
	entries: Vec<Target>,
}

impl Iterator {
	/// Creates a new iterator
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// Prepares a value for processing
	pub(crate) fn ingest(&mut self, val: Target) {
		self.entries.push(val)
	}

	/// Whether the statement targets exactly one explicit record,
	/// in which case the result is a single value
	fn is_single(&self) -> bool {
		matches!(self.entries.as_slice(), [t] if t.is_thing())
	}

	/// Process the records and output
	pub(crate) async fn output(
		&mut self,
		ctx: &Context,
		opt: &Options,
		stm: &CreateStatement,
	) -> Result<Value, Error> {
		// Log the statement
		trace!(target: TARGET, "Iterating: {stm}");
		// Enable context override
		let mut cancel_ctx = MutableContext::new(ctx);
		self.run = cancel_ctx.add_cancel();
		let ctx = cancel_ctx.freeze();
		// Check the output shape before draining the entries
		let single = self.is_single();
		// Expand every target in the order it was resolved
		let entries = mem::take(&mut self.entries);
		let work: Vec<Processed> = entries.into_iter().flat_map(Target::expand).collect();
		// Process the documents, preserving their order
		{
			let mut docs = stream::iter(work)
				.map(|pro| Document::process(&ctx, opt, stm, pro))
				.buffered(*MAX_CONCURRENT_TASKS);
			while let Some(res) = docs.next().await {
				self.result(res);
				if self.error.is_some() {
					break;
				}
			}
		}
		// Check if an error occured
		if let Some(e) = self.error.take() {
			return Err(e);
		}
		// Output the results
		let mut results = mem::take(&mut self.results);
		match single {
			true => Ok(results.pop().unwrap_or_default()),
			false => Ok(results.into()),
		}
	}

	/// Accept a processed record result
	fn result(&mut self, res: Result<Value, Error>) {
		// Process the result
		match res {
			// The document was excluded
			Err(Error::Ignore) => (),
			// The document failed, stop the run
			Err(e) => {
				debug!(target: TARGET, "Document failed: {e}");
				self.error = Some(e);
				self.run.cancel();
			}
			Ok(v) => self.results.push(v),
		}
	}
}
