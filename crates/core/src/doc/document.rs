use crate::ctx::Context;
use crate::dbs::{Options, Processed};
use crate::err::Error;
use crate::expr::statements::{
	CreateStatement, DefineEventStatement, DefineFieldStatement, DefineIndexStatement,
	DefineTableStatement, LiveStatement,
};
use crate::key::StorageKey;
use crate::val::{Thing, Value};
use std::fmt::{self, Debug};

pub(super) const TARGET: &str = "tessera::core::doc";

/// The lifecycle stages a document passes through, in order.
///
/// A stage is only ever entered after the previous one completed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub(crate) enum Stage {
	Init,
	Locked,
	Loaded,
	Checked,
	Merged,
	Allowed,
	Indexed,
	Stored,
	Counted,
	Notified,
	Triggered,
	Yielded,
}

pub(crate) struct Document {
	/// The full storage key of the record
	pub(super) key: StorageKey,
	/// The record id of the document
	pub(super) id: Thing,
	/// The seed document, if the target supplied one
	pub(super) seed: Option<Value>,
	/// The stored record before this statement ran
	pub(super) initial: Value,
	/// The record as it will be written
	pub(super) current: Value,
	/// The stage this document last entered
	pub(super) stage: Stage,
	/// The table definition, when one exists
	pub(super) table: Option<DefineTableStatement>,
}

impl Debug for Document {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("Document")
			.field("id", &self.id)
			.field("stage", &self.stage)
			.field("initial", &self.initial)
			.field("current", &self.current)
			.finish()
	}
}

impl Document {
	/// Initialise a new document from a processed target
	pub(crate) fn new(pro: Processed) -> Result<Self, Error> {
		let id = pro.key.thing().ok_or_else(|| {
			Error::Unreachable(format!("record key {} has no record id", pro.key))
		})?;
		Ok(Document {
			key: pro.key,
			id,
			seed: pro.seed,
			initial: Value::None,
			current: Value::None,
			stage: Stage::Init,
			table: None,
		})
	}

	/// Drive a single record through the CREATE lifecycle
	pub(crate) async fn process(
		ctx: &Context,
		opt: &Options,
		stm: &CreateStatement,
		pro: Processed,
	) -> Result<Value, Error> {
		// Check current context
		if let Some(reason) = ctx.done() {
			return Err(reason.into());
		}
		// Setup a new document
		let mut doc = Document::new(pro)?;
		// Process the statement
		let res = doc.create(ctx, opt, stm).await;
		// Log the outcome
		match &res {
			Ok(_) => trace!(target: TARGET, "Created record {}", doc.id),
			Err(Error::Ignore) => trace!(target: TARGET, "Skipped record {}", doc.id),
			Err(e) => debug!(target: TARGET, "Record {} failed at {:?}: {e}", doc.id, doc.stage),
		}
		res
	}

	/// Move this document into the next lifecycle stage
	pub(super) fn enter(&mut self, ctx: &Context, stage: Stage) -> Result<(), Error> {
		// Stages never run out of order
		if stage < self.stage {
			return Err(Error::Unreachable(format!(
				"document {} moved from {:?} back to {stage:?}",
				self.id, self.stage
			)));
		}
		// Stop as soon as the statement is cancelled or timed out
		if let Some(reason) = ctx.done() {
			return Err(reason.into());
		}
		trace!(target: TARGET, "Record {} entering {stage:?}", self.id);
		self.stage = stage;
		Ok(())
	}

	/// Check if document has changed
	pub(super) fn changed(&self) -> bool {
		self.initial != self.current
	}

	/// Get the table for this document
	pub(super) async fn tb(&self, ctx: &Context) -> Result<Option<DefineTableStatement>, Error> {
		let k = &self.key;
		ctx.tx()?.lock().await.get_tb(&k.kv, &k.ns, &k.db, &k.tb).await
	}

	/// Get the fields for this document
	pub(super) async fn fd(&self, ctx: &Context) -> Result<Vec<DefineFieldStatement>, Error> {
		let k = &self.key;
		ctx.tx()?.lock().await.all_fd(&k.kv, &k.ns, &k.db, &k.tb).await
	}

	/// Get the indexes for this document
	pub(super) async fn ix(&self, ctx: &Context) -> Result<Vec<DefineIndexStatement>, Error> {
		let k = &self.key;
		ctx.tx()?.lock().await.all_ix(&k.kv, &k.ns, &k.db, &k.tb).await
	}

	/// Get the events for this document
	pub(super) async fn ev(&self, ctx: &Context) -> Result<Vec<DefineEventStatement>, Error> {
		let k = &self.key;
		ctx.tx()?.lock().await.all_ev(&k.kv, &k.ns, &k.db, &k.tb).await
	}

	/// Get the live queries for this document
	pub(super) async fn lv(&self, ctx: &Context) -> Result<Vec<LiveStatement>, Error> {
		let k = &self.key;
		ctx.tx()?.lock().await.all_lq(&k.kv, &k.ns, &k.db, &k.tb).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn document_needs_a_record_id() {
		let key = StorageKey::new("tessera", "test", "test", "person", None);
		let res = Document::new(Processed {
			key,
			seed: None,
		});
		assert!(matches!(res, Err(Error::Unreachable(_))));
	}

	#[test]
	fn stages_are_ordered() {
		assert!(Stage::Init < Stage::Locked);
		assert!(Stage::Merged < Stage::Allowed);
		assert!(Stage::Triggered < Stage::Yielded);
	}
}
