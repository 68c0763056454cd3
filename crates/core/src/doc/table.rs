use crate::ctx::Context;
use crate::doc::{Document, Stage, TARGET};
use crate::err::Error;

impl Document {
	/// Keep the running statistics of the table up to date.
	///
	/// Statistics are advisory, so a failure here is logged and the
	/// record is still created.
	pub(super) async fn table(&mut self, ctx: &Context) -> Result<(), Error> {
		self.enter(ctx, Stage::Counted)?;
		// Check if the record was written
		if !self.changed() {
			return Ok(());
		}
		if let Err(e) = self.count(ctx).await {
			warn!(target: TARGET, "Failed to update the statistics of table {}: {e}", self.key.tb);
		}
		// Carry on
		Ok(())
	}

	async fn count(&self, ctx: &Context) -> Result<(), Error> {
		let k = &self.key;
		let tx = ctx.tx()?;
		let mut run = tx.lock().await;
		let mut st = run.get_stats(&k.kv, &k.ns, &k.db, &k.tb).await?;
		st.count += 1;
		run.set_stats(&k.kv, &k.ns, &k.db, &k.tb, &st).await
	}
}
