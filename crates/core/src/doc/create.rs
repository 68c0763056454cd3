use crate::ctx::Context;
use crate::dbs::Options;
use crate::doc::Document;
use crate::err::Error;
use crate::expr::statements::CreateStatement;
use crate::val::Value;

impl Document {
	pub(super) async fn create(
		&mut self,
		ctx: &Context,
		opt: &Options,
		stm: &CreateStatement,
	) -> Result<Value, Error> {
		// Check the table is reachable
		self.init(ctx, opt).await?;
		// Hold the record lock until this returns
		let _guard = self.lock(ctx).await?;
		// Load the record as it is stored
		self.setup(ctx).await?;
		// Check if the record already exists
		self.exist(ctx)?;
		// Build the new document
		self.merge(ctx, opt, stm).await?;
		// Check record permissions
		self.allow(ctx, opt).await?;
		// Store index data
		self.index(ctx).await?;
		// Store record data
		self.store(ctx).await?;
		// Update the table statistics
		self.table(ctx).await?;
		// Notify live queries
		self.lives(ctx, opt).await?;
		// Run table events
		self.event(ctx, opt).await?;
		// Yield the output
		self.pluck(ctx, stm)
	}
}
