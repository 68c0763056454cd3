use crate::ctx::Context;
use crate::dbs::Options;
use crate::doc::{Document, Stage};
use crate::err::Error;
use crate::iam::{check_access, Action};
use crate::kvs::LockGuard;

impl Document {
	/// Check the record may be written, and load the table definition
	pub(super) async fn init(&mut self, ctx: &Context, opt: &Options) -> Result<(), Error> {
		self.enter(ctx, Stage::Init)?;
		// Check the actor may write to this database
		check_access(&opt.auth, Action::Edit, &self.key.ns, &self.key.db)?;
		// Fetch the table definition
		self.table = self.tb(ctx).await?;
		// Tables must be defined in strict mode
		if opt.strict && self.table.is_none() {
			return Err(Error::TbNotFound {
				value: self.key.tb.clone(),
			});
		}
		// Carry on
		Ok(())
	}

	/// Acquire the exclusive lock on this record
	pub(super) async fn lock(&mut self, ctx: &Context) -> Result<LockGuard, Error> {
		self.enter(ctx, Stage::Locked)?;
		ctx.locks()?.lock(&self.key).await
	}

	/// Load the record as it is currently stored
	pub(super) async fn setup(&mut self, ctx: &Context) -> Result<(), Error> {
		self.enter(ctx, Stage::Loaded)?;
		let k = &self.key;
		let val = ctx.tx()?.lock().await.get_record(&k.kv, &k.ns, &k.db, &self.id).await?;
		self.initial = val.clone();
		self.current = val;
		// Carry on
		Ok(())
	}
}
