use crate::ctx::{Context, MutableContext};
use crate::dbs::Options;
use crate::doc::{Document, Stage};
use crate::err::Error;
use crate::expr::statements::DefineEventStatement;
use crate::val::Value;
use std::sync::Arc;

impl Document {
	pub(super) async fn event(&mut self, ctx: &Context, opt: &Options) -> Result<(), Error> {
		self.enter(ctx, Stage::Triggered)?;
		// Check if the record was written
		if !self.changed() {
			return Ok(());
		}
		// Loop through all event statements
		for ev in self.ev(ctx).await?.iter() {
			if let Err(e) = self.trigger(ctx, opt, ev).await {
				return Err(Error::EventFailed {
					event: ev.name.clone(),
					thing: self.id.clone(),
					source: Box::new(e),
				});
			}
		}
		// Carry on
		Ok(())
	}

	async fn trigger(
		&self,
		ctx: &Context,
		opt: &Options,
		ev: &DefineEventStatement,
	) -> Result<(), Error> {
		// Configure the context
		let mut ctx = MutableContext::new(ctx);
		ctx.add_value("event", Arc::new(Value::from("CREATE")));
		ctx.add_value("value", Arc::new(self.current.clone()));
		ctx.add_value("after", Arc::new(self.current.clone()));
		ctx.add_value("before", Arc::new(self.initial.clone()));
		let ctx = ctx.freeze();
		// Process conditional clause
		if !ev.when.compute(&ctx, opt, Some(&self.current)).await?.is_truthy() {
			return Ok(());
		}
		// Process the event statements
		for v in ev.then.iter() {
			v.compute(&ctx, opt, Some(&self.current)).await?;
		}
		Ok(())
	}
}
