use crate::ctx::{Context, MutableContext};
use crate::dbs::{Action, Notification, Options};
use crate::doc::{Document, Stage, TARGET};
use crate::err::Error;
use crate::val::Value;
use std::sync::Arc;

impl Document {
	pub(super) async fn lives(&mut self, ctx: &Context, opt: &Options) -> Result<(), Error> {
		self.enter(ctx, Stage::Notified)?;
		// Check if the record was written
		if !self.changed() {
			return Ok(());
		}
		// Expose the change to the live query conditions
		let mut lqctx = MutableContext::new(ctx);
		lqctx.add_value("event", Arc::new(Value::from("CREATE")));
		lqctx.add_value("value", Arc::new(self.current.clone()));
		lqctx.add_value("after", Arc::new(self.current.clone()));
		lqctx.add_value("before", Arc::new(self.initial.clone()));
		let lqctx = lqctx.freeze();
		// Conditions are evaluated without table permissions
		let lqopt = opt.new_with_perms(false);
		// Loop through all live queries
		for lv in self.lv(ctx).await?.iter() {
			// Check the WHERE clause of the live query
			if let Some(cond) = &lv.cond {
				match cond.compute(&lqctx, &lqopt, Some(&self.current)).await {
					Ok(v) if v.is_truthy() => (),
					Ok(_) => continue,
					Err(e) => {
						let id = &self.id;
						warn!(target: TARGET, "Skipping live query {} for record {id}: {e}", lv.id);
						continue;
					}
				}
			}
			// Queue the notification until the transaction commits
			let notification = Notification::new(lv.id, Action::Create, self.current.clone());
			ctx.tx()?.lock().await.buffer_notification(notification);
		}
		// Carry on
		Ok(())
	}
}
