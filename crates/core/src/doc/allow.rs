use crate::ctx::Context;
use crate::dbs::Options;
use crate::doc::{Document, Stage};
use crate::err::Error;
use crate::expr::Permission;

impl Document {
	pub(super) async fn allow(&mut self, ctx: &Context, opt: &Options) -> Result<(), Error> {
		self.enter(ctx, Stage::Allowed)?;
		// Check if this record is checked
		if !opt.check_perms() {
			return Ok(());
		}
		// Undefined tables are not restricted
		let perm = match &self.table {
			Some(tb) => &tb.permissions.create,
			None => return Ok(()),
		};
		// Process the table permissions
		match perm {
			Permission::None => return Err(Error::Ignore),
			Permission::Full => (),
			Permission::Specific(e) => {
				// Disable permissions
				let opt = &opt.new_with_perms(false);
				// Process the PERMISSION clause
				if !e.compute(ctx, opt, Some(&self.current)).await?.is_truthy() {
					return Err(Error::Ignore);
				}
			}
		}
		// Carry on
		Ok(())
	}
}
