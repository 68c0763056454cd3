use crate::ctx::Context;
use crate::doc::{Document, Stage};
use crate::err::Error;

impl Document {
	pub(super) fn exist(&mut self, ctx: &Context) -> Result<(), Error> {
		self.enter(ctx, Stage::Checked)?;
		// Check if this record exists
		if self.initial.is_some() {
			// The record already exists
			return Err(Error::RecordExists {
				thing: self.id.clone(),
			});
		}
		// Carry on
		Ok(())
	}
}
