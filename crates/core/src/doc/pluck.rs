use crate::ctx::Context;
use crate::doc::{Document, Stage};
use crate::err::Error;
use crate::expr::statements::CreateStatement;
use crate::expr::Output;
use crate::val::Value;

impl Document {
	pub(super) fn pluck(&mut self, ctx: &Context, stm: &CreateStatement) -> Result<Value, Error> {
		self.enter(ctx, Stage::Yielded)?;
		match stm.output.unwrap_or_default() {
			// This record is written but not returned
			Output::None => Err(Error::Ignore),
			Output::Null => Ok(Value::Null),
			// The changes which turn the old record into the new one
			Output::Diff => {
				let ops = self.initial.diff(&self.current);
				Ok(ops.into_iter().map(Value::from).collect::<Vec<_>>().into())
			}
			Output::Before => Ok(self.initial.clone()),
			Output::After => Ok(self.current.clone()),
			Output::Id => Ok(Value::Thing(self.id.clone())),
		}
	}
}
