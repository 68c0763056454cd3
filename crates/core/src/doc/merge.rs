use crate::ctx::{Context, MutableContext};
use crate::dbs::Options;
use crate::doc::{Document, Stage};
use crate::err::Error;
use crate::expr::statements::CreateStatement;
use crate::expr::{Data, Operator};
use crate::val::{Object, Value};
use std::sync::Arc;

impl Document {
	/// Build the document which will be written for this record
	pub(super) async fn merge(
		&mut self,
		ctx: &Context,
		opt: &Options,
		stm: &CreateStatement,
	) -> Result<(), Error> {
		self.enter(ctx, Stage::Merged)?;
		// Start from the seed document, if there is one
		self.current = match self.seed.take() {
			Some(v @ Value::Object(_)) => v,
			Some(Value::None) | None => Value::Object(Object::default()),
			Some(v) => {
				return Err(Error::InvalidContent {
					value: v.to_string(),
				})
			}
		};
		// Set default field values
		self.current.def(&self.id);
		// Apply the data clause
		if let Some(data) = &stm.data {
			self.data(ctx, opt, data).await?;
		}
		// Apply field definitions
		self.field(ctx, opt).await?;
		// The record id can not be overwritten
		self.current.def(&self.id);
		// Carry on
		Ok(())
	}

	async fn data(&mut self, ctx: &Context, opt: &Options, data: &Data) -> Result<(), Error> {
		match data {
			Data::SetExpression(x) => {
				for (l, o, r) in x.iter() {
					let v = r.compute(ctx, opt, Some(&self.current)).await?;
					let v = match o {
						Operator::Equal => v,
						Operator::Inc => self.current.pick(l).try_add(v)?,
						Operator::Dec => self.current.pick(l).try_sub(v)?,
						o => {
							return Err(Error::InvalidExpression {
								value: format!("{l} {o} {r}"),
							})
						}
					};
					self.current.put(l, v);
				}
			}
			Data::UnsetExpression(x) => {
				for l in x.iter() {
					self.current.cut(l);
				}
			}
			Data::ContentExpression(v) => {
				let v = v.compute(ctx, opt, Some(&self.current)).await?;
				if !v.is_object() {
					return Err(Error::InvalidContent {
						value: v.to_string(),
					});
				}
				self.current = v;
				self.current.def(&self.id);
			}
			Data::MergeExpression(v) => {
				let v = v.compute(ctx, opt, Some(&self.current)).await?;
				self.current.merge(v)?;
			}
		}
		Ok(())
	}

	async fn field(&mut self, ctx: &Context, opt: &Options) -> Result<(), Error> {
		// Loop through all field statements
		for fd in self.fd(ctx).await?.iter() {
			let mut val = self.current.pick(&fd.name);
			// Apply the default value for missing fields
			if val.is_none() {
				if let Some(def) = &fd.default {
					val = def.compute(ctx, opt, Some(&self.current)).await?;
					self.current.put(&fd.name, val.clone());
				}
			}
			// Check the field assertion
			if let Some(check) = &fd.assert {
				let mut ctx = MutableContext::new(ctx);
				ctx.add_value("value", Arc::new(val.clone()));
				let ctx = ctx.freeze();
				if !check.compute(&ctx, opt, Some(&self.current)).await?.is_truthy() {
					return Err(Error::FieldCheck {
						thing: self.id.to_string(),
						value: val.to_string(),
						field: fd.name.to_string(),
						check: check.to_string(),
					});
				}
			}
		}
		Ok(())
	}
}
