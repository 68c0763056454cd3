use crate::ctx::{Context, MutableContext};
use crate::dbs::{Iterator, Options, Target};
use crate::err::Error;
use crate::expr::{Data, Expr, Output};
use crate::iam::{check_access, Action};
use crate::val::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateStatement {
	pub only: bool,
	pub what: Vec<Expr>,
	pub data: Option<Data>,
	pub output: Option<Output>,
	pub timeout: Option<Duration>,
}

impl CreateStatement {
	/// Process this type returning a computed simple Value
	pub(crate) async fn compute(
		&self,
		ctx: &Context,
		opt: &Options,
		_doc: Option<&Value>,
	) -> Result<Value, Error> {
		// Valid options?
		opt.valid_for_db()?;
		// Check the namespace and database are reachable
		let (ns, db) = opt.ns_db()?;
		check_access(&opt.auth, Action::Edit, ns, db)?;
		// Attach the statement timeout
		let ctx = match self.timeout {
			Some(timeout) => {
				let mut ctx = MutableContext::new(ctx);
				ctx.add_timeout(timeout)?;
				ctx.freeze()
			}
			None => ctx.clone(),
		};
		// Create a new iterator
		let mut i = Iterator::new();
		// Resolve every target before any document is processed
		for w in self.what.iter() {
			let v = Target::resolve(&ctx, opt, w).await?;
			i.ingest(v);
		}
		// Output the results
		match i.output(&ctx, opt, self).await? {
			// This is a single record result
			Value::Array(mut a) if self.only => match a.len() {
				// There was exactly one result
				1 => Ok(a.remove(0)),
				// Nothing is returned when no output was requested
				0 if self.output == Some(Output::None) => Ok(Value::None),
				// There were no results, or too many
				_ => Err(Error::SingleOnlyOutput),
			},
			// This is standard query result
			v => Ok(v),
		}
	}

	/// Process this statement as an expression nested inside
	/// another document, returning the created record ids
	pub(crate) async fn fetch(
		&self,
		ctx: &Context,
		opt: &Options,
		doc: Option<&Value>,
	) -> Result<Value, Error> {
		// Prevent deep recursion
		let opt = opt.dive(1)?;
		// Expose the calling document as $parent
		let opt = match doc {
			Some(doc) => opt.new_with_frame(doc.clone()),
			None => opt,
		};
		// Nothing is returned for RETURN NONE
		if self.output == Some(Output::None) {
			self.compute(ctx, &opt, None).await?;
			return Ok(Value::None);
		}
		// Otherwise only the record ids are needed
		let stm = CreateStatement {
			output: Some(Output::Id),
			..self.clone()
		};
		// Run the nested statement
		match stm.compute(ctx, &opt, None).await? {
			Value::Array(mut a) if a.len() == 1 => Ok(a.remove(0)),
			v => Ok(v),
		}
	}
}

impl fmt::Display for CreateStatement {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "CREATE")?;
		if self.only {
			f.write_str(" ONLY")?
		}
		for (i, v) in self.what.iter().enumerate() {
			match i {
				0 => write!(f, " {v}")?,
				_ => write!(f, ", {v}")?,
			}
		}
		if let Some(ref v) = self.data {
			write!(f, " {v}")?
		}
		if let Some(ref v) = self.output {
			write!(f, " {v}")?
		}
		if let Some(ref v) = self.timeout {
			write!(f, " TIMEOUT {v:?}")?
		}
		Ok(())
	}
}
