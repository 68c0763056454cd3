use crate::ctx::Context;
use crate::dbs::Options;
use crate::err::Error;
use crate::expr::Expr;
use crate::iam::{check_access, Action};
use crate::val::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A subscription to records created in a table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiveStatement {
	pub id: Uuid,
	pub what: String,
	pub cond: Option<Expr>,
}

impl LiveStatement {
	pub fn new(what: &str) -> Self {
		Self {
			id: Uuid::now_v7(),
			what: what.to_owned(),
			cond: None,
		}
	}

	/// Process this type returning a computed simple Value
	pub(crate) async fn compute(&self, ctx: &Context, opt: &Options) -> Result<Value, Error> {
		// Valid options?
		opt.valid_for_db()?;
		// Check the namespace and database are reachable
		let (ns, db) = opt.ns_db()?;
		check_access(&opt.auth, Action::View, ns, db)?;
		// Insert the table live query
		ctx.tx()?.lock().await.set_lq(&opt.kv, ns, db, self).await?;
		// Return the query id
		Ok(self.id.into())
	}
}

impl fmt::Display for LiveStatement {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "LIVE SELECT * FROM {}", self.what)?;
		if let Some(ref v) = self.cond {
			write!(f, " WHERE {v}")?
		}
		Ok(())
	}
}
