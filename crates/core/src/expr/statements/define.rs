use crate::ctx::Context;
use crate::dbs::Options;
use crate::err::Error;
use crate::expr::{Expr, Idiom, Permissions};
use crate::iam::check_define;
use crate::val::Value;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DefineStatement {
	Table(DefineTableStatement),
	Field(DefineFieldStatement),
	Index(DefineIndexStatement),
	Event(DefineEventStatement),
}

impl DefineStatement {
	/// Process this type returning a computed simple Value
	pub(crate) async fn compute(&self, ctx: &Context, opt: &Options) -> Result<Value, Error> {
		// Valid options?
		opt.valid_for_db()?;
		// Only system users may change definitions
		let (ns, db) = opt.ns_db()?;
		check_define(&opt.auth, ns, db)?;
		// Claim transaction
		let txn = ctx.tx()?;
		let mut run = txn.lock().await;
		// Process the definition
		match self {
			Self::Table(v) => run.set_tb(&opt.kv, ns, db, v).await?,
			Self::Field(v) => run.set_fd(&opt.kv, ns, db, v).await?,
			Self::Index(v) => run.set_ix(&opt.kv, ns, db, v).await?,
			Self::Event(v) => run.set_ev(&opt.kv, ns, db, v).await?,
		}
		// Ok all good
		Ok(Value::None)
	}
}

impl Display for DefineStatement {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Table(v) => Display::fmt(v, f),
			Self::Field(v) => Display::fmt(v, f),
			Self::Index(v) => Display::fmt(v, f),
			Self::Event(v) => Display::fmt(v, f),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DefineTableStatement {
	pub name: String,
	pub permissions: Permissions,
}

impl Display for DefineTableStatement {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "DEFINE TABLE {} {}", self.name, self.permissions)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DefineFieldStatement {
	pub name: Idiom,
	pub what: String,
	pub default: Option<Expr>,
	pub assert: Option<Expr>,
}

impl Display for DefineFieldStatement {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "DEFINE FIELD {} ON {}", self.name, self.what)?;
		if let Some(ref v) = self.default {
			write!(f, " DEFAULT {v}")?
		}
		if let Some(ref v) = self.assert {
			write!(f, " ASSERT {v}")?
		}
		Ok(())
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DefineIndexStatement {
	pub name: String,
	pub what: String,
	pub cols: Vec<Idiom>,
	pub uniq: bool,
}

impl Display for DefineIndexStatement {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "DEFINE INDEX {} ON {} FIELDS ", self.name, self.what)?;
		for (i, v) in self.cols.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{v}")?;
		}
		if self.uniq {
			f.write_str(" UNIQUE")?
		}
		Ok(())
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DefineEventStatement {
	pub name: String,
	pub what: String,
	pub when: Expr,
	pub then: Vec<Expr>,
}

impl Display for DefineEventStatement {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "DEFINE EVENT {} ON {} WHEN {} THEN ", self.name, self.what, self.when)?;
		for (i, v) in self.then.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{v}")?;
		}
		Ok(())
	}
}
