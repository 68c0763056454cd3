//! The statement and expression tree consumed by the execution core.
//!
//! Expressions are evaluated against a [`Context`], the current
//! [`Options`] and an optional document. `$parent` and `$parents`
//! are read from the variable scope carried by the options, and
//! `$this` refers to the document being evaluated.

use crate::ctx::Context;
use crate::dbs::Options;
use crate::err::Error;
use crate::val::{Table, Thing, Value};
use async_recursion::async_recursion;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

mod batch;
mod data;
mod idiom;
mod model;
mod operator;
mod output;
mod permission;
mod query;

pub mod statements;

pub use self::batch::Batch;
pub use self::data::Data;
pub use self::idiom::{Idiom, Part};
pub use self::model::Model;
pub use self::operator::Operator;
pub use self::output::Output;
pub use self::permission::{Permission, Permissions};
pub use self::query::{Query, Statement};

use self::statements::{CreateStatement, SelectStatement};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expr {
	Literal(Value),
	Table(Table),
	Param(String),
	Idiom(Idiom),
	Array(Vec<Expr>),
	Object(BTreeMap<String, Expr>),
	Binary {
		l: Box<Expr>,
		o: Operator,
		r: Box<Expr>,
	},
	Model(Box<Model>),
	Batch(Box<Batch>),
	Create(Box<CreateStatement>),
	Select(Box<SelectStatement>),
}

impl Default for Expr {
	fn default() -> Self {
		Expr::Literal(Value::None)
	}
}

impl From<Value> for Expr {
	fn from(v: Value) -> Self {
		Expr::Literal(v)
	}
}

impl From<&str> for Expr {
	fn from(v: &str) -> Self {
		Expr::Literal(Value::from(v))
	}
}

impl From<i64> for Expr {
	fn from(v: i64) -> Self {
		Expr::Literal(Value::from(v))
	}
}

impl From<bool> for Expr {
	fn from(v: bool) -> Self {
		Expr::Literal(Value::from(v))
	}
}

impl From<Thing> for Expr {
	fn from(v: Thing) -> Self {
		Expr::Literal(Value::Thing(v))
	}
}

impl From<Table> for Expr {
	fn from(v: Table) -> Self {
		Expr::Table(v)
	}
}

impl From<Idiom> for Expr {
	fn from(v: Idiom) -> Self {
		Expr::Idiom(v)
	}
}

impl From<Model> for Expr {
	fn from(v: Model) -> Self {
		Expr::Model(Box::new(v))
	}
}

impl From<Batch> for Expr {
	fn from(v: Batch) -> Self {
		Expr::Batch(Box::new(v))
	}
}

impl From<CreateStatement> for Expr {
	fn from(v: CreateStatement) -> Self {
		Expr::Create(Box::new(v))
	}
}

impl From<SelectStatement> for Expr {
	fn from(v: SelectStatement) -> Self {
		Expr::Select(Box::new(v))
	}
}

impl Expr {
	/// Create a parameter expression such as `$parent`
	pub fn param(name: &str) -> Self {
		Expr::Param(name.to_owned())
	}

	/// Create a field path expression such as `address.city`
	pub fn idiom(path: &str) -> Self {
		Expr::Idiom(Idiom::from(path))
	}

	/// Create a binary expression
	pub fn binary(l: Expr, o: Operator, r: Expr) -> Self {
		Expr::Binary {
			l: Box::new(l),
			o,
			r: Box::new(r),
		}
	}

	/// Process this expression returning a computed simple Value
	#[async_recursion]
	pub(crate) async fn compute(
		&self,
		ctx: &Context,
		opt: &Options,
		doc: Option<&'async_recursion Value>,
	) -> Result<Value, Error> {
		// Prevent long computation chains
		if let Some(reason) = ctx.done() {
			return Err(reason.into());
		}
		match self {
			Expr::Literal(v) => Ok(v.clone()),
			Expr::Table(v) => Ok(Value::Table(v.clone())),
			Expr::Param(v) => Ok(Self::param_value(ctx, opt, doc, v)),
			Expr::Idiom(v) => Ok(match doc {
				Some(doc) => doc.pick(v),
				None => Value::None,
			}),
			Expr::Array(v) => {
				let mut out = Vec::with_capacity(v.len());
				for v in v.iter() {
					out.push(v.compute(ctx, opt, doc).await?);
				}
				Ok(out.into())
			}
			Expr::Object(v) => {
				let mut out = BTreeMap::new();
				for (k, v) in v.iter() {
					out.insert(k.clone(), v.compute(ctx, opt, doc).await?);
				}
				Ok(out.into())
			}
			Expr::Binary {
				l,
				o,
				r,
			} => {
				let l = l.compute(ctx, opt, doc).await?;
				// Short circuit logical operators
				match o {
					Operator::And if !l.is_truthy() => return Ok(l),
					Operator::Or if l.is_truthy() => return Ok(l),
					_ => (),
				}
				let r = r.compute(ctx, opt, doc).await?;
				match o {
					Operator::And | Operator::Or => Ok(r),
					Operator::Equal => Ok(Value::Bool(l == r)),
					Operator::NotEqual => Ok(Value::Bool(l != r)),
					Operator::LessThan => Ok(Value::Bool(l < r)),
					Operator::LessThanOrEqual => Ok(Value::Bool(l <= r)),
					Operator::MoreThan => Ok(Value::Bool(l > r)),
					Operator::MoreThanOrEqual => Ok(Value::Bool(l >= r)),
					Operator::Add => l.try_add(r),
					Operator::Sub => l.try_sub(r),
					Operator::Mul => l.try_mul(r),
					Operator::Inc | Operator::Dec => Err(Error::InvalidExpression {
						value: self.to_string(),
					}),
				}
			}
			// Generators only make sense as statement targets
			Expr::Model(_) | Expr::Batch(_) => Err(Error::InvalidExpression {
				value: self.to_string(),
			}),
			Expr::Create(v) => v.fetch(ctx, opt, doc).await,
			Expr::Select(v) => v.compute(ctx, opt, doc).await,
		}
	}

	fn param_value(ctx: &Context, opt: &Options, doc: Option<&Value>, name: &str) -> Value {
		match name {
			"this" => doc.cloned().unwrap_or_default(),
			"parent" => opt.scope.parent().cloned().unwrap_or_default(),
			"parents" => opt.scope.parents().to_vec().into(),
			v => ctx.value(v).cloned().unwrap_or_default(),
		}
	}
}

impl Display for Expr {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Expr::Literal(v) => Display::fmt(v, f),
			Expr::Table(v) => Display::fmt(v, f),
			Expr::Param(v) => write!(f, "${v}"),
			Expr::Idiom(v) => Display::fmt(v, f),
			Expr::Array(v) => {
				f.write_str("[")?;
				for (i, v) in v.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					Display::fmt(v, f)?;
				}
				f.write_str("]")
			}
			Expr::Object(v) => {
				if v.is_empty() {
					return f.write_str("{}");
				}
				f.write_str("{ ")?;
				for (i, (k, v)) in v.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{k}: {v}")?;
				}
				f.write_str(" }")
			}
			Expr::Binary {
				l,
				o,
				r,
			} => write!(f, "{l} {o} {r}"),
			Expr::Model(v) => Display::fmt(v, f),
			Expr::Batch(v) => Display::fmt(v, f),
			Expr::Create(v) => write!(f, "({v})"),
			Expr::Select(v) => write!(f, "({v})"),
		}
	}
}
