use crate::expr::{Expr, Idiom, Operator};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// The DATA clause of a write statement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Data {
	SetExpression(Vec<(Idiom, Operator, Expr)>),
	UnsetExpression(Vec<Idiom>),
	ContentExpression(Expr),
	MergeExpression(Expr),
}

impl Display for Data {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Self::SetExpression(v) => {
				f.write_str("SET ")?;
				for (i, (l, o, r)) in v.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{l} {o} {r}")?;
				}
				Ok(())
			}
			Self::UnsetExpression(v) => {
				f.write_str("UNSET ")?;
				for (i, l) in v.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{l}")?;
				}
				Ok(())
			}
			Self::ContentExpression(v) => write!(f, "CONTENT {v}"),
			Self::MergeExpression(v) => write!(f, "MERGE {v}"),
		}
	}
}
