use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Binary operators, and the assignment operators of a SET clause
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Operator {
	Or,
	And,
	#[default]
	Equal,
	NotEqual,
	LessThan,
	LessThanOrEqual,
	MoreThan,
	MoreThanOrEqual,
	Add,
	Sub,
	Mul,
	// Assignment only
	Inc,
	Dec,
}

impl Display for Operator {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.write_str(match self {
			Self::Or => "OR",
			Self::And => "AND",
			Self::Equal => "=",
			Self::NotEqual => "!=",
			Self::LessThan => "<",
			Self::LessThanOrEqual => "<=",
			Self::MoreThan => ">",
			Self::MoreThanOrEqual => ">=",
			Self::Add => "+",
			Self::Sub => "-",
			Self::Mul => "*",
			Self::Inc => "+=",
			Self::Dec => "-=",
		})
	}
}
