use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// The shape of the value yielded for each written record
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Output {
	None,
	Null,
	Diff,
	Before,
	#[default]
	After,
	Id,
}

impl Display for Output {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.write_str("RETURN ")?;
		match self {
			Self::None => f.write_str("NONE"),
			Self::Null => f.write_str("NULL"),
			Self::Diff => f.write_str("DIFF"),
			Self::Before => f.write_str("BEFORE"),
			Self::After => f.write_str("AFTER"),
			Self::Id => f.write_str("ID"),
		}
	}
}
