use crate::expr::Expr;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A list of seed documents which are all written into one table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Batch {
	pub tb: String,
	pub entries: Vec<Expr>,
}

impl Display for Batch {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write!(f, "BATCH {} [", self.tb)?;
		for (i, v) in self.entries.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{v}")?;
		}
		f.write_str("]")
	}
}
