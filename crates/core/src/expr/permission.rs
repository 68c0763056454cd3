use crate::expr::Expr;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Permissions {
	pub select: Permission,
	pub create: Permission,
}

impl Permissions {
	pub fn none() -> Self {
		Permissions {
			select: Permission::None,
			create: Permission::None,
		}
	}

	pub fn full() -> Self {
		Permissions {
			select: Permission::Full,
			create: Permission::Full,
		}
	}
}

impl Default for Permissions {
	fn default() -> Self {
		Self::full()
	}
}

impl Display for Permissions {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write!(f, "PERMISSIONS FOR select {}, FOR create {}", self.select, self.create)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Permission {
	None,
	#[default]
	Full,
	Specific(Expr),
}

impl Display for Permission {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Self::None => f.write_str("NONE"),
			Self::Full => f.write_str("FULL"),
			Self::Specific(v) => write!(f, "WHERE {v}"),
		}
	}
}
