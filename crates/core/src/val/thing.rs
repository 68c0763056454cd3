use crate::cnf::{ID_CHARS, ID_LENGTH};
use crate::val::{Object, Value};
use nanoid::nanoid;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// The identifier part of a record id
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Id {
	Number(i64),
	String(String),
}

impl Id {
	/// Generate a new random ID
	pub fn rand() -> Self {
		Self::String(nanoid!(ID_LENGTH, &ID_CHARS))
	}

	/// Convert a value into a record identifier, if possible
	pub fn try_from_value(val: &Value) -> Option<Id> {
		match val {
			Value::Number(crate::val::Number::Int(v)) => Some(Id::Number(*v)),
			Value::Strand(v) => Some(Id::String(v.clone())),
			_ => None,
		}
	}
}

impl From<i64> for Id {
	fn from(v: i64) -> Self {
		Self::Number(v)
	}
}

impl From<&str> for Id {
	fn from(v: &str) -> Self {
		Self::String(v.to_owned())
	}
}

impl From<String> for Id {
	fn from(v: String) -> Self {
		Self::String(v)
	}
}

impl From<Id> for Value {
	fn from(v: Id) -> Self {
		match v {
			Id::Number(v) => Value::from(v),
			Id::String(v) => Value::from(v),
		}
	}
}

fn is_plain(v: &str) -> bool {
	!v.is_empty()
		&& v.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
		&& !v.chars().all(|c| c.is_ascii_digit())
}

impl Display for Id {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Id::Number(v) => Display::fmt(v, f),
			Id::String(v) if is_plain(v) => f.write_str(v),
			Id::String(v) => write!(f, "⟨{}⟩", v.replace('⟩', "\\⟩")),
		}
	}
}

/// A record id, made up of a table name and an identifier
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Thing {
	pub tb: String,
	pub id: Id,
}

impl Thing {
	pub fn new(tb: impl Into<String>, id: impl Into<Id>) -> Self {
		Self {
			tb: tb.into(),
			id: id.into(),
		}
	}
}

impl From<(&str, &str)> for Thing {
	fn from((tb, id): (&str, &str)) -> Self {
		Self::new(tb, id)
	}
}

impl From<(&str, i64)> for Thing {
	fn from((tb, id): (&str, i64)) -> Self {
		Self::new(tb, id)
	}
}

impl Display for Thing {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match is_plain(&self.tb) {
			true => write!(f, "{}:{}", self.tb, self.id),
			false => write!(f, "⟨{}⟩:{}", self.tb, self.id),
		}
	}
}

impl Object {
	/// Fetch the record id if one exists
	pub fn rid(&self) -> Option<Thing> {
		match self.get("id") {
			Some(Value::Thing(v)) => Some(v.clone()),
			_ => None,
		}
	}
}
