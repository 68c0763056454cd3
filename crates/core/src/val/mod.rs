//! Runtime values which flow through statement evaluation and are
//! persisted as record contents.

use crate::err::Error;
use crate::expr::Part;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use uuid::Uuid;

mod array;
mod number;
mod object;
mod operation;
mod table;
mod thing;

pub use self::array::Array;
pub use self::number::Number;
pub use self::object::Object;
pub use self::operation::Operation;
pub use self::table::Table;
pub use self::thing::{Id, Thing};

#[derive(Clone, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Value {
	#[default]
	None,
	Null,
	Bool(bool),
	Number(Number),
	Strand(String),
	Uuid(Uuid),
	Array(Array),
	Object(Object),
	Thing(Thing),
	Table(Table),
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Number(Number::Int(v))
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Number(Number::Float(v))
	}
}

impl From<Number> for Value {
	fn from(v: Number) -> Self {
		Value::Number(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Strand(v.to_owned())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Strand(v)
	}
}

impl From<Uuid> for Value {
	fn from(v: Uuid) -> Self {
		Value::Uuid(v)
	}
}

impl From<Array> for Value {
	fn from(v: Array) -> Self {
		Value::Array(v)
	}
}

impl From<Vec<Value>> for Value {
	fn from(v: Vec<Value>) -> Self {
		Value::Array(Array(v))
	}
}

impl From<Object> for Value {
	fn from(v: Object) -> Self {
		Value::Object(v)
	}
}

impl From<BTreeMap<String, Value>> for Value {
	fn from(v: BTreeMap<String, Value>) -> Self {
		Value::Object(Object(v))
	}
}

impl From<Thing> for Value {
	fn from(v: Thing) -> Self {
		Value::Thing(v)
	}
}

impl From<Table> for Value {
	fn from(v: Table) -> Self {
		Value::Table(v)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		match v {
			Some(v) => v.into(),
			None => Value::None,
		}
	}
}

impl From<serde_json::Value> for Value {
	fn from(v: serde_json::Value) -> Self {
		match v {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(v) => Value::Bool(v),
			serde_json::Value::Number(v) => match v.as_i64() {
				Some(i) => Value::from(i),
				None => Value::from(v.as_f64().unwrap_or(f64::NAN)),
			},
			serde_json::Value::String(v) => Value::Strand(v),
			serde_json::Value::Array(v) => v.into_iter().map(Value::from).collect::<Vec<_>>().into(),
			serde_json::Value::Object(v) => {
				Value::Object(Object(v.into_iter().map(|(k, v)| (k, Value::from(v))).collect()))
			}
		}
	}
}

impl Value {
	/// Check if this Value is NONE
	pub fn is_none(&self) -> bool {
		matches!(self, Value::None)
	}

	/// Check if this Value is NONE or NULL
	pub fn is_none_or_null(&self) -> bool {
		matches!(self, Value::None | Value::Null)
	}

	/// Check if this Value is not NONE or NULL
	pub fn is_some(&self) -> bool {
		!self.is_none_or_null()
	}

	/// Check if this Value is an object
	pub fn is_object(&self) -> bool {
		matches!(self, Value::Object(_))
	}

	/// Check if this Value evaluates to true in a conditional
	pub fn is_truthy(&self) -> bool {
		match self {
			Value::Bool(v) => *v,
			Value::Uuid(_) | Value::Thing(_) | Value::Table(_) => true,
			Value::Strand(v) => !v.is_empty(),
			Value::Number(v) => v.is_truthy(),
			Value::Array(v) => !v.is_empty(),
			Value::Object(v) => !v.is_empty(),
			_ => false,
		}
	}

	/// Fetch the record id of this value, if it is a record
	pub fn rid(&self) -> Option<Thing> {
		match self {
			Value::Object(v) => v.rid(),
			Value::Thing(v) => Some(v.clone()),
			_ => None,
		}
	}

	/// Returns the name of the type of this value
	pub fn kindof(&self) -> &'static str {
		match self {
			Value::None => "none",
			Value::Null => "null",
			Value::Bool(_) => "bool",
			Value::Number(_) => "number",
			Value::Strand(_) => "string",
			Value::Uuid(_) => "uuid",
			Value::Array(_) => "array",
			Value::Object(_) => "object",
			Value::Thing(_) => "record",
			Value::Table(_) => "table",
		}
	}

	/// Fetch the value at the specified path
	pub fn pick(&self, path: &[Part]) -> Value {
		match path.split_first() {
			None => self.clone(),
			Some((p, rest)) => match (self, p) {
				(Value::Object(v), Part::Field(f)) => match v.get(f) {
					Some(v) => v.pick(rest),
					None => Value::None,
				},
				(Value::Array(v), Part::Index(i)) => match v.get(*i) {
					Some(v) => v.pick(rest),
					None => Value::None,
				},
				(Value::Array(v), Part::Field(_)) => {
					v.iter().map(|v| v.pick(path)).collect::<Vec<_>>().into()
				}
				_ => Value::None,
			},
		}
	}

	/// Set the value at the specified path, creating
	/// any intermediate objects which do not exist
	pub fn put(&mut self, path: &[Part], val: Value) {
		match path.split_first() {
			None => *self = val,
			Some((p, rest)) => match (self, p) {
				(Value::Object(v), Part::Field(f)) => {
					v.entry(f.clone()).or_default().put(rest, val);
				}
				(Value::Array(v), Part::Index(i)) => {
					if let Some(v) = v.get_mut(*i) {
						v.put(rest, val);
					}
				}
				(this, Part::Field(_)) if this.is_none_or_null() => {
					*this = Value::Object(Object::default());
					this.put(path, val);
				}
				_ => (),
			},
		}
	}

	/// Remove the value at the specified path
	pub fn cut(&mut self, path: &[Part]) {
		match path.split_first() {
			None => (),
			Some((p, rest)) => match (self, p) {
				(Value::Object(v), Part::Field(f)) => match rest.is_empty() {
					true => {
						v.remove(f);
					}
					false => {
						if let Some(v) = v.get_mut(f) {
							v.cut(rest);
						}
					}
				},
				(Value::Array(v), Part::Index(i)) => match rest.is_empty() {
					true => {
						if *i < v.len() {
							v.remove(*i);
						}
					}
					false => {
						if let Some(v) = v.get_mut(*i) {
							v.cut(rest);
						}
					}
				},
				_ => (),
			},
		}
	}

	/// Deep merge an object into this value
	pub fn merge(&mut self, val: Value) -> Result<(), Error> {
		match val {
			Value::Object(obj) => {
				if !self.is_object() {
					*self = Value::Object(Object::default());
				}
				if let Value::Object(this) = self {
					for (k, v) in obj {
						match (this.get_mut(&k), v) {
							(Some(w @ Value::Object(_)), v @ Value::Object(_)) => w.merge(v)?,
							(_, v) => {
								this.insert(k, v);
							}
						}
					}
				}
				Ok(())
			}
			Value::None => Ok(()),
			v => Err(Error::InvalidMerge {
				value: v.to_string(),
			}),
		}
	}

	/// Set the record id field on this document
	pub fn def(&mut self, rid: &Thing) {
		self.put(&[Part::from("id")], Value::Thing(rid.clone()));
	}

	pub fn try_add(self, other: Value) -> Result<Value, Error> {
		match (self, other) {
			(Value::Number(a), Value::Number(b)) => match a.try_add(b) {
				Some(v) => Ok(Value::Number(v)),
				None => Err(overflow("+", a, b)),
			},
			(Value::Strand(a), Value::Strand(b)) => Ok(Value::Strand(a + &b)),
			(Value::Array(mut a), Value::Array(b)) => {
				a.extend(b);
				Ok(Value::Array(a))
			}
			(Value::Array(mut a), b) => {
				a.push(b);
				Ok(Value::Array(a))
			}
			(Value::None, b) => Ok(b),
			(a, b) => Err(Error::TryOperation {
				op: "+".to_owned(),
				lhs: a.to_string(),
				rhs: b.to_string(),
			}),
		}
	}

	pub fn try_sub(self, other: Value) -> Result<Value, Error> {
		match (self, other) {
			(Value::Number(a), Value::Number(b)) => match a.try_sub(b) {
				Some(v) => Ok(Value::Number(v)),
				None => Err(overflow("-", a, b)),
			},
			(Value::Array(mut a), b) => {
				a.retain(|v| v != &b);
				Ok(Value::Array(a))
			}
			(a, b) => Err(Error::TryOperation {
				op: "-".to_owned(),
				lhs: a.to_string(),
				rhs: b.to_string(),
			}),
		}
	}

	pub fn try_mul(self, other: Value) -> Result<Value, Error> {
		match (self, other) {
			(Value::Number(a), Value::Number(b)) => match a.try_mul(b) {
				Some(v) => Ok(Value::Number(v)),
				None => Err(overflow("*", a, b)),
			},
			(a, b) => Err(Error::TryOperation {
				op: "*".to_owned(),
				lhs: a.to_string(),
				rhs: b.to_string(),
			}),
		}
	}
}

fn overflow(op: &str, a: Number, b: Number) -> Error {
	Error::TryOperation {
		op: op.to_owned(),
		lhs: a.to_string(),
		rhs: b.to_string(),
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Value::None => f.write_str("NONE"),
			Value::Null => f.write_str("NULL"),
			Value::Bool(v) => Display::fmt(v, f),
			Value::Number(v) => Display::fmt(v, f),
			Value::Strand(v) => write!(f, "'{}'", v.replace('\'', "\\'")),
			Value::Uuid(v) => write!(f, "u'{v}'"),
			Value::Array(v) => Display::fmt(v, f),
			Value::Object(v) => Display::fmt(v, f),
			Value::Thing(v) => Display::fmt(v, f),
			Value::Table(v) => Display::fmt(v, f),
		}
	}
}
