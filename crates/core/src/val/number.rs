use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Number {
	Int(i64),
	Float(f64),
}

impl Default for Number {
	fn default() -> Self {
		Self::Int(0)
	}
}

impl From<i64> for Number {
	fn from(v: i64) -> Self {
		Self::Int(v)
	}
}

impl From<f64> for Number {
	fn from(v: f64) -> Self {
		Self::Float(v)
	}
}

impl Display for Number {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Number::Int(v) => Display::fmt(v, f),
			Number::Float(v) => {
				if v.is_finite() && v.fract() == 0.0 {
					write!(f, "{v}f")
				} else {
					Display::fmt(v, f)
				}
			}
		}
	}
}

impl Number {
	pub fn is_truthy(&self) -> bool {
		match self {
			Number::Int(v) => v != &0,
			Number::Float(v) => v != &0.0,
		}
	}

	pub fn as_float(&self) -> f64 {
		match self {
			Number::Int(v) => *v as f64,
			Number::Float(v) => *v,
		}
	}

	pub fn try_add(self, other: Self) -> Option<Self> {
		match (self, other) {
			(Number::Int(a), Number::Int(b)) => a.checked_add(b).map(Number::Int),
			(a, b) => Some(Number::Float(a.as_float() + b.as_float())),
		}
	}

	pub fn try_sub(self, other: Self) -> Option<Self> {
		match (self, other) {
			(Number::Int(a), Number::Int(b)) => a.checked_sub(b).map(Number::Int),
			(a, b) => Some(Number::Float(a.as_float() - b.as_float())),
		}
	}

	pub fn try_mul(self, other: Self) -> Option<Self> {
		match (self, other) {
			(Number::Int(a), Number::Int(b)) => a.checked_mul(b).map(Number::Int),
			(a, b) => Some(Number::Float(a.as_float() * b.as_float())),
		}
	}
}

impl PartialEq for Number {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Number::Int(a), Number::Int(b)) => a == b,
			(a, b) => a.as_float().total_cmp(&b.as_float()) == Ordering::Equal,
		}
	}
}

impl PartialOrd for Number {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		match (self, other) {
			(Number::Int(a), Number::Int(b)) => Some(a.cmp(b)),
			(a, b) => Some(a.as_float().total_cmp(&b.as_float())),
		}
	}
}
