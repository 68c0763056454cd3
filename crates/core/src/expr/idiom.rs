use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

/// A single step along a path into a document
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Part {
	Field(String),
	Index(usize),
}

impl From<&str> for Part {
	fn from(v: &str) -> Self {
		Part::Field(v.to_owned())
	}
}

impl From<String> for Part {
	fn from(v: String) -> Self {
		Part::Field(v)
	}
}

impl From<usize> for Part {
	fn from(v: usize) -> Self {
		Part::Index(v)
	}
}

impl Display for Part {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Part::Field(v) => f.write_str(v),
			Part::Index(v) => write!(f, "[{v}]"),
		}
	}
}

/// A path into a document, such as `address.city` or `tags.0`
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Idiom(pub Vec<Part>);

impl From<Vec<Part>> for Idiom {
	fn from(v: Vec<Part>) -> Self {
		Self(v)
	}
}

impl From<&str> for Idiom {
	fn from(v: &str) -> Self {
		Self(
			v.split('.')
				.filter(|p| !p.is_empty())
				.map(|p| match p.parse::<usize>() {
					Ok(i) => Part::Index(i),
					Err(_) => Part::from(p),
				})
				.collect(),
		)
	}
}

impl From<String> for Idiom {
	fn from(v: String) -> Self {
		Self::from(v.as_str())
	}
}

impl Deref for Idiom {
	type Target = [Part];
	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Display for Idiom {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		for (i, p) in self.0.iter().enumerate() {
			match p {
				Part::Field(_) if i > 0 => write!(f, ".{p}")?,
				_ => write!(f, "{p}")?,
			}
		}
		Ok(())
	}
}
