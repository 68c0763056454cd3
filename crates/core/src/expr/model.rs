use crate::expr::Expr;
use crate::val::Id;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A generator of records for a single table, written
/// as `|person:100|` or `|person:1..100|`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Model {
	/// Generates the given number of records with random ids
	Count(String, u64, Option<Expr>),
	/// Generates one record for each integer id in the inclusive range
	Range(String, i64, i64, Option<Expr>),
}

impl Model {
	/// The table which records are generated for
	pub fn tb(&self) -> &str {
		match self {
			Model::Count(tb, ..) => tb,
			Model::Range(tb, ..) => tb,
		}
	}

	/// The number of records this generator will produce,
	/// saturating at `u64::MAX` for a range spanning every integer
	pub fn count(&self) -> u64 {
		match self {
			Model::Count(_, c, _) => *c,
			Model::Range(_, b, e, _) if e >= b => e.abs_diff(*b).saturating_add(1),
			Model::Range(..) => 0,
		}
	}

	/// The template which seeds each generated record
	pub fn template(&self) -> Option<&Expr> {
		match self {
			Model::Count(_, _, t) => t.as_ref(),
			Model::Range(_, _, _, t) => t.as_ref(),
		}
	}

	/// The identifiers of the generated records, in order
	pub fn ids(&self) -> Box<dyn Iterator<Item = Id> + Send> {
		match self {
			Model::Count(_, c, _) => Box::new((0..*c).map(|_| Id::rand())),
			Model::Range(_, b, e, _) => Box::new((*b..=*e).map(Id::from)),
		}
	}
}

impl Display for Model {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Model::Count(tb, c, _) => write!(f, "|{tb}:{c}|")?,
			Model::Range(tb, b, e, _) => write!(f, "|{tb}:{b}..{e}|")?,
		}
		if let Some(t) = self.template() {
			write!(f, " {t}")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn count_and_ids() {
		let model = Model::Count("person".into(), 5, None);
		assert_eq!(model.count(), 5);
		let ids: std::collections::HashSet<Id> = model.ids().collect();
		assert_eq!(ids.len(), 5);
		let model = Model::Range("person".into(), 3, 6, None);
		assert_eq!(model.count(), 4);
		assert_eq!(model.ids().collect::<Vec<_>>(), vec![3.into(), 4.into(), 5.into(), 6.into()]);
		assert_eq!(model.to_string(), "|person:3..6|");
	}

	#[test]
	fn full_range_count_saturates() {
		let model = Model::Range("person".into(), i64::MIN, i64::MAX, None);
		assert_eq!(model.count(), u64::MAX);
		let model = Model::Range("person".into(), 5, 4, None);
		assert_eq!(model.count(), 0);
	}
}
