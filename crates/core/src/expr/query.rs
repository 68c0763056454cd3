use crate::expr::statements::{CreateStatement, DefineStatement, LiveStatement, SelectStatement};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

/// A top-level statement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Statement {
	Create(CreateStatement),
	Select(SelectStatement),
	Define(DefineStatement),
	Live(LiveStatement),
}

impl Display for Statement {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Self::Create(v) => Display::fmt(v, f),
			Self::Select(v) => Display::fmt(v, f),
			Self::Define(v) => Display::fmt(v, f),
			Self::Live(v) => Display::fmt(v, f),
		}
	}
}

/// A set of statements which are executed in order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Query(pub Vec<Statement>);

impl Deref for Query {
	type Target = Vec<Statement>;
	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl IntoIterator for Query {
	type Item = Statement;
	type IntoIter = std::vec::IntoIter<Self::Item>;
	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl From<Vec<Statement>> for Query {
	fn from(v: Vec<Statement>) -> Self {
		Query(v)
	}
}

impl From<Statement> for Query {
	fn from(v: Statement) -> Self {
		Query(vec![v])
	}
}

impl From<CreateStatement> for Query {
	fn from(v: CreateStatement) -> Self {
		Query(vec![Statement::Create(v)])
	}
}

impl From<SelectStatement> for Query {
	fn from(v: SelectStatement) -> Self {
		Query(vec![Statement::Select(v)])
	}
}

impl From<DefineStatement> for Query {
	fn from(v: DefineStatement) -> Self {
		Query(vec![Statement::Define(v)])
	}
}

impl From<LiveStatement> for Query {
	fn from(v: LiveStatement) -> Self {
		Query(vec![Statement::Live(v)])
	}
}

impl Display for Query {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		for v in self.0.iter() {
			writeln!(f, "{v};")?;
		}
		Ok(())
	}
}
