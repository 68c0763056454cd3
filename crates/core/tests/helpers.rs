#![allow(dead_code)]

use tessera_core::dbs::Session;
use tessera_core::err::Error;
use tessera_core::expr::statements::{
	CreateStatement, DefineEventStatement, DefineFieldStatement, DefineIndexStatement,
	DefineStatement, DefineTableStatement, SelectStatement,
};
use tessera_core::expr::{Data, Expr, Idiom, Operator, Permissions, Statement};
use tessera_core::kvs::Datastore;
use tessera_core::val::{Table, Value};

pub async fn new_ds() -> Result<Datastore, Error> {
	Ok(Datastore::new("memory").await?.with_notifications())
}

/// A root session with a namespace and database selected
pub fn owner() -> Session {
	Session::owner().with_ns("test").with_db("test")
}

/// An anonymous session, subject to table permissions
pub fn viewer() -> Session {
	Session::viewer().with_ns("test").with_db("test")
}

pub fn table(tb: &str) -> Expr {
	Expr::Table(Table::from(tb))
}

/// A CREATE statement for a single target
pub fn create(what: impl Into<Expr>) -> CreateStatement {
	CreateStatement {
		what: vec![what.into()],
		..Default::default()
	}
}

/// A SET clause assigning each field
pub fn set(fields: Vec<(&str, Expr)>) -> Data {
	Data::SetExpression(
		fields.into_iter().map(|(k, v)| (Idiom::from(k), Operator::Equal, v)).collect(),
	)
}

/// An object expression
pub fn object(fields: Vec<(&str, Expr)>) -> Expr {
	Expr::Object(fields.into_iter().map(|(k, v)| (k.to_owned(), v)).collect())
}

/// A SELECT of every record in a table
pub fn select(tb: &str) -> SelectStatement {
	SelectStatement {
		what: vec![table(tb)],
		..Default::default()
	}
}

pub fn define_table(tb: &str, permissions: Permissions) -> Statement {
	Statement::Define(DefineStatement::Table(DefineTableStatement {
		name: tb.to_owned(),
		permissions,
	}))
}

pub fn define_field(tb: &str, name: &str, default: Option<Expr>, assert: Option<Expr>) -> Statement {
	Statement::Define(DefineStatement::Field(DefineFieldStatement {
		name: Idiom::from(name),
		what: tb.to_owned(),
		default,
		assert,
	}))
}

pub fn define_index(tb: &str, name: &str, cols: &[&str], uniq: bool) -> Statement {
	Statement::Define(DefineStatement::Index(DefineIndexStatement {
		name: name.to_owned(),
		what: tb.to_owned(),
		cols: cols.iter().map(|c| Idiom::from(*c)).collect(),
		uniq,
	}))
}

pub fn define_event(tb: &str, name: &str, when: Expr, then: Vec<Expr>) -> Statement {
	Statement::Define(DefineStatement::Event(DefineEventStatement {
		name: name.to_owned(),
		what: tb.to_owned(),
		when,
		then,
	}))
}

/// Run a query as the owner, failing if any statement fails
pub async fn run(ds: &Datastore, stms: Vec<Statement>) -> Result<Vec<Value>, Error> {
	let res = ds.execute(stms, &owner(), None).await?;
	res.into_iter().map(|r| r.result).collect()
}

/// Run a single CREATE as the owner
pub async fn run_create(ds: &Datastore, stm: CreateStatement) -> Result<Value, Error> {
	let mut res = ds.execute(stm, &owner(), None).await?;
	res.remove(0).result
}

/// Fetch every record in a table
pub async fn records(ds: &Datastore, tb: &str) -> Result<Vec<Value>, Error> {
	let mut res = ds.execute(Statement::Select(select(tb)), &owner(), None).await?;
	match res.remove(0).result? {
		Value::Array(a) => Ok(a.0),
		v => Ok(vec![v]),
	}
}

/// Read a field path from a value
pub fn get(v: &Value, path: &str) -> Value {
	v.pick(&Idiom::from(path))
}
