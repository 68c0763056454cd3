//! # Tessera Core
//!
//! This crate is the statement execution core of the Tessera document store.
//! It turns CREATE statements into persisted, indexed and event-triggered
//! records inside a transactional key-value store: the statement targets are
//! resolved into storage keys, and every resolved record is then driven
//! through a fixed per-document lifecycle.
//!
//! ```no_run
//! use tessera_core::dbs::Session;
//! use tessera_core::expr::statements::CreateStatement;
//! use tessera_core::expr::{Data, Expr, Operator};
//! use tessera_core::kvs::Datastore;
//! use tessera_core::val::Table;
//!
//! # async fn run() -> Result<(), tessera_core::err::Error> {
//! let ds = Datastore::new("memory").await?;
//! let ses = Session::owner().with_ns("test").with_db("test");
//! let stm = CreateStatement {
//! 	what: vec![Expr::Table(Table::from("person"))],
//! 	data: Some(Data::SetExpression(vec![(
//! 		"name".into(),
//! 		Operator::Equal,
//! 		Expr::from("Tobie"),
//! 	)])),
//! 	..Default::default()
//! };
//! let res = ds.execute(stm, &ses, None).await?;
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate tracing;

#[macro_use]
mod mac;

mod doc;

pub mod cnf;
pub mod ctx;
pub mod dbs;
pub mod err;
pub mod expr;
pub mod iam;
pub mod key;
pub mod kvs;
pub mod val;

/// Channels for receiving live query notifications
pub mod channel {
	pub use async_channel::bounded;
	pub use async_channel::unbounded;
	pub use async_channel::Receiver;
	pub use async_channel::Sender;
}
