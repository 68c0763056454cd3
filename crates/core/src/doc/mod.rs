//! The per-record lifecycle of a CREATE statement.
//!
//! Every resolved record is driven through the same sequence of
//! stages, each of which lives in its own module: the record lock is
//! taken, the existing record is loaded and checked, the new document
//! is merged and permission checked, and it is then indexed, stored,
//! counted, announced to live queries and passed to table events
//! before the requested output is yielded.

pub(crate) use self::document::*;

mod allow;
mod create;
mod document;
mod event;
mod exist;
mod index;
mod lives;
mod lock;
mod merge;
mod pluck;
mod store;
mod table;
