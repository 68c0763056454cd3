//! Statement execution.
//!
//! The executor runs each statement of a query in its own write
//! transaction. CREATE targets are resolved into records here, and
//! the iterator drives those records through the document lifecycle
//! and collects what they yield.
mod executor;
mod iterator;
mod notification;
mod options;
mod response;
mod scope;
mod session;
mod target;
mod variables;

pub(crate) use self::executor::*;
pub(crate) use self::iterator::*;
pub(crate) use self::target::*;

pub use self::notification::*;
pub use self::options::*;
pub use self::response::*;
pub use self::scope::*;
pub use self::session::*;
pub use self::variables::*;

/// A transaction shared between the documents of a statement
pub type Transaction = std::sync::Arc<futures::lock::Mutex<crate::kvs::Transaction>>;
