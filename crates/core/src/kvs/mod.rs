//! The module defining the key value store.
//! Everything related the transaction for the key value store is defined in the `tx.rs` file.
//! This module enables the following operations on the key value store:
//! - get
//! - set
//! - put
//! - delete
//! - scan
//!
//! The in-memory engine is always the `echodb` store, and every write
//! transaction is serialised by the engine itself.
mod ds;
mod lock;
mod mem;
mod stats;
mod tx;

pub use self::ds::*;
pub use self::lock::*;
pub use self::stats::*;
pub use self::tx::*;

/// The key part of a key-value pair. An alias for [`Vec<u8>`].
pub type Key = Vec<u8>;

/// The value part of a key-value pair. An alias for [`Vec<u8>`].
pub type Val = Vec<u8>;
