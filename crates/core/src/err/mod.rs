use crate::iam::Error as IamError;
use crate::val::{Thing, Value};
use bincode::Error as BincodeError;
use storekey::decode::Error as DecodeError;
use storekey::encode::Error as EncodeError;
use thiserror::Error;

/// An error originating from the Tessera statement execution core.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// This error is used for ignoring a document when processing a query
	#[doc(hidden)]
	#[error("Conditional clause is not truthy")]
	Ignore,

	/// The database encountered unreachable logic
	#[error("The database encountered unreachable logic: {0}")]
	Unreachable(String),

	/// There was a problem with the underlying datastore
	#[error("There was a problem with the underlying datastore: {0}")]
	Ds(String),

	/// There was a problem with a datastore transaction
	#[error("There was a problem with a datastore transaction: {0}")]
	Tx(String),

	/// The transaction was already cancelled or committed
	#[error("Couldn't update a finished transaction")]
	TxFinished,

	/// The current transaction was created as read-only
	#[error("Couldn't write to a read only transaction")]
	TxReadonly,

	/// The conditional value in the request was not equal
	#[error("Value being checked was not correct")]
	TxConditionNotMet,

	/// The key being inserted in the transaction already exists
	#[error("The key being inserted already exists")]
	TxKeyAlreadyExists,

	/// No namespace has been selected
	#[error("Specify a namespace to use")]
	NsEmpty,

	/// No database has been selected
	#[error("Specify a database to use")]
	DbEmpty,

	/// No SQL query has been specified
	#[error("Specify some SQL code to execute")]
	QueryEmpty,

	/// The query timedout
	#[error("The query was not executed because it exceeded the timeout")]
	QueryTimedout,

	/// The query did not execute, because the transaction was cancelled
	#[error("The query was not executed due to a cancelled transaction")]
	QueryCancelled,

	/// Too many nested computations were attempted
	#[error("Reached excessive computation depth due to functions, subqueries, or futures")]
	ComputationDepthExceeded,

	/// The requested table does not exist
	#[error("The table '{value}' does not exist")]
	TbNotFound {
		value: String,
	},

	/// Can not execute CREATE statement using the specified value
	#[error("Can not execute CREATE statement using value: {value}")]
	CreateStatement {
		value: String,
	},

	/// Can not execute statement using the specified value
	#[error("Can not execute statement using value: {value}")]
	InvalidStatementTarget {
		value: String,
	},

	/// The statement requested a single result but more were produced
	#[error("Expected a single result output when using the ONLY keyword")]
	SingleOnlyOutput,

	/// A model generator requested more records than allowed
	#[error("Can not generate {count} records from a model, the limit is {limit}")]
	ModelLimit {
		count: u64,
		limit: u64,
	},

	/// A batch entry specified an id belonging to another table
	#[error("The record id `{value}` does not belong to the table `{table}`")]
	IdMismatch {
		value: String,
		table: String,
	},

	/// The parameter name is reserved for use by the database
	#[error("'{name}' is a protected variable and cannot be set")]
	InvalidParam {
		name: String,
	},

	/// A binary operation could not be applied to the given values
	#[error("Cannot perform {op} on `{lhs}` and `{rhs}`")]
	TryOperation {
		op: String,
		lhs: String,
		rhs: String,
	},

	/// Tried to merge a value which is not an object into a record
	#[error("Can not merge `{value}` into a record, expected an object")]
	InvalidMerge {
		value: String,
	},

	/// A CONTENT clause did not evaluate to an object
	#[error("Can not use `{value}` in a CONTENT clause")]
	InvalidContent {
		value: String,
	},

	/// An expression can only be evaluated as a statement target
	#[error("Can not evaluate `{value}` outside of a statement target")]
	InvalidExpression {
		value: String,
	},

	/// A field assertion did not hold for the value being written
	#[error("Found {value} for field `{field}`, with record `{thing}`, but field must conform to: {check}")]
	FieldCheck {
		thing: String,
		value: String,
		field: String,
		check: String,
	},

	/// A database entry for the specified record already exists
	#[error("Database record `{thing}` already exists")]
	RecordExists {
		thing: Thing,
	},

	/// A database index entry for the specified record already exists
	#[error("Database index `{index}` already contains {value}, with record `{thing}`")]
	IndexExists {
		thing: Thing,
		index: String,
		value: String,
	},

	/// A table event failed while processing a record
	#[error("The event `{event}` failed for record `{thing}`: {source}")]
	EventFailed {
		event: String,
		thing: Thing,
		#[source]
		source: Box<Error>,
	},

	/// The statement timeout overflowed the clock
	#[error("Invalid timeout: {0:?} seconds")]
	InvalidTimeout(u64),

	/// A record lock could not be acquired in time
	#[error("Timed out waiting for the lock on record `{key}`")]
	LockTimeout {
		key: String,
	},

	/// The permissions do not allow this query to be run on this table
	#[error("IAM error: {0}")]
	IamError(#[from] IamError),

	/// Represents an error when encoding a key-value entry
	#[error("Key encoding error: {0}")]
	Encode(#[from] EncodeError),

	/// Represents an error when decoding a key-value entry
	#[error("Key decoding error: {0}")]
	Decode(#[from] DecodeError),

	/// Represents an underlying error with Bincode serializing / deserializing
	#[error("Bincode error: {0}")]
	Bincode(#[from] BincodeError),
}

impl Error {
	/// Check if this error was caused by a document
	/// being excluded rather than by a real failure
	pub fn is_ignore(&self) -> bool {
		matches!(self, Error::Ignore)
	}
}

impl From<Error> for Value {
	fn from(e: Error) -> Value {
		Value::from(e.to_string())
	}
}

#[cfg(feature = "kv-mem")]
impl From<echodb::err::Error> for Error {
	fn from(e: echodb::err::Error) -> Error {
		match e {
			echodb::err::Error::KeyAlreadyExists => Error::TxKeyAlreadyExists,
			echodb::err::Error::ValNotExpectedValue => Error::TxConditionNotMet,
			_ => Error::Tx(e.to_string()),
		}
	}
}
