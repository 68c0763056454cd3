use crate::err::Error;
use std::fmt;

/// Why a context stopped being ok to continue
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Reason {
	Timedout,
	Canceled,
}

impl fmt::Display for Reason {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Reason::Timedout => write!(f, "Context timedout"),
			Reason::Canceled => write!(f, "Context canceled"),
		}
	}
}

impl From<Reason> for Error {
	fn from(reason: Reason) -> Self {
		match reason {
			Reason::Timedout => Error::QueryTimedout,
			Reason::Canceled => Error::QueryCancelled,
		}
	}
}
