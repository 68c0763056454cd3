use crate::val::Value;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, Hash)]
#[non_exhaustive]
pub enum Action {
	Create,
}

impl Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Action::Create => write!(f, "CREATE"),
		}
	}
}

/// A live query notification, delivered once the
/// transaction which produced it has committed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Notification {
	/// The id of the LIVE query to which this notification belongs
	pub id: Uuid,
	/// The CREATE / UPDATE / DELETE action which caused this notification
	pub action: Action,
	/// The resulting notification content, usually the altered record content
	pub result: Value,
}

impl Display for Notification {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"Notification {{live_id: {}, action: {}, result: {}}}",
			self.id, self.action, self.result
		)
	}
}

impl Notification {
	pub const fn new(id: Uuid, action: Action, result: Value) -> Self {
		Self {
			id,
			action,
			result,
		}
	}
}
