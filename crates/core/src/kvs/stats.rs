use serde::{Deserialize, Serialize};

/// Running statistics kept for every table which has
/// had records created in it
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableStats {
	/// The number of records created in the table
	pub count: u64,
}
