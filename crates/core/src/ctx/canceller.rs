use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancels the context it was created from, and every child of it
#[derive(Clone, Debug, Default)]
pub struct Canceller {
	cancelled: Arc<AtomicBool>,
}

impl Canceller {
	pub fn new(cancelled: Arc<AtomicBool>) -> Canceller {
		Canceller {
			cancelled,
		}
	}

	pub fn cancel(&self) {
		self.cancelled.store(true, Ordering::Relaxed);
	}
}
