use crate::val::Value;
use std::sync::Arc;

/// The chain of documents enclosing a nested statement.
///
/// Each level of nesting pushes a new frame, so `$parent` is
/// always the innermost enclosing document, and `$parents` is
/// the whole chain from the outermost document inwards.
#[derive(Clone, Debug, Default)]
pub struct Scope {
	frame: Option<Arc<Frame>>,
}

#[derive(Debug)]
struct Frame {
	parent: Value,
	parents: Vec<Value>,
}

impl Scope {
	/// Enter a statement nested inside the given document
	pub fn push(&self, doc: Value) -> Scope {
		let mut parents = self.parents().to_vec();
		parents.push(doc.clone());
		Scope {
			frame: Some(Arc::new(Frame {
				parent: doc,
				parents,
			})),
		}
	}

	/// The innermost enclosing document
	pub fn parent(&self) -> Option<&Value> {
		self.frame.as_ref().map(|f| &f.parent)
	}

	/// Every enclosing document, outermost first
	pub fn parents(&self) -> &[Value] {
		match &self.frame {
			Some(f) => &f.parents,
			None => &[],
		}
	}
}
