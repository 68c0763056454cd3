use crate::ctx::MutableContext;
use crate::err::Error;
use crate::val::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Parameters bound by the caller of a query
#[derive(Clone, Debug, Default)]
pub struct Variables(pub BTreeMap<String, Value>);

impl Variables {
	pub fn new() -> Self {
		Self::default()
	}

	/// Bind a parameter, returning the updated set
	pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
		self.0.insert(name.to_owned(), value.into());
		self
	}

	/// Attach the variables to the context, rejecting any
	/// which shadow the names the engine binds itself
	pub(crate) fn attach(self, mut ctx: MutableContext) -> Result<MutableContext, Error> {
		for (key, val) in self.0 {
			if MutableContext::is_protected(&key) {
				return Err(Error::InvalidParam {
					name: key,
				});
			}
			ctx.add_value(key, Arc::new(val));
		}
		Ok(ctx)
	}
}

impl From<BTreeMap<String, Value>> for Variables {
	fn from(v: BTreeMap<String, Value>) -> Self {
		Self(v)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn protected_names_are_rejected() {
		let ctx = MutableContext::background();
		let res = Variables::new().with("parent", 1).attach(ctx);
		assert!(matches!(res, Err(Error::InvalidParam { .. })));
	}

	#[test]
	fn variables_are_visible() {
		let ctx = MutableContext::background();
		let ctx = Variables::new().with("name", "Tobie").attach(ctx).unwrap().freeze();
		assert_eq!(ctx.value("name"), Some(&Value::from("Tobie")));
	}
}
