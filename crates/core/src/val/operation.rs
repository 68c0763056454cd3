use crate::expr::Part;
use crate::val::{Object, Value};
use serde::{Deserialize, Serialize};

/// A single JSON Patch style change between two values
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Operation {
	Add {
		path: Vec<Part>,
		value: Value,
	},
	Remove {
		path: Vec<Part>,
	},
	Replace {
		path: Vec<Part>,
		value: Value,
	},
}

fn pointer(path: &[Part]) -> Value {
	if path.is_empty() {
		return Value::from("/");
	}
	let mut out = String::new();
	for p in path {
		out.push('/');
		match p {
			Part::Field(v) => out.push_str(&v.replace('~', "~0").replace('/', "~1")),
			Part::Index(v) => out.push_str(&v.to_string()),
		}
	}
	Value::from(out)
}

impl From<Operation> for Value {
	fn from(v: Operation) -> Self {
		let mut obj = Object::default();
		match v {
			Operation::Add {
				path,
				value,
			} => {
				obj.insert("op".to_owned(), Value::from("add"));
				obj.insert("path".to_owned(), pointer(&path));
				obj.insert("value".to_owned(), value);
			}
			Operation::Remove {
				path,
			} => {
				obj.insert("op".to_owned(), Value::from("remove"));
				obj.insert("path".to_owned(), pointer(&path));
			}
			Operation::Replace {
				path,
				value,
			} => {
				obj.insert("op".to_owned(), Value::from("replace"));
				obj.insert("path".to_owned(), pointer(&path));
				obj.insert("value".to_owned(), value);
			}
		}
		Value::Object(obj)
	}
}

impl Value {
	/// Compute the operations needed to turn this value into `val`
	pub fn diff(&self, val: &Value) -> Vec<Operation> {
		let mut ops = Vec::new();
		self.diff_into(val, &mut Vec::new(), &mut ops);
		ops
	}

	fn diff_into(&self, val: &Value, path: &mut Vec<Part>, ops: &mut Vec<Operation>) {
		match (self, val) {
			(Value::Object(a), Value::Object(b)) => {
				for (k, v) in a.iter() {
					path.push(Part::Field(k.clone()));
					match b.get(k) {
						Some(w) => v.diff_into(w, path, ops),
						None => ops.push(Operation::Remove {
							path: path.clone(),
						}),
					}
					path.pop();
				}
				for (k, w) in b.iter() {
					if !a.contains_key(k) {
						path.push(Part::Field(k.clone()));
						ops.push(Operation::Add {
							path: path.clone(),
							value: w.clone(),
						});
						path.pop();
					}
				}
			}
			(a, b) if a != b => ops.push(Operation::Replace {
				path: path.clone(),
				value: b.clone(),
			}),
			_ => (),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn diff_from_nothing_replaces_root() {
		let after = Value::from(json!({ "name": "Tobie" }));
		let ops = Value::None.diff(&after);
		assert_eq!(
			ops,
			vec![Operation::Replace {
				path: vec![],
				value: after.clone(),
			}]
		);
		let out = Value::from(ops.into_iter().next().unwrap());
		assert_eq!(out.pick(&[Part::from("path")]), Value::from("/"));
	}

	#[test]
	fn diff_of_nested_objects() {
		let a = Value::from(json!({ "a": 1, "b": { "c": true }, "d": "x" }));
		let b = Value::from(json!({ "a": 1, "b": { "c": false }, "e": "y" }));
		let ops: Vec<Value> = a.diff(&b).into_iter().map(Value::from).collect();
		assert_eq!(
			ops,
			vec![
				Value::from(json!({ "op": "replace", "path": "/b/c", "value": false })),
				Value::from(json!({ "op": "remove", "path": "/d" })),
				Value::from(json!({ "op": "add", "path": "/e", "value": "y" })),
			]
		);
	}
}
