use crate::cnf::MAX_MODEL_COUNT;
use crate::ctx::Context;
use crate::dbs::Options;
use crate::err::Error;
use crate::expr::{Batch, Expr, Model, Part};
use crate::key::StorageKey;
use crate::val::{Id, Thing, Value};
use std::fmt;

const TARGET: &str = "tessera::core::dbs::target";

/// A record which is ready to be driven through the document
/// lifecycle: its full storage key, and an optional seed document.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Processed {
	pub(crate) key: StorageKey,
	pub(crate) seed: Option<Value>,
}

/// The classified form of a single WHAT expression
pub(crate) enum Target {
	/// A table, with one fresh record id per evaluation
	Table(StorageKey),
	/// A bare identifier naming a table, treated as a table
	Ident(StorageKey),
	/// An explicit record id
	Thing(StorageKey),
	/// A record generator for a table, with an optional template
	Model(StorageKey, Box<Model>, Option<Value>),
	/// A list of seed documents for a table, with their optional ids
	Batch(StorageKey, Vec<(Option<Id>, Value)>),
	/// Documents produced by a subquery, each keyed on its own id
	Values(Vec<Processed>),
}

impl fmt::Debug for Target {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Target::Table(k) => write!(f, "Table({k})"),
			Target::Ident(k) => write!(f, "Ident({k})"),
			Target::Thing(k) => write!(f, "Thing({k})"),
			Target::Model(k, m, _) => write!(f, "Model({k}, {m})"),
			Target::Batch(k, v) => write!(f, "Batch({k}, {})", v.len()),
			Target::Values(v) => write!(f, "Values({})", v.len()),
		}
	}
}

impl Target {
	/// Evaluate a WHAT expression and classify its result.
	///
	/// Unsupported values fail here, before any document is processed.
	pub(crate) async fn resolve(ctx: &Context, opt: &Options, what: &Expr) -> Result<Target, Error> {
		let (ns, db) = opt.ns_db()?;
		let key = |tb: &str, id: Option<Id>| StorageKey::new(&opt.kv, ns, db, tb, id);
		let target = match what {
			// A plain field name is an implicit table name
			Expr::Idiom(v) if v.len() == 1 => match &v[0] {
				Part::Field(tb) => Target::Ident(key(tb, None)),
				_ => Self::classify(opt, what.compute(ctx, opt, None).await?)?,
			},
			Expr::Model(m) => {
				// Check the generator is within bounds
				if m.count() > *MAX_MODEL_COUNT {
					return Err(Error::ModelLimit {
						count: m.count(),
						limit: *MAX_MODEL_COUNT,
					});
				}
				let template = match m.template() {
					Some(t) => Some(t.compute(ctx, opt, None).await?),
					None => None,
				};
				Target::Model(key(m.tb(), None), m.clone(), template)
			}
			Expr::Batch(b) => Target::Batch(key(&b.tb, None), Self::entries(ctx, opt, b).await?),
			_ => Self::classify(opt, what.compute(ctx, opt, None).await?)?,
		};
		trace!(target: TARGET, "Resolved {what} into {target:?}");
		Ok(target)
	}

	/// Classify an evaluated WHAT value
	fn classify(opt: &Options, val: Value) -> Result<Target, Error> {
		let (ns, db) = opt.ns_db()?;
		match val {
			Value::Table(tb) => Ok(Target::Table(StorageKey::new(&opt.kv, ns, db, &tb, None))),
			Value::Thing(id) => {
				Ok(Target::Thing(StorageKey::new(&opt.kv, ns, db, &id.tb, Some(id.id))))
			}
			Value::Array(v) => {
				let mut out = Vec::with_capacity(v.len());
				for v in v {
					out.push(Self::element(opt, v)?);
				}
				Ok(Target::Values(out))
			}
			// A single document from a collapsed subquery
			Value::Object(_) => Ok(Target::Values(vec![Self::element(opt, val)?])),
			v => Err(Error::CreateStatement {
				value: v.to_string(),
			}),
		}
	}

	/// Key a single subquery result on its own record id
	fn element(opt: &Options, val: Value) -> Result<Processed, Error> {
		let (ns, db) = opt.ns_db()?;
		let (rid, seed): (Thing, Option<Value>) = match val {
			Value::Thing(id) => (id, None),
			Value::Object(ref o) => match o.rid() {
				Some(id) => (id, Some(val)),
				None => {
					return Err(Error::InvalidStatementTarget {
						value: val.to_string(),
					})
				}
			},
			v => {
				return Err(Error::InvalidStatementTarget {
					value: v.to_string(),
				})
			}
		};
		Ok(Processed {
			key: StorageKey::new(&opt.kv, ns, db, &rid.tb, Some(rid.id)),
			seed,
		})
	}

	/// Evaluate the seed documents of a batch
	async fn entries(
		ctx: &Context,
		opt: &Options,
		batch: &Batch,
	) -> Result<Vec<(Option<Id>, Value)>, Error> {
		let mut out = Vec::with_capacity(batch.entries.len());
		for e in batch.entries.iter() {
			let val = e.compute(ctx, opt, None).await?;
			if !val.is_object() {
				return Err(Error::InvalidContent {
					value: val.to_string(),
				});
			}
			let id = match val.pick(&[Part::from("id")]) {
				Value::None | Value::Null => None,
				Value::Thing(v) if v.tb == batch.tb => Some(v.id),
				Value::Thing(v) => {
					return Err(Error::IdMismatch {
						value: v.to_string(),
						table: batch.tb.clone(),
					})
				}
				v => match Id::try_from_value(&v) {
					Some(id) => Some(id),
					None => {
						return Err(Error::IdMismatch {
							value: v.to_string(),
							table: batch.tb.clone(),
						})
					}
				},
			};
			out.push((id, val));
		}
		Ok(out)
	}

	/// Whether this target names exactly one explicit record
	pub(crate) fn is_thing(&self) -> bool {
		matches!(self, Target::Thing(_))
	}

	/// Lazily expand this target into the records it creates
	pub(crate) fn expand(self) -> Box<dyn Iterator<Item = Processed> + Send> {
		match self {
			Target::Table(key) | Target::Ident(key) => {
				let tb = key.tb.clone();
				Box::new(std::iter::once_with(move || Processed {
					key: key.record(&tb, Id::rand()),
					seed: None,
				}))
			}
			Target::Thing(key) => Box::new(std::iter::once(Processed {
				key,
				seed: None,
			})),
			Target::Model(key, model, template) => {
				let tb = model.tb().to_owned();
				Box::new(model.ids().enumerate().map(move |(i, id)| Processed {
					key: key.record(&tb, id),
					seed: match &template {
						Some(Value::Array(a)) => a.get(i).cloned(),
						Some(v) => Some(v.clone()),
						None => None,
					},
				}))
			}
			Target::Batch(key, entries) => {
				let tb = key.tb.clone();
				Box::new(entries.into_iter().map(move |(id, seed)| Processed {
					key: key.record(&tb, id.unwrap_or_else(Id::rand)),
					seed: Some(seed),
				}))
			}
			Target::Values(v) => Box::new(v.into_iter()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ctx::MutableContext;
	use crate::expr::Idiom;
	use crate::val::Table;
	use std::collections::HashSet;

	fn opt() -> Options {
		Options::new("tessera").with_ns(Some("test".into())).with_db(Some("test".into()))
	}

	async fn resolve(what: Expr) -> Result<Vec<Processed>, Error> {
		let ctx = MutableContext::background().freeze();
		Ok(Target::resolve(&ctx, &opt(), &what).await?.expand().collect())
	}

	#[tokio::test]
	async fn table_generates_one_fresh_id() {
		let res = resolve(Expr::Table(Table::from("person"))).await.unwrap();
		assert_eq!(res.len(), 1);
		assert_eq!(res[0].key.tb, "person");
		assert!(res[0].key.id.is_some());
		assert_eq!(res[0].seed, None);
	}

	#[tokio::test]
	async fn bare_identifier_is_a_table() {
		let res = resolve(Expr::Idiom(Idiom::from("person"))).await.unwrap();
		assert_eq!(res.len(), 1);
		assert_eq!(res[0].key.tb, "person");
	}

	#[tokio::test]
	async fn thing_is_passed_through() {
		let res = resolve(Expr::from(Thing::new("person", "tobie"))).await.unwrap();
		assert_eq!(res[0].key, StorageKey::new("tessera", "test", "test", "person", Some("tobie".into())));
	}

	#[tokio::test]
	async fn model_count_generates_distinct_ids() {
		let model = Model::Count("person".into(), 5, Some(Expr::from(Value::from(map! {
			"kind".to_owned() => Value::from("generated"),
		}))));
		let res = resolve(Expr::from(model)).await.unwrap();
		assert_eq!(res.len(), 5);
		let ids: HashSet<_> = res.iter().map(|p| p.key.id.clone()).collect();
		assert_eq!(ids.len(), 5);
		assert!(res.iter().all(|p| p.seed.as_ref().is_some_and(Value::is_object)));
	}

	#[tokio::test]
	async fn model_array_template_is_sliced() {
		let template = Expr::Array(vec![
			Expr::Object([("n".to_owned(), Expr::from(1))].into()),
			Expr::Object([("n".to_owned(), Expr::from(2))].into()),
		]);
		let model = Model::Range("person".into(), 1, 2, Some(template));
		let res = resolve(Expr::from(model)).await.unwrap();
		assert_eq!(res[0].key.id, Some(Id::from(1)));
		assert_eq!(res[1].key.id, Some(Id::from(2)));
		assert_eq!(res[1].seed.as_ref().map(|v| v.pick(&[Part::from("n")])), Some(Value::from(2)));
	}

	#[tokio::test]
	async fn model_over_the_limit_fails() {
		let model = Model::Count("person".into(), *MAX_MODEL_COUNT + 1, None);
		let res = resolve(Expr::from(model)).await;
		assert!(matches!(res, Err(Error::ModelLimit { .. })));
		// A range over every integer is far over the limit
		let model = Model::Range("person".into(), i64::MIN, i64::MAX, None);
		let res = resolve(Expr::from(model)).await;
		assert!(matches!(res, Err(Error::ModelLimit { count: u64::MAX, .. })));
	}

	#[tokio::test]
	async fn batch_uses_entry_ids() {
		let batch = Batch {
			tb: "person".into(),
			entries: vec![
				Expr::Object([("id".to_owned(), Expr::from("tobie"))].into()),
				Expr::Object([("name".to_owned(), Expr::from("Jaime"))].into()),
			],
		};
		let res = resolve(Expr::from(batch)).await.unwrap();
		assert_eq!(res.len(), 2);
		assert_eq!(res[0].key.id, Some(Id::from("tobie")));
		assert!(res[1].key.id.is_some());
	}

	#[tokio::test]
	async fn batch_rejects_foreign_ids() {
		let batch = Batch {
			tb: "person".into(),
			entries: vec![Expr::Object(
				[("id".to_owned(), Expr::from(Thing::new("animal", "cat")))].into(),
			)],
		};
		let res = resolve(Expr::from(batch)).await;
		assert!(matches!(res, Err(Error::IdMismatch { .. })));
	}

	#[tokio::test]
	async fn documents_are_keyed_on_their_own_id() {
		let doc = Value::from(map! {
			"id".to_owned() => Value::from(Thing::new("animal", "cat")),
		});
		let res = resolve(Expr::Array(vec![Expr::from(doc.clone())])).await.unwrap();
		assert_eq!(res[0].key.tb, "animal");
		assert_eq!(res[0].seed, Some(doc.clone()));
		// A single collapsed document is a one element sequence
		let res = resolve(Expr::from(doc)).await.unwrap();
		assert_eq!(res.len(), 1);
	}

	#[tokio::test]
	async fn documents_without_identity_fail() {
		let doc = Value::from(map! { "name".to_owned() => Value::from("Tobie") });
		let res = resolve(Expr::Array(vec![Expr::from(doc)])).await;
		assert!(matches!(res, Err(Error::InvalidStatementTarget { .. })));
	}

	#[tokio::test]
	async fn scalars_are_unsupported() {
		for v in [Expr::from(true), Expr::from(1), Expr::from("person")] {
			let res = resolve(v).await;
			assert!(matches!(res, Err(Error::CreateStatement { .. })));
		}
	}
}
