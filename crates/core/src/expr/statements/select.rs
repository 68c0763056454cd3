use crate::cnf::NORMAL_FETCH_SIZE;
use crate::ctx::Context;
use crate::dbs::Options;
use crate::err::Error;
use crate::expr::{Expr, Permission};
use crate::iam::{check_access, Action};
use crate::key;
use crate::val::{Table, Thing, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A plain record fetch, used as a subquery. There is no
/// planning involved: tables are scanned in key order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectStatement {
	pub what: Vec<Expr>,
	pub cond: Option<Expr>,
	pub limit: Option<u64>,
}

impl SelectStatement {
	/// Process this type returning a computed simple Value
	pub(crate) async fn compute(
		&self,
		ctx: &Context,
		opt: &Options,
		doc: Option<&Value>,
	) -> Result<Value, Error> {
		// Valid options?
		opt.valid_for_db()?;
		// Check the namespace and database are reachable
		let (ns, db) = opt.ns_db()?;
		check_access(&opt.auth, Action::View, ns, db)?;
		// Prevent deep recursion
		let opt = &opt.dive(1)?;
		// Collect the candidate records
		let mut docs = Vec::new();
		for w in self.what.iter() {
			match w.compute(ctx, opt, doc).await? {
				Value::Table(tb) => docs.extend(self.scan(ctx, opt, &tb).await?),
				Value::Thing(id) => docs.extend(self.fetch(ctx, opt, &id).await?),
				Value::Array(a) => {
					for v in a {
						match v {
							Value::Thing(id) => docs.extend(self.fetch(ctx, opt, &id).await?),
							v => docs.push(v),
						}
					}
				}
				v => {
					return Err(Error::InvalidStatementTarget {
						value: v.to_string(),
					})
				}
			}
		}
		// Filter the records
		let mut out = Vec::new();
		for v in docs {
			if let Some(reason) = ctx.done() {
				return Err(reason.into());
			}
			if !self.allowed(ctx, opt, &v).await? {
				continue;
			}
			if let Some(cond) = &self.cond {
				if !cond.compute(ctx, opt, Some(&v)).await?.is_truthy() {
					continue;
				}
			}
			out.push(v);
			if matches!(self.limit, Some(l) if out.len() as u64 >= l) {
				break;
			}
		}
		// A single record is returned directly
		match self.limit {
			Some(1) => Ok(out.pop().unwrap_or_default()),
			_ => Ok(out.into()),
		}
	}

	/// Fetch all of the records in a table, one batch at a time
	async fn scan(&self, ctx: &Context, opt: &Options, tb: &Table) -> Result<Vec<Value>, Error> {
		let (ns, db) = opt.ns_db()?;
		let beg = key::thing::prefix(&opt.kv, ns, db, tb)?;
		let end = key::thing::suffix(&opt.kv, ns, db, tb)?;
		let txn = ctx.tx()?;
		let mut out = Vec::new();
		let mut nxt = beg;
		loop {
			// Release the transaction between batches
			let res = txn.lock().await.scan(nxt.clone()..end.clone(), *NORMAL_FETCH_SIZE).await?;
			let last = res.last().map(|(k, _)| k.clone());
			for (_, v) in res.iter() {
				out.push(bincode::deserialize(v)?);
			}
			match last {
				Some(mut k) if res.len() as u32 >= *NORMAL_FETCH_SIZE => {
					k.push(0x00);
					nxt = k;
				}
				_ => break,
			}
		}
		Ok(out)
	}

	async fn fetch(&self, ctx: &Context, opt: &Options, id: &Thing) -> Result<Option<Value>, Error> {
		let (ns, db) = opt.ns_db()?;
		let val = ctx.tx()?.lock().await.get_record(&opt.kv, ns, db, id).await?;
		Ok(Some(val).filter(Value::is_some))
	}

	/// Check the table select permissions for record level access
	async fn allowed(&self, ctx: &Context, opt: &Options, doc: &Value) -> Result<bool, Error> {
		if !opt.check_perms() {
			return Ok(true);
		}
		let Some(rid) = doc.rid() else {
			return Ok(true);
		};
		let (ns, db) = opt.ns_db()?;
		let tb = ctx.tx()?.lock().await.get_tb(&opt.kv, ns, db, &rid.tb).await?;
		match tb.map(|tb| tb.permissions.select) {
			None | Some(Permission::Full) => Ok(true),
			Some(Permission::None) => Ok(false),
			Some(Permission::Specific(e)) => {
				let opt = opt.new_with_perms(false);
				Ok(e.compute(ctx, &opt, Some(doc)).await?.is_truthy())
			}
		}
	}
}

impl fmt::Display for SelectStatement {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str("SELECT * FROM")?;
		for (i, v) in self.what.iter().enumerate() {
			match i {
				0 => write!(f, " {v}")?,
				_ => write!(f, ", {v}")?,
			}
		}
		if let Some(ref v) = self.cond {
			write!(f, " WHERE {v}")?
		}
		if let Some(ref v) = self.limit {
			write!(f, " LIMIT {v}")?
		}
		Ok(())
	}
}
