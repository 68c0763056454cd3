use crate::ctx::Context;
use crate::doc::{Document, Stage};
use crate::err::Error;
use crate::expr::statements::DefineIndexStatement;
use crate::key::KeyEncode;
use crate::val::{Array, Thing};

impl Document {
	pub(super) async fn index(&mut self, ctx: &Context) -> Result<(), Error> {
		self.enter(ctx, Stage::Indexed)?;
		// Loop through all index statements
		for ix in self.ix(ctx).await?.iter() {
			// Calculate the values of the indexed fields
			let fd: Array = ix.cols.iter().map(|c| self.current.pick(c)).collect();
			// Store the index entry
			match ix.uniq {
				true => self.unique(ctx, ix, fd).await?,
				false => self.normal(ctx, ix, fd).await?,
			}
		}
		// Carry on
		Ok(())
	}

	async fn unique(&self, ctx: &Context, ix: &DefineIndexStatement, fd: Array) -> Result<(), Error> {
		let k = &self.key;
		let key = crate::key::index::new(&k.kv, &k.ns, &k.db, &k.tb, &ix.name, fd.clone(), None);
		let key = key.encode()?;
		let val = bincode::serialize(&self.id)?;
		let tx = ctx.tx()?;
		let mut run = tx.lock().await;
		match run.putc(key.clone(), val, None).await {
			Err(Error::TxConditionNotMet | Error::TxKeyAlreadyExists) => {
				// Report the record which already holds this value
				let thing = match run.get(key).await? {
					Some(v) => bincode::deserialize::<Thing>(&v)?,
					None => self.id.clone(),
				};
				Err(Error::IndexExists {
					thing,
					index: ix.name.clone(),
					value: fd.to_string(),
				})
			}
			res => res,
		}
	}

	async fn normal(&self, ctx: &Context, ix: &DefineIndexStatement, fd: Array) -> Result<(), Error> {
		let k = &self.key;
		let id = Some(self.id.id.clone());
		let key = crate::key::index::new(&k.kv, &k.ns, &k.db, &k.tb, &ix.name, fd, id);
		let key = key.encode()?;
		let val = bincode::serialize(&self.id)?;
		ctx.tx()?.lock().await.set(key, val).await
	}
}
