use crate::ctx::Context;
use crate::doc::{Document, Stage};
use crate::err::Error;

impl Document {
	pub(super) async fn store(&mut self, ctx: &Context) -> Result<(), Error> {
		self.enter(ctx, Stage::Stored)?;
		// Encode the record data
		let key = self.key.encode()?;
		let val = bincode::serialize(&self.current)?;
		// Store the record data, which must not exist yet
		match ctx.tx()?.lock().await.put(key, val).await {
			Err(Error::TxKeyAlreadyExists) => Err(Error::RecordExists {
				thing: self.id.clone(),
			}),
			res => res,
		}
	}
}
