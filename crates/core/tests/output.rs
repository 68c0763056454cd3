mod helpers;
use helpers::*;
use tessera_core::err::Error;
use tessera_core::expr::statements::CreateStatement;
use tessera_core::expr::{Expr, Model, Output};
use tessera_core::val::{Thing, Value};

fn create_with(id: &str, output: Output) -> CreateStatement {
	CreateStatement {
		data: Some(set(vec![("name", Expr::from("Tobie"))])),
		output: Some(output),
		..create(Thing::new("person", id))
	}
}

#[test_log::test(tokio::test)]
async fn output_modes() -> Result<(), Error> {
	let ds = new_ds().await?;
	// RETURN NONE writes the record but yields nothing
	let res = run_create(&ds, create_with("none", Output::None)).await?;
	assert_eq!(res, Value::None);
	// RETURN NULL
	let res = run_create(&ds, create_with("null", Output::Null)).await?;
	assert_eq!(res, Value::Null);
	// RETURN BEFORE yields the previous state, which does not exist
	let res = run_create(&ds, create_with("before", Output::Before)).await?;
	assert_eq!(res, Value::None);
	// RETURN AFTER
	let res = run_create(&ds, create_with("after", Output::After)).await?;
	assert_eq!(get(&res, "name"), Value::from("Tobie"));
	// RETURN ID
	let res = run_create(&ds, create_with("id", Output::Id)).await?;
	assert_eq!(res, Value::from(Thing::new("person", "id")));
	// RETURN DIFF replaces the missing record with the new one
	let res = run_create(&ds, create_with("diff", Output::Diff)).await?;
	let Value::Array(ops) = res else {
		panic!("expected a list of operations, found {res}");
	};
	assert_eq!(ops.len(), 1);
	assert_eq!(get(&ops[0], "op"), Value::from("replace"));
	assert_eq!(get(&ops[0], "path"), Value::from("/"));
	assert_eq!(get(&ops[0], "value.name"), Value::from("Tobie"));
	// Every record was written, whatever was returned
	assert_eq!(records(&ds, "person").await?.len(), 6);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn only_returns_a_single_value() -> Result<(), Error> {
	let ds = new_ds().await?;
	let stm = CreateStatement {
		only: true,
		..create(table("person"))
	};
	let res = run_create(&ds, stm).await?;
	assert!(res.is_object(), "{res}");
	// Many records can not be returned as one
	let stm = CreateStatement {
		only: true,
		..create(Model::Count("person".into(), 2, None))
	};
	let res = run_create(&ds, stm).await;
	assert!(matches!(res, Err(Error::SingleOnlyOutput)), "{res:?}");
	// No output at all is still a single value
	let stm = CreateStatement {
		only: true,
		output: Some(Output::None),
		..create(table("person"))
	};
	assert_eq!(run_create(&ds, stm).await?, Value::None);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn results_keep_the_target_order() -> Result<(), Error> {
	let ds = new_ds().await?;
	let ids = ["d", "a", "c", "b", "e"];
	let stm = CreateStatement {
		what: ids.iter().map(|id| Expr::from(Thing::new("person", *id))).collect(),
		output: Some(Output::Id),
		..Default::default()
	};
	let res = run_create(&ds, stm).await?;
	let expected: Vec<Value> = ids.iter().map(|id| Value::from(Thing::new("person", *id))).collect();
	assert_eq!(res, Value::from(expected));
	Ok(())
}
