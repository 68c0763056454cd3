mod helpers;
use helpers::*;
use std::collections::HashSet;
use tessera_core::err::Error;
use tessera_core::expr::statements::CreateStatement;
use tessera_core::dbs::Variables;
use tessera_core::kvs::Datastore;
use tessera_core::expr::{Batch, Expr, Model, Operator, Output, Permission, Permissions, Statement};
use tessera_core::val::{Thing, Value};

#[test_log::test(tokio::test)]
async fn create_into_table_generates_an_id() -> Result<(), Error> {
	let ds = new_ds().await?;
	let stm = CreateStatement {
		data: Some(set(vec![("name", Expr::from("Tobie"))])),
		..create(table("person"))
	};
	let tmp = run_create(&ds, stm).await?;
	let Value::Array(res) = tmp else {
		panic!("expected an array of records, found {tmp}");
	};
	assert_eq!(res.len(), 1);
	assert_eq!(get(&res[0], "name"), Value::from("Tobie"));
	match get(&res[0], "id") {
		Value::Thing(id) => assert_eq!(id.tb, "person"),
		v => panic!("expected a record id, found {v}"),
	}
	Ok(())
}

#[test_log::test(tokio::test)]
async fn create_bare_identifier_is_a_table() -> Result<(), Error> {
	let ds = new_ds().await?;
	let tmp = run_create(&ds, create(Expr::idiom("person"))).await?;
	let Value::Array(res) = tmp else {
		panic!("expected an array of records, found {tmp}");
	};
	assert_eq!(res.len(), 1);
	assert_eq!(records(&ds, "person").await?.len(), 1);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn create_explicit_thing_returns_a_single_record() -> Result<(), Error> {
	let ds = new_ds().await?;
	let stm = CreateStatement {
		data: Some(set(vec![("name", Expr::from("Tobie"))])),
		..create(Thing::new("person", "tobie"))
	};
	let tmp = run_create(&ds, stm).await?;
	assert_eq!(get(&tmp, "id"), Value::from(Thing::new("person", "tobie")));
	assert_eq!(get(&tmp, "name"), Value::from("Tobie"));
	Ok(())
}

#[test_log::test(tokio::test)]
async fn create_existing_thing_fails_without_writes() -> Result<(), Error> {
	let ds = new_ds().await?;
	run(&ds, vec![define_index("person", "email", &["email"], true)]).await?;
	// The first transaction creates the record
	let stm = CreateStatement {
		data: Some(set(vec![("email", Expr::from("tobie@example.com"))])),
		..create(Thing::new("person", "tobie"))
	};
	run_create(&ds, stm).await?;
	// The second transaction targets the same record
	let stm = CreateStatement {
		data: Some(set(vec![("email", Expr::from("jaime@example.com"))])),
		..create(Thing::new("person", "tobie"))
	};
	let res = run_create(&ds, stm).await;
	match res {
		Err(Error::RecordExists {
			thing,
		}) => assert_eq!(thing, Thing::new("person", "tobie")),
		v => panic!("expected the record to exist, found {v:?}"),
	}
	// The stored record is untouched
	let res = records(&ds, "person").await?;
	assert_eq!(res.len(), 1);
	assert_eq!(get(&res[0], "email"), Value::from("tobie@example.com"));
	// The failed attempt left no index entry behind
	let stm = CreateStatement {
		data: Some(set(vec![("email", Expr::from("jaime@example.com"))])),
		..create(Thing::new("person", "jaime"))
	};
	run_create(&ds, stm).await?;
	Ok(())
}

#[test_log::test(tokio::test)]
async fn generated_ids_are_distinct() -> Result<(), Error> {
	let ds = new_ds().await?;
	let stm = CreateStatement {
		output: Some(Output::Id),
		..create(Model::Count("person".into(), 10_000, None))
	};
	let tmp = run_create(&ds, stm).await?;
	let Value::Array(res) = tmp else {
		panic!("expected an array of ids, found {tmp}");
	};
	assert_eq!(res.len(), 10_000);
	let ids: HashSet<String> = res.iter().map(|v| v.to_string()).collect();
	assert_eq!(ids.len(), 10_000);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn model_count_creates_every_record() -> Result<(), Error> {
	let ds = new_ds().await?;
	let template = object(vec![("kind", Expr::from("generated"))]);
	run_create(&ds, create(Model::Count("person".into(), 5, Some(template)))).await?;
	let res = records(&ds, "person").await?;
	assert_eq!(res.len(), 5);
	assert!(res.iter().all(|v| get(v, "kind") == Value::from("generated")));
	let ids: HashSet<String> = res.iter().map(|v| get(v, "id").to_string()).collect();
	assert_eq!(ids.len(), 5);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn model_range_uses_integer_ids() -> Result<(), Error> {
	let ds = new_ds().await?;
	let template = Expr::Array(vec![
		object(vec![("name", Expr::from("one"))]),
		object(vec![("name", Expr::from("two"))]),
		object(vec![("name", Expr::from("three"))]),
	]);
	let stm = create(Model::Range("person".into(), 1, 3, Some(template)));
	let tmp = run_create(&ds, stm).await?;
	let Value::Array(res) = tmp else {
		panic!("expected an array of records, found {tmp}");
	};
	assert_eq!(res.len(), 3);
	assert_eq!(get(&res[0], "id"), Value::from(Thing::new("person", 1)));
	assert_eq!(get(&res[2], "id"), Value::from(Thing::new("person", 3)));
	assert_eq!(get(&res[2], "name"), Value::from("three"));
	Ok(())
}

#[test_log::test(tokio::test)]
async fn batch_failure_aborts_the_statement() -> Result<(), Error> {
	let ds = new_ds().await?;
	run_create(&ds, create(Thing::new("person", "jaime"))).await?;
	let batch = Batch {
		tb: "person".into(),
		entries: vec![
			object(vec![("id", Expr::from("tobie"))]),
			object(vec![("id", Expr::from("jaime"))]),
			object(vec![("id", Expr::from("tamara"))]),
		],
	};
	let res = run_create(&ds, create(batch)).await;
	assert!(matches!(res, Err(Error::RecordExists { .. })), "{res:?}");
	// None of the batch was committed
	let res = records(&ds, "person").await?;
	assert_eq!(res.len(), 1);
	assert_eq!(get(&res[0], "id"), Value::from(Thing::new("person", "jaime")));
	Ok(())
}

#[test_log::test(tokio::test)]
async fn created_record_round_trips_with_defaults() -> Result<(), Error> {
	let ds = new_ds().await?;
	run(
		&ds,
		vec![
			define_field("person", "active", Some(Expr::from(true)), None),
			define_field("person", "name", Some(Expr::from("anonymous")), None),
		],
	)
	.await?;
	let stm = CreateStatement {
		data: Some(set(vec![("name", Expr::from("Tobie")), ("age", Expr::from(33))])),
		..create(Thing::new("person", "tobie"))
	};
	let created = run_create(&ds, stm).await?;
	let fetched = records(&ds, "person").await?;
	assert_eq!(fetched, vec![created.clone()]);
	assert_eq!(get(&created, "name"), Value::from("Tobie"));
	assert_eq!(get(&created, "age"), Value::from(33));
	assert_eq!(get(&created, "active"), Value::from(true));
	Ok(())
}

#[test_log::test(tokio::test)]
async fn field_assertions_are_checked() -> Result<(), Error> {
	let ds = new_ds().await?;
	let assert = Expr::binary(Expr::param("value"), Operator::MoreThan, Expr::from(0));
	run(&ds, vec![define_field("person", "age", None, Some(assert))]).await?;
	let stm = CreateStatement {
		data: Some(set(vec![("age", Expr::from(-1))])),
		..create(Thing::new("person", "tobie"))
	};
	let res = run_create(&ds, stm).await;
	assert!(matches!(res, Err(Error::FieldCheck { .. })), "{res:?}");
	assert!(records(&ds, "person").await?.is_empty());
	Ok(())
}

#[test_log::test(tokio::test)]
async fn permission_denied_records_are_excluded() -> Result<(), Error> {
	let ds = new_ds().await?.with_auth_enabled(true);
	let rule = Expr::binary(
		Expr::idiom("age"),
		Operator::MoreThanOrEqual,
		Expr::from(18),
	);
	let permissions = Permissions {
		create: Permission::Specific(rule),
		..Permissions::full()
	};
	run(
		&ds,
		vec![
			define_table("person", permissions),
			define_index("person", "name", &["name"], true),
		],
	)
	.await?;
	let stm = |id: &str| CreateStatement {
		data: Some(set(vec![("name", Expr::param("name")), ("age", Expr::param("age"))])),
		..create(Thing::new("person", id))
	};
	// A record which fails the rule is silently skipped
	let vars = Variables::new().with("name", "Jaime").with("age", 12);
	let res = ds.execute(stm("jaime"), &viewer(), Some(vars)).await?.remove(0).result?;
	assert_eq!(res, Value::None);
	// A record which passes the rule is created
	let vars = Variables::new().with("name", "Tobie").with("age", 33);
	let res = ds.execute(stm("tobie"), &viewer(), Some(vars)).await?.remove(0).result?;
	assert_eq!(get(&res, "name"), Value::from("Tobie"));
	// The skipped document left no record or index entry behind
	assert_eq!(records(&ds, "person").await?.len(), 1);
	let stm = CreateStatement {
		data: Some(set(vec![("name", Expr::from("Jaime"))])),
		..create(Thing::new("person", "other"))
	};
	run_create(&ds, stm).await?;
	Ok(())
}

#[test_log::test(tokio::test)]
async fn create_from_subquery_results() -> Result<(), Error> {
	let ds = new_ds().await?;
	let stm = CreateStatement {
		data: Some(set(vec![("name", Expr::from("Tobie"))])),
		..create(Thing::new("person", "tobie"))
	};
	run_create(&ds, stm).await?;
	// Every selected document is re-created under its own identity
	let docs = Expr::from(select("person"));
	let stm = CreateStatement {
		data: Some(set(vec![("copied", Expr::from(true))])),
		..create(docs)
	};
	let res = run_create(&ds, stm).await;
	assert!(matches!(res, Err(Error::RecordExists { .. })), "{res:?}");
	// A collapsed single document is accepted too
	let doc = object(vec![
		("id", Expr::from(Thing::new("animal", "cat"))),
		("name", Expr::from("Felix")),
	]);
	let tmp = run_create(&ds, create(doc)).await?;
	let Value::Array(res) = tmp else {
		panic!("expected an array of records, found {tmp}");
	};
	assert_eq!(get(&res[0], "id"), Value::from(Thing::new("animal", "cat")));
	assert_eq!(get(&res[0], "name"), Value::from("Felix"));
	Ok(())
}

#[test_log::test(tokio::test)]
async fn unsupported_targets_fail_the_statement() -> Result<(), Error> {
	let ds = new_ds().await?;
	let stm = CreateStatement {
		what: vec![table("person"), Expr::from(true)],
		..Default::default()
	};
	let res = run_create(&ds, stm).await;
	assert!(matches!(res, Err(Error::CreateStatement { .. })), "{res:?}");
	// Nothing was created for the valid target either
	assert!(records(&ds, "person").await?.is_empty());
	let doc = object(vec![("name", Expr::from("Tobie"))]);
	let res = run_create(&ds, create(Expr::Array(vec![doc]))).await;
	assert!(matches!(res, Err(Error::InvalidStatementTarget { .. })), "{res:?}");
	Ok(())
}

#[test_log::test(tokio::test)]
async fn concurrent_creates_of_one_record() -> Result<(), Error> {
	let ds = new_ds().await?;
	let stm = create(Thing::new("person", "tobie"));
	let ses = owner();
	let (a, b) = tokio::join!(ds.execute(stm.clone(), &ses, None), ds.execute(stm.clone(), &ses, None));
	let res = [a?.remove(0).result, b?.remove(0).result];
	assert_eq!(res.iter().filter(|r| r.is_ok()).count(), 1);
	assert_eq!(res.iter().filter(|r| matches!(r, Err(Error::RecordExists { .. }))).count(), 1);
	assert_eq!(ds.locked(), 0);
	// The same record twice in one statement
	let stm = CreateStatement {
		what: vec![Expr::from(Thing::new("person", "jaime")), Expr::from(Thing::new("person", "jaime"))],
		..Default::default()
	};
	let res = run_create(&ds, stm).await;
	assert!(matches!(res, Err(Error::RecordExists { .. })), "{res:?}");
	assert_eq!(ds.locked(), 0);
	assert_eq!(records(&ds, "person").await?.len(), 1);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn strict_mode_requires_defined_tables() -> Result<(), Error> {
	let ds = new_ds().await?.with_strict_mode(true);
	let res = run_create(&ds, create(table("person"))).await;
	assert!(matches!(res, Err(Error::TbNotFound { .. })), "{res:?}");
	run(&ds, vec![define_table("person", Permissions::full())]).await?;
	run_create(&ds, create(table("person"))).await?;
	Ok(())
}

#[test_log::test(tokio::test)]
async fn unique_index_rejects_duplicates() -> Result<(), Error> {
	let ds = new_ds().await?;
	run(&ds, vec![define_index("person", "email", &["email"], true)]).await?;
	let stm = CreateStatement {
		data: Some(set(vec![("email", Expr::from("info@example.com"))])),
		..create(Thing::new("person", "tobie"))
	};
	run_create(&ds, stm).await?;
	let stm = CreateStatement {
		data: Some(set(vec![("email", Expr::from("info@example.com"))])),
		..create(Thing::new("person", "jaime"))
	};
	match run_create(&ds, stm).await {
		Err(Error::IndexExists {
			thing,
			index,
			..
		}) => {
			assert_eq!(thing, Thing::new("person", "tobie"));
			assert_eq!(index, "email");
		}
		v => panic!("expected an index violation, found {v:?}"),
	}
	assert_eq!(records(&ds, "person").await?.len(), 1);
	// Non unique indexes accept repeated values
	run(&ds, vec![define_index("person", "age", &["age"], false)]).await?;
	for id in ["a", "b"] {
		let stm = CreateStatement {
			data: Some(set(vec![("age", Expr::from(30))])),
			..create(Thing::new("person", id))
		};
		run_create(&ds, stm).await?;
	}
	Ok(())
}

#[test_log::test(tokio::test)]
async fn each_statement_runs_in_its_own_transaction() -> Result<(), Error> {
	let ds = new_ds().await?;
	let stms = vec![
		Statement::Create(create(Thing::new("person", "tobie"))),
		Statement::Create(create(Thing::new("person", "tobie"))),
		Statement::Create(create(Thing::new("person", "jaime"))),
	];
	let res = ds.execute(stms, &owner(), None).await?;
	assert_eq!(res.len(), 3);
	assert!(res[0].result.is_ok());
	assert!(matches!(res[1].result, Err(Error::RecordExists { .. })));
	assert!(res[2].result.is_ok());
	assert_eq!(records(&ds, "person").await?.len(), 2);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn model_range_over_every_integer_is_rejected() -> Result<(), Error> {
	let ds = new_ds().await?;
	let stm = create(Model::Range("person".into(), i64::MIN, i64::MAX, None));
	let res = run_create(&ds, stm).await;
	assert!(matches!(res, Err(Error::ModelLimit { count: u64::MAX, .. })), "{res:?}");
	assert!(records(&ds, "person").await?.is_empty());
	Ok(())
}

/// The number of records counted in the person table statistics
async fn person_count(ds: &Datastore) -> Result<u64, Error> {
	let mut tx = ds.transaction(false).await?;
	let st = tx.get_stats("tessera", "test", "test", "person").await?;
	tx.cancel().await?;
	Ok(st.count)
}

#[test_log::test(tokio::test)]
async fn table_stats_count_committed_records() -> Result<(), Error> {
	let ds = new_ds().await?;
	// Nothing has been created yet
	assert_eq!(person_count(&ds).await?, 0);
	run_create(&ds, create(Model::Count("person".into(), 50, None))).await?;
	assert_eq!(person_count(&ds).await?, 50);
	run_create(&ds, create(Thing::new("person", "tobie"))).await?;
	assert_eq!(person_count(&ds).await?, 51);
	// A failed statement leaves the statistics alone
	let res = run_create(&ds, create(Thing::new("person", "tobie"))).await;
	assert!(matches!(res, Err(Error::RecordExists { .. })), "{res:?}");
	assert_eq!(person_count(&ds).await?, 51);
	// Other tables keep their own statistics
	run_create(&ds, create(table("pet"))).await?;
	assert_eq!(person_count(&ds).await?, 51);
	Ok(())
}
