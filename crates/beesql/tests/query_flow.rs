use beesql::maker::{LimitPart, LimitStyle, OperatorPart, QueryPart};
use beesql::predicate::CompareOp;
use beesql::prelude::*;
use beesql::{QueryMaker, Recorder, Row, StatementKind};

fn database(dialect: Dialect) -> (Database, Recorder) {
    let recorder = Recorder::new();
    let db = Database::with_dialect(dialect)
        .use_db("app")
        .with_executor(recorder.clone());
    (db, recorder)
}

#[test]
fn primary_keyword_requires_table() {
    let (db, _) = database(Dialect::Generic);
    let mut query = db.query().unwrap();

    assert!(query.delete().unwrap_err().is_no_table_selected());
    assert!(query.select(["id"]).unwrap_err().is_no_table_selected());
    assert!(query.count().unwrap_err().is_no_table_selected());
}

#[test]
fn rendering_requires_statement() {
    let (db, _) = database(Dialect::Generic);
    let mut query = db.query().unwrap();
    assert!(query.get_sql().unwrap_err().is_no_statement_created());

    query.on("users");
    assert!(query.get_sql().unwrap_err().is_no_statement_created());
    assert!(query.execute().unwrap_err().is_no_statement_created());
}

#[test]
fn rebinding_discards_statement() {
    let (db, _) = database(Dialect::Generic);
    let mut query = db.query().unwrap();
    query.on("users");
    query.select(["id"]).unwrap();
    assert!(query.statement().is_some());

    query.on("accounts");
    assert!(query.statement().is_none());
    query.count().unwrap();
    assert_eq!(
        query.get_sql().unwrap(),
        "SELECT count(*) AS count FROM accounts"
    );
}

#[test]
fn new_primary_keyword_replaces_statement() {
    let (db, _) = database(Dialect::Generic);
    let mut query = db.query().unwrap();
    query.on("users");
    query.select(["id"]).unwrap().where_("a").eq(1).unwrap();
    query.select(["name"]).unwrap();

    assert_eq!(query.get_sql().unwrap(), "SELECT name FROM users");
    assert_eq!(
        query.statement().map(|s| s.kind()),
        Some(StatementKind::Select)
    );
}

#[test]
fn integers_bare_text_escaped() {
    let (db, _) = database(Dialect::Generic);
    let mut query = db.query().unwrap();
    query.on("users");
    let select = query.select(["id"]).unwrap();
    select.where_("age").eq(5).unwrap();
    select.and("name").unwrap().eq("bob").unwrap();

    assert_eq!(
        query.get_sql().unwrap(),
        "SELECT id FROM users WHERE age = 5 AND name = 'bob'"
    );
}

#[test]
fn custom_escaper_is_used_for_text() {
    let db = Database::with_dialect(Dialect::Generic)
        .use_db("app")
        .with_escaper(|raw: &str| raw.replace('b', "B"));
    let mut query = db.query().unwrap();
    query.on("users");
    query.select(["id"]).unwrap().where_("name").eq("bob").unwrap();

    assert_eq!(
        query.get_sql().unwrap(),
        "SELECT id FROM users WHERE name = 'BoB'"
    );
}

#[test]
fn mysql_dialect_escapes_with_backslashes() {
    let (db, _) = database(Dialect::MySql);
    let mut query = db.query().unwrap();
    query.on("posts");
    query
        .select(["title"])
        .unwrap()
        .where_eq([("author", "o'hara\n")])
        .unwrap()
        .limit_offset(10, 30)
        .unwrap();

    assert_eq!(
        query.get_sql().unwrap(),
        "SELECT title FROM posts WHERE author = 'o\\'hara\\n' LIMIT 10 OFFSET 30"
    );
}

#[test]
fn mysql_keeps_clause_order_and_limit_form() {
    let (db, _) = database(Dialect::MySql);
    let mut query = db.query().unwrap();
    query.on("t");
    query
        .select(["x"])
        .unwrap()
        .limit(10)
        .unwrap()
        .group_by(["x"])
        .unwrap()
        .where_eq([("a", 1)])
        .unwrap();

    assert_eq!(
        query.get_sql().unwrap(),
        "SELECT x FROM t WHERE a = 1 GROUP BY x LIMIT 10 OFFSET 0"
    );
}

#[test]
fn comma_limit_is_opt_in() {
    let maker = Dialect::MySql.query_maker().overlay([(
        "limit",
        QueryPart::Limit(LimitPart::new(LimitStyle::OffsetComma)),
    )]);
    let db = Database::with_dialect(Dialect::MySql)
        .use_db("app")
        .with_query_maker(maker);
    let mut query = db.query().unwrap();
    query.on("posts");
    query.select(["title"]).unwrap().limit_offset(10, 30).unwrap();

    assert_eq!(query.get_sql().unwrap(), "SELECT title FROM posts LIMIT 30, 10");
}

#[test]
fn booleans_render_as_keywords() {
    let (db, _) = database(Dialect::Postgres);
    let mut query = db.query().unwrap();
    query.on("users");
    query
        .select(["id"])
        .unwrap()
        .where_("active")
        .eq(true)
        .unwrap()
        .and("banned")
        .unwrap()
        .eq(false)
        .unwrap();

    assert_eq!(
        query.get_sql().unwrap(),
        "SELECT id FROM users WHERE active = TRUE AND banned = FALSE"
    );
}

#[test]
fn custom_registry_overrides_single_part() {
    let maker = Dialect::Generic.query_maker().overlay([(
        "not_equal_operator",
        QueryPart::Operator(OperatorPart {
            kind: CompareOp::NotEq,
            token: "!=",
        }),
    )]);
    let db = Database::with_dialect(Dialect::Generic)
        .use_db("app")
        .with_query_maker(maker);
    let mut query = db.query().unwrap();
    query.on("users");
    query
        .select(["id"])
        .unwrap()
        .where_("role")
        .neq("guest")
        .unwrap()
        .and("id")
        .unwrap()
        .eq(1)
        .unwrap();

    assert_eq!(
        query.get_sql().unwrap(),
        "SELECT id FROM users WHERE role != 'guest' AND id = 1"
    );
}

#[test]
fn broken_registry_reports_errors() {
    let maker = QueryMaker::base().with_part(
        "delete",
        QueryPart::Statement(StatementKind::Select),
    );
    let db = Database::with_dialect(Dialect::Generic)
        .use_db("app")
        .with_query_maker(maker);
    let mut query = db.query().unwrap();
    query.on("users");
    assert!(matches!(
        query.delete().unwrap_err(),
        BeeError::InvalidStatementType { expected: "delete", .. }
    ));

    let parts = QueryMaker::base().overlay([(
        "logical_or",
        QueryPart::Operator(OperatorPart::standard(CompareOp::Eq)),
    )]);
    let db = Database::with_dialect(Dialect::Generic)
        .use_db("app")
        .with_query_maker(parts);
    let mut query = db.query().unwrap();
    query.on("users");
    let select = query.select(["id"]).unwrap();
    select.where_("a").eq(1).unwrap();
    assert!(matches!(
        select.or("b").unwrap().eq(2).unwrap_err(),
        BeeError::MismatchedQueryPart { .. }
    ));
}

#[test]
fn unknown_part_surfaces() {
    let err = QueryMaker::base().make("window_function").unwrap_err();
    assert!(matches!(err, BeeError::UnknownQueryPart(_)));
    assert_eq!(err.to_string(), "No query part named 'window_function'");
}

#[test]
fn execute_goes_through_executor() {
    let rows: RowSet = [Row::new(vec![("count".to_string(), Value::Int(3))])]
        .into_iter()
        .collect();
    let recorder = Recorder::with_rows(rows);
    let db = Database::with_dialect(Dialect::Sqlite)
        .use_db("app.db")
        .with_executor(recorder.clone());

    let mut query = db.query().unwrap();
    query.on("users");
    query.count().unwrap().where_("active").eq(true).unwrap();
    let out = query.execute().unwrap();

    assert_eq!(out.count(), 1);
    assert_eq!(out[0].get("count"), Some(&Value::Int(3)));
    assert_eq!(
        recorder.statements(),
        ["SELECT count(*) AS count FROM users WHERE active = TRUE"]
    );
    assert_eq!(query.fetch_all().unwrap().len(), 1);
    assert_eq!(recorder.statements().len(), 2);
}

#[test]
fn execute_validates_before_running() {
    let (db, recorder) = database(Dialect::Postgres);
    let mut query = db.query().unwrap();
    query.on("users");
    query.insert(["id"]).unwrap();

    assert!(matches!(
        query.execute().unwrap_err(),
        BeeError::EmptyArgumentList("insert rows")
    ));
    assert!(recorder.statements().is_empty());
}

#[test]
fn executor_failures_are_opaque() {
    struct Failing;
    impl Executor for Failing {
        fn execute(&self, _sql: &str) -> BeeResult<RowSet> {
            Err(BeeError::execution("relation \"users\" does not exist"))
        }
    }

    let db = Database::with_dialect(Dialect::Postgres)
        .use_db("app")
        .with_executor(Failing);
    let mut query = db.query().unwrap();
    query.on("users");
    query.delete().unwrap().allow_delete_all();

    let err = query.execute().unwrap_err();
    assert!(err.is_execution());
}

#[test]
fn database_without_executor() {
    let db = Database::with_dialect(Dialect::Generic).use_db("app");
    let mut query = db.query().unwrap();
    query.on("users");
    query.delete().unwrap();
    assert!(matches!(query.execute().unwrap_err(), BeeError::NoExecutor));
}

#[test]
fn database_from_config() {
    let config = DbConfig::from_url("mysql://root:pw@localhost/shop").unwrap();
    let db = Database::new(config);
    assert_eq!(db.dialect(), Dialect::MySql);
    assert_eq!(db.escape("a'b"), "a\\'b");

    let mut query = db.query().unwrap();
    query.on("items");
    query.select(["id"]).unwrap().paginate(2, 10).unwrap();
    assert_eq!(query.get_sql().unwrap(), "SELECT id FROM items LIMIT 10 OFFSET 10");
}

#[test]
fn rows_serialize_to_json() {
    let rows: RowSet = vec![
        Row::new(vec![
            ("id".to_string(), Value::Int(1)),
            ("name".to_string(), Value::Null),
        ]),
        Row::new(vec![
            ("id".to_string(), Value::Int(2)),
            ("name".to_string(), Value::from("x")),
        ]),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        rows.to_json(),
        serde_json::json!([{ "id": 1, "name": null }, { "id": 2, "name": "x" }])
    );
}
