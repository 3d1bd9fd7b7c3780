//! Build statements for two dialects and print the SQL.
//!
//! Run with:
//!   cargo run --example basic -p beesql
//!
//! Set `RUST_LOG=beesql=debug` to see the executor log lines.

use beesql::aggregation::{count, sum};
use beesql::prelude::*;
use beesql::{Field, Recorder};

fn build(db: &Database) -> BeeResult<Vec<String>> {
    let mut out = Vec::new();
    let mut query = db.query()?;

    query.on_alias("orders", "o");
    let select = query.select([Field::from("o.customer"), sum("o.total").alias("spent").into()])?;
    select.where_("o.status").in_(["paid", "shipped"])?;
    select.and("o.created_at")?.gte("2024-01-01")?;
    select.group_by(["o.customer"])?;
    select.having("spent").gt(500)?;
    select.order_by(["-spent"])?.paginate(2, 25)?;
    out.push(query.get_sql()?);

    query.on("users");
    query
        .update([("status", "inactive"), ("note", "can't log in")])?
        .where_("last_login")
        .lt("2023-01-01")?;
    out.push(query.get_sql()?);

    query.on("users");
    query.insert(["id", "name"])?.row(values![1, "ada"])?.row(values![2, "bob"])?;
    out.push(query.get_sql()?);

    query.on("users");
    query.count()?.where_eq([("active", true)])?;
    out.push(query.get_sql()?);

    query.on("events");
    query
        .select([Field::from(count("id"))])?
        .where_("kind")
        .nin(["debug", "trace"])?;
    out.push(query.get_sql()?);

    Ok(out)
}

fn main() -> BeeResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    for dialect in [Dialect::Postgres, Dialect::MySql] {
        let recorder = Recorder::new();
        let db = Database::with_dialect(dialect)
            .use_db("shop")
            .with_executor(recorder.clone());

        println!("== {dialect} ==");
        for sql in build(&db)? {
            println!("{sql}");
        }

        let mut query = db.query()?;
        query.on("users");
        query.delete()?.where_("id").eq(42)?;
        query.execute()?;
        println!("executed: {:?}", recorder.statements());
        println!();
    }

    Ok(())
}
