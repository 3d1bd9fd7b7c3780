//! # beesql
//!
//! A fluent SQL statement builder with pluggable dialects.
//!
//! ## Features
//!
//! - **Typed statements**: SELECT, UPDATE, DELETE, INSERT and COUNT are built
//!   from chained calls, never from string concatenation by the caller
//! - **Grammar order for free**: WHERE, GROUP BY, HAVING, ORDER BY and LIMIT
//!   render in SQL order no matter in which order they were added
//! - **Condition chaining**: `where_` / `having` start a condition, `and` / `or`
//!   extend whichever condition is active
//! - **Dialects**: a name → part registry that callers can overlay part by
//!   part, plus a per-dialect string escaper
//! - **Executor seam**: rendered SQL is handed to an [`Executor`]; a blocking
//!   PostgreSQL executor ships behind the `postgres` feature
//!
//! ## Example
//!
//! ```
//! use beesql::prelude::*;
//!
//! # fn main() -> BeeResult<()> {
//! let db = Database::with_dialect(Dialect::MySql).use_db("shop");
//! let mut query = db.query()?;
//! query.on("orders");
//!
//! let select = query.select(["customer", "status"])?;
//! select.aggregate(beesql::aggregation::sum("total"))?;
//! select.where_("status").in_(["paid", "shipped"])?;
//! select.or("priority")?.eq(1)?;
//! select.group_by(["customer"])?.limit(10)?;
//!
//! assert_eq!(
//!     query.get_sql()?,
//!     "SELECT customer, status, SUM(total) AS sum_total FROM orders \
//!      WHERE status IN ('paid', 'shipped') OR priority = 1 \
//!      GROUP BY customer LIMIT 10 OFFSET 0"
//! );
//! # Ok(())
//! # }
//! ```

pub mod aggregation;
pub mod condition;
pub mod config;
pub mod database;
pub mod dialect;
pub mod error;
pub mod escape;
pub mod executor;
pub mod keyword;
pub mod maker;
pub mod predicate;
pub mod prelude;
pub mod query;
pub mod row;
pub mod statement;
pub mod value;

#[cfg(feature = "postgres")]
pub mod pg;

pub use aggregation::{AggregateFn, Aggregation};
pub use config::DbConfig;
pub use database::Database;
pub use dialect::Dialect;
pub use error::{BeeError, BeeResult};
pub use escape::{Escaper, MySqlEscaper, StandardEscaper};
pub use executor::{Executor, Recorder};
pub use maker::{QueryMaker, QueryPart};
pub use query::Query;
pub use row::{Row, RowSet};
pub use statement::{
    ColumnSelector, Conditional, Count, Delete, Field, Insert, Select, SqlStatement, Statement,
    StatementKind, Update,
};
pub use value::Value;

#[cfg(feature = "postgres")]
pub use pg::PgExecutor;
