//! Query handle: binds a table and holds at most one statement.
//!
//! ```
//! use beesql::{Conditional, Database, Dialect};
//!
//! # fn main() -> beesql::BeeResult<()> {
//! let db = Database::with_dialect(Dialect::Generic).use_db("shop");
//! let mut query = db.query()?;
//! query.on("users");
//! query.select(["id", "name"])?.where_("age").gte(18)?;
//! assert_eq!(query.get_sql()?, "SELECT id, name FROM users WHERE age >= 18");
//! # Ok(())
//! # }
//! ```

use crate::database::Database;
use crate::error::{BeeError, BeeResult};
use crate::row::{Row, RowSet};
use crate::statement::{
    Count, Delete, Field, Insert, Select, SqlStatement, Statement, StatementContext,
    StatementKind, StatementVariant, TableRef, Update,
};
use crate::value::Value;
use std::sync::Arc;

/// Entry point for building one statement against one table.
#[derive(Debug, Clone)]
pub struct Query {
    db: Database,
    table: Option<TableRef>,
    statement: Option<Statement>,
}

impl Query {
    pub(crate) fn new(db: Database) -> Self {
        Self {
            db,
            table: None,
            statement: None,
        }
    }

    /// Bind `table`, discarding any statement built so far.
    pub fn on(&mut self, table: impl Into<String>) -> &mut Self {
        self.bind(TableRef::new(table))
    }

    /// Bind `table AS alias`, discarding any statement built so far.
    pub fn on_alias(&mut self, table: impl Into<String>, alias: impl Into<String>) -> &mut Self {
        self.bind(TableRef::new(table).with_alias(alias))
    }

    fn bind(&mut self, table: TableRef) -> &mut Self {
        if let Some(old) = self.statement.take() {
            tracing::trace!(
                target: "beesql.sql",
                table = %table.name,
                discarded = old.kind().part_name(),
                "rebinding query table"
            );
        }
        self.table = Some(table);
        self
    }

    /// Drop the table and statement.
    pub fn reset(&mut self) -> &mut Self {
        self.table = None;
        self.statement = None;
        self
    }

    pub fn table(&self) -> Option<&TableRef> {
        self.table.as_ref()
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// `SELECT fields FROM table`. An empty field list selects `*`.
    pub fn select<I, F>(&mut self, fields: I) -> BeeResult<&mut Select>
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        let context = self.context(StatementKind::Select)?;
        let select = Select::new(context, fields)?;
        Ok(self.install(select))
    }

    /// `UPDATE table SET ...`. At least one assignment is required.
    pub fn update<I, K, V>(&mut self, assignments: I) -> BeeResult<&mut Update>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let context = self.context(StatementKind::Update)?;
        let update = Update::new(context, assignments)?;
        Ok(self.install(update))
    }

    pub fn delete(&mut self) -> BeeResult<&mut Delete> {
        let context = self.context(StatementKind::Delete)?;
        Ok(self.install(Delete::new(context)))
    }

    /// `INSERT INTO table (columns)`; add rows with [`Insert::row`].
    pub fn insert<I, C>(&mut self, columns: I) -> BeeResult<&mut Insert>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let context = self.context(StatementKind::Insert)?;
        Ok(self.install(Insert::new(context, columns)))
    }

    pub fn count(&mut self) -> BeeResult<&mut Count> {
        let context = self.context(StatementKind::Count)?;
        Ok(self.install(Count::new(context)))
    }

    /// The current statement, if one was built.
    pub fn statement(&self) -> Option<&Statement> {
        self.statement.as_ref()
    }

    pub fn statement_mut(&mut self) -> Option<&mut Statement> {
        self.statement.as_mut()
    }

    /// Render the current statement.
    pub fn get_sql(&self) -> BeeResult<String> {
        self.current()?.build_sql()
    }

    /// Run the current statement through the database's executor.
    pub fn execute(&self) -> BeeResult<RowSet> {
        self.current()?.execute(&self.db)
    }

    /// Run the current statement and return its rows.
    pub fn fetch_all(&self) -> BeeResult<Vec<Row>> {
        Ok(self.execute()?.into_rows())
    }

    fn current(&self) -> BeeResult<&Statement> {
        self.statement.as_ref().ok_or(BeeError::NoStatementCreated)
    }

    fn context(&self, kind: StatementKind) -> BeeResult<StatementContext> {
        let table = self.table.clone().ok_or(BeeError::NoTableSelected)?;
        self.db
            .query_maker()
            .statement(kind.part_name(), kind)?;
        Ok(StatementContext::new(
            table,
            Arc::clone(self.db.query_maker()),
            Arc::clone(self.db.escaper()),
        ))
    }

    fn install<S: StatementVariant>(&mut self, statement: S) -> &mut S {
        let slot = self.statement.insert(statement.into());
        match S::from_statement_mut(slot) {
            Some(s) => s,
            None => unreachable!("statement slot holds the variant just inserted"),
        }
    }
}

