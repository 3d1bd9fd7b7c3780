//! Database handle: dialect registry, escaper and executor in one place.

use crate::config::DbConfig;
use crate::dialect::Dialect;
use crate::error::{BeeError, BeeResult};
use crate::escape::Escaper;
use crate::executor::Executor;
use crate::maker::QueryMaker;
use crate::query::Query;
use crate::row::RowSet;
use std::fmt;
use std::sync::Arc;

/// A configured database that hands out [`Query`] handles.
///
/// Cloning is cheap; clones share the registry, escaper and executor.
#[derive(Clone)]
pub struct Database {
    config: DbConfig,
    maker: Arc<QueryMaker>,
    escaper: Arc<dyn Escaper>,
    executor: Option<Arc<dyn Executor>>,
}

impl Database {
    /// Build from config, using its dialect's registry and escaper.
    pub fn new(config: DbConfig) -> Self {
        let dialect = config.dialect;
        Self {
            config,
            maker: Arc::new(dialect.query_maker()),
            escaper: dialect.escaper(),
            executor: None,
        }
    }

    /// Shorthand for `Database::new(DbConfig::new(dialect))`.
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self::new(DbConfig::new(dialect))
    }

    pub fn with_executor(mut self, executor: impl Executor + 'static) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }

    /// Replace the query-part registry, e.g. with a custom overlay.
    pub fn with_query_maker(mut self, maker: QueryMaker) -> Self {
        self.maker = Arc::new(maker);
        self
    }

    pub fn with_escaper(mut self, escaper: impl Escaper + 'static) -> Self {
        self.escaper = Arc::new(escaper);
        self
    }

    /// Choose the database name.
    pub fn use_db(mut self, name: impl Into<String>) -> Self {
        self.config.db_name = Some(name.into());
        self
    }

    pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.username = Some(username.into());
        self.config.password = Some(password.into());
        self
    }

    /// Start a new query. Fails when no database name is configured.
    pub fn query(&self) -> BeeResult<Query> {
        if self.config.db_name.is_none() {
            return Err(BeeError::NoDatabaseSelected);
        }
        Ok(Query::new(self.clone()))
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    pub fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    pub fn query_maker(&self) -> &Arc<QueryMaker> {
        &self.maker
    }

    pub fn escaper(&self) -> &Arc<dyn Escaper> {
        &self.escaper
    }

    /// Escape text with this database's escaper.
    pub fn escape(&self, raw: &str) -> String {
        self.escaper.escape(raw)
    }

    pub fn has_executor(&self) -> bool {
        self.executor.is_some()
    }

    /// Connect a PostgreSQL executor built from this database's config.
    #[cfg(feature = "postgres")]
    pub fn connect_postgres(self) -> BeeResult<Self> {
        let executor = crate::pg::PgExecutor::new(&self.config)?;
        Ok(self.with_executor(executor))
    }
}

impl Executor for Database {
    fn execute(&self, sql: &str) -> BeeResult<RowSet> {
        match &self.executor {
            Some(executor) => executor.execute(sql),
            None => Err(BeeError::NoExecutor),
        }
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("dialect", &self.config.dialect)
            .field("db_name", &self.config.db_name)
            .field("host", &self.config.host)
            .field("has_executor", &self.executor.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Recorder;

    #[test]
    fn test_query_requires_db_name() {
        let db = Database::with_dialect(Dialect::Generic);
        assert!(matches!(db.query(), Err(BeeError::NoDatabaseSelected)));
        assert!(db.use_db("app").query().is_ok());
    }

    #[test]
    fn test_execute_without_executor() {
        let db = Database::with_dialect(Dialect::Generic);
        assert!(matches!(db.execute("SELECT 1"), Err(BeeError::NoExecutor)));
    }

    #[test]
    fn test_executor_is_shared_by_clones() {
        let recorder = Recorder::new();
        let db = Database::with_dialect(Dialect::Sqlite).with_executor(recorder.clone());
        let copy = db.clone();
        copy.execute("SELECT 1").unwrap();
        db.execute("SELECT 2").unwrap();
        assert_eq!(recorder.statements(), ["SELECT 1", "SELECT 2"]);
    }

    #[test]
    fn test_dialect_escaper() {
        assert_eq!(Database::with_dialect(Dialect::MySql).escape("a'b"), "a\\'b");
        assert_eq!(Database::with_dialect(Dialect::Postgres).escape("a'b"), "a''b");
        let custom = Database::with_dialect(Dialect::Generic).with_escaper(|s: &str| s.to_uppercase());
        assert_eq!(custom.escape("abc"), "ABC");
    }
}
