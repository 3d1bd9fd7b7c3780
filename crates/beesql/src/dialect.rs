//! SQL dialects.
//!
//! A dialect picks the query-part registry and string escaper a
//! [`Database`](crate::Database) builds statements with.

use crate::error::{BeeError, BeeResult};
use crate::escape::{Escaper, MySqlEscaper, StandardEscaper};
use crate::maker::QueryMaker;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Generic,
    #[serde(alias = "mariadb")]
    MySql,
    #[serde(alias = "postgresql")]
    Postgres,
    Sqlite,
}

impl Dialect {
    /// Registry for this dialect.
    ///
    /// Every dialect shares the base table; they differ only in escaping.
    /// Callers wanting MySQL's `LIMIT offset, count` form overlay it through
    /// [`QueryMaker::overlay`] and [`Database::with_query_maker`](crate::Database::with_query_maker).
    pub fn query_maker(self) -> QueryMaker {
        QueryMaker::base()
    }

    pub fn escaper(self) -> Arc<dyn Escaper> {
        match self {
            Dialect::MySql => Arc::new(MySqlEscaper),
            Dialect::Generic | Dialect::Postgres | Dialect::Sqlite => Arc::new(StandardEscaper),
        }
    }

    pub fn default_port(self) -> Option<u16> {
        match self {
            Dialect::MySql => Some(3306),
            Dialect::Postgres => Some(5432),
            Dialect::Generic | Dialect::Sqlite => None,
        }
    }

    /// Dialect for a connection URL scheme.
    pub fn from_scheme(scheme: &str) -> BeeResult<Self> {
        match scheme.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "sqlite" => Ok(Dialect::Sqlite),
            "generic" => Ok(Dialect::Generic),
            other => Err(BeeError::config(format!("unsupported URL scheme '{other}'"))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Generic => "generic",
            Dialect::MySql => "mysql",
            Dialect::Postgres => "postgres",
            Dialect::Sqlite => "sqlite",
        }
    }
}

impl FromStr for Dialect {
    type Err = BeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::from_scheme(s)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
