//! Error types for beesql

use thiserror::Error;

/// Result type alias for beesql operations
pub type BeeResult<T> = Result<T, BeeError>;

/// Error types for statement building and execution
#[derive(Debug, Error)]
pub enum BeeError {
    /// A primary keyword was used before `Query::on`
    #[error("No table selected. Use Query::on to select a table first")]
    NoTableSelected,

    /// Rendering or executing a query that has no statement yet
    #[error("No statement created")]
    NoStatementCreated,

    /// UPDATE without any assignment
    #[error("Update values not provided")]
    EmptyUpdateValues,

    /// A condition call that carries nothing to compare
    #[error("{0} clause can't be empty")]
    EmptyWhereClause(&'static str),

    /// AND/OR chaining without a started WHERE/HAVING condition
    #[error("No active condition set")]
    NoActiveCondition,

    /// Query part missing from the dialect registry
    #[error("No query part named '{0}'")]
    UnknownQueryPart(String),

    /// Registry entry exists but belongs to another part category
    #[error("Query part '{name}' is not a {expected} part")]
    MismatchedQueryPart {
        name: String,
        expected: &'static str,
    },

    /// Registry entry does not resolve to the requested statement kind
    #[error("Expected a {expected} statement, got {found}")]
    InvalidStatementType {
        expected: &'static str,
        found: String,
    },

    /// A variadic call received zero arguments
    #[error("No arguments provided for {0}")]
    EmptyArgumentList(&'static str),

    /// INSERT row width differs from the declared column list
    #[error("Row has {found} values, but {expected} columns were declared")]
    RowWidthMismatch { expected: usize, found: usize },

    /// `Database::query` without a database name
    #[error("No database chosen")]
    NoDatabaseSelected,

    /// Executing through a database that has no executor installed
    #[error("No executor configured for this database")]
    NoExecutor,

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Opaque failure reported by an executor
    #[error("Execution error: {0}")]
    Execution(String),

    /// PostgreSQL driver error
    #[cfg(feature = "postgres")]
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),
}

impl BeeError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Create an unknown query part error
    pub fn unknown_part(name: impl Into<String>) -> Self {
        Self::UnknownQueryPart(name.into())
    }

    /// Check if this is a missing table error
    pub fn is_no_table_selected(&self) -> bool {
        matches!(self, Self::NoTableSelected)
    }

    /// Check if this is a missing statement error
    pub fn is_no_statement_created(&self) -> bool {
        matches!(self, Self::NoStatementCreated)
    }

    /// Check if this is a chaining-without-condition error
    pub fn is_no_active_condition(&self) -> bool {
        matches!(self, Self::NoActiveCondition)
    }

    /// Check if this error came from outside the builder (driver or executor)
    pub fn is_execution(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Execution(_) => true,
            #[cfg(feature = "postgres")]
            Self::Query(_) => true,
            _ => false,
        }
    }
}

impl From<url::ParseError> for BeeError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for BeeError {
    fn from(err: std::io::Error) -> Self {
        Self::Connection(err.to_string())
    }
}
