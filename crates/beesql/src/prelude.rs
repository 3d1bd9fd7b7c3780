//! Convenient imports for typical `beesql` usage.
//!
//! Brings the statement traits into scope so chaining methods resolve:
//!
//! ```
//! use beesql::prelude::*;
//! ```

pub use crate::{
    BeeError, BeeResult, Conditional, Database, DbConfig, Dialect, Executor, Query, Row, RowSet,
    SqlStatement, Value, values,
};
