//! Aggregation fields for SELECT.

use crate::maker::AggregatePart;

/// Aggregate function kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFn {
    Sum,
    Avg,
    Count,
    Max,
    Min,
}

impl AggregateFn {
    pub const ALL: [AggregateFn; 5] = [
        AggregateFn::Sum,
        AggregateFn::Avg,
        AggregateFn::Count,
        AggregateFn::Max,
        AggregateFn::Min,
    ];

    pub fn part_name(self) -> &'static str {
        match self {
            AggregateFn::Sum => "sum_aggregation",
            AggregateFn::Avg => "avg_aggregation",
            AggregateFn::Count => "count_aggregation",
            AggregateFn::Max => "max_aggregation",
            AggregateFn::Min => "min_aggregation",
        }
    }

    pub fn sql_name(self) -> &'static str {
        match self {
            AggregateFn::Sum => "SUM",
            AggregateFn::Avg => "AVG",
            AggregateFn::Count => "COUNT",
            AggregateFn::Max => "MAX",
            AggregateFn::Min => "MIN",
        }
    }
}

/// An aggregated column, e.g. `SUM(price) AS total`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub func: AggregateFn,
    pub column: String,
    pub alias: Option<String>,
}

impl Aggregation {
    pub fn new(func: AggregateFn, column: impl Into<String>) -> Self {
        Self {
            func,
            column: column.into(),
            alias: None,
        }
    }

    /// Set the output column name.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Render with the function name supplied by the dialect.
    ///
    /// Without an explicit alias the output column is `<func>_<column>`.
    pub(crate) fn to_sql(&self, part: &AggregatePart) -> String {
        match &self.alias {
            Some(alias) => format!("{}({}) AS {}", part.name, self.column, alias),
            None => format!(
                "{}({}) AS {}_{}",
                part.name,
                self.column,
                part.name.to_lowercase(),
                self.column
            ),
        }
    }
}

pub fn sum(column: impl Into<String>) -> Aggregation {
    Aggregation::new(AggregateFn::Sum, column)
}

pub fn avg(column: impl Into<String>) -> Aggregation {
    Aggregation::new(AggregateFn::Avg, column)
}

pub fn count(column: impl Into<String>) -> Aggregation {
    Aggregation::new(AggregateFn::Count, column)
}

pub fn max(column: impl Into<String>) -> Aggregation {
    Aggregation::new(AggregateFn::Max, column)
}

pub fn min(column: impl Into<String>) -> Aggregation {
    Aggregation::new(AggregateFn::Min, column)
}
