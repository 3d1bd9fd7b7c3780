//! Query-part registry.
//!
//! A [`QueryMaker`] maps logical part names (`"select"`, `"where"`,
//! `"in_operator"`, ...) to the concrete parts a statement is assembled from.
//! Dialects specialize rendering by copying the base table and overlaying the
//! entries they want to change; everything else is inherited unchanged.
//!
//! # Example
//!
//! ```
//! use beesql::maker::{LimitPart, LimitStyle, QueryMaker, QueryPart};
//!
//! let maker = QueryMaker::base().overlay([(
//!     "limit",
//!     QueryPart::Limit(LimitPart::new(LimitStyle::OffsetComma)),
//! )]);
//! assert!(maker.make("select").is_ok());
//! assert!(maker.make("window").is_err());
//! ```

use crate::aggregation::AggregateFn;
use crate::error::{BeeError, BeeResult};
use crate::predicate::{CompareOp, Connector};
use crate::statement::StatementKind;
use std::collections::HashMap;

/// Secondary clause kinds, in their default render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClauseKind {
    Where,
    GroupBy,
    Having,
    OrderBy,
    Limit,
}

impl ClauseKind {
    pub fn part_name(self) -> &'static str {
        match self {
            ClauseKind::Where => "where",
            ClauseKind::GroupBy => "group_by",
            ClauseKind::Having => "having",
            ClauseKind::OrderBy => "order_by",
            ClauseKind::Limit => "limit",
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ClauseKind::Where => "WHERE",
            ClauseKind::GroupBy => "GROUP BY",
            ClauseKind::Having => "HAVING",
            ClauseKind::OrderBy => "ORDER BY",
            ClauseKind::Limit => "LIMIT",
        }
    }

    /// Position in SQL grammar; lower renders first.
    pub fn default_priority(self) -> u8 {
        match self {
            ClauseKind::Where => 2,
            ClauseKind::GroupBy => 3,
            ClauseKind::Having => 4,
            ClauseKind::OrderBy => 5,
            ClauseKind::Limit => 6,
        }
    }
}

/// Comparison operator part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorPart {
    pub kind: CompareOp,
    pub token: &'static str,
}

impl OperatorPart {
    pub fn standard(kind: CompareOp) -> Self {
        Self {
            kind,
            token: kind.token(),
        }
    }
}

/// Logical connector part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalPart {
    pub kind: Connector,
    pub keyword: &'static str,
}

impl LogicalPart {
    pub fn standard(kind: Connector) -> Self {
        Self {
            kind,
            keyword: kind.keyword(),
        }
    }
}

/// WHERE / GROUP BY / HAVING / ORDER BY clause part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClausePart {
    pub kind: ClauseKind,
    pub keyword: &'static str,
    pub priority: u8,
}

impl ClausePart {
    pub fn standard(kind: ClauseKind) -> Self {
        Self {
            kind,
            keyword: kind.keyword(),
            priority: kind.default_priority(),
        }
    }
}

/// How LIMIT/OFFSET is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LimitStyle {
    /// `LIMIT 10 OFFSET 20`
    #[default]
    LimitOffset,
    /// `LIMIT 20, 10` (MySQL)
    OffsetComma,
}

/// LIMIT clause part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitPart {
    pub style: LimitStyle,
    pub priority: u8,
}

impl LimitPart {
    pub fn new(style: LimitStyle) -> Self {
        Self {
            style,
            priority: ClauseKind::Limit.default_priority(),
        }
    }

    pub fn render(&self, limit: u64, offset: u64) -> String {
        match self.style {
            LimitStyle::LimitOffset => format!("LIMIT {limit} OFFSET {offset}"),
            LimitStyle::OffsetComma => format!("LIMIT {offset}, {limit}"),
        }
    }
}

/// Aggregation function part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatePart {
    pub func: AggregateFn,
    pub name: &'static str,
}

impl AggregatePart {
    pub fn standard(func: AggregateFn) -> Self {
        Self {
            func,
            name: func.sql_name(),
        }
    }
}

/// A registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPart {
    Statement(StatementKind),
    Clause(ClausePart),
    Limit(LimitPart),
    Logical(LogicalPart),
    Operator(OperatorPart),
    Aggregation(AggregatePart),
}

impl QueryPart {
    fn category(&self) -> &'static str {
        match self {
            QueryPart::Statement(_) => "statement",
            QueryPart::Clause(_) => "clause",
            QueryPart::Limit(_) => "limit",
            QueryPart::Logical(_) => "logical",
            QueryPart::Operator(_) => "operator",
            QueryPart::Aggregation(_) => "aggregation",
        }
    }
}

/// Name → part registry used to construct statements.
#[derive(Debug, Clone)]
pub struct QueryMaker {
    parts: HashMap<String, QueryPart>,
}

impl QueryMaker {
    /// The base table every dialect starts from.
    pub fn base() -> Self {
        let mut parts = HashMap::new();

        for kind in StatementKind::ALL {
            parts.insert(kind.part_name().to_string(), QueryPart::Statement(kind));
        }

        for kind in [
            ClauseKind::Where,
            ClauseKind::GroupBy,
            ClauseKind::Having,
            ClauseKind::OrderBy,
        ] {
            parts.insert(
                kind.part_name().to_string(),
                QueryPart::Clause(ClausePart::standard(kind)),
            );
        }
        parts.insert(
            ClauseKind::Limit.part_name().to_string(),
            QueryPart::Limit(LimitPart::new(LimitStyle::LimitOffset)),
        );

        for kind in [Connector::And, Connector::Or] {
            parts.insert(
                kind.part_name().to_string(),
                QueryPart::Logical(LogicalPart::standard(kind)),
            );
        }

        for kind in [
            CompareOp::Eq,
            CompareOp::NotEq,
            CompareOp::Lt,
            CompareOp::Lte,
            CompareOp::Gt,
            CompareOp::Gte,
            CompareOp::In,
            CompareOp::NotIn,
        ] {
            parts.insert(
                kind.part_name().to_string(),
                QueryPart::Operator(OperatorPart::standard(kind)),
            );
        }

        for func in AggregateFn::ALL {
            parts.insert(
                func.part_name().to_string(),
                QueryPart::Aggregation(AggregatePart::standard(func)),
            );
        }

        Self { parts }
    }

    /// Copy this registry and shadow the given entries.
    pub fn overlay<I, N>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (N, QueryPart)>,
        N: Into<String>,
    {
        let mut parts = self.parts.clone();
        parts.extend(overrides.into_iter().map(|(n, p)| (n.into(), p)));
        Self { parts }
    }

    /// Replace or add a single entry.
    pub fn with_part(mut self, name: impl Into<String>, part: QueryPart) -> Self {
        self.parts.insert(name.into(), part);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    /// Registered part names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.parts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up a part by name.
    pub fn make(&self, name: &str) -> BeeResult<QueryPart> {
        self.parts
            .get(name)
            .copied()
            .ok_or_else(|| BeeError::unknown_part(name))
    }

    /// Resolve the statement registered under `name`, requiring `expected`.
    pub fn statement(&self, name: &str, expected: StatementKind) -> BeeResult<StatementKind> {
        match self.make(name)? {
            QueryPart::Statement(kind) if kind == expected => Ok(kind),
            QueryPart::Statement(kind) => Err(BeeError::InvalidStatementType {
                expected: expected.part_name(),
                found: kind.part_name().to_string(),
            }),
            other => Err(BeeError::InvalidStatementType {
                expected: expected.part_name(),
                found: format!("{} part '{}'", other.category(), name),
            }),
        }
    }

    pub fn clause(&self, kind: ClauseKind) -> BeeResult<ClausePart> {
        let name = kind.part_name();
        match self.make(name)? {
            QueryPart::Clause(part) => Ok(part),
            _ => Err(mismatch(name, "clause")),
        }
    }

    pub fn limit(&self) -> BeeResult<LimitPart> {
        let name = ClauseKind::Limit.part_name();
        match self.make(name)? {
            QueryPart::Limit(part) => Ok(part),
            _ => Err(mismatch(name, "limit")),
        }
    }

    pub fn logical(&self, connector: Connector) -> BeeResult<LogicalPart> {
        let name = connector.part_name();
        match self.make(name)? {
            QueryPart::Logical(part) => Ok(part),
            _ => Err(mismatch(name, "logical")),
        }
    }

    pub fn operator(&self, op: CompareOp) -> BeeResult<OperatorPart> {
        let name = op.part_name();
        match self.make(name)? {
            QueryPart::Operator(part) => Ok(part),
            _ => Err(mismatch(name, "operator")),
        }
    }

    pub fn aggregation(&self, func: AggregateFn) -> BeeResult<AggregatePart> {
        let name = func.part_name();
        match self.make(name)? {
            QueryPart::Aggregation(part) => Ok(part),
            _ => Err(mismatch(name, "aggregation")),
        }
    }
}

impl Default for QueryMaker {
    fn default() -> Self {
        Self::base()
    }
}

fn mismatch(name: &str, expected: &'static str) -> BeeError {
    BeeError::MismatchedQueryPart {
        name: name.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_has_every_part() {
        let maker = QueryMaker::base();
        for name in [
            "select",
            "update",
            "delete",
            "insert",
            "count",
            "where",
            "group_by",
            "having",
            "order_by",
            "limit",
            "logical_and",
            "logical_or",
            "equal_operator",
            "not_equal_operator",
            "in_operator",
            "not_in_operator",
            "less_than_operator",
            "less_than_or_equal_operator",
            "greater_than_operator",
            "greater_than_or_equal_operator",
            "sum_aggregation",
            "avg_aggregation",
            "count_aggregation",
            "max_aggregation",
            "min_aggregation",
        ] {
            assert!(maker.contains(name), "missing {name}");
        }
        assert_eq!(maker.names().len(), 25);
    }

    #[test]
    fn test_unknown_part() {
        let err = QueryMaker::base().make("window").unwrap_err();
        assert!(matches!(err, BeeError::UnknownQueryPart(ref n) if n == "window"));
    }

    #[test]
    fn test_overlay_keeps_base_entries() {
        let base = QueryMaker::base();
        let custom = base.overlay([(
            "not_equal_operator",
            QueryPart::Operator(OperatorPart {
                kind: CompareOp::NotEq,
                token: "!=",
            }),
        )]);

        assert_eq!(custom.operator(CompareOp::NotEq).unwrap().token, "!=");
        assert_eq!(custom.operator(CompareOp::Eq).unwrap().token, "=");
        // the base table is untouched
        assert_eq!(base.operator(CompareOp::NotEq).unwrap().token, "<>");
    }

    #[test]
    fn test_statement_kind_mismatch() {
        let maker = QueryMaker::base().with_part("select", QueryPart::Statement(StatementKind::Count));
        let err = maker.statement("select", StatementKind::Select).unwrap_err();
        assert!(matches!(err, BeeError::InvalidStatementType { .. }));

        let maker = QueryMaker::base().with_part(
            "delete",
            QueryPart::Clause(ClausePart::standard(ClauseKind::Where)),
        );
        let err = maker.statement("delete", StatementKind::Delete).unwrap_err();
        assert!(matches!(err, BeeError::InvalidStatementType { .. }));
    }

    #[test]
    fn test_category_mismatch() {
        let maker = QueryMaker::base().with_part(
            "logical_or",
            QueryPart::Operator(OperatorPart::standard(CompareOp::Eq)),
        );
        let err = maker.logical(Connector::Or).unwrap_err();
        assert!(matches!(err, BeeError::MismatchedQueryPart { expected: "logical", .. }));
    }

    #[test]
    fn test_limit_styles() {
        assert_eq!(LimitPart::new(LimitStyle::LimitOffset).render(10, 0), "LIMIT 10 OFFSET 0");
        assert_eq!(LimitPart::new(LimitStyle::OffsetComma).render(10, 20), "LIMIT 20, 10");
    }
}
