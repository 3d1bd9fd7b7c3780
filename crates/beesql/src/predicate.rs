//! Comparison predicates and the logical connectors that chain them.

use crate::escape::Escaper;
use crate::maker::{LogicalPart, OperatorPart};
use crate::value::{Value, list_literal};

/// Comparison operator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
}

impl CompareOp {
    /// Registry name of the part that renders this operator.
    pub fn part_name(self) -> &'static str {
        match self {
            CompareOp::Eq => "equal_operator",
            CompareOp::NotEq => "not_equal_operator",
            CompareOp::Lt => "less_than_operator",
            CompareOp::Lte => "less_than_or_equal_operator",
            CompareOp::Gt => "greater_than_operator",
            CompareOp::Gte => "greater_than_or_equal_operator",
            CompareOp::In => "in_operator",
            CompareOp::NotIn => "not_in_operator",
        }
    }

    /// Default SQL token.
    pub fn token(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "<>",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::In => "IN",
            CompareOp::NotIn => "NOT IN",
        }
    }

    /// IN and NOT IN compare against a list.
    pub fn takes_list(self) -> bool {
        matches!(self, CompareOp::In | CompareOp::NotIn)
    }
}

/// Logical connector kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    pub fn part_name(self) -> &'static str {
        match self {
            Connector::And => "logical_and",
            Connector::Or => "logical_or",
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

/// Right-hand side of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Single(Value),
    List(Vec<Value>),
}

impl Operand {
    fn to_sql(&self, escaper: &dyn Escaper) -> String {
        match self {
            Operand::Single(v) => v.to_literal(escaper),
            Operand::List(vs) => list_literal(vs, escaper),
        }
    }
}

/// A single `column <op> value` comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    column: String,
    operator: OperatorPart,
    operand: Operand,
}

impl Predicate {
    pub fn new(column: impl Into<String>, operator: OperatorPart, operand: Operand) -> Self {
        Self {
            column: column.into(),
            operator,
            operand,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn set_column(&mut self, column: impl Into<String>) {
        self.column = column.into();
    }

    pub fn operator(&self) -> &OperatorPart {
        &self.operator
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    pub fn to_sql(&self, escaper: &dyn Escaper) -> String {
        format!(
            "{} {} {}",
            self.column,
            self.operator.token,
            self.operand.to_sql(escaper)
        )
    }
}

/// A predicate prefixed by its connector when chained onto a condition.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalOperator {
    connector: LogicalPart,
    predicate: Predicate,
}

impl LogicalOperator {
    pub fn new(connector: LogicalPart, predicate: Predicate) -> Self {
        Self {
            connector,
            predicate,
        }
    }

    pub fn connector(&self) -> Connector {
        self.connector.kind
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn to_sql(&self, escaper: &dyn Escaper) -> String {
        format!(
            "{} {}",
            self.connector.keyword,
            self.predicate.to_sql(escaper)
        )
    }
}
