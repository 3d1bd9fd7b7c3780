//! WHERE / HAVING conditions.
//!
//! A [`Condition`] is a head [`Predicate`] followed by any number of
//! connector-prefixed predicates. Chaining is flat: `a OR b AND c` renders
//! exactly in that order with no added parentheses.

use crate::escape::Escaper;
use crate::maker::{ClauseKind, ClausePart};
use crate::predicate::{LogicalOperator, Predicate};

/// Which condition slot of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    Where,
    Having,
}

impl ConditionKind {
    pub fn clause_kind(self) -> ClauseKind {
        match self {
            ConditionKind::Where => ClauseKind::Where,
            ConditionKind::Having => ClauseKind::Having,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConditionKind::Where => "where",
            ConditionKind::Having => "having",
        }
    }
}

/// A WHERE or HAVING clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    kind: ConditionKind,
    part: ClausePart,
    head: Predicate,
    chained: Vec<LogicalOperator>,
}

impl Condition {
    pub fn new(kind: ConditionKind, part: ClausePart, head: Predicate) -> Self {
        Self {
            kind,
            part,
            head,
            chained: Vec::new(),
        }
    }

    pub fn kind(&self) -> ConditionKind {
        self.kind
    }

    pub fn priority(&self) -> u8 {
        self.part.priority
    }

    pub fn head(&self) -> &Predicate {
        &self.head
    }

    pub fn chained(&self) -> &[LogicalOperator] {
        &self.chained
    }

    /// Number of predicates, head included.
    pub fn predicate_count(&self) -> usize {
        1 + self.chained.len()
    }

    /// Append connector-prefixed predicates.
    pub fn chain<I>(&mut self, operators: I)
    where
        I: IntoIterator<Item = LogicalOperator>,
    {
        self.chained.extend(operators);
    }

    pub fn to_sql(&self, escaper: &dyn Escaper) -> String {
        let mut sql = format!("{} {}", self.part.keyword, self.head.to_sql(escaper));
        for op in &self.chained {
            sql.push(' ');
            sql.push_str(&op.to_sql(escaper));
        }
        sql
    }
}
