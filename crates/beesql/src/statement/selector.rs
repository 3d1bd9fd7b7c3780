//! Column selector: the value returned by `where_`, `having`, `and` and `or`.

use super::Conditional;
use crate::condition::ConditionKind;
use crate::error::{BeeError, BeeResult};
use crate::predicate::{CompareOp, Connector, Operand, Predicate};
use crate::value::Value;

/// A pending comparison on one column.
///
/// Completing it with a comparison method builds the predicate, attaches it
/// to the target condition and hands the statement back for further chaining.
#[derive(Debug)]
#[must_use = "a column selector does nothing until a comparison is applied"]
pub struct ColumnSelector<'a, S: Conditional> {
    statement: &'a mut S,
    column: String,
    target: ConditionKind,
    connector: Connector,
}

impl<'a, S: Conditional> ColumnSelector<'a, S> {
    pub(crate) fn new(
        statement: &'a mut S,
        column: String,
        target: ConditionKind,
        connector: Connector,
    ) -> Self {
        Self {
            statement,
            column,
            target,
            connector,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn target(&self) -> ConditionKind {
        self.target
    }

    /// `column = value`
    pub fn eq(self, value: impl Into<Value>) -> BeeResult<&'a mut S> {
        self.compare(CompareOp::Eq, Operand::Single(value.into()))
    }

    /// `column <> value`
    pub fn neq(self, value: impl Into<Value>) -> BeeResult<&'a mut S> {
        self.compare(CompareOp::NotEq, Operand::Single(value.into()))
    }

    /// `column < value`
    pub fn lt(self, value: impl Into<Value>) -> BeeResult<&'a mut S> {
        self.compare(CompareOp::Lt, Operand::Single(value.into()))
    }

    /// `column <= value`
    pub fn lte(self, value: impl Into<Value>) -> BeeResult<&'a mut S> {
        self.compare(CompareOp::Lte, Operand::Single(value.into()))
    }

    /// `column > value`
    pub fn gt(self, value: impl Into<Value>) -> BeeResult<&'a mut S> {
        self.compare(CompareOp::Gt, Operand::Single(value.into()))
    }

    /// `column >= value`
    pub fn gte(self, value: impl Into<Value>) -> BeeResult<&'a mut S> {
        self.compare(CompareOp::Gte, Operand::Single(value.into()))
    }

    /// `column IN (v1, v2, ...)`. An empty list is rejected.
    pub fn in_<I, V>(self, values: I) -> BeeResult<&'a mut S>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(BeeError::EmptyArgumentList("in operator"));
        }
        self.compare(CompareOp::In, Operand::List(values))
    }

    /// `column NOT IN (v1, v2, ...)`. An empty list is rejected.
    pub fn nin<I, V>(self, values: I) -> BeeResult<&'a mut S>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(BeeError::EmptyArgumentList("not in operator"));
        }
        self.compare(CompareOp::NotIn, Operand::List(values))
    }

    fn compare(self, op: CompareOp, operand: Operand) -> BeeResult<&'a mut S> {
        if self.column.trim().is_empty() {
            return Err(BeeError::EmptyWhereClause(self.target.name()));
        }

        let maker = self.statement.context().maker();
        let operator = maker.operator(op)?;
        let connector = maker.logical(self.connector)?;
        let part = maker.clause(self.target.clause_kind())?;

        let predicate = Predicate::new(self.column, operator, operand);
        self.statement
            .clauses_mut()
            .attach(self.target, part, vec![(connector, predicate)]);
        Ok(self.statement)
    }
}
