use super::{Conditional, SqlStatement, StatementContext, StatementKind};
use crate::error::{BeeError, BeeResult};
use crate::keyword::Clauses;
use crate::value::Value;

/// UPDATE statement.
#[derive(Debug, Clone)]
pub struct Update {
    context: StatementContext,
    clauses: Clauses,
    assignments: Vec<(String, Value)>,
    prevent_update_all: bool,
}

impl Update {
    pub(crate) fn new<I, K, V>(context: StatementContext, assignments: I) -> BeeResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut update = Self {
            context,
            clauses: Clauses::new(),
            assignments: Vec::new(),
            prevent_update_all: true,
        };
        update.update(assignments)?;
        Ok(update)
    }

    /// Merge more assignments. A column set twice keeps its first position
    /// and takes the latest value.
    pub fn update<I, K, V>(&mut self, assignments: I) -> BeeResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let assignments: Vec<(String, Value)> = assignments
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        if assignments.is_empty() {
            return Err(BeeError::EmptyUpdateValues);
        }
        for (column, value) in assignments {
            self.assign(column, value);
        }
        Ok(self)
    }

    /// Set a single column.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.assign(column.into(), value.into());
        self
    }

    fn assign(&mut self, column: String, value: Value) {
        match self.assignments.iter_mut().find(|(c, _)| *c == column) {
            Some((_, existing)) => *existing = value,
            None => self.assignments.push((column, value)),
        }
    }

    pub fn assignments(&self) -> &[(String, Value)] {
        &self.assignments
    }

    /// Mark this update as allowed to run without a WHERE condition.
    ///
    /// The flag is recorded for callers to inspect; rendering ignores it.
    pub fn allow_update_all(&mut self) -> &mut Self {
        self.prevent_update_all = false;
        self
    }

    pub fn prevents_update_all(&self) -> bool {
        self.prevent_update_all
    }
}

impl SqlStatement for Update {
    fn kind(&self) -> StatementKind {
        StatementKind::Update
    }

    fn context(&self) -> &StatementContext {
        &self.context
    }

    fn clauses(&self) -> &Clauses {
        &self.clauses
    }

    fn head_sql(&self) -> String {
        let escaper = self.context.escaper();
        let sets: Vec<String> = self
            .assignments
            .iter()
            .map(|(column, value)| format!("{} = {}", column, value.to_literal(escaper)))
            .collect();
        format!(
            "UPDATE {} SET {}",
            self.context.table().name,
            sets.join(", ")
        )
    }

    fn validate(&self) -> BeeResult<()> {
        if self.assignments.is_empty() {
            return Err(BeeError::EmptyUpdateValues);
        }
        Ok(())
    }
}

impl Conditional for Update {
    fn clauses_mut(&mut self) -> &mut Clauses {
        &mut self.clauses
    }
}
