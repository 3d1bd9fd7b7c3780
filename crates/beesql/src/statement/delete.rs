use super::{Conditional, SqlStatement, StatementContext, StatementKind};
use crate::keyword::Clauses;

/// DELETE statement.
#[derive(Debug, Clone)]
pub struct Delete {
    context: StatementContext,
    clauses: Clauses,
    prevent_delete_all: bool,
}

impl Delete {
    pub(crate) fn new(context: StatementContext) -> Self {
        Self {
            context,
            clauses: Clauses::new(),
            prevent_delete_all: true,
        }
    }

    /// Mark this delete as allowed to run without a WHERE condition.
    ///
    /// Recorded only; rendering does not enforce it.
    pub fn allow_delete_all(&mut self) -> &mut Self {
        self.prevent_delete_all = false;
        self
    }

    pub fn prevents_delete_all(&self) -> bool {
        self.prevent_delete_all
    }
}

impl SqlStatement for Delete {
    fn kind(&self) -> StatementKind {
        StatementKind::Delete
    }

    fn context(&self) -> &StatementContext {
        &self.context
    }

    fn clauses(&self) -> &Clauses {
        &self.clauses
    }

    fn head_sql(&self) -> String {
        format!("DELETE FROM {}", self.context.table().name)
    }
}

impl Conditional for Delete {
    fn clauses_mut(&mut self) -> &mut Clauses {
        &mut self.clauses
    }
}
