use super::{Conditional, SqlStatement, StatementContext, StatementKind};
use crate::keyword::Clauses;

/// `SELECT count(*)` statement.
#[derive(Debug, Clone)]
pub struct Count {
    context: StatementContext,
    clauses: Clauses,
}

impl Count {
    pub(crate) fn new(context: StatementContext) -> Self {
        Self {
            context,
            clauses: Clauses::new(),
        }
    }
}

impl SqlStatement for Count {
    fn kind(&self) -> StatementKind {
        StatementKind::Count
    }

    fn context(&self) -> &StatementContext {
        &self.context
    }

    fn clauses(&self) -> &Clauses {
        &self.clauses
    }

    fn head_sql(&self) -> String {
        format!(
            "SELECT count(*) AS count FROM {}",
            self.context.table().from_sql()
        )
    }
}

impl Conditional for Count {
    fn clauses_mut(&mut self) -> &mut Clauses {
        &mut self.clauses
    }
}
