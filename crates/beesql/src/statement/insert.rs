use super::{SqlStatement, StatementContext, StatementKind};
use crate::error::{BeeError, BeeResult};
use crate::keyword::Clauses;
use crate::value::{Value, list_literal};

/// INSERT statement.
///
/// Rows are added one at a time with [`Insert::row`]. When columns were
/// declared, every row must match their count.
#[derive(Debug, Clone)]
pub struct Insert {
    context: StatementContext,
    clauses: Clauses,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Insert {
    pub(crate) fn new<I, C>(context: StatementContext, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            context,
            clauses: Clauses::new(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append one row of values.
    pub fn row<I, V>(&mut self, values: I) -> BeeResult<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(BeeError::EmptyArgumentList("insert row"));
        }
        if !self.columns.is_empty() && values.len() != self.columns.len() {
            return Err(BeeError::RowWidthMismatch {
                expected: self.columns.len(),
                found: values.len(),
            });
        }
        self.rows.push(values);
        Ok(self)
    }

    /// Append several rows.
    pub fn rows<R, I, V>(&mut self, rows: R) -> BeeResult<&mut Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        for row in rows {
            self.row(row)?;
        }
        Ok(self)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl SqlStatement for Insert {
    fn kind(&self) -> StatementKind {
        StatementKind::Insert
    }

    fn context(&self) -> &StatementContext {
        &self.context
    }

    fn clauses(&self) -> &Clauses {
        &self.clauses
    }

    fn head_sql(&self) -> String {
        let escaper = self.context.escaper();
        let mut sql = format!("INSERT INTO {}", self.context.table().name);
        if !self.columns.is_empty() {
            sql.push_str(&format!(" ({})", self.columns.join(", ")));
        }
        let rows: Vec<String> = self
            .rows
            .iter()
            .map(|row| list_literal(row, escaper))
            .collect();
        sql.push_str(" VALUES ");
        sql.push_str(&rows.join(","));
        sql
    }

    fn validate(&self) -> BeeResult<()> {
        if self.rows.is_empty() {
            return Err(BeeError::EmptyArgumentList("insert rows"));
        }
        Ok(())
    }
}
