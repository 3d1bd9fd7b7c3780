//! The executor seam: where rendered SQL leaves the crate.

use crate::error::BeeResult;
use crate::row::RowSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Runs rendered SQL text and returns its rows.
///
/// Connection handling is entirely the implementor's business. Failures
/// should be reported as [`BeeError::Execution`](crate::BeeError::Execution)
/// or a more specific variant; the builder never interprets them.
pub trait Executor: Send + Sync {
    fn execute(&self, sql: &str) -> BeeResult<RowSet>;
}

impl<E: Executor + ?Sized> Executor for Arc<E> {
    fn execute(&self, sql: &str) -> BeeResult<RowSet> {
        (**self).execute(sql)
    }
}

impl<E: Executor + ?Sized> Executor for &E {
    fn execute(&self, sql: &str) -> BeeResult<RowSet> {
        (**self).execute(sql)
    }
}

/// An executor that records every statement and answers with a fixed row set.
///
/// Clones share the same log, so a test can keep one handle and give the
/// other to a [`Database`](crate::Database).
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    log: Arc<Mutex<Vec<String>>>,
    rows: RowSet,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every statement with `rows`.
    pub fn with_rows(rows: RowSet) -> Self {
        Self {
            log: Arc::default(),
            rows,
        }
    }

    /// Statements executed so far, oldest first.
    pub fn statements(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<String> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Executor for Recorder {
    fn execute(&self, sql: &str) -> BeeResult<RowSet> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sql.to_string());
        Ok(self.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Row;
    use crate::value::Value;

    #[test]
    fn test_recorder_logs_and_answers() {
        let rows: RowSet = [Row::new(vec![("id".to_string(), Value::Int(1))])]
            .into_iter()
            .collect();
        let recorder = Recorder::with_rows(rows);
        let shared = recorder.clone();

        let out = shared.execute("SELECT 1").unwrap();
        assert_eq!(out.count(), 1);
        assert_eq!(recorder.statements(), vec!["SELECT 1".to_string()]);
        assert_eq!(recorder.last().as_deref(), Some("SELECT 1"));
    }

    #[test]
    fn test_arc_executor() {
        let recorder = Recorder::new();
        let exec: Arc<dyn Executor> = Arc::new(recorder.clone());
        exec.execute("DELETE FROM t").unwrap();
        assert_eq!(recorder.statements().len(), 1);
    }
}
