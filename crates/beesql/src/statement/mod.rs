//! Statements: the primary keyword plus its secondary clauses.
//!
//! Each statement renders its own head (`SELECT ... FROM t`, `UPDATE t SET ...`)
//! and defers everything after it to its [`Clauses`]. Statements that accept a
//! WHERE condition implement [`Conditional`], which provides the chaining API.

pub mod count;
pub mod delete;
pub mod insert;
pub mod select;
pub mod selector;
pub mod update;

pub use count::Count;
pub use delete::Delete;
pub use insert::Insert;
pub use select::{Field, Select};
pub use selector::ColumnSelector;
pub use update::Update;

use crate::condition::ConditionKind;
use crate::error::{BeeError, BeeResult};
use crate::escape::Escaper;
use crate::executor::Executor;
use crate::keyword::Clauses;
use crate::maker::QueryMaker;
use crate::predicate::{CompareOp, Connector, Operand, Predicate};
use crate::row::RowSet;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Primary keyword kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Update,
    Delete,
    Insert,
    Count,
}

impl StatementKind {
    pub const ALL: [StatementKind; 5] = [
        StatementKind::Select,
        StatementKind::Update,
        StatementKind::Delete,
        StatementKind::Insert,
        StatementKind::Count,
    ];

    /// Registry name of this statement.
    pub fn part_name(self) -> &'static str {
        match self {
            StatementKind::Select => "select",
            StatementKind::Update => "update",
            StatementKind::Delete => "delete",
            StatementKind::Insert => "insert",
            StatementKind::Count => "count",
        }
    }
}

/// Table a statement targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub name: String,
    pub alias: Option<String>,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// `name` or `name AS alias`, for FROM clauses.
    pub fn from_sql(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} AS {}", self.name, alias),
            None => self.name.clone(),
        }
    }
}

/// What a statement needs from its query to build and render itself.
#[derive(Clone)]
pub struct StatementContext {
    table: TableRef,
    maker: Arc<QueryMaker>,
    escaper: Arc<dyn Escaper>,
}

impl StatementContext {
    pub fn new(table: TableRef, maker: Arc<QueryMaker>, escaper: Arc<dyn Escaper>) -> Self {
        Self {
            table,
            maker,
            escaper,
        }
    }

    pub fn table(&self) -> &TableRef {
        &self.table
    }

    pub fn maker(&self) -> &QueryMaker {
        &self.maker
    }

    pub fn escaper(&self) -> &dyn Escaper {
        &*self.escaper
    }
}

impl fmt::Debug for StatementContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatementContext")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

/// Base trait for statements.
pub trait SqlStatement {
    fn kind(&self) -> StatementKind;

    fn context(&self) -> &StatementContext;

    fn clauses(&self) -> &Clauses;

    /// Render the primary keyword part, without secondary clauses.
    fn head_sql(&self) -> String;

    /// Validate statement state before rendering for execution.
    fn validate(&self) -> BeeResult<()> {
        Ok(())
    }

    /// Render the full statement. Rendering never mutates the statement.
    fn to_sql(&self) -> String {
        let mut sql = self.head_sql();
        sql.push_str(&self.clauses().to_sql(self.context().escaper()));
        sql
    }

    /// Validate, then render.
    fn build_sql(&self) -> BeeResult<String> {
        self.validate()?;
        Ok(self.to_sql())
    }

    /// Render and run through `executor`.
    fn execute(&self, executor: &dyn Executor) -> BeeResult<RowSet> {
        let sql = self.build_sql()?;
        tracing::debug!(
            target: "beesql.sql",
            statement = self.kind().part_name(),
            sql = %sql,
            "executing statement"
        );
        let rows = executor.execute(&sql)?;
        tracing::debug!(target: "beesql.sql", rows = rows.count(), "statement finished");
        Ok(rows)
    }
}

/// Statements that carry a WHERE condition.
///
/// `where_` / `where_eq` start (or extend) the WHERE condition; `and` / `or`
/// and their `_eq` forms chain onto whichever condition is active.
pub trait Conditional: SqlStatement + Sized {
    fn clauses_mut(&mut self) -> &mut Clauses;

    /// Start a comparison on `column` for the WHERE condition.
    fn where_(&mut self, column: impl Into<String>) -> ColumnSelector<'_, Self> {
        ColumnSelector::new(self, column.into(), ConditionKind::Where, Connector::And)
    }

    /// Add `column = value` equalities to WHERE, AND-joined.
    ///
    /// Creates the condition on first use and extends it afterwards.
    fn where_eq<I, K, V>(&mut self, pairs: I) -> BeeResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        attach_equalities(self, ConditionKind::Where, pairs, Connector::And, "where")
    }

    /// Chain an AND comparison onto the active condition.
    fn and(&mut self, column: impl Into<String>) -> BeeResult<ColumnSelector<'_, Self>> {
        let target = active_condition(self)?;
        Ok(ColumnSelector::new(self, column.into(), target, Connector::And))
    }

    /// Chain an OR comparison onto the active condition.
    fn or(&mut self, column: impl Into<String>) -> BeeResult<ColumnSelector<'_, Self>> {
        let target = active_condition(self)?;
        Ok(ColumnSelector::new(self, column.into(), target, Connector::Or))
    }

    /// Chain AND-joined equalities onto the active condition.
    fn and_eq<I, K, V>(&mut self, pairs: I) -> BeeResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let target = active_condition(self)?;
        attach_equalities(self, target, pairs, Connector::And, "and")
    }

    /// Chain equalities onto the active condition: the first is OR-joined,
    /// the rest AND-joined, rendered flat.
    fn or_eq<I, K, V>(&mut self, pairs: I) -> BeeResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let target = active_condition(self)?;
        attach_equalities(self, target, pairs, Connector::Or, "or")
    }

    /// Make the WHERE condition the chaining target again.
    fn activate_where(&mut self) -> BeeResult<&mut Self> {
        self.clauses_mut().activate(ConditionKind::Where)?;
        Ok(self)
    }

    fn has_condition(&self) -> bool {
        self.clauses().has_condition()
    }
}

fn active_condition<S: Conditional>(statement: &S) -> BeeResult<ConditionKind> {
    statement
        .clauses()
        .active()
        .ok_or(BeeError::NoActiveCondition)
}

/// Turn `(column, value)` pairs into equality predicates and attach them to
/// `target`; the first pair uses `first`, the rest use AND.
pub(crate) fn attach_equalities<'a, S, I, K, V>(
    statement: &'a mut S,
    target: ConditionKind,
    pairs: I,
    first: Connector,
    clause: &'static str,
) -> BeeResult<&'a mut S>
where
    S: Conditional,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    let maker = statement.context().maker();
    let equal = maker.operator(CompareOp::Eq)?;
    let first_part = maker.logical(first)?;
    let and_part = maker.logical(Connector::And)?;
    let part = maker.clause(target.clause_kind())?;

    let links: Vec<_> = pairs
        .into_iter()
        .enumerate()
        .map(|(i, (column, value))| {
            let connector = if i == 0 { first_part } else { and_part };
            let predicate = Predicate::new(column, equal, Operand::Single(value.into()));
            (connector, predicate)
        })
        .collect();

    if links.is_empty() {
        return Err(BeeError::EmptyWhereClause(clause));
    }

    statement.clauses_mut().attach(target, part, links);
    Ok(statement)
}

/// The statement currently held by a query.
#[derive(Debug, Clone)]
pub enum Statement {
    Select(Select),
    Update(Update),
    Delete(Delete),
    Insert(Insert),
    Count(Count),
}

impl Statement {
    fn inner(&self) -> &dyn SqlStatement {
        match self {
            Statement::Select(s) => s,
            Statement::Update(s) => s,
            Statement::Delete(s) => s,
            Statement::Insert(s) => s,
            Statement::Count(s) => s,
        }
    }
}

impl SqlStatement for Statement {
    fn kind(&self) -> StatementKind {
        self.inner().kind()
    }

    fn context(&self) -> &StatementContext {
        self.inner().context()
    }

    fn clauses(&self) -> &Clauses {
        self.inner().clauses()
    }

    fn head_sql(&self) -> String {
        self.inner().head_sql()
    }

    fn validate(&self) -> BeeResult<()> {
        self.inner().validate()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Typed access to one variant of [`Statement`].
pub trait StatementVariant: Sized + Into<Statement> {
    const KIND: StatementKind;

    fn from_statement_mut(statement: &mut Statement) -> Option<&mut Self>;
}

macro_rules! impl_statement_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Statement {
                fn from(s: $variant) -> Self {
                    Statement::$variant(s)
                }
            }

            impl StatementVariant for $variant {
                const KIND: StatementKind = StatementKind::$variant;

                fn from_statement_mut(statement: &mut Statement) -> Option<&mut Self> {
                    match statement {
                        Statement::$variant(s) => Some(s),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_statement_variant!(Select, Update, Delete, Insert, Count);
