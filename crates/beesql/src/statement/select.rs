use super::{
    ColumnSelector, Conditional, SqlStatement, StatementContext, StatementKind, attach_equalities,
};
use crate::aggregation::Aggregation;
use crate::condition::ConditionKind;
use crate::error::{BeeError, BeeResult};
use crate::keyword::{Clauses, OrderColumn};
use crate::maker::{AggregatePart, ClauseKind};
use crate::predicate::Connector;
use crate::value::Value;
use std::collections::BTreeSet;

/// One entry of a SELECT list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Column(String),
    Aggregate(Aggregation),
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::Column(name.to_string())
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Field::Column(name)
    }
}

impl From<Aggregation> for Field {
    fn from(agg: Aggregation) -> Self {
        Field::Aggregate(agg)
    }
}

/// SELECT statement.
///
/// Plain columns form a set and render sorted; aggregations keep the order
/// they were added in. Selecting nothing means `*`, and once the wildcard is
/// set later selections are ignored.
#[derive(Debug, Clone)]
pub struct Select {
    context: StatementContext,
    clauses: Clauses,
    fields: BTreeSet<String>,
    aggregations: Vec<(AggregatePart, Aggregation)>,
    all: bool,
}

impl Select {
    pub(crate) fn new<I, F>(context: StatementContext, fields: I) -> BeeResult<Self>
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        let mut select = Self {
            context,
            clauses: Clauses::new(),
            fields: BTreeSet::new(),
            aggregations: Vec::new(),
            all: false,
        };
        select.select(fields)?;
        Ok(select)
    }

    /// Merge more fields into the selection. An empty list selects `*`.
    pub fn select<I, F>(&mut self, fields: I) -> BeeResult<&mut Self>
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        let fields: Vec<Field> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            self.all = true;
            self.fields.clear();
            self.aggregations.clear();
            return Ok(self);
        }
        if self.all {
            return Ok(self);
        }

        let maker = self.context.maker();
        let mut columns = Vec::new();
        let mut aggregations = Vec::new();
        for field in fields {
            match field {
                Field::Column(name) => columns.push(name),
                Field::Aggregate(agg) => aggregations.push((maker.aggregation(agg.func)?, agg)),
            }
        }

        self.fields.extend(columns);
        self.aggregations.extend(aggregations);
        Ok(self)
    }

    /// Add one aggregation to the selection.
    pub fn aggregate(&mut self, aggregation: Aggregation) -> BeeResult<&mut Self> {
        self.select([Field::Aggregate(aggregation)])
    }

    pub fn is_wildcard(&self) -> bool {
        self.all
    }

    /// Selected column names, sorted.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn aggregations(&self) -> impl Iterator<Item = &Aggregation> {
        self.aggregations.iter().map(|(_, agg)| agg)
    }

    /// Add GROUP BY columns.
    pub fn group_by<I, C>(&mut self, columns: I) -> BeeResult<&mut Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(BeeError::EmptyArgumentList("group by"));
        }
        let part = self.context.maker().clause(ClauseKind::GroupBy)?;
        self.clauses.group_by(part, columns);
        Ok(self)
    }

    /// Add ORDER BY columns; prefix a column with `-` to sort descending.
    pub fn order_by<I, C>(&mut self, columns: I) -> BeeResult<&mut Self>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let columns: Vec<OrderColumn> = columns
            .into_iter()
            .map(|c| OrderColumn::parse(c.as_ref()))
            .collect();
        if columns.is_empty() {
            return Err(BeeError::EmptyArgumentList("order by"));
        }
        let part = self.context.maker().clause(ClauseKind::OrderBy)?;
        self.clauses.order_by(part, columns);
        Ok(self)
    }

    /// `LIMIT n` starting from the first row.
    pub fn limit(&mut self, limit: u64) -> BeeResult<&mut Self> {
        self.limit_offset(limit, 0)
    }

    pub fn limit_offset(&mut self, limit: u64, offset: u64) -> BeeResult<&mut Self> {
        let part = self.context.maker().limit()?;
        self.clauses.limit(part, limit, offset);
        Ok(self)
    }

    /// Page-based LIMIT/OFFSET. `page` starts at 1; both arguments are
    /// clamped to at least 1.
    pub fn paginate(&mut self, page: u64, per_page: u64) -> BeeResult<&mut Self> {
        let page = page.max(1);
        let per_page = per_page.max(1);
        self.limit_offset(per_page, (page - 1).saturating_mul(per_page))
    }

    /// Start a comparison on `column` for the HAVING condition.
    pub fn having(&mut self, column: impl Into<String>) -> ColumnSelector<'_, Self> {
        ColumnSelector::new(self, column.into(), ConditionKind::Having, Connector::And)
    }

    /// Add `column = value` equalities to HAVING, AND-joined.
    pub fn having_eq<I, K, V>(&mut self, pairs: I) -> BeeResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        attach_equalities(self, ConditionKind::Having, pairs, Connector::And, "having")
    }

    /// Make the HAVING condition the chaining target again.
    pub fn activate_having(&mut self) -> BeeResult<&mut Self> {
        self.clauses.activate(ConditionKind::Having)?;
        Ok(self)
    }

    fn field_list(&self) -> String {
        if self.all {
            return "*".to_string();
        }
        let mut items: Vec<String> = self.fields.iter().cloned().collect();
        items.extend(self.aggregations.iter().map(|(part, agg)| agg.to_sql(part)));
        if items.is_empty() {
            return "*".to_string();
        }
        items.join(", ")
    }
}

impl SqlStatement for Select {
    fn kind(&self) -> StatementKind {
        StatementKind::Select
    }

    fn context(&self) -> &StatementContext {
        &self.context
    }

    fn clauses(&self) -> &Clauses {
        &self.clauses
    }

    fn head_sql(&self) -> String {
        format!(
            "SELECT {} FROM {}",
            self.field_list(),
            self.context.table().from_sql()
        )
    }
}

impl Conditional for Select {
    fn clauses_mut(&mut self) -> &mut Clauses {
        &mut self.clauses
    }
}
