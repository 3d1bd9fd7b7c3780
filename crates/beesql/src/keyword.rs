//! Secondary keywords (WHERE, GROUP BY, HAVING, ORDER BY, LIMIT).
//!
//! [`Clauses`] holds every secondary keyword attached to a statement plus the
//! active-condition pointer. Clauses render in ascending priority order, no
//! matter in which order they were attached.

use crate::condition::{Condition, ConditionKind};
use crate::error::{BeeError, BeeResult};
use crate::escape::Escaper;
use crate::maker::{ClauseKind, ClausePart, LimitPart, LogicalPart};
use crate::predicate::{LogicalOperator, Predicate};

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// One ORDER BY column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderColumn {
    pub name: String,
    pub direction: Direction,
}

impl OrderColumn {
    /// Parse `"name"` (ascending) or `"-name"` (descending).
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('-') {
            Some(name) => Self {
                name: name.to_string(),
                direction: Direction::Desc,
            },
            None => Self {
                name: raw.to_string(),
                direction: Direction::Asc,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupBy {
    part: ClausePart,
    columns: Vec<String>,
}

impl GroupBy {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    part: ClausePart,
    columns: Vec<OrderColumn>,
}

impl OrderBy {
    pub fn columns(&self) -> &[OrderColumn] {
        &self.columns
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Limit {
    part: LimitPart,
    pub limit: u64,
    pub offset: u64,
}

/// A clause attached to a statement after its head.
#[derive(Debug, Clone, PartialEq)]
pub enum SecondaryKeyword {
    Where(Condition),
    GroupBy(GroupBy),
    Having(Condition),
    OrderBy(OrderBy),
    Limit(Limit),
}

impl SecondaryKeyword {
    pub fn kind(&self) -> ClauseKind {
        match self {
            SecondaryKeyword::Where(_) => ClauseKind::Where,
            SecondaryKeyword::GroupBy(_) => ClauseKind::GroupBy,
            SecondaryKeyword::Having(_) => ClauseKind::Having,
            SecondaryKeyword::OrderBy(_) => ClauseKind::OrderBy,
            SecondaryKeyword::Limit(_) => ClauseKind::Limit,
        }
    }

    pub fn priority(&self) -> u8 {
        match self {
            SecondaryKeyword::Where(c) | SecondaryKeyword::Having(c) => c.priority(),
            SecondaryKeyword::GroupBy(g) => g.part.priority,
            SecondaryKeyword::OrderBy(o) => o.part.priority,
            SecondaryKeyword::Limit(l) => l.part.priority,
        }
    }

    pub fn to_sql(&self, escaper: &dyn Escaper) -> String {
        match self {
            SecondaryKeyword::Where(c) | SecondaryKeyword::Having(c) => c.to_sql(escaper),
            SecondaryKeyword::GroupBy(g) => {
                format!("{} {}", g.part.keyword, g.columns.join(", "))
            }
            SecondaryKeyword::OrderBy(o) => {
                let cols: Vec<String> = o
                    .columns
                    .iter()
                    .map(|c| format!("{} {}", c.name, c.direction.keyword()))
                    .collect();
                format!("{} {}", o.part.keyword, cols.join(", "))
            }
            SecondaryKeyword::Limit(l) => l.part.render(l.limit, l.offset),
        }
    }
}

/// The secondary keywords of one statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clauses {
    entries: Vec<SecondaryKeyword>,
    active: Option<ConditionKind>,
}

impl Clauses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, kind: ClauseKind) -> Option<&SecondaryKeyword> {
        self.entries.iter().find(|k| k.kind() == kind)
    }

    fn get_mut(&mut self, kind: ClauseKind) -> Option<&mut SecondaryKeyword> {
        self.entries.iter_mut().find(|k| k.kind() == kind)
    }

    pub fn condition(&self, kind: ConditionKind) -> Option<&Condition> {
        match self.get(kind.clause_kind())? {
            SecondaryKeyword::Where(c) | SecondaryKeyword::Having(c) => Some(c),
            _ => None,
        }
    }

    fn condition_mut(&mut self, kind: ConditionKind) -> Option<&mut Condition> {
        match self.get_mut(kind.clause_kind())? {
            SecondaryKeyword::Where(c) | SecondaryKeyword::Having(c) => Some(c),
            _ => None,
        }
    }

    /// The condition bare AND/OR calls chain onto.
    pub fn active(&self) -> Option<ConditionKind> {
        self.active
    }

    pub fn has_condition(&self) -> bool {
        self.active.is_some()
    }

    /// Make an existing condition the chaining target.
    pub fn activate(&mut self, kind: ConditionKind) -> BeeResult<()> {
        if self.condition(kind).is_none() {
            return Err(BeeError::NoActiveCondition);
        }
        self.active = Some(kind);
        Ok(())
    }

    /// Attach predicates to the `kind` condition and make it active.
    ///
    /// When the condition does not exist yet, the first predicate becomes its
    /// head and its connector is dropped; every other predicate is chained
    /// with the connector it is paired with.
    pub(crate) fn attach(
        &mut self,
        kind: ConditionKind,
        part: ClausePart,
        links: Vec<(LogicalPart, Predicate)>,
    ) {
        let mut links = links.into_iter();
        match self.condition_mut(kind) {
            Some(cond) => cond.chain(links.map(|(c, p)| LogicalOperator::new(c, p))),
            None => {
                let Some((_, head)) = links.next() else {
                    return;
                };
                let mut cond = Condition::new(kind, part, head);
                cond.chain(links.map(|(c, p)| LogicalOperator::new(c, p)));
                self.entries.push(match kind {
                    ConditionKind::Where => SecondaryKeyword::Where(cond),
                    ConditionKind::Having => SecondaryKeyword::Having(cond),
                });
            }
        }
        self.active = Some(kind);
    }

    /// Add GROUP BY columns, extending any existing list.
    pub(crate) fn group_by(&mut self, part: ClausePart, columns: Vec<String>) {
        match self.get_mut(ClauseKind::GroupBy) {
            Some(SecondaryKeyword::GroupBy(g)) => g.columns.extend(columns),
            _ => self
                .entries
                .push(SecondaryKeyword::GroupBy(GroupBy { part, columns })),
        }
    }

    /// Add ORDER BY columns; a column given twice keeps its first position
    /// and takes the latest direction.
    pub(crate) fn order_by(&mut self, part: ClausePart, columns: Vec<OrderColumn>) {
        if self.get(ClauseKind::OrderBy).is_none() {
            self.entries.push(SecondaryKeyword::OrderBy(OrderBy {
                part,
                columns: Vec::new(),
            }));
        }
        if let Some(SecondaryKeyword::OrderBy(o)) = self.get_mut(ClauseKind::OrderBy) {
            for col in columns {
                match o.columns.iter_mut().find(|c| c.name == col.name) {
                    Some(existing) => existing.direction = col.direction,
                    None => o.columns.push(col),
                }
            }
        }
    }

    /// Set LIMIT/OFFSET, replacing any earlier value.
    pub(crate) fn limit(&mut self, part: LimitPart, limit: u64, offset: u64) {
        let entry = SecondaryKeyword::Limit(Limit {
            part,
            limit,
            offset,
        });
        match self.get_mut(ClauseKind::Limit) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Keywords in render order. Ties keep attachment order.
    pub fn ordered(&self) -> Vec<&SecondaryKeyword> {
        let mut ordered: Vec<&SecondaryKeyword> = self.entries.iter().collect();
        ordered.sort_by_key(|k| k.priority());
        ordered
    }

    /// Render every clause, each preceded by a space.
    pub fn to_sql(&self, escaper: &dyn Escaper) -> String {
        let mut sql = String::new();
        for keyword in self.ordered() {
            sql.push(' ');
            sql.push_str(&keyword.to_sql(escaper));
        }
        sql
    }
}
