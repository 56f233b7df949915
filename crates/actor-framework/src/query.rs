//! # Queries
//!
//! Filter and sort descriptions evaluated by a [`ResourceActor`](crate::ResourceActor)
//! against the entities it owns.
//!
//! A query is data, not code: a [`Filter`] is an accumulation of field equality
//! predicates and a [`SortSpec`] is an optional, independent ordering stage. Entities
//! expose their fields through [`ActorEntity::field`](crate::ActorEntity::field).
//!
//! ```rust
//! use actor_framework::query::{Filter, FindQuery, SortSpec};
//!
//! let query = FindQuery::new(Filter::eq("category", "shirts").and(Filter::eq("size", "M")))
//!     .sort(SortSpec::desc("price"));
//! assert!(query.sort.is_some());
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Display};

/// A field value exposed by an entity for filtering and sorting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Total ordering used by sort stages. Numbers sort before text.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Number(_), Value::Text(_)) => Ordering::Less,
            (Value::Text(_), Value::Number(_)) => Ordering::Greater,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

/// Conjunctive filter over entity fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Filter {
    /// Matches every entity.
    #[default]
    All,
    /// Matches entities whose `field` equals `value`.
    Eq { field: String, value: Value },
    /// Matches entities satisfying every inner filter.
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Combines two filters, flattening nested conjunctions and dropping `All`.
    pub fn and(self, other: Filter) -> Filter {
        match (self, other) {
            (Filter::All, f) | (f, Filter::All) => f,
            (Filter::And(mut lhs), Filter::And(rhs)) => {
                lhs.extend(rhs);
                Filter::And(lhs)
            }
            (Filter::And(mut lhs), f) => {
                lhs.push(f);
                Filter::And(lhs)
            }
            (f, Filter::And(mut rhs)) => {
                rhs.insert(0, f);
                Filter::And(rhs)
            }
            (a, b) => Filter::And(vec![a, b]),
        }
    }

    /// Evaluates the filter, resolving field names through `lookup`.
    ///
    /// A field the entity does not expose never matches an equality predicate.
    pub fn matches<F>(&self, lookup: &F) -> bool
    where
        F: Fn(&str) -> Option<Value>,
    {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => lookup(field).as_ref() == Some(value),
            Filter::And(filters) => filters.iter().all(|f| f.matches(lookup)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    Asc,
    Desc,
}

/// Single-field sort stage.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub field: String,
    pub order: Order,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: Order::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: Order::Desc,
        }
    }

    /// Compares two optional field values. Missing values sort first ascending.
    pub fn compare(&self, a: Option<&Value>, b: Option<&Value>) -> Ordering {
        let ord = match (a, b) {
            (Some(a), Some(b)) => a.sort_cmp(b),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        match self.order {
            Order::Asc => ord,
            Order::Desc => ord.reverse(),
        }
    }
}

/// A `find` request: filter first, then the optional sort stage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FindQuery {
    pub filter: Filter,
    pub sort: Option<SortSpec>,
}

impl FindQuery {
    pub fn new(filter: Filter) -> Self {
        Self { filter, sort: None }
    }

    pub fn sort(mut self, spec: SortSpec) -> Self {
        self.sort = Some(spec);
        self
    }

    /// Runs the query over `items` given in natural order.
    ///
    /// The sort is stable, so ties keep natural order.
    pub fn run<'a, T, F>(&self, items: impl Iterator<Item = &'a T>, lookup: F) -> Vec<T>
    where
        T: Clone + 'a,
        F: Fn(&T, &str) -> Option<Value>,
    {
        let mut hits: Vec<T> = items
            .filter(|item| self.filter.matches(&|field: &str| lookup(*item, field)))
            .cloned()
            .collect();

        if let Some(spec) = &self.sort {
            hits.sort_by(|a, b| {
                let va = lookup(a, &spec.field);
                let vb = lookup(b, &spec.field);
                spec.compare(va.as_ref(), vb.as_ref())
            });
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Clone, Debug)]
    struct Row {
        name: &'static str,
        fields: HashMap<&'static str, Value>,
    }

    fn row(name: &'static str, color: &str, price: f64) -> Row {
        let mut fields = HashMap::new();
        fields.insert("color", Value::from(color));
        fields.insert("price", Value::from(price));
        Row { name, fields }
    }

    fn lookup(row: &Row, field: &str) -> Option<Value> {
        row.fields.get(field).cloned()
    }

    #[test]
    fn and_flattens_and_drops_all() {
        let f = Filter::All.and(Filter::eq("a", "1"));
        assert_eq!(f, Filter::eq("a", "1"));

        let f = Filter::eq("a", "1")
            .and(Filter::eq("b", "2"))
            .and(Filter::eq("c", "3"));
        match f {
            Filter::And(parts) => assert_eq!(parts.len(), 3),
            other => panic!("expected conjunction, got {other:?}"),
        }
    }

    #[test]
    fn missing_field_never_matches() {
        let r = row("x", "Red", 1.0);
        assert!(!Filter::eq("size", "M").matches(&|f: &str| lookup(&r, f)));
        assert!(Filter::All.matches(&|f: &str| lookup(&r, f)));
    }

    #[test]
    fn run_filters_then_sorts_stably() {
        let rows = vec![
            row("a", "Red", 20.0),
            row("b", "Blue", 5.0),
            row("c", "Red", 5.0),
            row("d", "Red", 20.0),
        ];

        let query = FindQuery::new(Filter::eq("color", "Red")).sort(SortSpec::desc("price"));
        let names: Vec<_> = query
            .run(rows.iter(), lookup)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["a", "d", "c"]);

        let names: Vec<_> = FindQuery::default()
            .run(rows.iter(), lookup)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn numbers_sort_before_text() {
        assert_eq!(
            Value::from(100.0).sort_cmp(&Value::from("1")),
            Ordering::Less
        );
        let spec = SortSpec::asc("x");
        assert_eq!(spec.compare(None, Some(&Value::from(0.0))), Ordering::Less);
    }
}
