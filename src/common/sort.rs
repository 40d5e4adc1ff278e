use crate::common;

use serde::{Deserialize, Serialize};
use std::ops;

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order, sent as `asc`.
    #[default]
    Asc,
    /// Descending order, sent as `desc`.
    Desc,
}

impl ops::Deref for SortDirection {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A resolved sort clause: a field and its direction.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct SortClause {
    /// The direction to sort in.
    pub direction: SortDirection,
    /// The field to sort on.
    pub field: String,
}

/// A sort clause as supplied by a caller, with an optional direction.
///
/// A missing direction defaults to [`SortDirection::Asc`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SortItem {
    /// A bare field name, sorted ascending.
    Field(String),
    /// A field with an explicit or defaulted direction.
    Clause {
        /// The direction, ascending when `None`.
        direction: Option<SortDirection>,
        /// The field to sort on.
        field: String,
    },
}

impl From<SortItem> for SortClause {
    fn from(sort_item: SortItem) -> Self {
        match sort_item {
            SortItem::Field(field) => Self {
                field,
                ..Default::default()
            },
            SortItem::Clause { direction, field } => Self {
                direction: direction.unwrap_or_default(),
                field,
            },
        }
    }
}

impl From<&str> for SortItem {
    fn from(field: &str) -> Self {
        Self::Field(field.to_string())
    }
}

/// Chaining builder for multi-field sorts.
///
/// ```rust
/// use airtable_crud::common::sort::{SortDirection, Sorter};
///
/// let sorter = Sorter::default()
///     .append("Priority", SortDirection::Desc)
///     .append_asc("Name");
/// let params = sorter.build();
/// assert_eq!(params["sort[0][field]"], "Priority");
/// assert_eq!(params["sort[0][direction]"], "desc");
/// assert_eq!(params["sort[1][direction]"], "asc");
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Sorter {
    clauses: Vec<SortClause>,
}

impl Sorter {
    /// Append a sort on `field` in `direction`.
    pub fn append(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.clauses.push(SortClause {
            direction,
            field: field.into(),
        });
        self
    }

    /// Append an ascending sort on `field`.
    pub fn append_asc(self, field: impl Into<String>) -> Self {
        self.append(field, SortDirection::Asc)
    }

    /// Render the clauses as unencoded `sort[i][field]`/`sort[i][direction]` pairs.
    pub fn build(&self) -> indexmap::IndexMap<String, String> {
        let mut query = indexmap::IndexMap::with_capacity(self.clauses.len() * 2);
        for (index, clause) in self.clauses.iter().enumerate() {
            query.insert(format!("sort[{index}][field]"), clause.field.clone());
            query.insert(
                format!("sort[{index}][direction]"),
                clause.direction.to_string(),
            );
        }
        query
    }
}

/// The accepted shapes of a sort specification.
///
/// ```rust
/// use airtable_crud::common::sort::{SortDirection, SortItem, SortMap};
///
/// let sort = SortMap::Clauses(vec![
///     SortItem::Field("Name".to_string()),
///     SortItem::Clause {
///         direction: Some(SortDirection::Desc),
///         field: "Created".to_string(),
///     },
/// ]);
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SortMap {
    /// A pre-built [`Sorter`].
    Builder(Sorter),
    /// An ordered list of clauses.
    Clauses(Vec<SortItem>),
    /// A single clause, emitted at index 0.
    Single(SortItem),
}

impl From<SortMap> for Vec<SortClause> {
    fn from(sort_map: SortMap) -> Self {
        match sort_map {
            SortMap::Builder(sorter) => sorter.clauses,
            SortMap::Clauses(items) => items.into_iter().map(SortClause::from).collect(),
            SortMap::Single(item) => vec![item.into()],
        }
    }
}

impl From<Sorter> for SortMap {
    fn from(sorter: Sorter) -> Self {
        Self::Builder(sorter)
    }
}

impl SortMap {
    /// Merge this sort into `params` under `sort[i][...]` keys.
    pub(crate) fn to_params(self, mut params: common::QueryParams) -> common::QueryParams {
        let clauses: Vec<SortClause> = self.into();
        let sorter = Sorter { clauses };
        for (key, value) in sorter.build() {
            params.insert(key, &value);
        }
        params
    }
}
