use crate::common::record::{ErrorInfo, Record};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// View over the records of a [`Response`] returned by [`Response::get`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Records<'a> {
    /// Exactly one record.
    Single(&'a Record),
    /// Zero or several records.
    Multiple(&'a [Record]),
}

/// View over the record ids of a [`Response`] returned by [`Response::get_ids`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Ids<'a> {
    /// The id of the only record.
    Single(&'a str),
    /// Ids of zero or several records, in record order.
    Multiple(Vec<&'a str>),
}

/// The envelope returned by every operation.
///
/// Holds the records, the pagination cursor and the errors reported by the
/// backend. Errors may be present alongside records when only part of a
/// paginated or batched operation failed, so callers should check
/// [`Response::has_errors`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    errors: Vec<ErrorInfo>,
    offset: Option<String>,
    records: Vec<Record>,
}

impl Response {
    /// Build an envelope.
    pub fn new(records: Vec<Record>, offset: Option<String>, errors: Vec<ErrorInfo>) -> Self {
        Self {
            errors,
            offset,
            records,
        }
    }

    /// All records, always as a slice.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consume the envelope and return its records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// The cursor of the next page, if the backend returned one.
    pub fn offset(&self) -> Option<&str> {
        self.offset.as_deref()
    }

    /// Errors reported by the backend.
    pub fn errors(&self) -> &[ErrorInfo] {
        &self.errors
    }

    /// Whether any error was reported.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of records.
    pub fn size(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records, unwrapped when there is exactly one.
    ///
    /// With a single record that record is returned whatever `index` is. With
    /// several records `index` selects one of them, or all are returned when
    /// `index` is `None`. An empty or out-of-range result is an empty
    /// [`Records::Multiple`].
    ///
    /// Beware that the shape depends on the record count. Use
    /// [`Response::records`] when a slice is always wanted.
    pub fn get(&self, index: Option<usize>) -> Records<'_> {
        match (self.records.as_slice(), index) {
            ([record], _) => Records::Single(record),
            ([], _) => Records::Multiple(&[]),
            (records, None) => Records::Multiple(records),
            (records, Some(index)) => match records.get(index) {
                Some(record) => Records::Single(record),
                None => Records::Multiple(&[]),
            },
        }
    }

    /// Record ids, unwrapped when there is exactly one.
    ///
    /// Same shape rules as [`Response::get`]. Use [`Response::ids`] when a
    /// list is always wanted.
    pub fn get_ids(&self) -> Ids<'_> {
        match self.records.as_slice() {
            [record] => Ids::Single(&record.id),
            records => Ids::Multiple(records.iter().map(|record| record.id.as_str()).collect()),
        }
    }

    /// Record ids in record order, always as a list.
    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|record| record.id.as_str()).collect()
    }
}

/// A decoded response body, covering list, single record and error shapes.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Body {
    #[serde(default)]
    pub(crate) created_time: Option<String>,
    #[serde(default)]
    pub(crate) deleted: Option<bool>,
    #[serde(default)]
    pub(crate) error: Option<ErrorInfo>,
    #[serde(default)]
    pub(crate) fields: Option<IndexMap<String, Value>>,
    #[serde(default)]
    pub(crate) id: Option<String>,
    #[serde(default)]
    pub(crate) offset: Option<String>,
    #[serde(default)]
    pub(crate) records: Option<Vec<Value>>,
}

impl Body {
    /// Decode a raw body. `None` means the body is not a JSON object of a known shape.
    pub(crate) fn decode(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(body) => Some(body),
            Err(error) => {
                tracing::warn!(%error, "failed to decode response body");
                None
            }
        }
    }

    /// Records carried by the body: the `records` list, or the body itself
    /// when it describes a single record. List items that are not records
    /// are skipped.
    pub(crate) fn take_records(&mut self) -> Vec<Record> {
        if let Some(records) = self.records.take() {
            return records
                .into_iter()
                .filter_map(|record| match serde_json::from_value(record) {
                    Ok(record) => Some(record),
                    Err(error) => {
                        tracing::warn!(%error, "skipped undecodable record");
                        None
                    }
                })
                .collect();
        }
        match self.id.take() {
            Some(id) => vec![Record {
                created_time: self.created_time.take(),
                deleted: self.deleted.take(),
                fields: self.fields.take().unwrap_or_default(),
                id,
            }],
            None => Vec::new(),
        }
    }
}

impl From<Option<Body>> for Response {
    fn from(body: Option<Body>) -> Self {
        match body {
            Some(mut body) => {
                let records = body.take_records();
                Self::new(records, body.offset, body.error.into_iter().collect())
            }
            None => Self::default(),
        }
    }
}

/// Accumulates records and errors over several bodies.
#[derive(Debug, Default)]
pub(crate) struct Aggregate {
    errors: Vec<ErrorInfo>,
    records: Vec<Record>,
}

impl Aggregate {
    /// Append the records and error of `body`. Returns whether it carried any record.
    pub(crate) fn push(&mut self, mut body: Body) -> bool {
        let records = body.take_records();
        let found = !records.is_empty();
        self.records.extend(records);
        self.errors.extend(body.error);
        found
    }

    /// Append an optional body, ignoring undecodable ones.
    pub(crate) fn extend(&mut self, body: Option<Body>) {
        if let Some(body) = body {
            self.push(body);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}

impl From<Aggregate> for Response {
    fn from(aggregate: Aggregate) -> Self {
        Self::new(aggregate.records, None, aggregate.errors)
    }
}
