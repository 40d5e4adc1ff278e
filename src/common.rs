//! Common utilities for Airtable operations.
//!
//! This module provides shared types and utilities used across read and write operations,
//! including formulas, sorting, records, the response envelope and query parameters.

/// Filter formulas for `filterByFormula`.
pub mod formula;

/// Records and backend-reported errors.
pub mod record;

/// The response envelope returned by every operation.
pub mod response;

/// Sort specifications for read operations.
pub mod sort;

use crate::error::{Error, Result};

use indexmap::IndexMap;
use url::form_urlencoded;

/// Split `items` into contiguous chunks of at most `size` elements.
///
/// Order is preserved and the last chunk may be shorter. A `size` of zero is
/// rejected with [`Error::InvalidChunkSize`].
///
/// ```rust
/// use airtable_crud::common;
///
/// let chunks = common::chunk(&[1, 2, 3, 4, 5], 2).unwrap();
/// assert_eq!(chunks, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
/// ```
pub fn chunk<T>(items: &[T], size: usize) -> Result<Vec<&[T]>> {
    if size == 0 {
        return Err(Error::InvalidChunkSize);
    }
    Ok(items.chunks(size).collect())
}

pub(crate) fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Value of a query parameter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParamValue {
    /// Sent once as `key=value`.
    Single(String),
    /// Sent as `key[]=value` once per element, in order.
    Multiple(Vec<String>),
}

/// Ordered, already percent-encoded query parameters of a read request.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QueryParams(pub(crate) IndexMap<String, ParamValue>);

impl QueryParams {
    pub(crate) fn insert(&mut self, key: impl Into<String>, value: &str) {
        self.0
            .insert(key.into(), ParamValue::Single(encode(value)));
    }

    pub(crate) fn insert_all(&mut self, key: impl Into<String>, values: &[String]) {
        let values = values.iter().map(|value| encode(value)).collect();
        self.0.insert(key.into(), ParamValue::Multiple(values));
    }

    /// Look up the encoded value of a parameter.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Whether no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct parameter keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Join the parameters into a query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::with_capacity(self.0.len());
        for (key, value) in &self.0 {
            match value {
                ParamValue::Single(value) => pairs.push(format!("{key}={value}")),
                ParamValue::Multiple(values) => {
                    pairs.extend(values.iter().map(|value| format!("{key}[]={value}")))
                }
            }
        }
        pairs.join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::exact(vec![1, 2, 3, 4], 2, vec![vec![1, 2], vec![3, 4]])]
    #[case::remainder(vec![1, 2, 3, 4, 5], 2, vec![vec![1, 2], vec![3, 4], vec![5]])]
    #[case::larger_than_input(vec![1, 2], 10, vec![vec![1, 2]])]
    #[case::single(vec![1, 2, 3], 1, vec![vec![1], vec![2], vec![3]])]
    #[case::empty(vec![], 3, vec![])]
    fn test_chunk(#[case] items: Vec<i32>, #[case] size: usize, #[case] expected: Vec<Vec<i32>>) {
        let actual: Vec<Vec<i32>> = chunk(&items, size)
            .unwrap()
            .into_iter()
            .map(|chunk| chunk.to_vec())
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_chunk_concatenation_preserves_input() {
        let items: Vec<u32> = (0..37).collect();
        for size in 1..=40 {
            let chunks = chunk(&items, size).unwrap();
            let (last, rest) = chunks.split_last().unwrap();
            assert!(rest.iter().all(|chunk| chunk.len() == size));
            assert!(!last.is_empty() && last.len() <= size);
            assert_eq!(chunks.concat(), items);
        }
    }

    #[test]
    fn test_chunk_zero_size() {
        let actual = chunk(&[1, 2, 3], 0);
        assert!(matches!(actual, Err(Error::InvalidChunkSize)));
    }

    #[rstest]
    #[case::plain("Name", "Name")]
    #[case::space("First Name", "First+Name")]
    #[case::formula("{Status}=\"Done\"", "%7BStatus%7D%3D%22Done%22")]
    #[case::unicode("名前", "%E5%90%8D%E5%89%8D")]
    fn test_encode(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(encode(value), expected);
    }

    #[test]
    fn test_query_string() {
        let mut params = QueryParams::default();
        params.insert("maxRecords", "3");
        params.insert_all("fields", &["Name".to_string(), "Due Date".to_string()]);
        params.insert("view", "Grid view");
        assert_eq!(params.len(), 3);
        assert_eq!(
            params.to_query_string(),
            "maxRecords=3&fields[]=Name&fields[]=Due+Date&view=Grid+view"
        );
    }

    #[test]
    fn test_query_string_empty() {
        let params = QueryParams::default();
        assert!(params.is_empty());
        assert_eq!(params.to_query_string(), "");
    }
}
