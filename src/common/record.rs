use indexmap::IndexMap;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::fmt;

/// A table record as returned by the backend.
///
/// `id` is assigned by the backend and never generated by the client.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Creation timestamp, when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    /// Set by delete responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    /// Field values keyed by field name, in backend order.
    #[serde(default)]
    pub fields: IndexMap<String, Value>,
    /// Backend-assigned record id.
    pub id: String,
}

impl Record {
    /// Deserialize the record's fields into `T`.
    ///
    /// ```rust
    /// use airtable_crud::common::record::Record;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Task {
    ///     #[serde(rename = "Name")]
    ///     name: String,
    /// }
    ///
    /// let record: Record = serde_json::from_str(
    ///     r#"{"id": "rec1", "fields": {"Name": "Write docs"}}"#,
    /// ).unwrap();
    /// let task: Task = record.deserialize_fields().unwrap();
    /// assert_eq!(task.name, "Write docs");
    /// ```
    pub fn deserialize_fields<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        let fields = self
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        serde_json::from_value(Value::Object(fields))
    }
}

/// An error reported by the backend in the `error` member of a body.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorInfo {
    /// A bare error code such as `NOT_FOUND`.
    Code(String),
    /// A typed error with an optional message.
    Detail {
        /// Human readable message.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        /// Error type such as `INVALID_REQUEST_UNKNOWN`.
        #[serde(rename = "type")]
        kind: String,
    },
    /// Any other shape, kept as raw JSON.
    Other(Value),
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => f.write_str(code),
            Self::Detail {
                message: Some(message),
                kind,
            } => write!(f, "{kind}: {message}"),
            Self::Detail {
                message: None,
                kind,
            } => f.write_str(kind),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}
