use serde::Serialize;
use serde_json::Value;

/// `{"fields": ...}`, the payload of single-record writes and the items of
/// batch creates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct FieldsInput {
    pub(crate) fields: Value,
}

/// `{"id": ..., "fields": ...}`, the items of batch updates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct RecordInput {
    pub(crate) fields: Value,
    pub(crate) id: String,
}

/// `{"records": [...]}`, the payload of batch writes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct RecordsInput<'a, T> {
    pub(crate) records: &'a [T],
}

impl FieldsInput {
    pub(crate) fn try_new<T: Serialize>(fields: T) -> serde_json::Result<Self> {
        let fields = serde_json::to_value(fields)?;
        Ok(Self { fields })
    }
}
