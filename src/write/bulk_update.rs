use crate::{client, common, error::Result, transport, write};

use serde::Serialize;

/// bulk update operation
#[derive(Debug, PartialEq)]
struct BulkUpdateInput {
    records: Vec<write::common::RecordInput>,
}

/// One record of a [`BulkUpdate`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordUpdate<T> {
    /// Field values to overwrite.
    pub fields: T,
    /// The record id.
    pub id: String,
}

/// Update some fields of many records.
///
/// Chunked and paced like [`BulkInsert`](write::bulk_insert::BulkInsert).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BulkUpdate<T> {
    /// The records to update, in submission order.
    pub records: Vec<RecordUpdate<T>>,
}

impl<T: Serialize> TryFrom<RecordUpdate<T>> for write::common::RecordInput {
    type Error = serde_json::Error;

    fn try_from(record: RecordUpdate<T>) -> serde_json::Result<Self> {
        let fields = serde_json::to_value(record.fields)?;
        Ok(Self {
            fields,
            id: record.id,
        })
    }
}

impl<T: Serialize> TryFrom<BulkUpdate<T>> for BulkUpdateInput {
    type Error = serde_json::Error;

    fn try_from(bulk_update: BulkUpdate<T>) -> serde_json::Result<Self> {
        let records = bulk_update
            .records
            .into_iter()
            .map(write::common::RecordInput::try_from)
            .collect::<serde_json::Result<_>>()?;
        Ok(Self { records })
    }
}

impl<T: Serialize> BulkUpdate<T> {
    /// Execute the bulk update operation.
    #[tracing::instrument(name = "airtable_crud.bulk_update", skip_all, fields(table = client.table_name()), err)]
    pub fn send(self, client: &client::TableClient) -> Result<common::response::Response> {
        let bulk_update: BulkUpdateInput = self.try_into()?;
        let chunks = common::chunk(
            &bulk_update.records,
            client.config().max_records_per_request,
        )?;
        let mut aggregate = common::response::Aggregate::default();
        for (index, records) in chunks.into_iter().enumerate() {
            if index > 0 {
                client.wait();
            }
            let body = client.send_json(
                transport::Method::Patch,
                client.base_url().clone(),
                &write::common::RecordsInput { records },
            )?;
            aggregate.extend(body);
        }
        Ok(aggregate.into())
    }
}
