use crate::{client, common, error::Result, transport, write};

use serde::Serialize;

/// bulk insert operation
#[derive(Debug, PartialEq)]
struct BulkInsertInput {
    records: Vec<write::common::FieldsInput>,
}

/// Create many records.
///
/// The records are sent in chunks of
/// [`ClientConfig::max_records_per_request`](client::ClientConfig::max_records_per_request),
/// one request per chunk, waiting for the rate limit between chunks. A chunk
/// rejected by the backend does not stop the following ones: its error is
/// collected and the created records of every other chunk are returned in
/// submission order.
///
/// ```rust,no_run
/// use airtable_crud::{client, write};
/// use serde_json::json;
///
/// # fn example(client: &client::TableClient) -> Result<(), Box<dyn std::error::Error>> {
/// let bulk_insert = write::bulk_insert::BulkInsert {
///     fields_list: vec![json!({"Name": "a"}), json!({"Name": "b"})],
/// };
/// let created = bulk_insert.send(client)?;
/// assert!(!created.has_errors());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BulkInsert<T> {
    /// Field values of the new records, in creation order.
    pub fields_list: Vec<T>,
}

impl<T: Serialize> TryFrom<BulkInsert<T>> for BulkInsertInput {
    type Error = serde_json::Error;

    fn try_from(bulk_insert: BulkInsert<T>) -> serde_json::Result<Self> {
        let records = bulk_insert
            .fields_list
            .into_iter()
            .map(write::common::FieldsInput::try_new)
            .collect::<serde_json::Result<_>>()?;
        Ok(Self { records })
    }
}

impl<T: Serialize> BulkInsert<T> {
    /// Execute the bulk insert operation.
    #[tracing::instrument(name = "airtable_crud.bulk_insert", skip_all, fields(table = client.table_name()), err)]
    pub fn send(self, client: &client::TableClient) -> Result<common::response::Response> {
        let bulk_insert: BulkInsertInput = self.try_into()?;
        let chunks = common::chunk(
            &bulk_insert.records,
            client.config().max_records_per_request,
        )?;
        let mut aggregate = common::response::Aggregate::default();
        for (index, records) in chunks.into_iter().enumerate() {
            if index > 0 {
                client.wait();
            }
            let body = client.send_json(
                transport::Method::Post,
                client.base_url().clone(),
                &write::common::RecordsInput { records },
            )?;
            aggregate.extend(body);
        }
        Ok(aggregate.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing;

    use serde_json::{Value, json};

    fn created(ids: std::ops::Range<usize>) -> String {
        let records: Vec<Value> = ids
            .map(|id| json!({"id": format!("rec{id}"), "fields": {"N": id}}))
            .collect();
        json!({ "records": records }).to_string()
    }

    #[test]
    fn test_bulk_insert() {
        let args = BulkInsert {
            fields_list: vec![json!({"a": 1}), json!({"b": 2})],
        };
        let actual: BulkInsertInput = args.try_into().unwrap();
        let expected = BulkInsertInput {
            records: vec![
                write::common::FieldsInput {
                    fields: json!({"a": 1}),
                },
                write::common::FieldsInput {
                    fields: json!({"b": 2}),
                },
            ],
        };
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_bulk_insert_send_in_chunks() {
        let fixture = testing::fixture([created(0..10), created(10..20), created(20..25)]);
        let fields_list: Vec<Value> = (0..25).map(|n| json!({ "N": n })).collect();
        let actual = fixture.client.bulk_insert(fields_list).unwrap();
        let expected_ids: Vec<String> = (0..25).map(|id| format!("rec{id}")).collect();
        assert_eq!(actual.ids(), expected_ids);
        assert!(!actual.has_errors());

        let requests = fixture.transport.requests();
        let sizes: Vec<usize> = requests
            .iter()
            .map(|request| {
                let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
                body["records"].as_array().unwrap().len()
            })
            .collect();
        assert_eq!(sizes, vec![10, 10, 5]);
        assert!(requests
            .iter()
            .all(|request| request.method == transport::Method::Post));
        let first: Value = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(first["records"][0], json!({"fields": {"N": 0}}));
        assert_eq!(fixture.sleep.durations().len(), 2);
    }

    #[test]
    fn test_bulk_insert_send_continues_after_failed_chunk() {
        let fixture = testing::fixture([
            created(0..10),
            r#"{"error": {"type": "INVALID_RECORDS"}}"#.to_string(),
            created(20..22),
        ]);
        let fields_list: Vec<Value> = (0..22).map(|n| json!({ "N": n })).collect();
        let actual = fixture.client.bulk_insert(fields_list).unwrap();
        assert_eq!(actual.size(), 12);
        assert_eq!(actual.errors().len(), 1);
        assert_eq!(fixture.transport.requests().len(), 3);
    }

    #[test]
    fn test_bulk_insert_send_empty() {
        let fixture = testing::fixture(Vec::<String>::new());
        let actual = fixture.client.bulk_insert(Vec::<Value>::new()).unwrap();
        assert!(actual.is_empty());
        assert!(fixture.transport.requests().is_empty());
        assert!(fixture.sleep.durations().is_empty());
    }
}
