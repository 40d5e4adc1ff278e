use crate::{client, common, error::Result, transport, write};

use serde::Serialize;

/// insert operation
#[derive(Debug, PartialEq)]
struct InsertInput {
    payload: write::common::FieldsInput,
}

/// Create one record.
///
/// ```rust,no_run
/// use airtable_crud::{client, write};
/// use serde_json::json;
///
/// # fn example(client: &client::TableClient) -> Result<(), Box<dyn std::error::Error>> {
/// let insert = write::insert::Insert {
///     fields: json!({"Name": "Write docs", "Done": false}),
/// };
/// let created = insert.send(client)?;
/// println!("created {:?}", created.get_ids());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Insert<T> {
    /// Field values of the new record.
    pub fields: T,
}

impl<T: Serialize> TryFrom<Insert<T>> for InsertInput {
    type Error = serde_json::Error;

    fn try_from(insert: Insert<T>) -> serde_json::Result<Self> {
        let payload = write::common::FieldsInput::try_new(insert.fields)?;
        Ok(Self { payload })
    }
}

impl<T: Serialize> Insert<T> {
    /// Execute the insert operation.
    #[tracing::instrument(name = "airtable_crud.insert", skip_all, fields(table = client.table_name()), err)]
    pub fn send(self, client: &client::TableClient) -> Result<common::response::Response> {
        let insert: InsertInput = self.try_into()?;
        let body = client.send_json(
            transport::Method::Post,
            client.base_url().clone(),
            &insert.payload,
        )?;
        Ok(body.into())
    }
}
