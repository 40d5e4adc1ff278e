use crate::{client, common, error::Result};

/// Delete one record.
///
/// The returned envelope holds the record id with `deleted` set.
///
/// ```rust,no_run
/// use airtable_crud::{client, write};
///
/// # fn example(client: &client::TableClient) -> Result<(), Box<dyn std::error::Error>> {
/// let delete = write::delete::Delete {
///     id: "recXXXXXXXXXXXXXX".to_string(),
/// };
/// delete.send(client)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Delete {
    /// The record id.
    pub id: String,
}

impl Delete {
    /// Execute the delete operation.
    #[tracing::instrument(name = "airtable_crud.delete", skip_all, fields(table = client.table_name(), id = %self.id), err)]
    pub fn send(self, client: &client::TableClient) -> Result<common::response::Response> {
        let body = client.delete_record(&self.id)?;
        Ok(body.into())
    }
}
