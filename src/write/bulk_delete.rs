use crate::{client, common, error::Result};

/// Delete many records, one request per record.
///
/// Targets are given either as ids or as records previously fetched, or both:
/// `ids` are processed first, then `records`. Each list is split in groups of
/// [`ClientConfig::max_records_per_request`](client::ClientConfig::max_records_per_request)
/// and the client waits for the rate limit before every group but the first.
/// Each delete also takes its own slot on the shared rate limiter, so the
/// calls inside a group are spaced as well. The result holds the deletion
/// confirmations in submission order.
///
/// ```rust,no_run
/// use airtable_crud::{client, write};
///
/// # fn example(client: &client::TableClient) -> Result<(), Box<dyn std::error::Error>> {
/// let done = client.get_all_by("Done", "true", Default::default())?;
/// let bulk_delete = write::bulk_delete::BulkDelete {
///     records: done.into_records(),
///     ..Default::default()
/// };
/// bulk_delete.send(client)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BulkDelete {
    /// Ids of the records to delete.
    pub ids: Vec<String>,
    /// Records to delete, identified by their id.
    pub records: Vec<common::record::Record>,
}

impl BulkDelete {
    /// Execute the bulk delete operation.
    #[tracing::instrument(name = "airtable_crud.bulk_delete", skip_all, fields(table = client.table_name(), count = self.ids.len() + self.records.len()), err)]
    pub fn send(self, client: &client::TableClient) -> Result<common::response::Response> {
        let size = client.config().max_records_per_request;
        let records: Vec<&str> = self.records.iter().map(|record| record.id.as_str()).collect();
        let ids: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        let groups = common::chunk(&ids, size)?
            .into_iter()
            .chain(common::chunk(&records, size)?);
        let mut aggregate = common::response::Aggregate::default();
        for (index, group) in groups.enumerate() {
            if index > 0 {
                client.wait();
            }
            for id in group {
                aggregate.extend(client.delete_record(id)?);
            }
        }
        tracing::debug!(
            requested = ids.len() + records.len(),
            deleted = aggregate.len(),
            "bulk delete done"
        );
        Ok(aggregate.into())
    }
}
