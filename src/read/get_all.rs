use crate::{
    client, common,
    error::{Error, Result},
    read,
};

/// Get every page of records.
///
/// Pages are requested one after the other, following the cursor returned
/// with each page, and the client waits for the rate limit between pages.
/// The loop stops at the first page without a cursor, an empty page or an
/// undecodable body. Errors reported on any page are collected in the
/// returned envelope, which carries no cursor.
///
/// A cursor equal to the previous one fails with [`Error::RepeatedCursor`],
/// and going past [`ClientConfig::max_pages`](client::ClientConfig::max_pages)
/// fails with [`Error::PaginationLimitExceeded`].
///
/// ```rust,no_run
/// use airtable_crud::{client, common, read};
///
/// # fn example(client: &client::TableClient) -> Result<(), Box<dyn std::error::Error>> {
/// let get_all = read::get_all::GetAll {
///     options: read::common::RequestOptions {
///         sort: Some(common::sort::SortMap::Builder(
///             common::sort::Sorter::default().append_asc("Name"),
///         )),
///         ..Default::default()
///     },
/// };
/// let response = get_all.send(client)?;
/// println!("{} records", response.size());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetAll {
    /// Request options. `offset`, when set, is the cursor of the first page.
    pub options: read::common::RequestOptions,
}

impl GetAll {
    /// Execute the get all operation.
    #[tracing::instrument(name = "airtable_crud.get_all", skip_all, fields(table = client.table_name()), err)]
    pub fn send(self, client: &client::TableClient) -> Result<common::response::Response> {
        let max_pages = client.config().max_pages;
        let mut options = self.options;
        let mut aggregate = common::response::Aggregate::default();
        let mut pages = 0;
        loop {
            if pages >= max_pages {
                return Err(Error::PaginationLimitExceeded { pages });
            }
            let params: common::QueryParams = options.clone().into();
            let body = client.fetch_page(&params)?;
            pages += 1;
            let Some(mut body) = body else {
                break;
            };
            let offset = body.offset.take();
            if !aggregate.push(body) {
                break;
            }
            let Some(offset) = offset else {
                break;
            };
            if options.offset.as_deref() == Some(offset.as_str()) {
                return Err(Error::RepeatedCursor(offset));
            }
            options.offset = Some(offset);
            client.wait();
        }
        tracing::debug!(pages, records = aggregate.len(), "fetched all pages");
        Ok(aggregate.into())
    }
}

/// Get every page of records whose field equals a value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetAllBy {
    /// The field to compare.
    pub field: String,
    /// Request options. Any formula is replaced by the field comparison.
    pub options: read::common::RequestOptions,
    /// The value the field must equal.
    pub value: String,
}

impl From<GetAllBy> for GetAll {
    fn from(get_all_by: GetAllBy) -> Self {
        Self {
            options: read::common::RequestOptions {
                formula: Some(common::formula::Formula::equals(
                    &get_all_by.field,
                    &get_all_by.value,
                )),
                ..get_all_by.options
            },
        }
    }
}

impl GetAllBy {
    /// Execute the get all by operation.
    pub fn send(self, client: &client::TableClient) -> Result<common::response::Response> {
        GetAll::from(self).send(client)
    }
}
