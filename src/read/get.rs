use crate::{client, common, error::Result, read};

/// get operation
#[derive(Clone, Debug, Default, PartialEq)]
struct GetInput {
    params: common::QueryParams,
}

/// Get one page of records.
///
/// The backend returns at most 100 records per page unless
/// `max_records` is lower. The cursor of the next page, if any, is
/// available through [`Response::offset`](common::response::Response::offset).
///
/// ```rust,no_run
/// use airtable_crud::{client, read};
///
/// # fn example(client: &client::TableClient) -> Result<(), Box<dyn std::error::Error>> {
/// let get = read::get::Get {
///     options: read::common::RequestOptions {
///         max_records: Some(50),
///         ..Default::default()
///     },
/// };
/// let page = get.send(client)?;
/// println!("next page: {:?}", page.offset());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Get {
    /// Request options, the cursor included.
    pub options: read::common::RequestOptions,
}

impl From<Get> for GetInput {
    fn from(get: Get) -> Self {
        Self {
            params: get.options.into(),
        }
    }
}

impl Get {
    /// Execute the get operation.
    #[tracing::instrument(name = "airtable_crud.get", skip_all, fields(table = client.table_name()), err)]
    pub fn send(self, client: &client::TableClient) -> Result<common::response::Response> {
        let get: GetInput = self.into();
        let body = client.fetch_page(&get.params)?;
        Ok(body.into())
    }
}

/// Get one page of records whose field equals a value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetBy {
    /// The field to compare.
    pub field: String,
    /// Request options. Any formula is replaced by the field comparison.
    pub options: read::common::RequestOptions,
    /// The value the field must equal.
    pub value: String,
}

impl From<GetBy> for GetByFormula {
    fn from(get_by: GetBy) -> Self {
        Self {
            formula: common::formula::Formula::equals(&get_by.field, &get_by.value),
            options: get_by.options,
        }
    }
}

impl GetBy {
    /// Execute the get by operation.
    pub fn send(self, client: &client::TableClient) -> Result<common::response::Response> {
        GetByFormula::from(self).send(client)
    }
}

/// Get one page of records matching a formula.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetByFormula {
    /// The filter formula.
    pub formula: common::formula::Formula,
    /// Request options. Any formula is replaced by `formula`.
    pub options: read::common::RequestOptions,
}

impl From<GetByFormula> for Get {
    fn from(get_by_formula: GetByFormula) -> Self {
        Self {
            options: read::common::RequestOptions {
                formula: Some(get_by_formula.formula),
                ..get_by_formula.options
            },
        }
    }
}

impl GetByFormula {
    /// Execute the get by formula operation.
    pub fn send(self, client: &client::TableClient) -> Result<common::response::Response> {
        Get::from(self).send(client)
    }
}
