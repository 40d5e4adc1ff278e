use crate::{client, common, error::Result, read};

/// Find a record by id.
///
/// ```rust,no_run
/// use airtable_crud::{client, common, read};
///
/// # fn example(client: &client::TableClient) -> Result<(), Box<dyn std::error::Error>> {
/// let find = read::find::Find {
///     id: "recXXXXXXXXXXXXXX".to_string(),
///     ..Default::default()
/// };
/// let response = find.send(client)?;
/// if let common::response::Records::Single(record) = response.get(None) {
///     println!("{:?}", record.fields);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Find {
    /// The record id.
    pub id: String,
    /// Lookup options.
    pub options: read::common::FindOptions,
}

impl From<Find> for FindByFormula {
    fn from(find: Find) -> Self {
        Self {
            formula: common::formula::Formula::record_id(&find.id),
            options: find.options,
        }
    }
}

impl Find {
    /// Execute the find operation.
    pub fn send(self, client: &client::TableClient) -> Result<common::response::Response> {
        FindByFormula::from(self).send(client)
    }
}

/// Find the first record whose field equals a value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FindBy {
    /// The field to compare.
    pub field: String,
    /// Lookup options.
    pub options: read::common::FindOptions,
    /// The value the field must equal.
    pub value: String,
}

impl From<FindBy> for FindByFormula {
    fn from(find_by: FindBy) -> Self {
        Self {
            formula: common::formula::Formula::equals(&find_by.field, &find_by.value),
            options: find_by.options,
        }
    }
}

impl FindBy {
    /// Execute the find by operation.
    pub fn send(self, client: &client::TableClient) -> Result<common::response::Response> {
        FindByFormula::from(self).send(client)
    }
}

/// Find the first record matching a formula.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FindByFormula {
    /// The filter formula.
    pub formula: common::formula::Formula,
    /// Lookup options.
    pub options: read::common::FindOptions,
}

impl From<FindByFormula> for read::get::GetByFormula {
    fn from(find_by_formula: FindByFormula) -> Self {
        Self {
            formula: find_by_formula.formula,
            options: find_by_formula.options.into(),
        }
    }
}

impl FindByFormula {
    /// Execute the find by formula operation.
    pub fn send(self, client: &client::TableClient) -> Result<common::response::Response> {
        read::get::GetByFormula::from(self).send(client)
    }
}

/// Get the first record of the table, in view or sort order when given.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct First {
    /// Lookup options.
    pub options: read::common::FindOptions,
}

impl From<First> for read::get::Get {
    fn from(first: First) -> Self {
        Self {
            options: first.options.into(),
        }
    }
}

impl First {
    /// Execute the first operation.
    pub fn send(self, client: &client::TableClient) -> Result<common::response::Response> {
        read::get::Get::from(self).send(client)
    }
}
