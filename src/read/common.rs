use crate::common;

/// Options shared by the read operations.
///
/// Every field is optional and an unset field is left out of the request.
///
/// ```rust
/// use airtable_crud::{common, read};
///
/// let options = read::common::RequestOptions {
///     fields: Some(vec!["Name".to_string()]),
///     max_records: Some(20),
///     view: Some("Grid view".to_string()),
///     ..Default::default()
/// };
/// let params: common::QueryParams = options.into();
/// assert_eq!(params.to_query_string(), "maxRecords=20&fields[]=Name&view=Grid+view");
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct RequestOptions {
    /// Field names to return. All fields are returned when `None`.
    pub fields: Option<Vec<String>>,
    /// Filter formula, sent as `filterByFormula`.
    pub formula: Option<common::formula::Formula>,
    /// Maximum number of records to return across all pages.
    pub max_records: Option<u32>,
    /// Cursor of the page to fetch, as returned by a previous call.
    pub offset: Option<String>,
    /// Sort specification.
    pub sort: Option<common::sort::SortMap>,
    /// Name or id of the view whose records and order are used.
    pub view: Option<String>,
}

/// Options of the single-record lookups (`find`, `find_by`, `first`, ...).
///
/// These lookups always request one record, so the record limit is not
/// configurable.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct FindOptions {
    /// Field names to return. All fields are returned when `None`.
    pub fields: Option<Vec<String>>,
    /// Sort specification, deciding which record comes first.
    pub sort: Option<common::sort::SortMap>,
    /// Name or id of the view to search in.
    pub view: Option<String>,
}

impl From<FindOptions> for RequestOptions {
    fn from(find_options: FindOptions) -> Self {
        Self {
            fields: find_options.fields,
            max_records: Some(1),
            sort: find_options.sort,
            view: find_options.view,
            ..Default::default()
        }
    }
}

impl From<RequestOptions> for common::QueryParams {
    fn from(request_options: RequestOptions) -> Self {
        let mut params = Self::default();
        if let Some(formula) = request_options.formula.filter(|formula| !formula.is_empty()) {
            params.insert("filterByFormula", &formula);
        }
        if let Some(offset) = request_options.offset.filter(|offset| !offset.is_empty()) {
            params.insert("offset", &offset);
        }
        if let Some(max_records) = request_options.max_records.filter(|max| *max > 0) {
            params.insert("maxRecords", &max_records.to_string());
        }
        if let Some(fields) = request_options.fields.filter(|fields| !fields.is_empty()) {
            params.insert_all("fields", &fields);
        }
        if let Some(view) = request_options.view.filter(|view| !view.is_empty()) {
            params.insert("view", &view);
        }
        match request_options.sort {
            Some(sort) => sort.to_params(params),
            None => params,
        }
    }
}
