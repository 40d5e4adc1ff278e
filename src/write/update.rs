use crate::{client, common, error::Result, transport, write};

use serde::Serialize;

/// update item operation
#[derive(Debug, PartialEq)]
struct UpdateInput {
    id: String,
    payload: write::common::FieldsInput,
}

impl UpdateInput {
    fn send(
        self,
        client: &client::TableClient,
        method: transport::Method,
    ) -> Result<common::response::Response> {
        let url = client.record_url(&self.id)?;
        let body = client.send_json(method, url, &self.payload)?;
        Ok(body.into())
    }
}

/// Update some fields of one record.
///
/// Only the given fields are overwritten; the others keep their value.
///
/// ```rust,no_run
/// use airtable_crud::{client, write};
/// use serde_json::json;
///
/// # fn example(client: &client::TableClient) -> Result<(), Box<dyn std::error::Error>> {
/// let update = write::update::Update {
///     fields: json!({"Done": true}),
///     id: "recXXXXXXXXXXXXXX".to_string(),
/// };
/// update.send(client)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Update<T> {
    /// Field values to overwrite.
    pub fields: T,
    /// The record id.
    pub id: String,
}

impl<T: Serialize> TryFrom<Update<T>> for UpdateInput {
    type Error = serde_json::Error;

    fn try_from(update: Update<T>) -> serde_json::Result<Self> {
        let payload = write::common::FieldsInput::try_new(update.fields)?;
        Ok(Self {
            id: update.id,
            payload,
        })
    }
}

impl<T: Serialize> Update<T> {
    /// Execute the update operation.
    #[tracing::instrument(name = "airtable_crud.update", skip_all, fields(table = client.table_name(), id = %self.id), err)]
    pub fn send(self, client: &client::TableClient) -> Result<common::response::Response> {
        let update: UpdateInput = self.try_into()?;
        update.send(client, transport::Method::Patch)
    }
}

/// Replace every field of one record.
///
/// Fields left out of `fields` are cleared by the backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Replace<T> {
    /// The new field values.
    pub fields: T,
    /// The record id.
    pub id: String,
}

impl<T: Serialize> TryFrom<Replace<T>> for UpdateInput {
    type Error = serde_json::Error;

    fn try_from(replace: Replace<T>) -> serde_json::Result<Self> {
        Update {
            fields: replace.fields,
            id: replace.id,
        }
        .try_into()
    }
}

impl<T: Serialize> Replace<T> {
    /// Execute the replace operation.
    #[tracing::instrument(name = "airtable_crud.replace", skip_all, fields(table = client.table_name(), id = %self.id), err)]
    pub fn send(self, client: &client::TableClient) -> Result<common::response::Response> {
        let replace: UpdateInput = self.try_into()?;
        replace.send(client, transport::Method::Put)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing;

    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case::update(
        Update {
            fields: json!(
                {
                    "Done": true
                }
            ),
            id: "rec1".to_string(),
        }.try_into().unwrap(),
        UpdateInput {
            id: "rec1".to_string(),
            payload: write::common::FieldsInput {
                fields: json!(
                    {
                        "Done": true
                    }
                ),
            },
        }
    )]
    #[case::replace(
        Replace {
            fields: json!(
                {
                    "Name": "b"
                }
            ),
            id: "rec2".to_string(),
        }.try_into().unwrap(),
        UpdateInput {
            id: "rec2".to_string(),
            payload: write::common::FieldsInput {
                fields: json!(
                    {
                        "Name": "b"
                    }
                ),
            },
        }
    )]
    fn test_update(#[case] actual: UpdateInput, #[case] expected: UpdateInput) {
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::update(transport::Method::Patch)]
    #[case::replace(transport::Method::Put)]
    fn test_update_send(#[case] method: transport::Method) {
        let fixture = testing::fixture([r#"{"id": "rec1", "fields": {"Name": "a", "Done": true}}"#]);
        let actual = match method {
            transport::Method::Put => fixture.client.replace("rec1", json!({"Done": true})),
            _ => fixture.client.update("rec1", json!({"Done": true})),
        }
        .unwrap();
        assert_eq!(actual.size(), 1);
        assert_eq!(actual.records()[0].fields["Done"], json!(true));
        let requests = fixture.transport.requests();
        assert_eq!(requests[0].method, method);
        assert_eq!(
            requests[0].url,
            "https://api.airtable.com/v0/app123/Tasks/rec1"
        );
        let body: Value = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"fields": {"Done": true}}));
    }
}
