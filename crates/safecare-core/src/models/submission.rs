use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::CoreError;

/// Keys owned by the server. Clients never author them; they are stripped
/// from any payload before it is stored.
pub const SYSTEM_FIELDS: [&str; 4] = ["id", "user_id", "date_created", "date_last_modified"];

/// One persisted instance of an intake form.
///
/// The form-specific fields are kept as raw JSON and flattened next to the
/// system fields on the wire, so a submission serializes as
/// `{ "id": .., "user_id": .., "date_created": .., "date_last_modified": .., "name": .., ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date_created: jiff::Timestamp,
    pub date_last_modified: jiff::Timestamp,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Submission {
    /// Create a new submission owned by `user_id` with a fresh id and
    /// both timestamps set to now.
    pub fn new(user_id: Uuid, mut fields: Map<String, Value>) -> Self {
        strip_system_fields(&mut fields);
        let now = jiff::Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            date_created: now,
            date_last_modified: now,
            fields,
        }
    }

    /// Overwrite every form field in place and bump `date_last_modified`.
    /// `id`, `user_id` and `date_created` are preserved.
    pub fn replace_fields(&mut self, mut fields: Map<String, Value>) {
        strip_system_fields(&mut fields);
        self.fields = fields;
        self.date_last_modified = jiff::Timestamp::now();
    }

    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        if !value.is_object() {
            return Err(CoreError::NotAnObject("submission".to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// The form fields as a JSON object, without system fields.
    pub fn payload(&self) -> Map<String, Value> {
        self.fields.clone()
    }
}

/// Remove server-owned keys from a client payload.
pub fn strip_system_fields(fields: &mut Map<String, Value>) {
    for key in SYSTEM_FIELDS {
        fields.remove(key);
    }
}
