//! Editing state of one open form.
//!
//! Holds the current values, the top-level repeatable groups and the id of
//! the submission being edited (if any). Every mutation re-derives
//! visibility and clears fields that became hidden, so the record handed to
//! the gateway never carries values for hidden fields.

use std::collections::BTreeMap;

use safecare_core::models::form_kind::FormKind;
use safecare_core::models::submission::Submission;
use safecare_core::schema::{FieldKind, find_field};
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::error::FormError;
use crate::groups::RepeatableGroup;
use crate::path::{self, Segment};
use crate::validation::{self, ValidationError};
use crate::{IntakeForm, get_form, visibility};

/// Whether submitting creates a new record or overwrites an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update(Uuid),
}

pub struct FormState {
    form: Box<dyn IntakeForm>,
    submission_id: Option<Uuid>,
    /// All non-list top-level fields.
    values: Map<String, Value>,
    /// Top-level list fields, keyed by field name.
    groups: BTreeMap<String, RepeatableGroup>,
}

impl FormState {
    /// A blank, unsaved form.
    pub fn new(kind: FormKind) -> Result<Self, FormError> {
        let form = get_form(kind);
        let mut values = Map::new();
        let mut groups = BTreeMap::new();
        for field in form.fields() {
            match field.kind {
                FieldKind::List { .. } => {
                    groups.insert(field.name.clone(), RepeatableGroup::blank(field)?);
                }
                _ => {
                    values.insert(field.name.clone(), field.blank_value());
                }
            }
        }
        let mut state = Self {
            form,
            submission_id: None,
            values,
            groups,
        };
        state.settle();
        Ok(state)
    }

    /// Populate from a fetched submission. Visibility is derived from the
    /// fetched controlling values, and values of fields that are hidden by
    /// them are cleared.
    pub fn from_submission(kind: FormKind, submission: &Submission) -> Result<Self, FormError> {
        let form = get_form(kind);
        let mut values = Map::new();
        let mut groups = BTreeMap::new();
        for field in form.fields() {
            let stored = submission.fields.get(&field.name);
            match (&field.kind, stored) {
                (FieldKind::List { .. }, Some(Value::Array(entries))) => {
                    groups.insert(field.name.clone(), RepeatableGroup::from_values(field, entries)?);
                }
                (FieldKind::List { .. }, _) => {
                    groups.insert(field.name.clone(), RepeatableGroup::from_values(field, &[])?);
                }
                (_, Some(value)) => {
                    values.insert(field.name.clone(), value.clone());
                }
                (_, None) => {
                    values.insert(field.name.clone(), field.blank_value());
                }
            }
        }
        let mut state = Self {
            form,
            submission_id: Some(submission.id),
            values,
            groups,
        };
        let cleared = state.settle();
        if !cleared.is_empty() {
            debug!(
                form = %kind,
                submission_id = %submission.id,
                cleared = ?cleared,
                "cleared stale hidden values on load"
            );
        }
        Ok(state)
    }

    pub fn kind(&self) -> FormKind {
        self.form.kind()
    }

    pub fn form(&self) -> &dyn IntakeForm {
        self.form.as_ref()
    }

    pub fn submission_id(&self) -> Option<Uuid> {
        self.submission_id
    }

    pub fn mode(&self) -> SubmitMode {
        match self.submission_id {
            Some(id) => SubmitMode::Update(id),
            None => SubmitMode::Create,
        }
    }

    /// Record that the form is now backed by a stored submission, so the
    /// next submit updates it instead of creating another.
    pub fn mark_saved(&mut self, submission: &Submission) {
        self.submission_id = Some(submission.id);
    }

    /// Current value at a dotted path (e.g. `alcohol.ever_used`).
    pub fn get(&self, path: &str) -> Option<Value> {
        let segments = path::parse(path);
        let (Segment::Key(first), rest) = segments.split_first()? else {
            return None;
        };
        if let Some(group) = self.groups.get(first) {
            return match rest.split_first() {
                None => Some(group.to_value()),
                Some((Segment::Index(i), after)) => {
                    let entry = Value::Object(group.get(*i)?.value().clone());
                    path::value_at(&entry, after).cloned()
                }
                Some(_) => None,
            };
        }
        let root = self.values.get(first)?;
        path::value_at(root, rest).cloned()
    }

    /// Set a scalar field and re-derive visibility. Returns the paths of
    /// fields whose values were cleared because they became hidden.
    pub fn set(&mut self, path: &str, value: Value) -> Result<Vec<String>, FormError> {
        if !matches!(value, Value::String(_) | Value::Null) {
            return Err(FormError::InvalidValue {
                path: path.to_string(),
            });
        }
        let segments = path::parse(path);
        let field = path::field_at(self.form.fields(), &segments)
            .ok_or_else(|| FormError::UnknownField(path.to_string()))?;
        if !matches!(
            field.kind,
            FieldKind::Text | FieldKind::Date | FieldKind::Choice { .. }
        ) {
            return Err(FormError::NotAScalar(path.to_string()));
        }

        let slot = self
            .slot_mut(&segments)
            .ok_or_else(|| FormError::UnknownField(path.to_string()))?;
        *slot = value;
        Ok(self.settle())
    }

    fn slot_mut(&mut self, segments: &[Segment]) -> Option<&mut Value> {
        let (Segment::Key(first), rest) = segments.split_first()? else {
            return None;
        };
        if let Some(group) = self.groups.get_mut(first) {
            let (Segment::Index(i), after) = rest.split_first()? else {
                return None;
            };
            let entry = group.get_mut(*i)?.value_mut();
            let (Segment::Key(key), after) = after.split_first()? else {
                return None;
            };
            let value = entry.get_mut(key)?;
            return path::value_at_mut(value, after);
        }
        let value = self.values.get_mut(first)?;
        path::value_at_mut(value, rest)
    }

    /// Whether the field at `path` is currently shown.
    pub fn is_visible(&self, path: &str) -> Result<bool, FormError> {
        let record = self.record();
        path::is_visible(self.form.fields(), &record, &path::parse(path))
            .ok_or_else(|| FormError::UnknownField(path.to_string()))
    }

    /// Visibility of every field, keyed by dotted path.
    pub fn visibility_map(&self) -> BTreeMap<String, bool> {
        visibility::visibility_map(self.form.fields(), &self.record())
    }

    pub fn group(&self, name: &str) -> Result<&RepeatableGroup, FormError> {
        self.groups.get(name).ok_or_else(|| self.not_a_group(name))
    }

    pub fn group_mut(&mut self, name: &str) -> Result<&mut RepeatableGroup, FormError> {
        if !self.groups.contains_key(name) {
            return Err(self.not_a_group(name));
        }
        self.groups
            .get_mut(name)
            .ok_or_else(|| FormError::NotAGroup(name.to_string()))
    }

    fn not_a_group(&self, name: &str) -> FormError {
        match find_field(self.form.fields(), name) {
            Some(_) => FormError::NotAGroup(name.to_string()),
            None => FormError::UnknownField(name.to_string()),
        }
    }

    /// Append a blank entry to a group. Returns the entry's key.
    pub fn append_entry(&mut self, group: &str) -> Result<u64, FormError> {
        let key = self.group_mut(group)?.append()?;
        self.settle();
        Ok(key)
    }

    /// Remove the entry at `index` from a group.
    pub fn remove_entry(&mut self, group: &str, index: usize) -> Result<Map<String, Value>, FormError> {
        let removed = self.group_mut(group)?.remove_at(index)?;
        self.settle();
        Ok(removed)
    }

    /// The full record: values merged with every group, in schema order
    /// of the underlying map.
    pub fn record(&self) -> Map<String, Value> {
        let mut record = self.values.clone();
        for (name, group) in &self.groups {
            record.insert(name.clone(), group.to_value());
        }
        record
    }

    /// The record as it would be sent to the backend: hidden fields cleared.
    pub fn payload(&self) -> Map<String, Value> {
        let mut record = self.record();
        visibility::apply(self.form.fields(), &mut record);
        record
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        self.form.validate(&self.payload())
    }

    /// Validate and return the payload to submit. Field errors are returned
    /// instead when the form is incomplete; nothing may be sent then.
    pub fn prepare_submit(&mut self) -> Result<Map<String, Value>, FormError> {
        self.settle();
        let payload = self.payload();
        let errors = validation::validate_record(self.form.fields(), &payload);
        if !errors.is_empty() {
            return Err(FormError::Validation(errors));
        }
        Ok(payload)
    }

    /// Clear hidden values in every scope. Returns the cleared paths.
    fn settle(&mut self) -> Vec<String> {
        let mut cleared = visibility::apply(self.form.fields(), &mut self.values);
        // Hidden list fields have no slot in `values`; drop the null marker.
        self.values.retain(|key, _| !self.groups.contains_key(key));
        for (name, group) in &mut self.groups {
            let fields = group.fields().to_vec();
            for (i, entry) in group.entries_mut().iter_mut().enumerate() {
                cleared.extend(visibility::apply_at(
                    &fields,
                    entry.value_mut(),
                    &format!("{name}.{i}"),
                ));
            }
        }
        cleared
    }
}
