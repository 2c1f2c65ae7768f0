use safecare_core::schema::{FieldDef, FieldKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use ts_rs::TS;

use crate::path::join;
use crate::visibility;

/// A field-level validation failure, shown inline next to the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[error("{message}")]
#[ts(export)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. `tests.0.date_reviewed`).
    pub path: String,
    pub message: String,
}

/// A record that does not have the structure its form declares.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unexpected shape at '{path}': {reason}")]
pub struct ShapeError {
    pub path: String,
    pub reason: String,
}

/// Validate the visible fields of a record.
pub fn validate_record(fields: &[FieldDef], record: &Map<String, Value>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    validate_scope(fields, record, "", &mut errors);
    errors
}

fn validate_scope(fields: &[FieldDef], scope: &Map<String, Value>, prefix: &str, errors: &mut Vec<ValidationError>) {
    for field in fields {
        if !visibility::is_visible(field, scope) {
            continue;
        }
        let path = join(prefix, &field.name);
        let value = scope.get(&field.name);
        let mut fail = |message: String| {
            errors.push(ValidationError {
                path: path.clone(),
                message,
            })
        };

        match &field.kind {
            FieldKind::Text | FieldKind::Date | FieldKind::Choice { .. } => {
                let text = match value {
                    None | Some(Value::Null) => "",
                    Some(Value::String(s)) => s.trim(),
                    Some(_) => {
                        fail(format!("{} must be text", field.label));
                        continue;
                    }
                };
                if text.is_empty() {
                    if field.required {
                        fail(format!("{} is required", field.label));
                    }
                    continue;
                }
                match &field.kind {
                    FieldKind::Date if !is_iso_date(text) => {
                        fail(format!("{} must be a date (YYYY-MM-DD)", field.label));
                    }
                    FieldKind::Choice { options } if !options.iter().any(|o| o == text) => {
                        fail(format!("{} must be one of: {}", field.label, options.join(", ")));
                    }
                    _ => {}
                }
            }
            FieldKind::Section { fields } => match value {
                Some(Value::Object(inner)) => validate_scope(fields, inner, &path, errors),
                _ => fail(format!("{} is required", field.label)),
            },
            FieldKind::List {
                fields,
                min_entries,
                max_entries,
                ..
            } => {
                let entries = match value {
                    Some(Value::Array(entries)) => entries.as_slice(),
                    None | Some(Value::Null) => &[],
                    Some(_) => {
                        fail(format!("{} must be a list", field.label));
                        continue;
                    }
                };
                if entries.len() < *min_entries as usize {
                    fail(format!("{} requires at least {min_entries} entries", field.label));
                }
                if let Some(max) = max_entries
                    && entries.len() > *max as usize
                {
                    fail(format!("{} allows at most {max} entries", field.label));
                }
                for (i, entry) in entries.iter().enumerate() {
                    match entry {
                        Value::Object(inner) => {
                            validate_scope(fields, inner, &format!("{path}.{i}"), errors)
                        }
                        _ => errors.push(ValidationError {
                            path: format!("{path}.{i}"),
                            message: format!("{} entries must be records", field.label),
                        }),
                    }
                }
            }
        }
    }
}

/// Exactly `YYYY-MM-DD` naming a real calendar day. Compact dates and
/// datetimes are rejected.
fn is_iso_date(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && jiff::civil::Date::strptime("%Y-%m-%d", text).is_ok()
}

/// Check that every declared field is present with the declared JSON type.
/// Scalars may be a string or null; sections and lists may be null only
/// when they carry a visibility condition.
pub fn check_shape(fields: &[FieldDef], record: &Map<String, Value>) -> Result<(), ShapeError> {
    check_scope(fields, record, "")
}

fn check_scope(fields: &[FieldDef], scope: &Map<String, Value>, prefix: &str) -> Result<(), ShapeError> {
    for field in fields {
        let path = join(prefix, &field.name);
        let mismatch = |reason: &str| ShapeError {
            path: path.clone(),
            reason: reason.to_string(),
        };
        let Some(value) = scope.get(&field.name) else {
            return Err(mismatch("missing"));
        };
        match (&field.kind, value) {
            (FieldKind::Text | FieldKind::Date | FieldKind::Choice { .. }, Value::String(_) | Value::Null) => {}
            (FieldKind::Text | FieldKind::Date | FieldKind::Choice { .. }, _) => {
                return Err(mismatch("expected a string or null"));
            }
            (FieldKind::Section { .. } | FieldKind::List { .. }, Value::Null) if field.is_conditional() => {}
            (FieldKind::Section { fields }, Value::Object(inner)) => check_scope(fields, inner, &path)?,
            (FieldKind::Section { .. }, _) => return Err(mismatch("expected an object")),
            (FieldKind::List { fields, .. }, Value::Array(entries)) => {
                for (i, entry) in entries.iter().enumerate() {
                    let entry_path = format!("{path}.{i}");
                    let Value::Object(inner) = entry else {
                        return Err(ShapeError {
                            path: entry_path,
                            reason: "expected an object".to_string(),
                        });
                    };
                    check_scope(fields, inner, &entry_path)?;
                }
            }
            (FieldKind::List { .. }, _) => return Err(mismatch("expected a list")),
        }
    }
    Ok(())
}

/// Drop keys the form does not declare, at every level.
pub fn retain_declared(fields: &[FieldDef], record: &mut Map<String, Value>) {
    record.retain(|key, _| fields.iter().any(|f| &f.name == key));
    for field in fields {
        match (&field.kind, record.get_mut(&field.name)) {
            (FieldKind::Section { fields }, Some(Value::Object(inner))) => retain_declared(fields, inner),
            (FieldKind::List { fields, .. }, Some(Value::Array(entries))) => {
                for entry in entries {
                    if let Value::Object(inner) = entry {
                        retain_declared(fields, inner);
                    }
                }
            }
            _ => {}
        }
    }
}
