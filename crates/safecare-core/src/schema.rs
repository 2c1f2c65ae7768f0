//! Declarative field schema shared by every intake form.
//!
//! A form is a list of [`FieldDef`]s. Scalars (text, date, choice) hold a
//! string or `null`; sections hold a nested object; lists hold a repeatable
//! group of uniform records. A field may declare a [`Condition`] on a
//! sibling in the same scope that decides whether it is shown.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// Shape of a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    Text,
    /// Calendar date, `YYYY-MM-DD`.
    Date,
    Choice {
        options: Vec<String>,
    },
    Section {
        fields: Vec<FieldDef>,
    },
    List {
        fields: Vec<FieldDef>,
        min_entries: u32,
        max_entries: Option<u32>,
        /// Blank entries a new form starts with.
        initial_entries: u32,
    },
}

/// Visibility condition evaluated against sibling values in the same scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "op", rename_all = "snake_case")]
#[ts(export)]
pub enum Condition {
    Equals { field: String, value: String },
    OneOf { field: String, values: Vec<String> },
}

impl Condition {
    pub fn equals(field: &str, value: &str) -> Self {
        Condition::Equals {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn one_of(field: &str, values: &[&str]) -> Self {
        Condition::OneOf {
            field: field.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Name of the sibling field this condition watches.
    pub fn controller(&self) -> &str {
        match self {
            Condition::Equals { field, .. } | Condition::OneOf { field, .. } => field,
        }
    }

    /// Whether the condition holds for the current values of `scope`.
    /// A missing or null controller never satisfies a condition.
    pub fn holds(&self, scope: &Map<String, Value>) -> bool {
        let Some(current) = scope.get(self.controller()).and_then(Value::as_str) else {
            return false;
        };
        match self {
            Condition::Equals { value, .. } => current == value,
            Condition::OneOf { values, .. } => values.iter().any(|v| v == current),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldDef {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    /// Required fields must be non-blank while visible.
    pub required: bool,
    pub visible_when: Option<Condition>,
}

impl FieldDef {
    fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: true,
            visible_when: None,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn date(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub fn choice(name: &str, label: &str, options: &[&str]) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Choice {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        )
    }

    pub fn section(name: &str, label: &str, fields: Vec<FieldDef>) -> Self {
        Self::new(name, label, FieldKind::Section { fields })
    }

    pub fn list(name: &str, label: &str, fields: Vec<FieldDef>) -> Self {
        Self::new(
            name,
            label,
            FieldKind::List {
                fields,
                min_entries: 0,
                max_entries: None,
                initial_entries: 0,
            },
        )
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn visible_when(mut self, condition: Condition) -> Self {
        self.visible_when = Some(condition);
        self
    }

    /// Lowest number of entries a list may shrink to. Raises
    /// `initial_entries` to match. No effect on non-list fields.
    pub fn min_entries(mut self, n: u32) -> Self {
        if let FieldKind::List {
            min_entries,
            initial_entries,
            ..
        } = &mut self.kind
        {
            *min_entries = n;
            *initial_entries = (*initial_entries).max(n);
        }
        self
    }

    pub fn max_entries(mut self, n: u32) -> Self {
        if let FieldKind::List { max_entries, .. } = &mut self.kind {
            *max_entries = Some(n);
        }
        self
    }

    pub fn initial_entries(mut self, n: u32) -> Self {
        if let FieldKind::List {
            initial_entries, ..
        } = &mut self.kind
        {
            *initial_entries = n;
        }
        self
    }

    pub fn is_conditional(&self) -> bool {
        self.visible_when.is_some()
    }

    /// Nested field definitions for sections and list entries.
    pub fn children(&self) -> Option<&[FieldDef]> {
        match &self.kind {
            FieldKind::Section { fields } | FieldKind::List { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Value of this field on a freshly opened form.
    pub fn blank_value(&self) -> Value {
        match &self.kind {
            FieldKind::Text | FieldKind::Date | FieldKind::Choice { .. } => {
                Value::String(String::new())
            }
            FieldKind::Section { fields } => Value::Object(blank_record(fields)),
            FieldKind::List {
                fields,
                initial_entries,
                ..
            } => Value::Array(
                (0..*initial_entries)
                    .map(|_| Value::Object(blank_record(fields)))
                    .collect(),
            ),
        }
    }
}

/// A blank record for a set of fields: empty strings for scalars, nested
/// blank objects for sections, `initial_entries` blank entries for lists.
pub fn blank_record(fields: &[FieldDef]) -> Map<String, Value> {
    fields
        .iter()
        .map(|f| (f.name.clone(), f.blank_value()))
        .collect()
}

/// Find a field definition by name within one scope.
pub fn find_field<'a>(fields: &'a [FieldDef], name: &str) -> Option<&'a FieldDef> {
    fields.iter().find(|f| f.name == name)
}
