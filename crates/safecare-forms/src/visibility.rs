//! Conditional visibility.
//!
//! Every field may carry a `visible_when` condition on a sibling in the
//! same scope (the enclosing object or list entry). Visibility is never
//! stored; it is derived from current values each time. A field that is
//! hidden has its value cleared to `null`, so stale answers are never
//! persisted or validated.

use std::collections::BTreeMap;

use safecare_core::schema::{FieldDef, FieldKind};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::path::join;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visibility {
    pub visible: bool,
    /// The field is hidden by its condition and its value must be cleared.
    pub clear_on_hide: bool,
}

/// Evaluate one field against the values of its scope.
pub fn evaluate(field: &FieldDef, scope: &Map<String, Value>) -> Visibility {
    match &field.visible_when {
        None => Visibility {
            visible: true,
            clear_on_hide: false,
        },
        Some(condition) => {
            let visible = condition.holds(scope);
            Visibility {
                visible,
                clear_on_hide: !visible,
            }
        }
    }
}

pub fn is_visible(field: &FieldDef, scope: &Map<String, Value>) -> bool {
    evaluate(field, scope).visible
}

/// Clear every hidden field in `record` to `null`, descending into sections
/// and every list entry. Returns the dotted paths whose non-null value was
/// cleared.
pub fn apply(fields: &[FieldDef], record: &mut Map<String, Value>) -> Vec<String> {
    apply_at(fields, record, "")
}

/// Like [`apply`], with reported paths prefixed by `prefix`.
pub fn apply_at(fields: &[FieldDef], record: &mut Map<String, Value>, prefix: &str) -> Vec<String> {
    let mut cleared = Vec::new();
    apply_scope(fields, record, prefix, &mut cleared);
    cleared
}

fn apply_scope(fields: &[FieldDef], scope: &mut Map<String, Value>, prefix: &str, cleared: &mut Vec<String>) {
    // Clearing a controller can hide its own dependents, so repeat until
    // nothing changes.
    loop {
        let mut changed = false;
        for field in fields {
            if !evaluate(field, scope).clear_on_hide {
                continue;
            }
            match scope.get(&field.name) {
                Some(Value::Null) => {}
                None => {
                    scope.insert(field.name.clone(), Value::Null);
                }
                Some(_) => {
                    scope.insert(field.name.clone(), Value::Null);
                    cleared.push(join(prefix, &field.name));
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    for field in fields {
        if !is_visible(field, scope) {
            continue;
        }
        let path = join(prefix, &field.name);
        match (&field.kind, scope.get_mut(&field.name)) {
            (FieldKind::Section { fields }, Some(Value::Object(inner))) => {
                apply_scope(fields, inner, &path, cleared);
            }
            (FieldKind::List { fields, .. }, Some(Value::Array(entries))) => {
                for (i, entry) in entries.iter_mut().enumerate() {
                    if let Value::Object(inner) = entry {
                        apply_scope(fields, inner, &format!("{path}.{i}"), cleared);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Visibility of every field in `record`, keyed by dotted path. Fields
/// inside a hidden section or list are omitted.
pub fn visibility_map(fields: &[FieldDef], record: &Map<String, Value>) -> BTreeMap<String, bool> {
    let mut map = BTreeMap::new();
    collect(fields, record, "", &mut map);
    map
}

fn collect(fields: &[FieldDef], scope: &Map<String, Value>, prefix: &str, map: &mut BTreeMap<String, bool>) {
    for field in fields {
        let path = join(prefix, &field.name);
        let visible = is_visible(field, scope);
        map.insert(path.clone(), visible);
        if !visible {
            continue;
        }
        match (&field.kind, scope.get(&field.name)) {
            (FieldKind::Section { fields }, Some(Value::Object(inner))) => {
                collect(fields, inner, &path, map);
            }
            (FieldKind::List { fields, .. }, Some(Value::Array(entries))) => {
                for (i, entry) in entries.iter().enumerate() {
                    if let Value::Object(inner) = entry {
                        collect(fields, inner, &format!("{path}.{i}"), map);
                    }
                }
            }
            _ => {}
        }
    }
}
