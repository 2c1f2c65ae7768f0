//! Dotted field paths such as `alcohol.date_last_used` or
//! `tests.0.date_reviewed`. Numeric segments index into lists.

use safecare_core::schema::{FieldDef, FieldKind, find_field};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

pub fn parse(path: &str) -> Vec<Segment> {
    path.split('.')
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<usize>() {
            Ok(i) => Segment::Index(i),
            Err(_) => Segment::Key(s.to_string()),
        })
        .collect()
}

pub fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Resolve the field definition a path points at, checking that every
/// segment agrees with the schema (keys name fields, indices follow lists).
pub fn field_at<'a>(fields: &'a [FieldDef], segments: &[Segment]) -> Option<&'a FieldDef> {
    let (Segment::Key(first), rest) = segments.split_first()? else {
        return None;
    };
    let field = find_field(fields, first)?;
    match (rest.split_first(), &field.kind) {
        (None, _) => Some(field),
        (Some((Segment::Key(_), _)), FieldKind::Section { fields }) => field_at(fields, rest),
        (Some((Segment::Index(_), after)), FieldKind::List { fields, .. }) if !after.is_empty() => {
            field_at(fields, after)
        }
        _ => None,
    }
}

pub fn value_at<'a>(value: &'a Value, segments: &[Segment]) -> Option<&'a Value> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(value);
    };
    let next = match (first, value) {
        (Segment::Key(k), Value::Object(m)) => m.get(k)?,
        (Segment::Index(i), Value::Array(a)) => a.get(*i)?,
        _ => return None,
    };
    value_at(next, rest)
}

pub fn value_at_mut<'a>(value: &'a mut Value, segments: &[Segment]) -> Option<&'a mut Value> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(value);
    };
    let next = match (first, value) {
        (Segment::Key(k), Value::Object(m)) => m.get_mut(k)?,
        (Segment::Index(i), Value::Array(a)) => a.get_mut(*i)?,
        _ => return None,
    };
    value_at_mut(next, rest)
}

/// Walk a path through schema and record together. Returns `false` as soon
/// as the field itself or any enclosing section or list is hidden by its
/// condition. `None` when the path does not resolve.
pub fn is_visible(fields: &[FieldDef], scope: &Map<String, Value>, segments: &[Segment]) -> Option<bool> {
    let (Segment::Key(first), rest) = segments.split_first()? else {
        return None;
    };
    let field = find_field(fields, first)?;
    if let Some(condition) = &field.visible_when
        && !condition.holds(scope)
    {
        return Some(false);
    }
    match (rest.split_first(), &field.kind) {
        (None, _) => Some(true),
        (Some((Segment::Key(_), _)), FieldKind::Section { fields }) => {
            let inner = scope.get(first)?.as_object()?;
            is_visible(fields, inner, rest)
        }
        (Some((Segment::Index(i), after)), FieldKind::List { fields, .. }) if !after.is_empty() => {
            let entry = scope.get(first)?.as_array()?.get(*i)?.as_object()?;
            is_visible(fields, entry, after)
        }
        _ => None,
    }
}
