//! Repeatable field groups.
//!
//! A group is an ordered list of structurally uniform records (e.g. the
//! tests on a drug screening form). Each entry carries a synthetic key that
//! is assigned on insertion and never changes with position, so a renderer
//! can keep per-entry widget state attached to the right record after
//! removals. Entries are never reordered implicitly.

use safecare_core::schema::{FieldDef, FieldKind, blank_record};
use serde_json::{Map, Value};

use crate::error::FormError;

#[derive(Debug, Clone, PartialEq)]
pub struct GroupEntry {
    key: u64,
    value: Map<String, Value>,
}

impl GroupEntry {
    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn value(&self) -> &Map<String, Value> {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.value
    }
}

#[derive(Debug, Clone)]
pub struct RepeatableGroup {
    name: String,
    fields: Vec<FieldDef>,
    entries: Vec<GroupEntry>,
    next_key: u64,
    min_entries: usize,
    max_entries: Option<usize>,
}

impl RepeatableGroup {
    /// A group holding the declared number of initial blank entries.
    pub fn blank(def: &FieldDef) -> Result<Self, FormError> {
        let mut group = Self::empty(def)?;
        let FieldKind::List {
            initial_entries, ..
        } = &def.kind
        else {
            return Err(FormError::NotAGroup(def.name.clone()));
        };
        for _ in 0..*initial_entries {
            group.push(blank_record(&group.fields));
        }
        Ok(group)
    }

    /// A group populated from stored entries, in stored order.
    pub fn from_values(def: &FieldDef, values: &[Value]) -> Result<Self, FormError> {
        let mut group = Self::empty(def)?;
        for (i, value) in values.iter().enumerate() {
            let Value::Object(entry) = value else {
                return Err(FormError::InvalidValue {
                    path: format!("{}.{i}", def.name),
                });
            };
            group.push(entry.clone());
        }
        Ok(group)
    }

    fn empty(def: &FieldDef) -> Result<Self, FormError> {
        let FieldKind::List {
            fields,
            min_entries,
            max_entries,
            ..
        } = &def.kind
        else {
            return Err(FormError::NotAGroup(def.name.clone()));
        };
        Ok(Self {
            name: def.name.clone(),
            fields: fields.clone(),
            entries: Vec::new(),
            next_key: 0,
            min_entries: *min_entries as usize,
            max_entries: max_entries.map(|m| m as usize),
        })
    }

    fn push(&mut self, value: Map<String, Value>) -> u64 {
        let key = self.next_key;
        self.next_key += 1;
        self.entries.push(GroupEntry { key, value });
        key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field definitions of a single entry.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[GroupEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [GroupEntry] {
        &mut self.entries
    }

    pub fn keys(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.key).collect()
    }

    pub fn get(&self, index: usize) -> Option<&GroupEntry> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut GroupEntry> {
        self.entries.get_mut(index)
    }

    /// Current index of the entry with `key`.
    pub fn position(&self, key: u64) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    pub fn can_append(&self) -> bool {
        self.max_entries.is_none_or(|max| self.entries.len() < max)
    }

    pub fn can_remove(&self) -> bool {
        self.entries.len() > self.min_entries
    }

    /// Append a blank entry. Returns its key.
    pub fn append(&mut self) -> Result<u64, FormError> {
        let blank = blank_record(&self.fields);
        self.append_with(blank)
    }

    pub fn append_with(&mut self, value: Map<String, Value>) -> Result<u64, FormError> {
        if let Some(max) = self.max_entries
            && self.entries.len() >= max
        {
            return Err(FormError::MaximumEntries {
                group: self.name.clone(),
                max,
            });
        }
        Ok(self.push(value))
    }

    /// Remove the entry at `index`, shifting later entries down by one.
    /// Returns the removed values.
    pub fn remove_at(&mut self, index: usize) -> Result<Map<String, Value>, FormError> {
        if index >= self.entries.len() {
            return Err(FormError::IndexOutOfRange {
                group: self.name.clone(),
                index,
                len: self.entries.len(),
            });
        }
        if !self.can_remove() {
            return Err(FormError::MinimumEntries {
                group: self.name.clone(),
                min: self.min_entries,
            });
        }
        Ok(self.entries.remove(index).value)
    }

    /// Remove the trailing entry, whichever entry's remove control was used.
    /// Prefer [`RepeatableGroup::remove_at`]; this exists for callers that
    /// only ever offer a single "remove" control at the end of the list.
    pub fn remove_last(&mut self) -> Result<Map<String, Value>, FormError> {
        match self.entries.len() {
            0 => Err(FormError::EmptyGroup(self.name.clone())),
            len => self.remove_at(len - 1),
        }
    }

    /// Entries as a JSON array, in display order.
    pub fn to_value(&self) -> Value {
        Value::Array(
            self.entries
                .iter()
                .map(|e| Value::Object(e.value.clone()))
                .collect(),
        )
    }
}
