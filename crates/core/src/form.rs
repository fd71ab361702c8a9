//! In-memory store for the form currently being edited.
//!
//! Updates never touch the previous map: each operation returns a new
//! store, so a caller holding an older snapshot keeps seeing it unchanged.

use crate::schema::FormSchema;
use crate::types::{FormValue, FormValueMap};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormStore {
    values: FormValueMap,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: FormValueMap) -> Self {
        Self { values }
    }

    /// Start editing a saved schema: its stored selections first, then
    /// defaults for everything else.
    pub fn for_saved<S: FormSchema>(schema: &S) -> Self {
        Self::from_values(schema.current_values()).load_from_schema(schema)
    }

    pub fn values(&self) -> &FormValueMap {
        &self.values
    }

    pub fn into_values(self) -> FormValueMap {
        self.values
    }

    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.values.get(key)
    }

    pub fn set_field(&self, key: impl Into<String>, value: FormValue) -> Self {
        let mut values = self.values.clone();
        values.insert(key.into(), value);
        Self { values }
    }

    /// Drop a key, returning it to "undefined".
    pub fn remove_field(&self, key: &str) -> Self {
        let mut values = self.values.clone();
        values.remove(key);
        Self { values }
    }

    /// Seed a default for every schema field not already present.
    pub fn load_from_schema<S: FormSchema>(&self, schema: &S) -> Self {
        Self::from_values(seed_defaults(schema, &self.values))
    }

    /// Back to the schema's empty defaults.
    pub fn reset<S: FormSchema>(&self, schema: &S) -> Self {
        Self::from_values(schema.default_values())
    }
}

/// Additive seeding: existing keys, including ones the schema does not
/// know, are kept as they are.
pub fn seed_defaults<S: FormSchema>(schema: &S, current: &FormValueMap) -> FormValueMap {
    let mut values = current.clone();
    for (key, default) in schema.default_values() {
        values.entry(key).or_insert(default);
    }
    values
}
