//! Validation result and violation types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Why a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required field has no value.
    MissingRequiredField,
    /// A value is not in the field's declared option set.
    InvalidOptionSelected,
    /// A free-text value exceeds its length bound.
    TooLong,
    /// A value has the wrong shape for its field type.
    InvalidType,
}

/// A single field-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub kind: ViolationKind,
    pub message: String,
}

impl FieldViolation {
    pub fn missing(label: &str) -> Self {
        Self {
            kind: ViolationKind::MissingRequiredField,
            message: format!("وارد کردن «{label}» الزامی است"),
        }
    }

    pub fn invalid_option(label: &str, value: &str) -> Self {
        Self {
            kind: ViolationKind::InvalidOptionSelected,
            message: format!("گزینه «{value}» برای «{label}» معتبر نیست"),
        }
    }

    pub fn too_long(label: &str, max: usize) -> Self {
        Self {
            kind: ViolationKind::TooLong,
            message: format!("«{label}» نباید بیشتر از {max} کاراکتر باشد"),
        }
    }

    pub fn invalid_type(label: &str, expected: &str) -> Self {
        Self {
            kind: ViolationKind::InvalidType,
            message: format!("مقدار «{label}» باید {expected} باشد"),
        }
    }
}

/// Outcome of validating one form. Every failing field is listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<String, FieldViolation>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
        }
    }
}

impl ValidationResult {
    /// Record a failure. The first violation recorded for a key wins.
    pub fn push(&mut self, key: impl Into<String>, violation: FieldViolation) {
        self.is_valid = false;
        self.errors.entry(key.into()).or_insert(violation);
    }

    pub fn error_for(&self, key: &str) -> Option<&FieldViolation> {
        self.errors.get(key)
    }

    pub fn kind_for(&self, key: &str) -> Option<ViolationKind> {
        self.errors.get(key).map(|violation| violation.kind)
    }

    /// Field key -> message, the shape the host UI renders.
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|(key, violation)| (key.clone(), violation.message.clone()))
            .collect()
    }
}
