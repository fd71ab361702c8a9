//! Per-type field behaviour.
//!
//! Default value, current-value extraction, validation and serialization
//! for each attribute type live together in one strategy object, so the
//! three concerns cannot drift apart as types evolve.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::schema::attributes::{Attribute, AttributeSelection, AttributeType, TextContent};
use crate::types::FormValue;
use crate::validation::{FieldViolation, ValidationContext};

pub trait FieldStrategy: Sync {
    /// Empty form value for a freshly selected category.
    fn default_value(&self) -> FormValue;

    /// The attribute's stored selection as a form value, if it has one.
    fn current_value(&self, attribute: &Attribute) -> Option<FormValue>;

    /// `value` is `None` when the key is absent from the form.
    fn check(
        &self,
        attribute: &Attribute,
        value: Option<&FormValue>,
        ctx: &ValidationContext<'_>,
    ) -> Option<FieldViolation>;

    /// Build the payload `value` for a non-blank form value. `None` means
    /// nothing usable was entered and the field falls back to empty.
    fn serialize(&self, attribute: &Attribute, value: &FormValue) -> Option<AttributeSelection>;
}

/// Strategy for an attribute type.
pub fn strategy(kind: &AttributeType) -> &'static dyn FieldStrategy {
    match kind {
        AttributeType::Select => &SelectField,
        AttributeType::Checkbox => &CheckboxField,
        AttributeType::Text | AttributeType::MultiText => &TextField,
        AttributeType::Input => &InputField,
        AttributeType::Other(_) => &FallbackField,
    }
}

struct SelectField;
struct CheckboxField;
struct TextField;
struct InputField;
struct FallbackField;

fn missing_if_required(attribute: &Attribute, ctx: &ValidationContext<'_>) -> Option<FieldViolation> {
    ctx.requires(attribute.required)
        .then(|| FieldViolation::missing(attribute.label()))
}

fn check_length(attribute: &Attribute, text: &str, ctx: &ValidationContext<'_>) -> Option<FieldViolation> {
    let max = ctx.config.max_text_length;
    (text.chars().count() > max).then(|| FieldViolation::too_long(attribute.label(), max))
}

fn present(value: Option<&FormValue>) -> Option<&FormValue> {
    value.filter(|value| !value.is_blank())
}

/// Input-style scalars travel as raw JSON strings or numbers.
fn raw_scalar(value: &FormValue) -> Option<AttributeSelection> {
    let raw = match value {
        FormValue::Text(s) => Value::String(s.clone()),
        FormValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Value::from(*n as i64),
        FormValue::Number(n) => Value::Number(serde_json::Number::from_f64(*n)?),
        FormValue::Bool(_) | FormValue::List(_) => return None,
    };
    Some(AttributeSelection::Raw(raw))
}

fn raw_current(selection: &AttributeSelection) -> Option<FormValue> {
    match selection {
        AttributeSelection::Raw(Value::String(s)) if !s.is_empty() => Some(FormValue::Text(s.clone())),
        AttributeSelection::Raw(Value::Number(n)) => n.as_f64().map(FormValue::Number),
        AttributeSelection::Text(content) if !content.original_text.is_empty() => {
            Some(FormValue::Text(content.original_text.clone()))
        }
        _ => None,
    }
}

impl FieldStrategy for SelectField {
    fn default_value(&self) -> FormValue {
        FormValue::empty_text()
    }

    fn current_value(&self, attribute: &Attribute) -> Option<FormValue> {
        match &attribute.value {
            AttributeSelection::Options(chosen) => {
                chosen.keys().next().map(|id| FormValue::Text(id.clone()))
            }
            _ => None,
        }
    }

    fn check(
        &self,
        attribute: &Attribute,
        value: Option<&FormValue>,
        ctx: &ValidationContext<'_>,
    ) -> Option<FieldViolation> {
        let Some(value) = present(value) else {
            return missing_if_required(attribute, ctx);
        };
        match value.to_scalar_string() {
            Some(id) if attribute.values.contains_key(&id) => None,
            Some(id) => Some(FieldViolation::invalid_option(attribute.label(), &id)),
            None => Some(FieldViolation::invalid_type(attribute.label(), "یک گزینه")),
        }
    }

    fn serialize(&self, attribute: &Attribute, value: &FormValue) -> Option<AttributeSelection> {
        let id = value.to_scalar_string()?;
        match attribute.values.get(&id) {
            Some(option) => Some(AttributeSelection::Options(BTreeMap::from([(
                id,
                option.clone(),
            )]))),
            None => {
                tracing::warn!(attribute_id = attribute.id, option_id = %id, "Dropping unknown option");
                None
            }
        }
    }
}

impl FieldStrategy for CheckboxField {
    fn default_value(&self) -> FormValue {
        FormValue::empty_list()
    }

    fn current_value(&self, attribute: &Attribute) -> Option<FormValue> {
        match &attribute.value {
            AttributeSelection::Options(chosen) if !chosen.is_empty() => {
                Some(FormValue::List(chosen.keys().cloned().collect()))
            }
            _ => None,
        }
    }

    fn check(
        &self,
        attribute: &Attribute,
        value: Option<&FormValue>,
        ctx: &ValidationContext<'_>,
    ) -> Option<FieldViolation> {
        let Some(value) = present(value) else {
            return missing_if_required(attribute, ctx);
        };
        let Some(ids) = value.as_list() else {
            return Some(FieldViolation::invalid_type(attribute.label(), "فهرستی از گزینه‌ها"));
        };
        ids.iter()
            .find(|id| !attribute.values.contains_key(id.as_str()))
            .map(|id| FieldViolation::invalid_option(attribute.label(), id))
    }

    fn serialize(&self, attribute: &Attribute, value: &FormValue) -> Option<AttributeSelection> {
        let ids = value.as_list()?;
        let mut chosen = BTreeMap::new();
        for id in ids {
            match attribute.values.get(id) {
                Some(option) => {
                    chosen.insert(id.clone(), option.clone());
                }
                None => {
                    tracing::warn!(attribute_id = attribute.id, option_id = %id, "Dropping unknown option");
                }
            }
        }
        (!chosen.is_empty()).then_some(AttributeSelection::Options(chosen))
    }
}

impl FieldStrategy for TextField {
    fn default_value(&self) -> FormValue {
        FormValue::empty_text()
    }

    fn current_value(&self, attribute: &Attribute) -> Option<FormValue> {
        raw_current(&attribute.value)
    }

    fn check(
        &self,
        attribute: &Attribute,
        value: Option<&FormValue>,
        ctx: &ValidationContext<'_>,
    ) -> Option<FieldViolation> {
        let Some(value) = present(value) else {
            return missing_if_required(attribute, ctx);
        };
        match value.to_scalar_string() {
            Some(text) => check_length(attribute, &text, ctx),
            None => Some(FieldViolation::invalid_type(attribute.label(), "متن")),
        }
    }

    fn serialize(&self, _attribute: &Attribute, value: &FormValue) -> Option<AttributeSelection> {
        let raw = value.to_scalar_string()?;
        Some(AttributeSelection::Text(TextContent::from_raw(&raw)))
    }
}

impl FieldStrategy for InputField {
    fn default_value(&self) -> FormValue {
        FormValue::empty_text()
    }

    fn current_value(&self, attribute: &Attribute) -> Option<FormValue> {
        raw_current(&attribute.value)
    }

    fn check(
        &self,
        attribute: &Attribute,
        value: Option<&FormValue>,
        ctx: &ValidationContext<'_>,
    ) -> Option<FieldViolation> {
        let Some(value) = present(value) else {
            return missing_if_required(attribute, ctx);
        };
        match value {
            FormValue::Text(text) => check_length(attribute, text, ctx),
            FormValue::Number(_) => None,
            FormValue::Bool(_) | FormValue::List(_) => {
                Some(FieldViolation::invalid_type(attribute.label(), "متن یا عدد"))
            }
        }
    }

    fn serialize(&self, _attribute: &Attribute, value: &FormValue) -> Option<AttributeSelection> {
        raw_scalar(value)
    }
}

/// Unlisted types: a required-if-required scalar.
impl FieldStrategy for FallbackField {
    fn default_value(&self) -> FormValue {
        FormValue::empty_text()
    }

    fn current_value(&self, attribute: &Attribute) -> Option<FormValue> {
        raw_current(&attribute.value)
    }

    fn check(
        &self,
        attribute: &Attribute,
        value: Option<&FormValue>,
        ctx: &ValidationContext<'_>,
    ) -> Option<FieldViolation> {
        let Some(value) = present(value) else {
            return missing_if_required(attribute, ctx);
        };
        match value {
            FormValue::Text(_) | FormValue::Number(_) => None,
            FormValue::Bool(_) | FormValue::List(_) => {
                Some(FieldViolation::invalid_type(attribute.label(), "متن یا عدد"))
            }
        }
    }

    fn serialize(&self, _attribute: &Attribute, value: &FormValue) -> Option<AttributeSelection> {
        raw_scalar(value)
    }
}
