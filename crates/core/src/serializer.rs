//! Folds form values back onto a copy of the schema they were generated
//! from. The schema itself is the save payload.

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::field_kind::strategy;
use crate::schema::details::{keys, IdType, SCALAR_KEYS};
use crate::schema::{CategoryAttributeSchema, CategoryDetailsSchema, FormSchema};
use crate::types::{FormValue, FormValueMap};
use crate::validation::details::is_fake_requested;

/// Serialize `values` onto a copy of `schema`.
///
/// The input schema is never mutated and the result shares nothing with
/// it. An absent schema yields [`CoreError::MissingSchema`], which callers
/// must handle before transmitting anything.
pub fn serialize<S: FormSchema>(
    schema: Option<&S>,
    values: &FormValueMap,
    config: &EngineConfig,
) -> Result<S, CoreError> {
    let schema = schema.ok_or(CoreError::MissingSchema { schema: S::NAME })?;
    Ok(schema.fold_values(values, config))
}

pub fn serialize_attributes(
    schema: Option<&CategoryAttributeSchema>,
    values: &FormValueMap,
    config: &EngineConfig,
) -> Result<CategoryAttributeSchema, CoreError> {
    serialize(schema, values, config)
}

pub fn serialize_details(
    schema: Option<&CategoryDetailsSchema>,
    values: &FormValueMap,
    config: &EngineConfig,
) -> Result<CategoryDetailsSchema, CoreError> {
    serialize(schema, values, config)
}

pub(crate) fn fold_attributes(
    schema: &CategoryAttributeSchema,
    values: &FormValueMap,
    config: &EngineConfig,
) -> CategoryAttributeSchema {
    let mut out = schema.clone();
    let mut filled = 0usize;

    for attribute in out.attributes_mut() {
        if config.is_excluded(attribute.id) {
            continue;
        }
        let key = attribute.field_key();
        let selection = match values.get(&key) {
            Some(value) if !value.is_blank() => strategy(&attribute.kind).serialize(attribute, value),
            _ => None,
        };
        if selection.is_some() {
            filled += 1;
        }
        // Unfilled fields become `{}` so every attribute has the same shape.
        attribute.value = selection.unwrap_or_default();
    }

    debug!(filled, "Serialized attribute values");
    out
}

/// Details fields are flat scalar slots: an empty or missing value is
/// written as `null`, not the `{}` used for attribute values.
pub(crate) fn fold_details(
    schema: &CategoryDetailsSchema,
    values: &FormValueMap,
    config: &EngineConfig,
) -> CategoryDetailsSchema {
    let mut out = schema.clone();
    let scalar = |key: &str| {
        values
            .get(key)
            .filter(|value| !value.is_blank())
            .and_then(FormValue::to_scalar_string)
    };

    for &key in SCALAR_KEYS {
        if let Some(slot) = out.slot_mut(key) {
            *slot = scalar(key);
        }
    }

    out.is_fake_product = is_fake_requested(values);
    if out.is_fake() {
        out.brand = Some(config.misc_brand_id.clone());
    } else {
        out.is_fake_product = false;
        out.fake_reason = None;
    }

    out.id_type = scalar(keys::ID_TYPE).as_deref().and_then(IdType::parse);
    match out.id_type {
        Some(IdType::General) => out.custom_id = None,
        Some(IdType::Custom) => out.general_mefa_id = None,
        None => {}
    }

    debug!(is_fake = out.is_fake_product, "Serialized details values");
    out
}
