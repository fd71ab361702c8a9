//! Rules for category details forms, including the cross-field
//! counterfeit and product-identifier rules.

use super::result::{FieldViolation, ValidationResult};
use super::ValidationContext;
use crate::schema::details::{keys, CategoryDetailsSchema, IdType, OPTION_FIELDS};
use crate::types::{FormValue, FormValueMap};

const MODEL_LABEL: &str = "مدل";
const ID_TYPE_LABEL: &str = "نوع شناسه کالا";
const GENERAL_MEFA_LABEL: &str = "شناسه عمومی";
const CUSTOM_ID_LABEL: &str = "شناسه اختصاصی";
const IS_FAKE_LABEL: &str = "کالای غیراصل";

pub(crate) fn check(
    schema: &CategoryDetailsSchema,
    values: &FormValueMap,
    ctx: &ValidationContext<'_>,
    result: &mut ValidationResult,
) {
    let bind = &schema.bind;
    let is_fake = bind.allow_fake && is_fake_requested(values);

    if let Some(flag) = values.get(keys::IS_FAKE_PRODUCT) {
        if flag.as_bool().is_none() && !flag.is_blank() {
            result.push(
                keys::IS_FAKE_PRODUCT,
                FieldViolation::invalid_type(IS_FAKE_LABEL, "بله یا خیر"),
            );
        }
    }

    // A counterfeit product's brand is fixed upstream, not user input.
    if !is_fake {
        check_option(schema, values, keys::BRAND, true, ctx, result);
    }
    check_option(schema, values, keys::STATUS, true, ctx, result);
    check_option(schema, values, keys::PLATFORM, !bind.platforms.is_empty(), ctx, result);
    check_option(
        schema,
        values,
        keys::PRODUCT_CLASS,
        !bind.product_classes.is_empty(),
        ctx,
        result,
    );
    check_option(
        schema,
        values,
        keys::CATEGORY_PRODUCT_TYPE,
        !bind.category_product_types.is_empty(),
        ctx,
        result,
    );
    check_option(
        schema,
        values,
        keys::THEME,
        bind.show_colors && !bind.themes.is_empty(),
        ctx,
        result,
    );
    if is_fake {
        check_option(schema, values, keys::FAKE_REASON, true, ctx, result);
    }

    if let Some(model) = present(values, keys::MODEL).and_then(FormValue::to_scalar_string) {
        if model.chars().count() > ctx.config.max_text_length {
            result.push(
                keys::MODEL,
                FieldViolation::too_long(MODEL_LABEL, ctx.config.max_text_length),
            );
        }
    }

    check_identifier(schema, values, ctx, result);
}

pub(crate) fn is_fake_requested(values: &FormValueMap) -> bool {
    values
        .get(keys::IS_FAKE_PRODUCT)
        .and_then(FormValue::as_bool)
        .unwrap_or(false)
}

fn present<'v>(values: &'v FormValueMap, key: &str) -> Option<&'v FormValue> {
    values.get(key).filter(|value| !value.is_blank())
}

fn label_for(key: &str) -> &'static str {
    OPTION_FIELDS
        .iter()
        .find(|(field, _)| *field == key)
        .map(|(_, label)| *label)
        .unwrap_or("این فیلد")
}

/// Present values must be ids from the matching `bind` list.
fn check_option(
    schema: &CategoryDetailsSchema,
    values: &FormValueMap,
    key: &str,
    required: bool,
    ctx: &ValidationContext<'_>,
    result: &mut ValidationResult,
) {
    let label = label_for(key);
    match present(values, key) {
        None => {
            if ctx.requires(required) {
                result.push(key, FieldViolation::missing(label));
            }
        }
        Some(value) => match value.to_scalar_string() {
            Some(id) if schema.bind.has_option(key, &id) => {}
            Some(id) => result.push(key, FieldViolation::invalid_option(label, &id)),
            None => result.push(key, FieldViolation::invalid_type(label, "یک گزینه")),
        },
    }
}

/// `id_type` picks which of `general_mefa_id` / `custom_id` is required.
fn check_identifier(
    schema: &CategoryDetailsSchema,
    values: &FormValueMap,
    ctx: &ValidationContext<'_>,
    result: &mut ValidationResult,
) {
    let id_type = match present(values, keys::ID_TYPE) {
        None => {
            if ctx.strict {
                result.push(keys::ID_TYPE, FieldViolation::missing(ID_TYPE_LABEL));
            }
            None
        }
        Some(value) => {
            let raw = value.to_scalar_string().unwrap_or_default();
            let parsed = IdType::parse(&raw);
            if parsed.is_none() {
                result.push(keys::ID_TYPE, FieldViolation::invalid_option(ID_TYPE_LABEL, &raw));
            }
            parsed
        }
    };

    match id_type {
        Some(IdType::General) => match present(values, keys::GENERAL_MEFA_ID) {
            None => {
                if ctx.strict {
                    result.push(keys::GENERAL_MEFA_ID, FieldViolation::missing(GENERAL_MEFA_LABEL));
                }
            }
            Some(value) => {
                let id = value.to_scalar_string().unwrap_or_default();
                if !schema.bind.general_mefa.contains_key(&id) {
                    result.push(
                        keys::GENERAL_MEFA_ID,
                        FieldViolation::invalid_option(GENERAL_MEFA_LABEL, &id),
                    );
                }
            }
        },
        Some(IdType::Custom) => match present(values, keys::CUSTOM_ID) {
            None => {
                if ctx.strict {
                    result.push(keys::CUSTOM_ID, FieldViolation::missing(CUSTOM_ID_LABEL));
                }
            }
            Some(value) => {
                let custom = value.to_scalar_string().unwrap_or_default();
                if custom.chars().count() > ctx.config.max_text_length {
                    result.push(
                        keys::CUSTOM_ID,
                        FieldViolation::too_long(CUSTOM_ID_LABEL, ctx.config.max_text_length),
                    );
                }
            }
        },
        None => {}
    }
}
