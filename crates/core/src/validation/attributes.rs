//! Rules for category attribute forms.

use super::result::{FieldViolation, ValidationResult};
use super::ValidationContext;
use crate::field_kind::strategy;
use crate::schema::attributes::{CategoryAttributeSchema, DIMENSION_KEYS, WEIGHT_KEY};
use crate::types::FormValueMap;

const DIMENSION_LABELS: [&str; 3] = ["طول بسته‌بندی", "عرض بسته‌بندی", "ارتفاع بسته‌بندی"];
const WEIGHT_LABEL: &str = "وزن بسته‌بندی";

pub(crate) fn check(
    schema: &CategoryAttributeSchema,
    values: &FormValueMap,
    ctx: &ValidationContext<'_>,
    result: &mut ValidationResult,
) {
    for attribute in schema.attributes() {
        if ctx.config.is_excluded(attribute.id) {
            continue;
        }
        let key = attribute.field_key();
        if let Some(violation) = strategy(&attribute.kind).check(attribute, values.get(&key), ctx) {
            result.push(key, violation);
        }
    }

    for (key, label) in DIMENSION_KEYS.iter().zip(DIMENSION_LABELS) {
        check_package_value(key, label, schema.dimensions_required, values, ctx, result);
    }
    check_package_value(WEIGHT_KEY, WEIGHT_LABEL, schema.weight_required, values, ctx, result);
}

/// Package measurements must be positive numbers when given.
fn check_package_value(
    key: &str,
    label: &str,
    required: bool,
    values: &FormValueMap,
    ctx: &ValidationContext<'_>,
    result: &mut ValidationResult,
) {
    match values.get(key).filter(|value| !value.is_blank()) {
        None => {
            if ctx.requires(required) {
                result.push(key, FieldViolation::missing(label));
            }
        }
        Some(value) => match value.as_number() {
            Some(n) if n.is_finite() && n > 0.0 => {}
            _ => result.push(key, FieldViolation::invalid_type(label, "عددی بزرگ‌تر از صفر")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::types::FormValue;
    use crate::validation::ViolationKind;
    use serde_json::json;

    fn schema() -> CategoryAttributeSchema {
        CategoryAttributeSchema::from_json(json!({
            "categoryGroupAttributes": {
                "1": { "attributes": {
                    "6477": {
                        "id": 6477, "title": "رنگ", "type": "select", "required": true,
                        "values": { "12": { "text": "قرمز" } }
                    },
                    "2233": { "id": 2233, "title": "قدیمی", "type": "input", "required": true }
                } }
            },
            "weightRequired": true
        }))
        .unwrap()
    }

    fn run(values: FormValueMap, strict: bool) -> ValidationResult {
        let config = EngineConfig::default();
        let ctx = ValidationContext { strict, config: &config };
        let mut result = ValidationResult::default();
        check(&schema(), &values, &ctx, &mut result);
        result
    }

    #[test]
    fn strict_reports_required_attributes_and_weight() {
        let result = run(FormValueMap::new(), true);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.kind_for("6477"), Some(ViolationKind::MissingRequiredField));
        assert_eq!(result.kind_for(WEIGHT_KEY), Some(ViolationKind::MissingRequiredField));
        assert!(result.error_for("2233").is_none());
    }

    #[test]
    fn lenient_skips_required_but_checks_membership() {
        assert!(run(FormValueMap::new(), false).is_valid);

        let values = FormValueMap::from([("6477".to_string(), FormValue::from("99"))]);
        let result = run(values, false);
        assert_eq!(result.kind_for("6477"), Some(ViolationKind::InvalidOptionSelected));
    }

    #[test]
    fn package_values_must_be_positive_numbers() {
        let values = FormValueMap::from([
            ("6477".to_string(), FormValue::from("12")),
            (WEIGHT_KEY.to_string(), FormValue::from("-3")),
            ("package_length".to_string(), FormValue::from("abc")),
            ("package_width".to_string(), FormValue::Number(20.0)),
        ]);
        let result = run(values, true);
        assert_eq!(result.kind_for(WEIGHT_KEY), Some(ViolationKind::InvalidType));
        assert_eq!(result.kind_for("package_length"), Some(ViolationKind::InvalidType));
        assert!(result.error_for("package_width").is_none());
        assert!(result.error_for("package_height").is_none());
    }
}
