//! End-to-end checks of the engine's documented guarantees: round-trip
//! stability, non-mutation, complete error collection, option integrity,
//! conditional rules, text handling, badge parsing and the excluded field.

mod common;

use assert_matches::assert_matches;
use serde_json::json;

use common::{attribute_schema, details_schema, list, values};
use hoshmarket_core::badge::parse_title;
use hoshmarket_core::form::seed_defaults;
use hoshmarket_core::schema::{AttributeSelection, TextContent};
use hoshmarket_core::serializer::{serialize_attributes, serialize_details};
use hoshmarket_core::validation::ViolationKind;
use hoshmarket_core::{
    CategoryAttributeSchema, CoreError, EngineConfig, FormSchema, FormValue, FormValueMap,
    Validator,
};

fn filled_values() -> FormValueMap {
    values(&[
        ("6477", FormValue::from("12")),
        ("size", list(&["s1", "s2"])),
        ("features", FormValue::from("ضدآب\n\nسبک\n")),
        ("21", FormValue::Number(250.0)),
        ("2233", FormValue::from("باید نادیده گرفته شود")),
    ])
}

fn value_of<'a>(schema: &'a CategoryAttributeSchema, key: &str) -> &'a AttributeSelection {
    &schema.find_by_key(key).expect("attribute exists").value
}

// ---------------------------------------------------------------------------
// Round trip and non-mutation
// ---------------------------------------------------------------------------

#[test]
fn serialization_is_idempotent() {
    let config = EngineConfig::default();
    let schema = attribute_schema();
    let seeded = seed_defaults(&schema, &filled_values());

    let first = serialize_attributes(Some(&schema), &seeded, &config).unwrap();
    let second = serialize_attributes(Some(&schema), &seeded, &config).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    // Re-editing the serialized payload and saving again changes nothing.
    let reloaded = seed_defaults(&first, &first.current_values());
    let third = serialize_attributes(Some(&first), &reloaded, &config).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&third).unwrap()
    );
}

#[test]
fn details_serialization_is_idempotent() {
    let config = EngineConfig::default();
    let schema = details_schema();
    let form = values(&[
        ("brand", FormValue::from("5")),
        ("status", FormValue::from("new")),
        ("id_type", FormValue::from("general")),
        ("general_mefa_id", FormValue::from("3")),
    ]);

    let first = serialize_details(Some(&schema), &seed_defaults(&schema, &form), &config).unwrap();
    let reloaded = seed_defaults(&first, &first.current_values());
    let second = serialize_details(Some(&first), &reloaded, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn serialization_never_mutates_the_source_schema() {
    let schema = attribute_schema();
    let snapshot = serde_json::to_value(&schema).unwrap();

    let out = serialize_attributes(Some(&schema), &filled_values(), &EngineConfig::default())
        .unwrap();

    assert_eq!(serde_json::to_value(&schema).unwrap(), snapshot);
    assert_ne!(out, schema);
    assert!(!std::ptr::eq(&out, &schema));
}

#[test]
fn serialization_without_schema_is_a_sentinel() {
    let err = serialize_attributes(None, &filled_values(), &EngineConfig::default()).unwrap_err();
    assert_matches!(err, CoreError::MissingSchema { schema: "attributes" });
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn every_required_field_is_reported() {
    let config = EngineConfig::default();
    let schema = attribute_schema();
    let result = Validator::new(Some(&schema), true, &config).validate(&FormValueMap::new());

    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 3);
    for key in ["6477", "size", "features"] {
        assert_eq!(result.kind_for(key), Some(ViolationKind::MissingRequiredField), "{key}");
    }
}

#[test]
fn ghost_option_is_invalid_not_missing() {
    let config = EngineConfig::default();
    let schema = attribute_schema();
    let result = Validator::new(Some(&schema), true, &config)
        .validate(&values(&[("6477", FormValue::from("ghost-id"))]));

    assert_eq!(result.kind_for("6477"), Some(ViolationKind::InvalidOptionSelected));
}

#[test]
fn required_checkbox_needs_one_valid_id() {
    let config = EngineConfig::default();
    let schema = attribute_schema();
    let validator = Validator::new(Some(&schema), true, &config);

    let empty = validator.validate(&values(&[("size", list(&[]))]));
    assert_eq!(empty.kind_for("size"), Some(ViolationKind::MissingRequiredField));

    let chosen = validator.validate(&values(&[("size", list(&["s1"]))]));
    assert!(chosen.error_for("size").is_none());
}

#[test]
fn fake_product_flag_controls_brand_requirement() {
    let config = EngineConfig::default();
    let schema = details_schema();
    let validator = Validator::new(Some(&schema), true, &config);
    let base = [
        ("brand", FormValue::from("")),
        ("status", FormValue::from("new")),
        ("id_type", FormValue::from("general")),
        ("general_mefa_id", FormValue::from("3")),
        ("fake_reason", FormValue::from("r1")),
    ];

    let mut fake = values(&base);
    fake.insert("is_fake_product".into(), FormValue::Bool(true));
    assert!(validator.validate(&fake).is_valid);

    let mut genuine = values(&base);
    genuine.insert("is_fake_product".into(), FormValue::Bool(false));
    let result = validator.validate(&genuine);
    assert_eq!(result.kind_for("brand"), Some(ViolationKind::MissingRequiredField));
}

#[test]
fn excluded_attribute_is_never_validated_or_serialized() {
    let config = EngineConfig::default();
    let schema = attribute_schema();

    let result = Validator::new(Some(&schema), true, &config).validate(&FormValueMap::new());
    assert!(result.error_for("2233").is_none());

    let out = serialize_attributes(Some(&schema), &filled_values(), &config).unwrap();
    assert_eq!(value_of(&out, "2233"), &AttributeSelection::Raw(json!("دست‌نخورده")));
}

#[test]
fn excluded_ids_are_configurable() {
    let config = EngineConfig {
        excluded_attribute_ids: Default::default(),
        ..EngineConfig::default()
    };
    let schema = attribute_schema();
    let result = Validator::new(Some(&schema), true, &config).validate(&FormValueMap::new());
    assert_eq!(result.kind_for("2233"), Some(ViolationKind::MissingRequiredField));
}

// ---------------------------------------------------------------------------
// Serialization shapes
// ---------------------------------------------------------------------------

#[test]
fn text_lines_drop_blanks_but_original_is_exact() {
    let schema = attribute_schema();
    let out = serialize_attributes(
        Some(&schema),
        &values(&[("30", FormValue::from("a\n\nb\n"))]),
        &EngineConfig::default(),
    )
    .unwrap();

    assert_eq!(
        value_of(&out, "30"),
        &AttributeSelection::Text(TextContent {
            text_lines: vec!["a".into(), "b".into()],
            original_text: "a\n\nb\n".into(),
        })
    );
}

#[test]
fn filled_and_unfilled_fields_share_one_shape() {
    let schema = attribute_schema();
    let out = serialize_attributes(
        Some(&schema),
        &values(&[("6477", FormValue::from("13"))]),
        &EngineConfig::default(),
    )
    .unwrap();
    let encoded = serde_json::to_value(&out).unwrap();
    let group = &encoded["categoryGroupAttributes"];

    assert_eq!(
        group["1"]["attributes"]["6477"]["value"],
        json!({ "13": { "text": "آبی", "code": "blue", "selected": false } })
    );
    assert_eq!(group["1"]["attributes"]["11"]["value"], json!({}));
    assert_eq!(group["2"]["attributes"]["21"]["value"], json!({}));
}

// ---------------------------------------------------------------------------
// Badge parsing
// ---------------------------------------------------------------------------

#[test]
fn badge_full_match() {
    let schema = attribute_schema();
    let parse = parse_title(r#"رنگ {"6477":"قرمز"}"#, Some(&schema), None);

    assert_eq!(parse.parsed_text, "رنگ {6477}");
    assert_eq!(parse.selected_badges.get("6477").map(String::as_str), Some("12"));
    assert_eq!(parse.selected_badges_labels.get("6477").map(String::as_str), Some("قرمز"));
}

#[test]
fn badge_partial_match_keeps_suggested_label() {
    let schema = attribute_schema();
    let parse = parse_title(r#"رنگ {"6477":"سبز"}"#, Some(&schema), None);

    assert_eq!(parse.parsed_text, "رنگ {6477}");
    assert_eq!(parse.selected_badges.get("6477").map(String::as_str), Some(""));
    assert_eq!(parse.selected_badges_labels.get("6477").map(String::as_str), Some("سبز"));
}

#[test]
fn badge_malformed_token_is_untouched() {
    let schema = attribute_schema();
    let title = "قاب {not valid json";
    let parse = parse_title(title, Some(&schema), Some(&details_schema()));

    assert_eq!(parse.parsed_text, title);
    assert!(parse.selected_badges.is_empty());
    assert!(parse.selected_badges_labels.is_empty());
}

#[test]
fn badge_output_serializes_in_camel_case() {
    let parse = parse_title(r#"{"برند":"سامسونگ"}"#, None, Some(&details_schema()));
    let encoded = serde_json::to_value(&parse).unwrap();
    assert_eq!(encoded["parsedText"], "{brand}");
    assert_eq!(encoded["selectedBadges"]["brand"], "5");
    assert_eq!(encoded["selectedBadgesLabels"]["brand"], "سامسونگ");
}
