//! The editing screen's lifecycle: pick a category, fill the form through
//! the store, validate on every change, then save as product or template.

mod common;

use common::{attribute_schema, details_schema, list};
use hoshmarket_core::serializer::serialize_attributes;
use hoshmarket_core::template::TemplateDraft;
use hoshmarket_core::validation::ViolationKind;
use hoshmarket_core::{EngineConfig, FormStore, FormValue, Validator};

#[test]
fn fill_validate_and_serialize_a_product_form() {
    let config = EngineConfig::default();
    let schema = attribute_schema();
    let validator = Validator::new(Some(&schema), true, &config);

    let mut store = FormStore::new().load_from_schema(&schema);
    assert_eq!(validator.validate(store.values()).errors.len(), 3);

    store = store.set_field("6477", FormValue::from("12"));
    assert_eq!(validator.validate(store.values()).errors.len(), 2);

    store = store
        .set_field("size", list(&["s2"]))
        .set_field("features", FormValue::from("سبک"));
    let result = validator.validate(store.values());
    assert!(result.is_valid, "unexpected errors: {:?}", result.messages());

    let payload = serialize_attributes(Some(&schema), store.values(), &config).unwrap();
    let reopened = FormStore::for_saved(&payload);
    assert_eq!(reopened.get("6477"), Some(&FormValue::from("12")));
    assert_eq!(reopened.get("size"), Some(&list(&["s2"])));
    assert_eq!(reopened.get("features"), Some(&FormValue::from("سبک")));
}

#[test]
fn switching_to_a_stale_option_is_caught_immediately() {
    let config = EngineConfig::default();
    let schema = attribute_schema();
    let validator = Validator::new(Some(&schema), false, &config);

    let store = FormStore::new()
        .load_from_schema(&schema)
        .set_field("size", list(&["s1", "s9"]));
    let result = validator.validate(store.values());
    assert_eq!(result.kind_for("size"), Some(ViolationKind::InvalidOptionSelected));
}

#[test]
fn product_form_can_also_check_base_fields() {
    let config = EngineConfig::default();
    let schema = attribute_schema();
    let store = FormStore::new()
        .load_from_schema(&schema)
        .set_field("6477", FormValue::from("12"))
        .set_field("size", list(&["s1"]))
        .set_field("features", FormValue::from("سبک"));

    let result = Validator::new(Some(&schema), true, &config)
        .with_base_fields()
        .validate(store.values());
    assert_eq!(result.kind_for("title"), Some(ViolationKind::MissingRequiredField));
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn template_with_both_schemas() {
    let config = EngineConfig::default();
    let details = details_schema();
    let draft = TemplateDraft {
        title: "قالب گوشی سامسونگ".into(),
        description: "برای همه مدل‌ها".into(),
        category_id: 7,
        attributes: Some(attribute_schema()),
        details: Some(details.clone()),
    };

    let attribute_values = FormStore::new()
        .load_from_schema(draft.attributes.as_ref().unwrap())
        .set_field("6477", FormValue::from("13"))
        .into_values();
    let detail_values = FormStore::new()
        .load_from_schema(&details)
        .set_field("brand", FormValue::from("5"))
        .into_values();

    let payload = draft
        .build_payload(&attribute_values, &detail_values, &config)
        .expect("template is valid");
    assert_eq!(payload.details.unwrap().brand.as_deref(), Some("5"));
    assert!(payload.attributes.is_some());
}
