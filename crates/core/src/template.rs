//! Template drafts: a reusable, category-scoped preset of attribute and/or
//! details values, built into the payload the "save template" call sends.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::schema::{CategoryAttributeSchema, CategoryDetailsSchema};
use crate::serializer;
use crate::types::FormValueMap;
use crate::validation::{BaseFields, ValidationResult, Validator};

#[derive(Debug, Clone)]
pub struct TemplateDraft {
    pub title: String,
    pub description: String,
    pub category_id: i64,
    pub attributes: Option<CategoryAttributeSchema>,
    pub details: Option<CategoryDetailsSchema>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePayload {
    pub title: String,
    pub description: String,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<CategoryAttributeSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<CategoryDetailsSchema>,
}

impl TemplateDraft {
    /// Lenient validation of everything the template carries: base fields
    /// plus option membership of whichever schemas are present.
    pub fn validate(
        &self,
        attribute_values: &FormValueMap,
        detail_values: &FormValueMap,
        config: &EngineConfig,
    ) -> ValidationResult {
        let mut result = ValidationResult::default();
        BaseFields::new(&self.title, &self.description).check(&mut result);

        let mut merge = |schema_result: ValidationResult| {
            for (key, violation) in schema_result.errors {
                result.push(key, violation);
            }
        };
        if let Some(schema) = &self.attributes {
            merge(Validator::new(Some(schema), false, config).validate(attribute_values));
        }
        if let Some(schema) = &self.details {
            merge(Validator::new(Some(schema), false, config).validate(detail_values));
        }
        result
    }

    pub fn build_payload(
        &self,
        attribute_values: &FormValueMap,
        detail_values: &FormValueMap,
        config: &EngineConfig,
    ) -> Result<TemplatePayload, CoreError> {
        if self.attributes.is_none() && self.details.is_none() {
            return Err(CoreError::MissingSchema {
                schema: "attributes or details",
            });
        }

        let result = self.validate(attribute_values, detail_values, config);
        if !result.is_valid {
            let summary = result
                .messages()
                .into_iter()
                .map(|(key, message)| format!("{key}: {message}"))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(CoreError::Validation(summary));
        }

        let attributes = self
            .attributes
            .as_ref()
            .map(|schema| serializer::serialize(Some(schema), attribute_values, config))
            .transpose()?;
        let details = self
            .details
            .as_ref()
            .map(|schema| serializer::serialize(Some(schema), detail_values, config))
            .transpose()?;

        tracing::info!(
            category_id = self.category_id,
            has_attributes = attributes.is_some(),
            has_details = details.is_some(),
            "Built template payload"
        );

        Ok(TemplatePayload {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            category_id: self.category_id,
            attributes,
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FormValue;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn draft(title: &str) -> TemplateDraft {
        TemplateDraft {
            title: title.to_string(),
            description: String::new(),
            category_id: 42,
            attributes: Some(
                CategoryAttributeSchema::from_json(json!({
                    "categoryGroupAttributes": { "1": { "attributes": {
                        "6477": { "id": 6477, "title": "رنگ", "type": "select", "required": true,
                                  "values": { "12": { "text": "قرمز" } } }
                    } } }
                }))
                .unwrap(),
            ),
            details: None,
        }
    }

    #[test]
    fn builds_payload_with_serialized_attributes() {
        let values = FormValueMap::from([("6477".to_string(), FormValue::from("12"))]);
        let payload = draft(" قالب قرمز ")
            .build_payload(&values, &FormValueMap::new(), &EngineConfig::default())
            .unwrap();

        assert_eq!(payload.title, "قالب قرمز");
        let encoded = serde_json::to_value(&payload).unwrap();
        assert_eq!(encoded["categoryId"], 42);
        assert_eq!(
            encoded["attributes"]["categoryGroupAttributes"]["1"]["attributes"]["6477"]["value"]["12"]["text"],
            "قرمز"
        );
        assert!(encoded.get("details").is_none());
    }

    #[test]
    fn template_editing_does_not_require_fields() {
        let payload = draft("قالب")
            .build_payload(&FormValueMap::new(), &FormValueMap::new(), &EngineConfig::default());
        assert!(payload.is_ok());
    }

    #[test]
    fn missing_title_rejected() {
        let err = draft("")
            .build_payload(&FormValueMap::new(), &FormValueMap::new(), &EngineConfig::default())
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("title"));
    }

    #[test]
    fn stale_option_rejected() {
        let values = FormValueMap::from([("6477".to_string(), FormValue::from("99"))]);
        let err = draft("قالب")
            .build_payload(&values, &FormValueMap::new(), &EngineConfig::default())
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("6477"));
    }

    #[test]
    fn no_schema_at_all_is_missing_schema() {
        let mut draft = draft("قالب");
        draft.attributes = None;
        let err = draft
            .build_payload(&FormValueMap::new(), &FormValueMap::new(), &EngineConfig::default())
            .unwrap_err();
        assert_matches!(err, CoreError::MissingSchema { .. });
    }
}
