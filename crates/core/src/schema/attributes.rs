//! Category attribute schema: grouped, typed, selectable product fields.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::FormSchema;
use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::field_kind::strategy;
use crate::serializer;
use crate::types::{FormValue, FormValueMap};
use crate::validation::{self, ValidationContext, ValidationResult};

/// Form keys for the package dimension fields.
pub const DIMENSION_KEYS: [&str; 3] = ["package_length", "package_width", "package_height"];

/// Form key for the package weight field.
pub const WEIGHT_KEY: &str = "package_weight";

/// One category's selectable product attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAttributeSchema {
    /// Group id -> group.
    #[serde(default)]
    pub category_group_attributes: BTreeMap<String, AttributeGroup>,
    #[serde(default)]
    pub dimensions_required: bool,
    #[serde(default)]
    pub weight_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_postfix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_postfix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Attribute id -> attribute.
    #[serde(default)]
    pub attributes: BTreeMap<String, Attribute>,
}

/// One configurable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postfix: Option<String>,
    /// Option id -> option. The full universe for select/checkbox fields.
    #[serde(default)]
    pub values: BTreeMap<String, AttributeValue>,
    /// The current selection; its shape depends on `kind`.
    #[serde(default)]
    pub value: AttributeSelection,
}

/// Field type tag. Tags this engine does not know are kept verbatim so
/// they survive serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttributeType {
    Input,
    Select,
    Checkbox,
    Text,
    MultiText,
    Other(String),
}

impl AttributeType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Input => "input",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Text => "text",
            Self::MultiText => "multi_text",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for AttributeType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "input" => Self::Input,
            "select" => Self::Select,
            "checkbox" => Self::Checkbox,
            "text" => Self::Text,
            "multi_text" => Self::MultiText,
            _ => Self::Other(tag),
        }
    }
}

impl From<AttributeType> for String {
    fn from(kind: AttributeType) -> Self {
        match kind {
            AttributeType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub selected: bool,
}

/// Free-text content as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub text_lines: Vec<String>,
    pub original_text: String,
}

impl TextContent {
    /// Split on newlines and drop blank lines; `original_text` keeps the
    /// input exactly as typed.
    pub fn from_raw(raw: &str) -> Self {
        Self {
            text_lines: raw
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect(),
            original_text: raw.to_string(),
        }
    }
}

/// An attribute's `value`.
///
/// - select / checkbox: chosen option id -> option
/// - text / multi_text: [`TextContent`]
/// - input: raw string or number
///
/// The empty state serializes as `{}` for every type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeSelection {
    Text(TextContent),
    Options(BTreeMap<String, AttributeValue>),
    Raw(serde_json::Value),
}

impl Default for AttributeSelection {
    fn default() -> Self {
        Self::Options(BTreeMap::new())
    }
}

impl AttributeSelection {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Options(chosen) => chosen.is_empty(),
            Self::Text(content) => {
                content.text_lines.is_empty() && content.original_text.is_empty()
            }
            Self::Raw(serde_json::Value::Null) => true,
            Self::Raw(serde_json::Value::String(s)) => s.is_empty(),
            Self::Raw(serde_json::Value::Array(items)) => items.is_empty(),
            Self::Raw(serde_json::Value::Object(map)) => map.is_empty(),
            Self::Raw(_) => false,
        }
    }
}

impl CategoryAttributeSchema {
    /// Decode a schema fetched from the backend and check its invariants.
    pub fn from_json(value: serde_json::Value) -> Result<Self, CoreError> {
        let schema: Self = serde_json::from_value(value)
            .map_err(|e| CoreError::InvalidSchema(format!("attribute schema: {e}")))?;
        schema.ensure_unique_ids()?;
        Ok(schema)
    }

    /// Every attribute id must be unique across all groups.
    pub fn ensure_unique_ids(&self) -> Result<(), CoreError> {
        let mut seen = BTreeSet::new();
        for attribute in self.attributes() {
            if !seen.insert(attribute.id) {
                return Err(CoreError::InvalidSchema(format!(
                    "attribute id {} appears more than once",
                    attribute.id
                )));
            }
        }
        Ok(())
    }

    /// All attributes across all groups, in group order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.category_group_attributes
            .values()
            .flat_map(|group| group.attributes.values())
    }

    pub fn attributes_mut(&mut self) -> impl Iterator<Item = &mut Attribute> {
        self.category_group_attributes
            .values_mut()
            .flat_map(|group| group.attributes.values_mut())
    }

    /// Look an attribute up by its form key.
    pub fn find_by_key(&self, key: &str) -> Option<&Attribute> {
        self.attributes().find(|attribute| attribute.field_key() == key)
    }

    /// Convert a dimension entered in display units.
    pub fn scaled_dimension(&self, value: f64) -> f64 {
        value * self.dimension_multiplier.unwrap_or(1.0)
    }

    /// Convert a weight entered in display units.
    pub fn scaled_weight(&self, value: f64) -> f64 {
        value * self.weight_multiplier.unwrap_or(1.0)
    }
}

impl Attribute {
    /// Key used in the form-value map: `code` when present, else the id.
    pub fn field_key(&self) -> String {
        match self.code.as_deref() {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => self.id.to_string(),
        }
    }

    /// Whether a badge-token key refers to this attribute.
    pub fn matches_key(&self, key: &str) -> bool {
        self.title == key
            || self.code.as_deref() == Some(key)
            || self.id.to_string() == key
    }

    /// Option whose text or code equals `needle`.
    pub fn find_option(&self, needle: &str) -> Option<(&String, &AttributeValue)> {
        self.values
            .iter()
            .find(|(_, option)| option.text == needle || option.code.as_deref() == Some(needle))
    }

    /// Label used in error messages.
    pub fn label(&self) -> &str {
        if self.title.is_empty() {
            "این فیلد"
        } else {
            &self.title
        }
    }
}

impl FormSchema for CategoryAttributeSchema {
    const NAME: &'static str = "attributes";

    fn default_values(&self) -> FormValueMap {
        let mut values: FormValueMap = self
            .attributes()
            .map(|attribute| (attribute.field_key(), strategy(&attribute.kind).default_value()))
            .collect();
        if self.dimensions_required {
            for key in DIMENSION_KEYS {
                values.insert(key.to_string(), FormValue::empty_text());
            }
        }
        if self.weight_required {
            values.insert(WEIGHT_KEY.to_string(), FormValue::empty_text());
        }
        values
    }

    fn current_values(&self) -> FormValueMap {
        self.attributes()
            .filter_map(|attribute| {
                strategy(&attribute.kind)
                    .current_value(attribute)
                    .map(|value| (attribute.field_key(), value))
            })
            .collect()
    }

    fn check(
        &self,
        values: &FormValueMap,
        ctx: &ValidationContext<'_>,
        result: &mut ValidationResult,
    ) {
        validation::attributes::check(self, values, ctx, result);
    }

    fn fold_values(&self, values: &FormValueMap, config: &EngineConfig) -> Self {
        serializer::fold_attributes(self, values, config)
    }
}
