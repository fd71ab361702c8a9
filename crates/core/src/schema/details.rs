//! Category details schema: brand, status, platform, product class,
//! counterfeit flags and product-identifier (MEFA) selection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::de::{id_string, opt_id_string};
use super::FormSchema;
use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::serializer;
use crate::types::{FormValue, FormValueMap};
use crate::validation::{self, ValidationContext, ValidationResult};

/// Form keys for details fields.
pub mod keys {
    pub const BRAND: &str = "brand";
    pub const MODEL: &str = "model";
    pub const STATUS: &str = "status";
    pub const PLATFORM: &str = "platform";
    pub const PRODUCT_CLASS: &str = "product_class";
    pub const CATEGORY_PRODUCT_TYPE: &str = "category_product_type";
    pub const FAKE_REASON: &str = "fake_reason";
    pub const THEME: &str = "theme";
    pub const ID_TYPE: &str = "id_type";
    pub const GENERAL_MEFA_ID: &str = "general_mefa_id";
    pub const CUSTOM_ID: &str = "custom_id";
    pub const IS_FAKE_PRODUCT: &str = "is_fake_product";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetailsSchema {
    pub bind: DetailsBind,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub product_class: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub category_product_type: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub fake_reason: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub theme: Option<String>,
    #[serde(default)]
    pub id_type: Option<IdType>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub general_mefa_id: Option<String>,
    #[serde(default)]
    pub custom_id: Option<String>,
    #[serde(default)]
    pub is_fake_product: bool,
}

/// Option lists and behavioural flags for a details form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsBind {
    #[serde(default)]
    pub brands: Vec<BindOption>,
    #[serde(default)]
    pub statuses: Vec<BindOption>,
    #[serde(default)]
    pub platforms: Vec<BindOption>,
    #[serde(default)]
    pub product_classes: Vec<BindOption>,
    #[serde(default)]
    pub category_product_types: Vec<BindOption>,
    #[serde(default)]
    pub fake_reasons: Vec<BindOption>,
    #[serde(default)]
    pub themes: Vec<BindOption>,
    /// MEFA id -> opaque descriptor.
    #[serde(default)]
    pub general_mefa: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub allow_fake: bool,
    #[serde(default)]
    pub show_colors: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_mefa_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindOption {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(alias = "text", alias = "name")]
    pub title: String,
}

/// How the product identifier is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdType {
    General,
    Custom,
}

impl IdType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Custom => "custom",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "general" => Some(Self::General),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// The option-backed details fields, with their Persian labels.
pub const OPTION_FIELDS: &[(&str, &str)] = &[
    (keys::BRAND, "برند"),
    (keys::STATUS, "وضعیت"),
    (keys::PLATFORM, "پلتفرم"),
    (keys::PRODUCT_CLASS, "کلاس کالا"),
    (keys::CATEGORY_PRODUCT_TYPE, "نوع کالا"),
    (keys::FAKE_REASON, "دلیل غیراصل بودن"),
    (keys::THEME, "رنگ"),
];

impl DetailsBind {
    /// Option list backing a details form key, if the key has one.
    pub fn options_for(&self, key: &str) -> Option<&[BindOption]> {
        let options = match key {
            keys::BRAND => &self.brands,
            keys::STATUS => &self.statuses,
            keys::PLATFORM => &self.platforms,
            keys::PRODUCT_CLASS => &self.product_classes,
            keys::CATEGORY_PRODUCT_TYPE => &self.category_product_types,
            keys::FAKE_REASON => &self.fake_reasons,
            keys::THEME => &self.themes,
            _ => return None,
        };
        Some(options.as_slice())
    }

    pub fn has_option(&self, key: &str, id: &str) -> bool {
        self.options_for(key)
            .is_some_and(|options| options.iter().any(|option| option.id == id))
    }
}

impl CategoryDetailsSchema {
    pub fn from_json(value: serde_json::Value) -> Result<Self, CoreError> {
        serde_json::from_value(value)
            .map_err(|e| CoreError::InvalidSchema(format!("details schema: {e}")))
    }

    /// Whether counterfeit marking is possible and switched on.
    pub fn is_fake(&self) -> bool {
        self.bind.allow_fake && self.is_fake_product
    }

    /// Currently stored id for an option-backed form key.
    pub fn selected(&self, key: &str) -> Option<&str> {
        let slot = match key {
            keys::BRAND => &self.brand,
            keys::MODEL => &self.model,
            keys::STATUS => &self.status,
            keys::PLATFORM => &self.platform,
            keys::PRODUCT_CLASS => &self.product_class,
            keys::CATEGORY_PRODUCT_TYPE => &self.category_product_type,
            keys::FAKE_REASON => &self.fake_reason,
            keys::THEME => &self.theme,
            keys::GENERAL_MEFA_ID => &self.general_mefa_id,
            keys::CUSTOM_ID => &self.custom_id,
            _ => return None,
        };
        slot.as_deref()
    }

    /// Mutable slot for a scalar form key.
    pub(crate) fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        let slot = match key {
            keys::BRAND => &mut self.brand,
            keys::MODEL => &mut self.model,
            keys::STATUS => &mut self.status,
            keys::PLATFORM => &mut self.platform,
            keys::PRODUCT_CLASS => &mut self.product_class,
            keys::CATEGORY_PRODUCT_TYPE => &mut self.category_product_type,
            keys::FAKE_REASON => &mut self.fake_reason,
            keys::THEME => &mut self.theme,
            keys::GENERAL_MEFA_ID => &mut self.general_mefa_id,
            keys::CUSTOM_ID => &mut self.custom_id,
            _ => return None,
        };
        Some(slot)
    }
}

/// Scalar (string-valued) form keys, in display order.
pub const SCALAR_KEYS: &[&str] = &[
    keys::BRAND,
    keys::MODEL,
    keys::STATUS,
    keys::PLATFORM,
    keys::PRODUCT_CLASS,
    keys::CATEGORY_PRODUCT_TYPE,
    keys::FAKE_REASON,
    keys::THEME,
    keys::GENERAL_MEFA_ID,
    keys::CUSTOM_ID,
];

impl FormSchema for CategoryDetailsSchema {
    const NAME: &'static str = "details";

    fn default_values(&self) -> FormValueMap {
        let mut values: FormValueMap = SCALAR_KEYS
            .iter()
            .map(|key| (key.to_string(), FormValue::empty_text()))
            .collect();
        let id_type = self
            .bind
            .category_mefa_type
            .as_deref()
            .and_then(IdType::parse)
            .map(|id_type| FormValue::from(id_type.as_str()))
            .unwrap_or_else(FormValue::empty_text);
        values.insert(keys::ID_TYPE.to_string(), id_type);
        values.insert(keys::IS_FAKE_PRODUCT.to_string(), FormValue::Bool(false));
        values
    }

    fn current_values(&self) -> FormValueMap {
        let mut values: FormValueMap = SCALAR_KEYS
            .iter()
            .filter_map(|&key| {
                self.selected(key)
                    .filter(|value| !value.is_empty())
                    .map(|value| (key.to_string(), FormValue::from(value)))
            })
            .collect();
        if let Some(id_type) = self.id_type {
            values.insert(keys::ID_TYPE.to_string(), FormValue::from(id_type.as_str()));
        }
        values.insert(
            keys::IS_FAKE_PRODUCT.to_string(),
            FormValue::Bool(self.is_fake_product),
        );
        values
    }

    fn check(
        &self,
        values: &FormValueMap,
        ctx: &ValidationContext<'_>,
        result: &mut ValidationResult,
    ) {
        validation::details::check(self, values, ctx, result);
    }

    fn fold_values(&self, values: &FormValueMap, config: &EngineConfig) -> Self {
        serializer::fold_details(self, values, config)
    }
}
