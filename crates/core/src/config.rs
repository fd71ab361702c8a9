//! Engine-wide tunables.
//!
//! The engine never reads the environment itself; binaries build an
//! [`EngineConfig`] (usually from env vars) and pass it down by reference.

use std::collections::BTreeSet;

/// Attribute id excluded from validation and serialization unless
/// configured otherwise.
pub const DEFAULT_EXCLUDED_ATTRIBUTE_ID: i64 = 2233;

/// Maximum length, in characters, of free-text attribute values.
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 5_000;

/// Brand id forced onto counterfeit ("fake") products.
pub const DEFAULT_MISC_BRAND_ID: &str = "719";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Attributes with these ids are skipped by the validator and left
    /// untouched by the serializer.
    pub excluded_attribute_ids: BTreeSet<i64>,
    /// Upper bound for `input` / `text` / `multi_text` attribute values.
    pub max_text_length: usize,
    /// The designated "miscellaneous" brand id.
    pub misc_brand_id: String,
}

impl EngineConfig {
    pub fn is_excluded(&self, attribute_id: i64) -> bool {
        self.excluded_attribute_ids.contains(&attribute_id)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            excluded_attribute_ids: BTreeSet::from([DEFAULT_EXCLUDED_ATTRIBUTE_ID]),
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            misc_brand_id: DEFAULT_MISC_BRAND_ID.to_string(),
        }
    }
}
