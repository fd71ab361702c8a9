use std::collections::BTreeSet;

use anyhow::{Context, Result};
use hoshmarket_core::EngineConfig;

/// Load the engine configuration from environment variables.
///
/// | Env Var                              | Default |
/// |--------------------------------------|---------|
/// | `HOSHMARKET_EXCLUDED_ATTRIBUTE_IDS`  | `2233`  |
/// | `HOSHMARKET_MAX_TEXT_LENGTH`         | `5000`  |
/// | `HOSHMARKET_MISC_BRAND_ID`           | `719`   |
///
/// Unset variables fall back to the defaults; malformed ones are errors.
pub fn engine_config_from_env() -> Result<EngineConfig> {
    engine_config_from(|key| std::env::var(key).ok())
}

/// Same as [`engine_config_from_env`], reading through `lookup`.
pub fn engine_config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<EngineConfig> {
    let mut config = EngineConfig::default();

    if let Some(raw) = lookup("HOSHMARKET_EXCLUDED_ATTRIBUTE_IDS") {
        config.excluded_attribute_ids = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<i64>()
                    .with_context(|| format!("HOSHMARKET_EXCLUDED_ATTRIBUTE_IDS: '{s}' is not an id"))
            })
            .collect::<Result<BTreeSet<_>>>()?;
    }

    if let Some(raw) = lookup("HOSHMARKET_MAX_TEXT_LENGTH") {
        config.max_text_length = raw
            .trim()
            .parse()
            .context("HOSHMARKET_MAX_TEXT_LENGTH must be a valid usize")?;
    }

    if let Some(raw) = lookup("HOSHMARKET_MISC_BRAND_ID") {
        let raw = raw.trim();
        anyhow::ensure!(!raw.is_empty(), "HOSHMARKET_MISC_BRAND_ID must not be empty");
        config.misc_brand_id = raw.to_string();
    }

    Ok(config)
}
