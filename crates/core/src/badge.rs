//! Badge extraction from AI-suggested product titles.
//!
//! Suggested titles embed JSON tokens such as `{"6477":"قرمز"}`. Each token
//! is resolved against the attribute schema first and the details schema
//! second, then replaced in the text by a `{fieldKey}` placeholder that the
//! title editor renders as a badge.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::schema::details::keys;
use crate::schema::{CategoryAttributeSchema, CategoryDetailsSchema};

/// A `{...}` run with no nested braces.
pub const TOKEN_PATTERN: &str = r"\{[^{}]*\}";

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TOKEN_PATTERN).expect("valid regex"));

/// Details fields a token may name, with every key spelling accepted.
const DETAIL_BADGE_FIELDS: &[(&str, &[&str])] = &[
    (keys::BRAND, &["brand", "برند"]),
    (keys::MODEL, &["model", "brand_model", "مدل"]),
    (keys::STATUS, &["status", "وضعیت"]),
    (keys::PLATFORM, &["platform", "پلتفرم"]),
    (keys::PRODUCT_CLASS, &["product_class", "کلاس کالا"]),
    (keys::CATEGORY_PRODUCT_TYPE, &["category_product_type", "نوع کالا"]),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeParse {
    /// Title with resolved tokens replaced by `{fieldKey}`.
    pub parsed_text: String,
    /// Field key -> resolved option id (empty when only the field matched).
    pub selected_badges: BTreeMap<String, String>,
    /// Field key -> label to display.
    pub selected_badges_labels: BTreeMap<String, String>,
    /// Tokens that could not be parsed; they are left in `parsed_text`.
    pub skipped_tokens: Vec<SkippedToken>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedToken {
    pub token: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Resolution {
    field_key: String,
    option_id: String,
    label: String,
}

/// Extract and resolve every badge token in `title`.
///
/// Never fails: a malformed token is logged, recorded in
/// [`BadgeParse::skipped_tokens`] and left in the text as it was.
pub fn parse_title(
    title: &str,
    attributes: Option<&CategoryAttributeSchema>,
    details: Option<&CategoryDetailsSchema>,
) -> BadgeParse {
    let mut parse = BadgeParse::default();
    let mut last_end = 0;

    for token in TOKEN_RE.find_iter(title) {
        parse.parsed_text.push_str(&title[last_end..token.start()]);
        last_end = token.end();

        let pairs = match serde_json::from_str::<serde_json::Map<String, Value>>(token.as_str()) {
            Ok(pairs) if !pairs.is_empty() => pairs,
            Ok(_) => {
                skip(&mut parse, token.as_str(), "token has no field".to_string());
                continue;
            }
            Err(e) => {
                skip(&mut parse, token.as_str(), e.to_string());
                continue;
            }
        };

        let mut replacement = Vec::with_capacity(pairs.len());
        for (key, value) in &pairs {
            let suggested = value_text(value);
            let resolved = attributes
                .and_then(|schema| resolve_attribute(schema, key, &suggested))
                .or_else(|| details.and_then(|schema| resolve_detail(schema, key, &suggested)));

            match resolved {
                Some(resolution) => {
                    replacement.push(format!("{{{}}}", resolution.field_key));
                    parse
                        .selected_badges
                        .insert(resolution.field_key.clone(), resolution.option_id);
                    parse
                        .selected_badges_labels
                        .insert(resolution.field_key, resolution.label);
                }
                None => replacement.push(suggested),
            }
        }
        parse.parsed_text.push_str(&replacement.join(" "));
    }
    parse.parsed_text.push_str(&title[last_end..]);

    tracing::debug!(
        badges = parse.selected_badges.len(),
        skipped = parse.skipped_tokens.len(),
        "Parsed suggested title"
    );
    parse
}

fn skip(parse: &mut BadgeParse, token: &str, reason: String) {
    tracing::warn!(token, %reason, "Skipping malformed badge token");
    parse.parsed_text.push_str(token);
    parse.skipped_tokens.push(SkippedToken {
        token: token.to_string(),
        reason,
    });
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// First attribute whose title, code or id equals `key`, across groups in
/// order. A field match without a value match is kept with an empty id.
fn resolve_attribute(
    schema: &CategoryAttributeSchema,
    key: &str,
    suggested: &str,
) -> Option<Resolution> {
    let attribute = schema.attributes().find(|attribute| attribute.matches_key(key))?;
    let resolution = match attribute.find_option(suggested) {
        Some((id, option)) => Resolution {
            field_key: attribute.field_key(),
            option_id: id.clone(),
            label: option.text.clone(),
        },
        None => Resolution {
            field_key: attribute.field_key(),
            option_id: String::new(),
            label: suggested.to_string(),
        },
    };
    Some(resolution)
}

fn resolve_detail(
    schema: &CategoryDetailsSchema,
    key: &str,
    suggested: &str,
) -> Option<Resolution> {
    let (field_key, _) = DETAIL_BADGE_FIELDS
        .iter()
        .find(|(_, aliases)| aliases.contains(&key))?;

    let matched = schema
        .bind
        .options_for(field_key)
        .and_then(|options| options.iter().find(|option| option.title == suggested));

    let resolution = match matched {
        Some(option) => Resolution {
            field_key: field_key.to_string(),
            option_id: option.id.clone(),
            label: option.title.clone(),
        },
        None => Resolution {
            field_key: field_key.to_string(),
            option_id: String::new(),
            label: suggested.to_string(),
        },
    };
    Some(resolution)
}
