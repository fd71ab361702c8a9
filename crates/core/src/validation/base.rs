//! Base `title` / `description` fields carried by every form.

use validator::Validate;

use super::result::{FieldViolation, ValidationResult};
use crate::types::FormValueMap;

pub const TITLE_KEY: &str = "title";
pub const DESCRIPTION_KEY: &str = "description";

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 5_000;

const TITLE_LABEL: &str = "عنوان";
const DESCRIPTION_LABEL: &str = "توضیحات";

#[derive(Debug, Clone, Default, Validate)]
pub struct BaseFields {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: String,
}

impl BaseFields {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            description: description.to_string(),
        }
    }

    pub fn from_values(values: &FormValueMap) -> Self {
        let text = |key: &str| {
            values
                .get(key)
                .and_then(|value| value.to_scalar_string())
                .unwrap_or_default()
        };
        Self::new(&text(TITLE_KEY), &text(DESCRIPTION_KEY))
    }

    /// Append base-field violations to `result`.
    pub fn check(&self, result: &mut ValidationResult) {
        let Err(errors) = self.validate() else {
            return;
        };
        for (field, _) in errors.field_errors() {
            match field.to_string().as_str() {
                TITLE_KEY if self.title.is_empty() => {
                    result.push(TITLE_KEY, FieldViolation::missing(TITLE_LABEL));
                }
                TITLE_KEY => {
                    result.push(TITLE_KEY, FieldViolation::too_long(TITLE_LABEL, MAX_TITLE_LENGTH));
                }
                DESCRIPTION_KEY => result.push(
                    DESCRIPTION_KEY,
                    FieldViolation::too_long(DESCRIPTION_LABEL, MAX_DESCRIPTION_LENGTH),
                ),
                _ => {}
            }
        }
    }
}
