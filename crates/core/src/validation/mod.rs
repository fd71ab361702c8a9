//! Form validation: builds a validator from an optional schema and a
//! strictness flag, and evaluates it against form values.
//!
//! Pure logic. Every failing field is collected; nothing short-circuits
//! and nothing returns `Err`.

pub mod attributes;
pub mod base;
pub mod details;
pub mod result;

pub use base::BaseFields;
pub use result::{FieldViolation, ValidationResult, ViolationKind};

use crate::config::EngineConfig;
use crate::schema::FormSchema;
use crate::types::FormValueMap;

/// Settings every rule sees.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// `true` for product submission, `false` for template editing.
    pub strict: bool,
    pub config: &'a EngineConfig,
}

impl ValidationContext<'_> {
    /// Required flags only bite in strict mode.
    pub fn requires(&self, required: bool) -> bool {
        self.strict && required
    }
}

/// A validator bound to one (possibly absent) schema.
#[derive(Debug)]
pub struct Validator<'a, S> {
    schema: Option<&'a S>,
    ctx: ValidationContext<'a>,
    base_fields: bool,
}

impl<'a, S: FormSchema> Validator<'a, S> {
    /// Without a schema the validator checks only the base `title` /
    /// `description` fields.
    pub fn new(schema: Option<&'a S>, strict: bool, config: &'a EngineConfig) -> Self {
        Self {
            schema,
            ctx: ValidationContext { strict, config },
            base_fields: schema.is_none(),
        }
    }

    /// Also check the base fields when a schema is present.
    pub fn with_base_fields(mut self) -> Self {
        self.base_fields = true;
        self
    }

    pub fn validate(&self, values: &FormValueMap) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.base_fields {
            BaseFields::from_values(values).check(&mut result);
        }
        if let Some(schema) = self.schema {
            schema.check(values, &self.ctx, &mut result);
        }

        tracing::debug!(
            schema = S::NAME,
            strict = self.ctx.strict,
            errors = result.errors.len(),
            "Validated form values"
        );
        result
    }
}
