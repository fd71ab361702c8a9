//! Server-delivered category schemas and the seam the rest of the engine
//! works through.
//!
//! Both schema shapes are plain data: cloning one is a full structural deep
//! copy, so the serializer can fold values onto a clone and leave the
//! fetched original untouched.

pub mod attributes;
pub mod details;
mod de;

pub use attributes::{
    Attribute, AttributeGroup, AttributeSelection, AttributeType, AttributeValue,
    CategoryAttributeSchema, TextContent,
};
pub use details::{BindOption, CategoryDetailsSchema, DetailsBind, IdType};

use crate::config::EngineConfig;
use crate::types::FormValueMap;
use crate::validation::{ValidationContext, ValidationResult};

/// Behaviour shared by every schema a form can be generated from.
pub trait FormSchema: Clone {
    /// Short name used in error messages.
    const NAME: &'static str;

    /// A value for every field this schema renders, in its empty state.
    fn default_values(&self) -> FormValueMap;

    /// The selections already stored in the schema, as form values. Used
    /// when editing a saved template.
    fn current_values(&self) -> FormValueMap;

    /// Append a violation for every failing field.
    fn check(
        &self,
        values: &FormValueMap,
        ctx: &ValidationContext<'_>,
        result: &mut ValidationResult,
    );

    /// Fold form values onto a copy of this schema.
    fn fold_values(&self, values: &FormValueMap, config: &EngineConfig) -> Self;
}
