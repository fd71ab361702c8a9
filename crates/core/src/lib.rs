//! Dynamic category-template form engine for marketplace product listings.
//!
//! Takes a server-delivered category schema (attributes or details), seeds
//! and holds form values for it, validates them, folds them back into a
//! payload-shaped copy of the schema, and resolves badge tokens in
//! AI-suggested titles.
//!
//! This crate has **zero I/O**. Schemas come in as decoded data and
//! payloads go out as data; fetching and submitting belong to the caller.

pub mod badge;
pub mod config;
pub mod error;
pub mod field_kind;
pub mod form;
pub mod schema;
pub mod serializer;
pub mod template;
pub mod types;
pub mod validation;

pub use config::EngineConfig;
pub use error::CoreError;
pub use form::FormStore;
pub use schema::{CategoryAttributeSchema, CategoryDetailsSchema, FormSchema};
pub use types::{FormValue, FormValueMap};
pub use validation::{ValidationResult, Validator};
