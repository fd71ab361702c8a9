/// Errors surfaced by the template engine's public functions.
///
/// Field-level problems are never errors: they travel as data inside
/// [`crate::validation::ValidationResult`]. Only conditions the caller must
/// act on before transmitting a payload end up here.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("No {schema} schema is loaded")]
    MissingSchema { schema: &'static str },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}
