use thiserror::Error;

use tablegate_model::ModelError;

use crate::cast::CastError;

/// Request-scoped compilation failures. Every variant carries enough context
/// to report which input was rejected and why; none of them reaches the
/// database.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// The request shape is invalid (wrong value kind, unknown operator,
    /// contradictory modifiers). Distinct from a type mismatch on an
    /// otherwise well-shaped request.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Unknown field '{field}' on entity '{entity}'")]
    UnknownField { entity: String, field: String },

    #[error("Parameter '{parameter}' cannot be resolved as column '{column}' of the declared type")]
    TypeMismatch {
        parameter: String,
        column: String,
        #[source]
        source: CastError,
    },

    #[error("{0} {1}")]
    WithContext(String, #[source] Box<ResolverError>),
}

pub trait WithContext {
    fn with_context(self, context: String) -> Self;
}

impl WithContext for ResolverError {
    fn with_context(self, context: String) -> ResolverError {
        ResolverError::WithContext(context, Box::new(self))
    }
}

impl<T> WithContext for Result<T, ResolverError> {
    fn with_context(self, context: String) -> Result<T, ResolverError> {
        self.map_err(|e| e.with_context(context))
    }
}
