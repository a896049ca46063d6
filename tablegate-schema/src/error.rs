use thiserror::Error;

use tablegate_model::ModelError;
use tablegate_sql::SystemType;

/// Failures while deriving the exposed type system. All of them are raised at
/// startup, before any request is served, and abort initialization.
#[derive(Error, Debug)]
pub enum SchemaBuildError {
    #[error(
        "Column '{column}' of entity '{entity}' has system type '{typ}' with no graph scalar mapping"
    )]
    UnmappedSystemType {
        entity: String,
        column: String,
        typ: SystemType,
    },

    #[error("Column '{column}' of entity '{entity}' carries a default value that cannot be encoded")]
    UnsupportedDefaultValue { entity: String, column: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}
