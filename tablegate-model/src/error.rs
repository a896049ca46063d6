use thiserror::Error;

/// Configuration-time failures. These abort initialization; none of them is
/// ever surfaced on a per-request path.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unknown entity '{0}'")]
    UnknownEntity(String),

    #[error("Entity '{entity}' declares primary-key column '{column}' that does not exist")]
    UnknownPkColumn { entity: String, column: String },

    #[error("Entity '{0}' has no primary-key column")]
    MissingPrimaryKey(String),

    #[error("Relationship '{relationship}' of entity '{entity}' targets unknown entity '{target}'")]
    UnknownRelationshipTarget {
        entity: String,
        relationship: String,
        target: String,
    },

    #[error(
        "Relationship '{relationship}' of entity '{entity}' references unknown column '{column}'"
    )]
    UnknownRelationshipColumn {
        entity: String,
        relationship: String,
        column: String,
    },

    #[error("Relationship '{relationship}' of entity '{entity}' has mismatched join column lists")]
    MismatchedJoinColumns {
        entity: String,
        relationship: String,
    },

    #[error("Unsupported cardinality '{0}'")]
    UnsupportedCardinality(String),
}
