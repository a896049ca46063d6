mod entity;
mod error;

pub use entity::{Cardinality, DatabaseModel, Entity, Relationship};
pub use error::ModelError;
