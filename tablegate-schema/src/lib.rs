mod converter;
mod error;
mod util;

pub use converter::{connection_type_name, entity_type_definition};
pub use error::SchemaBuildError;
pub use util::{default_positioned, default_positioned_name};
