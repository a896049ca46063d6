pub mod cast;
mod delete_mapper;
mod error;
mod insert_mapper;
mod limit_offset_mapper;
mod order_by_mapper;
mod predicate_mapper;
mod query_mapper;
mod update_mapper;

#[cfg(test)]
pub(crate) mod test_support;

use async_graphql_value::ConstValue;

pub use delete_mapper::map_delete;
pub use error::{ResolverError, WithContext};
pub use insert_mapper::map_insert;
pub use limit_offset_mapper::{map_limit, map_offset};
pub use order_by_mapper::map_order_by;
pub use predicate_mapper::map_predicate;
pub use query_mapper::{map_select, FieldSelection, SelectRequest};
pub use update_mapper::{map_update, map_upsert};

/// Parse a JSON request body (REST surface) into the same input shape the
/// graph surface produces, so every mapper downstream sees one value model.
pub fn input_from_json(value: serde_json::Value) -> Result<ConstValue, ResolverError> {
    ConstValue::from_json(value)
        .map_err(|e| ResolverError::Validation(format!("Malformed request body: {e}")))
}

pub(crate) fn get_argument_field<'a>(
    argument_value: &'a ConstValue,
    field_name: &str,
) -> Option<&'a ConstValue> {
    match argument_value {
        ConstValue::Object(value) => value.get(field_name),
        _ => None,
    }
}
