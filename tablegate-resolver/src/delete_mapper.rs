use async_graphql_value::ConstValue;
use tracing::debug;

use tablegate_model::Entity;
use tablegate_sql::{Column, Delete};

use crate::error::ResolverError;
use crate::update_mapper::pk_predicate;

/// Delete one row by primary key, returning the removed row.
pub fn map_delete<'a>(
    entity: &'a Entity,
    pk_argument: &ConstValue,
) -> Result<Delete<'a>, ResolverError> {
    let predicate = pk_predicate(entity, pk_argument)?;

    debug!(entity = %entity.name, "mapped delete");

    Ok(Delete {
        table: &entity.table,
        predicate,
        returning: vec![Column::Star],
    })
}
