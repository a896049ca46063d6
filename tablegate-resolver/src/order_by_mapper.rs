use async_graphql_value::ConstValue;

use tablegate_model::Entity;
use tablegate_sql::{Column, OrderBy, Ordering};

use crate::error::ResolverError;

/// Map an ordering argument. A single object orders by its entries in
/// declaration order; a list of objects concatenates them, so callers can
/// express an unambiguous multi-field ordering even through transports that
/// do not preserve object entry order.
pub fn map_order_by<'a>(
    entity: &'a Entity,
    table_alias: &str,
    argument: &ConstValue,
) -> Result<OrderBy<'a>, ResolverError> {
    let mut pairs = Vec::new();
    collect(entity, table_alias, argument, &mut pairs)?;
    if pairs.is_empty() {
        return Err(ResolverError::Validation(format!(
            "Ordering for entity '{}' must name at least one field",
            entity.name
        )));
    }
    Ok(OrderBy(pairs))
}

fn collect<'a>(
    entity: &'a Entity,
    table_alias: &str,
    argument: &ConstValue,
    pairs: &mut Vec<(Column<'a>, Ordering)>,
) -> Result<(), ResolverError> {
    match argument {
        ConstValue::Object(object) => {
            for (field_name, direction) in object {
                let column = entity
                    .table
                    .get_physical_column(field_name)
                    .ok_or_else(|| ResolverError::UnknownField {
                        entity: entity.name.clone(),
                        field: field_name.to_string(),
                    })?;
                pairs.push((
                    Column::Physical {
                        column,
                        table_alias: Some(table_alias.to_string()),
                    },
                    parse_direction(field_name, direction)?,
                ));
            }
            Ok(())
        }
        ConstValue::List(items) => {
            for item in items {
                collect(entity, table_alias, item, pairs)?;
            }
            Ok(())
        }
        _ => Err(ResolverError::Validation(format!(
            "Ordering for entity '{}' must be an object or a list of objects",
            entity.name
        ))),
    }
}

fn parse_direction(field_name: &str, direction: &ConstValue) -> Result<Ordering, ResolverError> {
    let name = match direction {
        ConstValue::Enum(name) => name.as_str().to_string(),
        ConstValue::String(name) => name.clone(),
        _ => {
            return Err(ResolverError::Validation(format!(
                "Ordering direction for field '{field_name}' must be ASC or DESC"
            )))
        }
    };
    match name.to_ascii_uppercase().as_str() {
        "ASC" => Ok(Ordering::Asc),
        "DESC" => Ok(Ordering::Desc),
        _ => Err(ResolverError::Validation(format!(
            "Ordering direction for field '{field_name}' must be ASC or DESC, got '{name}'"
        ))),
    }
}
