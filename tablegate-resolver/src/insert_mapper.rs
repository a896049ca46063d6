use async_graphql_value::ConstValue;
use tracing::debug;

use tablegate_model::Entity;
use tablegate_sql::{Column, ColumnValue, Insert};

use crate::cast;
use crate::error::ResolverError;
use crate::get_argument_field;

/// Build an insert from a request body. Every physical column is visited in
/// declaration order: a supplied field is coerced and bound (supplying a
/// generated or key column overrides generation), an unsupplied autogenerated
/// or key column is left to the database, and any other unsupplied column is
/// bound to an explicit NULL. A declared default value is schema metadata
/// only; the builder never applies it on the caller's behalf.
pub fn map_insert<'a>(
    entity: &'a Entity,
    argument: &ConstValue,
) -> Result<Insert<'a>, ResolverError> {
    let body = match argument {
        ConstValue::Object(body) => body,
        _ => {
            return Err(ResolverError::Validation(format!(
                "Insert body for entity '{}' must be an object",
                entity.name
            )))
        }
    };

    for field_name in body.keys() {
        if entity.table.get_physical_column(field_name).is_none() {
            return Err(ResolverError::UnknownField {
                entity: entity.name.clone(),
                field: field_name.to_string(),
            });
        }
    }

    let mut columns = Vec::new();
    let mut values = Vec::new();
    for column in &entity.table.columns {
        match get_argument_field(argument, &column.column_name) {
            Some(value) => {
                columns.push(column);
                values.push(Column::Param(cast::coerce(
                    &column.column_name,
                    column,
                    value,
                )?));
            }
            None => {
                let generated =
                    column.is_autogenerated || entity.table.is_pk(&column.column_name);
                if !generated {
                    columns.push(column);
                    values.push(Column::Param(ColumnValue::Null));
                }
            }
        }
    }

    // all columns generated and none supplied; no renderable column list
    if columns.is_empty() {
        return Err(ResolverError::Validation(format!(
            "Insert into entity '{}' binds no columns; every column is database-generated",
            entity.name
        )));
    }

    let returning = entity
        .table
        .pk_physical_columns()
        .into_iter()
        .map(|column| Column::Physical {
            column,
            table_alias: None,
        })
        .collect();

    debug!(
        entity = %entity.name,
        columns = columns.len(),
        "mapped insert"
    );

    Ok(Insert {
        table: &entity.table,
        columns,
        values,
        returning,
    })
}
