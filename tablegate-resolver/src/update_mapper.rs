use async_graphql_value::ConstValue;
use tracing::debug;

use tablegate_model::Entity;
use tablegate_sql::{Column, ColumnValue, PhysicalColumn, Predicate, Update, Upsert};

use crate::cast;
use crate::error::ResolverError;
use crate::get_argument_field;

/// Equality conjunction over every primary-key column, from the identity
/// argument (path segments on the REST surface). Each key value must be
/// present and non-null.
pub(crate) fn pk_predicate<'a>(
    entity: &'a Entity,
    pk_argument: &ConstValue,
) -> Result<Predicate<'a>, ResolverError> {
    let mut predicate = Predicate::True;
    for column in entity.table.pk_physical_columns() {
        let value = get_argument_field(pk_argument, &column.column_name).ok_or_else(|| {
            ResolverError::Validation(format!(
                "Missing primary-key value for column '{}' of entity '{}'",
                column.column_name, entity.name
            ))
        })?;
        let value = cast::coerce(&column.column_name, column, value)?;
        if value.is_null() {
            return Err(ResolverError::Validation(format!(
                "Primary-key column '{}' of entity '{}' cannot be null",
                column.column_name, entity.name
            )));
        }
        predicate = Predicate::and(
            predicate,
            Predicate::Eq(
                Column::Physical {
                    column,
                    table_alias: None,
                },
                Column::Param(value),
            ),
        );
    }
    Ok(predicate)
}

fn validate_body<'a>(
    entity: &Entity,
    argument: &'a ConstValue,
    operation: &str,
) -> Result<&'a ConstValue, ResolverError> {
    match argument {
        ConstValue::Object(body) => {
            for field_name in body.keys() {
                let known = entity.table.get_physical_column(field_name).is_some();
                if !known {
                    return Err(ResolverError::UnknownField {
                        entity: entity.name.clone(),
                        field: field_name.to_string(),
                    });
                }
            }
            Ok(argument)
        }
        _ => Err(ResolverError::Validation(format!(
            "{operation} body for entity '{}' must be an object",
            entity.name
        ))),
    }
}

/// Full-overwrite update: each supplied non-key column is assigned its
/// coerced value, each omitted one an explicit NULL. Key columns inside the
/// body are ignored; row identity comes solely from `pk_argument`.
pub fn map_update<'a>(
    entity: &'a Entity,
    pk_argument: &ConstValue,
    argument: &ConstValue,
) -> Result<Update<'a>, ResolverError> {
    let argument = validate_body(entity, argument, "Update")?;

    let mut assignments: Vec<(&PhysicalColumn, Column)> = Vec::new();
    for column in &entity.table.columns {
        if entity.table.is_pk(&column.column_name) || column.is_autogenerated {
            continue;
        }
        let value = match get_argument_field(argument, &column.column_name) {
            Some(value) => Column::Param(cast::coerce(&column.column_name, column, value)?),
            None => Column::Null,
        };
        assignments.push((column, value));
    }

    // key-only tables have nothing to assign; an empty SET list is not SQL
    if assignments.is_empty() {
        return Err(ResolverError::Validation(format!(
            "Update of entity '{}' has no assignable columns",
            entity.name
        )));
    }

    debug!(
        entity = %entity.name,
        assignments = assignments.len(),
        "mapped update"
    );

    Ok(Update {
        table: &entity.table,
        assignments,
        predicate: pk_predicate(entity, pk_argument)?,
        returning: vec![Column::Star],
    })
}

/// Insert-or-update over the primary key. The insert arm follows the same
/// column rules as a plain insert; the update arm is derived per dialect from
/// the non-key columns.
pub fn map_upsert<'a>(
    entity: &'a Entity,
    pk_argument: &ConstValue,
    argument: &ConstValue,
) -> Result<Upsert<'a>, ResolverError> {
    let argument = validate_body(entity, argument, "Upsert")?;

    let mut pk_columns = Vec::new();
    let mut columns = Vec::new();
    let mut values = Vec::new();
    for column in entity.table.pk_physical_columns() {
        let value = get_argument_field(pk_argument, &column.column_name).ok_or_else(|| {
            ResolverError::Validation(format!(
                "Missing primary-key value for column '{}' of entity '{}'",
                column.column_name, entity.name
            ))
        })?;
        let value = cast::coerce(&column.column_name, column, value)?;
        if value.is_null() {
            return Err(ResolverError::Validation(format!(
                "Primary-key column '{}' of entity '{}' cannot be null",
                column.column_name, entity.name
            )));
        }
        pk_columns.push(column);
        columns.push(column);
        values.push(Column::Param(value));
    }

    for column in &entity.table.columns {
        if entity.table.is_pk(&column.column_name) {
            continue;
        }
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
                if !column.is_autogenerated {
                    columns.push(column);
                    values.push(Column::Param(ColumnValue::Null));
                }
            }
        }
    }

    debug!(
        entity = %entity.name,
        columns = columns.len(),
        "mapped upsert"
    );

    Ok(Upsert {
        table: &entity.table,
        pk_columns,
        columns,
        values,
        returning: vec![Column::Star],
    })
}
