use async_graphql_value::ConstValue;

use tablegate_model::Entity;
use tablegate_sql::{CaseSensitivity, Column, PhysicalColumn, Predicate, SystemType};

use crate::cast;
use crate::error::ResolverError;

const CASE_MODIFIER: &str = "caseInsensitive";

/// Map a filter argument into a predicate tree over `table_alias`-qualified
/// columns. An object combines its entries with AND; `and`/`or` take lists,
/// `not` a nested filter, and any other key names a column with an operator
/// object.
pub fn map_predicate<'a>(
    entity: &'a Entity,
    table_alias: &str,
    argument: &ConstValue,
) -> Result<Predicate<'a>, ResolverError> {
    let object = match argument {
        ConstValue::Object(object) => object,
        _ => {
            return Err(ResolverError::Validation(format!(
                "Filter for entity '{}' must be an object",
                entity.name
            )))
        }
    };

    let mut predicate = Predicate::True;
    for (key, value) in object {
        let clause = match key.as_str() {
            "and" => {
                let mut folded = Predicate::True;
                for item in expect_list(value, "and")? {
                    folded = Predicate::and(folded, map_predicate(entity, table_alias, item)?);
                }
                folded
            }
            "or" => {
                let mut folded = Predicate::False;
                for item in expect_list(value, "or")? {
                    folded = Predicate::or(folded, map_predicate(entity, table_alias, item)?);
                }
                folded
            }
            "not" => !map_predicate(entity, table_alias, value)?,
            field_name => {
                let column = entity.table.get_physical_column(field_name).ok_or_else(|| {
                    ResolverError::UnknownField {
                        entity: entity.name.clone(),
                        field: field_name.to_string(),
                    }
                })?;
                field_predicate(column, table_alias, field_name, value)?
            }
        };
        predicate = Predicate::and(predicate, clause);
    }
    Ok(predicate)
}

fn expect_list<'v>(
    value: &'v ConstValue,
    combinator: &str,
) -> Result<&'v [ConstValue], ResolverError> {
    match value {
        ConstValue::List(items) => Ok(items),
        _ => Err(ResolverError::Validation(format!(
            "Filter combinator '{combinator}' takes a list of filters"
        ))),
    }
}

fn field_predicate<'a>(
    column: &'a PhysicalColumn,
    table_alias: &str,
    field_name: &str,
    value: &ConstValue,
) -> Result<Predicate<'a>, ResolverError> {
    let operators = match value {
        ConstValue::Object(operators) => operators,
        _ => {
            return Err(ResolverError::Validation(format!(
                "Filter for field '{field_name}' must be an object of operators"
            )))
        }
    };

    let case_sensitivity = match operators.get(CASE_MODIFIER) {
        None => CaseSensitivity::Sensitive,
        Some(ConstValue::Boolean(true)) => CaseSensitivity::Insensitive,
        Some(ConstValue::Boolean(false)) => CaseSensitivity::Sensitive,
        Some(_) => {
            return Err(ResolverError::Validation(format!(
                "'{CASE_MODIFIER}' on field '{field_name}' must be a boolean"
            )))
        }
    };

    let operator_count = operators
        .keys()
        .filter(|key| key.as_str() != CASE_MODIFIER)
        .count();
    if operators.contains_key("isNull") && operator_count > 1 {
        return Err(ResolverError::Validation(format!(
            "'isNull' on field '{field_name}' cannot be combined with other operators"
        )));
    }

    let lhs = || Column::Physical {
        column,
        table_alias: Some(table_alias.to_string()),
    };

    let mut predicate = Predicate::True;
    for (op_name, operand) in operators {
        let op_name = op_name.as_str();
        if op_name == CASE_MODIFIER {
            continue;
        }

        let clause = if op_name == "isNull" {
            match operand {
                ConstValue::Boolean(true) => Predicate::IsNull(lhs()),
                ConstValue::Boolean(false) => !Predicate::IsNull(lhs()),
                _ => {
                    return Err(ResolverError::Validation(format!(
                        "'isNull' on field '{field_name}' must be a boolean"
                    )))
                }
            }
        } else {
            if matches!(operand, ConstValue::Null) {
                return Err(ResolverError::Validation(format!(
                    "Operator '{op_name}' on field '{field_name}' cannot compare against null; use 'isNull'"
                )));
            }
            if matches!(op_name, "contains" | "startsWith" | "endsWith")
                && column.typ != SystemType::String
            {
                return Err(ResolverError::Validation(format!(
                    "Operator '{op_name}' applies only to string columns; field '{field_name}' is {}",
                    column.typ
                )));
            }
            let rhs = Column::Param(cast::coerce(field_name, column, operand)?);
            Predicate::from_name(op_name, lhs(), rhs, case_sensitivity).ok_or_else(|| {
                ResolverError::Validation(format!("Unknown filter operator '{op_name}'"))
            })?
        };
        predicate = Predicate::and(predicate, clause);
    }
    Ok(predicate)
}
