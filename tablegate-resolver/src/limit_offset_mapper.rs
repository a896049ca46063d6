use async_graphql_value::ConstValue;

use tablegate_sql::{Limit, Offset};

use crate::error::ResolverError;

pub fn map_limit(argument: &ConstValue) -> Result<Limit, ResolverError> {
    non_negative(argument, "limit").map(Limit)
}

pub fn map_offset(argument: &ConstValue) -> Result<Offset, ResolverError> {
    non_negative(argument, "offset").map(Offset)
}

fn non_negative(argument: &ConstValue, what: &str) -> Result<i64, ResolverError> {
    let value = match argument {
        ConstValue::Number(number) => number.as_i64(),
        ConstValue::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| {
        ResolverError::Validation(format!("'{what}' must be an integer, got {argument}"))
    })?;

    if value < 0 {
        return Err(ResolverError::Validation(format!(
            "'{what}' cannot be negative, got {value}"
        )));
    }
    Ok(value)
}
