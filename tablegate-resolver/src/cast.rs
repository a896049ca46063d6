use async_graphql_value::ConstValue;
use rust_decimal::Decimal;
use thiserror::Error;

use tablegate_sql::{ColumnValue, PhysicalColumn, SystemType};

use crate::error::ResolverError;

#[derive(Error, Debug)]
pub enum CastError {
    #[error("{value} is not a valid {expected} literal")]
    Format { value: String, expected: &'static str },

    #[error("{value} does not fit in {expected}")]
    Overflow { value: String, expected: &'static str },
}

fn format_error(value: &ConstValue, expected: &'static str) -> CastError {
    CastError::Format {
        value: value.to_string(),
        expected,
    }
}

fn overflow_error(value: &ConstValue, expected: &'static str) -> CastError {
    CastError::Overflow {
        value: value.to_string(),
        expected,
    }
}

/// Coerce one input value into the column system type. Numeric strings are
/// accepted alongside numbers (metadata default values and path segments
/// arrive textually), but a lossy or out-of-range conversion is always an
/// error, never a silent truncation.
pub fn cast_value(value: &ConstValue, typ: SystemType) -> Result<ColumnValue, CastError> {
    if matches!(value, ConstValue::Null) {
        return Ok(ColumnValue::Null);
    }

    match typ {
        SystemType::String => match value {
            ConstValue::String(s) => Ok(ColumnValue::String(s.clone())),
            other => Err(format_error(other, "string")),
        },
        SystemType::Byte => {
            let wide = cast_integer(value, "byte")?;
            u8::try_from(wide)
                .map(ColumnValue::Byte)
                .map_err(|_| overflow_error(value, "byte"))
        }
        SystemType::Int16 => {
            let wide = cast_integer(value, "int16")?;
            i16::try_from(wide)
                .map(ColumnValue::Int16)
                .map_err(|_| overflow_error(value, "int16"))
        }
        SystemType::Int32 => {
            let wide = cast_integer(value, "int32")?;
            i32::try_from(wide)
                .map(ColumnValue::Int32)
                .map_err(|_| overflow_error(value, "int32"))
        }
        SystemType::Int64 => cast_integer(value, "int64").map(ColumnValue::Int64),
        SystemType::Float32 => {
            let wide = cast_float(value, "float32")?;
            let narrow = wide as f32;
            if wide.is_finite() && !narrow.is_finite() {
                return Err(overflow_error(value, "float32"));
            }
            Ok(ColumnValue::Float32(narrow))
        }
        SystemType::Float64 => cast_float(value, "float64").map(ColumnValue::Float64),
        SystemType::Decimal => cast_decimal(value).map(ColumnValue::Decimal),
        SystemType::Boolean => match value {
            ConstValue::Boolean(b) => Ok(ColumnValue::Bool(*b)),
            ConstValue::String(s) if s.eq_ignore_ascii_case("true") => Ok(ColumnValue::Bool(true)),
            ConstValue::String(s) if s.eq_ignore_ascii_case("false") => {
                Ok(ColumnValue::Bool(false))
            }
            other => Err(format_error(other, "boolean")),
        },
    }
}

fn cast_integer(value: &ConstValue, expected: &'static str) -> Result<i64, CastError> {
    match value {
        ConstValue::Number(number) => number
            .as_i64()
            .ok_or_else(|| format_error(value, expected)),
        ConstValue::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format_error(value, expected)),
        other => Err(format_error(other, expected)),
    }
}

fn cast_float(value: &ConstValue, expected: &'static str) -> Result<f64, CastError> {
    match value {
        ConstValue::Number(number) => number
            .as_f64()
            .ok_or_else(|| format_error(value, expected)),
        ConstValue::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format_error(value, expected)),
        other => Err(format_error(other, expected)),
    }
}

fn cast_decimal(value: &ConstValue) -> Result<Decimal, CastError> {
    let text = match value {
        // going through the textual form keeps the declared scale exact
        ConstValue::Number(number) => number.to_string(),
        ConstValue::String(s) => s.trim().to_string(),
        other => return Err(format_error(other, "decimal")),
    };
    text.parse::<Decimal>()
        .map_err(|_| format_error(value, "decimal"))
}

/// Coerce an input value against a specific column, normalizing any cast
/// failure into the request-level error that names the offending parameter
/// and the column whose type it violated.
pub(crate) fn coerce(
    parameter: &str,
    column: &PhysicalColumn,
    value: &ConstValue,
) -> Result<ColumnValue, ResolverError> {
    cast_value(value, column.typ).map_err(|source| ResolverError::TypeMismatch {
        parameter: parameter.to_string(),
        column: format!("{}.{}", column.table_name, column.column_name),
        source,
    })
}
