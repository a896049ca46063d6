use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The fixed enumeration of column system types the compiler understands.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SystemType {
    String,
    Byte,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Decimal,
    Boolean,
}

impl Display for SystemType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SystemType::String => "string",
            SystemType::Byte => "byte",
            SystemType::Int16 => "int16",
            SystemType::Int32 => "int32",
            SystemType::Int64 => "int64",
            SystemType::Float32 => "float32",
            SystemType::Float64 => "float64",
            SystemType::Decimal => "decimal",
            SystemType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A coerced, dialect-ready parameter value. One variant per system type plus
/// `Null`; consumers match exhaustively, never through an open-ended type
/// check.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ColumnValue {
    String(String),
    Byte(u8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    Bool(bool),
    Null,
}

impl ColumnValue {
    pub fn system_type(&self) -> Option<SystemType> {
        match self {
            ColumnValue::String(_) => Some(SystemType::String),
            ColumnValue::Byte(_) => Some(SystemType::Byte),
            ColumnValue::Int16(_) => Some(SystemType::Int16),
            ColumnValue::Int32(_) => Some(SystemType::Int32),
            ColumnValue::Int64(_) => Some(SystemType::Int64),
            ColumnValue::Float32(_) => Some(SystemType::Float32),
            ColumnValue::Float64(_) => Some(SystemType::Float64),
            ColumnValue::Decimal(_) => Some(SystemType::Decimal),
            ColumnValue::Bool(_) => Some(SystemType::Boolean),
            ColumnValue::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }
}

impl Display for ColumnValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnValue::String(v) => write!(f, "{v}"),
            ColumnValue::Byte(v) => write!(f, "{v}"),
            ColumnValue::Int16(v) => write!(f, "{v}"),
            ColumnValue::Int32(v) => write!(f, "{v}"),
            ColumnValue::Int64(v) => write!(f, "{v}"),
            ColumnValue::Float32(v) => write!(f, "{v}"),
            ColumnValue::Float64(v) => write!(f, "{v}"),
            ColumnValue::Decimal(v) => write!(f, "{v}"),
            ColumnValue::Bool(v) => write!(f, "{v}"),
            ColumnValue::Null => f.write_str("null"),
        }
    }
}
