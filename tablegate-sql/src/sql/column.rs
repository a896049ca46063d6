use serde::{Deserialize, Serialize};

use super::value::{ColumnValue, SystemType};
use super::{Expression, ExpressionContext};

/// A column of a physical table, as loaded from database metadata. Immutable
/// for the lifetime of a model snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PhysicalColumn {
    pub table_name: String,
    pub column_name: String,
    pub typ: SystemType,
    pub is_nullable: bool,
    /// The database populates the value (identity/sequence); excluded from
    /// inserts unless the caller supplies it explicitly.
    pub is_autogenerated: bool,
    /// Static default declared on the column. Schema metadata only; the
    /// insert builder never applies it.
    pub default_value: Option<ColumnValue>,
}

/// One operand of a rendered expression: a column reference, a bound
/// parameter, or one of the few literal forms the renderers emit themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum Column<'a> {
    Physical {
        column: &'a PhysicalColumn,
        table_alias: Option<String>,
    },
    /// A column of an aliased derived table (e.g. the output of a paginated
    /// relationship subquery), referenced by name only.
    Reference {
        table_alias: String,
        column_name: String,
    },
    /// A coerced value bound by named placeholder; never inlined into text.
    Param(ColumnValue),
    Null,
    Star,
}

impl Expression for Column<'_> {
    fn binding(&self, expression_context: &mut ExpressionContext) -> String {
        match self {
            Column::Physical {
                column,
                table_alias,
            } => {
                let dialect = expression_context.dialect();
                if expression_context.plain() {
                    dialect.quote(&column.column_name)
                } else {
                    let qualifier = table_alias.as_deref().unwrap_or(&column.table_name);
                    format!(
                        "{}.{}",
                        dialect.quote(qualifier),
                        dialect.quote(&column.column_name)
                    )
                }
            }
            Column::Reference {
                table_alias,
                column_name,
            } => {
                let dialect = expression_context.dialect();
                format!(
                    "{}.{}",
                    dialect.quote(table_alias),
                    dialect.quote(column_name)
                )
            }
            Column::Param(value) => expression_context.next_param(value.clone()),
            Column::Null => "NULL".to_string(),
            Column::Star => "*".to_string(),
        }
    }
}
