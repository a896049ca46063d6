use serde::{Deserialize, Serialize};

use super::column::PhysicalColumn;
use super::{Expression, ExpressionContext};

/// Identifies a physical database object (schema plus table name).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatabaseObject {
    pub schema: String,
    pub name: String,
}

/// A table definition loaded from database metadata: column list in
/// declaration order plus the primary-key column names. Read-only once
/// published; hot reload replaces the whole snapshot, never mutates it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PhysicalTable {
    pub database_object: DatabaseObject,
    pub columns: Vec<PhysicalColumn>,
    pub pk_columns: Vec<String>,
}

impl PhysicalTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.column_name == name)
    }

    pub fn get_physical_column(&self, name: &str) -> Option<&PhysicalColumn> {
        self.columns
            .iter()
            .find(|column| column.column_name == name)
    }

    pub fn is_pk(&self, column_name: &str) -> bool {
        self.pk_columns.iter().any(|pk| pk == column_name)
    }

    /// Primary-key columns in declared key order.
    pub fn pk_physical_columns(&self) -> Vec<&PhysicalColumn> {
        self.pk_columns
            .iter()
            .filter_map(|name| self.get_physical_column(name))
            .collect()
    }
}

impl Expression for PhysicalTable {
    fn binding(&self, expression_context: &mut ExpressionContext) -> String {
        let dialect = expression_context.dialect();
        format!(
            "{}.{}",
            dialect.quote(&self.database_object.schema),
            dialect.quote(&self.database_object.name)
        )
    }
}
