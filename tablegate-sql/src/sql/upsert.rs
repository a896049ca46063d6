use super::column::{Column, PhysicalColumn};
use super::physical_table::PhysicalTable;
use super::{Expression, ExpressionContext};

/// Insert-or-update IR over the primary key. `columns`/`values` are the full
/// insert set (key columns first); each dialect derives its update arm from
/// the non-key columns.
#[derive(Debug)]
pub struct Upsert<'a> {
    pub table: &'a PhysicalTable,
    pub pk_columns: Vec<&'a PhysicalColumn>,
    pub columns: Vec<&'a PhysicalColumn>,
    pub values: Vec<Column<'a>>,
    pub returning: Vec<Column<'a>>,
}

impl Expression for Upsert<'_> {
    fn binding(&self, expression_context: &mut ExpressionContext) -> String {
        let table_stmt = self.table.binding(expression_context);

        let (pk_stmts, column_stmts, returning_stmts) =
            expression_context.with_plain(|expression_context| {
                let dialect = expression_context.dialect();
                let pk_stmts: Vec<String> = self
                    .pk_columns
                    .iter()
                    .map(|column| dialect.quote(&column.column_name))
                    .collect();
                let column_stmts: Vec<String> = self
                    .columns
                    .iter()
                    .map(|column| dialect.quote(&column.column_name))
                    .collect();
                let returning_stmts: Vec<String> = self
                    .returning
                    .iter()
                    .map(|ret| ret.binding(expression_context))
                    .collect();
                (pk_stmts, column_stmts, returning_stmts)
            });

        let value_stmts: Vec<String> = self
            .values
            .iter()
            .map(|value| value.binding(expression_context))
            .collect();

        let dialect = expression_context.dialect();
        dialect.upsert_statement(
            &table_stmt,
            &pk_stmts,
            &column_stmts,
            &value_stmts,
            &returning_stmts,
        )
    }
}
