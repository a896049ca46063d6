use super::column::{Column, PhysicalColumn};
use super::physical_table::PhysicalTable;
use super::{Expression, ExpressionContext};

/// Insert IR: parallel column/value lists plus the return projection
/// (the primary key, so callers learn the inserted row's identity without a
/// second round trip).
#[derive(Debug)]
pub struct Insert<'a> {
    pub table: &'a PhysicalTable,
    pub columns: Vec<&'a PhysicalColumn>,
    pub values: Vec<Column<'a>>,
    pub returning: Vec<Column<'a>>,
}

impl Expression for Insert<'_> {
    fn binding(&self, expression_context: &mut ExpressionContext) -> String {
        let table_stmt = self.table.binding(expression_context);

        let column_stmts: Vec<String> = expression_context.with_plain(|expression_context| {
            self.columns
                .iter()
                .map(|column| {
                    expression_context
                        .dialect()
                        .quote(&column.column_name)
                })
                .collect()
        });

        let value_stmts: Vec<String> = self
            .values
            .iter()
            .map(|value| value.binding(expression_context))
            .collect();

        let returning_stmts: Vec<String> = expression_context
            .with_plain(|expression_context| {
                self.returning
                    .iter()
                    .map(|ret| ret.binding(expression_context))
                    .collect()
            });

        let dialect = expression_context.dialect();
        dialect.insert_statement(&table_stmt, &column_stmts, &value_stmts, &returning_stmts)
    }
}
