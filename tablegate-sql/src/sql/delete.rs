use super::column::Column;
use super::physical_table::PhysicalTable;
use super::predicate::Predicate;
use super::{Expression, ExpressionContext};

#[derive(Debug)]
pub struct Delete<'a> {
    pub table: &'a PhysicalTable,
    pub predicate: Predicate<'a>,
    pub returning: Vec<Column<'a>>,
}

impl Expression for Delete<'_> {
    fn binding(&self, expression_context: &mut ExpressionContext) -> String {
        let table_stmt = self.table.binding(expression_context);
        let predicate_stmt = self.predicate.binding(expression_context);

        let returning_stmts: Vec<String> = expression_context
            .with_plain(|expression_context| {
                self.returning
                    .iter()
                    .map(|ret| ret.binding(expression_context))
                    .collect()
            });

        let dialect = expression_context.dialect();
        dialect.delete_statement(&table_stmt, &predicate_stmt, &returning_stmts)
    }
}
