use super::column::{Column, PhysicalColumn};
use super::physical_table::PhysicalTable;
use super::predicate::Predicate;
use super::{Expression, ExpressionContext};

/// Update IR: SET assignments plus the predicate identifying the target rows.
/// Full-overwrite semantics are the builder's concern; by the time the IR
/// exists, omitted columns already appear as explicit NULL assignments.
#[derive(Debug)]
pub struct Update<'a> {
    pub table: &'a PhysicalTable,
    pub assignments: Vec<(&'a PhysicalColumn, Column<'a>)>,
    pub predicate: Predicate<'a>,
    pub returning: Vec<Column<'a>>,
}

impl Expression for Update<'_> {
    fn binding(&self, expression_context: &mut ExpressionContext) -> String {
        let table_stmt = self.table.binding(expression_context);

        let assignment_stmts: Vec<String> =
            expression_context.with_plain(|expression_context| {
                self.assignments
                    .iter()
                    .map(|(column, value)| {
                        let column_stmt =
                            expression_context.dialect().quote(&column.column_name);
                        let value_stmt = value.binding(expression_context);
                        format!("{column_stmt} = {value_stmt}")
                    })
                    .collect()
            });

        let predicate_stmt = self.predicate.binding(expression_context);

        let returning_stmts: Vec<String> = expression_context
            .with_plain(|expression_context| {
                self.returning
                    .iter()
                    .map(|ret| ret.binding(expression_context))
                    .collect()
            });

        let dialect = expression_context.dialect();
        dialect.update_statement(
            &table_stmt,
            &assignment_stmts,
            &predicate_stmt,
            &returning_stmts,
        )
    }
}
