use super::column::Column;
use super::{Expression, ExpressionContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    Asc,
    Desc,
}

#[derive(Debug, PartialEq)]
pub struct OrderBy<'a>(pub Vec<(Column<'a>, Ordering)>);

impl Expression for OrderBy<'_> {
    fn binding(&self, expression_context: &mut ExpressionContext) -> String {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(column, ordering)| {
                let column_stmt = column.binding(expression_context);
                let order_stmt = match ordering {
                    Ordering::Asc => "ASC",
                    Ordering::Desc => "DESC",
                };
                format!("{column_stmt} {order_stmt}")
            })
            .collect();

        format!("ORDER BY {}", parts.join(", "))
    }
}
