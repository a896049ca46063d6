use super::column::Column;
use super::limit::Limit;
use super::offset::Offset;
use super::order::OrderBy;
use super::physical_table::PhysicalTable;
use super::predicate::Predicate;
use super::value::ColumnValue;
use super::{Expression, ExpressionContext};

/// A table reference carrying its builder-assigned alias. Aliases come from
/// the per-query counter, so self-joins and repeated relationship traversals
/// never produce ambiguous column references.
#[derive(Debug, PartialEq)]
pub struct AliasedTable<'a> {
    pub table: &'a PhysicalTable,
    pub alias: String,
}

impl Expression for AliasedTable<'_> {
    fn binding(&self, expression_context: &mut ExpressionContext) -> String {
        let table_stmt = self.table.binding(expression_context);
        let alias_stmt = expression_context.dialect().quote(&self.alias);
        format!("{table_stmt} AS {alias_stmt}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

#[derive(Debug, PartialEq)]
pub enum JoinTarget<'a> {
    Table(AliasedTable<'a>),
    /// A correlated, independently paginated subquery (cardinality-many
    /// relationship traversal). The correlation predicate lives inside the
    /// subquery; the join condition itself is vacuous.
    Lateral {
        select: Box<Select<'a>>,
        alias: String,
    },
}

#[derive(Debug, PartialEq)]
pub struct Join<'a> {
    pub kind: JoinKind,
    pub target: JoinTarget<'a>,
    pub predicate: Predicate<'a>,
}

impl Expression for Join<'_> {
    fn binding(&self, expression_context: &mut ExpressionContext) -> String {
        match &self.target {
            JoinTarget::Table(aliased) => {
                let keyword = match self.kind {
                    JoinKind::Inner => "INNER JOIN",
                    JoinKind::Left => "LEFT JOIN",
                };
                let table_stmt = aliased.binding(expression_context);
                let predicate_stmt = self.predicate.binding(expression_context);
                format!("{keyword} {table_stmt} ON {predicate_stmt}")
            }
            JoinTarget::Lateral { select, alias } => {
                let subquery_stmt = select.binding(expression_context);
                let alias_stmt = expression_context.dialect().quote(alias);
                expression_context
                    .dialect()
                    .lateral_join(&subquery_stmt, &alias_stmt)
            }
        }
    }
}

/// Select IR: projection, joins for relationship traversal, predicate tree,
/// ordering and pagination. Builders guarantee an ORDER BY accompanies
/// pagination.
#[derive(Debug, PartialEq)]
pub struct Select<'a> {
    pub table: AliasedTable<'a>,
    pub columns: Vec<(Column<'a>, Option<String>)>,
    pub joins: Vec<Join<'a>>,
    pub predicate: Predicate<'a>,
    pub order_by: Option<OrderBy<'a>>,
    pub limit: Option<Limit>,
    pub offset: Option<Offset>,
}

impl Expression for Select<'_> {
    fn binding(&self, expression_context: &mut ExpressionContext) -> String {
        let column_stmts: Vec<String> = self
            .columns
            .iter()
            .map(|(column, output_alias)| {
                let column_stmt = column.binding(expression_context);
                match output_alias {
                    Some(alias) => {
                        let alias_stmt = expression_context.dialect().quote(alias);
                        format!("{column_stmt} AS {alias_stmt}")
                    }
                    None => column_stmt,
                }
            })
            .collect();

        let table_stmt = self.table.binding(expression_context);

        let join_stmts: Vec<String> = self
            .joins
            .iter()
            .map(|join| join.binding(expression_context))
            .collect();
        let join_part: String = join_stmts
            .iter()
            .map(|stmt| format!(" {stmt}"))
            .collect::<Vec<_>>()
            .concat();

        let predicate_part = match &self.predicate {
            // avoid a correct, but inelegant "WHERE true" clause
            Predicate::True => String::new(),
            predicate => format!(" WHERE {}", predicate.binding(expression_context)),
        };

        let order_by_part = self
            .order_by
            .as_ref()
            .map(|order_by| format!(" {}", order_by.binding(expression_context)))
            .unwrap_or_default();

        let limit_placeholder = self
            .limit
            .map(|limit| expression_context.next_param(ColumnValue::Int64(limit.0)));
        let offset_placeholder = self
            .offset
            .map(|offset| expression_context.next_param(ColumnValue::Int64(offset.0)));
        let pagination_part = expression_context
            .dialect()
            .pagination(limit_placeholder.as_deref(), offset_placeholder.as_deref());

        format!(
            "SELECT {} FROM {}{}{}{}{}",
            column_stmts.join(", "),
            table_stmt,
            join_part,
            predicate_part,
            order_by_part,
            pagination_part
        )
    }
}
