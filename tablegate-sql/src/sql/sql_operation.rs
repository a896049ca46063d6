use indexmap::IndexMap;
use tracing::debug;

use super::delete::Delete;
use super::insert::Insert;
use super::select::Select;
use super::update::Update;
use super::upsert::Upsert;
use super::value::ColumnValue;
use super::{Expression, ExpressionContext};
use crate::dialect::Dialect;

/// One compiled database operation, ready for rendering.
#[derive(Debug)]
pub enum SqlOperation<'a> {
    Select(Select<'a>),
    Insert(Insert<'a>),
    Update(Update<'a>),
    Upsert(Upsert<'a>),
    Delete(Delete<'a>),
}

impl Expression for SqlOperation<'_> {
    fn binding(&self, expression_context: &mut ExpressionContext) -> String {
        match self {
            SqlOperation::Select(select) => select.binding(expression_context),
            SqlOperation::Insert(insert) => insert.binding(expression_context),
            SqlOperation::Update(update) => update.binding(expression_context),
            SqlOperation::Upsert(upsert) => upsert.binding(expression_context),
            SqlOperation::Delete(delete) => delete.binding(expression_context),
        }
    }
}

/// Rendered SQL text plus its named parameter set, in placeholder-allocation
/// order. Handed as-is to the execution collaborator; parameters are passed
/// strictly by name, never inlined.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub text: String,
    pub parameters: IndexMap<String, ColumnValue>,
}

/// Render an operation for one dialect. Pure and deterministic: identical IR
/// yields identical text and parameter names, so upstream plan caching can
/// key on the text.
pub fn build(operation: &SqlOperation, dialect: &dyn Dialect) -> SqlQuery {
    let mut expression_context = ExpressionContext::new(dialect);
    let text = operation.binding(&mut expression_context);
    let parameters = expression_context.into_parameters();

    debug!(
        dialect = dialect.name(),
        parameters = parameters.len(),
        "rendered statement"
    );

    SqlQuery { text, parameters }
}
