#[macro_use]
#[cfg(test)]
mod test_util;

pub mod column;
pub mod delete;
pub mod insert;
pub mod limit;
pub mod offset;
pub mod order;
pub mod physical_table;
pub mod predicate;
pub mod select;
pub mod sql_operation;
pub mod update;
pub mod upsert;
pub mod value;

use indexmap::IndexMap;

use crate::counter::Counter;
use crate::dialect::Dialect;
use value::ColumnValue;

/// A fragment of a statement that knows how to render itself as SQL text,
/// allocating named placeholders through the context as it goes.
pub trait Expression {
    fn binding(&self, expression_context: &mut ExpressionContext) -> String;
}

impl<T> Expression for Box<T>
where
    T: Expression,
{
    fn binding(&self, expression_context: &mut ExpressionContext) -> String {
        self.as_ref().binding(expression_context)
    }
}

/// Per-rendering state: the target dialect, the placeholder counter, and the
/// accumulated placeholder-to-value map. One context serves exactly one
/// statement; renderers never mutate the IR they consume.
pub struct ExpressionContext<'d> {
    dialect: &'d dyn Dialect,
    counter: Counter,
    parameters: IndexMap<String, ColumnValue>,
    plain: bool, // render column names without the table qualifier, i.e. "col" instead of "table"."col"
}

impl<'d> ExpressionContext<'d> {
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self {
            dialect,
            counter: Counter::default(),
            parameters: IndexMap::new(),
            plain: false,
        }
    }

    pub fn dialect(&self) -> &'d dyn Dialect {
        self.dialect
    }

    pub fn plain(&self) -> bool {
        self.plain
    }

    /// Allocate the next placeholder name and bind `value` to it.
    pub fn next_param(&mut self, value: ColumnValue) -> String {
        let name = format!("@param{}", self.counter.next());
        self.parameters.insert(name.clone(), value);
        name
    }

    pub fn into_parameters(self) -> IndexMap<String, ColumnValue> {
        self.parameters
    }

    pub fn with_plain<F, R>(&mut self, func: F) -> R
    where
        F: FnOnce(&mut ExpressionContext<'d>) -> R,
    {
        let cur_plain = self.plain;
        self.plain = true;
        let ret = func(self);
        self.plain = cur_plain;
        ret
    }
}
