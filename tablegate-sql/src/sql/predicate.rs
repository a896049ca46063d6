use super::column::Column;
use super::{Expression, ExpressionContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseSensitivity {
    Sensitive,
    Insensitive,
}

/// Which part of the string a match anchors to. The dialect decides how the
/// pattern is assembled (`||` vs `CONCAT`), so the IR only records the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringMatchKind {
    Contains,
    StartsWith,
    EndsWith,
}

/// A predicate tree. Leaves are fully bound: one side a column reference, the
/// other a coerced parameter (or another column for join conditions).
#[derive(Debug, PartialEq)]
pub enum Predicate<'a> {
    True,
    False,
    Eq(Column<'a>, Column<'a>),
    Neq(Column<'a>, Column<'a>),
    Lt(Column<'a>, Column<'a>),
    Lte(Column<'a>, Column<'a>),
    Gt(Column<'a>, Column<'a>),
    Gte(Column<'a>, Column<'a>),
    IsNull(Column<'a>),
    // Prefer Predicate::and()/or(), which simplify the clause
    And(Box<Predicate<'a>>, Box<Predicate<'a>>),
    Or(Box<Predicate<'a>>, Box<Predicate<'a>>),
    Not(Box<Predicate<'a>>),
    StringMatch(Column<'a>, Column<'a>, StringMatchKind, CaseSensitivity),
}

impl<'a> Predicate<'a> {
    /// Build a leaf from a filter-operator name. String operators honor the
    /// requested case sensitivity; everything else ignores it.
    pub fn from_name(
        op_name: &str,
        lhs: Column<'a>,
        rhs: Column<'a>,
        case_sensitivity: CaseSensitivity,
    ) -> Option<Predicate<'a>> {
        match op_name {
            "eq" => Some(Predicate::Eq(lhs, rhs)),
            "neq" => Some(Predicate::Neq(lhs, rhs)),
            "lt" => Some(Predicate::Lt(lhs, rhs)),
            "lte" => Some(Predicate::Lte(lhs, rhs)),
            "gt" => Some(Predicate::Gt(lhs, rhs)),
            "gte" => Some(Predicate::Gte(lhs, rhs)),
            "contains" => Some(Predicate::StringMatch(
                lhs,
                rhs,
                StringMatchKind::Contains,
                case_sensitivity,
            )),
            "startsWith" => Some(Predicate::StringMatch(
                lhs,
                rhs,
                StringMatchKind::StartsWith,
                case_sensitivity,
            )),
            "endsWith" => Some(Predicate::StringMatch(
                lhs,
                rhs,
                StringMatchKind::EndsWith,
                case_sensitivity,
            )),
            _ => None,
        }
    }

    pub fn and(lhs: Predicate<'a>, rhs: Predicate<'a>) -> Predicate<'a> {
        match (lhs, rhs) {
            (Predicate::True, rhs) => rhs,
            (lhs, Predicate::True) => lhs,
            (Predicate::False, _) => Predicate::False,
            (_, Predicate::False) => Predicate::False,
            (lhs, rhs) => Predicate::And(Box::new(lhs), Box::new(rhs)),
        }
    }

    pub fn or(lhs: Predicate<'a>, rhs: Predicate<'a>) -> Predicate<'a> {
        match (lhs, rhs) {
            (Predicate::True, _) => Predicate::True,
            (_, Predicate::True) => Predicate::True,
            (Predicate::False, rhs) => rhs,
            (lhs, Predicate::False) => lhs,
            (lhs, rhs) => Predicate::Or(Box::new(lhs), Box::new(rhs)),
        }
    }
}

impl<'a> std::ops::Not for Predicate<'a> {
    type Output = Predicate<'a>;

    fn not(self) -> Self::Output {
        match self {
            Predicate::True => Predicate::False,
            Predicate::False => Predicate::True,
            predicate => Predicate::Not(Box::new(predicate)),
        }
    }
}

impl Expression for Predicate<'_> {
    fn binding(&self, expression_context: &mut ExpressionContext) -> String {
        match self {
            Predicate::True => expression_context.dialect().boolean_condition(true),
            Predicate::False => expression_context.dialect().boolean_condition(false),
            Predicate::Eq(lhs, rhs) => combine(lhs, rhs, expression_context, "="),
            Predicate::Neq(lhs, rhs) => combine(lhs, rhs, expression_context, "<>"),
            Predicate::Lt(lhs, rhs) => combine(lhs, rhs, expression_context, "<"),
            Predicate::Lte(lhs, rhs) => combine(lhs, rhs, expression_context, "<="),
            Predicate::Gt(lhs, rhs) => combine(lhs, rhs, expression_context, ">"),
            Predicate::Gte(lhs, rhs) => combine(lhs, rhs, expression_context, ">="),
            Predicate::IsNull(column) => {
                format!("{} IS NULL", column.binding(expression_context))
            }
            Predicate::And(lhs, rhs) => {
                let lhs = lhs.binding(expression_context);
                let rhs = rhs.binding(expression_context);
                format!("({lhs} AND {rhs})")
            }
            Predicate::Or(lhs, rhs) => {
                let lhs = lhs.binding(expression_context);
                let rhs = rhs.binding(expression_context);
                format!("({lhs} OR {rhs})")
            }
            Predicate::Not(predicate) => {
                format!("NOT ({})", predicate.binding(expression_context))
            }
            Predicate::StringMatch(lhs, rhs, kind, case_sensitivity) => {
                let lhs = lhs.binding(expression_context);
                let rhs = rhs.binding(expression_context);
                expression_context
                    .dialect()
                    .string_match(&lhs, &rhs, *kind, *case_sensitivity)
            }
        }
    }
}

fn combine(
    lhs: &Column,
    rhs: &Column,
    expression_context: &mut ExpressionContext,
    op: &str,
) -> String {
    let lhs = lhs.binding(expression_context);
    let rhs = rhs.binding(expression_context);
    format!("{lhs} {op} {rhs}")
}
