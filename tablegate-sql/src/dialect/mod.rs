mod mssql;
mod postgres;

pub use mssql::MssqlDialect;
pub use postgres::PostgresDialect;

use crate::sql::predicate::{CaseSensitivity, StringMatchKind};

/// A target engine's SQL syntax variant. Implementations are pure string
/// assembly: identifier quoting, returning-clause placement, upsert syntax,
/// pagination, and string matching. Parameter placeholders arrive already
/// allocated; a dialect never inlines a value into text.
pub trait Dialect: Sync {
    fn name(&self) -> &'static str;

    /// Quote an identifier. Bit-exact per engine: mismatched quoting produces
    /// invalid SQL or silently-wrong identifier resolution.
    fn quote(&self, identifier: &str) -> String;

    /// A vacuously true/false condition. Not every engine has boolean
    /// literals, so this cannot be a plain `true`/`false` everywhere.
    fn boolean_condition(&self, value: bool) -> String;

    fn string_match(
        &self,
        lhs: &str,
        rhs: &str,
        kind: StringMatchKind,
        case_sensitivity: CaseSensitivity,
    ) -> String;

    /// Pagination clause from pre-allocated placeholder names. Empty when
    /// neither bound is present. Callers guarantee an ORDER BY accompanies
    /// pagination (required by some engines).
    fn pagination(&self, limit: Option<&str>, offset: Option<&str>) -> String;

    /// A correlated subquery joined into the FROM clause.
    fn lateral_join(&self, subquery: &str, alias: &str) -> String;

    fn insert_statement(
        &self,
        table: &str,
        columns: &[String],
        values: &[String],
        returning: &[String],
    ) -> String;

    fn update_statement(
        &self,
        table: &str,
        assignments: &[String],
        predicate: &str,
        returning: &[String],
    ) -> String;

    fn delete_statement(&self, table: &str, predicate: &str, returning: &[String]) -> String;

    /// Native insert-or-update over the primary key. `columns`/`values` carry
    /// the full insert set (primary key included); the update arm is derived
    /// from the non-key columns.
    fn upsert_statement(
        &self,
        table: &str,
        pk_columns: &[String],
        columns: &[String],
        values: &[String],
        returning: &[String],
    ) -> String;
}
