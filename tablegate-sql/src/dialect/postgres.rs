use super::Dialect;
use crate::sql::predicate::{CaseSensitivity, StringMatchKind};

/// Double-quote identifier family: PostgreSQL.
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn quote(&self, identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }

    fn boolean_condition(&self, value: bool) -> String {
        if value { "true" } else { "false" }.to_string()
    }

    fn string_match(
        &self,
        lhs: &str,
        rhs: &str,
        kind: StringMatchKind,
        case_sensitivity: CaseSensitivity,
    ) -> String {
        // the concat operator (||) handles both literals and column references
        let pattern = match kind {
            StringMatchKind::Contains => format!("'%' || {rhs} || '%'"),
            StringMatchKind::StartsWith => format!("{rhs} || '%'"),
            StringMatchKind::EndsWith => format!("'%' || {rhs}"),
        };
        match case_sensitivity {
            CaseSensitivity::Sensitive => format!("{lhs} LIKE {pattern}"),
            CaseSensitivity::Insensitive => format!("{lhs} ILIKE {pattern}"),
        }
    }

    fn pagination(&self, limit: Option<&str>, offset: Option<&str>) -> String {
        match (limit, offset) {
            (Some(limit), Some(offset)) => format!(" LIMIT {limit} OFFSET {offset}"),
            (Some(limit), None) => format!(" LIMIT {limit}"),
            (None, Some(offset)) => format!(" OFFSET {offset}"),
            (None, None) => String::new(),
        }
    }

    fn lateral_join(&self, subquery: &str, alias: &str) -> String {
        format!("LEFT JOIN LATERAL ({subquery}) AS {alias} ON true")
    }

    fn insert_statement(
        &self,
        table: &str,
        columns: &[String],
        values: &[String],
        returning: &[String],
    ) -> String {
        let stmt = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            values.join(", ")
        );
        if returning.is_empty() {
            stmt
        } else {
            format!("{} RETURNING {}", stmt, returning.join(", "))
        }
    }

    fn update_statement(
        &self,
        table: &str,
        assignments: &[String],
        predicate: &str,
        returning: &[String],
    ) -> String {
        let stmt = format!(
            "UPDATE {} SET {} WHERE {}",
            table,
            assignments.join(", "),
            predicate
        );
        if returning.is_empty() {
            stmt
        } else {
            format!("{} RETURNING {}", stmt, returning.join(", "))
        }
    }

    fn delete_statement(&self, table: &str, predicate: &str, returning: &[String]) -> String {
        let stmt = format!("DELETE FROM {table} WHERE {predicate}");
        if returning.is_empty() {
            stmt
        } else {
            format!("{} RETURNING {}", stmt, returning.join(", "))
        }
    }

    fn upsert_statement(
        &self,
        table: &str,
        pk_columns: &[String],
        columns: &[String],
        values: &[String],
        returning: &[String],
    ) -> String {
        // Re-assign non-key columns from EXCLUDED so insert parameters are
        // bound exactly once.
        let assignments: Vec<String> = columns
            .iter()
            .filter(|column| !pk_columns.contains(column))
            .map(|column| format!("{column} = EXCLUDED.{column}"))
            .collect();

        let conflict_action = if assignments.is_empty() {
            "DO NOTHING".to_string()
        } else {
            format!("DO UPDATE SET {}", assignments.join(", "))
        };

        let stmt = format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) {}",
            table,
            columns.join(", "),
            values.join(", "),
            pk_columns.join(", "),
            conflict_action
        );
        if returning.is_empty() {
            stmt
        } else {
            format!("{} RETURNING {}", stmt, returning.join(", "))
        }
    }
}
