use super::Dialect;
use crate::sql::predicate::{CaseSensitivity, StringMatchKind};

/// Bracket identifier family: SQL Server.
pub struct MssqlDialect;

impl MssqlDialect {
    fn output_clause(&self, prefix: &str, returning: &[String]) -> String {
        let outputs: Vec<String> = returning.iter().map(|r| format!("{prefix}.{r}")).collect();
        format!(" OUTPUT {}", outputs.join(", "))
    }
}

impl Dialect for MssqlDialect {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn quote(&self, identifier: &str) -> String {
        format!("[{}]", identifier.replace(']', "]]"))
    }

    // T-SQL has no boolean literals in a condition position
    fn boolean_condition(&self, value: bool) -> String {
        if value { "1 = 1" } else { "1 = 0" }.to_string()
    }

    fn string_match(
        &self,
        lhs: &str,
        rhs: &str,
        kind: StringMatchKind,
        case_sensitivity: CaseSensitivity,
    ) -> String {
        let pattern = match kind {
            StringMatchKind::Contains => format!("CONCAT('%', {rhs}, '%')"),
            StringMatchKind::StartsWith => format!("CONCAT({rhs}, '%')"),
            StringMatchKind::EndsWith => format!("CONCAT('%', {rhs})"),
        };
        match case_sensitivity {
            // collation-independent lowering of both operands
            CaseSensitivity::Insensitive => format!("LOWER({lhs}) LIKE LOWER({pattern})"),
            CaseSensitivity::Sensitive => format!("{lhs} LIKE {pattern}"),
        }
    }

    fn pagination(&self, limit: Option<&str>, offset: Option<&str>) -> String {
        match (limit, offset) {
            (None, None) => String::new(),
            (limit, offset) => {
                let offset_part = format!(" OFFSET {} ROWS", offset.unwrap_or("0"));
                match limit {
                    Some(limit) => format!("{offset_part} FETCH NEXT {limit} ROWS ONLY"),
                    None => offset_part,
                }
            }
        }
    }

    fn lateral_join(&self, subquery: &str, alias: &str) -> String {
        format!("OUTER APPLY ({subquery}) AS {alias}")
    }

    fn insert_statement(
        &self,
        table: &str,
        columns: &[String],
        values: &[String],
        returning: &[String],
    ) -> String {
        // OUTPUT precedes VALUES on this engine
        let output = if returning.is_empty() {
            String::new()
        } else {
            self.output_clause("INSERTED", returning)
        };
        format!(
            "INSERT INTO {} ({}){} VALUES ({})",
            table,
            columns.join(", "),
            output,
            values.join(", ")
        )
    }

    fn update_statement(
        &self,
        table: &str,
        assignments: &[String],
        predicate: &str,
        returning: &[String],
    ) -> String {
        let output = if returning.is_empty() {
            String::new()
        } else {
            self.output_clause("INSERTED", returning)
        };
        format!(
            "UPDATE {} SET {}{} WHERE {}",
            table,
            assignments.join(", "),
            output,
            predicate
        )
    }

    fn delete_statement(&self, table: &str, predicate: &str, returning: &[String]) -> String {
        let output = if returning.is_empty() {
            String::new()
        } else {
            self.output_clause("DELETED", returning)
        };
        format!("DELETE FROM {table}{output} WHERE {predicate}")
    }

    fn upsert_statement(
        &self,
        table: &str,
        pk_columns: &[String],
        columns: &[String],
        values: &[String],
        returning: &[String],
    ) -> String {
        let target = self.quote("_target");
        let source = self.quote("_source");

        let on: Vec<String> = pk_columns
            .iter()
            .map(|pk| format!("{target}.{pk} = {source}.{pk}"))
            .collect();

        let assignments: Vec<String> = columns
            .iter()
            .filter(|column| !pk_columns.contains(column))
            .map(|column| format!("{column} = {source}.{column}"))
            .collect();

        let source_columns: Vec<String> =
            columns.iter().map(|c| format!("{source}.{c}")).collect();

        let matched_arm = if assignments.is_empty() {
            String::new()
        } else {
            format!(" WHEN MATCHED THEN UPDATE SET {}", assignments.join(", "))
        };

        let output = if returning.is_empty() {
            String::new()
        } else {
            self.output_clause("INSERTED", returning)
        };

        // MERGE statements require a terminating semicolon
        format!(
            "MERGE INTO {} AS {} USING (VALUES ({})) AS {} ({}) ON {}{} WHEN NOT MATCHED THEN INSERT ({}) VALUES ({}){};",
            table,
            target,
            values.join(", "),
            source,
            columns.join(", "),
            on.join(" AND "),
            matched_arm,
            columns.join(", "),
            source_columns.join(", "),
            output
        )
    }
}
