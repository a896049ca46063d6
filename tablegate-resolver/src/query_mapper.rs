use async_graphql_value::ConstValue;
use tracing::debug;

use tablegate_model::{Cardinality, DatabaseModel, Entity, Relationship};
use tablegate_sql::{
    AliasedTable, Column, Counter, Join, JoinKind, JoinTarget, Limit, Offset, OrderBy, Ordering,
    Predicate, Select,
};

use crate::error::{ResolverError, WithContext};
use crate::limit_offset_mapper::{map_limit, map_offset};
use crate::order_by_mapper::map_order_by;
use crate::predicate_mapper::map_predicate;

/// One requested output field: either a column of the entity or a traversal
/// into a declared relationship. Nested pagination only applies to
/// cardinality-many traversals; it arrives pre-parsed because the field list
/// itself is parsed from the request surface, not from a single argument
/// value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSelection {
    Column(String),
    Relationship {
        name: String,
        fields: Vec<FieldSelection>,
        limit: Option<i64>,
        offset: Option<i64>,
    },
}

/// The raw arguments of a read request. An empty field list selects every
/// column of the entity.
#[derive(Debug, Default)]
pub struct SelectRequest<'r> {
    pub fields: &'r [FieldSelection],
    pub filter: Option<&'r ConstValue>,
    pub order_by: Option<&'r ConstValue>,
    pub limit: Option<&'r ConstValue>,
    pub offset: Option<&'r ConstValue>,
}

/// Compile a read request into select IR. Table aliases come from a counter
/// owned by this call, so the same request always produces the same alias
/// assignment and therefore the same SQL text.
pub fn map_select<'a>(
    entity: &'a Entity,
    model: &'a DatabaseModel,
    request: &SelectRequest,
) -> Result<Select<'a>, ResolverError> {
    let limit = request.limit.map(map_limit).transpose()?;
    let offset = request.offset.map(map_offset).transpose()?;

    let mut counter = Counter::default();
    let select = map_select_inner(
        entity,
        model,
        request.fields,
        request.filter,
        request.order_by,
        limit,
        offset,
        None,
        None,
        &mut counter,
    )?;

    debug!(
        entity = %entity.name,
        columns = select.columns.len(),
        joins = select.joins.len(),
        "mapped select"
    );
    Ok(select)
}

#[allow(clippy::too_many_arguments)]
fn map_select_inner<'a>(
    entity: &'a Entity,
    model: &'a DatabaseModel,
    fields: &[FieldSelection],
    filter: Option<&ConstValue>,
    order_by_arg: Option<&ConstValue>,
    limit: Option<Limit>,
    offset: Option<Offset>,
    alias: Option<String>,
    correlation: Option<Predicate<'a>>,
    counter: &mut Counter,
) -> Result<Select<'a>, ResolverError> {
    let alias = alias.unwrap_or_else(|| format!("t{}", counter.next()));

    let mut columns = Vec::new();
    let mut joins = Vec::new();
    project_fields(
        entity, model, fields, &alias, None, &mut columns, &mut joins, counter,
    )?;

    let mut predicate = match filter {
        Some(filter) => map_predicate(entity, &alias, filter)?,
        None => Predicate::True,
    };
    if let Some(correlation) = correlation {
        predicate = Predicate::and(predicate, correlation);
    }

    let mut order_by = order_by_arg
        .map(|argument| map_order_by(entity, &alias, argument))
        .transpose()?;
    if order_by.is_none() && (limit.is_some() || offset.is_some()) {
        // pagination without an explicit ordering falls back to the primary
        // key, so pages stay stable across requests
        order_by = Some(OrderBy(
            entity
                .table
                .pk_physical_columns()
                .into_iter()
                .map(|column| {
                    (
                        Column::Physical {
                            column,
                            table_alias: Some(alias.clone()),
                        },
                        Ordering::Asc,
                    )
                })
                .collect(),
        ));
    }

    Ok(Select {
        table: AliasedTable {
            table: &entity.table,
            alias,
        },
        columns,
        joins,
        predicate,
        order_by,
        limit,
        offset,
    })
}

#[allow(clippy::too_many_arguments)]
fn project_fields<'a>(
    entity: &'a Entity,
    model: &'a DatabaseModel,
    fields: &[FieldSelection],
    table_alias: &str,
    prefix: Option<&str>,
    columns: &mut Vec<(Column<'a>, Option<String>)>,
    joins: &mut Vec<Join<'a>>,
    counter: &mut Counter,
) -> Result<(), ResolverError> {
    if fields.is_empty() {
        for column in &entity.table.columns {
            let output_alias = prefix.map(|p| format!("{p}__{}", column.column_name));
            columns.push((
                Column::Physical {
                    column,
                    table_alias: Some(table_alias.to_string()),
                },
                output_alias,
            ));
        }
        return Ok(());
    }

    for field in fields {
        match field {
            FieldSelection::Column(name) => {
                let column = entity
                    .table
                    .get_physical_column(name)
                    .ok_or_else(|| unknown_field(entity, name))?;
                let output_alias = prefix.map(|p| format!("{p}__{name}"));
                columns.push((
                    Column::Physical {
                        column,
                        table_alias: Some(table_alias.to_string()),
                    },
                    output_alias,
                ));
            }
            FieldSelection::Relationship {
                name,
                fields: nested,
                limit,
                offset,
            } => {
                let relationship = entity
                    .relationships
                    .get(name)
                    .ok_or_else(|| unknown_field(entity, name))?;
                let target = model.get_entity(&relationship.target_entity)?;
                let nested_prefix = match prefix {
                    Some(p) => format!("{p}__{name}"),
                    None => name.clone(),
                };

                match relationship.cardinality {
                    Cardinality::One => {
                        let join_alias = format!("t{}", counter.next());
                        let join_predicate = join_columns_predicate(
                            entity,
                            table_alias,
                            target,
                            &join_alias,
                            name,
                            relationship,
                        )?;
                        joins.push(Join {
                            kind: JoinKind::Left,
                            target: JoinTarget::Table(AliasedTable {
                                table: &target.table,
                                alias: join_alias.clone(),
                            }),
                            predicate: join_predicate,
                        });
                        project_fields(
                            target,
                            model,
                            nested,
                            &join_alias,
                            Some(&nested_prefix),
                            columns,
                            joins,
                            counter,
                        )?;
                    }
                    Cardinality::Many => {
                        let subquery_alias = format!("t{}", counter.next());
                        let correlation = join_columns_predicate(
                            entity,
                            table_alias,
                            target,
                            &subquery_alias,
                            name,
                            relationship,
                        )?;
                        let subquery = map_select_inner(
                            target,
                            model,
                            nested,
                            None,
                            None,
                            limit.map(Limit),
                            offset.map(Offset),
                            Some(subquery_alias),
                            Some(correlation),
                            counter,
                        )
                        .with_context(format!("While traversing relationship '{name}'"))?;
                        let lateral_alias = format!("t{}", counter.next());
                        for output in output_names(target, model, nested)? {
                            columns.push((
                                Column::Reference {
                                    table_alias: lateral_alias.clone(),
                                    column_name: output.clone(),
                                },
                                Some(format!("{nested_prefix}__{output}")),
                            ));
                        }
                        joins.push(Join {
                            kind: JoinKind::Left,
                            target: JoinTarget::Lateral {
                                select: Box::new(subquery),
                                alias: lateral_alias,
                            },
                            predicate: Predicate::True,
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

/// Column equality between the source and target sides of a relationship.
/// The target column goes on the left so the clause reads as a constraint on
/// the joined (or correlated) table.
fn join_columns_predicate<'a>(
    source: &'a Entity,
    source_alias: &str,
    target: &'a Entity,
    target_alias: &str,
    relationship_name: &str,
    relationship: &Relationship,
) -> Result<Predicate<'a>, ResolverError> {
    let mut predicate = Predicate::True;
    for (source_name, target_name) in relationship
        .source_columns
        .iter()
        .zip(&relationship.target_columns)
    {
        let source_column = source
            .table
            .get_physical_column(source_name)
            .ok_or_else(|| unknown_join_column(source, relationship_name, source_name))?;
        let target_column = target
            .table
            .get_physical_column(target_name)
            .ok_or_else(|| unknown_join_column(source, relationship_name, target_name))?;
        predicate = Predicate::and(
            predicate,
            Predicate::Eq(
                Column::Physical {
                    column: target_column,
                    table_alias: Some(target_alias.to_string()),
                },
                Column::Physical {
                    column: source_column,
                    table_alias: Some(source_alias.to_string()),
                },
            ),
        );
    }
    Ok(predicate)
}

/// The result column names a subquery exposes, mirroring how
/// `project_fields` aliases nested projections.
fn output_names(
    entity: &Entity,
    model: &DatabaseModel,
    fields: &[FieldSelection],
) -> Result<Vec<String>, ResolverError> {
    if fields.is_empty() {
        return Ok(entity
            .table
            .columns
            .iter()
            .map(|column| column.column_name.clone())
            .collect());
    }

    let mut names = Vec::new();
    for field in fields {
        match field {
            FieldSelection::Column(name) => names.push(name.clone()),
            FieldSelection::Relationship {
                name,
                fields: nested,
                ..
            } => {
                let relationship = entity
                    .relationships
                    .get(name)
                    .ok_or_else(|| unknown_field(entity, name))?;
                let target = model.get_entity(&relationship.target_entity)?;
                for nested_name in output_names(target, model, nested)? {
                    names.push(format!("{name}__{nested_name}"));
                }
            }
        }
    }
    Ok(names)
}

fn unknown_field(entity: &Entity, field: &str) -> ResolverError {
    ResolverError::UnknownField {
        entity: entity.name.clone(),
        field: field.to_string(),
    }
}

fn unknown_join_column(entity: &Entity, relationship: &str, column: &str) -> ResolverError {
    ResolverError::Model(tablegate_model::ModelError::UnknownRelationshipColumn {
        entity: entity.name.clone(),
        relationship: relationship.to_string(),
        column: column.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{library_model, parse_value};
    use tablegate_sql::{build, ColumnValue, MssqlDialect, PostgresDialect, SqlOperation};

    fn columns(names: &[&str]) -> Vec<FieldSelection> {
        names
            .iter()
            .map(|name| FieldSelection::Column(name.to_string()))
            .collect()
    }

    #[test]
    fn filtered_ordered_paginated_select() {
        let model = library_model();
        let entity = model.get_entity("Author").unwrap();
        let filter = parse_value(r#"{ "name": { "contains": "an", "caseInsensitive": true } }"#);
        let order = parse_value(r#"{ "name": "asc" }"#);
        let limit = parse_value("10");
        let offset = parse_value("20");

        let fields = columns(&["id", "name"]);
        let request = SelectRequest {
            fields: &fields,
            filter: Some(&filter),
            order_by: Some(&order),
            limit: Some(&limit),
            offset: Some(&offset),
        };

        let select = map_select(entity, &model, &request).unwrap();
        let query = build(&SqlOperation::Select(select), &PostgresDialect);
        assert_eq!(
            query.text,
            r#"SELECT "t0"."id", "t0"."name" FROM "public"."authors" AS "t0" WHERE "t0"."name" ILIKE '%' || @param0 || '%' ORDER BY "t0"."name" ASC LIMIT @param1 OFFSET @param2"#
        );
        assert_eq!(
            query.parameters.get("@param0"),
            Some(&ColumnValue::String("an".to_string()))
        );
        assert_eq!(
            query.parameters.get("@param1"),
            Some(&ColumnValue::Int64(10))
        );
        assert_eq!(
            query.parameters.get("@param2"),
            Some(&ColumnValue::Int64(20))
        );
    }

    #[test]
    fn pagination_without_ordering_falls_back_to_the_key() {
        let model = library_model();
        let entity = model.get_entity("Author").unwrap();
        let limit = parse_value("5");

        let fields = columns(&["name"]);
        let request = SelectRequest {
            fields: &fields,
            limit: Some(&limit),
            ..Default::default()
        };

        let select = map_select(entity, &model, &request).unwrap();
        let query = build(&SqlOperation::Select(select), &PostgresDialect);
        assert_eq!(
            query.text,
            r#"SELECT "t0"."name" FROM "public"."authors" AS "t0" ORDER BY "t0"."id" ASC LIMIT @param0"#
        );
    }

    #[test]
    fn one_cardinality_traversal_is_a_join() {
        let model = library_model();
        let entity = model.get_entity("Book").unwrap();

        let fields = vec![
            FieldSelection::Column("title".to_string()),
            FieldSelection::Relationship {
                name: "author".to_string(),
                fields: columns(&["name"]),
                limit: None,
                offset: None,
            },
        ];
        let request = SelectRequest {
            fields: &fields,
            ..Default::default()
        };

        let select = map_select(entity, &model, &request).unwrap();
        let query = build(&SqlOperation::Select(select), &PostgresDialect);
        assert_eq!(
            query.text,
            r#"SELECT "t0"."title", "t1"."name" AS "author__name" FROM "public"."books" AS "t0" LEFT JOIN "public"."authors" AS "t1" ON "t1"."id" = "t0"."author_id""#
        );
    }

    #[test]
    fn many_cardinality_traversal_is_a_lateral_subquery() {
        let model = library_model();
        let entity = model.get_entity("Author").unwrap();

        let fields = vec![
            FieldSelection::Column("id".to_string()),
            FieldSelection::Relationship {
                name: "books".to_string(),
                fields: columns(&["title"]),
                limit: Some(2),
                offset: None,
            },
        ];
        let request = SelectRequest {
            fields: &fields,
            ..Default::default()
        };

        let select = map_select(entity, &model, &request).unwrap();
        let query = build(&SqlOperation::Select(select), &PostgresDialect);
        assert_eq!(
            query.text,
            r#"SELECT "t0"."id", "t2"."title" AS "books__title" FROM "public"."authors" AS "t0" LEFT JOIN LATERAL (SELECT "t1"."title" FROM "public"."books" AS "t1" WHERE "t1"."author_id" = "t0"."id" ORDER BY "t1"."id" ASC LIMIT @param0) AS "t2" ON true"#
        );
        assert_eq!(
            query.parameters.get("@param0"),
            Some(&ColumnValue::Int64(2))
        );

        let select = map_select(entity, &model, &request).unwrap();
        let query = build(&SqlOperation::Select(select), &MssqlDialect);
        assert_eq!(
            query.text,
            "SELECT [t0].[id], [t2].[title] AS [books__title] FROM [public].[authors] AS [t0] OUTER APPLY (SELECT [t1].[title] FROM [public].[books] AS [t1] WHERE [t1].[author_id] = [t0].[id] ORDER BY [t1].[id] ASC OFFSET 0 ROWS FETCH NEXT @param0 ROWS ONLY) AS [t2]"
        );
    }

    #[test]
    fn empty_field_list_selects_every_column() {
        let model = library_model();
        let entity = model.get_entity("Book").unwrap();
        let request = SelectRequest::default();

        let select = map_select(entity, &model, &request).unwrap();
        let query = build(&SqlOperation::Select(select), &PostgresDialect);
        assert_eq!(
            query.text,
            r#"SELECT "t0"."id", "t0"."title", "t0"."author_id" FROM "public"."books" AS "t0""#
        );
    }

    #[test]
    fn same_request_compiles_to_identical_sql() {
        let model = library_model();
        let entity = model.get_entity("Author").unwrap();

        let fields = vec![
            FieldSelection::Column("name".to_string()),
            FieldSelection::Relationship {
                name: "books".to_string(),
                fields: columns(&["title"]),
                limit: None,
                offset: None,
            },
        ];
        let request = SelectRequest {
            fields: &fields,
            ..Default::default()
        };

        let first = build(
            &SqlOperation::Select(map_select(entity, &model, &request).unwrap()),
            &PostgresDialect,
        );
        let second = build(
            &SqlOperation::Select(map_select(entity, &model, &request).unwrap()),
            &PostgresDialect,
        );
        assert_eq!(first.text, second.text);
        assert_eq!(first.parameters, second.parameters);
    }

    #[test]
    fn traversal_errors_name_the_relationship() {
        let model = library_model();
        let entity = model.get_entity("Author").unwrap();

        let fields = vec![FieldSelection::Relationship {
            name: "books".to_string(),
            fields: columns(&["isbn"]),
            limit: None,
            offset: None,
        }];
        let request = SelectRequest {
            fields: &fields,
            ..Default::default()
        };

        let err = map_select(entity, &model, &request).unwrap_err();
        assert!(matches!(err, ResolverError::WithContext(..)));
        assert!(err.to_string().contains("relationship 'books'"));
    }

    #[test]
    fn unknown_relationship_is_rejected() {
        let model = library_model();
        let entity = model.get_entity("Author").unwrap();

        let fields = vec![FieldSelection::Relationship {
            name: "reviews".to_string(),
            fields: vec![],
            limit: None,
            offset: None,
        }];
        let request = SelectRequest {
            fields: &fields,
            ..Default::default()
        };

        assert!(matches!(
            map_select(entity, &model, &request),
            Err(ResolverError::UnknownField { field, .. }) if field == "reviews"
        ));
    }
}
