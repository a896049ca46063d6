use async_graphql_value::ConstValue;
use indexmap::IndexMap;

use tablegate_model::{Cardinality, DatabaseModel, Entity, Relationship};
use tablegate_sql::{ColumnValue, DatabaseObject, PhysicalColumn, PhysicalTable, SystemType};

pub(crate) fn parse_value(json: &str) -> ConstValue {
    ConstValue::from_json(serde_json::from_str(json).unwrap()).unwrap()
}

fn column(
    table: &str,
    name: &str,
    typ: SystemType,
    is_nullable: bool,
    is_autogenerated: bool,
) -> PhysicalColumn {
    PhysicalColumn {
        table_name: table.to_string(),
        column_name: name.to_string(),
        typ,
        is_nullable,
        is_autogenerated,
        default_value: None,
    }
}

/// The single-table fixture: `dbo.items` with an autogenerated key, a title
/// and an archived flag.
pub(crate) fn item_entity() -> Entity {
    Entity {
        name: "Item".to_string(),
        table: PhysicalTable {
            database_object: DatabaseObject {
                schema: "dbo".to_string(),
                name: "items".to_string(),
            },
            columns: vec![
                column("items", "id", SystemType::Int32, false, true),
                column("items", "title", SystemType::String, true, false),
                column("items", "archived", SystemType::Boolean, true, false),
            ],
            pk_columns: vec!["id".to_string()],
        },
        relationships: IndexMap::new(),
    }
}

/// Fixture with a defaulted column, for exercising the generation-source
/// skip rule.
pub(crate) fn note_entity() -> Entity {
    let mut status = column("notes", "status", SystemType::String, false, false);
    status.default_value = Some(ColumnValue::String("draft".to_string()));
    Entity {
        name: "Note".to_string(),
        table: PhysicalTable {
            database_object: DatabaseObject {
                schema: "public".to_string(),
                name: "notes".to_string(),
            },
            columns: vec![
                column("notes", "id", SystemType::Int64, false, true),
                column("notes", "body", SystemType::String, true, false),
                status,
            ],
            pk_columns: vec!["id".to_string()],
        },
        relationships: IndexMap::new(),
    }
}

/// A two-column link table whose columns are both key columns; it has
/// nothing assignable outside its key.
pub(crate) fn link_entity() -> Entity {
    Entity {
        name: "Link".to_string(),
        table: PhysicalTable {
            database_object: DatabaseObject {
                schema: "public".to_string(),
                name: "links".to_string(),
            },
            columns: vec![
                column("links", "a_id", SystemType::Int32, false, false),
                column("links", "b_id", SystemType::Int32, false, false),
            ],
            pk_columns: vec!["a_id".to_string(), "b_id".to_string()],
        },
        relationships: IndexMap::new(),
    }
}

/// Two-entity fixture wired in both directions: an author has many books,
/// a book refers back to its author.
pub(crate) fn library_model() -> DatabaseModel {
    let mut entities = IndexMap::new();
    entities.insert(
        "Author".to_string(),
        Entity {
            name: "Author".to_string(),
            table: PhysicalTable {
                database_object: DatabaseObject {
                    schema: "public".to_string(),
                    name: "authors".to_string(),
                },
                columns: vec![
                    column("authors", "id", SystemType::Int32, false, true),
                    column("authors", "name", SystemType::String, false, false),
                ],
                pk_columns: vec!["id".to_string()],
            },
            relationships: IndexMap::from([(
                "books".to_string(),
                Relationship {
                    target_entity: "Book".to_string(),
                    cardinality: Cardinality::Many,
                    source_columns: vec!["id".to_string()],
                    target_columns: vec!["author_id".to_string()],
                },
            )]),
        },
    );
    entities.insert(
        "Book".to_string(),
        Entity {
            name: "Book".to_string(),
            table: PhysicalTable {
                database_object: DatabaseObject {
                    schema: "public".to_string(),
                    name: "books".to_string(),
                },
                columns: vec![
                    column("books", "id", SystemType::Int32, false, true),
                    column("books", "title", SystemType::String, false, false),
                    column("books", "author_id", SystemType::Int32, false, false),
                ],
                pk_columns: vec!["id".to_string()],
            },
            relationships: IndexMap::from([(
                "author".to_string(),
                Relationship {
                    target_entity: "Author".to_string(),
                    cardinality: Cardinality::One,
                    source_columns: vec!["author_id".to_string()],
                    target_columns: vec!["id".to_string()],
                },
            )]),
        },
    );

    let model = DatabaseModel { entities };
    model.validate().unwrap();
    model
}
