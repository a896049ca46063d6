use async_graphql_parser::types::{
    BaseType, ConstDirective, FieldDefinition, ObjectType, Type, TypeDefinition, TypeKind,
};
use async_graphql_value::{ConstValue, Name, Number};
use tracing::debug;

use tablegate_model::{Cardinality, DatabaseModel, Entity, Relationship};
use tablegate_sql::{ColumnValue, PhysicalColumn, SystemType};

use crate::error::SchemaBuildError;
use crate::util::{default_positioned, default_positioned_name};

/// The fixed system-type to graph-scalar mapping. Types outside it cannot be
/// exposed and make the whole entity a configuration error.
fn scalar_name(typ: SystemType) -> Option<&'static str> {
    match typ {
        SystemType::String => Some("String"),
        SystemType::Byte => Some("Byte"),
        SystemType::Int16 => Some("Short"),
        SystemType::Int32 => Some("Int"),
        SystemType::Int64 => Some("Long"),
        SystemType::Float64 => Some("Float"),
        SystemType::Boolean => Some("Boolean"),
        SystemType::Float32 | SystemType::Decimal => None,
    }
}

/// Fixed naming function for the paginated wrapper of a cardinality-many
/// relationship target.
pub fn connection_type_name(entity_name: &str) -> String {
    format!("{entity_name}Connection")
}

/// Derive the object type for one entity: one field per column in declaration
/// order, then one per relationship in declaration order. Pure over its
/// inputs, so repeated invocation yields a structurally identical definition
/// (required for schema diffing on hot reload).
pub fn entity_type_definition(
    entity: &Entity,
    model: &DatabaseModel,
) -> Result<TypeDefinition, SchemaBuildError> {
    let mut fields = Vec::new();
    for column in &entity.table.columns {
        fields.push(default_positioned(column_field(entity, column)?));
    }
    for (relationship_name, relationship) in &entity.relationships {
        let target = model.get_entity(&relationship.target_entity)?;
        fields.push(default_positioned(relationship_field(
            relationship_name,
            target,
            relationship,
        )));
    }

    debug!(entity = %entity.name, fields = fields.len(), "derived object type");

    Ok(TypeDefinition {
        extend: false,
        description: None,
        name: default_positioned_name(&entity.name),
        directives: vec![],
        kind: TypeKind::Object(ObjectType {
            implements: vec![],
            fields,
        }),
    })
}

fn column_field(
    entity: &Entity,
    column: &PhysicalColumn,
) -> Result<FieldDefinition, SchemaBuildError> {
    let scalar = scalar_name(column.typ).ok_or_else(|| SchemaBuildError::UnmappedSystemType {
        entity: entity.name.clone(),
        column: column.column_name.clone(),
        typ: column.typ,
    })?;

    let mut directives = Vec::new();
    if entity.table.is_pk(&column.column_name) {
        directives.push(default_positioned(marker_directive("primaryKey")));
    }
    if column.is_autogenerated {
        directives.push(default_positioned(marker_directive("autoGenerated")));
    }
    if let Some(default_value) = &column.default_value {
        let encoded = encode_default(entity, column, default_value)?;
        directives.push(default_positioned(ConstDirective {
            name: default_positioned_name("defaultValue"),
            arguments: vec![(
                default_positioned_name("value"),
                default_positioned(encoded),
            )],
        }));
    }

    Ok(FieldDefinition {
        description: None,
        name: default_positioned_name(&column.column_name),
        arguments: vec![],
        ty: default_positioned(Type {
            base: BaseType::Named(Name::new(scalar)),
            nullable: column.is_nullable,
        }),
        directives,
    })
}

fn relationship_field(
    relationship_name: &str,
    target: &Entity,
    relationship: &Relationship,
) -> FieldDefinition {
    let (type_name, nullable, cardinality) = match relationship.cardinality {
        // a one-cardinality edge may be absent, so the field stays nullable
        Cardinality::One => (target.name.clone(), true, "ONE"),
        Cardinality::Many => (connection_type_name(&target.name), false, "MANY"),
    };

    let directive = ConstDirective {
        name: default_positioned_name("relationship"),
        arguments: vec![
            (
                default_positioned_name("target"),
                default_positioned(ConstValue::String(target.name.clone())),
            ),
            (
                default_positioned_name("cardinality"),
                default_positioned(ConstValue::Enum(Name::new(cardinality))),
            ),
        ],
    };

    FieldDefinition {
        description: None,
        name: default_positioned_name(relationship_name),
        arguments: vec![],
        ty: default_positioned(Type {
            base: BaseType::Named(Name::new(&type_name)),
            nullable,
        }),
        directives: vec![default_positioned(directive)],
    }
}

fn marker_directive(name: &str) -> ConstDirective {
    ConstDirective {
        name: default_positioned_name(name),
        arguments: vec![],
    }
}

/// Encode a typed default into a graph constant, exhaustively over the value
/// kinds. A null default is meaningless and rejected at startup.
fn encode_default(
    entity: &Entity,
    column: &PhysicalColumn,
    value: &ColumnValue,
) -> Result<ConstValue, SchemaBuildError> {
    let unsupported = || SchemaBuildError::UnsupportedDefaultValue {
        entity: entity.name.clone(),
        column: column.column_name.clone(),
    };

    Ok(match value {
        ColumnValue::String(v) => ConstValue::String(v.clone()),
        ColumnValue::Byte(v) => ConstValue::Number(Number::from(*v)),
        ColumnValue::Int16(v) => ConstValue::Number(Number::from(*v)),
        ColumnValue::Int32(v) => ConstValue::Number(Number::from(*v)),
        ColumnValue::Int64(v) => ConstValue::Number(Number::from(*v)),
        ColumnValue::Float32(v) => {
            ConstValue::Number(Number::from_f64(f64::from(*v)).ok_or_else(unsupported)?)
        }
        ColumnValue::Float64(v) => {
            ConstValue::Number(Number::from_f64(*v).ok_or_else(unsupported)?)
        }
        ColumnValue::Decimal(v) => ConstValue::String(v.to_string()),
        ColumnValue::Bool(v) => ConstValue::Boolean(*v),
        ColumnValue::Null => return Err(unsupported()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use tablegate_sql::{DatabaseObject, PhysicalTable};

    fn column(
        table: &str,
        name: &str,
        typ: SystemType,
        is_nullable: bool,
        is_autogenerated: bool,
        default_value: Option<ColumnValue>,
    ) -> PhysicalColumn {
        PhysicalColumn {
            table_name: table.to_string(),
            column_name: name.to_string(),
            typ,
            is_nullable,
            is_autogenerated,
            default_value,
        }
    }

    fn library_model() -> DatabaseModel {
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
                        column("authors", "id", SystemType::Int32, false, true, None),
                        column("authors", "name", SystemType::String, false, false, None),
                        column(
                            "authors",
                            "active",
                            SystemType::Boolean,
                            true,
                            false,
                            Some(ColumnValue::Bool(true)),
                        ),
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
                        column("books", "id", SystemType::Int32, false, true, None),
                        column("books", "title", SystemType::String, false, false, None),
                        column("books", "author_id", SystemType::Int32, false, false, None),
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
        DatabaseModel { entities }
    }

    /// (field name, rendered type, directive names) triples, the structural
    /// identity the determinism requirement cares about.
    fn shape(definition: &TypeDefinition) -> Vec<(String, String, Vec<String>)> {
        match &definition.kind {
            TypeKind::Object(object) => object
                .fields
                .iter()
                .map(|field| {
                    (
                        field.node.name.node.to_string(),
                        field.node.ty.node.to_string(),
                        field
                            .node
                            .directives
                            .iter()
                            .map(|d| d.node.name.node.to_string())
                            .collect(),
                    )
                })
                .collect(),
            _ => panic!("expected an object type"),
        }
    }

    #[test]
    fn fields_follow_declaration_order() {
        let model = library_model();
        let definition =
            entity_type_definition(model.get_entity("Author").unwrap(), &model).unwrap();

        assert_eq!(definition.name.node.as_str(), "Author");
        assert_eq!(
            shape(&definition),
            vec![
                (
                    "id".to_string(),
                    "Int!".to_string(),
                    vec!["primaryKey".to_string(), "autoGenerated".to_string()],
                ),
                ("name".to_string(), "String!".to_string(), vec![]),
                (
                    "active".to_string(),
                    "Boolean".to_string(),
                    vec!["defaultValue".to_string()],
                ),
                (
                    "books".to_string(),
                    "BookConnection!".to_string(),
                    vec!["relationship".to_string()],
                ),
            ]
        );
    }

    #[test]
    fn one_cardinality_field_is_the_bare_target_type() {
        let model = library_model();
        let definition =
            entity_type_definition(model.get_entity("Book").unwrap(), &model).unwrap();

        let fields = shape(&definition);
        let author = fields.iter().find(|(name, _, _)| name == "author").unwrap();
        assert_eq!(author.1, "Author");
    }

    #[test]
    fn relationship_directive_carries_target_and_cardinality() {
        let model = library_model();
        let definition =
            entity_type_definition(model.get_entity("Author").unwrap(), &model).unwrap();

        let books = match &definition.kind {
            TypeKind::Object(object) => object
                .fields
                .iter()
                .find(|field| field.node.name.node.as_str() == "books")
                .unwrap()
                .clone(),
            _ => unreachable!(),
        };
        let directive = &books.node.directives[0].node;
        assert_eq!(directive.name.node.as_str(), "relationship");
        assert_eq!(
            directive.arguments[0].1.node,
            ConstValue::String("Book".to_string())
        );
        assert_eq!(
            directive.arguments[1].1.node,
            ConstValue::Enum(Name::new("MANY"))
        );
    }

    #[test]
    fn default_value_is_encoded_as_a_constant() {
        let model = library_model();
        let definition =
            entity_type_definition(model.get_entity("Author").unwrap(), &model).unwrap();

        let active = match &definition.kind {
            TypeKind::Object(object) => object
                .fields
                .iter()
                .find(|field| field.node.name.node.as_str() == "active")
                .unwrap()
                .clone(),
            _ => unreachable!(),
        };
        let directive = &active.node.directives[0].node;
        assert_eq!(directive.name.node.as_str(), "defaultValue");
        assert_eq!(directive.arguments[0].0.node.as_str(), "value");
        assert_eq!(directive.arguments[0].1.node, ConstValue::Boolean(true));
    }

    #[test]
    fn derivation_is_deterministic() {
        let model = library_model();
        let entity = model.get_entity("Author").unwrap();

        let first = entity_type_definition(entity, &model).unwrap();
        let second = entity_type_definition(entity, &model).unwrap();
        assert_eq!(shape(&first), shape(&second));
    }

    #[test]
    fn unmapped_system_type_is_a_startup_error() {
        let mut model = library_model();
        model
            .entities
            .get_mut("Book")
            .unwrap()
            .table
            .columns
            .push(column("books", "price", SystemType::Decimal, true, false, None));

        let model_snapshot = model.clone();
        assert!(matches!(
            entity_type_definition(model_snapshot.get_entity("Book").unwrap(), &model_snapshot),
            Err(SchemaBuildError::UnmappedSystemType { entity, column, typ })
                if entity == "Book" && column == "price" && typ == SystemType::Decimal
        ));
    }

    #[test]
    fn null_default_is_rejected() {
        let mut model = library_model();
        model
            .entities
            .get_mut("Book")
            .unwrap()
            .table
            .columns
            .push(column(
                "books",
                "note",
                SystemType::String,
                true,
                false,
                Some(ColumnValue::Null),
            ));

        let model_snapshot = model.clone();
        assert!(matches!(
            entity_type_definition(model_snapshot.get_entity("Book").unwrap(), &model_snapshot),
            Err(SchemaBuildError::UnsupportedDefaultValue { column, .. }) if column == "note"
        ));
    }

    #[test]
    fn dangling_relationship_target_is_a_startup_error() {
        let mut model = library_model();
        model
            .entities
            .get_mut("Author")
            .unwrap()
            .relationships
            .get_mut("books")
            .unwrap()
            .target_entity = "Missing".to_string();

        let model_snapshot = model.clone();
        assert!(matches!(
            entity_type_definition(
                model_snapshot.get_entity("Author").unwrap(),
                &model_snapshot
            ),
            Err(SchemaBuildError::Model(_))
        ));
    }
}
