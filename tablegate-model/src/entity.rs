use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use tablegate_sql::PhysicalTable;

use crate::error::ModelError;

/// One-to-one vs one-to-many shape of a declared relationship.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    One,
    Many,
}

impl FromStr for Cardinality {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one" => Ok(Cardinality::One),
            "many" => Ok(Cardinality::Many),
            other => Err(ModelError::UnsupportedCardinality(other.to_string())),
        }
    }
}

/// A declared edge from one entity to another, joined by column equality.
/// `source_columns` belong to the declaring entity, `target_columns` to the
/// target; the lists are positionally paired.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Relationship {
    pub target_entity: String,
    pub cardinality: Cardinality,
    pub source_columns: Vec<String>,
    pub target_columns: Vec<String>,
}

/// An exposed entity: its backing table plus declared relationships, in
/// declaration order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    pub table: PhysicalTable,
    #[serde(default)]
    pub relationships: IndexMap<String, Relationship>,
}

/// The full metadata snapshot. Loaded and validated once at startup, then
/// shared read-only; hot reload swaps the whole snapshot atomically (an
/// `Arc` replacement owned by the host), never mutates it in place.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct DatabaseModel {
    pub entities: IndexMap<String, Entity>,
}

impl DatabaseModel {
    pub fn get_entity(&self, name: &str) -> Result<&Entity, ModelError> {
        self.entities
            .get(name)
            .ok_or_else(|| ModelError::UnknownEntity(name.to_string()))
    }

    /// Startup consistency checks: primary keys resolve and are non-empty,
    /// relationship targets exist, and join column lists pair up. Any
    /// failure prevents the process from completing startup.
    pub fn validate(&self) -> Result<(), ModelError> {
        for entity in self.entities.values() {
            if entity.table.pk_columns.is_empty() {
                return Err(ModelError::MissingPrimaryKey(entity.name.clone()));
            }
            for pk in &entity.table.pk_columns {
                if entity.table.get_physical_column(pk).is_none() {
                    return Err(ModelError::UnknownPkColumn {
                        entity: entity.name.clone(),
                        column: pk.clone(),
                    });
                }
            }

            for (relationship_name, relationship) in &entity.relationships {
                let target = self.entities.get(&relationship.target_entity).ok_or_else(|| {
                    ModelError::UnknownRelationshipTarget {
                        entity: entity.name.clone(),
                        relationship: relationship_name.clone(),
                        target: relationship.target_entity.clone(),
                    }
                })?;

                if relationship.source_columns.len() != relationship.target_columns.len()
                    || relationship.source_columns.is_empty()
                {
                    return Err(ModelError::MismatchedJoinColumns {
                        entity: entity.name.clone(),
                        relationship: relationship_name.clone(),
                    });
                }

                for column in &relationship.source_columns {
                    if entity.table.get_physical_column(column).is_none() {
                        return Err(ModelError::UnknownRelationshipColumn {
                            entity: entity.name.clone(),
                            relationship: relationship_name.clone(),
                            column: column.clone(),
                        });
                    }
                }
                for column in &relationship.target_columns {
                    if target.table.get_physical_column(column).is_none() {
                        return Err(ModelError::UnknownRelationshipColumn {
                            entity: entity.name.clone(),
                            relationship: relationship_name.clone(),
                            column: column.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablegate_sql::{DatabaseObject, PhysicalColumn, SystemType};

    fn table(name: &str, columns: Vec<(&str, SystemType)>, pk: &str) -> PhysicalTable {
        PhysicalTable {
            database_object: DatabaseObject {
                schema: "public".to_string(),
                name: name.to_string(),
            },
            columns: columns
                .into_iter()
                .map(|(column_name, typ)| PhysicalColumn {
                    table_name: name.to_string(),
                    column_name: column_name.to_string(),
                    typ,
                    is_nullable: false,
                    is_autogenerated: false,
                    default_value: None,
                })
                .collect(),
            pk_columns: vec![pk.to_string()],
        }
    }

    fn model() -> DatabaseModel {
        let mut entities = IndexMap::new();
        entities.insert(
            "Author".to_string(),
            Entity {
                name: "Author".to_string(),
                table: table(
                    "authors",
                    vec![("id", SystemType::Int32), ("name", SystemType::String)],
                    "id",
                ),
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
                table: table(
                    "books",
                    vec![
                        ("id", SystemType::Int32),
                        ("title", SystemType::String),
                        ("author_id", SystemType::Int32),
                    ],
                    "id",
                ),
                relationships: IndexMap::new(),
            },
        );
        DatabaseModel { entities }
    }

    #[test]
    fn valid_model_passes() {
        assert!(model().validate().is_ok());
    }

    #[test]
    fn missing_pk_is_a_config_error() {
        let mut model = model();
        model
            .entities
            .get_mut("Book")
            .unwrap()
            .table
            .pk_columns
            .clear();
        assert!(matches!(
            model.validate(),
            Err(ModelError::MissingPrimaryKey(entity)) if entity == "Book"
        ));
    }

    #[test]
    fn dangling_relationship_target_is_a_config_error() {
        let mut model = model();
        model
            .entities
            .get_mut("Author")
            .unwrap()
            .relationships
            .get_mut("books")
            .unwrap()
            .target_entity = "Missing".to_string();
        assert!(matches!(
            model.validate(),
            Err(ModelError::UnknownRelationshipTarget { target, .. }) if target == "Missing"
        ));
    }

    #[test]
    fn unknown_entity_lookup() {
        assert!(matches!(
            model().get_entity("Nope"),
            Err(ModelError::UnknownEntity(name)) if name == "Nope"
        ));
    }

    #[test]
    fn cardinality_parses() {
        assert_eq!("one".parse::<Cardinality>().unwrap(), Cardinality::One);
        assert_eq!("many".parse::<Cardinality>().unwrap(), Cardinality::Many);
        assert!(matches!(
            "both".parse::<Cardinality>(),
            Err(ModelError::UnsupportedCardinality(c)) if c == "both"
        ));
    }
}
