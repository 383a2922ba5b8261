use crate::model::{SchemaCatalog, entity::EntityModel};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error as ThisError;

///
/// SchemaRegistry
///
/// In-memory schema catalog keyed by model name.
/// Construction validates the model set so lookups never need to.
/// Serializes as a plain list of entity models.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "Vec<EntityModel>", into = "Vec<EntityModel>")]
pub struct SchemaRegistry {
    models: BTreeMap<String, EntityModel>,
}

impl SchemaRegistry {
    /// Build a registry, rejecting duplicate models, duplicate fields and
    /// relations that point at unregistered models.
    pub fn from_models(models: impl IntoIterator<Item = EntityModel>) -> Result<Self, RegistryError> {
        let mut map = BTreeMap::new();

        for model in models {
            let mut seen = BTreeSet::new();
            for field in &model.fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(RegistryError::DuplicateField {
                        model: model.name.clone(),
                        field: field.name.clone(),
                    });
                }
            }

            if map.contains_key(&model.name) {
                return Err(RegistryError::DuplicateModel { model: model.name });
            }
            map.insert(model.name.clone(), model);
        }

        for model in map.values() {
            for field in &model.fields {
                if let Some(target) = field.related_model()
                    && !map.contains_key(target)
                {
                    return Err(RegistryError::UnknownRelationTarget {
                        model: model.name.clone(),
                        field: field.name.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }

        Ok(Self { models: map })
    }

    #[must_use]
    pub fn model(&self, name: &str) -> Option<&EntityModel> {
        self.models.get(name)
    }

    pub fn models(&self) -> impl Iterator<Item = &EntityModel> {
        self.models.values()
    }
}

impl SchemaCatalog for SchemaRegistry {
    fn field_exists(&self, model: &str, field: &str) -> bool {
        self.model(model)
            .is_some_and(|entity| entity.get_field(field).is_some())
    }

    fn related_model(&self, model: &str, field: &str) -> Option<&str> {
        self.model(model)?.get_field(field)?.related_model()
    }
}

impl TryFrom<Vec<EntityModel>> for SchemaRegistry {
    type Error = RegistryError;

    fn try_from(models: Vec<EntityModel>) -> Result<Self, Self::Error> {
        Self::from_models(models)
    }
}

impl From<SchemaRegistry> for Vec<EntityModel> {
    fn from(registry: SchemaRegistry) -> Self {
        registry.models.into_values().collect()
    }
}

///
/// RegistryError
/// Invalid model sets rejected at registry construction.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RegistryError {
    #[error("duplicate model '{model}'")]
    DuplicateModel { model: String },

    #[error("model '{model}' repeats field '{field}'")]
    DuplicateField { model: String, field: String },

    #[error("relation '{model}.{field}' targets unknown model '{target}'")]
    UnknownRelationTarget {
        model: String,
        field: String,
        target: String,
    },
}

///
/// TESTS
///
