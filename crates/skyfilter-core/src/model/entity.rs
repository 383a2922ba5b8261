use crate::model::field::{FieldKind, FieldModel};
use serde::{Deserialize, Serialize};

///
/// EntityModel
/// Runtime model for one queryable entity.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityModel {
    /// Stable model name used to address the entity in the catalog.
    pub name: String,
    /// Ordered field list.
    pub fields: Vec<FieldModel>,
}

impl EntityModel {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldModel::new(name, kind));
        self
    }

    #[must_use]
    pub fn relation(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.fields.push(FieldModel::relation(name, target));
        self
    }

    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }
}
