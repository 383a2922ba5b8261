use serde::{Deserialize, Serialize};

///
/// FieldModel
/// Runtime field metadata used by field-path resolution.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldModel {
    /// Field name as used in filter expressions.
    pub name: String,
    /// Runtime type shape.
    pub kind: FieldKind,
}

impl FieldModel {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Relational field pointing at `target`.
    #[must_use]
    pub fn relation(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Relation {
                target: target.into(),
            },
        )
    }

    #[must_use]
    pub fn related_model(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Relation { target } => Some(target),
            _ => None,
        }
    }
}

///
/// FieldKind
///
/// Minimal type surface needed for path resolution.
/// Only `Relation` is structurally significant; scalar kinds are carried
/// for adapters that lower predicates into typed storage.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Bool,
    Int,
    Float,
    Text,
    Date,
    Timestamp,
    Relation { target: String },
}
