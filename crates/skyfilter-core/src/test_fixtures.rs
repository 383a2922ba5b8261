use crate::model::{EntityModel, FieldKind, SchemaRegistry};

/// Target model used across resolver tests.
pub(crate) const OBJECT: &str = "Object";

/// Three-level catalog: Object -> Galaxy -> Cluster.
pub(crate) fn sky_registry() -> SchemaRegistry {
    SchemaRegistry::from_models([
        EntityModel::new(OBJECT)
            .field("id", FieldKind::Int)
            .field("age", FieldKind::Int)
            .field("name", FieldKind::Text)
            .field("flag", FieldKind::Int)
            .field("ra", FieldKind::Float)
            .field("dec", FieldKind::Float)
            .field("mag", FieldKind::Float)
            .relation("host", "Galaxy"),
        EntityModel::new("Galaxy")
            .field("name", FieldKind::Text)
            .field("redshift", FieldKind::Float)
            .relation("cluster", "Cluster"),
        EntityModel::new("Cluster").field("name", FieldKind::Text),
    ])
    .expect("fixture registry should be valid")
}
