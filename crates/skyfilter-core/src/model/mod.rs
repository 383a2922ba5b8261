//! Schema catalog contract and its in-memory implementation.
//!
//! The resolver depends only on [`SchemaCatalog`]; embedding applications may
//! back it with their own schema registry. [`SchemaRegistry`] is a plain,
//! serde-loadable catalog built from [`EntityModel`] definitions.
pub mod entity;
pub mod field;
pub mod registry;

pub use entity::EntityModel;
pub use field::{FieldKind, FieldModel};
pub use registry::{RegistryError, SchemaRegistry};

///
/// SchemaCatalog
///
/// Authority on field existence and relational structure.
/// Models are addressed by name.
///

pub trait SchemaCatalog {
    /// Whether `model` declares a field called `field`.
    fn field_exists(&self, model: &str, field: &str) -> bool;

    /// Target model of a relational field, or `None` when the field is
    /// missing or not relational.
    fn related_model(&self, model: &str, field: &str) -> Option<&str>;
}

impl<C: SchemaCatalog + ?Sized> SchemaCatalog for &C {
    fn field_exists(&self, model: &str, field: &str) -> bool {
        (**self).field_exists(model, field)
    }

    fn related_model(&self, model: &str, field: &str) -> Option<&str> {
        (**self).related_model(model, field)
    }
}
