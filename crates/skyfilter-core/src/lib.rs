//! Core of skyfilter: resolves SQL-flavored filter expressions, extended with
//! the `cone(ra, dec, radius)` spatial search, into typed predicate trees.
//!
//! Parsing text is not done here; callers hand in an `ast::ExpressionNode`
//! tree lowered from their SQL parser of choice.

pub mod ast;
pub mod error;
pub mod extra;
pub mod model;
pub mod obs;
pub mod predicate;
pub mod resolve;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

// re-exports
pub use error::{ResolveError, ResolveErrorKind};
pub use resolve::{Resolution, Resolved, Resolver};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
///

pub mod prelude {
    pub use crate::{
        ast::{ExpressionNode, LiteralKind},
        extra::{Cone, ExtraParams},
        model::{EntityModel, FieldKind, SchemaCatalog, SchemaRegistry},
        predicate::{CompareOp, FieldRef, Operand, Predicate},
        value::Value,
    };
}
