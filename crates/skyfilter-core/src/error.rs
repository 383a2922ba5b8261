use derive_more::Display;
use thiserror::Error as ThisError;

///
/// ResolveError
///
/// Typed failure of one resolution pass.
/// Every variant is terminal: the pass stops at the first error and no
/// partial predicate is returned.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ResolveError {
    #[error("field '{field}' does not exist")]
    FieldDoesNotExist { field: String },

    #[error("invalid query: unsupported {node}")]
    InvalidQuery { node: String },

    #[error("invalid literal '{literal}'")]
    InvalidLiteral { literal: String },

    #[error(
        "cone statement should contain exactly 3 arguments: cone(ra, dec, radius); found {found}"
    )]
    InvalidConeNumberArguments { found: usize },

    #[error("cone argument '{argument}' must be a numeric literal")]
    InvalidConeArgument { argument: &'static str },
}

impl ResolveError {
    pub(crate) fn field_does_not_exist(field: &str) -> Self {
        Self::FieldDoesNotExist {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_query(node: impl Into<String>) -> Self {
        Self::InvalidQuery { node: node.into() }
    }

    pub(crate) fn invalid_literal(literal: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            literal: literal.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ResolveErrorKind {
        match self {
            Self::FieldDoesNotExist { .. } => ResolveErrorKind::FieldDoesNotExist,
            Self::InvalidQuery { .. } => ResolveErrorKind::InvalidQuery,
            Self::InvalidLiteral { .. } => ResolveErrorKind::InvalidLiteral,
            Self::InvalidConeNumberArguments { .. } => {
                ResolveErrorKind::InvalidConeNumberArguments
            }
            Self::InvalidConeArgument { .. } => ResolveErrorKind::InvalidConeArgument,
        }
    }
}

///
/// ResolveErrorKind
/// Payload-free classification of `ResolveError`, for metrics and public
/// error mapping.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ResolveErrorKind {
    FieldDoesNotExist,
    InvalidQuery,
    InvalidLiteral,
    InvalidConeNumberArguments,
    InvalidConeArgument,
}
