use derive_more::Display;
use skyfilter_core::{ResolveError, ResolveErrorKind};
use sqlparser::parser::ParserError;
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Structured resolver failure, present when `origin` is `Resolver`.
    pub detail: Option<ResolveError>,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    pub(crate) fn unknown_dialect(name: &str) -> Self {
        Self::new(
            ErrorKind::UnknownDialect,
            ErrorOrigin::Config,
            format!("unknown SQL dialect '{name}'"),
        )
    }
}

impl From<ParserError> for Error {
    fn from(err: ParserError) -> Self {
        Self::new(ErrorKind::Parse, ErrorOrigin::Parser, err.to_string())
    }
}

impl From<ResolveError> for Error {
    fn from(err: ResolveError) -> Self {
        Self {
            kind: ErrorKind::Resolve(err.kind()),
            origin: ErrorOrigin::Resolver,
            message: err.to_string(),
            detail: Some(err),
        }
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Query text is not a well-formed expression in the configured dialect.
    Parse,

    /// The configured dialect name is not recognized.
    UnknownDialect,

    /// The expression parsed but could not be resolved against the schema.
    Resolve(ResolveErrorKind),
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ErrorOrigin {
    Config,
    Parser,
    Resolver,
}
