use crate::error::Error;
use serde::{Deserialize, Serialize};
use sqlparser::dialect::{Dialect, dialect_from_str};

///
/// CONSTANTS
///

/// Dialect used when the configuration does not name one.
pub const DEFAULT_DIALECT: &str = "postgres";

///
/// FilterConfig
///
/// Embedding-application settings for filter parsing.
/// Deserializes from partial documents; missing keys take defaults.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    /// SQL dialect name understood by `sqlparser` (`postgres`, `mysql`,
    /// `sqlite`, `generic`, ...).
    pub dialect: String,
}

impl FilterConfig {
    #[must_use]
    pub fn with_dialect(dialect: impl Into<String>) -> Self {
        Self {
            dialect: dialect.into(),
        }
    }

    /// Resolve the configured dialect name.
    pub fn sql_dialect(&self) -> Result<Box<dyn Dialect>, Error> {
        dialect_from_str(&self.dialect).ok_or_else(|| Error::unknown_dialect(&self.dialect))
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::with_dialect(DEFAULT_DIALECT)
    }
}

///
/// TESTS
///
