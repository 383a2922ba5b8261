//! skyfilter: SQL-flavored filter expressions with `cone(ra, dec, radius)`
//! spatial search, parsed and resolved into typed predicate trees.
//!
//! ```ignore
//! let registry: SchemaRegistry = serde_json::from_str(schema_json)?;
//! let filter = FilterParser::new(&registry, "Object")
//!     .parse("cone(10.5, -5.3, 0.1) AND mag < 18")?;
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod sql;

// core re-exports
pub use skyfilter_core::{ast, extra, model, obs, predicate, value};

// re-exports
pub use config::{DEFAULT_DIALECT, FilterConfig};
pub use error::{Error, ErrorKind, ErrorOrigin};
pub use parser::{FilterParser, ParsedFilter, parse};
pub use skyfilter_core::{ResolveError, ResolveErrorKind};

///
/// CONSTANTS
///

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{Error, FilterConfig, FilterParser, ParsedFilter};
    pub use skyfilter_core::prelude::*;
}
