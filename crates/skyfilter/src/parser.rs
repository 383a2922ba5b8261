use crate::{config::FilterConfig, error::Error, sql};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use skyfilter_core::{
    Resolver, extra::ExtraParams, model::SchemaCatalog, predicate::Predicate,
};

///
/// ParsedFilter
///
/// Root predicate of one filter plus the cone parameters backing its
/// synthetic `cone_query*` fields.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ParsedFilter {
    pub predicate: Predicate,
    pub extra: ExtraParams,
}

///
/// FilterParser
///
/// Parses filter text for one target model of a schema catalog.
/// Each `parse` call runs a fresh resolution pass, so cone parameters never
/// carry over between queries.
///

pub struct FilterParser<'a, C: SchemaCatalog + ?Sized> {
    catalog: &'a C,
    model: String,
    config: FilterConfig,
}

impl<'a, C: SchemaCatalog + ?Sized> FilterParser<'a, C> {
    #[must_use]
    pub fn new(catalog: &'a C, model: impl Into<String>) -> Self {
        Self {
            catalog,
            model: model.into(),
            config: FilterConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: FilterConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub const fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Parse and resolve one filter expression.
    pub fn parse(&self, query: &str) -> Result<ParsedFilter, Error> {
        let dialect = self.config.sql_dialect()?;
        debug!(
            "parsing filter for model '{}' ({} dialect): {query}",
            self.model, self.config.dialect
        );

        let expr = sql::parse_expression(query, dialect.as_ref()).inspect_err(|err| {
            debug!("filter parse failed: {err}");
        })?;
        let node = sql::lower_expr(&expr);
        trace!("lowered filter: {node:?}");

        let resolution = Resolver::new(self.catalog, self.model.as_str())
            .with_dialect(self.config.dialect.as_str())
            .resolve(&node)
            .inspect_err(|err| debug!("filter resolution failed: {err}"))?;
        let (predicate, extra) = resolution.into_predicate()?;

        debug!(
            "resolved filter: {predicate} ({} cone(s))",
            extra.cones.len()
        );

        Ok(ParsedFilter { predicate, extra })
    }
}

/// Parse `query` against `model` with the default configuration.
pub fn parse<C: SchemaCatalog + ?Sized>(
    catalog: &C,
    model: &str,
    query: &str,
) -> Result<ParsedFilter, Error> {
    FilterParser::new(catalog, model).parse(query)
}
