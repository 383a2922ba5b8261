use crate::{
    error::ResolveError,
    model::SchemaCatalog,
    obs::{MetricsEvent, sink::record},
    predicate::FieldRef,
    resolve::Resolver,
};

/// Separator joining relational path segments in a qualified field name.
pub const FIELD_PATH_SEPARATOR: &str = "__";

impl<C: SchemaCatalog + ?Sized> Resolver<'_, C> {
    /// Validate a (possibly relational) column path against the catalog and
    /// flatten it into a qualified field reference.
    ///
    /// Every segment but the last must be a relational field; resolution
    /// descends into its target model. The last segment must exist on the
    /// model reached. There is no depth limit.
    pub fn resolve_column(&self, path: &[String]) -> Result<FieldRef, ResolveError> {
        let Some((last, parents)) = path.split_last() else {
            return Err(ResolveError::invalid_query("empty column reference"));
        };

        let mut model = self.model.as_str();
        for segment in parents {
            model = self
                .catalog
                .related_model(model, segment)
                .ok_or_else(|| ResolveError::field_does_not_exist(segment))?;
        }

        if !self.catalog.field_exists(model, last) {
            return Err(ResolveError::field_does_not_exist(last));
        }

        record(MetricsEvent::FieldResolved {
            depth: parents.len(),
        });

        Ok(FieldRef::new(path.join(FIELD_PATH_SEPARATOR)))
    }
}
