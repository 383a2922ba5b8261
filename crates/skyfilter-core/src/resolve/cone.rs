use crate::{
    ast::ExpressionNode,
    error::ResolveError,
    extra::Cone,
    model::SchemaCatalog,
    obs::{MetricsEvent, sink::record},
    predicate::{Operand, Predicate},
    resolve::{ResolvePass, Resolved},
};

// Positional argument names of `cone(ra, dec, radius)`.
const CONE_ARGUMENTS: [&str; 3] = ["ra", "dec", "radius"];

impl<C: SchemaCatalog + ?Sized> ResolvePass<'_, '_, C> {
    // Record one cone search and return its synthetic boolean leaf,
    // `cone_query[N] = TRUE`.
    pub(super) fn resolve_cone(&mut self, args: &[ExpressionNode]) -> Result<Predicate, ResolveError> {
        if args.len() != CONE_ARGUMENTS.len() {
            return Err(ResolveError::InvalidConeNumberArguments { found: args.len() });
        }

        let mut values = [0.0; 3];
        for ((slot, arg), argument) in values.iter_mut().zip(args).zip(CONE_ARGUMENTS) {
            *slot = self.cone_argument(arg, argument)?;
        }
        let [ra, dec, radius] = values;

        let index = self.extra.cones.len();
        let field = self.extra.push_cone(Cone::new(ra, dec, radius));
        record(MetricsEvent::ConeRecorded { index });

        Ok(Predicate::eq(Operand::field(field), Operand::literal(true)))
    }

    fn cone_argument(
        &mut self,
        arg: &ExpressionNode,
        argument: &'static str,
    ) -> Result<f64, ResolveError> {
        match self.resolve(arg)? {
            Resolved::Literal(value) => value
                .as_f64()
                .ok_or(ResolveError::InvalidConeArgument { argument }),
            _ => Err(ResolveError::InvalidConeArgument { argument }),
        }
    }
}
