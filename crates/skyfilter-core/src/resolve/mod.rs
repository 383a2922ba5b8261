//! Expression resolution.
//!
//! Turns one `ExpressionNode` tree into a typed `Predicate` (or operand) for a
//! target model, validating field paths against a `SchemaCatalog` and
//! collecting cone-search parameters into a fresh `ExtraParams`.
//!
//! A `Resolver` is consumed by `resolve`, so one instance can never leak
//! cone parameters into a second, unrelated query.

mod arith;
mod cone;
mod field;
mod literal;

#[cfg(test)]
mod tests;

use crate::{
    ast::{ExpressionNode, LiteralKind},
    error::ResolveError,
    extra::ExtraParams,
    model::SchemaCatalog,
    obs::{MetricsEvent, sink::record},
    predicate::{ArithExpr, ArithOp, CompareOp, FieldRef, Operand, Predicate},
    value::Value,
};

// re-exports
pub use field::FIELD_PATH_SEPARATOR;

///
/// Resolved
///
/// Result of resolving one expression node.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    Literal(Value),
    Field(FieldRef),
    Expr(Box<ArithExpr>),
    Predicate(Predicate),
}

impl Resolved {
    /// Require a comparison operand; predicates are rejected.
    pub fn into_operand(self) -> Result<Operand, ResolveError> {
        match self {
            Self::Literal(value) => Ok(Operand::Literal(value)),
            Self::Field(field) => Ok(Operand::Field(field)),
            Self::Expr(expr) => Ok(Operand::Expr(expr)),
            Self::Predicate(predicate) => Err(ResolveError::invalid_query(format!(
                "condition `{predicate}` used as a value"
            ))),
        }
    }

    /// Require a boolean predicate; values are rejected.
    pub fn into_predicate(self) -> Result<Predicate, ResolveError> {
        match self {
            Self::Predicate(predicate) => Ok(predicate),
            other => {
                let operand = other.into_operand()?;
                Err(ResolveError::invalid_query(format!(
                    "value `{operand}` used as a condition"
                )))
            }
        }
    }
}

///
/// Resolution
/// Output of one resolution pass.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub value: Resolved,
    pub extra: ExtraParams,
}

impl Resolution {
    /// Split into a root predicate and its extra parameters.
    pub fn into_predicate(self) -> Result<(Predicate, ExtraParams), ResolveError> {
        Ok((self.value.into_predicate()?, self.extra))
    }
}

///
/// Resolver
///
/// Resolves expressions against one target model of a schema catalog.
///

pub struct Resolver<'a, C: SchemaCatalog + ?Sized> {
    catalog: &'a C,
    model: String,
    dialect: Option<String>,
}

impl<'a, C: SchemaCatalog + ?Sized> Resolver<'a, C> {
    #[must_use]
    pub fn new(catalog: &'a C, model: impl Into<String>) -> Self {
        Self {
            catalog,
            model: model.into(),
            dialect: None,
        }
    }

    /// Record the SQL dialect the expression tree was parsed with.
    #[must_use]
    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = Some(dialect.into());
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn dialect(&self) -> Option<&str> {
        self.dialect.as_deref()
    }

    /// Resolve one expression tree. Consumes the resolver; the returned
    /// `ExtraParams` holds exactly the cones of this tree.
    pub fn resolve(self, node: &ExpressionNode) -> Result<Resolution, ResolveError> {
        record(MetricsEvent::ResolveStart {
            model: self.model.clone(),
        });

        let mut pass = ResolvePass {
            resolver: &self,
            extra: ExtraParams::new(),
        };

        match pass.resolve(node) {
            Ok(value) => {
                let extra = pass.extra;
                record(MetricsEvent::ResolveFinish {
                    model: self.model.clone(),
                    cones: extra.cones.len(),
                });

                Ok(Resolution { value, extra })
            }
            Err(err) => {
                record(MetricsEvent::ResolveFailed {
                    model: self.model.clone(),
                    kind: err.kind(),
                });

                Err(err)
            }
        }
    }
}

///
/// ResolvePass
///
/// State of one in-flight resolution. `extra` is mutated strictly in
/// depth-first, left-to-right order.
///

struct ResolvePass<'r, 'a, C: SchemaCatalog + ?Sized> {
    resolver: &'r Resolver<'a, C>,
    extra: ExtraParams,
}

impl<C: SchemaCatalog + ?Sized> ResolvePass<'_, '_, C> {
    fn resolve(&mut self, node: &ExpressionNode) -> Result<Resolved, ResolveError> {
        match node {
            ExpressionNode::Literal { raw, kind } => {
                literal::resolve_literal(raw, *kind).map(Resolved::Literal)
            }

            // quoting marks a string literal, not a column
            ExpressionNode::Column { path, quoted: true } => path
                .last()
                .map(|ident| Resolved::Literal(Value::Text(ident.clone())))
                .ok_or_else(|| ResolveError::invalid_query("empty quoted identifier")),
            ExpressionNode::Column {
                path,
                quoted: false,
            } => self.resolver.resolve_column(path).map(Resolved::Field),

            ExpressionNode::Negate(inner) => self.resolve_negate(inner),
            ExpressionNode::Not(inner) => Ok(Resolved::Predicate(!self.predicate(inner)?)),
            ExpressionNode::Nested(inner) => self.resolve(inner),

            ExpressionNode::And(left, right) => {
                let left = self.predicate(left)?;
                let right = self.predicate(right)?;

                Ok(Resolved::Predicate(left & right))
            }
            ExpressionNode::Or(left, right) => {
                let left = self.predicate(left)?;
                let right = self.predicate(right)?;

                Ok(Resolved::Predicate(left | right))
            }

            ExpressionNode::Eq(left, right) | ExpressionNode::Is(left, right) => {
                self.resolve_equality(left, right, true)
            }
            ExpressionNode::NotEq(left, right) => self.resolve_equality(left, right, false),
            ExpressionNode::Gt(left, right) => self.resolve_compare(CompareOp::Gt, left, right),
            ExpressionNode::Lt(left, right) => self.resolve_compare(CompareOp::Lt, left, right),
            ExpressionNode::GtEq(left, right) => {
                self.resolve_compare(CompareOp::Gte, left, right)
            }
            ExpressionNode::LtEq(left, right) => {
                self.resolve_compare(CompareOp::Lte, left, right)
            }
            ExpressionNode::PatternMatch(left, right) => {
                self.resolve_compare(CompareOp::ContainsCi, left, right)
            }

            ExpressionNode::Add(left, right) => self.resolve_arith(ArithOp::Add, left, right),
            ExpressionNode::Sub(left, right) => self.resolve_arith(ArithOp::Sub, left, right),
            ExpressionNode::Mul(left, right) => self.resolve_arith(ArithOp::Mul, left, right),
            ExpressionNode::Div(left, right) => self.resolve_arith(ArithOp::Div, left, right),

            ExpressionNode::Between { subject, low, high } => {
                let subject = self.operand(subject)?;
                let low = self.operand(low)?;
                let high = self.operand(high)?;

                Ok(Resolved::Predicate(
                    Predicate::gte(subject.clone(), low) & Predicate::lte(subject, high),
                ))
            }
            ExpressionNode::In { subject, list } => {
                let operand = self.operand(subject)?;
                let values = list
                    .iter()
                    .map(|item| self.list_value(item))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Resolved::Predicate(Predicate::in_(operand, values)))
            }

            ExpressionNode::Function { name, args } if name.eq_ignore_ascii_case("cone") => {
                self.resolve_cone(args).map(Resolved::Predicate)
            }

            ExpressionNode::Function { .. }
            | ExpressionNode::Null
            | ExpressionNode::Unsupported { .. } => {
                Err(ResolveError::invalid_query(node.label()))
            }
        }
    }

    fn predicate(&mut self, node: &ExpressionNode) -> Result<Predicate, ResolveError> {
        self.resolve(node)?.into_predicate()
    }

    fn operand(&mut self, node: &ExpressionNode) -> Result<Operand, ResolveError> {
        self.resolve(node)?.into_operand()
    }

    // `=`, `IS` and `!=`; a NULL right-hand side becomes a null check.
    fn resolve_equality(
        &mut self,
        left: &ExpressionNode,
        right: &ExpressionNode,
        equal: bool,
    ) -> Result<Resolved, ResolveError> {
        let left = self.operand(left)?;
        if matches!(right, ExpressionNode::Null) {
            return Ok(Resolved::Predicate(Predicate::is_null(left, equal)));
        }

        let right = self.operand(right)?;
        let predicate = Predicate::eq(left, right);

        Ok(Resolved::Predicate(if equal { predicate } else { !predicate }))
    }

    fn resolve_compare(
        &mut self,
        op: CompareOp,
        left: &ExpressionNode,
        right: &ExpressionNode,
    ) -> Result<Resolved, ResolveError> {
        let left = self.operand(left)?;
        let right = self.operand(right)?;

        Ok(Resolved::Predicate(Predicate::compare(op, left, right)))
    }

    fn resolve_arith(
        &mut self,
        op: ArithOp,
        left: &ExpressionNode,
        right: &ExpressionNode,
    ) -> Result<Resolved, ResolveError> {
        let left = self.operand(left)?;
        let right = self.operand(right)?;

        arith::combine(op, left, right)
    }

    fn resolve_negate(&mut self, inner: &ExpressionNode) -> Result<Resolved, ResolveError> {
        if let ExpressionNode::Literal { raw, kind } = inner
            && *kind != LiteralKind::String
        {
            return literal::resolve_negative_literal(raw, *kind).map(Resolved::Literal);
        }

        let value = self.resolve(inner)?;

        arith::negate(value)
    }

    // IN-list members must be scalar literals.
    fn list_value(&mut self, item: &ExpressionNode) -> Result<Value, ResolveError> {
        match self.resolve(item)? {
            Resolved::Literal(value) => Ok(value),
            other => Err(ResolveError::invalid_literal(
                other.into_operand()?.to_string(),
            )),
        }
    }
}
