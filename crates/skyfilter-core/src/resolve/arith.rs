use crate::{
    error::ResolveError,
    predicate::{ArithExpr, ArithOp, Operand},
    resolve::Resolved,
};

// Combine two operands arithmetically.
// Literal pairs fold when the result is representable; anything involving a
// field stays a composed expression for the engine to evaluate per row.
pub(super) fn combine(op: ArithOp, left: Operand, right: Operand) -> Result<Resolved, ResolveError> {
    if let (Operand::Literal(l), Operand::Literal(r)) = (&left, &right) {
        for value in [l, r] {
            if !value.is_numeric() {
                return Err(ResolveError::invalid_literal(value.to_string()));
            }
        }
        if let Some(folded) = l.checked_arith(op, r) {
            return Ok(Resolved::Literal(folded));
        }
    }

    Ok(Resolved::Expr(Box::new(ArithExpr::Binary { op, left, right })))
}

// Arithmetic negation of an already resolved value.
pub(super) fn negate(value: Resolved) -> Result<Resolved, ResolveError> {
    match value {
        Resolved::Literal(literal) => {
            if !literal.is_numeric() {
                return Err(ResolveError::invalid_literal(format!("-{literal}")));
            }
            match literal.checked_neg() {
                Some(negated) => Ok(Resolved::Literal(negated)),
                None => Ok(Resolved::Expr(Box::new(ArithExpr::Neg(Operand::Literal(
                    literal,
                ))))),
            }
        }
        Resolved::Field(field) => Ok(Resolved::Expr(Box::new(ArithExpr::Neg(Operand::Field(
            field,
        ))))),
        Resolved::Expr(expr) => Ok(Resolved::Expr(Box::new(ArithExpr::Neg(Operand::Expr(expr))))),
        Resolved::Predicate(predicate) => Err(ResolveError::invalid_query(format!(
            "negation of condition `{predicate}`"
        ))),
    }
}
