use crate::{ast::LiteralKind, error::ResolveError, value::Value};

// Type one literal from its raw text and kind hint.
pub(super) fn resolve_literal(raw: &str, kind: LiteralKind) -> Result<Value, ResolveError> {
    match kind {
        LiteralKind::String => Ok(Value::Text(raw.to_string())),
        LiteralKind::Integer => raw
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ResolveError::invalid_literal(raw)),
        LiteralKind::Decimal => parse_finite(raw)
            .map(Value::Float)
            .ok_or_else(|| ResolveError::invalid_literal(raw)),
        LiteralKind::Other => Err(ResolveError::invalid_literal(raw)),
    }
}

// Negative numeric literal. Integers are parsed with their sign so that
// `-9223372036854775808` stays representable.
pub(super) fn resolve_negative_literal(
    raw: &str,
    kind: LiteralKind,
) -> Result<Value, ResolveError> {
    match kind {
        LiteralKind::Integer => format!("-{raw}")
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ResolveError::invalid_literal(format!("-{raw}"))),
        LiteralKind::Decimal => parse_finite(raw)
            .map(|v| Value::Float(-v))
            .ok_or_else(|| ResolveError::invalid_literal(format!("-{raw}"))),
        LiteralKind::String | LiteralKind::Other => {
            Err(ResolveError::invalid_literal(format!("-{raw}")))
        }
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
