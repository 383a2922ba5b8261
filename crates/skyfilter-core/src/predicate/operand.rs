use crate::value::Value;
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// FieldRef
///
/// Validated, relation-qualified field path (`host__name`) as consumed by the
/// data-access layer. Synthetic cone fields use the same type.
///

#[derive(
    Clone, Debug, Deref, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct FieldRef(String);

impl FieldRef {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for FieldRef {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

///
/// ArithOp
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ArithOp {
    #[display("+")]
    Add,
    #[display("-")]
    Sub,
    #[display("*")]
    Mul,
    #[display("/")]
    Div,
}

///
/// Operand
///
/// One side of a comparison: a literal, a field, or an arithmetic
/// composition that the execution engine evaluates per row.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Operand {
    Literal(Value),
    Field(FieldRef),
    Expr(Box<ArithExpr>),
}

impl Operand {
    #[must_use]
    pub fn field(path: impl Into<String>) -> Self {
        Self::Field(FieldRef::new(path))
    }

    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    #[must_use]
    pub const fn as_literal(&self) -> Option<&Value> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Field(_) | Self::Expr(_) => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Field(field) => write!(f, "{field}"),
            Self::Expr(expr) => write!(f, "{expr}"),
        }
    }
}

///
/// ArithExpr
///
/// Composed arithmetic over operands that could not be folded at resolution
/// time (at least one side references a field, or folding would overflow).
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum ArithExpr {
    Binary {
        op: ArithOp,
        left: Operand,
        right: Operand,
    },
    Neg(Operand),
}

impl fmt::Display for ArithExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
            Self::Neg(inner) => write!(f, "-{inner}"),
        }
    }
}
