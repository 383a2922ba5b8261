use crate::predicate::ArithOp;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Value
///
/// Typed scalar literal carried by predicates.
/// `Bool` never comes from query text; it only appears on the right-hand side
/// of synthetic cone predicates.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(_) | Self::Bool(_) => None,
        }
    }

    /// Arithmetic negation of a numeric literal.
    /// Returns `None` for non-numeric values and for `i64::MIN`.
    #[must_use]
    pub fn checked_neg(&self) -> Option<Self> {
        match self {
            Self::Int(v) => v.checked_neg().map(Self::Int),
            Self::Float(v) => Some(Self::Float(-v)),
            Self::Text(_) | Self::Bool(_) => None,
        }
    }

    /// Fold two numeric literals under `op`.
    ///
    /// Int∘Int stays integral (division truncates toward zero); any float
    /// operand widens the result to float. Returns `None` when either side is
    /// non-numeric, on integer overflow, on division by zero, or when the
    /// float result is not finite.
    #[must_use]
    pub fn checked_arith(&self, op: ArithOp, rhs: &Self) -> Option<Self> {
        if let (Self::Int(l), Self::Int(r)) = (self, rhs) {
            let folded = match op {
                ArithOp::Add => l.checked_add(*r),
                ArithOp::Sub => l.checked_sub(*r),
                ArithOp::Mul => l.checked_mul(*r),
                ArithOp::Div => l.checked_div(*r),
            };

            return folded.map(Self::Int);
        }

        let (l, r) = (self.as_f64()?, rhs.as_f64()?);
        let folded = match op {
            ArithOp::Add => l + r,
            ArithOp::Sub => l - r,
            ArithOp::Mul => l * r,
            ArithOp::Div if r == 0.0 => return None,
            ArithOp::Div => l / r,
        };

        folded.is_finite().then_some(Self::Float(folded))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Bool(true) => f.write_str("TRUE"),
            Self::Bool(false) => f.write_str("FALSE"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

///
/// TESTS
///
