use crate::{
    predicate::{ArithExpr, FieldRef, Operand},
    value::Value,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fmt,
    ops::{BitAnd, BitOr, Not},
};

///
/// Predicate AST
///
/// ORM-independent boolean expression produced by the resolver.
/// Operands are already resolved: literals are typed and field paths have
/// been checked against the schema catalog. Lowering into SQL fragments or
/// an in-memory evaluator is the job of the data-access adapter.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum CompareOp {
    #[display("=")]
    Eq,
    #[display("<")]
    Lt,
    #[display("<=")]
    Lte,
    #[display(">")]
    Gt,
    #[display(">=")]
    Gte,

    /// Case-insensitive substring containment.
    #[display("ICONTAINS")]
    ContainsCi,
}

///
/// Predicate
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Predicate {
    Compare {
        op: CompareOp,
        left: Operand,
        right: Operand,
    },
    IsNull {
        operand: Operand,
        expect_null: bool,
    },
    And(Box<Self>, Box<Self>),
    Or(Box<Self>, Box<Self>),
    Not(Box<Self>),
    In {
        operand: Operand,
        values: Vec<Value>,
    },
}

impl Predicate {
    #[must_use]
    pub const fn compare(op: CompareOp, left: Operand, right: Operand) -> Self {
        Self::Compare { op, left, right }
    }

    #[must_use]
    pub const fn eq(left: Operand, right: Operand) -> Self {
        Self::compare(CompareOp::Eq, left, right)
    }

    #[must_use]
    pub const fn lt(left: Operand, right: Operand) -> Self {
        Self::compare(CompareOp::Lt, left, right)
    }

    #[must_use]
    pub const fn lte(left: Operand, right: Operand) -> Self {
        Self::compare(CompareOp::Lte, left, right)
    }

    #[must_use]
    pub const fn gt(left: Operand, right: Operand) -> Self {
        Self::compare(CompareOp::Gt, left, right)
    }

    #[must_use]
    pub const fn gte(left: Operand, right: Operand) -> Self {
        Self::compare(CompareOp::Gte, left, right)
    }

    #[must_use]
    pub const fn contains_ci(left: Operand, right: Operand) -> Self {
        Self::compare(CompareOp::ContainsCi, left, right)
    }

    #[must_use]
    pub const fn is_null(operand: Operand, expect_null: bool) -> Self {
        Self::IsNull {
            operand,
            expect_null,
        }
    }

    #[must_use]
    pub const fn in_(operand: Operand, values: Vec<Value>) -> Self {
        Self::In { operand, values }
    }

    /// Every field path referenced anywhere in the tree, synthetic cone
    /// fields included, in sorted order.
    #[must_use]
    pub fn referenced_fields(&self) -> BTreeSet<FieldRef> {
        let mut fields = BTreeSet::new();
        collect_predicate_fields(self, &mut fields);

        fields
    }
}

// Recursively gather field references from one predicate node.
fn collect_predicate_fields(predicate: &Predicate, fields: &mut BTreeSet<FieldRef>) {
    match predicate {
        Predicate::Compare { left, right, .. } => {
            collect_operand_fields(left, fields);
            collect_operand_fields(right, fields);
        }
        Predicate::IsNull { operand, .. } | Predicate::In { operand, .. } => {
            collect_operand_fields(operand, fields);
        }
        Predicate::And(left, right) | Predicate::Or(left, right) => {
            collect_predicate_fields(left, fields);
            collect_predicate_fields(right, fields);
        }
        Predicate::Not(inner) => collect_predicate_fields(inner, fields),
    }
}

fn collect_operand_fields(operand: &Operand, fields: &mut BTreeSet<FieldRef>) {
    match operand {
        Operand::Literal(_) => {}
        Operand::Field(field) => {
            fields.insert(field.clone());
        }
        Operand::Expr(expr) => match expr.as_ref() {
            ArithExpr::Binary { left, right, .. } => {
                collect_operand_fields(left, fields);
                collect_operand_fields(right, fields);
            }
            ArithExpr::Neg(inner) => collect_operand_fields(inner, fields),
        },
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(Box::new(self), Box::new(rhs))
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(Box::new(self), Box::new(rhs))
    }
}

impl Not for Predicate {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::Not(Box::new(self))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare { op, left, right } => write!(f, "{left} {op} {right}"),
            Self::IsNull {
                operand,
                expect_null: true,
            } => write!(f, "{operand} IS NULL"),
            Self::IsNull {
                operand,
                expect_null: false,
            } => write!(f, "{operand} IS NOT NULL"),
            Self::And(left, right) => write!(f, "({left} AND {right})"),
            Self::Or(left, right) => write!(f, "({left} OR {right})"),
            Self::Not(inner) => write!(f, "NOT ({inner})"),
            Self::In { operand, values } => {
                write!(f, "{operand} IN (")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str(")")
            }
        }
    }
}
