mod ast;
mod operand;


pub use ast::{CompareOp, Predicate};
pub use operand::{ArithExpr, ArithOp, FieldRef, Operand};
