//! Binding: turns the syntax tree into a typed tree.
//!
//! Operator legality lives entirely in const overload tables; the binder is a
//! lookup loop plus call signature checks. A failed operator lookup degrades
//! the node to its (left) operand after reporting, and only calls with no
//! resolved function collapse to [`BoundExpr::Unknown`], so one run reports
//! every independent type error without stopping.

mod binder;
mod bound;
mod operators;

pub use bound::BoundExpr;
pub use operators::{
    resolve_binary, resolve_unary, BinaryOperator, BinaryOperatorKind, UnaryOperator,
    UnaryOperatorKind,
};

pub(crate) use binder::Binder;
