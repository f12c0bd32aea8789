//! Typed expression tree, the binder's output.

use crate::binding::operators::{BinaryOperator, UnaryOperator};
use sprig_ext::{Function, Type, Value};
use std::fmt;
use std::sync::Arc;

/// A typed expression node.
///
/// Mistyped operators degrade to their operand during binding, so `Unknown`
/// appears only for calls without a resolved function. Either way the
/// diagnostics explaining what went wrong live in the bag, and evaluation is
/// blocked whenever any exist.
#[derive(Clone)]
pub enum BoundExpr {
    /// A constant value.
    Literal(Value),
    /// A resolved prefix operator application.
    Unary {
        operator: &'static UnaryOperator,
        operand: Box<BoundExpr>,
    },
    /// A resolved infix operator application.
    Binary {
        left: Box<BoundExpr>,
        operator: &'static BinaryOperator,
        right: Box<BoundExpr>,
    },
    /// A call to a resolved, arity- and type-checked function.
    Call {
        function: Arc<dyn Function>,
        arguments: Vec<BoundExpr>,
    },
    /// A node that failed to bind.
    Unknown,
}

impl BoundExpr {
    /// Static type of this expression.
    pub fn ty(&self) -> Type {
        match self {
            BoundExpr::Literal(value) => value.ty(),
            BoundExpr::Unary { operator, .. } => operator.result,
            BoundExpr::Binary { operator, .. } => operator.result,
            BoundExpr::Call { function, .. } => function.return_type(),
            BoundExpr::Unknown => Type::Unknown,
        }
    }
}

impl fmt::Debug for BoundExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundExpr::Literal(value) => write!(f, "Literal({})", value),
            BoundExpr::Unary { operator, operand } => f
                .debug_struct("Unary")
                .field("kind", &operator.kind)
                .field("operand", operand)
                .finish(),
            BoundExpr::Binary {
                left,
                operator,
                right,
            } => f
                .debug_struct("Binary")
                .field("kind", &operator.kind)
                .field("left", left)
                .field("right", right)
                .finish(),
            BoundExpr::Call {
                function,
                arguments,
            } => f
                .debug_struct("Call")
                .field("function", &function.name())
                .field("arguments", arguments)
                .finish(),
            BoundExpr::Unknown => write!(f, "Unknown"),
        }
    }
}
