//! Syntax tree nodes produced by the parser.

use crate::lexer::SyntaxToken;
use crate::text::TextSpan;
use sprig_ext::{Function, Value};
use std::fmt;
use std::sync::Arc;

/// Outcome of looking up a called function in the host registry at parse
/// time.
///
/// An unresolved call still parses normally so that diagnostics in the
/// argument list are not lost; it simply carries the unknown name instead of
/// a callable.
#[derive(Clone)]
pub enum FunctionResolution {
    /// The registry supplied a callable for this name.
    Resolved(Arc<dyn Function>),
    /// No function with this name is registered.
    Unresolved(String),
}

impl FunctionResolution {
    /// The called name, resolved or not.
    pub fn name(&self) -> &str {
        match self {
            FunctionResolution::Resolved(function) => function.name(),
            FunctionResolution::Unresolved(name) => name,
        }
    }
}

impl fmt::Debug for FunctionResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionResolution::Resolved(function) => {
                write!(f, "Resolved({})", function.name())
            }
            FunctionResolution::Unresolved(name) => write!(f, "Unresolved({})", name),
        }
    }
}

/// An expression node.
///
/// Trees are immutable once built. Even malformed input produces a complete
/// tree; fabricated tokens fill the holes and diagnostics record what was
/// wrong.
#[derive(Debug, Clone)]
pub enum ExprSyntax {
    /// A literal value: number literal or `true`/`false`.
    Literal { token: SyntaxToken, value: Value },
    /// A prefix operator applied to an operand.
    Unary {
        operator: SyntaxToken,
        operand: Box<ExprSyntax>,
    },
    /// An infix operator applied to two operands.
    Binary {
        left: Box<ExprSyntax>,
        operator: SyntaxToken,
        right: Box<ExprSyntax>,
    },
    /// An expression wrapped in parentheses.
    Parenthesized {
        open: SyntaxToken,
        expr: Box<ExprSyntax>,
        close: SyntaxToken,
    },
    /// A call to a host-registered function.
    Call {
        name: SyntaxToken,
        function: FunctionResolution,
        open: SyntaxToken,
        arguments: Vec<ExprSyntax>,
        close: SyntaxToken,
    },
}

impl ExprSyntax {
    /// Source range this node covers, from its first token to its last.
    pub fn span(&self) -> TextSpan {
        match self {
            ExprSyntax::Literal { token, .. } => token.span,
            ExprSyntax::Unary { operator, operand } => {
                TextSpan::from_bounds(operator.span.start, operand.span().end())
            }
            ExprSyntax::Binary { left, right, .. } => {
                TextSpan::from_bounds(left.span().start, right.span().end())
            }
            ExprSyntax::Parenthesized { open, close, .. } => {
                TextSpan::from_bounds(open.span.start, close.span.end())
            }
            ExprSyntax::Call { name, close, .. } => {
                TextSpan::from_bounds(name.span.start, close.span.end())
            }
        }
    }
}
