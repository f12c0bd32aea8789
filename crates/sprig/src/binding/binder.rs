//! Static analysis: resolves operators against the overload tables and
//! checks call signatures.

use crate::binding::bound::BoundExpr;
use crate::binding::operators::{resolve_binary, resolve_unary};
use crate::diagnostics::DiagnosticBag;
use crate::syntax::{ExprSyntax, FunctionResolution, SyntaxTree};
use sprig_ext::Type;
use tracing::debug;

pub(crate) struct Binder<'bag> {
    diagnostics: &'bag mut DiagnosticBag,
}

impl<'bag> Binder<'bag> {
    pub(crate) fn new(diagnostics: &'bag mut DiagnosticBag) -> Self {
        Self { diagnostics }
    }

    pub(crate) fn bind(&mut self, tree: &SyntaxTree) -> BoundExpr {
        let bound = self.bind_expression(tree.root());
        debug!(result_type = %bound.ty(), "bound expression");
        bound
    }

    /// Binding is total and degrades instead of collapsing: an operator that
    /// has no table row is reported once, and its operand (unary) or left
    /// operand (binary) stands in for the whole node, so surrounding
    /// expressions keep their types and their own diagnostics.
    fn bind_expression(&mut self, expr: &ExprSyntax) -> BoundExpr {
        match expr {
            ExprSyntax::Literal { value, .. } => BoundExpr::Literal(value.clone()),
            ExprSyntax::Parenthesized { expr, .. } => self.bind_expression(expr),
            ExprSyntax::Unary { operator, operand } => {
                let operand = self.bind_expression(operand);
                let operand_type = operand.ty();
                // An operand that already failed to bind has produced its own
                // diagnostic; piling an operator error on top helps nobody.
                if operand_type == Type::Unknown {
                    return operand;
                }
                match resolve_unary(operator.kind, operand_type) {
                    Some(resolved) => BoundExpr::Unary {
                        operator: resolved,
                        operand: Box::new(operand),
                    },
                    None => {
                        self.diagnostics.report_invalid_unary_operator(
                            &operator.text,
                            operator.span,
                            operand_type,
                        );
                        operand
                    }
                }
            }
            ExprSyntax::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.bind_expression(left);
                let right = self.bind_expression(right);
                let (left_type, right_type) = (left.ty(), right.ty());
                if left_type == Type::Unknown || right_type == Type::Unknown {
                    return left;
                }
                match resolve_binary(operator.kind, left_type, right_type) {
                    Some(resolved) => BoundExpr::Binary {
                        left: Box::new(left),
                        operator: resolved,
                        right: Box::new(right),
                    },
                    None => {
                        self.diagnostics.report_invalid_binary_operator(
                            &operator.text,
                            operator.span,
                            left_type,
                            right_type,
                        );
                        left
                    }
                }
            }
            ExprSyntax::Call {
                function,
                arguments,
                ..
            } => {
                // Arguments are always bound so their own problems surface
                // even when the call itself cannot.
                let bound_arguments: Vec<BoundExpr> = arguments
                    .iter()
                    .map(|argument| self.bind_expression(argument))
                    .collect();

                let function = match function {
                    FunctionResolution::Resolved(function) => function,
                    // The parser already reported the unknown name.
                    FunctionResolution::Unresolved(_) => return BoundExpr::Unknown,
                };

                let declared = function.arguments();
                if declared.len() != bound_arguments.len() {
                    self.diagnostics.report_wrong_argument_count(
                        function.name(),
                        expr.span(),
                        declared.len(),
                        bound_arguments.len(),
                    );
                }

                // Type-check whatever overlaps, even when the counts
                // disagree, so every independent mismatch is reported.
                for (index, (definition, argument)) in
                    declared.iter().zip(&bound_arguments).enumerate()
                {
                    let provided = argument.ty();
                    if provided == Type::Unknown {
                        continue;
                    }
                    if !definition.accepted().contains(&provided) {
                        self.diagnostics.report_argument_type_mismatch(
                            function.name(),
                            arguments[index].span(),
                            index,
                            provided,
                            definition.accepted(),
                        );
                    }
                }

                BoundExpr::Call {
                    function: function.clone(),
                    arguments: bound_arguments,
                }
            }
        }
    }
}
