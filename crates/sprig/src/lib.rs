//! Embeddable expression language: lex, parse, bind, evaluate.
//!
//! An expression like `1 + 2 * 3` or `PRICE(quantity) <= 100.50 and true`
//! runs through four stages. The lexer and parser build an immutable syntax
//! tree, the binder types it against static operator tables and the host's
//! [`FunctionRegistry`], and the evaluator walks the typed tree. Problems at
//! any stage accumulate in a [`DiagnosticBag`] rather than aborting, and
//! evaluation refuses to start while any remain.
//!
//! # Design
//!
//! - Every stage always produces output; fabricated tokens and `Unknown`
//!   bound nodes fill the holes malformed input leaves behind
//! - Types are `Int32`, `Decimal`, and `Boolean`; mixed numeric operations
//!   promote to `Decimal`
//! - Hosts extend the language only through registered [`Function`]s; there
//!   are no variables or user-defined syntax
//!
//! ```
//! use sprig::{Compilation, FunctionRegistry, RuntimeContext, Value};
//!
//! let registry = FunctionRegistry::new();
//! let compilation = Compilation::compile("1 + 2 * 3", &registry);
//! assert!(compilation.diagnostics().is_empty());
//!
//! let result = compilation.evaluate(&RuntimeContext::new()).unwrap();
//! assert_eq!(result, Value::Int32(7));
//! ```

pub mod binding;
pub mod diagnostics;
pub mod eval;
pub mod lexer;
pub mod syntax;
pub mod text;

pub use binding::BoundExpr;
pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticKind, Severity};
pub use eval::EvalError;
pub use lexer::{SyntaxToken, TokenKind};
pub use syntax::{ExprSyntax, FunctionResolution, SyntaxTree};
pub use text::TextSpan;

pub use sprig_ext::{
    ArgumentDefinition, Function, FunctionError, FunctionRegistry, RuntimeContext, Type, Value,
};

use binding::Binder;
use eval::Evaluator;
use tracing::debug;

/// A fully analyzed expression: syntax tree, typed tree, and every
/// diagnostic the pipeline produced.
///
/// Compilation never fails; inspect [`Compilation::diagnostics`] to learn
/// what, if anything, went wrong. [`Compilation::evaluate`] may be called
/// any number of times with different contexts.
pub struct Compilation {
    tree: SyntaxTree,
    bound: BoundExpr,
    diagnostics: DiagnosticBag,
}

impl Compilation {
    /// Runs lexing, parsing, and binding over `text`, resolving function
    /// calls against `registry`.
    pub fn compile(text: &str, registry: &FunctionRegistry) -> Self {
        let mut diagnostics = DiagnosticBag::new();
        let tree = SyntaxTree::parse(text, registry, &mut diagnostics);
        let bound = Binder::new(&mut diagnostics).bind(&tree);
        debug!(
            diagnostics = diagnostics.len(),
            result_type = %bound.ty(),
            "compilation finished"
        );
        Self {
            tree,
            bound,
            diagnostics,
        }
    }

    /// Everything the pipeline reported, in the order it was found.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.as_slice()
    }

    /// The parsed expression tree.
    pub fn syntax_tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// The typed expression tree.
    pub fn bound_expr(&self) -> &BoundExpr {
        &self.bound
    }

    /// Static type of the whole expression; `Unknown` when no type could be
    /// recovered (for example a call to an unregistered function).
    pub fn result_type(&self) -> Type {
        self.bound.ty()
    }

    /// Evaluates the expression with the given host context.
    ///
    /// Refuses with [`EvalError::BlockedByDiagnostics`] while any diagnostic
    /// from compilation is outstanding.
    pub fn evaluate(&self, context: &RuntimeContext) -> Result<Value, EvalError> {
        if self.diagnostics.has_blocking() {
            return Err(EvalError::BlockedByDiagnostics {
                count: self.diagnostics.len(),
            });
        }
        Evaluator::new(context).evaluate(&self.bound)
    }
}
