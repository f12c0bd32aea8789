//! Diagnostic reporting shared by every pipeline stage.
//!
//! Stages accumulate diagnostics instead of aborting on the first problem, so
//! one pass over an input surfaces every independent issue. Evaluation is the
//! sole gate: it refuses to run while any error or critical diagnostic exists.
//!
//! # Design
//!
//! - `Diagnostic` — positioned, leveled message; immutable once created
//! - `Severity` — `Error` (localized, stage degrades gracefully) or
//!   `Critical` (structural; the tree is unreliable)
//! - `DiagnosticBag` — append-only, insertion-ordered, one per pipeline run

use crate::lexer::TokenKind;
use crate::text::TextSpan;
use sprig_ext::Type;
use std::fmt;

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Localized problem; the stage keeps producing a usable tree.
    Error,
    /// Structural problem; the resulting tree must not be evaluated.
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Category of diagnostic, by problem class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    // Lexing
    BadCharacter,
    InvalidLiteral,
    // Parsing
    UnexpectedToken,
    MissingClosingParenthesis,
    UnknownFunction,
    // Binding
    InvalidUnaryOperator,
    InvalidBinaryOperator,
    WrongArgumentCount,
    ArgumentTypeMismatch,
}

/// A positioned, leveled message describing one problem found during
/// lexing, parsing, or binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: TextSpan,
    pub message: String,
    pub severity: Severity,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.severity, self.message, self.span)
    }
}

/// Ordered, append-only collection of [`Diagnostic`]s for one pipeline run.
///
/// A fresh bag is created per compilation and threaded by mutable reference
/// through lexer, parser, and binder; it is never shared across unrelated
/// runs.
#[derive(Debug, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the accumulated diagnostics, in insertion order.
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of accumulated diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether no diagnostics have been reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Clears the bag for reuse by a later run.
    pub fn reset(&mut self) {
        self.diagnostics.clear();
    }

    /// Whether any diagnostic should block evaluation.
    pub fn has_blocking(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d.severity, Severity::Error | Severity::Critical))
    }

    fn report(&mut self, kind: DiagnosticKind, severity: Severity, span: TextSpan, message: String) {
        self.diagnostics.push(Diagnostic {
            span,
            message,
            severity,
            kind,
        });
    }

    /// Reports an unrecognized character during lexing.
    pub fn report_bad_character(&mut self, character: char, position: usize) {
        self.report(
            DiagnosticKind::BadCharacter,
            Severity::Error,
            TextSpan::new(position, character.len_utf8()),
            format!("bad character '{}' at position {}", character, position),
        );
    }

    /// Reports a numeric literal that cannot be represented as an Int32.
    pub fn report_invalid_int32(&mut self, text: &str, span: TextSpan) {
        self.report(
            DiagnosticKind::InvalidLiteral,
            Severity::Error,
            span,
            format!("'{}' is not a valid Int32", text),
        );
    }

    /// Reports a numeric literal that cannot be represented as a Decimal.
    pub fn report_invalid_decimal(&mut self, text: &str, span: TextSpan) {
        self.report(
            DiagnosticKind::InvalidLiteral,
            Severity::Error,
            span,
            format!("'{}' is not a valid Decimal", text),
        );
    }

    /// Reports a token the parser could not use where it stood.
    pub fn report_unexpected_token(&mut self, span: TextSpan, found: TokenKind, expected: TokenKind) {
        self.report(
            DiagnosticKind::UnexpectedToken,
            Severity::Error,
            span,
            format!("unexpected token <{}>, expected <{}>", found, expected),
        );
    }

    /// Reports a parenthesized expression whose `)` never arrived.
    ///
    /// `span` runs from the opening parenthesis to the end of the input.
    pub fn report_missing_closing_parenthesis(&mut self, span: TextSpan) {
        self.report(
            DiagnosticKind::MissingClosingParenthesis,
            Severity::Critical,
            span,
            format!("missing closing parenthesis for '(' at position {}", span.start),
        );
    }

    /// Reports a call to a function name absent from the registry.
    pub fn report_unknown_function(&mut self, name: &str, span: TextSpan) {
        self.report(
            DiagnosticKind::UnknownFunction,
            Severity::Error,
            span,
            format!("call to unregistered function '{}'", name),
        );
    }

    /// Reports a unary operator applied to an unsupported operand type.
    pub fn report_invalid_unary_operator(&mut self, operator: &str, span: TextSpan, operand: Type) {
        self.report(
            DiagnosticKind::InvalidUnaryOperator,
            Severity::Error,
            span,
            format!("unary operator '{}' is not defined for type {}", operator, operand),
        );
    }

    /// Reports a binary operator applied to an unsupported type pair.
    pub fn report_invalid_binary_operator(
        &mut self,
        operator: &str,
        span: TextSpan,
        left: Type,
        right: Type,
    ) {
        self.report(
            DiagnosticKind::InvalidBinaryOperator,
            Severity::Error,
            span,
            format!(
                "binary operator '{}' is not defined for types {} and {}",
                operator, left, right
            ),
        );
    }

    /// Reports a call whose argument count disagrees with the function's arity.
    pub fn report_wrong_argument_count(
        &mut self,
        function: &str,
        span: TextSpan,
        declared: usize,
        provided: usize,
    ) {
        self.report(
            DiagnosticKind::WrongArgumentCount,
            Severity::Error,
            span,
            format!(
                "function '{}' accepts {} argument(s) but {} were provided",
                function, declared, provided
            ),
        );
    }

    /// Reports an argument whose bound type is outside the accepted set.
    pub fn report_argument_type_mismatch(
        &mut self,
        function: &str,
        span: TextSpan,
        index: usize,
        provided: Type,
        accepted: &[Type],
    ) {
        let accepted = accepted
            .iter()
            .map(Type::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        self.report(
            DiagnosticKind::ArgumentTypeMismatch,
            Severity::Error,
            span,
            format!(
                "argument {} of function '{}' is {}, expected one of: {}",
                index, function, provided, accepted
            ),
        );
    }
}
