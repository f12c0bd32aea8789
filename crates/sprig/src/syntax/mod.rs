//! Syntax analysis: tokens in, immutable expression tree out.
//!
//! The parser never fails outright. Malformed input produces a complete tree
//! built around fabricated zero-length tokens, with every problem recorded in
//! the shared [`DiagnosticBag`](crate::diagnostics::DiagnosticBag).

mod ast;
mod parser;
mod printer;

pub use ast::{ExprSyntax, FunctionResolution};
pub use printer::{tree_to_string, write_tree};

use crate::diagnostics::DiagnosticBag;
use crate::lexer::SyntaxToken;
use parser::Parser;
use sprig_ext::FunctionRegistry;
use tracing::debug;

/// A parsed expression, together with the end-of-input token that closed it.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    root: ExprSyntax,
    eof: SyntaxToken,
}

impl SyntaxTree {
    /// Lexes and parses `text`, resolving call names against `registry` and
    /// reporting all problems into `diagnostics`.
    pub fn parse(
        text: &str,
        registry: &FunctionRegistry,
        diagnostics: &mut DiagnosticBag,
    ) -> Self {
        let (root, eof) = Parser::new(text, registry, diagnostics).parse();
        debug!(
            source_len = text.len(),
            diagnostics = diagnostics.len(),
            "parsed expression"
        );
        Self { root, eof }
    }

    /// The root expression node.
    pub fn root(&self) -> &ExprSyntax {
        &self.root
    }

    /// The end-of-input token; fabricated when trailing input stopped the
    /// parse early.
    pub fn eof(&self) -> &SyntaxToken {
        &self.eof
    }
}
