//! Branch-drawn rendering of syntax trees, for debugging and demos.

use crate::syntax::ast::ExprSyntax;
use std::fmt::{self, Write};

/// Writes `expr` as an indented tree with box-drawing branches.
pub fn write_tree(expr: &ExprSyntax, out: &mut impl Write) -> fmt::Result {
    write_node(expr, out, "", true)
}

/// Renders `expr` to a `String` via [`write_tree`].
pub fn tree_to_string(expr: &ExprSyntax) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_tree(expr, &mut out);
    out
}

fn write_node(
    expr: &ExprSyntax,
    out: &mut impl Write,
    indent: &str,
    is_last: bool,
) -> fmt::Result {
    let marker = if is_last { "└── " } else { "├── " };
    let child_indent = format!("{}{}", indent, if is_last { "    " } else { "│   " });

    match expr {
        ExprSyntax::Literal { token, value } => {
            writeln!(out, "{}{}Literal {} = {}", indent, marker, token.text, value)
        }
        ExprSyntax::Unary { operator, operand } => {
            writeln!(out, "{}{}Unary {}", indent, marker, operator.text)?;
            write_node(operand, out, &child_indent, true)
        }
        ExprSyntax::Binary {
            left,
            operator,
            right,
        } => {
            writeln!(out, "{}{}Binary {}", indent, marker, operator.text)?;
            write_node(left, out, &child_indent, false)?;
            write_node(right, out, &child_indent, true)
        }
        ExprSyntax::Parenthesized { expr, .. } => {
            writeln!(out, "{}{}Parenthesized", indent, marker)?;
            write_node(expr, out, &child_indent, true)
        }
        ExprSyntax::Call {
            name, arguments, ..
        } => {
            writeln!(out, "{}{}Call {}", indent, marker, name.text)?;
            for (index, argument) in arguments.iter().enumerate() {
                write_node(argument, out, &child_indent, index + 1 == arguments.len())?;
            }
            Ok(())
        }
    }
}
