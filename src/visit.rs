//! Expression visitor infrastructure
//!
//! `Visitor` is a read-only traversal over a parsed expression. Default
//! implementations recurse into every child in source order (left to right),
//! so a pass only overrides the nodes it cares about.
//!
//! ```rust
//! use evrename::visit::{Visitor, walk_expr};
//! use evrename::parser::ast::Expr;
//! use evrename::span::Spanned;
//!
//! struct TextCounter {
//!     count: usize,
//! }
//!
//! impl Visitor for TextCounter {
//!     fn visit_expr(&mut self, expr: &Spanned<Expr>) {
//!         if let Expr::Text(_) = &expr.node {
//!             self.count += 1;
//!         }
//!         walk_expr(self, expr); // Continue recursion
//!     }
//! }
//!
//! let root = evrename::parse_expression(r#"F("a") + "b""#).unwrap();
//! let mut counter = TextCounter { count: 0 };
//! counter.visit_expr(&root);
//! assert_eq!(counter.count, 2);
//! ```
//!
//! Call the corresponding `walk_*` function inside an override to continue the
//! default recursion. Omit the walk call to prune traversal at that node.

use crate::parser::ast::*;
use crate::span::{Span, Spanned};

pub trait Visitor: Sized {
    fn visit_expr(&mut self, expr: &Spanned<Expr>) {
        walk_expr(self, expr);
    }

    /// `span` is the span of the whole call, object name included.
    fn visit_function_call(&mut self, call: &FunctionCall, span: Span) {
        walk_function_call(self, call, span);
    }
}

pub fn walk_expr<V: Visitor>(v: &mut V, expr: &Spanned<Expr>) {
    match &expr.node {
        // Leaves, no children
        Expr::Number(_)
        | Expr::Text(_)
        | Expr::Identifier(_)
        | Expr::ObjectFunctionName { .. }
        | Expr::Empty => {}

        Expr::Operator { lhs, rhs, .. } => {
            v.visit_expr(lhs);
            v.visit_expr(rhs);
        }
        Expr::UnaryOperator { factor, .. } => v.visit_expr(factor),
        Expr::SubExpression(inner) => v.visit_expr(inner),

        // Accessor chains
        Expr::Variable { child, .. } | Expr::VariableAccessor { child, .. } => {
            if let Some(child) = child {
                v.visit_expr(child);
            }
        }
        Expr::VariableBracketAccessor { expr: index, child } => {
            v.visit_expr(index);
            if let Some(child) = child {
                v.visit_expr(child);
            }
        }

        Expr::FunctionCall(call) => v.visit_function_call(call, expr.span),
    }
}

pub fn walk_function_call<V: Visitor>(v: &mut V, call: &FunctionCall, _span: Span) {
    for arg in &call.args {
        v.visit_expr(arg);
    }
}
