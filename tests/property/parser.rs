// Property tests for parser invariants:
// 1. Parse determinism: same source always produces the same result
// 2. No panics: arbitrary input yields a tree or a syntax error
// 3. Spans stay within the source and nest inside their parents

use proptest::prelude::*;

use evrename::parse_expression;
use evrename::parser::ast::{Expr, FunctionCall};
use evrename::span::{Span, Spanned};
use evrename::visit::{Visitor, walk_expr, walk_function_call};

fn arb_atom() -> impl Strategy<Value = String> {
    prop_oneof![
        (0..1000u32).prop_map(|n| n.to_string()),
        "[a-z]{1,6}".prop_map(|s| format!("\"{s}\"")),
        "[A-Z][a-z]{0,5}",
    ]
}

fn arb_expr() -> impl Strategy<Value = String> {
    arb_atom().prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            (inner.clone(), prop_oneof![Just("+"), Just("-"), Just("*"), Just("/"), Just("&&"), Just("<=")], inner.clone())
                .prop_map(|(a, op, b)| format!("{a} {op} {b}")),
            inner.clone().prop_map(|a| format!("-{a}")),
            inner.clone().prop_map(|a| format!("({a})")),
            prop::collection::vec(inner.clone(), 0..3).prop_map(|args| format!("Fn({})", args.join(", "))),
            (inner.clone(), inner).prop_map(|(a, b)| format!("Hero.Anim::Get({a}, {b})")),
        ]
    })
}

/// Checks that every child span lies inside the span of its parent.
struct SpanChecker {
    bounds: Vec<Span>,
    violations: usize,
    visited: usize,
}

impl SpanChecker {
    fn check(&mut self, span: Span) {
        self.visited += 1;
        if let Some(parent) = self.bounds.last() {
            if span.start < parent.start || span.end > parent.end {
                self.violations += 1;
            }
        }
    }
}

impl Visitor for SpanChecker {
    fn visit_expr(&mut self, expr: &Spanned<Expr>) {
        self.check(expr.span);
        self.bounds.push(expr.span);
        walk_expr(self, expr);
        self.bounds.pop();
    }

    fn visit_function_call(&mut self, call: &FunctionCall, span: Span) {
        self.check(call.function_name.span);
        walk_function_call(self, call, span);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn parse_is_deterministic(source in arb_expr()) {
        let first = parse_expression(&source);
        let second = parse_expression(&source);
        prop_assert_eq!(first.is_ok(), second.is_ok());
        if let (Ok(a), Ok(b)) = (first, second) {
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn generated_expressions_parse(source in arb_expr()) {
        prop_assert!(parse_expression(&source).is_ok(), "failed to parse {}", source);
    }

    #[test]
    fn spans_nest_within_the_source(source in arb_expr()) {
        let root = parse_expression(&source).unwrap();
        prop_assert!(root.span.end <= source.len());
        let mut checker = SpanChecker { bounds: vec![Span::new(0, source.len())], violations: 0, visited: 0 };
        checker.visit_expr(&root);
        prop_assert!(checker.visited > 0);
        prop_assert_eq!(checker.violations, 0);
    }

    #[test]
    fn arbitrary_input_never_panics(source in "\\PC{0,40}") {
        if let Err(err) = parse_expression(&source) {
            let span = err.span().unwrap();
            prop_assert!(span.start <= span.end && span.end <= source.len());
        }
    }
}
