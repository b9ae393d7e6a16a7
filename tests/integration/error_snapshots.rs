//! Snapshot tests for error message formatting.
//!
//! Uses insta to capture error messages and detect regressions.
//! Run `cargo insta review` to review changes.

use std::path::Path;

use evrename::diagnostics::EngineError;
use evrename::{Platform, parse_expression};
use insta::assert_snapshot;

/// Message plus the byte range it points at.
fn syntax_error(source: &str) -> String {
    let err = parse_expression(source).unwrap_err();
    match err.span() {
        Some(span) => format!("{err} @ {}..{}", span.start, span.end),
        None => err.to_string(),
    }
}

fn metadata_error(manifest: &str) -> EngineError {
    Platform::from_toml_str(manifest, Path::new("platform.toml")).unwrap_err()
}

#[test]
fn unexpected_character() {
    assert_snapshot!(syntax_error("a # b"), @"Syntax error: unexpected character '#' @ 2..3");
}

#[test]
fn missing_closing_parenthesis_of_call() {
    assert_snapshot!(
        syntax_error(r#"LayerOr("UI", "Base""#),
        @"Syntax error: missing ')' to close the arguments of 'LayerOr' @ 20..20"
    );
}

#[test]
fn arguments_without_separator() {
    assert_snapshot!(
        syntax_error("Hero.X(1 2)"),
        @"Syntax error: expected ',' or ')' in arguments of 'X', found number @ 9..10"
    );
}

#[test]
fn dangling_operator() {
    assert_snapshot!(syntax_error("1 + "), @"Syntax error: unexpected end of expression @ 4..4");
}

#[test]
fn unclosed_sub_expression() {
    assert_snapshot!(syntax_error("(1 + 2"), @"Syntax error: expected ), found end of expression @ 6..6");
}

#[test]
fn trailing_tokens() {
    assert_snapshot!(syntax_error("1 2"), @"Syntax error: unexpected number after end of expression @ 2..3");
}

#[test]
fn excessive_nesting() {
    let source = format!("{}1{}", "(".repeat(500), ")".repeat(500));
    assert_snapshot!(syntax_error(&source), @"Syntax error: expression nested too deeply @ 128..129");
}

#[test]
fn duplicate_expression_in_manifest() {
    let err = metadata_error("[[expressions]]\nname = \"Pi\"\n\n[[expressions]]\nname = \"Pi\"\n");
    assert_snapshot!(err.to_string(), @"Metadata error: duplicate expression 'Pi'");
}

#[test]
fn empty_behavior_type_in_manifest() {
    let err = metadata_error("[[behavior_expressions]]\nbehavior = \" \"\nname = \"Speed\"\n");
    assert_snapshot!(err.to_string(), @"Metadata error: behavior type must not be empty");
}
