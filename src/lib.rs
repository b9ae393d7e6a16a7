pub mod span;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod visit;
pub mod metadata;
pub mod platform;
pub mod project;
pub mod walker;
pub mod rename;

use diagnostics::EngineError;
use parser::ast::Expr;
use span::Spanned;

pub use metadata::{ExpressionScope, MetadataProvider, ParameterMetadata};
pub use platform::Platform;
pub use project::{Event, Expression, Instruction, Project};
pub use rename::{NameChange, find_occurrences, rename_in_project, rename_link_targets, splice};
pub use walker::{EventsWorker, ObjectsScope, walk_events, walk_project};

/// Parse one expression (lex → parse). Spans index into `source`.
pub fn parse_expression(source: &str) -> Result<Spanned<Expr>, EngineError> {
    let tokens = lexer::lex(source)?;
    let mut parser = parser::Parser::new(&tokens, source);
    parser.parse_expression()
}
