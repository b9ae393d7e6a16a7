pub mod token;

use logos::Logos;
use crate::span::{Span, Spanned};
use crate::diagnostics::EngineError;
use token::Token;

pub fn lex(source: &str) -> Result<Vec<Spanned<Token>>, EngineError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(tok) => tokens.push(Spanned::new(tok, Span::new(span.start, span.end))),
            Err(()) => {
                let fragment = &source[span.start..span.end];
                let msg = if fragment.starts_with('"') {
                    "unterminated string literal".to_string()
                } else {
                    format!("unexpected character '{fragment}'")
                };
                return Err(EngineError::syntax(msg, Span::new(span.start, span.end)));
            }
        }
    }

    Ok(tokens)
}
