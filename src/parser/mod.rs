pub mod ast;

use crate::diagnostics::EngineError;
use crate::lexer::token::Token;
use crate::span::{Span, Spanned};
use ast::*;

/// Binding power of prefix `-`, `+` and `!`: tighter than any infix operator.
const PREFIX_BP: u8 = 11;

/// Deepest nesting of sub-expressions, call arguments, prefix operators and
/// variable accessors accepted before the text is rejected.
pub const MAX_NESTING_DEPTH: usize = 128;

pub struct Parser<'a> {
    tokens: &'a [Spanned<Token>],
    source: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Spanned<Token>], source: &'a str) -> Self {
        Self { tokens, source, pos: 0, depth: 0 }
    }

    /// Run `parse` one nesting level deeper, failing once the limit is hit.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T, EngineError>) -> Result<T, EngineError> {
        if self.depth >= MAX_NESTING_DEPTH {
            let span = self.peek().map_or_else(|| self.eof_span(), |tok| tok.span);
            return Err(EngineError::syntax("expression nested too deeply", span));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn peek(&self) -> Option<&'a Spanned<Token>> {
        self.tokens.get(self.pos)
    }

    fn peek_is(&self, expected: &Token) -> bool {
        self.peek_nth_is(0, expected)
    }

    fn peek_nth_is(&self, n: usize, expected: &Token) -> bool {
        self.tokens
            .get(self.pos + n)
            .is_some_and(|tok| std::mem::discriminant(&tok.node) == std::mem::discriminant(expected))
    }

    fn advance(&mut self) -> Option<&'a Spanned<Token>> {
        let tok = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(tok)
    }

    fn expect(&mut self, expected: &Token) -> Result<&'a Spanned<Token>, EngineError> {
        match self.peek() {
            Some(tok) if std::mem::discriminant(&tok.node) == std::mem::discriminant(expected) => {
                self.pos += 1;
                Ok(tok)
            }
            Some(tok) => Err(EngineError::syntax(
                format!("expected {expected}, found {}", tok.node),
                tok.span,
            )),
            None => Err(EngineError::syntax(
                format!("expected {expected}, found end of expression"),
                self.eof_span(),
            )),
        }
    }

    fn expect_ident(&mut self) -> Result<Spanned<String>, EngineError> {
        match self.peek() {
            Some(tok) if matches!(tok.node, Token::Ident) => {
                let name = self.source[tok.span.start..tok.span.end].to_string();
                self.pos += 1;
                Ok(Spanned::new(name, tok.span))
            }
            Some(tok) => Err(EngineError::syntax(
                format!("expected identifier, found {}", tok.node),
                tok.span,
            )),
            None => Err(EngineError::syntax(
                "expected identifier, found end of expression",
                self.eof_span(),
            )),
        }
    }

    fn eof_span(&self) -> Span {
        Span::empty_at(self.source.len())
    }

    /// Parse the whole token stream as one expression. Blank text is `Empty`.
    pub fn parse_expression(&mut self) -> Result<Spanned<Expr>, EngineError> {
        if self.tokens.is_empty() {
            return Ok(Spanned::new(Expr::Empty, Span::empty_at(0)));
        }
        let expr = self.parse_expr(0)?;
        if let Some(tok) = self.peek() {
            return Err(EngineError::syntax(
                format!("unexpected {} after end of expression", tok.node),
                tok.span,
            ));
        }
        Ok(expr)
    }

    fn parse_expr(&mut self, min_bp: u8) -> Result<Spanned<Expr>, EngineError> {
        self.nested(|parser| parser.parse_binary(min_bp))
    }

    fn parse_binary(&mut self, min_bp: u8) -> Result<Spanned<Expr>, EngineError> {
        let mut lhs = self.parse_prefix()?;

        loop {
            let Some(tok) = self.peek() else { break };
            let Some(op) = binop_for(&tok.node) else { break };
            let (l_bp, r_bp) = infix_binding_power(op);
            if l_bp < min_bp {
                break;
            }
            self.advance();
            let rhs = self.parse_expr(r_bp)?;
            let span = lhs.span.to(rhs.span);
            lhs = Spanned::new(
                Expr::Operator {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            );
        }

        Ok(lhs)
    }

    fn parse_prefix(&mut self) -> Result<Spanned<Expr>, EngineError> {
        let tok = self.peek().ok_or_else(|| {
            EngineError::syntax("unexpected end of expression", self.eof_span())
        })?;

        match &tok.node {
            Token::Number => {
                self.advance();
                let literal = self.source[tok.span.start..tok.span.end].to_string();
                Ok(Spanned::new(Expr::Number(literal), tok.span))
            }
            Token::Text(value) => {
                self.advance();
                Ok(Spanned::new(Expr::Text(value.clone()), tok.span))
            }
            Token::LParen => {
                self.advance();
                let inner = self.parse_expr(0)?;
                let close = self.expect(&Token::RParen)?;
                Ok(Spanned::new(
                    Expr::SubExpression(Box::new(inner)),
                    Span::new(tok.span.start, close.span.end),
                ))
            }
            Token::Minus | Token::Plus | Token::Bang => {
                let op = match tok.node {
                    Token::Minus => UnaryOp::Neg,
                    Token::Plus => UnaryOp::Plus,
                    _ => UnaryOp::Not,
                };
                self.advance();
                let factor = self.parse_expr(PREFIX_BP)?;
                let span = Span::new(tok.span.start, factor.span.end);
                Ok(Spanned::new(
                    Expr::UnaryOperator { op, factor: Box::new(factor) },
                    span,
                ))
            }
            Token::Ident => self.parse_name(),
            other => Err(EngineError::syntax(
                format!("unexpected {other} in expression"),
                tok.span,
            )),
        }
    }

    /// Everything that starts with an identifier: calls, object and behavior
    /// calls, variables with accessors, bare identifiers.
    fn parse_name(&mut self) -> Result<Spanned<Expr>, EngineError> {
        let first = self.expect_ident()?;

        if self.peek_is(&Token::LParen) {
            return self.parse_call(None, None, first);
        }

        if self.is_object_function_ahead() {
            self.advance(); // consume '.'
            let second = self.expect_ident()?;
            if self.peek_is(&Token::ColonColon) {
                self.advance();
                let function_name = self.expect_ident()?;
                if self.peek_is(&Token::LParen) {
                    return self.parse_call(Some(first), Some(second), function_name);
                }
                let span = first.span.to(function_name.span);
                return Ok(Spanned::new(
                    Expr::ObjectFunctionName {
                        object_name: first,
                        behavior_name: Some(second),
                        function_name,
                    },
                    span,
                ));
            }
            return self.parse_call(Some(first), None, second);
        }

        if self.peek_is(&Token::Dot) || self.peek_is(&Token::LBracket) {
            let child = self.parse_accessor_chain()?;
            let end = child.as_ref().map_or(first.span.end, |c| c.span.end);
            return Ok(Spanned::new(
                Expr::Variable { name: first.node, child },
                Span::new(first.span.start, end),
            ));
        }

        Ok(Spanned::new(Expr::Identifier(first.node), first.span))
    }

    /// `.Name(` or `.Name::` after an identifier.
    fn is_object_function_ahead(&self) -> bool {
        self.peek_nth_is(0, &Token::Dot)
            && self.peek_nth_is(1, &Token::Ident)
            && (self.peek_nth_is(2, &Token::LParen) || self.peek_nth_is(2, &Token::ColonColon))
    }

    fn parse_accessor_chain(&mut self) -> Result<Option<Box<Spanned<Expr>>>, EngineError> {
        let Some(tok) = self.peek() else { return Ok(None) };

        match &tok.node {
            Token::Dot => {
                self.advance();
                let name = self.expect_ident()?;
                let child = self.nested(Self::parse_accessor_chain)?;
                let end = child.as_ref().map_or(name.span.end, |c| c.span.end);
                Ok(Some(Box::new(Spanned::new(
                    Expr::VariableAccessor { name: name.node, child },
                    Span::new(tok.span.start, end),
                ))))
            }
            Token::LBracket => {
                self.advance();
                let expr = self.parse_expr(0)?;
                let close = self.expect(&Token::RBracket)?;
                let child = self.nested(Self::parse_accessor_chain)?;
                let end = child.as_ref().map_or(close.span.end, |c| c.span.end);
                Ok(Some(Box::new(Spanned::new(
                    Expr::VariableBracketAccessor { expr: Box::new(expr), child },
                    Span::new(tok.span.start, end),
                ))))
            }
            _ => Ok(None),
        }
    }

    fn parse_call(
        &mut self,
        object_name: Option<Spanned<String>>,
        behavior_name: Option<Spanned<String>>,
        function_name: Spanned<String>,
    ) -> Result<Spanned<Expr>, EngineError> {
        self.expect(&Token::LParen)?;

        let mut args = Vec::new();
        if !self.peek_is(&Token::RParen) {
            loop {
                args.push(self.parse_argument()?);
                match self.peek() {
                    Some(tok) if matches!(tok.node, Token::Comma) => {
                        self.advance();
                    }
                    Some(tok) if matches!(tok.node, Token::RParen) => break,
                    Some(tok) => {
                        return Err(EngineError::syntax(
                            format!("expected ',' or ')' in arguments of '{}', found {}", function_name.node, tok.node),
                            tok.span,
                        ));
                    }
                    None => {
                        return Err(EngineError::syntax(
                            format!("missing ')' to close the arguments of '{}'", function_name.node),
                            self.eof_span(),
                        ));
                    }
                }
            }
        }
        let close = self.expect(&Token::RParen)?;

        let start = object_name.as_ref().map_or(function_name.span.start, |o| o.span.start);
        Ok(Spanned::new(
            Expr::FunctionCall(FunctionCall {
                object_name,
                behavior_name,
                function_name,
                args,
            }),
            Span::new(start, close.span.end),
        ))
    }

    /// An argument left blank (`F(, 1)`) is an `Empty` node at the separator.
    fn parse_argument(&mut self) -> Result<Spanned<Expr>, EngineError> {
        match self.peek() {
            Some(tok) if matches!(tok.node, Token::Comma | Token::RParen) => {
                Ok(Spanned::new(Expr::Empty, Span::empty_at(tok.span.start)))
            }
            _ => self.parse_expr(0),
        }
    }
}

fn binop_for(token: &Token) -> Option<BinOp> {
    let op = match token {
        Token::Plus => BinOp::Add,
        Token::Minus => BinOp::Sub,
        Token::Star => BinOp::Mul,
        Token::Slash => BinOp::Div,
        Token::Eq => BinOp::Eq,
        Token::BangEq => BinOp::Neq,
        Token::Lt => BinOp::Lt,
        Token::Gt => BinOp::Gt,
        Token::LtEq => BinOp::LtEq,
        Token::GtEq => BinOp::GtEq,
        Token::AmpAmp => BinOp::And,
        Token::PipePipe => BinOp::Or,
        _ => return None,
    };
    Some(op)
}

fn infix_binding_power(op: BinOp) -> (u8, u8) {
    match op {
        BinOp::Or => (1, 2),
        BinOp::And => (3, 4),
        BinOp::Eq | BinOp::Neq | BinOp::Lt | BinOp::Gt | BinOp::LtEq | BinOp::GtEq => (5, 6),
        BinOp::Add | BinOp::Sub => (7, 8),
        BinOp::Mul | BinOp::Div => (9, 10),
    }
}
