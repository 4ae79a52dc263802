//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, cursor helpers, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The parser keeps a single cursor over a borrowed token slice. Each loop
//! iteration looks at the kind of the token under the cursor, hands control to
//! exactly one node-building rule, lets the rule consume its tokens, absorbs
//! an optional trailing `;` and records the consumed range on the node.
//!
//! - This module: Parser struct, helper methods, and the dispatch loop
//! - `statements`: the node-building rules (declaration, loop, function, ...)
//! - `expressions`: right-hand-side classification and literal checks
//!
//! Rules are split across files using `impl Parser` blocks, the same way the
//! statement and expression halves of a recursive descent parser usually are.

use crate::parser::ast::*;
use crate::parser::lexer::{Lexeme, Token, TokenKind};
use thiserror::Error;
use tracing::{debug, instrument, trace};

/// Category of a parse failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A token of the wrong kind in a fixed grammar position
    UnexpectedToken,
    /// Required punctuation (`=`, `(`, `]`, ...) is absent
    MissingToken,
    /// The stream ended in the middle of a construct
    UnexpectedEnd,
    /// A declaration names a type outside int/float/string/array
    InvalidType,
    /// Bracket syntax on a non-array declaration, or an array without brackets
    InvalidArrayLiteral,
    /// Declared array length differs from the number of values
    ArrayLengthMismatch,
    /// Literal initializer does not fit the declared type
    TypeMismatch,
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Parse error at line {}, column {}: {}", .location.line, .location.column, .message)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub location: SourceLocation,
}

impl ParseError {
    pub(crate) fn new(
        kind: ParseErrorKind,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        ParseError {
            kind,
            message: message.into(),
            location,
        }
    }
}

/// Parse a token stream into the flat program list
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

/// Single-cursor parser over a borrowed token stream
pub struct Parser<'a> {
    pub(crate) tokens: &'a [Token],
    pub(crate) position: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse the entire token stream
    #[instrument(level = "debug", skip_all, fields(tokens = self.tokens.len()))]
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            let start = self.position;
            let token = self.peek_required("a statement")?;
            let location = token.location;
            trace!(position = start, kind = ?token.kind, "dispatching");

            let node = match token.kind {
                TokenKind::Declare => self.parse_declaration()?,
                TokenKind::Loop => self.parse_loop_open()?,
                TokenKind::RBrace => self.parse_loop_close()?,
                TokenKind::Function => self.parse_function_header()?,
                TokenKind::Return => self.parse_return()?,
                TokenKind::Print => self.parse_print()?,
                _ => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken,
                        format!("Unexpected token: {}", token.lexeme),
                        location,
                    ))
                }
            };

            // A trailing terminator belongs to the node; its absence is fine
            self.match_kind(TokenKind::Semicolon);

            debug!(kind = node.kind_name(), tokens = ?(start..self.position), "parsed node");
            program.nodes.push(ProgramNode {
                node,
                tokens: start..self.position,
                location,
            });
        }

        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub(crate) fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Location of the token under the cursor, or of the last token at the end
    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.location)
            .unwrap_or_default()
    }

    /// Peek, failing with `UnexpectedEnd` when the stream is exhausted
    pub(crate) fn peek_required(&self, expected: &str) -> Result<&'a Token, ParseError> {
        self.peek().ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::UnexpectedEnd,
                format!("Expected {}, found end of input", expected),
                self.current_location(),
            )
        })
    }

    /// Consume and return the token under the cursor, whatever its kind
    pub(crate) fn advance(&mut self, expected: &str) -> Result<&'a Token, ParseError> {
        let token = self.peek_required(expected)?;
        self.position += 1;
        Ok(token)
    }

    pub(crate) fn expect_kind(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<&'a Token, ParseError> {
        let token = self.peek_required(kind.describe())?;
        if token.kind == kind {
            self.position += 1;
            Ok(token)
        } else {
            Err(ParseError::new(
                ParseErrorKind::MissingToken,
                format!("{}, found {}", message, token),
                token.location,
            ))
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_kind(TokenKind::LParen, &format!("Expected '(' {ctx}"))
            .map(|_| ())
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_kind(TokenKind::RParen, &format!("Expected ')' {ctx}"))
            .map(|_| ())
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_kind(TokenKind::LBrace, &format!("Expected '{{' {ctx}"))
            .map(|_| ())
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_kind(TokenKind::RBrace, &format!("Expected '}}' {ctx}"))
            .map(|_| ())
    }

    /// Consume an identifier and return its name
    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<String, ParseError> {
        let token = self.peek_required("identifier")?;
        match (&token.kind, &token.lexeme) {
            (TokenKind::Identifier, Lexeme::Text(name)) => {
                self.position += 1;
                Ok(name.clone())
            }
            _ => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken,
                format!("Expected identifier {}, found {}", ctx, token),
                token.location,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn parse_source(source: &str) -> Result<Program, ParseError> {
        let tokens = tokenize(source).unwrap();
        parse(&tokens)
    }

    #[test]
    fn test_parse_empty_stream() {
        let program = parse(&[]).unwrap();
        assert!(program.is_empty());
    }

    #[test]
    fn test_terminator_is_optional() {
        let with = parse_source("fuzzy int x = 1; labs(x);").unwrap();
        let without = parse_source("fuzzy int x = 1 labs(x)").unwrap();
        assert_eq!(
            with.iter_nodes().collect::<Vec<_>>(),
            without.iter_nodes().collect::<Vec<_>>()
        );
        assert_eq!(with.nodes[0].tokens, 0..6);
        assert_eq!(without.nodes[0].tokens, 0..5);
    }

    #[test]
    fn test_unexpected_leading_token() {
        let err = parse_source("x = 1;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert!(err.message.contains("Unexpected token: x"));
    }

    #[test]
    fn test_stray_semicolon_is_rejected() {
        let err = parse_source(";").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_truncated_input() {
        let err = parse_source("fuzzy int x =").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd);
    }

    #[test]
    fn test_error_display_has_location() {
        let err = parse_source("fuzzy int x 5;").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error at line 1, column 13: Expected '=' after variable declaration, found number 5"
        );
    }
}
