//! Lexer (tokenizer) for fuzz-lang source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Token classes are declared on [`TokenKind`] with logos; keywords win over
//! identifiers and the longest match wins otherwise, so `->` is one token and
//! `-3` is a signed number literal. Whitespace and `comment:` line comments
//! are skipped.

use super::ast::{Number, SourceLocation};
use logos::Logos;
use std::fmt;
use thiserror::Error;

/// Lexical categories of fuzz-lang
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"comment:[^\n]*")]
pub enum TokenKind {
    // Keywords
    #[token("fuzzy")]
    Declare,
    #[token("labs")]
    Print,
    #[token("suzy")]
    Function,
    #[token("flabs")]
    Return,
    #[token("every")]
    Loop,

    // Literals
    #[regex(r"[+-]?([0-9]*\.)?[0-9]+")]
    Number,
    #[regex(r#""[^"\n]*""#)]
    String,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    // Operators
    #[token("->")]
    Arrow,
    #[regex(r"[+\-*/]")]
    Operator,
    #[token("=")]
    Equals,

    // Punctuation
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
}

impl TokenKind {
    /// Human-readable description used in parse errors
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Declare => "'fuzzy'",
            TokenKind::Print => "'labs'",
            TokenKind::Function => "'suzy'",
            TokenKind::Return => "'flabs'",
            TokenKind::Loop => "'every'",
            TokenKind::Number => "number",
            TokenKind::String => "string literal",
            TokenKind::Identifier => "identifier",
            TokenKind::Arrow => "'->'",
            TokenKind::Operator => "operator",
            TokenKind::Equals => "'='",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
        }
    }
}

/// The value carried by a token
#[derive(Debug, Clone, PartialEq)]
pub enum Lexeme {
    Text(String),
    Number(Number),
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lexeme::Text(s) => write!(f, "{}", s),
            Lexeme::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A classified lexeme with the location it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Lexeme,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: Lexeme, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme,
            location,
        }
    }

    /// Token with a text lexeme and no meaningful location
    pub fn text(kind: TokenKind, text: &str) -> Self {
        Self::new(kind, Lexeme::Text(text.to_string()), SourceLocation::default())
    }

    /// Number token with no meaningful location
    pub fn number(value: Number) -> Self {
        Self::new(TokenKind::Number, Lexeme::Number(value), SourceLocation::default())
    }

    /// The raw text of the token, if it is not a number
    pub fn as_text(&self) -> Option<&str> {
        match &self.lexeme {
            Lexeme::Text(s) => Some(s),
            Lexeme::Number(_) => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Number => write!(f, "number {}", self.lexeme),
            TokenKind::String => write!(f, "string literal {}", self.lexeme),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

/// Lexer error (unrecognized character or unrepresentable number)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lex error at line {}, column {}: {}", .location.line, .location.column, .message)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Tokenize source code into a vector of located tokens
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let lines = LineIndex::new(source);
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let location = lines.location(lexer.span().start);
        let slice = lexer.slice();
        let kind = result.map_err(|()| LexError {
            message: format!("Unexpected character: {}", slice),
            location,
        })?;

        let lexeme = if kind == TokenKind::Number {
            Lexeme::Number(parse_number(slice).ok_or_else(|| LexError {
                message: format!("Numeric literal out of range: {}", slice),
                location,
            })?)
        } else {
            Lexeme::Text(slice.to_string())
        };

        tokens.push(Token::new(kind, lexeme, location));
    }

    tracing::trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

fn parse_number(slice: &str) -> Option<Number> {
    if slice.contains('.') {
        slice.parse::<f64>().ok().map(Number::Float)
    } else {
        slice.parse::<i64>().ok().map(Number::Int)
    }
}

/// Byte offset → line/column lookup
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    fn location(&self, offset: usize) -> SourceLocation {
        let line = self.starts.partition_point(|&start| start <= offset);
        let line_start = self.starts[line - 1];
        SourceLocation::new(line, offset - line_start + 1)
    }
}
