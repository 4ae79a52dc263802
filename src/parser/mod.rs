//! fuzz-lang front end
//!
//! This module transforms fuzz-lang source text into the flat program list:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: The single-cursor parser (tokens → program list)
//! - [`ast`]: Program node definitions
//!
//! # Language
//!
//! - Declarations: `fuzzy int x = 5;`, `fuzzy array[int;3] a = [1, 2, 3];`
//! - Printing: `labs(x);`
//! - Loops: `every e in a { ... }`
//! - Functions: `suzy f(x: int) -> int { ... flabs y; }`
//!
//! # Parser Implementation
//!
//! Hand-written, one rule per leading keyword, no backtracking. The output is
//! deliberately flat: loop and function boundaries are marker nodes, and the
//! code generator recovers the structure from their order.

pub mod ast;
pub mod lexer;
pub mod parse;

mod expressions;
mod statements;

pub use parse::{parse, ParseError, ParseErrorKind, Parser};
