//! # Introduction
//!
//! fuzzc compiles fuzz-lang, a tiny toy language, into Rust source text.  The
//! generated file can be written to disk, handed to `rustc`, and run, or the
//! whole pipeline can be inspected in a terminal viewer built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Program list → Code generator → Rust
//! ```
//!
//! 1. [`parser`]: tokenises the source and turns the tokens into a flat
//!    [`parser::ast::Program`], one node per statement, each remembering the
//!    token range it consumed.
//! 2. [`codegen`]: rebuilds loop and function nesting from the flat list and
//!    emits Rust, functions first and everything else inside `fn main()`.
//! 3. [`driver`]: runs both stages and the steps around them (writing the
//!    `.rs` file, invoking `rustc`, running the binary).
//! 4. [`ui`]: the viewer; not part of the stable library API.
//!
//! ## The language
//!
//! ```text
//! comment: declarations
//! fuzzy int x = 5;
//! fuzzy array[int; 3] xs = [1, 2, 3];
//! comment: loops and printing
//! every e in xs {
//!     labs(e);
//! }
//! comment: functions hold declarations followed by one return
//! suzy double(n: int) -> int {
//!     fuzzy int d = n * 2;
//!     flabs d;
//! }
//! ```

pub mod codegen;
pub mod config;
pub mod driver;
pub mod error;
pub mod parser;
pub mod ui;

pub use codegen::CodegenError;
pub use config::{Action, CodegenConfig, Config};
pub use driver::{compile_source, Compilation};
pub use error::{CompileError, Result};

/// Compile fuzz-lang source straight to Rust text with default settings
pub fn transpile(source: &str) -> Result<String> {
    compile_source(source, &CodegenConfig::default()).map(|compilation| compilation.rust)
}
