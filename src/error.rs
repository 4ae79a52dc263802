//! Crate-level error type
//!
//! Each pipeline stage has its own error ([`LexError`], [`ParseError`],
//! [`CodegenError`]); [`CompileError`] wraps them together with the I/O and
//! external-tool failures of the driver. Every variant is terminal.

use crate::codegen::CodegenError;
use crate::parser::lexer::LexError;
use crate::parser::parse::ParseError;
use crate::parser::ast::SourceLocation;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompileError>;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} exited with {status}", .program.display())]
    Tool { program: PathBuf, status: ExitStatus },
}

impl CompileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompileError::Io {
            path: path.into(),
            source,
        }
    }

    /// Source position for the stage errors; `None` for I/O and tool failures
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            CompileError::Lex(e) => Some(e.location),
            CompileError::Parse(e) => Some(e.location),
            CompileError::Codegen(e) => Some(e.location()),
            CompileError::Io { .. } | CompileError::Tool { .. } => None,
        }
    }
}
