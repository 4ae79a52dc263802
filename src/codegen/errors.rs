//! Code generation error types
//!
//! [`CodegenError`] covers every way a syntactically valid program list can
//! still fail to lower to Rust. All of them are fatal: generation stops and no
//! text is returned.

use crate::parser::ast::SourceLocation;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// A type name with no Rust counterpart
    #[error("Type error at {location}: '{name}' is not a valid fuzz-lang type")]
    UnknownType {
        name: String,
        location: SourceLocation,
    },

    /// A function body containing something other than declarations before its return
    #[error("Function '{function}' at {location}: a {found} statement cannot appear in a function body")]
    FunctionBody {
        function: String,
        found: &'static str,
        location: SourceLocation,
    },

    /// The program list ended inside a function body
    #[error("Function '{function}' at {location} has no return statement")]
    MissingReturn {
        function: String,
        location: SourceLocation,
    },

    /// A node that cannot be emitted where it appears
    #[error("Cannot generate code for a {kind} statement at {location}")]
    UnexpectedNode {
        kind: &'static str,
        location: SourceLocation,
    },

    /// `}` with no open loop
    #[error("Closing brace at {location} does not match any open loop")]
    UnmatchedEndLoop { location: SourceLocation },

    /// Loop still open when the program list ends
    #[error("Loop over '{collection}' opened at {location} is never closed")]
    UnclosedLoop {
        collection: String,
        location: SourceLocation,
    },

    /// Two functions with one name, or a function named `main`
    #[error("Function '{name}' at {location} is already defined")]
    DuplicateFunction {
        name: String,
        location: SourceLocation,
    },

    /// An `array` binding whose initializer is not an array literal
    #[error("Array binding '{var_name}' at {location} has no array literal")]
    MissingArrayLiteral {
        var_name: String,
        location: SourceLocation,
    },
}

impl CodegenError {
    /// Where the offending node starts
    pub fn location(&self) -> SourceLocation {
        match self {
            CodegenError::UnknownType { location, .. }
            | CodegenError::FunctionBody { location, .. }
            | CodegenError::MissingReturn { location, .. }
            | CodegenError::UnexpectedNode { location, .. }
            | CodegenError::UnmatchedEndLoop { location }
            | CodegenError::UnclosedLoop { location, .. }
            | CodegenError::DuplicateFunction { location, .. }
            | CodegenError::MissingArrayLiteral { location, .. } => *location,
        }
    }
}
