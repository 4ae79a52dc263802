//! Compiler configuration
//!
//! [`CodegenConfig`] controls the shape of the emitted text and is all the
//! library needs. [`Config`] is the full invocation (input, output location,
//! which external steps to run) that the `fuzzc` binary assembles from its
//! command line.

use std::path::{Path, PathBuf};

/// Default directory for emitted `.rs` files and built binaries
pub const DEFAULT_OUT_DIR: &str = "__transpiled__";

/// Options for the code generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenConfig {
    /// Text repeated once per block level
    pub indent: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
        }
    }
}

impl CodegenConfig {
    pub fn with_indent_width(width: usize) -> Self {
        Self {
            indent: " ".repeat(width),
        }
    }
}

/// What to do after the Rust text has been generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Print the generated text to stdout
    Print,
    /// Write `<out_dir>/<program>.rs`
    Write,
    /// Write, then compile with rustc
    Build,
    /// Write, compile, then run the binary
    Run,
    /// Open the terminal viewer
    View,
}

/// A complete compiler invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    /// Name of the emitted file (without extension) and of the built binary
    pub program: String,
    pub out_dir: PathBuf,
    /// rustc executable used by [`Action::Build`] and [`Action::Run`]
    pub rustc: PathBuf,
    pub action: Action,
    pub codegen: CodegenConfig,
}

impl Config {
    /// Configuration with defaults derived from the input path
    pub fn for_input(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let program = default_program_name(&input);
        Self {
            input,
            program,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            rustc: PathBuf::from("rustc"),
            action: Action::Write,
            codegen: CodegenConfig::default(),
        }
    }

    pub fn rust_path(&self) -> PathBuf {
        self.out_dir.join(format!("{}.rs", self.program))
    }

    pub fn binary_path(&self) -> PathBuf {
        let mut path = self.out_dir.join(&self.program);
        if cfg!(windows) {
            path.set_extension("exe");
        }
        path
    }
}

/// File stem of the input, or `main` when there is none
pub fn default_program_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "main".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_input() {
        let config = Config::for_input("programs/hello.fuzz");
        assert_eq!(config.program, "hello");
        assert_eq!(config.action, Action::Write);
        assert_eq!(
            config.rust_path(),
            PathBuf::from(DEFAULT_OUT_DIR).join("hello.rs")
        );
        assert_eq!(config.codegen.indent, "    ");
    }

    #[test]
    fn test_program_name_fallback() {
        assert_eq!(default_program_name(Path::new("")), "main");
    }

    #[test]
    fn test_indent_width() {
        assert_eq!(CodegenConfig::with_indent_width(2).indent, "  ");
    }
}
