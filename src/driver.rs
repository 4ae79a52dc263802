//! Pipeline orchestration
//!
//! Runs source → tokens → program list → Rust text, and the steps around it
//! that touch the outside world: writing the `.rs` file, invoking `rustc`, and
//! running the produced binary.

use crate::codegen;
use crate::config::{CodegenConfig, Config};
use crate::error::{CompileError, Result};
use crate::parser::ast::Program;
use crate::parser::lexer::{tokenize, Token};
use crate::parser::parse;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Every intermediate product of one compilation
#[derive(Debug, Clone)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub program: Program,
    pub rust: String,
}

/// Lex, parse and generate
pub fn compile_source(source: &str, config: &CodegenConfig) -> Result<Compilation> {
    let tokens = tokenize(source)?;
    debug!(tokens = tokens.len(), "lexed source");

    let program = parse(&tokens)?;
    debug!(nodes = program.len(), "parsed program");

    let rust = codegen::generate_with_config(&program.nodes, config)?;
    Ok(Compilation {
        tokens,
        program,
        rust,
    })
}

/// Read the configured input file
pub fn read_input(config: &Config) -> Result<String> {
    fs::read_to_string(&config.input).map_err(|e| CompileError::io(&config.input, e))
}

/// Write the generated text to `<out_dir>/<program>.rs`
pub fn write_output(config: &Config, rust: &str) -> Result<PathBuf> {
    fs::create_dir_all(&config.out_dir).map_err(|e| CompileError::io(&config.out_dir, e))?;

    let path = config.rust_path();
    fs::write(&path, rust).map_err(|e| CompileError::io(&path, e))?;
    info!("Wrote {}", path.display());
    Ok(path)
}

/// Compile the emitted file with rustc
pub fn build(config: &Config, rust_path: &Path) -> Result<PathBuf> {
    let binary = config.binary_path();
    info!("Compiling {} with {}", rust_path.display(), config.rustc.display());

    let status = Command::new(&config.rustc)
        .arg(rust_path)
        .arg("-o")
        .arg(&binary)
        .status()
        .map_err(|e| CompileError::io(&config.rustc, e))?;

    if !status.success() {
        return Err(CompileError::Tool {
            program: config.rustc.clone(),
            status,
        });
    }

    info!("Built {}", binary.display());
    Ok(binary)
}

/// Run a built binary, inheriting stdio
pub fn run(binary: &Path) -> Result<()> {
    info!("Running {}", binary.display());
    let status = Command::new(binary)
        .status()
        .map_err(|e| CompileError::io(binary, e))?;

    if status.success() {
        Ok(())
    } else {
        Err(CompileError::Tool {
            program: binary.to_path_buf(),
            status,
        })
    }
}
