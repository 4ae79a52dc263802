//! Rust text emission
//!
//! [`Emitter`] turns an [`Outline`] into source lines. It tracks only the
//! current block depth; every structural decision has already been made by the
//! outline pass.

use super::errors::CodegenError;
use super::outline::{Binding, FunctionDef, Item, LoopBlock, Outline};
use super::types::{array_type, rust_type};
use crate::config::CodegenConfig;
use crate::parser::ast::{Expr, VarType};
use tracing::debug;

pub struct Emitter<'c> {
    config: &'c CodegenConfig,
    lines: Vec<String>,
    depth: usize,
}

impl<'c> Emitter<'c> {
    pub fn new(config: &'c CodegenConfig) -> Self {
        Self {
            config,
            lines: Vec::new(),
            depth: 0,
        }
    }

    /// Emit all functions, then `main`
    pub fn program(&mut self, outline: &Outline<'_>) -> Result<(), CodegenError> {
        for def in &outline.functions {
            self.function(def)?;
        }

        self.open("fn main() {");
        for item in &outline.main {
            self.item(item)?;
        }
        self.close();
        Ok(())
    }

    /// Newline-terminated source text
    pub fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    fn line(&mut self, text: &str) {
        let indent = self.config.indent.repeat(self.depth);
        self.lines.push(format!("{}{}", indent, text));
    }

    fn open(&mut self, header: &str) {
        self.line(header);
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    fn function(&mut self, def: &FunctionDef<'_>) -> Result<(), CodegenError> {
        let input = rust_type(def.input_type, def.location)?;
        let output = rust_type(def.output_type, def.location)?;
        debug!(function = def.name, "emitting function");

        self.open(&format!(
            "fn {}({}: {}) -> {} {{",
            def.name, def.arg_name, input, output
        ));
        for binding in &def.body {
            self.binding(binding)?;
        }
        self.line(&format!("return {};", expression(def.returns)));
        self.close();
        Ok(())
    }

    fn item(&mut self, item: &Item<'_>) -> Result<(), CodegenError> {
        match item {
            Item::Let(binding) => self.binding(binding),
            Item::Print(expr) => {
                self.line(&format!("println!(\"{{}}\", {});", expression(expr)));
                Ok(())
            }
            Item::Loop(block) => self.loop_block(block),
        }
    }

    fn loop_block(&mut self, block: &LoopBlock<'_>) -> Result<(), CodegenError> {
        self.open(&format!(
            "for {} in {}.iter() {{",
            block.element_name, block.collection_name
        ));
        for item in &block.body {
            self.item(item)?;
        }
        self.close();
        Ok(())
    }

    fn binding(&mut self, binding: &Binding<'_>) -> Result<(), CodegenError> {
        let annotation = match (binding.var_type, binding.expr) {
            (VarType::Array, Expr::Array(array)) => array_type(array, binding.location)?,
            (VarType::Array, _) => {
                return Err(CodegenError::MissingArrayLiteral {
                    var_name: binding.var_name.to_string(),
                    location: binding.location,
                })
            }
            (scalar, _) => rust_type(scalar.name(), binding.location)?.to_string(),
        };

        self.line(&format!(
            "let {}: {} = {};",
            binding.var_name,
            annotation,
            expression(binding.expr)
        ));
        Ok(())
    }
}

/// Render an expression as Rust source
pub fn expression(expr: &Expr) -> String {
    match expr {
        Expr::Binary { left, op, right } => {
            format!("{} {} {}", expression(left), op.symbol(), expression(right))
        }
        Expr::Variable(name) => name.clone(),
        Expr::Number(n) => n.to_string(),
        Expr::String(s) => s.clone(),
        Expr::Call { func_name, arg } => format!("{}({})", func_name, expression(arg)),
        Expr::Array(array) => {
            let values: Vec<String> = array.values.iter().map(|v| v.to_string()).collect();
            format!("[{}]", values.join(", "))
        }
    }
}
