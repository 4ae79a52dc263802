//! Rust code generation
//!
//! Lowers the flat program list into Rust source text in two steps:
//!
//! 1. [`outline`] walks the list with its own cursor and resolves where each
//!    loop and function body begins and ends.
//! 2. [`emit`] prints the resolved structure: function definitions first, in
//!    source order, then `fn main()` holding every top-level statement.
//!
//! # Type mapping
//!
//! | fuzz-lang | Rust |
//! |-----------|------|
//! | `int` | `i32` |
//! | `float` | `f32` |
//! | `string` | `&str` |
//! | `array[T;N]` | `[T'; N]` |
//!
//! Any failure aborts generation; no partial text is ever returned.

pub mod emit;
pub mod errors;
pub mod outline;
pub mod types;

pub use errors::CodegenError;

use crate::config::CodegenConfig;
use crate::parser::ast::ProgramNode;
use emit::Emitter;
use tracing::instrument;

/// Generate Rust source for a program list with the default configuration
pub fn generate(nodes: &[ProgramNode]) -> Result<String, CodegenError> {
    generate_with_config(nodes, &CodegenConfig::default())
}

#[instrument(level = "debug", skip_all, fields(nodes = nodes.len()))]
pub fn generate_with_config(
    nodes: &[ProgramNode],
    config: &CodegenConfig,
) -> Result<String, CodegenError> {
    let outline = outline::outline(nodes)?;
    let mut emitter = Emitter::new(config);
    emitter.program(&outline)?;
    Ok(emitter.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::*;
    use crate::parser::{lexer::tokenize, parse};

    fn compile(source: &str) -> Result<String, CodegenError> {
        let program = parse(&tokenize(source).unwrap()).unwrap();
        generate(&program.nodes)
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(generate(&[]).unwrap(), "fn main() {\n}\n");
    }

    #[test]
    fn test_declared_type_annotations() {
        let rust = compile(
            r#"fuzzy int i = 1; fuzzy float f = 1.5; fuzzy string s = "s"; fuzzy array[int;2] a = [1, 2];"#,
        )
        .unwrap();
        assert_eq!(
            rust,
            "fn main() {\n    let i: i32 = 1;\n    let f: f32 = 1.5;\n    let s: &str = \"s\";\n    let a: [i32; 2] = [1, 2];\n}\n"
        );
    }

    #[test]
    fn test_unknown_element_type_emits_nothing() {
        let err = compile("fuzzy array[bool;1] a = [1];").unwrap_err();
        assert!(matches!(err, CodegenError::UnknownType { ref name, .. } if name == "bool"));
    }

    #[test]
    fn test_unknown_function_type() {
        let err = compile("suzy f(x: bool) -> int { flabs 1 }").unwrap_err();
        assert!(matches!(err, CodegenError::UnknownType { .. }));
    }

    #[test]
    fn test_array_binding_without_literal() {
        let nodes = vec![ProgramNode {
            node: Node::Let {
                var_name: "a".to_string(),
                var_type: VarType::Array,
                expr: Expr::Variable("b".to_string()),
            },
            tokens: 0..0,
            location: SourceLocation::new(1, 1),
        }];
        assert!(matches!(
            generate(&nodes).unwrap_err(),
            CodegenError::MissingArrayLiteral { .. }
        ));
    }

    #[test]
    fn test_loop_emission() {
        let rust = compile("fuzzy array[int;2] xs = [1,2]; every x in xs { labs(x); }").unwrap();
        assert_eq!(
            rust,
            "fn main() {\n    let xs: [i32; 2] = [1, 2];\n    for x in xs.iter() {\n        println!(\"{}\", x);\n    }\n}\n"
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let source = "suzy f(x: int) -> int { fuzzy int y = x * 2; flabs y; } fuzzy int z = f(3); labs(z);";
        assert_eq!(compile(source).unwrap(), compile(source).unwrap());
    }
}
