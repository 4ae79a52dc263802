//! Boundary discovery over the flat program list
//!
//! The parser produces loops and functions as marker nodes. This pass walks
//! the list once with its own cursor and folds it into an [`Outline`]: the
//! function definitions, and the items of `main` with loop bodies nested under
//! their headers.
//!
//! Rules:
//! - `Loop` pushes a new open block; `EndLoop` pops the innermost one and
//!   appends it to whatever encloses it. Items always go to the innermost open
//!   block, or to `main` when none is open.
//! - `Function` starts the body-collection protocol: every immediately
//!   following `Let` belongs to the body and the next node must be `Return`.
//!   Function definitions are hoisted out of any open loop.
//! - `Return` is only meaningful as the end of a function body.

use super::errors::CodegenError;
use crate::parser::ast::*;
use rustc_hash::FxHashSet;
use tracing::debug;

/// A `let` binding borrowed from the program list
#[derive(Debug, Clone, PartialEq)]
pub struct Binding<'a> {
    pub var_name: &'a str,
    pub var_type: VarType,
    pub expr: &'a Expr,
    pub location: SourceLocation,
}

impl<'a> Binding<'a> {
    fn from_node(program_node: &'a ProgramNode) -> Option<Self> {
        match &program_node.node {
            Node::Let {
                var_name,
                var_type,
                expr,
            } => Some(Binding {
                var_name,
                var_type: *var_type,
                expr,
                location: program_node.location,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef<'a> {
    pub name: &'a str,
    pub arg_name: &'a str,
    pub input_type: &'a str,
    pub output_type: &'a str,
    pub body: Vec<Binding<'a>>,
    pub returns: &'a Expr,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopBlock<'a> {
    pub element_name: &'a str,
    pub collection_name: &'a str,
    pub body: Vec<Item<'a>>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item<'a> {
    Let(Binding<'a>),
    Print(&'a Expr),
    Loop(LoopBlock<'a>),
}

/// The program list with its compound constructs resolved
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outline<'a> {
    pub functions: Vec<FunctionDef<'a>>,
    pub main: Vec<Item<'a>>,
}

/// Resolve loop and function boundaries in `nodes`
pub fn outline(nodes: &[ProgramNode]) -> Result<Outline<'_>, CodegenError> {
    let mut result = Outline::default();
    let mut open: Vec<LoopBlock<'_>> = Vec::new();
    let mut defined: FxHashSet<&str> = FxHashSet::default();
    let mut j = 0;

    while j < nodes.len() {
        let current = &nodes[j];
        match &current.node {
            Node::Let { .. } => {
                if let Some(binding) = Binding::from_node(current) {
                    push_item(&mut open, &mut result.main, Item::Let(binding));
                }
            }
            Node::Print { expr } => push_item(&mut open, &mut result.main, Item::Print(expr)),
            Node::Loop {
                element_name,
                collection_name,
            } => open.push(LoopBlock {
                element_name,
                collection_name,
                body: Vec::new(),
                location: current.location,
            }),
            Node::EndLoop => {
                let block = open.pop().ok_or(CodegenError::UnmatchedEndLoop {
                    location: current.location,
                })?;
                push_item(&mut open, &mut result.main, Item::Loop(block));
            }
            Node::Function { .. } => {
                let (def, next) = collect_function(nodes, j)?;
                if def.name == "main" || !defined.insert(def.name) {
                    return Err(CodegenError::DuplicateFunction {
                        name: def.name.to_string(),
                        location: def.location,
                    });
                }
                debug!(function = def.name, bindings = def.body.len(), "collected function body");
                result.functions.push(def);
                j = next;
                continue;
            }
            Node::Return { .. } => {
                return Err(CodegenError::UnexpectedNode {
                    kind: current.node.kind_name(),
                    location: current.location,
                })
            }
        }
        j += 1;
    }

    if let Some(block) = open.pop() {
        return Err(CodegenError::UnclosedLoop {
            collection: block.collection_name.to_string(),
            location: block.location,
        });
    }

    Ok(result)
}

fn push_item<'a>(open: &mut [LoopBlock<'a>], main: &mut Vec<Item<'a>>, item: Item<'a>) {
    match open.last_mut() {
        Some(block) => block.body.push(item),
        None => main.push(item),
    }
}

/// Collect the function whose header is at `start`.
///
/// Returns the definition and the index of the first node after its return.
fn collect_function(
    nodes: &[ProgramNode],
    start: usize,
) -> Result<(FunctionDef<'_>, usize), CodegenError> {
    let header = &nodes[start];
    let Node::Function {
        func_name,
        arg_name,
        input_type,
        output_type,
    } = &header.node
    else {
        return Err(CodegenError::UnexpectedNode {
            kind: header.node.kind_name(),
            location: header.location,
        });
    };

    let mut body = Vec::new();
    let mut j = start + 1;
    while let Some(binding) = nodes.get(j).and_then(Binding::from_node) {
        body.push(binding);
        j += 1;
    }

    match nodes.get(j) {
        Some(ProgramNode {
            node: Node::Return { expr },
            ..
        }) => Ok((
            FunctionDef {
                name: func_name,
                arg_name,
                input_type,
                output_type,
                body,
                returns: expr,
                location: header.location,
            },
            j + 1,
        )),
        Some(other) => Err(CodegenError::FunctionBody {
            function: func_name.clone(),
            found: other.node.kind_name(),
            location: other.location,
        }),
        None => Err(CodegenError::MissingReturn {
            function: func_name.clone(),
            location: header.location,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(node: Node, line: usize) -> ProgramNode {
        ProgramNode {
            node,
            tokens: 0..0,
            location: SourceLocation::new(line, 1),
        }
    }

    fn let_int(name: &str, value: i64) -> Node {
        Node::Let {
            var_name: name.to_string(),
            var_type: VarType::Int,
            expr: Expr::Number(Number::Int(value)),
        }
    }

    fn loop_over(element: &str, collection: &str) -> Node {
        Node::Loop {
            element_name: element.to_string(),
            collection_name: collection.to_string(),
        }
    }

    fn function(name: &str) -> Node {
        Node::Function {
            func_name: name.to_string(),
            arg_name: "x".to_string(),
            input_type: "int".to_string(),
            output_type: "int".to_string(),
        }
    }

    fn ret(name: &str) -> Node {
        Node::Return {
            expr: Expr::Variable(name.to_string()),
        }
    }

    fn print(name: &str) -> Node {
        Node::Print {
            expr: Expr::Variable(name.to_string()),
        }
    }

    #[test]
    fn test_function_body_is_collected() {
        let nodes = vec![
            at(function("f"), 1),
            at(let_int("a", 1), 2),
            at(let_int("b", 2), 3),
            at(ret("b"), 4),
            at(print("a"), 5),
        ];
        let outline = outline(&nodes).unwrap();
        assert_eq!(outline.functions.len(), 1);
        assert_eq!(outline.functions[0].body.len(), 2);
        assert_eq!(outline.main.len(), 1);
        assert!(matches!(outline.main[0], Item::Print(_)));
    }

    #[test]
    fn test_print_inside_function_body_fails() {
        let nodes = vec![at(function("f"), 1), at(print("x"), 2), at(ret("x"), 3)];
        assert_eq!(
            outline(&nodes).unwrap_err(),
            CodegenError::FunctionBody {
                function: "f".to_string(),
                found: "print",
                location: SourceLocation::new(2, 1),
            }
        );
    }

    #[test]
    fn test_function_without_return() {
        let nodes = vec![at(function("f"), 1), at(let_int("a", 1), 2)];
        assert!(matches!(
            outline(&nodes).unwrap_err(),
            CodegenError::MissingReturn { .. }
        ));
    }

    #[test]
    fn test_top_level_return_fails() {
        let nodes = vec![at(ret("x"), 1)];
        assert_eq!(
            outline(&nodes).unwrap_err(),
            CodegenError::UnexpectedNode {
                kind: "return",
                location: SourceLocation::new(1, 1),
            }
        );
    }

    #[test]
    fn test_nested_loops() {
        let nodes = vec![
            at(loop_over("row", "rows"), 1),
            at(loop_over("x", "row"), 2),
            at(print("x"), 3),
            at(Node::EndLoop, 4),
            at(Node::EndLoop, 5),
        ];
        let outline = outline(&nodes).unwrap();
        assert_eq!(outline.main.len(), 1);
        let Item::Loop(outer) = &outline.main[0] else {
            panic!("Expected loop");
        };
        let Item::Loop(inner) = &outer.body[0] else {
            panic!("Expected nested loop");
        };
        assert_eq!(inner.collection_name, "row");
        assert_eq!(inner.body.len(), 1);
    }

    #[test]
    fn test_unmatched_end_loop() {
        let nodes = vec![at(Node::EndLoop, 7)];
        assert_eq!(
            outline(&nodes).unwrap_err(),
            CodegenError::UnmatchedEndLoop {
                location: SourceLocation::new(7, 1)
            }
        );
    }

    #[test]
    fn test_unclosed_loop() {
        let nodes = vec![at(loop_over("x", "xs"), 1), at(print("x"), 2)];
        assert!(matches!(
            outline(&nodes).unwrap_err(),
            CodegenError::UnclosedLoop { ref collection, .. } if collection == "xs"
        ));
    }

    #[test]
    fn test_loop_inside_function_fails() {
        let nodes = vec![
            at(function("f"), 1),
            at(loop_over("x", "xs"), 2),
            at(Node::EndLoop, 3),
            at(ret("x"), 4),
        ];
        assert!(matches!(
            outline(&nodes).unwrap_err(),
            CodegenError::FunctionBody { found: "loop", .. }
        ));
    }

    #[test]
    fn test_duplicate_and_main_functions() {
        let twice = vec![
            at(function("f"), 1),
            at(ret("x"), 2),
            at(function("f"), 3),
            at(ret("x"), 4),
        ];
        assert!(matches!(
            outline(&twice).unwrap_err(),
            CodegenError::DuplicateFunction { .. }
        ));

        let main = vec![at(function("main"), 1), at(ret("x"), 2)];
        assert!(matches!(
            outline(&main).unwrap_err(),
            CodegenError::DuplicateFunction { .. }
        ));
    }

    #[test]
    fn test_function_inside_loop_is_hoisted() {
        let nodes = vec![
            at(loop_over("x", "xs"), 1),
            at(function("f"), 2),
            at(ret("x"), 3),
            at(print("x"), 4),
            at(Node::EndLoop, 5),
        ];
        let outline = outline(&nodes).unwrap();
        assert_eq!(outline.functions.len(), 1);
        let Item::Loop(block) = &outline.main[0] else {
            panic!("Expected loop");
        };
        assert_eq!(block.body.len(), 1);
    }
}
