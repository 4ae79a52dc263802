// Program node definitions for the fuzz-lang compiler

use std::fmt;
use std::ops::Range;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A numeric literal, already converted by the lexer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            // Debug keeps the decimal point on whole floats (`2.0`, not `2`)
            Number::Float(x) => write!(f, "{:?}", x),
        }
    }
}

/// Declared type of a `fuzzy` binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Int,
    Float,
    String,
    Array,
}

impl VarType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(VarType::Int),
            "float" => Some(VarType::Float),
            "string" => Some(VarType::String),
            "array" => Some(VarType::Array),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VarType::Int => "int",
            VarType::Float => "float",
            VarType::String => "string",
            VarType::Array => "array",
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinOp::Add),
            "-" => Some(BinOp::Sub),
            "*" => Some(BinOp::Mul),
            "/" => Some(BinOp::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

/// Bracketed literal on the right-hand side of an `array` declaration.
///
/// The element type is kept as written; it is mapped to a Rust type only
/// during code generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub element_type: String,
    pub length: usize,
    pub values: Vec<Number>,
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Exactly one operator between two atomic operands
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    Variable(String),
    Number(Number),
    /// String literal including its quotes
    String(String),
    Call {
        func_name: String,
        arg: Box<Expr>,
    },
    Array(ArrayLiteral),
}

impl Expr {
    pub fn is_literal(&self) -> bool {
        matches!(self, Expr::Number(_) | Expr::String(_) | Expr::Array(_))
    }
}

/// One element of the flat program list.
///
/// `Loop`/`EndLoop` and `Function`/`Return` are markers rather than
/// containers: what belongs to a loop or a function body is decided by the
/// position of the nodes in the list.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Let {
        var_name: String,
        var_type: VarType,
        expr: Expr,
    },
    Loop {
        element_name: String,
        collection_name: String,
    },
    EndLoop,
    Function {
        func_name: String,
        arg_name: String,
        input_type: String,
        output_type: String,
    },
    Return {
        expr: Expr,
    },
    Print {
        expr: Expr,
    },
}

impl Node {
    /// Short name used in diagnostics and the program pane
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Let { .. } => "let",
            Node::Loop { .. } => "loop",
            Node::EndLoop => "end-loop",
            Node::Function { .. } => "function",
            Node::Return { .. } => "return",
            Node::Print { .. } => "print",
        }
    }
}

/// A node together with the tokens it consumed
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramNode {
    pub node: Node,
    /// Indices into the token stream, including an absorbed trailing `;`
    pub tokens: Range<usize>,
    pub location: SourceLocation,
}

/// The ordered program list produced by the parser
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub nodes: Vec<ProgramNode>,
}

impl Program {
    pub fn new() -> Self {
        Program { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over the bare nodes, dropping token bookkeeping
    pub fn iter_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().map(|n| &n.node)
    }
}
