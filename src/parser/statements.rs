//! Statement rules
//!
//! One rule per node shape. Each rule is entered with the cursor on its
//! leading keyword and leaves the cursor on the first token it did not use:
//!
//! ```text
//! declaration ::= 'fuzzy' type IDENT '=' rhs
//! type        ::= 'int' | 'float' | 'string' | 'array' '[' IDENT ';' NUMBER ']'
//! loop_open   ::= 'every' IDENT 'in' IDENT '{'
//! loop_close  ::= '}'
//! function    ::= 'suzy' IDENT '(' IDENT ':' IDENT ')' '->' IDENT '{'
//! return      ::= 'flabs' (IDENT | NUMBER) [';'] '}'
//! print       ::= 'labs' '(' (IDENT | NUMBER) ')'
//! ```
//!
//! Function bodies and loop bodies are not collected here; the nodes that
//! follow a header are parsed as ordinary top-level nodes.

use crate::parser::ast::*;
use crate::parser::lexer::{Lexeme, TokenKind};
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};

impl<'a> Parser<'a> {
    /// `fuzzy <type> <name> = <rhs>`
    pub(crate) fn parse_declaration(&mut self) -> Result<Node, ParseError> {
        self.expect_kind(TokenKind::Declare, "Expected 'fuzzy'")?;

        let type_token = self.advance("a type name")?;
        let type_name = type_token.as_text().unwrap_or_default();
        let var_type = VarType::from_name(type_name).ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::InvalidType,
                format!("Invalid type: {}", type_token.lexeme),
                type_token.location,
            )
        })?;

        let array_shape = if var_type == VarType::Array {
            Some(self.parse_array_shape()?)
        } else {
            None
        };

        let var_name = self.expect_identifier("as variable name")?;
        self.expect_kind(TokenKind::Equals, "Expected '=' after variable declaration")?;

        let expr = self.parse_initializer(var_type, array_shape)?;

        Ok(Node::Let {
            var_name,
            var_type,
            expr,
        })
    }

    /// `[ <element type> ; <length> ]` following the `array` keyword
    fn parse_array_shape(&mut self) -> Result<(String, usize), ParseError> {
        self.expect_kind(TokenKind::LBracket, "Expected '[' after 'array'")?;
        let element_type = self.expect_identifier("as array element type")?;
        self.expect_kind(TokenKind::Semicolon, "Expected ';' after array element type")?;

        let length_token = self.advance("an array length")?;
        let length = match length_token.lexeme {
            Lexeme::Number(Number::Int(n)) if n >= 0 => n as usize,
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken,
                    format!("Expected array length, found {}", length_token),
                    length_token.location,
                ))
            }
        };

        self.expect_kind(TokenKind::RBracket, "Expected ']' after array length")?;
        Ok((element_type, length))
    }

    /// `every <element> in <collection> {`
    pub(crate) fn parse_loop_open(&mut self) -> Result<Node, ParseError> {
        self.expect_kind(TokenKind::Loop, "Expected 'every'")?;
        let element_name = self.expect_identifier("as loop element")?;

        let keyword = self.peek_required("'in'")?;
        if keyword.kind != TokenKind::Identifier || keyword.as_text() != Some("in") {
            return Err(ParseError::new(
                ParseErrorKind::MissingToken,
                format!("Expected 'in' after loop element, found {}", keyword),
                keyword.location,
            ));
        }
        self.position += 1;

        let collection_name = self.expect_identifier("as loop collection")?;
        self.expect_lbrace("to open loop body")?;

        Ok(Node::Loop {
            element_name,
            collection_name,
        })
    }

    /// `}` closing the most recently opened loop
    pub(crate) fn parse_loop_close(&mut self) -> Result<Node, ParseError> {
        self.expect_rbrace("to close loop")?;
        Ok(Node::EndLoop)
    }

    /// `suzy <name>(<arg>: <input type>) -> <output type> {`
    pub(crate) fn parse_function_header(&mut self) -> Result<Node, ParseError> {
        self.expect_kind(TokenKind::Function, "Expected 'suzy'")?;
        let func_name = self.expect_identifier("as function name")?;

        let paren = self.peek_required("'('")?;
        if paren.kind != TokenKind::LParen {
            return Err(ParseError::new(
                ParseErrorKind::MissingToken,
                format!("Function '{}' is not constructed properly, found {}", func_name, paren),
                paren.location,
            ));
        }
        self.position += 1;

        let arg_token = self.advance("a function argument")?;
        let arg_name = match (&arg_token.kind, &arg_token.lexeme) {
            (TokenKind::Identifier, Lexeme::Text(name)) => name.clone(),
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken,
                    format!("Unexpected argument value: {}", arg_token.lexeme),
                    arg_token.location,
                ))
            }
        };

        self.expect_kind(TokenKind::Colon, "Expected ':' after argument name")?;
        let input_type = self.expect_identifier("as argument type")?;
        self.expect_rparen("after argument type")?;
        self.expect_kind(TokenKind::Arrow, "Expected '->' after parameter list")?;
        let output_type = self.expect_identifier("as return type")?;
        self.expect_lbrace("to open function body")?;

        Ok(Node::Function {
            func_name,
            arg_name,
            input_type,
            output_type,
        })
    }

    /// `flabs <value> }`; the brace closes the enclosing function body
    pub(crate) fn parse_return(&mut self) -> Result<Node, ParseError> {
        self.expect_kind(TokenKind::Return, "Expected 'flabs'")?;
        let expr = self.parse_atom("Can only return identifiers or numbers")?;
        self.match_kind(TokenKind::Semicolon);
        self.expect_rbrace("to close function body")?;
        Ok(Node::Return { expr })
    }

    /// `labs(<value>)`
    pub(crate) fn parse_print(&mut self) -> Result<Node, ParseError> {
        self.expect_kind(TokenKind::Print, "Expected 'labs'")?;
        self.expect_lparen("after 'labs'")?;
        let expr = self.parse_atom("Can only print identifiers or numbers")?;
        self.expect_rparen("after printed value")?;
        Ok(Node::Print { expr })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::{parse, ParseError, ParseErrorKind};

    fn parse_source(source: &str) -> Result<Program, ParseError> {
        parse(&tokenize(source).unwrap())
    }

    fn single(source: &str) -> Node {
        let program = parse_source(source).unwrap();
        assert_eq!(program.len(), 1, "expected one node for {source:?}");
        program.nodes[0].node.clone()
    }

    #[test]
    fn test_parse_int_declaration() {
        assert_eq!(
            single("fuzzy int x = 5;"),
            Node::Let {
                var_name: "x".to_string(),
                var_type: VarType::Int,
                expr: Expr::Number(Number::Int(5)),
            }
        );
    }

    #[test]
    fn test_parse_array_declaration() {
        match single("fuzzy array[int;3] arr = [1,2,3];") {
            Node::Let {
                var_name,
                var_type,
                expr: Expr::Array(array),
            } => {
                assert_eq!(var_name, "arr");
                assert_eq!(var_type, VarType::Array);
                assert_eq!(array.element_type, "int");
                assert_eq!(array.length, 3);
                assert_eq!(
                    array.values,
                    vec![Number::Int(1), Number::Int(2), Number::Int(3)]
                );
            }
            other => panic!("Expected array declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_declared_type() {
        let err = parse_source("fuzzy bool b = 1;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidType);
        assert!(err.message.contains("bool"));
    }

    #[test]
    fn test_missing_equals() {
        let err = parse_source("fuzzy int x 5;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingToken);
    }

    #[test]
    fn test_parse_loop() {
        let program = parse_source("every e in arr { labs(e); }").unwrap();
        let nodes: Vec<_> = program.iter_nodes().cloned().collect();
        assert_eq!(
            nodes,
            vec![
                Node::Loop {
                    element_name: "e".to_string(),
                    collection_name: "arr".to_string(),
                },
                Node::Print {
                    expr: Expr::Variable("e".to_string()),
                },
                Node::EndLoop,
            ]
        );
    }

    #[test]
    fn test_loop_requires_in() {
        let err = parse_source("every e of arr {").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingToken);
    }

    #[test]
    fn test_parse_function() {
        let program =
            parse_source("suzy double(n: int) -> int { fuzzy int r = n * 2; flabs r; }").unwrap();
        assert_eq!(program.len(), 3);
        assert_eq!(
            program.nodes[0].node,
            Node::Function {
                func_name: "double".to_string(),
                arg_name: "n".to_string(),
                input_type: "int".to_string(),
                output_type: "int".to_string(),
            }
        );
        assert!(matches!(program.nodes[1].node, Node::Let { .. }));
        assert_eq!(
            program.nodes[2].node,
            Node::Return {
                expr: Expr::Variable("r".to_string())
            }
        );
    }

    #[test]
    fn test_function_requires_lparen() {
        let err = parse_source("suzy f x: int) -> int {").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingToken);
        assert!(err.message.contains("not constructed properly"));
    }

    #[test]
    fn test_function_argument_must_be_identifier() {
        let err = parse_source("suzy f(5: int) -> int {").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert!(err.message.contains("Unexpected argument value: 5"));
    }

    #[test]
    fn test_return_accepts_number() {
        let program = parse_source("suzy one(x: int) -> int { flabs 1 }").unwrap();
        assert_eq!(
            program.nodes[1].node,
            Node::Return {
                expr: Expr::Number(Number::Int(1))
            }
        );
    }

    #[test]
    fn test_return_rejects_string() {
        let err = parse_source(r#"flabs "x"; }"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert!(err.message.contains("Can only return"));
    }

    #[test]
    fn test_print_rejects_string() {
        let err = parse_source(r#"labs("hi");"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert!(err.message.contains("Can only print"));
    }

    #[test]
    fn test_print_requires_lparen() {
        let err = parse_source("labs x;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingToken);
        assert!(err.message.contains("Expected '('"));
    }
}
