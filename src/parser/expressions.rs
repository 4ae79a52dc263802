//! Right-hand-side parsing
//!
//! Declarations accept a deliberately small expression language: one atomic
//! operand, optionally followed by a single operator and a second atomic
//! operand. There is no precedence and no nesting.
//!
//! ```text
//! rhs     ::= operand [OP (IDENT | NUMBER)]
//! operand ::= IDENT | IDENT '(' (IDENT | NUMBER) ')' | NUMBER | STRING | '[' NUMBER {[','] NUMBER} ']'
//! ```
//!
//! The kind of the first value token decides the operand shape. Bracketed
//! literals are only legal when the declaration is an `array`, and their value
//! count must equal the declared length.

use crate::parser::ast::*;
use crate::parser::lexer::{Lexeme, TokenKind};
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};

impl<'a> Parser<'a> {
    /// Parse the initializer of a declaration.
    ///
    /// `array_shape` carries the element type and length read from
    /// `array[<type>;<len>]`, and is `None` for scalar declarations.
    pub(crate) fn parse_initializer(
        &mut self,
        var_type: VarType,
        array_shape: Option<(String, usize)>,
    ) -> Result<Expr, ParseError> {
        let location = self.current_location();
        let left = self.parse_operand(array_shape)?;

        let expr = if self.check(TokenKind::Operator) {
            let op_token = self.advance("an operator")?;
            let op = op_token
                .as_text()
                .and_then(BinOp::from_symbol)
                .ok_or_else(|| {
                    ParseError::new(
                        ParseErrorKind::UnexpectedToken,
                        format!("Unknown operator {}", op_token),
                        op_token.location,
                    )
                })?;
            let right = self.parse_right_operand()?;
            Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            }
        } else {
            left
        };

        if var_type == VarType::Array && !matches!(expr, Expr::Array(_)) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidArrayLiteral,
                "Array declaration requires a bracketed literal",
                location,
            ));
        }

        self.check_literal_type(var_type, &expr, location)?;
        Ok(expr)
    }

    fn parse_operand(&mut self, array_shape: Option<(String, usize)>) -> Result<Expr, ParseError> {
        let token = self.peek_required("an expression")?;

        match (&token.kind, &token.lexeme) {
            (TokenKind::Identifier, Lexeme::Text(name)) => {
                self.position += 1;
                if self.match_kind(TokenKind::LParen) {
                    let arg = self.parse_atom("Function arguments must be identifiers or numbers")?;
                    self.expect_rparen("after function argument")?;
                    Ok(Expr::Call {
                        func_name: name.clone(),
                        arg: Box::new(arg),
                    })
                } else {
                    Ok(Expr::Variable(name.clone()))
                }
            }
            (TokenKind::Number, Lexeme::Number(n)) => {
                self.position += 1;
                Ok(Expr::Number(*n))
            }
            (TokenKind::String, Lexeme::Text(s)) => {
                self.position += 1;
                Ok(Expr::String(s.clone()))
            }
            (TokenKind::LBracket, _) => {
                let Some((element_type, length)) = array_shape else {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidArrayLiteral,
                        "Using square brackets in non-array based value",
                        token.location,
                    ));
                };
                self.position += 1;
                self.parse_array_values(element_type, length, token.location)
            }
            (TokenKind::Operator, _) => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken,
                format!("No left expression declared before {}", token),
                token.location,
            )),
            _ => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken,
                format!("No expression declared, found {}", token),
                token.location,
            )),
        }
    }

    fn parse_right_operand(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.peek() else {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedEnd,
                "No right operand declared",
                self.current_location(),
            ));
        };
        match (&token.kind, &token.lexeme) {
            (TokenKind::Identifier, Lexeme::Text(name)) => {
                self.position += 1;
                Ok(Expr::Variable(name.clone()))
            }
            (TokenKind::Number, Lexeme::Number(n)) => {
                self.position += 1;
                Ok(Expr::Number(*n))
            }
            _ => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken,
                format!("No right expression declared, found {}", token),
                token.location,
            )),
        }
    }

    /// Values after `[` up to and including the closing `]`
    fn parse_array_values(
        &mut self,
        element_type: String,
        length: usize,
        open: SourceLocation,
    ) -> Result<Expr, ParseError> {
        let mut values = Vec::new();

        loop {
            let token = self.advance("']' to close array literal")?;
            match (&token.kind, &token.lexeme) {
                (TokenKind::Number, Lexeme::Number(n)) => values.push(*n),
                (TokenKind::Comma, _) => {}
                (TokenKind::RBracket, _) => break,
                _ => {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidArrayLiteral,
                        format!("Array literals may only contain numbers, found {}", token),
                        token.location,
                    ))
                }
            }
        }

        if values.len() != length {
            return Err(ParseError::new(
                ParseErrorKind::ArrayLengthMismatch,
                format!(
                    "Array declared with length {} but {} values supplied",
                    length,
                    values.len()
                ),
                open,
            ));
        }

        Ok(Expr::Array(ArrayLiteral {
            element_type,
            length,
            values,
        }))
    }

    /// A single identifier or number token
    pub(crate) fn parse_atom(&mut self, message: &str) -> Result<Expr, ParseError> {
        let token = self.advance("an identifier or number")?;
        match (&token.kind, &token.lexeme) {
            (TokenKind::Identifier, Lexeme::Text(name)) => Ok(Expr::Variable(name.clone())),
            (TokenKind::Number, Lexeme::Number(n)) => Ok(Expr::Number(*n)),
            _ => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken,
                format!("{}, found {}", message, token),
                token.location,
            )),
        }
    }

    /// Reject literal initializers whose kind cannot inhabit the declared type
    fn check_literal_type(
        &self,
        var_type: VarType,
        expr: &Expr,
        location: SourceLocation,
    ) -> Result<(), ParseError> {
        let mismatch = match (var_type, expr) {
            (VarType::Int, Expr::Number(n)) => n.is_float(),
            (VarType::Float, Expr::Number(n)) => !n.is_float(),
            (VarType::Int | VarType::Float, Expr::String(_)) => true,
            (VarType::String, Expr::Number(_)) => true,
            (VarType::Array, Expr::Array(array)) => match array.element_type.as_str() {
                "int" => array.values.iter().any(Number::is_float),
                "float" => array.values.iter().any(|v| !v.is_float()),
                _ => false,
            },
            _ => false,
        };

        if mismatch {
            Err(ParseError::new(
                ParseErrorKind::TypeMismatch,
                format!(
                    "Cannot initialize {} binding with {}",
                    var_type.name(),
                    describe_literal(expr)
                ),
                location,
            ))
        } else {
            Ok(())
        }
    }
}

fn describe_literal(expr: &Expr) -> String {
    match expr {
        Expr::Number(n) => format!("literal {}", n),
        Expr::String(s) => format!("literal {}", s),
        Expr::Array(array) => format!("{} array literal", array.element_type),
        _ => "expression".to_string(),
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

    fn initializer(source: &str) -> Expr {
        match parse_source(source).unwrap().nodes.remove(0).node {
            Node::Let { expr, .. } => expr,
            other => panic!("Expected declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_binary_operation() {
        assert_eq!(
            initializer("fuzzy int z = x + 2;"),
            Expr::Binary {
                left: Box::new(Expr::Variable("x".to_string())),
                op: BinOp::Add,
                right: Box::new(Expr::Number(Number::Int(2))),
            }
        );
    }

    #[test]
    fn test_function_call() {
        assert_eq!(
            initializer("fuzzy int y = square(x);"),
            Expr::Call {
                func_name: "square".to_string(),
                arg: Box::new(Expr::Variable("x".to_string())),
            }
        );
    }

    #[test]
    fn test_call_as_left_operand() {
        let expr = initializer("fuzzy int y = square(3) * 2;");
        assert!(matches!(
            expr,
            Expr::Binary { ref left, op: BinOp::Mul, .. } if matches!(**left, Expr::Call { .. })
        ));
    }

    #[test]
    fn test_string_initializer() {
        assert_eq!(
            initializer(r#"fuzzy string s = "hi";"#),
            Expr::String("\"hi\"".to_string())
        );
    }

    #[test]
    fn test_missing_right_operand() {
        let err = parse_source("fuzzy int z = x +").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd);
        assert!(err.message.contains("No right operand"));
    }

    #[test]
    fn test_right_operand_must_be_atomic() {
        let err = parse_source(r#"fuzzy int z = x + "a";"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert!(err.message.contains("No right expression"));
    }

    #[test]
    fn test_missing_left_expression() {
        let err = parse_source("fuzzy int z = + 1;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert!(err.message.contains("No left expression"));
    }

    #[test]
    fn test_brackets_on_scalar_declaration() {
        let err = parse_source("fuzzy int x = [1];").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidArrayLiteral);
    }

    #[test]
    fn test_array_requires_brackets() {
        let err = parse_source("fuzzy array[int;2] a = b;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidArrayLiteral);
    }

    #[test]
    fn test_array_length_mismatch() {
        let err = parse_source("fuzzy array[int;3] a = [1, 2];").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ArrayLengthMismatch);
    }

    #[test]
    fn test_array_without_commas() {
        match initializer("fuzzy array[float;2] a = [1.5 2.5];") {
            Expr::Array(array) => {
                assert_eq!(array.values, vec![Number::Float(1.5), Number::Float(2.5)]);
            }
            other => panic!("Expected array literal, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_array() {
        let err = parse_source("fuzzy array[int;2] a = [1, 2").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd);
    }

    #[test]
    fn test_literal_type_mismatch() {
        for source in [
            "fuzzy int x = 1.5;",
            "fuzzy float x = 1;",
            r#"fuzzy int x = "one";"#,
            "fuzzy string s = 3;",
            "fuzzy array[int;2] a = [1, 2.5];",
        ] {
            let err = parse_source(source).unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::TypeMismatch, "for {source:?}");
        }
    }

    #[test]
    fn test_non_literal_initializers_are_not_checked() {
        assert!(parse_source("fuzzy string s = name;").is_ok());
        assert!(parse_source("fuzzy float f = x * 2;").is_ok());
    }
}
