//! fuzz-lang type names → Rust type annotations

use super::errors::CodegenError;
use crate::parser::ast::{ArrayLiteral, SourceLocation};

/// Map a scalar fuzz-lang type name to its Rust primitive.
///
/// The lookup is total over `int`, `float` and `string`; every other name,
/// `array` included, is an error because arrays need an element type and a
/// length (see [`array_type`]).
pub fn rust_type(name: &str, location: SourceLocation) -> Result<&'static str, CodegenError> {
    match name {
        "int" => Ok("i32"),
        "float" => Ok("f32"),
        "string" => Ok("&str"),
        _ => Err(CodegenError::UnknownType {
            name: name.to_string(),
            location,
        }),
    }
}

/// Fixed-size array annotation, e.g. `[i32; 3]`
pub fn array_type(array: &ArrayLiteral, location: SourceLocation) -> Result<String, CodegenError> {
    let element = rust_type(&array.element_type, location)?;
    Ok(format!("[{}; {}]", element, array.length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::Number;

    #[test]
    fn test_scalar_mapping() {
        let loc = SourceLocation::default();
        assert_eq!(rust_type("int", loc), Ok("i32"));
        assert_eq!(rust_type("float", loc), Ok("f32"));
        assert_eq!(rust_type("string", loc), Ok("&str"));
    }

    #[test]
    fn test_unmapped_names_fail() {
        let loc = SourceLocation::new(3, 7);
        for name in ["array", "bool", "Int", ""] {
            assert_eq!(
                rust_type(name, loc),
                Err(CodegenError::UnknownType {
                    name: name.to_string(),
                    location: loc,
                })
            );
        }
    }

    #[test]
    fn test_array_annotation() {
        let array = ArrayLiteral {
            element_type: "float".to_string(),
            length: 2,
            values: vec![Number::Float(1.0), Number::Float(2.0)],
        };
        assert_eq!(
            array_type(&array, SourceLocation::default()).unwrap(),
            "[f32; 2]"
        );
    }
}
