//! Error types for polycons.
//!
//! The algebra raises three categories of error (type, value and index),
//! and the textual frontend adds lexer, parse and semantic errors.
//! Everything is raised at the offending call and nothing is retried.

use thiserror::Error;
use crate::utils::location::Span;
use std::fmt;

/// Any error raised by the crate, tagged with its category.
#[derive(Error, Debug, Clone)]
pub enum PolyConsError {
    /// An operand has the wrong type for the operation
    #[error("Type error: {0}")]
    Type(#[from] TypeError),

    /// A numeric value is not an exact integer
    #[error("Value error: {0}")]
    Value(#[from] ValueError),

    /// Indexing outside a constraint system
    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    /// Error during lexing/tokenization
    #[error("Lexer error: {0}")]
    Lexer(#[from] LexerError),

    /// Error during parsing
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error while evaluating parsed statements
    #[error("Semantic error: {0}")]
    Semantic(#[from] SemanticError),
}

/// A value of the wrong kind was supplied where a Variable,
/// LinearExpression or Scalar was required.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct TypeError {
    /// The error message
    pub message: String,
    /// The kind of type error
    pub kind: TypeErrorKind,
}

impl TypeError {
    /// Create a new type error.
    pub fn new(kind: TypeErrorKind, message: impl Into<String>) -> Self {
        Self { message: message.into(), kind }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Categories of [`TypeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeErrorKind {
    /// The operator is not defined for this pair of operands
    UnsupportedOperand,
    /// The operand cannot be converted to the requested type
    NotConvertible,
}

/// A numeric value that is not exactly representable as an integer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ValueError {
    /// The error message
    pub message: String,
    /// The kind of value error
    pub kind: ValueErrorKind,
}

impl ValueError {
    /// Create a new value error.
    pub fn new(kind: ValueErrorKind, message: impl Into<String>) -> Self {
        Self { message: message.into(), kind }
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Categories of [`ValueError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueErrorKind {
    /// Rational with non-unit denominator, or float with a fractional part
    NotIntegral,
    /// NaN or infinite float
    NotFinite,
    /// String that is not a numeric literal
    InvalidLiteral,
    /// Float too large to stand for a single integer
    Inexact,
}

/// Index outside `[0, len)` of a constraint system.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("index {index} out of range for constraint system of length {len}")]
pub struct IndexError {
    /// The requested index
    pub index: i64,
    /// Length of the system at the time of the call
    pub len: usize,
}

/// Error during lexical analysis.
#[derive(Error, Debug, Clone)]
pub struct LexerError {
    /// The error message
    pub message: String,
    /// Location in source
    pub span: Span,
    /// The kind of lexer error
    pub kind: LexerErrorKind,
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span)
    }
}

/// Categories of [`LexerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerErrorKind {
    /// Unexpected character
    UnexpectedChar,
    /// Invalid number literal
    InvalidNumber,
}

/// Error during parsing.
#[derive(Error, Debug, Clone)]
pub struct ParseError {
    /// The error message
    pub message: String,
    /// Location in source
    pub span: Span,
    /// The kind of parse error
    pub kind: ParseErrorKind,
    /// Expected tokens (if applicable)
    pub expected: Vec<String>,
    /// What was found
    pub found: Option<String>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span)?;
        if !self.expected.is_empty() {
            write!(f, " (expected: {})", self.expected.join(", "))?;
        }
        if let Some(ref found) = self.found {
            write!(f, " (found: {})", found)?;
        }
        Ok(())
    }
}

/// Categories of [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Unexpected token
    UnexpectedToken,
    /// Expected an expression
    ExpectedExpression,
    /// Relations cannot be chained (`a < b < c`)
    ChainedRelation,
    /// Mismatched parentheses
    MismatchedDelimiter,
}

/// Error while evaluating a parsed statement.
#[derive(Error, Debug, Clone)]
pub struct SemanticError {
    /// The error message
    pub message: String,
    /// Location in source
    pub span: Span,
    /// The kind of semantic error
    pub kind: SemanticErrorKind,
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span)
    }
}

/// Categories of [`SemanticError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticErrorKind {
    /// Identifier is neither `x<digits>` nor a declared name
    UndefinedVariable,
    /// Integer literal too large for a variable index
    InvalidVariableIndex,
    /// Name declared more than once
    DuplicateDefinition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError {
            message: "Unexpected token".to_string(),
            span: Span::new(1, 5, 1, 10),
            kind: ParseErrorKind::UnexpectedToken,
            expected: vec!["expression".to_string()],
            found: Some("RightParen".to_string()),
        };
        let s = format!("{}", err);
        assert!(s.contains("Unexpected token"));
        assert!(s.contains("expression"));
    }

    #[test]
    fn test_category_prefixes() {
        let err: PolyConsError = ValueError::new(ValueErrorKind::NotIntegral, "1/2 is not integral").into();
        assert_eq!(err.to_string(), "Value error: 1/2 is not integral");

        let err: PolyConsError = IndexError { index: -1, len: 2 }.into();
        assert!(err.to_string().starts_with("Index error: index -1"));
    }
}
