//! Token types for the constraint notation.
//!
//! This module defines all token types produced by the lexer.

use crate::utils::location::Span;
use std::fmt;

/// A token in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The source span
    pub span: Span,
    /// The lexeme (raw text)
    pub lexeme: String,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, lexeme: String) -> Self {
        Self { kind, span, lexeme }
    }

    /// Check if this is an EOF token.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Check if this token separates statements.
    pub fn is_separator(&self) -> bool {
        self.kind.is_separator()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.lexeme.escape_debug())
    }
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    /// Integer literal
    Integer,
    /// Floating-point literal
    Float,

    /// Identifier (`x3`, or a declared name)
    Identifier,

    // Arithmetic operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,

    // Relational operators
    /// `==`
    EqualEqual,
    /// `=` (same meaning as `==`)
    Equal,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,

    // Delimiters
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// Line break
    Newline,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Check if this is a relational operator.
    pub fn is_relation(&self) -> bool {
        use TokenKind::*;
        matches!(self, EqualEqual | Equal | Less | LessEqual | Greater | GreaterEqual)
    }

    /// Check if this token ends a statement.
    pub fn is_separator(&self) -> bool {
        matches!(self, TokenKind::Comma | TokenKind::Semicolon | TokenKind::Newline)
    }

    /// Get a human-readable name for this token kind.
    pub fn name(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Integer => "integer",
            Float => "float",
            Identifier => "identifier",
            Plus => "+",
            Minus => "-",
            Star => "*",
            EqualEqual => "==",
            Equal => "=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            LeftParen => "(",
            RightParen => ")",
            Comma => ",",
            Semicolon => ";",
            Newline => "newline",
            Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_relation() {
        assert!(TokenKind::LessEqual.is_relation());
        assert!(TokenKind::Equal.is_relation());
        assert!(!TokenKind::Plus.is_relation());
    }

    #[test]
    fn test_is_separator() {
        assert!(TokenKind::Newline.is_separator());
        assert!(TokenKind::Comma.is_separator());
        assert!(!TokenKind::RightParen.is_separator());
        assert!(!TokenKind::Eof.is_separator());
    }
}
