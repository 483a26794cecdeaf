//! Frontend: Lexer, Parser, and evaluator for the constraint notation.
//!
//! ## Language Overview
//!
//! Statements are linear expressions, optionally compared with another
//! expression, separated by `;`, `,` or line breaks:
//!
//! ```text
//! # a triangle
//! x0 >= 0; x1 >= 0
//! x0 + x1 <= 4
//! 5*x0 - 2*x1 > x0 + x1 - 1    // becomes 4*x0-3*x1+1>0
//! ```
//!
//! `x<digits>` names the variable with that index; other names must be
//! declared (see [`semantic::Evaluator::with_names`]).

pub mod token;
pub mod lexer;
pub mod ast;
pub mod parser;
pub mod semantic;

// Re-exports
pub use lexer::Lexer;
pub use parser::Parser;
pub use ast::*;
pub use semantic::{Evaluator, Outcome};
pub use token::{Token, TokenKind};
pub use crate::utils::errors::ParseError;

use anyhow::Result;

/// Parse source text into an AST.
pub fn parse(source: &str) -> Result<ast::Program> {
    let lexer = Lexer::new(source);
    let mut parser = Parser::new(lexer)?;
    parser.parse_program()
}

/// Parse and evaluate every statement, resolving non-`x<digits>` names
/// through `names`.
pub fn evaluate<S: AsRef<str>>(source: &str, names: &[S]) -> Result<Vec<Outcome>> {
    let program = parse(source)?;
    Evaluator::with_names(names)?.evaluate_program(&program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let source = r#"
            x0 >= 0
            x0 <= 10
        "#;
        let program = parse(source).unwrap();
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn test_evaluate_names() {
        let outcomes = evaluate("i < n", &["i", "n"]).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].to_string(), "-x0+x1>0");
    }
}
