//! Parser for the constraint notation.
//!
//! This module implements a recursive descent parser that converts a
//! stream of tokens into a [`Program`]. Statements are separated by `;`,
//! `,` or line breaks. After a syntax error the parser skips to the next
//! separator and keeps going, so one pass reports every bad statement.

use crate::frontend::ast::*;
use crate::frontend::lexer::Lexer;
use crate::frontend::token::{Token, TokenKind};
use crate::polyhedral::{Relation, Scalar};
use crate::utils::errors::{ParseError, ParseErrorKind};
use anyhow::Result;
use std::str::FromStr;

/// A parser for the constraint notation.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    previous: Token,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser from a lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let first_token = lexer.next_token()?;

        Ok(Self {
            lexer,
            current: first_token.clone(),
            previous: first_token,
            errors: Vec::new(),
        })
    }

    /// Parse the whole input.
    ///
    /// Fails with the first [`ParseError`] when any statement is malformed;
    /// the others are available through [`Parser::errors`].
    pub fn parse_program(&mut self) -> Result<Program> {
        let start = self.current.span;
        let mut program = Program::new();

        self.skip_separators()?;
        while !self.is_at_end() {
            match self.parse_statement() {
                Ok(stmt) => {
                    log::debug!("parsed statement `{}` at {}", stmt, stmt.span);
                    program.statements.push(stmt);
                }
                Err(e) => match e.downcast::<ParseError>() {
                    Ok(parse_error) => {
                        self.errors.push(parse_error);
                        self.synchronize()?;
                    }
                    // Lexer errors are not recoverable.
                    Err(other) => return Err(other),
                },
            }
            self.skip_separators()?;
        }

        program.span = start.merge(&self.previous.span);

        if let Some(first) = self.errors.first() {
            for extra in &self.errors[1..] {
                log::debug!("additional parse error: {}", extra);
            }
            return Err(first.clone().into());
        }

        Ok(program)
    }

    /// Every syntax error found so far, in source order.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        let lhs = self.parse_sum()?;

        let relation = match self.relation() {
            Some(relation) => {
                self.advance()?;
                let rhs = self.parse_sum()?;
                if self.relation().is_some() {
                    return Err(self
                        .error(
                            "Relations cannot be chained",
                            ParseErrorKind::ChainedRelation,
                            Vec::new(),
                        )
                        .into());
                }
                Some((relation, rhs))
            }
            None => None,
        };

        if !self.current.is_separator() && !self.is_at_end() {
            let (message, kind) = if self.check(TokenKind::RightParen) {
                ("Unmatched ')'", ParseErrorKind::MismatchedDelimiter)
            } else {
                ("Unexpected token after statement", ParseErrorKind::UnexpectedToken)
            };
            return Err(self
                .error(message, kind, vec!["';'".into(), "','".into(), "newline".into()])
                .into());
        }

        let end = relation.as_ref().map_or(lhs.span, |(_, rhs)| rhs.span);
        Ok(Statement {
            span: lhs.span.merge(&end),
            lhs,
            relation,
        })
    }

    fn relation(&self) -> Option<Relation> {
        match self.current.kind {
            TokenKind::Less => Some(Relation::Less),
            TokenKind::LessEqual => Some(Relation::LessOrEqual),
            TokenKind::EqualEqual | TokenKind::Equal => Some(Relation::Equal),
            TokenKind::GreaterEqual => Some(Relation::GreaterOrEqual),
            TokenKind::Greater => Some(Relation::Greater),
            _ => None,
        }
    }

    fn parse_sum(&mut self) -> Result<Expr> {
        let mut left = self.parse_product()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_product()?;
            let span = left.span.merge(&right.span);
            left = Expr::new(ExprKind::Binary { op, left: Box::new(left), right: Box::new(right) }, span);
        }
        Ok(left)
    }

    fn parse_product(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        while self.check(TokenKind::Star) {
            self.advance()?;
            let right = self.parse_unary()?;
            let span = left.span.merge(&right.span);
            left = Expr::new(
                ExprKind::Binary { op: BinaryOp::Mul, left: Box::new(left), right: Box::new(right) },
                span,
            );
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let start = self.current.span;
        let op = match self.current.kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            _ => return self.parse_primary(),
        };
        self.advance()?;
        let operand = self.parse_unary()?;
        let span = start.merge(&operand.span);
        Ok(Expr::new(ExprKind::Unary { op, operand: Box::new(operand) }, span))
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let start = self.current.span;

        match self.current.kind {
            TokenKind::Integer => {
                let value = Scalar::from_str(&self.current.lexeme).map_err(|_| {
                    self.error("Invalid integer literal", ParseErrorKind::UnexpectedToken, Vec::new())
                })?;
                self.advance()?;
                Ok(Expr::int_lit(value, start))
            }
            TokenKind::Float => {
                let value: f64 = self.current.lexeme.parse().map_err(|_| {
                    self.error("Invalid float literal", ParseErrorKind::UnexpectedToken, Vec::new())
                })?;
                self.advance()?;
                Ok(Expr::new(ExprKind::FloatLiteral(value), start))
            }
            TokenKind::Identifier => {
                let name = self.current.lexeme.clone();
                self.advance()?;
                Ok(Expr::name(name, start))
            }
            TokenKind::LeftParen => {
                self.advance()?;
                let inner = self.parse_sum()?;
                if !self.check(TokenKind::RightParen) {
                    return Err(self
                        .error("Expected ')'", ParseErrorKind::MismatchedDelimiter, vec!["')'".into()])
                        .into());
                }
                self.advance()?;
                Ok(Expr::new(ExprKind::Grouped(Box::new(inner)), start.merge(&self.previous.span)))
            }
            _ => Err(self
                .error(
                    "Expected expression",
                    ParseErrorKind::ExpectedExpression,
                    vec!["number".into(), "identifier".into(), "'('".into()],
                )
                .into()),
        }
    }

    // Helper methods
    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn is_at_end(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    fn advance(&mut self) -> Result<&Token> {
        self.previous = std::mem::replace(&mut self.current, self.lexer.next_token()?);
        Ok(&self.previous)
    }

    fn skip_separators(&mut self) -> Result<()> {
        while self.current.is_separator() {
            self.advance()?;
        }
        Ok(())
    }

    fn error(&self, message: &str, kind: ParseErrorKind, expected: Vec<String>) -> ParseError {
        ParseError {
            message: message.to_string(),
            span: self.current.span,
            kind,
            expected,
            found: Some(self.current.kind.name().to_string()),
        }
    }

    /// Skip to the next statement separator.
    fn synchronize(&mut self) -> Result<()> {
        while !self.is_at_end() && !self.current.is_separator() {
            self.advance()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Program> {
        let lexer = Lexer::new(source);
        let mut parser = Parser::new(lexer)?;
        parser.parse_program()
    }

    fn parse_error(source: &str) -> ParseError {
        parse(source).unwrap_err().downcast::<ParseError>().unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n;\n, # only a comment\n").unwrap().is_empty());
    }

    #[test]
    fn test_single_relation() {
        let program = parse("5*x0 - 2*x1 > x0 + x1 - 1").unwrap();
        assert_eq!(program.len(), 1);
        let stmt = &program.statements[0];
        let (relation, _) = stmt.relation.as_ref().unwrap();
        assert_eq!(*relation, Relation::Greater);
        assert_eq!(stmt.to_string(), "5 * x0 - 2 * x1 > x0 + x1 - 1");
    }

    #[test]
    fn test_separators() {
        let program = parse("x0 >= 0; x1 >= 0, x0 + x1 <= 4\n\nx2 = 1\n").unwrap();
        assert_eq!(program.len(), 4);
        assert!(program.statements.iter().all(Statement::is_relation));
    }

    #[test]
    fn test_bare_expression() {
        let program = parse("-(x0 - 3)").unwrap();
        let stmt = &program.statements[0];
        assert!(!stmt.is_relation());
        assert!(matches!(stmt.lhs.kind, ExprKind::Unary { op: UnaryOp::Neg, .. }));
    }

    #[test]
    fn test_precedence() {
        let program = parse("1 + 2 * x0").unwrap();
        match &program.statements[0].lhs.kind {
            ExprKind::Binary { op: BinaryOp::Add, right, .. } => {
                assert!(matches!(right.kind, ExprKind::Binary { op: BinaryOp::Mul, .. }));
            }
            other => panic!("Expected addition, found {:?}", other),
        }
    }

    #[test]
    fn test_big_literal() {
        let program = parse("x0 <= 123456789012345678901234567890").unwrap();
        let (_, rhs) = program.statements[0].relation.as_ref().unwrap();
        match &rhs.kind {
            ExprKind::IntLiteral(v) => assert_eq!(v.to_string(), "123456789012345678901234567890"),
            other => panic!("Expected literal, found {:?}", other),
        }
    }

    #[test]
    fn test_chained_relation() {
        assert_eq!(parse_error("0 < x0 < 5").kind, ParseErrorKind::ChainedRelation);
    }

    #[test]
    fn test_missing_operand() {
        let err = parse_error("x0 + ");
        assert_eq!(err.kind, ParseErrorKind::ExpectedExpression);
        assert_eq!(err.found.as_deref(), Some("end of input"));
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(parse_error("(x0 + 1").kind, ParseErrorKind::MismatchedDelimiter);
        assert_eq!(parse_error("x0 + 1)").kind, ParseErrorKind::MismatchedDelimiter);
    }

    #[test]
    fn test_recovery_collects_all_errors() {
        let mut parser = Parser::new(Lexer::new("x0 +\nx1 >= 0\n* 2\n")).unwrap();
        let err = parser.parse_program().unwrap_err();
        assert!(err.downcast_ref::<ParseError>().is_some());
        assert_eq!(parser.errors().len(), 2);
        assert_eq!(parser.errors()[1].span.start_line, 3);
    }

    #[test]
    fn test_lexer_error_is_propagated() {
        let err = parse("x0 ? 1").unwrap_err();
        assert!(err.downcast_ref::<crate::utils::errors::LexerError>().is_some());
    }
}
