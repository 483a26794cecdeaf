//! Lexer for the constraint notation.
//!
//! The lexer converts source text into a stream of tokens. Line breaks are
//! significant (they separate statements) and are returned as
//! [`TokenKind::Newline`]; other whitespace and comments are skipped.

use crate::frontend::token::{Token, TokenKind};
use crate::utils::errors::{LexerError, LexerErrorKind};
use crate::utils::location::{SourceLocation, Span};
use std::iter::Peekable;
use std::str::Chars;
use unicode_xid::UnicodeXID;

/// A lexer for tokenizing constraint text.
pub struct Lexer<'a> {
    /// The source text
    source: &'a str,
    /// Character iterator
    chars: Peekable<Chars<'a>>,
    /// Current byte offset
    offset: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Start of current token
    token_start: SourceLocation,
    /// Whether we've hit EOF
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            offset: 0,
            line: 1,
            column: 1,
            token_start: SourceLocation::start(),
            at_eof: false,
        }
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column, self.offset)
    }

    fn mark_token_start(&mut self) {
        self.token_start = self.current_location();
    }

    fn make_span(&self) -> Span {
        Span::from_locations(self.token_start, self.current_location())
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Peek one character past the current one.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.offset..].chars();
        chars.next();
        chars.next()
    }

    fn peek_is_digit(&mut self) -> bool {
        self.peek().map_or(false, |c| c.is_ascii_digit())
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_line_comment(&mut self) {
        while self.peek().is_some() && self.peek() != Some('\n') {
            self.advance();
        }
    }

    /// Skip blanks and comments, stopping at line breaks.
    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') => {
                    self.advance();
                }
                Some('#') => self.skip_line_comment(),
                Some('/') if self.peek_next() == Some('/') => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        let span = self.make_span();
        let lexeme = span.snippet(self.source).to_string();
        Token::new(kind, span, lexeme)
    }

    fn make_error(&self, message: &str, kind: LexerErrorKind) -> LexerError {
        LexerError {
            message: message.to_string(),
            span: self.make_span(),
            kind,
        }
    }

    /// Scan a number literal. The first digit is already consumed.
    fn scan_number(&mut self) -> Result<Token, LexerError> {
        while self.peek_is_digit() {
            self.advance();
        }

        let mut is_float = false;

        if self.peek() == Some('.') && self.peek_next().map_or(false, |c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            while self.peek_is_digit() {
                self.advance();
            }
        }

        if self.peek() == Some('e') || self.peek() == Some('E') {
            is_float = true;
            self.advance();
            if self.peek() == Some('+') || self.peek() == Some('-') {
                self.advance();
            }
            if !self.peek_is_digit() {
                return Err(self.make_error(
                    "Invalid floating-point exponent",
                    LexerErrorKind::InvalidNumber,
                ));
            }
            while self.peek_is_digit() {
                self.advance();
            }
        }

        // `2x0` is not implicit multiplication.
        if self.peek().map_or(false, |c| c.is_xid_continue()) {
            while self.peek().map_or(false, |c| c.is_xid_continue()) {
                self.advance();
            }
            return Err(self.make_error(
                "Identifier characters directly after a number",
                LexerErrorKind::InvalidNumber,
            ));
        }

        if is_float {
            Ok(self.make_token(TokenKind::Float))
        } else {
            Ok(self.make_token(TokenKind::Integer))
        }
    }

    fn scan_identifier(&mut self) -> Token {
        while self.peek().map_or(false, |c| c.is_xid_continue()) {
            self.advance();
        }
        self.make_token(TokenKind::Identifier)
    }

    /// Scan the next token.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace();
        self.mark_token_start();

        let c = match self.advance() {
            Some(c) => c,
            None => {
                self.at_eof = true;
                return Ok(self.make_token(TokenKind::Eof));
            }
        };

        let token = match c {
            '\n' => self.make_token(TokenKind::Newline),
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '+' => self.make_token(TokenKind::Plus),
            '-' => self.make_token(TokenKind::Minus),
            '*' => self.make_token(TokenKind::Star),

            '=' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::EqualEqual)
                } else {
                    self.make_token(TokenKind::Equal)
                }
            }
            '<' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::LessEqual)
                } else {
                    self.make_token(TokenKind::Less)
                }
            }
            '>' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::GreaterEqual)
                } else {
                    self.make_token(TokenKind::Greater)
                }
            }

            c if c.is_ascii_digit() => self.scan_number()?,
            c if c.is_xid_start() || c == '_' => self.scan_identifier(),

            _ => {
                return Err(self.make_error(
                    &format!("Unexpected character: '{}'", c),
                    LexerErrorKind::UnexpectedChar,
                ))
            }
        };

        log::trace!("token {}", token);
        Ok(token)
    }

    /// Check if we've reached EOF.
    pub fn is_at_end(&self) -> bool {
        self.at_eof
    }

    /// Collect all tokens into a vector, ending with [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.at_eof {
            None
        } else {
            let result = self.next_token();
            if result.as_ref().map_or(true, |t| t.is_eof()) {
                self.at_eof = true;
            }
            Some(result)
        }
    }
}
