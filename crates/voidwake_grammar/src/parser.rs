//! Parser core for the token syntax.
//!
//! `Parser` holds the token cursor, the current rule name for diagnostics,
//! and the node pools grammar actions construct envelopes into. The grammar
//! rules themselves live in [`crate::expr`], [`crate::condition`],
//! [`crate::complex`], and [`crate::definition`].

use voidwake_model::{Error, ErrorKind, IntRef, PlanetType, Result, StringRef, ValueRef};

use crate::envelope::{Envelope, NodePool};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Recursive-descent parser over token-syntax content source.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Name of the rule currently being parsed, for diagnostics.
    rule: String,
    /// Pool for int-typed sub-expression envelopes.
    pub(crate) int_pool: NodePool<IntRef>,
    /// Pool for string-typed sub-expression envelopes.
    pub(crate) string_pool: NodePool<StringRef>,
    /// Pool for planet-type-typed sub-expression envelopes.
    pub(crate) planet_type_pool: NodePool<ValueRef<PlanetType>>,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        let mut parser = Self {
            lexer,
            current,
            rule: "start".to_string(),
            int_pool: NodePool::new(),
            string_pool: NodePool::new(),
            planet_type_pool: NodePool::new(),
        };
        parser.skip_trivia();
        parser
    }

    /// Requires the whole input to have been consumed.
    ///
    /// # Errors
    /// Returns a parse error if tokens remain.
    pub fn expect_eof(&mut self) -> Result<()> {
        self.skip_trivia();
        if self.current.kind == TokenKind::Eof {
            Ok(())
        } else {
            Err(self.error("end of input"))
        }
    }

    /// Returns the current token kind.
    pub(crate) fn peek(&self) -> &TokenKind {
        &self.current.kind
    }

    /// Returns true if the current token is the given keyword.
    pub(crate) fn at_keyword(&self, keyword: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Ident(name) if name == keyword)
    }

    /// Returns the current token's keyword text, if it is a keyword.
    pub(crate) fn keyword(&self) -> Option<&str> {
        match &self.current.kind {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Sets the rule name reported in diagnostics.
    pub(crate) fn set_rule(&mut self, rule: &str) {
        self.rule = rule.to_string();
    }

    /// Advances to the next non-trivia token.
    pub(crate) fn advance(&mut self) {
        self.current = self.lexer.next_token();
        self.skip_trivia();
    }

    /// Skips comment tokens.
    fn skip_trivia(&mut self) {
        while self.current.kind.is_trivia() {
            self.current = self.lexer.next_token();
        }
    }

    /// Expects the current token to be of a specific kind, then advances.
    pub(crate) fn expect(&mut self, expected: &TokenKind) -> Result<()> {
        let matches =
            std::mem::discriminant(&self.current.kind) == std::mem::discriminant(expected);
        if matches {
            self.advance();
            Ok(())
        } else {
            Err(self.error(expected.name()))
        }
    }

    /// Consumes a required clause label and its `=`.
    pub(crate) fn label(&mut self, name: &str) -> Result<()> {
        match &self.current.kind {
            TokenKind::Label(label) if label == name => {
                self.advance();
                self.expect(&TokenKind::Eq)
            }
            _ => Err(self.error(&format!("label '{name}'"))),
        }
    }

    /// Consumes an optional clause label and its `=`.
    ///
    /// Returns true if the clause is present. A label that is present but
    /// not followed by `=` fails the parse: the construct has structurally
    /// started.
    pub(crate) fn try_label(&mut self, name: &str) -> Result<bool> {
        match &self.current.kind {
            TokenKind::Label(label) if label == name => {
                self.advance();
                self.expect(&TokenKind::Eq)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Consumes a required keyword token.
    pub(crate) fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        if self.at_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&format!("keyword '{keyword}'")))
        }
    }

    /// Consumes a required string literal.
    pub(crate) fn expect_string_literal(&mut self) -> Result<String> {
        match &self.current.kind {
            TokenKind::Str(text) => {
                let text = text.clone();
                self.advance();
                Ok(text)
            }
            _ => Err(self.error("string literal")),
        }
    }

    /// Creates a positional parse error for the current rule.
    pub(crate) fn error(&self, expected: &str) -> Error {
        if let TokenKind::Error(message) = &self.current.kind {
            return Error::new(ErrorKind::Parse {
                rule: self.rule.clone(),
                expected: format!("{expected} (lexer: {message})"),
                line: self.current.span.line,
                column: self.current.span.column,
            });
        }
        Error::parse(
            self.rule.clone(),
            format!("{expected}, found {}", self.current.kind.name()),
            self.current.span.line,
            self.current.span.column,
        )
    }

    /// Opens an int envelope into an owned boxed slot value.
    pub(crate) fn open_int(&mut self, envelope: Envelope, pass: &mut bool) -> Option<Box<IntRef>> {
        self.int_pool.open(envelope, pass).map(Box::new)
    }

    /// Opens a string envelope into an owned boxed slot value.
    pub(crate) fn open_string(
        &mut self,
        envelope: Envelope,
        pass: &mut bool,
    ) -> Option<Box<StringRef>> {
        self.string_pool.open(envelope, pass).map(Box::new)
    }

    /// Converts a failed envelope chain into an internal error.
    ///
    /// Envelope misuse is a programming error in the grammar actions, not a
    /// content error; it should never fire on any input.
    pub(crate) fn check_pass(&self, pass: bool) -> Result<()> {
        if pass {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::Internal(format!(
                "envelope opened twice in rule {}",
                self.rule
            ))))
        }
    }
}
