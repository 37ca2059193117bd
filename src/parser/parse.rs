//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing
//! infrastructure, including error types, cursor helpers, and the main
//! parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following
//! organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: Parsing external declarations, specifiers, declarators
//! - `statements`: Parsing statements (if, while, for, switch, ...)
//! - `expressions`: Parsing expressions via the precedence ladder
//!
//! Parser methods are split across multiple files using `impl Parser`
//! blocks, allowing each module to extend the Parser with related
//! functionality while maintaining access to the shared parser state.
//!
//! The token cursor only ever moves forward. A parse either completes and
//! yields a full tree, or aborts with the first error; no partial AST is
//! returned.

use crate::parser::ast::{AstNode, SourceLocation};
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use std::fmt;

/// Parser error type
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Recursive descent parser for the C subset
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    /// Tokenize `source` and set up a parser over the token stream.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    /// Set up a parser over an already-lexed token stream.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse the entire translation unit (all top-level declarations).
    pub fn parse_translation_unit(&mut self) -> Result<AstNode, ParseError> {
        let mut items = Vec::new();

        while !self.is_at_end() {
            items.push(self.parse_external_declaration()?);
        }

        Ok(AstNode::TranslationUnit { items })
    }

    // ===== Helper methods =====

    /// Keywords that can begin a declaration: type names, storage classes,
    /// and qualifiers.
    pub(crate) fn is_specifier_keyword(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Auto
                | TokenKind::Char
                | TokenKind::Const
                | TokenKind::Double
                | TokenKind::Enum
                | TokenKind::Extern
                | TokenKind::Float
                | TokenKind::Inline
                | TokenKind::Int
                | TokenKind::Long
                | TokenKind::Register
                | TokenKind::Restrict
                | TokenKind::Short
                | TokenKind::Signed
                | TokenKind::Static
                | TokenKind::Struct
                | TokenKind::Typedef
                | TokenKind::Union
                | TokenKind::Unsigned
                | TokenKind::Void
                | TokenKind::Volatile
        )
    }

    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    /// Consume a token of the expected kind or fail, reporting the token
    /// actually found and the previously consumed one for context.
    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        ctx: &str,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            let after = if self.position > 0 {
                format!(", after {}", self.previous())
            } else {
                String::new()
            };
            Err(ParseError {
                message: format!(
                    "Expected {} {}, found {}{}",
                    kind.tag(),
                    ctx,
                    self.peek(),
                    after
                ),
                location: self.current_location(),
            })
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if self.check(TokenKind::Ident) {
            Ok(self.advance().text.clone())
        } else {
            Err(ParseError {
                message: format!("Expected identifier, found {}", self.peek()),
                location: self.current_location(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::AstNode;

    #[test]
    fn test_parse_simple_function() {
        let mut parser = Parser::new("int main() { return 0; }").unwrap();
        let unit = parser.parse_translation_unit().unwrap();

        let items = match unit {
            AstNode::TranslationUnit { items } => items,
            other => panic!("expected translation unit, got {:?}", other),
        };
        assert_eq!(items.len(), 1);
        match &items[0] {
            AstNode::FunctionDefinition {
                specifiers, body, ..
            } => {
                assert_eq!(specifiers, &["int"]);
                match body.as_ref() {
                    AstNode::CompoundStatement { items } => {
                        assert_eq!(items.len(), 1)
                    }
                    other => panic!("expected compound body, got {:?}", other),
                }
            }
            other => panic!("expected function definition, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_parses_to_empty_unit() {
        let mut parser = Parser::new("").unwrap();
        let unit = parser.parse_translation_unit().unwrap();
        assert_eq!(unit, AstNode::TranslationUnit { items: vec![] });
    }

    #[test]
    fn test_lex_error_surfaces_through_parser() {
        assert!(Parser::new("int x = `;").is_err());
    }
}
