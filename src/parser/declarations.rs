//! Declaration parsing implementation
//!
//! This module handles parsing of declarations:
//!
//! - Specifier runs: type keywords, storage classes, qualifiers, and
//!   struct/union/enum tags
//! - Declarators: pointer depth, direct or parenthesized names, and
//!   parameter-list / array-bound suffixes
//! - Function definitions vs. (multi-)declarations
//!
//! # Grammar
//!
//! ```text
//! external_declaration ::= specifiers declarator "{" block "}"
//!                        | specifiers init_declarator ("," init_declarator)* ";"
//!                        | specifiers ";"
//! init_declarator      ::= declarator ("=" expression)?
//! declarator           ::= "*"* (identifier | "(" declarator ")") suffix*
//! suffix               ::= "(" ... ")" | "[" ... "]"
//! ```
//!
//! Struct/union/enum bodies are *not* parsed structurally: their extent is
//! found by counting braces and the contents are discarded, so member
//! declarations never appear in the tree. Declarator suffixes are likewise
//! consumed for syntactic validity only.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::ast::{AstNode, InitDeclarator};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse one external declaration: a function definition, a
    /// declaration list, or an empty declaration.
    pub(crate) fn parse_external_declaration(
        &mut self,
    ) -> Result<AstNode, ParseError> {
        let specifiers = self.parse_specifiers()?;

        // `struct S { ... };` or a lone `;`
        if self.match_kind(TokenKind::Semicolon) {
            return Ok(AstNode::Declaration {
                specifiers,
                declarators: Vec::new(),
            });
        }

        let declarator = self.parse_declarator()?;

        // A brace after the declarator makes this a function definition.
        if self.check(TokenKind::LBrace) {
            let body = self.parse_compound_statement()?;
            return Ok(AstNode::FunctionDefinition {
                specifiers,
                declarator: Box::new(declarator),
                body: Box::new(body),
            });
        }

        let mut declarators = Vec::new();
        let init = self.parse_initializer()?;
        declarators.push(InitDeclarator { declarator, init });

        while self.match_kind(TokenKind::Comma) {
            let declarator = self.parse_declarator()?;
            let init = self.parse_initializer()?;
            declarators.push(InitDeclarator { declarator, init });
        }

        self.expect(TokenKind::Semicolon, "after declaration")?;

        Ok(AstNode::Declaration {
            specifiers,
            declarators,
        })
    }

    /// Parse the run of specifier keywords that opens a declaration.
    ///
    /// `struct`/`union`/`enum` may carry a tag identifier and an optional
    /// brace-delimited body; the body is skipped, not parsed.
    fn parse_specifiers(&mut self) -> Result<Vec<String>, ParseError> {
        let mut specifiers = Vec::new();

        loop {
            match self.peek().kind {
                TokenKind::Struct | TokenKind::Union | TokenKind::Enum => {
                    specifiers.push(self.advance().text.clone());
                    if self.check(TokenKind::Ident) {
                        specifiers.push(self.advance().text.clone());
                    }
                    if self.check(TokenKind::LBrace) {
                        self.skip_braced_block()?;
                    }
                }
                _ if self.is_specifier_keyword() => {
                    specifiers.push(self.advance().text.clone());
                }
                _ => break,
            }
        }

        Ok(specifiers)
    }

    /// Parse a declarator: pointer stars, then a direct identifier or a
    /// parenthesized nested declarator, then any `(...)` / `[...]`
    /// suffixes (consumed, not retained).
    pub(crate) fn parse_declarator(&mut self) -> Result<AstNode, ParseError> {
        let mut pointer = 0;
        while self.match_kind(TokenKind::Star) {
            pointer += 1;
        }

        let mut name = None;
        if self.check(TokenKind::Ident) {
            let text = self.advance().text.clone();
            name = Some(Box::new(AstNode::Identifier { name: text }));
        } else if self.match_kind(TokenKind::LParen) {
            let inner = self.parse_declarator()?;
            self.expect(TokenKind::RParen, "after nested declarator")?;
            if let AstNode::Declarator {
                pointer: inner_pointer,
                name: inner_name,
            } = inner
            {
                pointer += inner_pointer;
                name = inner_name;
            }
        }

        loop {
            if self.check(TokenKind::LParen) {
                self.skip_balanced(
                    TokenKind::LParen,
                    TokenKind::RParen,
                    "parameter list",
                )?;
            } else if self.check(TokenKind::LBracket) {
                self.skip_balanced(
                    TokenKind::LBracket,
                    TokenKind::RBracket,
                    "array bound",
                )?;
            } else {
                break;
            }
        }

        Ok(AstNode::Declarator { pointer, name })
    }

    /// Parse an optional `= expression` initializer.
    fn parse_initializer(&mut self) -> Result<Option<AstNode>, ParseError> {
        if self.match_kind(TokenKind::Assign) {
            Ok(Some(self.parse_expression()?))
        } else {
            Ok(None)
        }
    }

    /// Skip a `{ ... }` struct/union/enum body by brace counting.
    fn skip_braced_block(&mut self) -> Result<(), ParseError> {
        let open = self.current_location();
        self.advance(); // consume '{'
        let mut depth = 1usize;

        while depth > 0 {
            if self.is_at_end() {
                return Err(ParseError {
                    message: "unclosed struct/union/enum block".to_string(),
                    location: open,
                });
            }
            match self.advance().kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,
                _ => {}
            }
        }

        Ok(())
    }

    /// Skip a balanced `open ... close` group (declarator suffix).
    fn skip_balanced(
        &mut self,
        open: TokenKind,
        close: TokenKind,
        what: &str,
    ) -> Result<(), ParseError> {
        let start = self.current_location();
        self.advance(); // consume the opener
        let mut depth = 1usize;

        while depth > 0 {
            if self.is_at_end() {
                return Err(ParseError {
                    message: format!("unclosed {}", what),
                    location: start,
                });
            }
            let kind = self.advance().kind;
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth -= 1;
            }
        }

        Ok(())
    }
}
