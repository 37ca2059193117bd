//! Statement parsing implementation
//!
//! This module handles parsing of all statement forms:
//!
//! - Compound statements: `{ ... }` with declarations and statements
//!   freely interleaved
//! - Control flow: `if`, `while`, `do-while`, `for`, `switch`
//! - `case` / `default` labels (valid only as direct children of a
//!   compound statement, each collecting its own body)
//! - Jump statements: `return`, `break`, `continue`
//! - Expression statements, including the bare `;`
//!
//! # Grammar
//!
//! ```text
//! statement ::= block | if_stmt | while_stmt | do_while_stmt | for_stmt
//!             | switch_stmt | return_stmt | break_stmt | continue_stmt
//!             | declaration | expr_stmt
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::ast::AstNode;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a statement, dispatching on the leading token.
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        if self.check(TokenKind::LBrace) {
            return self.parse_compound_statement();
        }

        if self.match_kind(TokenKind::If) {
            return self.parse_if_statement();
        }

        if self.match_kind(TokenKind::While) {
            return self.parse_while_statement();
        }

        if self.match_kind(TokenKind::Do) {
            return self.parse_do_while_statement();
        }

        if self.match_kind(TokenKind::For) {
            return self.parse_for_statement();
        }

        if self.match_kind(TokenKind::Switch) {
            return self.parse_switch_statement();
        }

        if self.match_kind(TokenKind::Return) {
            return self.parse_return_statement();
        }

        if self.match_kind(TokenKind::Break) {
            self.expect(TokenKind::Semicolon, "after 'break'")?;
            return Ok(AstNode::Break);
        }

        if self.match_kind(TokenKind::Continue) {
            self.expect(TokenKind::Semicolon, "after 'continue'")?;
            return Ok(AstNode::Continue);
        }

        // A specifier keyword in statement position starts a nested
        // declaration.
        if self.is_specifier_keyword() {
            return self.parse_external_declaration();
        }

        self.parse_expression_statement()
    }

    /// Parse `{ ... }`. Case and default labels are recognized here and
    /// nowhere else.
    pub(crate) fn parse_compound_statement(
        &mut self,
    ) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::LBrace, "to open block")?;

        let mut items = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if self.check(TokenKind::Case) || self.check(TokenKind::Default) {
                items.push(self.parse_case_statement()?);
            } else {
                items.push(self.parse_statement()?);
            }
        }

        self.expect(TokenKind::RBrace, "after block")?;

        Ok(AstNode::CompoundStatement { items })
    }

    /// Parse `case expr:` or `default:` plus the statements that follow,
    /// up to the next label or the enclosing `}`.
    fn parse_case_statement(&mut self) -> Result<AstNode, ParseError> {
        let label = if self.match_kind(TokenKind::Case) {
            Some(Box::new(self.parse_expression()?))
        } else {
            self.expect(TokenKind::Default, "to open case label")?;
            None
        };
        self.expect(TokenKind::Colon, "after case label")?;

        let mut body = Vec::new();
        while !self.check(TokenKind::Case)
            && !self.check(TokenKind::Default)
            && !self.check(TokenKind::RBrace)
            && !self.is_at_end()
        {
            body.push(self.parse_statement()?);
        }

        Ok(AstNode::Case { label, body })
    }

    /// Parse `if (cond) stmt [else stmt]`. The else binds to the nearest
    /// unmatched if because the then-branch parse consumes its own else
    /// before returning.
    fn parse_if_statement(&mut self) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::LParen, "after 'if'")?;
        let condition = Box::new(self.parse_expression()?);
        self.expect(TokenKind::RParen, "after if condition")?;

        let then_branch = Box::new(self.parse_statement()?);

        let else_branch = if self.match_kind(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(AstNode::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_while_statement(&mut self) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::LParen, "after 'while'")?;
        let condition = Box::new(self.parse_expression()?);
        self.expect(TokenKind::RParen, "after while condition")?;

        let body = Box::new(self.parse_statement()?);

        Ok(AstNode::While { condition, body })
    }

    fn parse_do_while_statement(&mut self) -> Result<AstNode, ParseError> {
        let body = Box::new(self.parse_statement()?);

        self.expect(TokenKind::While, "after do body")?;
        self.expect(TokenKind::LParen, "after 'while'")?;
        let condition = Box::new(self.parse_expression()?);
        self.expect(TokenKind::RParen, "after do-while condition")?;
        self.expect(TokenKind::Semicolon, "after do-while")?;

        Ok(AstNode::DoWhile { body, condition })
    }

    /// Parse `for (init; cond; post) stmt`. The init clause is a nested
    /// declaration when it starts with a specifier keyword, otherwise an
    /// (optional) expression statement; cond and post are each optional.
    fn parse_for_statement(&mut self) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::LParen, "after 'for'")?;

        let init = if self.match_kind(TokenKind::Semicolon) {
            None
        } else if self.is_specifier_keyword() {
            // Declaration, consumes its own semicolon
            Some(Box::new(self.parse_external_declaration()?))
        } else {
            let expr = self.parse_expression()?;
            self.expect(TokenKind::Semicolon, "after for initializer")?;
            Some(Box::new(AstNode::ExpressionStatement {
                expr: Some(Box::new(expr)),
            }))
        };

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.expect(TokenKind::Semicolon, "after for condition")?;

        let post = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.expect(TokenKind::RParen, "after for clauses")?;

        let body = Box::new(self.parse_statement()?);

        Ok(AstNode::For {
            init,
            condition,
            post,
            body,
        })
    }

    /// Parse `switch (cond) { ... }`; the body must be a compound
    /// statement.
    fn parse_switch_statement(&mut self) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::LParen, "after 'switch'")?;
        let condition = Box::new(self.parse_expression()?);
        self.expect(TokenKind::RParen, "after switch condition")?;

        if !self.check(TokenKind::LBrace) {
            return Err(ParseError {
                message: format!(
                    "Expected LBRACE to open switch body, found {}",
                    self.peek()
                ),
                location: self.current_location(),
            });
        }
        let body = Box::new(self.parse_compound_statement()?);

        Ok(AstNode::Switch { condition, body })
    }

    fn parse_return_statement(&mut self) -> Result<AstNode, ParseError> {
        let expr = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };

        self.expect(TokenKind::Semicolon, "after return")?;

        Ok(AstNode::Return { expr })
    }

    /// Parse an expression statement; the expression is absent only for a
    /// bare `;`.
    fn parse_expression_statement(&mut self) -> Result<AstNode, ParseError> {
        if self.match_kind(TokenKind::Semicolon) {
            return Ok(AstNode::ExpressionStatement { expr: None });
        }

        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "after expression")?;

        Ok(AstNode::ExpressionStatement {
            expr: Some(Box::new(expr)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_body(source: &str) -> Vec<AstNode> {
        let wrapped = format!("void f() {{ {} }}", source);
        let unit = Parser::new(&wrapped)
            .unwrap()
            .parse_translation_unit()
            .unwrap();
        match unit {
            AstNode::TranslationUnit { items } => match items.into_iter().next() {
                Some(AstNode::FunctionDefinition { body, .. }) => match *body {
                    AstNode::CompoundStatement { items } => items,
                    other => panic!("expected compound body, got {:?}", other),
                },
                other => panic!("expected function definition, got {:?}", other),
            },
            other => panic!("expected translation unit, got {:?}", other),
        }
    }

    #[test]
    fn test_dangling_else_binds_to_inner_if() {
        let stmts = parse_body("if (a) if (b) x; else y;");
        assert_eq!(stmts.len(), 1);
        match &stmts[0] {
            AstNode::If {
                then_branch,
                else_branch,
                ..
            } => {
                // outer if has no else of its own
                assert!(else_branch.is_none());
                match then_branch.as_ref() {
                    AstNode::If { else_branch, .. } => {
                        assert!(else_branch.is_some())
                    }
                    other => panic!("expected inner if, got {:?}", other),
                }
            }
            other => panic!("expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_while_with_block_body() {
        let stmts = parse_body("while (x) { x = x - 1; }");
        match &stmts[0] {
            AstNode::While { body, .. } => {
                assert!(matches!(
                    body.as_ref(),
                    AstNode::CompoundStatement { .. }
                ));
            }
            other => panic!("expected while statement, got {:?}", other),
        }
    }

    #[test]
    fn test_do_while() {
        let stmts = parse_body("do x--; while (x > 0);");
        assert!(matches!(&stmts[0], AstNode::DoWhile { .. }));
    }

    #[test]
    fn test_for_with_declaration_init() {
        let stmts = parse_body("for (int i = 0; i < 3; i++) x = x + i;");
        match &stmts[0] {
            AstNode::For {
                init,
                condition,
                post,
                ..
            } => {
                assert!(matches!(
                    init.as_deref(),
                    Some(AstNode::Declaration { .. })
                ));
                assert!(condition.is_some());
                assert!(post.is_some());
            }
            other => panic!("expected for statement, got {:?}", other),
        }
    }

    #[test]
    fn test_for_with_all_clauses_empty() {
        let stmts = parse_body("for (;;) break;");
        match &stmts[0] {
            AstNode::For {
                init,
                condition,
                post,
                ..
            } => {
                assert!(init.is_none());
                assert!(condition.is_none());
                assert!(post.is_none());
            }
            other => panic!("expected for statement, got {:?}", other),
        }
    }

    #[test]
    fn test_switch_cases_collect_own_bodies() {
        let stmts = parse_body(
            "switch (x) { case 1: a = 1; break; case 2: a = 2; break; default: a = 0; }",
        );
        match &stmts[0] {
            AstNode::Switch { body, .. } => match body.as_ref() {
                AstNode::CompoundStatement { items } => {
                    assert_eq!(items.len(), 3);
                    match &items[0] {
                        AstNode::Case { label, body } => {
                            assert!(label.is_some());
                            assert_eq!(body.len(), 2);
                        }
                        other => panic!("expected case, got {:?}", other),
                    }
                    match &items[2] {
                        AstNode::Case { label, body } => {
                            assert!(label.is_none());
                            assert_eq!(body.len(), 1);
                        }
                        other => panic!("expected default case, got {:?}", other),
                    }
                }
                other => panic!("expected compound body, got {:?}", other),
            },
            other => panic!("expected switch statement, got {:?}", other),
        }
    }

    #[test]
    fn test_switch_requires_compound_body() {
        let err = Parser::new("void f() { switch (x) y; }")
            .unwrap()
            .parse_translation_unit()
            .unwrap_err();
        assert!(err.message.contains("switch body"));
    }

    #[test]
    fn test_nested_declaration_in_statement_position() {
        let stmts = parse_body("int y = 2; y++;");
        assert!(matches!(&stmts[0], AstNode::Declaration { .. }));
        assert!(matches!(&stmts[1], AstNode::ExpressionStatement { .. }));
    }

    #[test]
    fn test_bare_semicolon_statement() {
        let stmts = parse_body(";");
        assert_eq!(stmts[0], AstNode::ExpressionStatement { expr: None });
    }

    #[test]
    fn test_return_without_expression() {
        let stmts = parse_body("return;");
        assert_eq!(stmts[0], AstNode::Return { expr: None });
    }

    #[test]
    fn test_break_and_continue() {
        let stmts = parse_body("while (1) { break; continue; }");
        match &stmts[0] {
            AstNode::While { body, .. } => match body.as_ref() {
                AstNode::CompoundStatement { items } => {
                    assert_eq!(items[0], AstNode::Break);
                    assert_eq!(items[1], AstNode::Continue);
                }
                other => panic!("expected compound body, got {:?}", other),
            },
            other => panic!("expected while statement, got {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_block_fails_at_eof() {
        let err = Parser::new("void f() { if (x) { y;")
            .unwrap()
            .parse_translation_unit()
            .unwrap_err();
        assert!(err.message.contains("found end of file"));
    }
}
