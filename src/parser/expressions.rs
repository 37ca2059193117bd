//! Expression parsing implementation
//!
//! Expressions are parsed by a ladder of grammar productions, one per
//! precedence level; each level loops while the next operator belongs to
//! it, which yields correct associativity without any runtime precedence
//! table. Grouping is determined entirely by which production calls which.
//!
//! Binding strength, lowest to highest:
//!
//! ```text
//! assignment   = += -= *= /= %= &= |= ^= <<= >>=   (right-assoc)
//! ternary      ?:                                  (right-assoc)
//! logical-or   ||
//! logical-and  &&
//! bitwise-or   |
//! bitwise-xor  ^
//! bitwise-and  &
//! equality     == !=
//! relational   < > <= >=
//! shift        << >>
//! additive     + -
//! multiplicative * / %
//! unary        + - ! ~ ++ -- * &                   (prefix, right-assoc)
//! postfix      () [] . -> ++ --
//! primary      literal | identifier | ( expression )
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::ast::{AstNode, ConstValue, UnOp};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.parse_assignment()
    }

    /// Parse assignment, including all compound forms (right-associative).
    fn parse_assignment(&mut self) -> Result<AstNode, ParseError> {
        let expr = self.parse_ternary()?;

        let op = self.peek().kind;
        if matches!(
            op,
            TokenKind::Assign
                | TokenKind::PlusAssign
                | TokenKind::MinusAssign
                | TokenKind::StarAssign
                | TokenKind::SlashAssign
                | TokenKind::PercentAssign
                | TokenKind::AmpAssign
                | TokenKind::PipeAssign
                | TokenKind::CaretAssign
                | TokenKind::ShlAssign
                | TokenKind::ShrAssign
        ) {
            self.advance();
            let rhs = self.parse_assignment()?;
            return Ok(AstNode::Assignment {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
            });
        }

        Ok(expr)
    }

    /// Parse `cond ? a : b` (right-associative in the false branch).
    fn parse_ternary(&mut self) -> Result<AstNode, ParseError> {
        let expr = self.parse_logical_or()?;

        if self.match_kind(TokenKind::Question) {
            let true_expr = Box::new(self.parse_expression()?);
            self.expect(TokenKind::Colon, "in ternary expression")?;
            let false_expr = Box::new(self.parse_ternary()?);

            return Ok(AstNode::TernaryOp {
                condition: Box::new(expr),
                true_expr,
                false_expr,
            });
        }

        Ok(expr)
    }

    fn parse_logical_or(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_logical_and()?;

        while self.match_kind(TokenKind::OrOr) {
            let right = self.parse_logical_and()?;
            left = AstNode::BinaryOp {
                op: TokenKind::OrOr,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_logical_and(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_bitwise_or()?;

        while self.match_kind(TokenKind::AndAnd) {
            let right = self.parse_bitwise_or()?;
            left = AstNode::BinaryOp {
                op: TokenKind::AndAnd,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_bitwise_or(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_bitwise_xor()?;

        while self.match_kind(TokenKind::Pipe) {
            let right = self.parse_bitwise_xor()?;
            left = AstNode::BinaryOp {
                op: TokenKind::Pipe,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_bitwise_xor(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_bitwise_and()?;

        while self.match_kind(TokenKind::Caret) {
            let right = self.parse_bitwise_and()?;
            left = AstNode::BinaryOp {
                op: TokenKind::Caret,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_bitwise_and(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_equality()?;

        while self.match_kind(TokenKind::Amp) {
            let right = self.parse_equality()?;
            left = AstNode::BinaryOp {
                op: TokenKind::Amp,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_relational()?;

        loop {
            let op = self.peek().kind;
            if !matches!(op, TokenKind::EqEq | TokenKind::NotEq) {
                break;
            }
            self.advance();

            let right = self.parse_relational()?;
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_shift()?;

        loop {
            let op = self.peek().kind;
            if !matches!(
                op,
                TokenKind::Lt | TokenKind::Gt | TokenKind::Le | TokenKind::Ge
            ) {
                break;
            }
            self.advance();

            let right = self.parse_shift()?;
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_shift(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_additive()?;

        loop {
            let op = self.peek().kind;
            if !matches!(op, TokenKind::Shl | TokenKind::Shr) {
                break;
            }
            self.advance();

            let right = self.parse_additive()?;
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = self.peek().kind;
            if !matches!(op, TokenKind::Plus | TokenKind::Minus) {
                break;
            }
            self.advance();

            let right = self.parse_multiplicative()?;
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = self.peek().kind;
            if !matches!(
                op,
                TokenKind::Star | TokenKind::Slash | TokenKind::Percent
            ) {
                break;
            }
            self.advance();

            let right = self.parse_unary()?;
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parse prefix unary operators (right-associative: each binds to the
    /// unary expression that follows it).
    fn parse_unary(&mut self) -> Result<AstNode, ParseError> {
        let op = match self.peek().kind {
            TokenKind::Plus => UnOp::Plus,
            TokenKind::Minus => UnOp::Neg,
            TokenKind::Bang => UnOp::Not,
            TokenKind::Tilde => UnOp::BitNot,
            TokenKind::PlusPlus => UnOp::PreInc,
            TokenKind::MinusMinus => UnOp::PreDec,
            TokenKind::Star => UnOp::Deref,
            TokenKind::Amp => UnOp::AddrOf,
            _ => return self.parse_postfix(),
        };
        self.advance();

        let operand = Box::new(self.parse_unary()?);
        Ok(AstNode::UnaryOp { op, operand })
    }

    /// Parse postfix operators, all left-to-right chainable on the same
    /// base expression.
    fn parse_postfix(&mut self) -> Result<AstNode, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.match_kind(TokenKind::LParen) {
                let args = self.parse_argument_list()?;
                self.expect(TokenKind::RParen, "after call arguments")?;
                expr = AstNode::Call {
                    callee: Box::new(expr),
                    args,
                };
            } else if self.match_kind(TokenKind::LBracket) {
                let index = Box::new(self.parse_expression()?);
                self.expect(TokenKind::RBracket, "after subscript")?;
                expr = AstNode::ArraySubscript {
                    array: Box::new(expr),
                    index,
                };
            } else if self.match_kind(TokenKind::Dot) {
                let member = self.expect_identifier()?;
                expr = AstNode::MemberAccess {
                    object: Box::new(expr),
                    member,
                    arrow: false,
                };
            } else if self.match_kind(TokenKind::Arrow) {
                let member = self.expect_identifier()?;
                expr = AstNode::MemberAccess {
                    object: Box::new(expr),
                    member,
                    arrow: true,
                };
            } else if self.match_kind(TokenKind::PlusPlus) {
                expr = AstNode::UnaryOp {
                    op: UnOp::PostInc,
                    operand: Box::new(expr),
                };
            } else if self.match_kind(TokenKind::MinusMinus) {
                expr = AstNode::UnaryOp {
                    op: UnOp::PostDec,
                    operand: Box::new(expr),
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parse a comma-separated argument list (the closing paren is left
    /// for the caller).
    fn parse_argument_list(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut args = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);

            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }

        Ok(args)
    }

    /// Parse a primary expression: literal, identifier, or parenthesized
    /// expression.
    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        match self.peek().kind {
            TokenKind::Number => {
                let text = self.advance().text.clone();
                Ok(AstNode::Constant {
                    value: classify_number(&text),
                })
            }
            TokenKind::Str | TokenKind::CharLit => {
                let text = self.advance().text.clone();
                Ok(AstNode::Constant {
                    value: ConstValue::Text(text),
                })
            }
            TokenKind::Ident => {
                let name = self.advance().text.clone();
                Ok(AstNode::Identifier { name })
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen, "after expression")?;
                Ok(expr)
            }
            _ => Err(ParseError {
                message: format!(
                    "No primary expression starts with {}, after {}",
                    self.peek(),
                    self.previous()
                ),
                location: self.current_location(),
            }),
        }
    }
}

/// Classify a numeric token's text: hex and plain integers become `Int`,
/// a decimal point or exponent makes it a `Float`, and text that fails to
/// parse is preserved verbatim.
fn classify_number(text: &str) -> ConstValue {
    let digits = text.trim_end_matches(|c| matches!(c, 'u' | 'U' | 'l' | 'L'));

    if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        return match i64::from_str_radix(hex, 16) {
            Ok(value) => ConstValue::Int(value),
            Err(_) => ConstValue::Text(text.to_string()),
        };
    }

    if digits.contains(|c| matches!(c, '.' | 'e' | 'E')) {
        return match digits.parse::<f64>() {
            Ok(value) => ConstValue::Float(value),
            Err(_) => ConstValue::Text(text.to_string()),
        };
    }

    match digits.parse::<i64>() {
        Ok(value) => ConstValue::Int(value),
        Err(_) => ConstValue::Text(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    fn parse_expr(source: &str) -> AstNode {
        let tokens = Lexer::new(source).tokenize().unwrap();
        let mut parser = Parser::from_tokens(tokens);
        let expr = parser.parse_expression().unwrap();
        assert!(parser.is_at_end(), "trailing tokens after expression");
        expr
    }

    fn binop(expr: &AstNode) -> (TokenKind, &AstNode, &AstNode) {
        match expr {
            AstNode::BinaryOp { op, left, right } => (*op, left, right),
            other => panic!("expected binary op, got {:?}", other),
        }
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let expr = parse_expr("1+2*3");
        let (op, left, right) = binop(&expr);
        assert_eq!(op, TokenKind::Plus);
        assert_eq!(
            left,
            &AstNode::Constant {
                value: ConstValue::Int(1)
            }
        );
        let (inner_op, ..) = binop(right);
        assert_eq!(inner_op, TokenKind::Star);
    }

    #[test]
    fn test_same_level_is_left_associative() {
        let expr = parse_expr("1-2-3");
        let (op, left, right) = binop(&expr);
        assert_eq!(op, TokenKind::Minus);
        let (inner_op, ..) = binop(left);
        assert_eq!(inner_op, TokenKind::Minus);
        assert_eq!(
            right,
            &AstNode::Constant {
                value: ConstValue::Int(3)
            }
        );
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let expr = parse_expr("a = b = 1");
        match expr {
            AstNode::Assignment { op, rhs, .. } => {
                assert_eq!(op, TokenKind::Assign);
                assert!(matches!(*rhs, AstNode::Assignment { .. }));
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_compound_assignment_operators() {
        let expr = parse_expr("a <<= 2");
        match expr {
            AstNode::Assignment { op, .. } => {
                assert_eq!(op, TokenKind::ShlAssign)
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_ternary_false_branch_recurses() {
        let expr = parse_expr("a ? 1 : b ? 2 : 3");
        match expr {
            AstNode::TernaryOp { false_expr, .. } => {
                assert!(matches!(*false_expr, AstNode::TernaryOp { .. }));
            }
            other => panic!("expected ternary, got {:?}", other),
        }
    }

    #[test]
    fn test_shift_binds_looser_than_additive() {
        let expr = parse_expr("1 << 2 + 3");
        let (op, _, right) = binop(&expr);
        assert_eq!(op, TokenKind::Shl);
        let (inner_op, ..) = binop(right);
        assert_eq!(inner_op, TokenKind::Plus);
    }

    #[test]
    fn test_bitwise_levels_nest_correctly() {
        // | is looser than ^ which is looser than &
        let expr = parse_expr("a | b ^ c & d");
        let (op, _, right) = binop(&expr);
        assert_eq!(op, TokenKind::Pipe);
        let (xor_op, _, xor_right) = binop(right);
        assert_eq!(xor_op, TokenKind::Caret);
        let (and_op, ..) = binop(xor_right);
        assert_eq!(and_op, TokenKind::Amp);
    }

    #[test]
    fn test_prefix_unary_chain() {
        let expr = parse_expr("-!x");
        match expr {
            AstNode::UnaryOp { op, operand } => {
                assert_eq!(op, UnOp::Neg);
                assert!(matches!(
                    *operand,
                    AstNode::UnaryOp { op: UnOp::Not, .. }
                ));
            }
            other => panic!("expected unary op, got {:?}", other),
        }
    }

    #[test]
    fn test_postfix_chain_on_one_base() {
        let expr = parse_expr("p->next[0].value++");
        match expr {
            AstNode::UnaryOp {
                op: UnOp::PostInc,
                operand,
            } => match *operand {
                AstNode::MemberAccess { arrow, object, .. } => {
                    assert!(!arrow);
                    assert!(matches!(*object, AstNode::ArraySubscript { .. }));
                }
                other => panic!("expected member access, got {:?}", other),
            },
            other => panic!("expected postfix increment, got {:?}", other),
        }
    }

    #[test]
    fn test_call_with_arguments() {
        let expr = parse_expr("f(1, g(2), x)");
        match expr {
            AstNode::Call { callee, args } => {
                assert_eq!(
                    *callee,
                    AstNode::Identifier {
                        name: "f".to_string()
                    }
                );
                assert_eq!(args.len(), 3);
                assert!(matches!(args[1], AstNode::Call { .. }));
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_parenthesized_expression_overrides_precedence() {
        let expr = parse_expr("(1+2)*3");
        let (op, left, _) = binop(&expr);
        assert_eq!(op, TokenKind::Star);
        let (inner_op, ..) = binop(left);
        assert_eq!(inner_op, TokenKind::Plus);
    }

    #[test]
    fn test_number_classification() {
        assert_eq!(classify_number("42"), ConstValue::Int(42));
        assert_eq!(classify_number("0x1F"), ConstValue::Int(31));
        assert_eq!(classify_number("0X10"), ConstValue::Int(16));
        assert_eq!(classify_number("20U"), ConstValue::Int(20));
        assert_eq!(classify_number("7LL"), ConstValue::Int(7));
        assert_eq!(classify_number("3.14"), ConstValue::Float(3.14));
        assert_eq!(classify_number("1e9"), ConstValue::Float(1e9));
        assert_eq!(classify_number("2.5e-3"), ConstValue::Float(2.5e-3));
    }

    #[test]
    fn test_unparsable_number_kept_as_text() {
        assert_eq!(
            classify_number("99999999999999999999999999"),
            ConstValue::Text("99999999999999999999999999".to_string())
        );
    }

    #[test]
    fn test_missing_primary_reports_error() {
        let tokens = Lexer::new("1 + ;").tokenize().unwrap();
        let mut parser = Parser::from_tokens(tokens);
        let err = parser.parse_expression().unwrap_err();
        assert!(err.message.contains("No primary expression"));
    }
}
