//! Lexer (tokenizer) for C source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. Scanning is driven by [`TOKEN_SPEC`], an ordered table of
//! regular-expression patterns tried at each offset; the first pattern that
//! matches wins. Whitespace, `//` and `/* */` comments, and preprocessor
//! lines are matched by the same table but emit no token.
//!
//! The table order is load-bearing: multi-character operators are listed
//! before their single-character prefixes (`<<=` before `<<` before `<`),
//! and every keyword pattern is word-bounded and listed before the generic
//! identifier pattern. Do not reorder entries.

use super::ast::SourceLocation;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// All token kinds produced by the lexer.
///
/// Trivia kinds (comments, whitespace, preprocessor lines) are matched
/// during scanning but never appear in the output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Trivia (matched, never emitted)
    Comment,
    MultiComment,
    Preprocessor,
    Whitespace,

    // Keywords
    Auto,
    Break,
    Case,
    Char,
    Const,
    Continue,
    Default,
    Do,
    Double,
    Else,
    Enum,
    Extern,
    Float,
    For,
    Goto,
    If,
    Inline,
    Int,
    Long,
    Register,
    Restrict,
    Return,
    Short,
    Signed,
    Sizeof,
    Static,
    Struct,
    Switch,
    Typedef,
    Union,
    Unsigned,
    Void,
    Volatile,
    While,

    // Literals
    Str,
    CharLit,
    Number,

    // Operators (multi-character before single-character)
    EqEq,          // ==
    NotEq,         // !=
    Le,            // <=
    Ge,            // >=
    ShlAssign,     // <<=
    ShrAssign,     // >>=
    PlusAssign,    // +=
    MinusAssign,   // -=
    StarAssign,    // *=
    SlashAssign,   // /=
    PercentAssign, // %=
    AmpAssign,     // &=
    PipeAssign,    // |=
    CaretAssign,   // ^=
    PlusPlus,      // ++
    MinusMinus,    // --
    AndAnd,        // &&
    OrOr,          // ||
    Shl,           // <<
    Shr,           // >>
    Arrow,         // ->
    Lt,            // <
    Gt,            // >
    Plus,          // +
    Minus,         // -
    Star,          // *
    Slash,         // /
    Percent,       // %
    Assign,        // =
    Amp,           // &
    Pipe,          // |
    Caret,         // ^
    Bang,          // !
    Tilde,         // ~
    Question,      // ?
    Colon,         // :

    // Punctuation
    Semicolon, // ;
    Comma,     // ,
    Ellipsis,  // ...
    Dot,       // .
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]

    // Identifiers
    Ident,

    // End of input
    Eof,
}

impl TokenKind {
    /// Stable display tag for this kind, used by the token listing, parse
    /// error messages, and the AST renderer's operator labels.
    pub fn tag(self) -> &'static str {
        match self {
            TokenKind::Comment => "COMMENT",
            TokenKind::MultiComment => "MULTI_COMMENT",
            TokenKind::Preprocessor => "PREPROCESSOR",
            TokenKind::Whitespace => "SKIP",
            TokenKind::Auto => "AUTO",
            TokenKind::Break => "BREAK",
            TokenKind::Case => "CASE",
            TokenKind::Char => "CHAR",
            TokenKind::Const => "CONST",
            TokenKind::Continue => "CONTINUE",
            TokenKind::Default => "DEFAULT",
            TokenKind::Do => "DO",
            TokenKind::Double => "DOUBLE",
            TokenKind::Else => "ELSE",
            TokenKind::Enum => "ENUM",
            TokenKind::Extern => "EXTERN",
            TokenKind::Float => "FLOAT",
            TokenKind::For => "FOR",
            TokenKind::Goto => "GOTO",
            TokenKind::If => "IF",
            TokenKind::Inline => "INLINE",
            TokenKind::Int => "INT",
            TokenKind::Long => "LONG",
            TokenKind::Register => "REGISTER",
            TokenKind::Restrict => "RESTRICT",
            TokenKind::Return => "RETURN",
            TokenKind::Short => "SHORT",
            TokenKind::Signed => "SIGNED",
            TokenKind::Sizeof => "SIZEOF",
            TokenKind::Static => "STATIC",
            TokenKind::Struct => "STRUCT",
            TokenKind::Switch => "SWITCH",
            TokenKind::Typedef => "TYPEDEF",
            TokenKind::Union => "UNION",
            TokenKind::Unsigned => "UNSIGNED",
            TokenKind::Void => "VOID",
            TokenKind::Volatile => "VOLATILE",
            TokenKind::While => "WHILE",
            TokenKind::Str => "STRING",
            TokenKind::CharLit => "CHAR_LITERAL",
            TokenKind::Number => "NUMBER",
            TokenKind::EqEq => "EQ",
            TokenKind::NotEq => "NEQ",
            TokenKind::Le => "LE",
            TokenKind::Ge => "GE",
            TokenKind::ShlAssign => "SHIFT_LEFT_ASSIGN",
            TokenKind::ShrAssign => "SHIFT_RIGHT_ASSIGN",
            TokenKind::PlusAssign => "PLUS_ASSIGN",
            TokenKind::MinusAssign => "MINUS_ASSIGN",
            TokenKind::StarAssign => "MUL_ASSIGN",
            TokenKind::SlashAssign => "DIV_ASSIGN",
            TokenKind::PercentAssign => "MOD_ASSIGN",
            TokenKind::AmpAssign => "BIT_AND_ASSIGN",
            TokenKind::PipeAssign => "BIT_OR_ASSIGN",
            TokenKind::CaretAssign => "BIT_XOR_ASSIGN",
            TokenKind::PlusPlus => "INCREMENT",
            TokenKind::MinusMinus => "DECREMENT",
            TokenKind::AndAnd => "LOGICAL_AND",
            TokenKind::OrOr => "LOGICAL_OR",
            TokenKind::Shl => "SHIFT_LEFT",
            TokenKind::Shr => "SHIFT_RIGHT",
            TokenKind::Arrow => "ARROW",
            TokenKind::Lt => "LT",
            TokenKind::Gt => "GT",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "MULTIPLY",
            TokenKind::Slash => "DIVIDE",
            TokenKind::Percent => "MOD",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Amp => "AND",
            TokenKind::Pipe => "OR",
            TokenKind::Caret => "XOR",
            TokenKind::Bang => "NOT",
            TokenKind::Tilde => "TILDE",
            TokenKind::Question => "QUESTION",
            TokenKind::Colon => "COLON",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Ellipsis => "ELLIPSIS",
            TokenKind::Dot => "DOT",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::Ident => "ID",
            TokenKind::Eof => "EOF",
        }
    }

    /// Kinds that are recognized but never emitted.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Comment
                | TokenKind::MultiComment
                | TokenKind::Preprocessor
                | TokenKind::Whitespace
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single lexed token: kind tag, literal source text, and the source
/// location where it starts (used only for error reporting).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Ident => write!(f, "identifier '{}'", self.text),
            TokenKind::Number => write!(f, "number literal {}", self.text),
            TokenKind::Str => write!(f, "string literal {}", self.text),
            TokenKind::CharLit => write!(f, "char literal {}", self.text),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

/// The ordered lexical pattern table. First match wins.
///
/// Ordering rules this table encodes:
/// - trivia first, so comments absorb operator characters inside them;
/// - keywords (word-bounded) before the identifier pattern;
/// - `<<=`/`>>=` before `<<`/`>>`, which come before `<`/`>`; the same
///   longest-first rule for every compound operator;
/// - `...` before `.`.
const TOKEN_SPEC: &[(TokenKind, &str)] = &[
    (TokenKind::Comment, r"//.*"),
    (TokenKind::MultiComment, r"/\*[\s\S]*?\*/"),
    (TokenKind::Preprocessor, r"#[^\n]*"),
    (TokenKind::Whitespace, r"[ \t\n\r]+"),
    (TokenKind::Auto, r"auto\b"),
    (TokenKind::Break, r"break\b"),
    (TokenKind::Case, r"case\b"),
    (TokenKind::Char, r"char\b"),
    (TokenKind::Const, r"const\b"),
    (TokenKind::Continue, r"continue\b"),
    (TokenKind::Default, r"default\b"),
    (TokenKind::Do, r"do\b"),
    (TokenKind::Double, r"double\b"),
    (TokenKind::Else, r"else\b"),
    (TokenKind::Enum, r"enum\b"),
    (TokenKind::Extern, r"extern\b"),
    (TokenKind::Float, r"float\b"),
    (TokenKind::For, r"for\b"),
    (TokenKind::Goto, r"goto\b"),
    (TokenKind::If, r"if\b"),
    (TokenKind::Inline, r"inline\b"),
    (TokenKind::Int, r"int\b"),
    (TokenKind::Long, r"long\b"),
    (TokenKind::Register, r"register\b"),
    (TokenKind::Restrict, r"restrict\b"),
    (TokenKind::Return, r"return\b"),
    (TokenKind::Short, r"short\b"),
    (TokenKind::Signed, r"signed\b"),
    (TokenKind::Sizeof, r"sizeof\b"),
    (TokenKind::Static, r"static\b"),
    (TokenKind::Struct, r"struct\b"),
    (TokenKind::Switch, r"switch\b"),
    (TokenKind::Typedef, r"typedef\b"),
    (TokenKind::Union, r"union\b"),
    (TokenKind::Unsigned, r"unsigned\b"),
    (TokenKind::Void, r"void\b"),
    (TokenKind::Volatile, r"volatile\b"),
    (TokenKind::While, r"while\b"),
    (TokenKind::Str, r#""([^"\\]|\\.)*""#),
    (TokenKind::CharLit, r"'([^'\\]|\\.)'"),
    (
        TokenKind::Number,
        r"0[xX][0-9a-fA-F]+([uU]|[lL]{1,2})?|\b\d+(\.\d+)?([eE][+-]?\d+)?([uU]|[lL]{1,2})?\b",
    ),
    (TokenKind::EqEq, r"=="),
    (TokenKind::NotEq, r"!="),
    (TokenKind::Le, r"<="),
    (TokenKind::Ge, r">="),
    (TokenKind::ShlAssign, r"<<="),
    (TokenKind::ShrAssign, r">>="),
    (TokenKind::PlusAssign, r"\+="),
    (TokenKind::MinusAssign, r"-="),
    (TokenKind::StarAssign, r"\*="),
    (TokenKind::SlashAssign, r"/="),
    (TokenKind::PercentAssign, r"%="),
    (TokenKind::AmpAssign, r"&="),
    (TokenKind::PipeAssign, r"\|="),
    (TokenKind::CaretAssign, r"\^="),
    (TokenKind::PlusPlus, r"\+\+"),
    (TokenKind::MinusMinus, r"--"),
    (TokenKind::AndAnd, r"&&"),
    (TokenKind::OrOr, r"\|\|"),
    (TokenKind::Shl, r"<<"),
    (TokenKind::Shr, r">>"),
    (TokenKind::Arrow, r"->"),
    (TokenKind::Lt, r"<"),
    (TokenKind::Gt, r">"),
    (TokenKind::Plus, r"\+"),
    (TokenKind::Minus, r"-"),
    (TokenKind::Star, r"\*"),
    (TokenKind::Slash, r"/"),
    (TokenKind::Percent, r"%"),
    (TokenKind::Assign, r"="),
    (TokenKind::Amp, r"&"),
    (TokenKind::Pipe, r"\|"),
    (TokenKind::Caret, r"\^"),
    (TokenKind::Bang, r"!"),
    (TokenKind::Tilde, r"~"),
    (TokenKind::Question, r"\?"),
    (TokenKind::Colon, r":"),
    (TokenKind::Semicolon, r";"),
    (TokenKind::Comma, r","),
    (TokenKind::Ellipsis, r"\.\.\."),
    (TokenKind::Dot, r"\."),
    (TokenKind::LParen, r"\("),
    (TokenKind::RParen, r"\)"),
    (TokenKind::LBrace, r"\{"),
    (TokenKind::RBrace, r"\}"),
    (TokenKind::LBracket, r"\["),
    (TokenKind::RBracket, r"\]"),
    (TokenKind::Ident, r"[A-Za-z_]\w*"),
];

/// [`TOKEN_SPEC`] compiled once, each pattern anchored at the scan offset.
static PATTERNS: Lazy<Vec<(TokenKind, Regex)>> = Lazy::new(|| {
    TOKEN_SPEC
        .iter()
        .map(|(kind, pattern)| {
            let re = Regex::new(&format!("^(?:{})", pattern)).unwrap();
            (*kind, re)
        })
        .collect()
});

/// Lexer error type
#[derive(Debug)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Lexer for C source code
pub struct Lexer<'a> {
    source: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input, appending a terminating EOF token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while self.position < self.source.len() {
            let rest = &self.source[self.position..];
            let location = self.current_location();

            match scan_at(rest) {
                Some((kind, len)) => {
                    if !kind.is_trivia() {
                        tokens.push(Token {
                            kind,
                            text: rest[..len].to_string(),
                            location,
                        });
                    }
                    self.consume(&rest[..len]);
                }
                None => {
                    let ch = rest.chars().next().unwrap_or('\0');
                    return Err(LexError {
                        message: format!(
                            "no token pattern matches '{}' (byte offset {})",
                            ch, self.position
                        ),
                        location,
                    });
                }
            }
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            text: String::new(),
            location: self.current_location(),
        });

        Ok(tokens)
    }

    /// Advance past matched text, tracking line and column.
    fn consume(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.position += text.len();
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Try every table entry in order at the current offset; first match wins.
/// Returns the matched kind and byte length.
fn scan_at(rest: &str) -> Option<(TokenKind, usize)> {
    PATTERNS
        .iter()
        .find_map(|(kind, re)| re.find(rest).map(|m| (*kind, m.end())))
}
