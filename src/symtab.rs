//! Naive symbol table built from the token stream
//!
//! Records every distinct identifier at first sight, in discovery order.
//! There is no scoping or type resolution here; each symbol starts (and
//! stays) in the generic `IDENTIFIER` category.

use crate::parser::lexer::{Token, TokenKind};
use rustc_hash::FxHashMap;

/// One recorded symbol: name, 1-based discovery order, and category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub order: usize,
    pub category: &'static str,
}

/// First-seen identifier table with deterministic iteration order.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: Vec<Symbol>,
    index: FxHashMap<String, usize>,
}

impl SymbolTable {
    /// Collect every distinct `ID` token from a token stream.
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut table = SymbolTable::default();
        for token in tokens {
            if token.kind == TokenKind::Ident {
                table.record(&token.text);
            }
        }
        table
    }

    /// Record an identifier unless it has already been seen.
    fn record(&mut self, name: &str) {
        if self.index.contains_key(name) {
            return;
        }
        let order = self.entries.len() + 1;
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(Symbol {
            name: name.to_string(),
            order,
            category: "IDENTIFIER",
        });
    }

    /// Symbols in discovery order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
