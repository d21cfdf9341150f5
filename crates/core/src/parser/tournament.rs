use super::Parser;
use crate::lexer::{Token, TokenKind};
use std::collections::BTreeMap;

impl<'a> Parser<'a> {
    /// `torneo { key: value, ... } ;?`
    pub(super) fn parse_tournament(&mut self, keyword: &'a Token) {
        self.advance();
        if !self.open_block(keyword) {
            return;
        }
        let mut entries = BTreeMap::new();
        self.parse_pairs(TokenKind::RBrace, "'torneo' block", |p, key| {
            if let Some(value) = p.take_value(key, TokenKind::RBrace) {
                entries.insert(key.lexeme.clone(), value.lexeme.clone());
            }
        });
        self.eat(TokenKind::Semicolon);
        log::debug!("parsed 'torneo' block with {} entries", entries.len());
        self.store_metadata(keyword, entries);
    }
}
