use super::Parser;
use crate::ast::{Match, Phase, Scorer};
use crate::error::DiagnosticKind;
use crate::lexer::{Token, TokenKind};

fn is_phase_keyword(token: &Token) -> bool {
    token.kind == TokenKind::Reserved && Phase::from_name(&token.lexeme).is_some()
}

impl<'a> Parser<'a> {
    /// `eliminacion { phase: [ partido: ..., ... ], ... } ;?`
    pub(super) fn parse_bracket(&mut self, keyword: &'a Token) {
        self.advance();
        if !self.open_block(keyword) {
            return;
        }
        self.parse_list(TokenKind::RBrace, "'eliminacion' block", |p, token| {
            if !is_phase_keyword(token) {
                return false;
            }
            p.parse_phase(token);
            true
        });
        self.eat(TokenKind::Semicolon);
    }

    /// A phase opens with `[` or `{`. Without an opener it runs until the
    /// first token that is not a match or comma.
    fn parse_phase(&mut self, keyword: &'a Token) {
        self.advance();
        self.expect_colon_after(keyword);

        let close = match self.peek().map(|t| t.kind) {
            Some(TokenKind::LBracket) => {
                self.advance();
                Some(TokenKind::RBracket)
            }
            Some(TokenKind::LBrace) => {
                self.advance();
                Some(TokenKind::RBrace)
            }
            _ => {
                self.error_here(
                    DiagnosticKind::MissingDelimiter,
                    format!("expected '[' or '{{' to open phase '{}'", keyword.lexeme),
                );
                None
            }
        };
        let closer = close.and_then(TokenKind::symbol).unwrap_or('?');

        let mut matches = Vec::new();
        loop {
            let Some(token) = self.peek() else {
                if close.is_some() {
                    self.error_here(
                        DiagnosticKind::MissingDelimiter,
                        format!("expected '{}' to close phase '{}'", closer, keyword.lexeme),
                    );
                }
                break;
            };
            if Some(token.kind) == close {
                self.advance();
                break;
            }
            if token.kind == TokenKind::Comma {
                self.advance();
                continue;
            }
            if token.is_reserved("partido") {
                if let Some(game) = self.parse_match(token) {
                    matches.push(game);
                }
                continue;
            }
            if close.is_none() {
                break;
            }
            if token.kind == TokenKind::RBrace || is_phase_keyword(token) || self.starts_block() {
                self.error_here(
                    DiagnosticKind::MissingDelimiter,
                    format!("expected '{}' to close phase '{}'", closer, keyword.lexeme),
                );
                break;
            }
            self.skip_unexpected("phase");
        }

        log::debug!(
            "parsed phase '{}' with {} match(es)",
            keyword.lexeme,
            matches.len()
        );
        self.store_phase(keyword, matches);
    }

    /// `partido: A vs? B [attrs]?`. A match missing either team name is
    /// dropped after its attribute block is consumed.
    fn parse_match(&mut self, keyword: &'a Token) -> Option<Match> {
        self.advance();
        self.expect_colon_after(keyword);
        let team_a = self.take_name("first team name");
        self.eat(TokenKind::VersusMarker);
        let team_b = self.take_name("second team name");

        let mut result = None;
        let mut scorers = Vec::new();
        if self.eat(TokenKind::LBracket) {
            self.parse_pairs(TokenKind::RBracket, "match attributes", |p, key| {
                match key.lexeme.as_str() {
                    "resultado" => {
                        if let Some(value) = p.take_value(key, TokenKind::RBracket) {
                            result = Some(value.lexeme.clone());
                        }
                    }
                    "goleadores" => p.parse_scorers(key, &mut scorers),
                    _ => {
                        p.unknown_attribute(key);
                        p.take_value(key, TokenKind::RBracket);
                    }
                }
            });
        }

        Some(Match {
            team_a: team_a?.lexeme.clone(),
            team_b: team_b?.lexeme.clone(),
            result,
            scorers,
            line: keyword.line,
        })
    }

    /// `goleadores: [ goleador: name [minuto: n]?, "name", ... ]` or the
    /// single-scorer form `goleadores: name`.
    fn parse_scorers(&mut self, key: &'a Token, scorers: &mut Vec<Scorer>) {
        if !self.eat(TokenKind::LBracket) {
            if let Some(name) = self.take_value_of(
                key,
                TokenKind::RBracket,
                &[TokenKind::String, TokenKind::Identifier],
            ) {
                scorers.push(Scorer {
                    player_name: name.lexeme.clone(),
                    minute: None,
                });
            }
            return;
        }

        self.parse_list(TokenKind::RBracket, "scorer list", |p, token| {
            match token.kind {
                TokenKind::Reserved if token.lexeme == "goleador" => {
                    if let Some(scorer) = p.parse_scorer(token) {
                        scorers.push(scorer);
                    }
                    true
                }
                TokenKind::String | TokenKind::Identifier => {
                    p.advance();
                    scorers.push(Scorer {
                        player_name: token.lexeme.clone(),
                        minute: None,
                    });
                    true
                }
                _ => false,
            }
        });
    }

    fn parse_scorer(&mut self, keyword: &'a Token) -> Option<Scorer> {
        self.advance();
        self.expect_colon_after(keyword);
        let name = self.take_name("scorer name");

        let mut minute = None;
        if self.eat(TokenKind::LBracket) {
            self.parse_pairs(TokenKind::RBracket, "scorer attributes", |p, key| {
                if key.lexeme != "minuto" {
                    p.unknown_attribute(key);
                }
                if let Some(value) = p.take_value(key, TokenKind::RBracket) {
                    if key.lexeme == "minuto" {
                        minute = Some(value.lexeme.clone());
                    }
                }
            });
        }

        name.map(|n| Scorer {
            player_name: n.lexeme.clone(),
            minute,
        })
    }
}
