use super::Parser;
use crate::ast::{Player, Team};
use crate::lexer::{Token, TokenKind};
use std::collections::BTreeMap;

impl<'a> Parser<'a> {
    /// `equipos { equipo: name [ jugador: name [attrs], ... ], ... } ;?`
    pub(super) fn parse_teams(&mut self, keyword: &'a Token) {
        self.advance();
        if !self.open_block(keyword) {
            return;
        }
        let before = self.model.teams.len();
        self.parse_list(TokenKind::RBrace, "'equipos' block", |p, token| {
            if !token.is_reserved("equipo") {
                return false;
            }
            p.parse_team(token);
            true
        });
        self.eat(TokenKind::Semicolon);
        log::debug!(
            "parsed 'equipos' block with {} team(s)",
            self.model.teams.len() - before
        );
    }

    fn parse_team(&mut self, keyword: &'a Token) {
        self.advance();
        self.expect_colon_after(keyword);
        let name = self.take_name("team name");

        let mut players = Vec::new();
        if self.eat(TokenKind::LBracket) {
            self.parse_list(TokenKind::RBracket, "team roster", |p, token| {
                if !token.is_reserved("jugador") {
                    return false;
                }
                if let Some(player) = p.parse_player(token) {
                    players.push(player);
                }
                true
            });
        }

        if let Some(name) = name {
            self.model.teams.push(Team {
                name: name.lexeme.clone(),
                players,
                line: keyword.line,
            });
        }
    }

    fn parse_player(&mut self, keyword: &'a Token) -> Option<Player> {
        self.advance();
        self.expect_colon_after(keyword);
        let name = self.take_name("player name");

        let mut attributes = BTreeMap::new();
        if self.eat(TokenKind::LBracket) {
            self.parse_pairs(TokenKind::RBracket, "player attributes", |p, key| {
                if let Some(value) = p.take_value(key, TokenKind::RBracket) {
                    attributes.insert(key.lexeme.clone(), value.lexeme.clone());
                }
            });
        }

        name.map(|n| Player {
            name: n.lexeme.clone(),
            attributes,
        })
    }
}
