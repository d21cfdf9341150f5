//! Tolerant recursive-descent model builder.
//!
//! Consumes the scanner's tokens and fills a `TournamentModel`. Problems are
//! recorded as diagnostics and the parser resynchronizes by skipping one
//! token at a time, so every call terminates with a (possibly partial) model.

use crate::ast::{Match, TournamentModel};
use crate::error::{Diagnostic, DiagnosticKind};
use crate::lexer::{Token, TokenKind};
use crate::options::{ParseOptions, RedeclarationPolicy};
use std::collections::BTreeMap;
use std::ops::Range;

mod bracket;
mod teams;
mod tournament;

/// Token kinds accepted as the value of a `key: value` pair.
const VALUE_KINDS: &[TokenKind] = &[TokenKind::String, TokenKind::Number, TokenKind::Identifier];

/// Token kinds accepted wherever a team, player or scorer name is expected.
const NAME_KINDS: &[TokenKind] = &[TokenKind::String, TokenKind::Identifier];

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    options: ParseOptions,
    model: TournamentModel,
    diagnostics: Vec<Diagnostic>,
    metadata_declared: bool,
    /// Index of the last token dropped by `skip_unexpected`.
    last_skip: Option<usize>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], options: &ParseOptions) -> Self {
        Parser {
            tokens,
            pos: 0,
            options: *options,
            model: TournamentModel::default(),
            diagnostics: Vec::new(),
            metadata_declared: false,
            last_skip: None,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let t = self.tokens.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    /// Consumes the next token only if it has the given kind.
    fn expect_kind(&mut self, kind: TokenKind) -> Option<&'a Token> {
        if self.at(kind) {
            self.advance()
        } else {
            None
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        self.expect_kind(kind).is_some()
    }

    // -- Diagnostics ----------------------------------------

    /// Position of the current token, or of the last token at end of input.
    fn here(&self) -> (String, u32, u32, Range<usize>) {
        match self.peek() {
            Some(t) => (t.lexeme.clone(), t.line, t.column, t.span.clone()),
            None => match self.tokens.last() {
                Some(t) => (
                    "end of input".to_owned(),
                    t.line,
                    t.column,
                    t.span.end..t.span.end,
                ),
                None => ("end of input".to_owned(), 1, 1, 0..0),
            },
        }
    }

    fn error_here(&mut self, kind: DiagnosticKind, description: impl Into<String>) {
        let (text, line, column, span) = self.here();
        self.diagnostics
            .push(Diagnostic::new(kind, text, description, line, column, span));
    }

    fn error_at(&mut self, token: &Token, kind: DiagnosticKind, description: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(
            kind,
            token.lexeme.clone(),
            description,
            token.line,
            token.column,
            token.span.clone(),
        ));
    }

    /// Resync-by-skip: drops exactly one token. Only the first token of a
    /// run of consecutive skips is reported.
    fn skip_unexpected(&mut self, context: &str) {
        let index = self.pos;
        let Some(token) = self.advance() else {
            return;
        };
        log::trace!("skipping '{}' in {}", token.lexeme, context);
        let continues_run = index > 0 && self.last_skip == Some(index - 1);
        self.last_skip = Some(index);
        if !continues_run {
            self.error_at(
                token,
                DiagnosticKind::UnexpectedToken,
                format!("unexpected '{}' in {}", token.lexeme, context),
            );
        }
    }

    fn expect_colon_after(&mut self, keyword: &Token) {
        if !self.eat(TokenKind::Colon) {
            self.error_here(
                DiagnosticKind::MissingDelimiter,
                format!("expected ':' after '{}'", keyword.lexeme),
            );
        }
    }

    /// Consumes the `{` that opens a top-level block.
    fn open_block(&mut self, keyword: &Token) -> bool {
        if self.eat(TokenKind::LBrace) {
            return true;
        }
        self.error_here(
            DiagnosticKind::MissingDelimiter,
            format!("expected '{{' after '{}'", keyword.lexeme),
        );
        false
    }

    fn take_name(&mut self, what: &str) -> Option<&'a Token> {
        match self.peek() {
            Some(t) if NAME_KINDS.contains(&t.kind) => self.advance(),
            _ => {
                self.error_here(DiagnosticKind::MissingValue, format!("expected {}", what));
                None
            }
        }
    }

    fn take_value(&mut self, key: &Token, close: TokenKind) -> Option<&'a Token> {
        self.take_value_of(key, close, VALUE_KINDS)
    }

    /// Takes the value of `key`. A closer, comma or end of input means the
    /// value is missing; any other wrong token is an invalid value and is
    /// skipped.
    fn take_value_of(
        &mut self,
        key: &Token,
        close: TokenKind,
        kinds: &[TokenKind],
    ) -> Option<&'a Token> {
        match self.peek() {
            Some(t) if kinds.contains(&t.kind) => self.advance(),
            Some(t) if t.kind != close && t.kind != TokenKind::Comma => {
                self.error_at(
                    t,
                    DiagnosticKind::InvalidValue,
                    format!("invalid value '{}' for '{}'", t.lexeme, key.lexeme),
                );
                self.advance();
                None
            }
            _ => {
                self.error_here(
                    DiagnosticKind::MissingValue,
                    format!("missing value for '{}'", key.lexeme),
                );
                None
            }
        }
    }

    fn unknown_attribute(&mut self, key: &Token) {
        if self.options.is_strict() {
            self.error_at(
                key,
                DiagnosticKind::UnknownAttribute,
                format!("unknown attribute '{}' ignored", key.lexeme),
            );
        }
    }

    // -- Generic list routines ------------------------------

    /// Runs `item` on each element until `close`. Commas between elements are
    /// optional. `item` returns false for tokens it does not recognize, which
    /// are then skipped. The start of another top-level block ends the list
    /// early with a missing-delimiter diagnostic.
    fn parse_list<F>(&mut self, close: TokenKind, context: &str, mut item: F)
    where
        F: FnMut(&mut Self, &'a Token) -> bool,
    {
        let closer = close.symbol().unwrap_or('?');
        loop {
            let Some(token) = self.peek() else {
                self.error_here(
                    DiagnosticKind::MissingDelimiter,
                    format!("expected '{}' to close {}", closer, context),
                );
                return;
            };
            if token.kind == close {
                self.advance();
                return;
            }
            if token.kind == TokenKind::Comma {
                self.advance();
                continue;
            }
            if self.starts_block() {
                self.error_here(
                    DiagnosticKind::MissingDelimiter,
                    format!("expected '{}' to close {}", closer, context),
                );
                return;
            }
            if !item(self, token) {
                self.skip_unexpected(context);
            }
        }
    }

    /// Parses `key : value` pairs until `close`. The key is a reserved word
    /// or identifier; `value` is called after the colon and decides how the
    /// value is read.
    fn parse_pairs<F>(&mut self, close: TokenKind, context: &str, mut value: F)
    where
        F: FnMut(&mut Self, &'a Token),
    {
        self.parse_list(close, context, |p, key| {
            if !matches!(key.kind, TokenKind::Reserved | TokenKind::Identifier) {
                return false;
            }
            p.advance();
            if !p.eat(TokenKind::Colon) {
                p.error_here(
                    DiagnosticKind::MissingDelimiter,
                    format!("expected ':' after '{}'", key.lexeme),
                );
                if p.peek().is_some_and(|t| t.kind != close) {
                    p.advance();
                }
                return true;
            }
            value(p, key);
            true
        });
    }

    // -- Top level ------------------------------------------

    fn parse_document(&mut self) {
        while let Some(token) = self.peek() {
            match (token.kind, token.lexeme.as_str()) {
                (TokenKind::Reserved, "torneo") => self.parse_tournament(token),
                (TokenKind::Reserved, "equipos") => self.parse_teams(token),
                (TokenKind::Reserved, "eliminacion") => self.parse_bracket(token),
                _ => self.skip_unexpected("document"),
            }
        }
    }

    // -- Redeclaration policy -------------------------------

    fn redeclared(&mut self, keyword: &Token, what: &str) {
        if self.options.is_strict() {
            self.error_at(
                keyword,
                DiagnosticKind::RedeclaredBlock,
                format!("{} declared more than once", what),
            );
        }
    }

    fn store_metadata(&mut self, keyword: &Token, entries: BTreeMap<String, String>) {
        if !self.metadata_declared {
            self.metadata_declared = true;
            self.model.metadata = entries;
            return;
        }
        self.redeclared(keyword, "'torneo' block");
        match self.options.redeclaration {
            RedeclarationPolicy::LastWins => self.model.metadata = entries,
            RedeclarationPolicy::KeepFirst => {}
            RedeclarationPolicy::Merge => self.model.metadata.extend(entries),
        }
    }

    fn store_phase(&mut self, keyword: &Token, matches: Vec<Match>) {
        let name = keyword.lexeme.clone();
        if !self.model.elimination_bracket.contains_key(&name) {
            self.model.elimination_bracket.insert(name, matches);
            return;
        }
        self.redeclared(keyword, &format!("phase '{}'", name));
        match self.options.redeclaration {
            RedeclarationPolicy::LastWins => {
                self.model.elimination_bracket.insert(name, matches);
            }
            RedeclarationPolicy::KeepFirst => {}
            RedeclarationPolicy::Merge => {
                self.model
                    .elimination_bracket
                    .entry(name)
                    .or_default()
                    .extend(matches);
            }
        }
    }
}

fn is_block_keyword(token: &Token) -> bool {
    token.kind == TokenKind::Reserved
        && matches!(token.lexeme.as_str(), "torneo" | "equipos" | "eliminacion")
}

impl Parser<'_> {
    /// A block keyword not used as a `key:` (e.g. `equipos: 8` in metadata).
    fn starts_block(&self) -> bool {
        self.peek().is_some_and(is_block_keyword)
            && self
                .tokens
                .get(self.pos + 1)
                .map_or(true, |t| t.kind != TokenKind::Colon)
    }
}

/// Builds the tournament model with default options.
pub fn build_model(tokens: &[Token]) -> (TournamentModel, Vec<Diagnostic>) {
    build_model_with(tokens, &ParseOptions::default())
}

pub fn build_model_with(
    tokens: &[Token],
    options: &ParseOptions,
) -> (TournamentModel, Vec<Diagnostic>) {
    let mut p = Parser::new(tokens, options);
    p.parse_document();
    log::debug!(
        "built model: {} team(s), {} phase(s), {} syntax diagnostic(s)",
        p.model.teams.len(),
        p.model.elimination_bracket.len(),
        p.diagnostics.len()
    );
    (p.model, p.diagnostics)
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
