use crate::error::{Diagnostic, DiagnosticKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Keywords of the notation, in lowercase. Matching is case-insensitive.
pub const RESERVED_WORDS: &[&str] = &[
    "torneo",
    "equipos",
    "eliminacion",
    "equipo",
    "jugador",
    "partido",
    "resultado",
    "goleadores",
    "cuartos",
    "semifinal",
    "final",
    "nombre",
    "posicion",
    "numero",
    "edad",
    "vs",
    "goleador",
    "minuto",
    "sede",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Keyword; lexeme is lowercased
    Reserved,
    Identifier,
    /// Double-quoted literal; lexeme excludes the quotes
    String,
    Number,
    /// `vs` in any casing; lexeme keeps the original casing
    VersusMarker,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,
    Semicolon,
}

impl TokenKind {
    /// Source text of a punctuation kind.
    pub fn symbol(self) -> Option<char> {
        match self {
            TokenKind::LBrace => Some('{'),
            TokenKind::RBrace => Some('}'),
            TokenKind::LBracket => Some('['),
            TokenKind::RBracket => Some(']'),
            TokenKind::Colon => Some(':'),
            TokenKind::Comma => Some(','),
            TokenKind::Semicolon => Some(';'),
            _ => None,
        }
    }

    fn from_symbol(c: char) -> Option<TokenKind> {
        match c {
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            '[' => Some(TokenKind::LBracket),
            ']' => Some(TokenKind::RBracket),
            ':' => Some(TokenKind::Colon),
            ',' => Some(TokenKind::Comma),
            ';' => Some(TokenKind::Semicolon),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TokenKind::Reserved => "reserved",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::VersusMarker => "vs",
            TokenKind::LBrace => "lbrace",
            TokenKind::RBrace => "rbrace",
            TokenKind::LBracket => "lbracket",
            TokenKind::RBracket => "rbracket",
            TokenKind::Colon => "colon",
            TokenKind::Comma => "comma",
            TokenKind::Semicolon => "semicolon",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
    pub column: u32,
    /// Byte range in the source, including quotes for strings.
    pub span: Range<usize>,
}

impl Token {
    pub fn is_reserved(&self, word: &str) -> bool {
        self.kind == TokenKind::Reserved && self.lexeme == word
    }
}

pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS.contains(&word.to_lowercase().as_str())
}

/// ASCII letters, underscore and the accented Spanish letters.
pub fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
        || c == '_'
        || matches!(
            c,
            'Á' | 'É' | 'Í' | 'Ó' | 'Ú' | 'á' | 'é' | 'í' | 'ó' | 'ú' | 'Ñ' | 'ñ'
        )
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{0C}' | '\u{0B}')
}

struct Scanner<'a> {
    src: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
    line: u32,
    column: u32,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Scanner {
            src,
            chars: src.char_indices().collect(),
            pos: 0,
            line: 1,
            column: 0,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn lookahead(&self) -> Option<char> {
        self.chars.get(self.pos + 1).map(|&(_, c)| c)
    }

    fn offset(&self) -> usize {
        self.chars.get(self.pos).map_or(self.src.len(), |&(o, _)| o)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.current().is_some_and(&pred) {
            self.advance();
        }
    }

    fn push(&mut self, kind: TokenKind, lexeme: String, start: (u32, u32, usize)) {
        let (line, column, offset) = start;
        self.tokens.push(Token {
            kind,
            lexeme,
            line,
            column,
            span: offset..self.offset(),
        });
    }

    fn error(
        &mut self,
        kind: DiagnosticKind,
        text: impl Into<String>,
        description: impl Into<String>,
        start: (u32, u32, usize),
    ) {
        let (line, column, offset) = start;
        self.diagnostics.push(Diagnostic::new(
            kind,
            text,
            description,
            line,
            column,
            offset..self.offset(),
        ));
    }

    fn run(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        while let Some(c) = self.current() {
            let start = (self.line, self.column + 1, self.offset());

            if is_blank(c) {
                self.advance();
                continue;
            }

            if c == '/' && self.lookahead() == Some('/') {
                self.advance_while(|c| c != '\n');
                continue;
            }

            if c == '/' && self.lookahead() == Some('*') {
                self.block_comment(start);
                continue;
            }

            if c == '"' {
                self.string(start);
                continue;
            }

            if c.is_ascii_digit() {
                let from = self.offset();
                self.advance_while(|c| c.is_ascii_digit());
                let lexeme = self.src[from..self.offset()].to_string();
                self.push(TokenKind::Number, lexeme, start);
                continue;
            }

            if is_letter(c) {
                self.word(start);
                continue;
            }

            self.advance();
            if let Some(kind) = TokenKind::from_symbol(c) {
                self.push(kind, c.to_string(), start);
            } else {
                self.error(
                    DiagnosticKind::InvalidToken,
                    c.to_string(),
                    format!("unrecognized character '{}'", c),
                    start,
                );
            }
        }

        log::debug!(
            "scanned {} token(s), {} lexical diagnostic(s)",
            self.tokens.len(),
            self.diagnostics.len()
        );
        (self.tokens, self.diagnostics)
    }

    fn block_comment(&mut self, start: (u32, u32, usize)) {
        self.advance();
        self.advance();
        while let Some(c) = self.current() {
            if c == '*' && self.lookahead() == Some('/') {
                self.advance();
                self.advance();
                return;
            }
            self.advance();
        }
        self.error(
            DiagnosticKind::UnclosedComment,
            "/*",
            "block comment without closing '*/'",
            start,
        );
    }

    fn string(&mut self, start: (u32, u32, usize)) {
        self.advance();
        let from = self.offset();
        loop {
            match self.current() {
                Some('"') => {
                    let lexeme = self.src[from..self.offset()].to_string();
                    self.advance();
                    self.push(TokenKind::String, lexeme, start);
                    return;
                }
                Some('\n') | None => {
                    let partial = self.src[from..self.offset()].to_string();
                    self.error(
                        DiagnosticKind::UnterminatedString,
                        partial,
                        "string without closing quote on the same line",
                        start,
                    );
                    return;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn word(&mut self, start: (u32, u32, usize)) {
        let from = self.offset();
        self.advance_while(|c| is_letter(c) || c.is_ascii_digit());
        let lexeme = &self.src[from..self.offset()];
        let lower = lexeme.to_lowercase();
        if lower == "vs" {
            self.push(TokenKind::VersusMarker, lexeme.to_string(), start);
        } else if RESERVED_WORDS.contains(&lower.as_str()) {
            self.push(TokenKind::Reserved, lower, start);
        } else {
            self.push(TokenKind::Identifier, lexeme.to_string(), start);
        }
    }
}

/// Splits `src` into tokens, collecting lexical diagnostics along the way.
///
/// Scanning never stops early: invalid characters, unclosed comments and
/// unterminated strings are reported and skipped.
pub fn scan(src: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    Scanner::new(src).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        scan(src).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn punctuation_maps_to_kinds() {
        assert_eq!(
            kinds("{ } [ ] : , ;"),
            vec![
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Colon,
                TokenKind::Comma,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn reserved_words_are_lowercased() {
        let (tokens, errors) = scan("TORNEO Equipos eliminacion");
        assert!(errors.is_empty());
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Reserved));
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["torneo", "equipos", "eliminacion"]);
    }

    #[test]
    fn versus_marker_keeps_casing() {
        let (tokens, _) = scan("Vs vs VS");
        assert!(tokens.iter().all(|t| t.kind == TokenKind::VersusMarker));
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["Vs", "vs", "VS"]);
    }

    #[test]
    fn identifiers_accept_spanish_letters() {
        let (tokens, errors) = scan("Peñarol Álvarez_9");
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "Peñarol");
        assert_eq!(tokens[1].lexeme, "Álvarez_9");
    }

    #[test]
    fn numbers_are_digit_runs() {
        let (tokens, _) = scan("90 7a");
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].lexeme, "90");
        assert_eq!(tokens[1].kind, TokenKind::Number);
        assert_eq!(tokens[1].lexeme, "7");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].lexeme, "a");
    }

    #[test]
    fn strings_drop_quotes_and_keep_spans() {
        let src = r#"nombre: "Copa Mundo""#;
        let (tokens, errors) = scan(src);
        assert!(errors.is_empty());
        let s = &tokens[2];
        assert_eq!(s.kind, TokenKind::String);
        assert_eq!(s.lexeme, "Copa Mundo");
        assert_eq!(&src[s.span.clone()], "\"Copa Mundo\"");
    }

    #[test]
    fn positions_are_one_based() {
        let (tokens, _) = scan("torneo {\n  nombre");
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (1, 8));
        assert_eq!((tokens[2].line, tokens[2].column), (2, 3));
    }

    #[test]
    fn comments_are_skipped() {
        let (tokens, errors) = scan("// line\nequipo /* block\n comment */ jugador");
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].lexeme, "jugador");
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn unclosed_comment_is_reported_at_its_start() {
        let (tokens, errors) = scan("equipo\n  /* never closed");
        assert_eq!(tokens.len(), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, DiagnosticKind::UnclosedComment);
        assert_eq!((errors[0].line, errors[0].column), (2, 3));
    }

    #[test]
    fn unterminated_string_discards_partial_token() {
        let (tokens, errors) = scan("\"abc\nequipo");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, DiagnosticKind::UnterminatedString);
        assert_eq!(errors[0].offending_text, "abc");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].lexeme, "equipo");
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn unterminated_string_at_end_of_input() {
        let (tokens, errors) = scan("\"abc");
        assert!(tokens.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].span, 0..4);
    }

    #[test]
    fn invalid_characters_are_reported_and_skipped() {
        let (tokens, errors) = scan("A - B @");
        assert_eq!(tokens.len(), 2);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].offending_text, "-");
        assert_eq!(errors[0].column, 3);
        assert_eq!(errors[1].offending_text, "@");
        assert!(errors
            .iter()
            .all(|e| e.kind == DiagnosticKind::InvalidToken));
    }

    #[test]
    fn lone_slash_is_invalid() {
        let (tokens, errors) = scan("/x");
        assert_eq!(tokens.len(), 1);
        assert_eq!(errors[0].offending_text, "/");
    }

    #[test]
    fn reserved_lookup_is_case_insensitive() {
        assert!(is_reserved("Goleadores"));
        assert!(is_reserved("SEDE"));
        assert!(!is_reserved("estadio"));
    }
}
