use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Which stage produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Lexical,
    Syntactic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    // Lexical
    UnclosedComment,
    UnterminatedString,
    InvalidToken,
    // Syntactic
    MissingDelimiter,
    MissingValue,
    InvalidValue,
    UnexpectedToken,
    /// Only reported under `Strictness::Strict`.
    UnknownAttribute,
    /// Only reported under `Strictness::Strict`.
    RedeclaredBlock,
}

impl DiagnosticKind {
    pub fn category(self) -> Category {
        match self {
            DiagnosticKind::UnclosedComment
            | DiagnosticKind::UnterminatedString
            | DiagnosticKind::InvalidToken => Category::Lexical,
            _ => Category::Syntactic,
        }
    }

    /// Short label for the "kind" column of an error table.
    pub fn label(self) -> &'static str {
        match self {
            DiagnosticKind::UnclosedComment => "unclosed comment",
            DiagnosticKind::UnterminatedString => "unterminated string",
            DiagnosticKind::InvalidToken => "invalid token",
            DiagnosticKind::MissingDelimiter => "missing delimiter",
            DiagnosticKind::MissingValue => "missing value",
            DiagnosticKind::InvalidValue => "invalid value",
            DiagnosticKind::UnexpectedToken => "unexpected token",
            DiagnosticKind::UnknownAttribute => "unknown attribute",
            DiagnosticKind::RedeclaredBlock => "redeclared block",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A lexical or syntax problem found in the source.
///
/// Diagnostics are accumulated alongside the primary result of each stage;
/// malformed input never aborts the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub offending_text: String,
    pub kind: DiagnosticKind,
    pub description: String,
    pub line: u32,
    pub column: u32,
    /// Byte range of the offending text in the source.
    pub span: Range<usize>,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        offending_text: impl Into<String>,
        description: impl Into<String>,
        line: u32,
        column: u32,
        span: Range<usize>,
    ) -> Self {
        Diagnostic {
            offending_text: offending_text.into(),
            kind,
            description: description.into(),
            line,
            column,
            span,
        }
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Flat JSON row, one key per table column.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "offending_text": self.offending_text,
            "kind":           self.kind.label(),
            "category":       self.category(),
            "description":    self.description,
            "line":           self.line,
            "column":         self.column,
        })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {} ('{}')",
            self.line, self.column, self.kind, self.description, self.offending_text
        )
    }
}
