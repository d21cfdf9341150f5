//! Front-end orchestrator: scan, then build the model.

use crate::ast::TournamentModel;
use crate::error::Diagnostic;
use crate::lexer::{self, Token};
use crate::options::ParseOptions;
use crate::parser;
use serde::Serialize;

/// Everything the front end produces for one source text.
#[derive(Debug, Clone, Serialize)]
pub struct FrontEnd {
    pub tokens: Vec<Token>,
    pub lexical_diagnostics: Vec<Diagnostic>,
    pub model: TournamentModel,
    pub syntax_diagnostics: Vec<Diagnostic>,
}

impl FrontEnd {
    /// Lexical diagnostics first, then syntax diagnostics.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.lexical_diagnostics
            .iter()
            .chain(self.syntax_diagnostics.iter())
    }

    pub fn has_errors(&self) -> bool {
        !self.lexical_diagnostics.is_empty() || !self.syntax_diagnostics.is_empty()
    }
}

pub fn run_front_end(src: &str, options: &ParseOptions) -> FrontEnd {
    let (tokens, lexical_diagnostics) = lexer::scan(src);
    let (model, syntax_diagnostics) = parser::build_model_with(&tokens, options);
    FrontEnd {
        tokens,
        lexical_diagnostics,
        model,
        syntax_diagnostics,
    }
}
