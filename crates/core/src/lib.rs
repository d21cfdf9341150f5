//! torneo-core: front end for the tournament bracket notation.
//!
//! Turns source text into tokens, a [`TournamentModel`] and diagnostics.
//! Every stage is a pure function; malformed input is reported as
//! [`Diagnostic`] data and never aborts a run.
//!
//! # Public API
//!
//! - [`scan()`] -- text to tokens plus lexical diagnostics
//! - [`build_model()`] / [`build_model_with()`] -- tokens to model plus
//!   syntax diagnostics
//! - [`parse_score()`] -- best-effort `home-away` result extraction
//! - [`run_front_end()`] -- scan and build in one call

pub mod ast;
pub mod error;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod pipeline;
pub mod score;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{phase_rank, Match, Phase, Player, Scorer, Team, TournamentModel};
pub use error::{Category, Diagnostic, DiagnosticKind};
pub use lexer::{Token, TokenKind};
pub use options::{ParseOptions, RedeclarationPolicy, Strictness};
pub use pipeline::FrontEnd;
pub use score::{Outcome, Score};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use lexer::scan;
pub use parser::{build_model, build_model_with};
pub use pipeline::run_front_end;
pub use score::{parse_result, parse_score};
