//! torneo-codegen -- bracket graph generation.
//!
//! Renders the elimination bracket of a [`torneo_core::TournamentModel`]
//! as Graphviz DOT text. Rasterising the graph is left to external tools.

pub mod bracket;

pub use bracket::{
    escape_label, generate_bracket_graph, generate_bracket_graph_with, GraphOptions, RankDir,
};
