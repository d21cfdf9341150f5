//! Tournament model produced by the model builder.
//!
//! The model stores what the source says and nothing more: results stay raw
//! strings and attribute values stay raw lexemes. Interpretation happens in
//! the consumers (score parser, stats engine, graph generator).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ──────────────────────────────────────────────
// Phases
// ──────────────────────────────────────────────

/// A stage of the elimination bracket, in bracket order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Cuartos,
    Semifinal,
    Final,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Cuartos, Phase::Semifinal, Phase::Final];

    pub fn from_name(name: &str) -> Option<Phase> {
        match name.to_lowercase().as_str() {
            "cuartos" => Some(Phase::Cuartos),
            "semifinal" => Some(Phase::Semifinal),
            "final" => Some(Phase::Final),
            _ => None,
        }
    }

    /// Key under which the phase is stored in the bracket map.
    pub fn name(self) -> &'static str {
        match self {
            Phase::Cuartos => "cuartos",
            Phase::Semifinal => "semifinal",
            Phase::Final => "final",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Phase::Cuartos => "Cuartos",
            Phase::Semifinal => "Semifinal",
            Phase::Final => "Final",
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Phase::Cuartos => 1,
            Phase::Semifinal => 2,
            Phase::Final => 3,
        }
    }

    pub fn from_rank(rank: u8) -> Option<Phase> {
        Phase::ALL.into_iter().find(|p| p.rank() == rank)
    }

    pub fn next(self) -> Option<Phase> {
        Phase::from_rank(self.rank() + 1)
    }
}

/// Rank of a phase name; 0 for names outside the fixed set.
pub fn phase_rank(name: &str) -> u8 {
    Phase::from_name(name).map_or(0, Phase::rank)
}

// ──────────────────────────────────────────────
// Model
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentModel {
    /// Key/value pairs of the TORNEO block.
    pub metadata: BTreeMap<String, String>,
    /// Teams in source order; names are not deduplicated.
    pub teams: Vec<Team>,
    /// Phase name (lowercase) to its matches in source order.
    pub elimination_bracket: BTreeMap<String, Vec<Match>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
    /// Line of the `equipo` keyword.
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub team_a: String,
    pub team_b: String,
    /// Raw result text, e.g. `"3-1"`. Not validated.
    pub result: Option<String>,
    pub scorers: Vec<Scorer>,
    /// Line of the `partido` keyword.
    pub line: u32,
}

/// One goal credited to a player. Legacy bare-name entries parse with no minute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorer {
    pub player_name: String,
    pub minute: Option<String>,
}

impl TournamentModel {
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty() && self.teams.is_empty() && self.elimination_bracket.is_empty()
    }

    /// Tournament name from the `nombre` metadata key.
    pub fn name(&self) -> Option<&str> {
        self.metadata.get("nombre").map(String::as_str)
    }

    /// Bracket entries in bracket order: known phases first (cuartos,
    /// semifinal, final), then any other names alphabetically.
    pub fn phases(&self) -> impl Iterator<Item = (&str, &[Match])> {
        let known = Phase::ALL.into_iter().filter_map(move |p| {
            self.elimination_bracket
                .get_key_value(p.name())
                .map(|(k, v)| (k.as_str(), v.as_slice()))
        });
        let other = self
            .elimination_bracket
            .iter()
            .filter(|(k, _)| Phase::from_name(k).is_none())
            .map(|(k, v)| (k.as_str(), v.as_slice()));
        known.chain(other)
    }

    pub fn matches(&self, phase: Phase) -> &[Match] {
        self.elimination_bracket
            .get(phase.name())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name == name)
    }

    /// Team of the first roster listing `player`.
    pub fn club_of(&self, player: &str) -> Option<&str> {
        self.teams
            .iter()
            .find(|t| t.players.iter().any(|p| p.name == player))
            .map(|t| t.name.as_str())
    }
}
