//! Graphviz DOT output for the elimination bracket.
//!
//! Layout: one `cluster_<phase>` per known phase present in the model, in
//! bracket order. Each match contributes two team nodes (`<phase>_<i>_A`,
//! `<phase>_<i>_B`) and a match node (`<phase>_<i>_M`). Winners advance to
//! slot `i / 2` of the next present phase, `A` for even `i` and `B` for odd.

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use torneo_core::{parse_result, Match, Outcome, Phase, TournamentModel};

const WINNER_FILL: &str = "palegreen";
const DRAW_FILL: &str = "khaki";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankDir {
    /// Phases flow left to right.
    #[default]
    #[serde(rename = "LR")]
    LeftRight,
    /// Phases flow top to bottom.
    #[serde(rename = "TB")]
    TopBottom,
}

impl RankDir {
    pub fn as_str(self) -> &'static str {
        match self {
            RankDir::LeftRight => "LR",
            RankDir::TopBottom => "TB",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GraphOptions {
    pub rank_dir: RankDir,
}

/// Bracket graph with default options.
pub fn generate_bracket_graph(model: &TournamentModel) -> String {
    generate_bracket_graph_with(model, &GraphOptions::default())
}

pub fn generate_bracket_graph_with(model: &TournamentModel, options: &GraphOptions) -> String {
    BracketPrinter::new(model, options).dump()
}

/// Escapes text for use inside a double-quoted DOT string.
pub fn escape_label(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

fn node_id(phase: Phase, index: usize, slot: char) -> String {
    format!("{}_{}_{}", phase.name(), index, slot)
}

/// Slot of team `a`/`b` that won, if the result names a winner.
fn winner(m: &Match) -> Option<char> {
    match parse_result(m.result.as_deref())?.outcome() {
        Outcome::HomeWin => Some('A'),
        Outcome::AwayWin => Some('B'),
        Outcome::Draw => None,
    }
}

struct BracketPrinter<'a> {
    model: &'a TournamentModel,
    options: &'a GraphOptions,
    /// Known phases present in the model, in bracket order.
    phases: Vec<Phase>,
}

impl<'a> BracketPrinter<'a> {
    fn new(model: &'a TournamentModel, options: &'a GraphOptions) -> Self {
        let phases = Phase::ALL
            .into_iter()
            .filter(|p| model.elimination_bracket.contains_key(p.name()))
            .collect();
        Self {
            model,
            options,
            phases,
        }
    }

    fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        log::debug!(
            "generated bracket graph with {} phase cluster(s)",
            self.phases.len()
        );
        out
    }

    fn format(&self, w: &mut String) -> std::fmt::Result {
        writeln!(w, "digraph bracket {{")?;
        writeln!(w, "    rankdir={};", self.options.rank_dir.as_str())?;
        writeln!(
            w,
            "    node [shape=box, style=\"rounded,filled\", fillcolor=\"white\"];"
        )?;
        if let Some(name) = self.model.name() {
            writeln!(w, "    label=\"{}\";", escape_label(name))?;
            writeln!(w, "    labelloc=t;")?;
        }

        for &phase in &self.phases {
            writeln!(w)?;
            self.format_phase(w, phase)?;
        }

        // Advancement edges go after every cluster so both ends exist
        let mut advancing = Vec::new();
        for (pos, &phase) in self.phases.iter().enumerate() {
            let Some(&next) = self.phases.get(pos + 1) else {
                break;
            };
            let next_matches = self.model.matches(next);
            for (i, m) in self.model.matches(phase).iter().enumerate() {
                let Some(slot) = winner(m) else { continue };
                if i / 2 >= next_matches.len() {
                    continue;
                }
                let target_slot = if i % 2 == 0 { 'A' } else { 'B' };
                advancing.push((node_id(phase, i, slot), node_id(next, i / 2, target_slot)));
            }
        }
        if !advancing.is_empty() {
            writeln!(w)?;
        }
        for (from, to) in advancing {
            writeln!(w, "    {} -> {} [style=bold];", from, to)?;
        }

        writeln!(w, "}}")
    }

    fn format_phase(&self, w: &mut String, phase: Phase) -> std::fmt::Result {
        let matches = self.model.matches(phase);
        writeln!(w, "    subgraph cluster_{} {{", phase.name())?;
        writeln!(w, "        label=\"{}\";", phase.display_name())?;

        let mut team_nodes = Vec::with_capacity(matches.len() * 2);
        for (i, m) in matches.iter().enumerate() {
            let fills = match parse_result(m.result.as_deref()).map(|s| s.outcome()) {
                Some(Outcome::HomeWin) => [Some(WINNER_FILL), None],
                Some(Outcome::AwayWin) => [None, Some(WINNER_FILL)],
                Some(Outcome::Draw) => [Some(DRAW_FILL), Some(DRAW_FILL)],
                None => [None, None],
            };
            let slots = [('A', &m.team_a), ('B', &m.team_b)];
            for ((slot, team), fill) in slots.into_iter().zip(fills) {
                let id = node_id(phase, i, slot);
                write!(w, "        {} [label=\"{}\"", id, escape_label(team))?;
                if let Some(fill) = fill {
                    write!(w, ", fillcolor=\"{}\"", fill)?;
                }
                writeln!(w, "];")?;
                team_nodes.push(id);
            }

            let label = m.result.as_deref().unwrap_or("vs");
            writeln!(
                w,
                "        {} [label=\"{}\", shape=ellipse];",
                node_id(phase, i, 'M'),
                escape_label(label)
            )?;
            for slot in ['A', 'B'] {
                writeln!(
                    w,
                    "        {} -> {} [arrowhead=none];",
                    node_id(phase, i, slot),
                    node_id(phase, i, 'M')
                )?;
            }
        }

        if !team_nodes.is_empty() {
            writeln!(w, "        {{ rank=same; {}; }}", team_nodes.join("; "))?;
        }
        writeln!(w, "    }}")
    }
}
