//! Goal events and per-player totals.

use serde::Serialize;
use std::collections::HashMap;
use torneo_core::TournamentModel;

/// Club credited to a scorer who appears on no roster.
pub const UNKNOWN_CLUB: &str = "Desconocido";

/// A single goal as written in the bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScorerEvent {
    pub player: String,
    pub club: String,
    pub minute: Option<String>,
    /// Phase name the goal was scored in, as stored in the bracket.
    pub phase: String,
}

impl ScorerEvent {
    /// Numeric minute, if the raw text is an integer.
    pub fn minute_value(&self) -> Option<u32> {
        self.minute.as_deref().and_then(|m| m.trim().parse().ok())
    }

    // Numeric minutes first, ascending; everything else after.
    fn minute_key(&self) -> (bool, u32) {
        match self.minute_value() {
            Some(n) => (false, n),
            None => (true, 0),
        }
    }
}

/// Every scorer entry of every match, ordered by player then minute.
pub fn collect_scorers(model: &TournamentModel) -> Vec<ScorerEvent> {
    let mut events = Vec::new();
    for (phase, matches) in model.phases() {
        for m in matches {
            for scorer in &m.scorers {
                events.push(ScorerEvent {
                    player: scorer.player_name.clone(),
                    club: model
                        .club_of(&scorer.player_name)
                        .unwrap_or(UNKNOWN_CLUB)
                        .to_string(),
                    minute: scorer.minute.clone(),
                    phase: phase.to_string(),
                });
            }
        }
    }
    events.sort_by(|a, b| {
        a.player
            .cmp(&b.player)
            .then_with(|| a.minute_key().cmp(&b.minute_key()))
    });
    log::debug!("collected {} scorer event(s)", events.len());
    events
}

/// Goals grouped by player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScorerTally {
    pub player: String,
    pub club: String,
    pub goals: u32,
    /// Raw minutes in event order; events without a minute are omitted.
    pub minutes: Vec<String>,
}

/// Sums events per player, most goals first, then by name.
pub fn tally_scorers(events: &[ScorerEvent]) -> Vec<ScorerTally> {
    let mut tallies: Vec<ScorerTally> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for event in events {
        let i = *index.entry(event.player.as_str()).or_insert_with(|| {
            tallies.push(ScorerTally {
                player: event.player.clone(),
                club: event.club.clone(),
                goals: 0,
                minutes: Vec::new(),
            });
            tallies.len() - 1
        });
        let tally = &mut tallies[i];
        tally.goals += 1;
        if let Some(minute) = &event.minute {
            tally.minutes.push(minute.clone());
        }
    }
    tallies.sort_by(|a, b| b.goals.cmp(&a.goals).then_with(|| a.player.cmp(&b.player)));
    tallies
}
