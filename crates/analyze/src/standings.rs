//! Team standings derived from match results.
//!
//! One row per rostered team, plus rows created on first sight for teams
//! that only appear in the bracket. Results that do not parse as a score
//! count as pending and contribute nothing but the phase reached.

use serde::Serialize;
use std::collections::HashMap;
use torneo_core::{parse_result, phase_rank, Phase, TournamentModel};

/// Aggregated record for a single team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u64,
    pub goals_against: u64,
    pub goal_difference: i64,
    pub points: u32,
    /// Display name of the furthest phase reached; empty if none.
    pub phase_reached: String,
}

#[derive(Default)]
struct Row {
    team: String,
    played: u32,
    won: u32,
    drawn: u32,
    lost: u32,
    goals_for: u64,
    goals_against: u64,
    points: u32,
    rank: u8,
}

impl Row {
    fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for = self.goals_for.saturating_add(u64::from(scored));
        self.goals_against = self.goals_against.saturating_add(u64::from(conceded));
        if scored > conceded {
            self.won += 1;
            self.points += 3;
        } else if scored < conceded {
            self.lost += 1;
        } else {
            self.drawn += 1;
            self.points += 1;
        }
    }

    fn finish(self) -> Standing {
        let phase_reached = Phase::from_rank(self.rank)
            .map(|p| p.display_name().to_string())
            .unwrap_or_default();
        Standing {
            goal_difference: clamp(self.goals_for) - clamp(self.goals_against),
            team: self.team,
            played: self.played,
            won: self.won,
            drawn: self.drawn,
            lost: self.lost,
            goals_for: self.goals_for,
            goals_against: self.goals_against,
            points: self.points,
            phase_reached,
        }
    }
}

fn clamp(goals: u64) -> i64 {
    i64::try_from(goals).unwrap_or(i64::MAX)
}

/// Rows in creation order, indexed by team name.
#[derive(Default)]
struct Table {
    rows: Vec<Row>,
    index: HashMap<String, usize>,
}

impl Table {
    fn row(&mut self, team: &str) -> &mut Row {
        let i = match self.index.get(team) {
            Some(&i) => i,
            None => {
                self.rows.push(Row {
                    team: team.to_string(),
                    ..Row::default()
                });
                self.index.insert(team.to_string(), self.rows.len() - 1);
                self.rows.len() - 1
            }
        };
        &mut self.rows[i]
    }
}

/// Standings ordered by points, then goal difference, then goals for.
/// Remaining ties keep team creation order.
pub fn compute_standings(model: &TournamentModel) -> Vec<Standing> {
    let mut table = Table::default();
    for team in &model.teams {
        table.row(&team.name);
    }

    for (phase, matches) in model.phases() {
        let rank = phase_rank(phase);
        for m in matches {
            for name in [&m.team_a, &m.team_b] {
                let row = table.row(name);
                row.rank = row.rank.max(rank);
            }
            let Some(score) = parse_result(m.result.as_deref()) else {
                continue;
            };
            table.row(&m.team_a).record(score.home, score.away);
            table.row(&m.team_b).record(score.away, score.home);
        }
    }

    let mut standings: Vec<Standing> = table.rows.into_iter().map(Row::finish).collect();
    standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    });
    log::debug!("computed standings for {} team(s)", standings.len());
    standings
}
