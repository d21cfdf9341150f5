//! AnalysisReport -- standings, scorer events and notable findings.
//!
//! Findings are observations about the model that are not syntax errors:
//! matches still to be played, goals credited to players on no roster,
//! bracket teams with no roster and knockout matches that ended level.

use crate::scorers::{ScorerEvent, UNKNOWN_CLUB};
use crate::standings::Standing;
use serde::Serialize;
use std::collections::BTreeSet;
use torneo_core::{parse_result, Outcome, TournamentModel};

/// Severity level for an analysis finding.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum FindingSeverity {
    Info,
    Warning,
}

/// A notable finding from analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// Short name of the check that produced the finding.
    pub check: String,
    pub severity: FindingSeverity,
    pub message: String,
    /// Team or player the finding is about.
    pub subject: Option<String>,
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub standings: Vec<Standing>,
    pub scorers: Vec<ScorerEvent>,
    pub findings: Vec<Finding>,
}

impl AnalysisReport {
    pub fn new(standings: Vec<Standing>, scorers: Vec<ScorerEvent>) -> Self {
        AnalysisReport {
            standings,
            scorers,
            findings: Vec::new(),
        }
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == FindingSeverity::Warning)
    }

    /// Extract findings from the model the report was computed for.
    pub fn extract_findings(&mut self, model: &TournamentModel) {
        self.findings.clear();

        for (phase, matches) in model.phases() {
            for (index, m) in matches.iter().enumerate() {
                match parse_result(m.result.as_deref()).map(|s| s.outcome()) {
                    // Pending: no result, or one that is not a score
                    None => self.findings.push(Finding {
                        check: "pending".to_string(),
                        severity: FindingSeverity::Info,
                        message: format!(
                            "Match {} vs {} in {} has no result yet",
                            m.team_a, m.team_b, phase
                        ),
                        subject: None,
                        details: Some(serde_json::json!({
                            "phase": phase,
                            "index": index,
                            "line": m.line,
                            "result": m.result,
                        })),
                    }),
                    // Knockout draws leave the bracket without a winner
                    Some(Outcome::Draw) => self.findings.push(Finding {
                        check: "drawn_knockout".to_string(),
                        severity: FindingSeverity::Warning,
                        message: format!(
                            "Match {} vs {} in {} ended level; no team advances",
                            m.team_a, m.team_b, phase
                        ),
                        subject: None,
                        details: Some(serde_json::json!({
                            "phase": phase,
                            "index": index,
                            "line": m.line,
                            "result": m.result,
                        })),
                    }),
                    Some(_) => {}
                }
            }
        }

        // Scorers on no roster, one finding per player
        let mut unrostered: BTreeSet<&str> = BTreeSet::new();
        for event in &self.scorers {
            if event.club == UNKNOWN_CLUB && model.club_of(&event.player).is_none() {
                unrostered.insert(event.player.as_str());
            }
        }
        for player in unrostered {
            let goals = self.scorers.iter().filter(|e| e.player == player).count();
            self.findings.push(Finding {
                check: "unrostered_scorer".to_string(),
                severity: FindingSeverity::Warning,
                message: format!(
                    "Player '{}' scored {} goal(s) but is on no team roster",
                    player, goals
                ),
                subject: Some(player.to_string()),
                details: Some(serde_json::json!({ "goals": goals })),
            });
        }

        // Bracket teams with no EQUIPOS entry
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for (_, matches) in model.phases() {
            for m in matches {
                for name in [m.team_a.as_str(), m.team_b.as_str()] {
                    if model.team(name).is_none() && seen.insert(name) {
                        self.findings.push(Finding {
                            check: "unrostered_team".to_string(),
                            severity: FindingSeverity::Info,
                            message: format!(
                                "Team '{}' plays in the bracket but has no roster",
                                name
                            ),
                            subject: Some(name.to_string()),
                            details: None,
                        });
                    }
                }
            }
        }

        log::debug!("extracted {} finding(s)", self.findings.len());
    }
}
