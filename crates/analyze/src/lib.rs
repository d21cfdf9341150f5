//! torneo-analyze -- stats engine for tournament models.
//!
//! Consumes a [`TournamentModel`] built by `torneo-core` and derives team
//! standings, the ordered list of goal events and a set of findings.
//! Nothing here fails: an empty or partially built model yields empty or
//! zeroed output.

pub mod report;
pub mod scorers;
pub mod standings;

pub use report::{AnalysisReport, Finding, FindingSeverity};
pub use scorers::{collect_scorers, tally_scorers, ScorerEvent, ScorerTally, UNKNOWN_CLUB};
pub use standings::{compute_standings, Standing};

use torneo_core::TournamentModel;

/// Standings and scorer events for `model`.
pub fn compute_stats(model: &TournamentModel) -> (Vec<Standing>, Vec<ScorerEvent>) {
    (compute_standings(model), collect_scorers(model))
}

/// Run the stats engine and extract findings.
pub fn analyze(model: &TournamentModel) -> AnalysisReport {
    let (standings, scorers) = compute_stats(model);
    let mut report = AnalysisReport::new(standings, scorers);
    report.extract_findings(model);
    report
}
