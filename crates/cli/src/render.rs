//! Plain-text tables for terminal output.

use std::fmt::{self, Write};

use torneo_analyze::{AnalysisReport, FindingSeverity, ScorerTally, Standing};
use torneo_core::{Diagnostic, Token, TournamentModel};

fn render(f: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    f(&mut out).expect("String write never fails");
    out
}

/// Left-aligned columns sized to their widest cell.
struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(headers: &[&'static str]) -> Self {
        Table {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn write(&self, w: &mut String) -> fmt::Result {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        write_line(w, self.headers.iter().copied(), &widths)?;
        let rule: Vec<String> = widths.iter().map(|&n| "-".repeat(n)).collect();
        write_line(w, rule.iter().map(String::as_str), &widths)?;
        for row in &self.rows {
            write_line(w, row.iter().map(String::as_str), &widths)?;
        }
        Ok(())
    }
}

fn write_line<'c>(
    w: &mut String,
    cells: impl Iterator<Item = &'c str>,
    widths: &[usize],
) -> fmt::Result {
    let mut text = String::new();
    for (cell, width) in cells.zip(widths) {
        write!(text, "{:<width$}  ", cell, width = width)?;
    }
    writeln!(w, "  {}", text.trim_end())
}

pub(crate) fn tokens_table(tokens: &[Token]) -> String {
    render(|w| {
        let mut table = Table::new(&["LINE", "COL", "KIND", "LEXEME"]);
        for t in tokens {
            table.row(vec![
                t.line.to_string(),
                t.column.to_string(),
                t.kind.to_string(),
                t.lexeme.clone(),
            ]);
        }
        table.write(w)?;
        writeln!(w, "{} token(s)", tokens.len())
    })
}

pub(crate) fn diagnostics_table<'a>(
    diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
) -> String {
    render(|w| {
        let mut table = Table::new(&["LINE", "COL", "CATEGORY", "KIND", "TEXT", "DESCRIPTION"]);
        let mut count = 0;
        for d in diagnostics {
            count += 1;
            table.row(vec![
                d.line.to_string(),
                d.column.to_string(),
                format!("{:?}", d.category()).to_lowercase(),
                d.kind.to_string(),
                d.offending_text.clone(),
                d.description.clone(),
            ]);
        }
        if count == 0 {
            return writeln!(w, "No problems found.");
        }
        table.write(w)?;
        writeln!(w, "{} problem(s)", count)
    })
}

pub(crate) fn model_summary(model: &TournamentModel) -> String {
    render(|w| {
        writeln!(w, "Torneo: {}", model.name().unwrap_or("(sin nombre)"))?;
        for (key, value) in model.metadata.iter().filter(|(k, _)| k.as_str() != "nombre") {
            writeln!(w, "  {}: {}", key, value)?;
        }

        writeln!(w)?;
        writeln!(w, "Equipos ({})", model.teams.len())?;
        for team in &model.teams {
            writeln!(w, "  {} ({} jugador(es))", team.name, team.players.len())?;
            for player in &team.players {
                let attrs: Vec<String> = player
                    .attributes
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect();
                if attrs.is_empty() {
                    writeln!(w, "    - {}", player.name)?;
                } else {
                    writeln!(w, "    - {} [{}]", player.name, attrs.join(", "))?;
                }
            }
        }

        writeln!(w)?;
        writeln!(w, "Eliminacion")?;
        for (phase, matches) in model.phases() {
            writeln!(w, "  {}:", phase)?;
            for m in matches {
                write!(
                    w,
                    "    {} vs {}  {}",
                    m.team_a,
                    m.team_b,
                    m.result.as_deref().unwrap_or("-")
                )?;
                if !m.scorers.is_empty() {
                    let scorers: Vec<String> = m
                        .scorers
                        .iter()
                        .map(|s| match &s.minute {
                            Some(minute) => format!("{} ({}')", s.player_name, minute),
                            None => s.player_name.clone(),
                        })
                        .collect();
                    write!(w, "  goles: {}", scorers.join(", "))?;
                }
                writeln!(w)?;
            }
        }
        Ok(())
    })
}

pub(crate) fn standings_table(standings: &[Standing]) -> String {
    render(|w| {
        let mut table = Table::new(&[
            "#", "TEAM", "P", "W", "D", "L", "GF", "GA", "GD", "PTS", "PHASE",
        ]);
        for (i, s) in standings.iter().enumerate() {
            table.row(vec![
                (i + 1).to_string(),
                s.team.clone(),
                s.played.to_string(),
                s.won.to_string(),
                s.drawn.to_string(),
                s.lost.to_string(),
                s.goals_for.to_string(),
                s.goals_against.to_string(),
                format!("{:+}", s.goal_difference),
                s.points.to_string(),
                s.phase_reached.clone(),
            ]);
        }
        table.write(w)
    })
}

pub(crate) fn scorers_table(tallies: &[ScorerTally]) -> String {
    render(|w| {
        if tallies.is_empty() {
            return writeln!(w, "No goals recorded.");
        }
        let mut table = Table::new(&["PLAYER", "CLUB", "GOALS", "MINUTES"]);
        for t in tallies {
            table.row(vec![
                t.player.clone(),
                t.club.clone(),
                t.goals.to_string(),
                t.minutes.join(", "),
            ]);
        }
        table.write(w)
    })
}

pub(crate) fn stats_report(report: &AnalysisReport, tallies: &[ScorerTally]) -> String {
    render(|w| {
        writeln!(w, "Standings")?;
        w.push_str(&standings_table(&report.standings));
        writeln!(w)?;
        writeln!(w, "Scorers")?;
        w.push_str(&scorers_table(tallies));
        if !report.findings.is_empty() {
            writeln!(w)?;
            writeln!(w, "Findings")?;
            for f in &report.findings {
                let tag = match f.severity {
                    FindingSeverity::Info => "info",
                    FindingSeverity::Warning => "warning",
                };
                writeln!(w, "  [{}] {}", tag, f.message)?;
            }
        }
        Ok(())
    })
}
