//! CLI integration tests for all subcommands.
//!
//! Uses `assert_cmd` to spawn the `torneo` binary and verify
//! exit codes, stdout content, and stderr content.
//!
//! All tests set `current_dir` to the workspace root so that relative
//! paths to the fixtures resolve correctly.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/cli -> workspace root is two levels up
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

/// Helper: create a Command for the `torneo` binary, rooted at workspace.
fn torneo() -> Command {
    let mut cmd = cargo_bin_cmd!("torneo");
    cmd.current_dir(workspace_root());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_json(args: &[&str]) -> serde_json::Value {
    let output = torneo().args(args).output().expect("run torneo");
    assert!(output.status.success(), "{:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    torneo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Tournament bracket notation toolchain",
        ));
}

#[test]
fn version_exits_0() {
    torneo()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("torneo"));
}

#[test]
fn missing_subcommand_fails() {
    torneo().assert().failure();
}

// ──────────────────────────────────────────────
// 2. tokens
// ──────────────────────────────────────────────

#[test]
fn tokens_prints_a_table() {
    torneo()
        .args(["tokens", "fixtures/copa_mundo.torneo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LEXEME"))
        .stdout(predicate::str::contains("Copa Mundo"))
        .stdout(predicate::str::contains("token(s)"));
}

#[test]
fn tokens_json_has_positions() {
    let json = stdout_json(&["--output", "json", "tokens", "fixtures/copa_mundo.torneo"]);
    let first = &json["tokens"][0];
    assert_eq!(first["kind"], "Reserved");
    assert_eq!(first["lexeme"], "torneo");
    assert_eq!(first["line"], 2);
    assert_eq!(first["column"], 1);
    assert_eq!(json["diagnostics"].as_array().map(Vec::len), Some(0));
}

#[test]
fn tokens_lists_lexical_problems_only() {
    let json = stdout_json(&["--output", "json", "tokens", "fixtures/malformed.torneo"]);
    let diags = json["diagnostics"].as_array().expect("array");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0]["kind"], "invalid token");
    assert_eq!(diags[0]["offending_text"], "@");
    assert_eq!(diags[0]["line"], 11);
}

// ──────────────────────────────────────────────
// 3. check
// ──────────────────────────────────────────────

#[test]
fn check_clean_file_exits_0() {
    torneo()
        .args(["check", "fixtures/copa_sur.torneo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No problems found."));
}

#[test]
fn check_malformed_file_exits_1() {
    torneo()
        .args(["check", "fixtures/malformed.torneo"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("missing value"))
        .stdout(predicate::str::contains("missing delimiter"))
        .stdout(predicate::str::contains("invalid token"));
}

#[test]
fn check_quiet_prints_nothing() {
    torneo()
        .args(["--quiet", "check", "fixtures/malformed.torneo"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn check_json_reports_clean_flag() {
    let output = torneo()
        .args(["--output", "json", "check", "fixtures/malformed.torneo"])
        .output()
        .expect("run torneo");
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("JSON");
    assert_eq!(json["clean"], false);
    assert!(json["diagnostics"].as_array().map_or(0, Vec::len) >= 3);
}

#[test]
fn check_strict_config_reports_redeclaration() {
    torneo()
        .args(["check", "fixtures/redeclared.torneo"])
        .assert()
        .success();
    torneo()
        .args([
            "--config",
            "fixtures/strict.toml",
            "check",
            "fixtures/redeclared.torneo",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("redeclared block"));
}

#[test]
fn missing_file_exits_1_with_error() {
    torneo()
        .args(["check", "fixtures/does_not_exist.torneo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not read"));
}

#[test]
fn missing_file_error_as_json() {
    torneo()
        .args(["--output", "json", "model", "fixtures/does_not_exist.torneo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("\"error\""));
}

// ──────────────────────────────────────────────
// 4. model
// ──────────────────────────────────────────────

#[test]
fn model_text_summary() {
    torneo()
        .args(["model", "fixtures/copa_sur.torneo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Torneo: Copa del Sur"))
        .stdout(predicate::str::contains("Equipos (8)"))
        .stdout(predicate::str::contains("Leones vs Tigres  2-1"));
}

#[test]
fn model_json_matches_scenario() {
    let json = stdout_json(&["--output", "json", "model", "fixtures/copa_mundo.torneo"]);
    assert_eq!(json["metadata"]["nombre"], "Copa Mundo");
    assert_eq!(json["teams"].as_array().map(Vec::len), Some(2));
    let cuartos = &json["elimination_bracket"]["cuartos"];
    assert_eq!(cuartos.as_array().map(Vec::len), Some(1));
    assert_eq!(cuartos[0]["result"], "3-1");
    assert_eq!(cuartos[0]["scorers"][0]["player_name"], "X");
}

#[test]
fn model_keep_first_config() {
    let json = stdout_json(&[
        "--config",
        "fixtures/keep_first.toml",
        "--output",
        "json",
        "model",
        "fixtures/redeclared.torneo",
    ]);
    assert_eq!(json["metadata"]["nombre"], "Primera");

    let json = stdout_json(&["--output", "json", "model", "fixtures/redeclared.torneo"]);
    assert_eq!(json["metadata"]["nombre"], "Segunda");
}

#[test]
fn model_of_malformed_file_warns_but_succeeds() {
    torneo()
        .args(["model", "fixtures/malformed.torneo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Torneo: Copa Rota"))
        .stdout(predicate::str::contains("Tigres"))
        .stderr(predicate::str::contains("warning: source has 3 problem(s)"));
}

#[test]
fn json_model_of_malformed_file_warns_in_json() {
    let output = torneo()
        .args(["--output", "json", "model", "fixtures/malformed.torneo"])
        .output()
        .expect("failed to run torneo");
    assert!(output.status.success());
    let model: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(model["metadata"]["nombre"], "Copa Rota");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("warning: "), "plain-text warning in: {}", stderr);
    let warning: serde_json::Value =
        serde_json::from_str(stderr.trim()).expect("stderr should be JSON");
    assert_eq!(warning["problems"], 3);
    assert!(warning["warning"]
        .as_str()
        .is_some_and(|w| w.contains("3 problem(s)")));
}

#[test]
fn invalid_config_exits_1() {
    let dir = TempDir::new().expect("temp dir");
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[parser]\nstrictness = \"paranoid\"\n").expect("write config");
    torneo()
        .args(["--config"])
        .arg(&config)
        .args(["model", "fixtures/copa_mundo.torneo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid config"));
}

// ──────────────────────────────────────────────
// 5. stats
// ──────────────────────────────────────────────

#[test]
fn stats_text_tables() {
    torneo()
        .args(["stats", "fixtures/copa_sur.torneo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Standings"))
        .stdout(predicate::str::contains("Scorers"))
        .stdout(predicate::str::contains("[warning]"))
        .stdout(predicate::str::contains("Halcones vs Toros"));
}

#[test]
fn stats_json_orders_standings_and_tallies() {
    let json = stdout_json(&["--output", "json", "stats", "fixtures/copa_sur.torneo"]);

    let teams: Vec<_> = json["standings"]
        .as_array()
        .expect("standings")
        .iter()
        .map(|s| s["team"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(
        teams,
        vec!["Leones", "Lobos", "Osos", "Halcones", "Toros", "Tigres", "Pumas", "Zorros"]
    );
    assert_eq!(json["standings"][0]["points"], 6);
    assert_eq!(json["standings"][0]["phase_reached"], "Final");
    assert_eq!(json["standings"][2]["phase_reached"], "Semifinal");

    assert_eq!(json["tallies"][0]["player"], "Fio");
    assert_eq!(json["tallies"][0]["goals"], 3);
    assert_eq!(json["tallies"][1]["player"], "Ana");
    assert_eq!(json["scorers"].as_array().map(Vec::len), Some(8));

    let checks: Vec<_> = json["findings"]
        .as_array()
        .expect("findings")
        .iter()
        .map(|f| f["check"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(checks, vec!["drawn_knockout", "pending", "pending"]);
}

#[test]
fn stats_scenario_scorer() {
    let json = stdout_json(&["--output", "json", "stats", "fixtures/copa_mundo.torneo"]);
    assert_eq!(json["standings"][0]["team"], "A");
    assert_eq!(json["standings"][0]["points"], 3);
    assert_eq!(json["standings"][0]["goal_difference"], 2);
    assert_eq!(json["scorers"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["scorers"][0]["player"], "X");
}

// ──────────────────────────────────────────────
// 6. bracket
// ──────────────────────────────────────────────

#[test]
fn bracket_to_stdout() {
    torneo()
        .args(["bracket", "fixtures/copa_sur.torneo"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph bracket {"))
        .stdout(predicate::str::contains("rankdir=LR;"))
        .stdout(predicate::str::contains("subgraph cluster_semifinal {"))
        .stdout(predicate::str::contains(
            "cuartos_1_B -> semifinal_0_B [style=bold];",
        ))
        .stdout(predicate::str::contains("semifinal_0_A -> final_0_A [style=bold];"));
}

#[test]
fn bracket_to_file_top_down() {
    let dir = TempDir::new().expect("temp dir");
    let out = dir.path().join("bracket.dot");
    torneo()
        .args(["bracket", "fixtures/copa_mundo.torneo", "--top-down", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote"));

    let dot = fs::read_to_string(&out).expect("read dot");
    assert!(dot.contains("rankdir=TB;"));
    assert_eq!(dot.matches("subgraph cluster_").count(), 1);
    assert!(!dot.contains("style=bold"));
}

#[test]
fn bracket_layout_from_config() {
    torneo()
        .args([
            "--config",
            "fixtures/keep_first.toml",
            "bracket",
            "fixtures/copa_mundo.torneo",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("rankdir=TB;"));
}

#[test]
fn bracket_unwritable_path_exits_1() {
    torneo()
        .args([
            "bracket",
            "fixtures/copa_mundo.torneo",
            "--out",
            "no_such_dir/inner/bracket.dot",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not write"));
}

// ──────────────────────────────────────────────
// 7. report
// ──────────────────────────────────────────────

#[test]
fn report_text_has_every_section() {
    torneo()
        .args(["report", "fixtures/copa_mundo.torneo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("== Problems =="))
        .stdout(predicate::str::contains("== Tournament =="))
        .stdout(predicate::str::contains("== Stats =="))
        .stdout(predicate::str::contains("== Bracket (DOT) =="))
        .stdout(predicate::str::contains("cuartos_0_M"));
}

#[test]
fn report_json_bundles_everything() {
    let json = stdout_json(&["--output", "json", "report", "fixtures/malformed.torneo"]);
    assert_eq!(json["diagnostics"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["model"]["metadata"]["nombre"], "Copa Rota");
    assert_eq!(json["analysis"]["standings"][0]["team"], "Leones");
    assert!(json["bracket"]
        .as_str()
        .is_some_and(|d| d.starts_with("digraph bracket")));
}

// ──────────────────────────────────────────────
// 8. Logging
// ──────────────────────────────────────────────

#[test]
fn verbose_flag_logs_to_stderr() {
    torneo()
        .args(["-vv", "model", "fixtures/copa_mundo.torneo"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}
