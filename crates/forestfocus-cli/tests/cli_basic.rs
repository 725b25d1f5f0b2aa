//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_forestfocus"))
        .args(args)
        .env("FORESTFOCUS_HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(home: &Path, args: &[&str]) -> Value {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("{args:?} printed non-JSON ({e}): {stdout}"))
}

fn connected_home() -> tempfile::TempDir {
    let home = tempfile::tempdir().unwrap();
    let connected = run_json(home.path(), &["wallet", "connect", "0xC0FFEE"]);
    assert_eq!(connected["address"], "0xC0FFEE");
    home
}

#[test]
fn test_timer_status_starts_idle() {
    let home = tempfile::tempdir().unwrap();
    let status = run_json(home.path(), &["timer", "status"]);
    assert_eq!(status["type"], "StateSnapshot");
    assert_eq!(status["state"], "idle");
    assert_eq!(status["kind"], "focus");
    assert_eq!(status["remaining_secs"], 1500);
}

#[test]
fn test_timer_start_pause_reset() {
    let home = tempfile::tempdir().unwrap();
    let started = run_json(home.path(), &["timer", "start"]);
    assert_eq!(started["type"], "TimerStarted");

    let (_, stderr, code) = run_cli(home.path(), &["timer", "select", "long-break"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));

    let paused = run_json(home.path(), &["timer", "pause"]);
    assert_eq!(paused["type"], "TimerPaused");
    let selected = run_json(home.path(), &["timer", "select", "long-break"]);
    assert_eq!(selected["duration_secs"], 900);
    let reset = run_json(home.path(), &["timer", "reset"]);
    assert_eq!(reset["kind"], "long-break");
}

#[test]
fn test_config_get_set_and_validation() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "growth.sapling_at"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "3");

    let set = run_json(home.path(), &["config", "set", "growth.tree_at", "12"]);
    assert_eq!(set["key"], "growth.tree_at");
    assert_eq!(set["value"], "12");
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "growth.tree_at"]);
    assert_eq!(stdout.trim(), "12");

    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "growth.sapling_at", "20"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("growth.sapling_at"));

    let (_, _, code) = run_cli(home.path(), &["config", "get", "nope.nothing"]);
    assert_eq!(code, 1);
}

#[test]
fn test_invalid_config_file_is_refused_until_reset() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("config.toml"), "[growth]\nsapling_at = 0\n").unwrap();

    let (_, stderr, code) = run_cli(home.path(), &["session", "complete"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("config.toml"), "{stderr}");

    let defaults = run_json(home.path(), &["config", "reset"]);
    assert_eq!(defaults["growth"]["sapling_at"], 3);
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "growth.sapling_at"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "3");
}

#[test]
fn test_four_sessions_plant_a_tree() {
    let home = connected_home();
    let mut last = Value::Null;
    for _ in 0..4 {
        last = run_json(home.path(), &["session", "complete"]);
    }
    assert_eq!(last["total_sessions"], 4);
    assert_eq!(last["persisted"], true);
    assert!(last["planted"].is_object());

    let balance = run_json(home.path(), &["coins", "balance"]);
    assert_eq!(balance["balance"], 80);

    let history = run_json(home.path(), &["coins", "history", "-n", "2"]);
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["reason"], "New Tree Planted");

    let forest = run_json(home.path(), &["forest", "list"]);
    assert_eq!(forest.as_array().unwrap().len(), 1);
    assert_eq!(forest[0]["stage"], "seedling");

    let stats = run_json(home.path(), &["stats", "show"]);
    assert_eq!(stats["stats"]["treesPlanted"], 1);

    let report = run_json(home.path(), &["stats", "report", "--range", "month"]);
    assert_eq!(report["report"]["total_sessions"], 4);
    assert_eq!(report["lastSevenDays"].as_array().unwrap().len(), 7);
}

#[test]
fn test_spend_requires_balance() {
    let home = connected_home();
    run_json(home.path(), &["session", "complete"]);

    let (_, stderr, code) = run_cli(home.path(), &["coins", "spend", "50", "Golden Oak"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not enough LeafCoins"));

    let spent = run_json(home.path(), &["coins", "spend", "10", "Sprout"]);
    assert_eq!(spent["balance"], 0);
}

#[test]
fn test_progress_without_wallet_is_not_saved() {
    let home = tempfile::tempdir().unwrap();
    let outcome = run_json(home.path(), &["session", "complete"]);
    assert_eq!(outcome["total_sessions"], 1);
    assert_eq!(outcome["persisted"], false);

    let stats = run_json(home.path(), &["stats", "show"]);
    assert_eq!(stats["stats"]["totalSessions"], 0);
    assert!(stats["identity"].is_null());
}

#[test]
fn test_share_preview() {
    let home = connected_home();
    let preview = run_json(home.path(), &["share", "preview"]);
    assert_eq!(preview["recommended"], "session");
    assert!(preview["chars"].as_u64().unwrap() <= 320);
    assert!(preview["url"]
        .as_str()
        .unwrap()
        .starts_with("https://warpcast.com/~/compose?text="));

    let (_, stderr, code) = run_cli(home.path(), &["share", "preview", "--template", "poem"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("poem"));
}

#[test]
fn test_wallet_disconnect() {
    let home = connected_home();
    let shown = run_json(home.path(), &["wallet", "show"]);
    assert_eq!(shown["connected"], true);
    run_json(home.path(), &["wallet", "disconnect"]);
    let shown = run_json(home.path(), &["wallet", "show"]);
    assert_eq!(shown["connected"], false);
}

#[test]
fn test_completions() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("forestfocus"));
}
