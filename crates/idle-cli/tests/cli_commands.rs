//! End-to-end tests for the `idle` CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn idle() -> Command {
    Command::cargo_bin("idle").unwrap()
}

/// A catalog with one three-wave stage.
fn test_catalog() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("world.json"),
        r#"{
  "locations": [
    {
      "id": "swamp",
      "biome": "Swamp",
      "difficulty": "Hard",
      "stages": [
        {
          "id": "swamp-1",
          "name": "Murky Shallows",
          "waves": [
            { "id": "leech", "name": "Bog Leech", "level": 3 },
            { "id": "toad", "name": "Mire Toad", "level": 4 },
            { "id": "hag", "name": "Swamp Hag", "level": 6 }
          ],
          "recommendedPower": 250,
          "isFarmable": true
        }
      ]
    }
  ]
}
"#,
    )
    .unwrap();
    dir
}

// ---------------------------------------------------------------------------
// stages
// ---------------------------------------------------------------------------

#[test]
fn stages_lists_builtin_catalog() {
    idle()
        .arg("stages")
        .assert()
        .success()
        .stdout(predicate::str::contains("grasslands-1"))
        .stdout(predicate::str::contains("Guardian Oak"))
        .stdout(predicate::str::contains("2 stages"));
}

#[test]
fn stages_reads_catalog_file() {
    let dir = test_catalog();
    idle()
        .args(["stages", "--data"])
        .arg(dir.path().join("world.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Murky Shallows"))
        .stdout(predicate::str::contains("600"))
        .stdout(predicate::str::contains("1 stages"));
}

#[test]
fn stages_rejects_invalid_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    idle()
        .args(["stages", "--data"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid catalog"));
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_clears_builtin_stage() {
    idle()
        .args(["run", "--stage", "grasslands-1", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Whispering Plains"))
        .stdout(predicate::str::contains("VICTORY"))
        .stdout(predicate::str::contains("300"));
}

#[test]
fn run_verbose_prints_combat_log() {
    idle()
        .args([
            "run",
            "--stage",
            "grasslands-boss",
            "--frame-ms",
            "250",
            "--hero",
            "hero-aurora",
            "--verbose",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Combat Log"))
        .stdout(predicate::str::contains("Formation strikes Oak Sentinel"))
        .stdout(predicate::str::contains("hero-aurora"));
}

#[test]
fn run_is_reproducible_for_a_seed() {
    let output = |seed: &str| {
        idle()
            .args(["run", "--stage", "grasslands-boss", "--verbose", "--seed", seed])
            .env("NO_COLOR", "1")
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(output("99"), output("99"));
}

#[test]
fn run_stops_after_frame_limit() {
    idle()
        .args([
            "run",
            "--stage",
            "grasslands-1",
            "--frames",
            "3",
            "--frame-ms",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("IN PROGRESS"))
        .stdout(predicate::str::contains("not cleared after 3 frames"));
}

#[test]
fn run_unknown_stage_fails() {
    idle()
        .args(["run", "--stage", "nowhere-9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere-9"));
}

#[test]
fn run_rejects_zero_tick_interval() {
    idle()
        .args(["run", "--stage", "grasslands-1", "--tick-ms", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid tick interval"));
}

#[test]
fn run_rejects_too_many_heroes() {
    let mut cmd = idle();
    cmd.args(["run", "--stage", "grasslands-1"]);
    for i in 0..7 {
        cmd.args(["--hero", &format!("hero-{i}")]);
    }
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot place hero 'hero-6'"));
}

#[test]
fn run_uses_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("engine.json");
    fs::write(&path, r#"{ "tick_interval_ms": 0 }"#).unwrap();
    idle()
        .args(["run", "--stage", "grasslands-1", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid tick interval"));
}

#[test]
fn run_flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("engine.json");
    fs::write(&path, r#"{ "tick_interval_ms": 0, "reward_multiplier": 2.0 }"#).unwrap();
    idle()
        .args(["run", "--stage", "grasslands-1", "--tick-ms", "500", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("tick=500ms"))
        .stdout(predicate::str::contains("600"));
}

// ---------------------------------------------------------------------------
// offline
// ---------------------------------------------------------------------------

#[test]
fn offline_caps_elapsed_time() {
    idle()
        .args([
            "offline",
            "--stage",
            "grasslands-1",
            "--elapsed-ms",
            "7200000",
            "--cap-hours",
            "1",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"simulated_ticks\": 3600"))
        .stdout(predicate::str::contains("\"capped\": true"));
}

#[test]
fn offline_table_output() {
    idle()
        .args([
            "offline",
            "--stage",
            "grasslands-boss",
            "--elapsed-ms",
            "60000",
            "--ticks-per-slice",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Guardian Oak"))
        .stdout(predicate::str::contains("120"));
}

#[test]
fn offline_since_timestamp_in_future_credits_nothing() {
    idle()
        .args([
            "offline",
            "--stage",
            "grasslands-1",
            "--since",
            "2999-01-01T00:00:00Z",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"simulated_ticks\": 0"));
}

#[test]
fn offline_rejects_bad_timestamp() {
    idle()
        .args(["offline", "--stage", "grasslands-1", "--since", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --since timestamp"));
}

#[test]
fn offline_requires_a_duration() {
    idle()
        .args(["offline", "--stage", "grasslands-1"])
        .assert()
        .failure();
}

#[test]
fn offline_rejects_zero_ticks_per_slice() {
    idle()
        .args([
            "offline",
            "--stage",
            "grasslands-1",
            "--elapsed-ms",
            "1000",
            "--ticks-per-slice",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid ticks per slice"));
}

// ---------------------------------------------------------------------------
// reward
// ---------------------------------------------------------------------------

#[test]
fn reward_matches_formula() {
    idle()
        .args(["reward", "480"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gold:    1060"))
        .stdout(predicate::str::contains("Essence: 53"));
}

#[test]
fn reward_applies_multiplier() {
    idle()
        .args(["reward", "100", "--multiplier", "1.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gold:    450"));
}
