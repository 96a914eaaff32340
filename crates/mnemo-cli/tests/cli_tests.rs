//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mnemo() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("mnemo").unwrap()
}

/// A command isolated from the user's config and data.
fn mnemo_in(dir: &TempDir) -> Command {
    let mut cmd = mnemo();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("MNEMO_DATA_DIR", dir.path().join("data"))
        .env_remove("MNEMO_DIFFICULTY");
    cmd
}

#[test]
fn validate_example_item_set() {
    mnemo()
        .arg("validate")
        .arg("--item-set")
        .arg("../../item-sets/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 items"))
        .stdout(predicate::str::contains("All item sets valid"));
}

#[test]
fn validate_directory() {
    mnemo()
        .arg("validate")
        .arg("--item-set")
        .arg("../../item-sets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Example Item Set"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dupes.toml");
    std::fs::write(
        &path,
        r#"
[item_set]
id = "dupes"
name = "Dupes"

[[items]]
id = "a"
category = "attention"
prompt = "Pick one"
options = ["x", "y"]
expected = { exact = "z" }

[[items]]
id = "a"
category = "attention"
prompt = "Pick again"
expected = { exact = "x" }
"#,
    )
    .unwrap();

    mnemo()
        .arg("validate")
        .arg("--item-set")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[a] WARNING: duplicate item ID"))
        .stdout(predicate::str::contains("2 warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    mnemo()
        .arg("validate")
        .arg("--item-set")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    mnemo_in(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created mnemo.toml"))
        .stdout(predicate::str::contains("Created item-sets/example.toml"));

    assert!(dir.path().join("mnemo.toml").exists());
    assert!(dir.path().join("item-sets/example.toml").exists());

    // the generated files are usable straight away
    mnemo_in(&dir)
        .arg("validate")
        .arg("--item-set")
        .arg("item-sets")
        .assert()
        .success()
        .stdout(predicate::str::contains("All item sets valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    mnemo_in(&dir).arg("init").assert().success();

    mnemo_in(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn generate_is_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();

    let first = mnemo_in(&dir)
        .args(["generate", "--difficulty", "hard", "--seed", "42"])
        .output()
        .unwrap();
    let second = mnemo_in(&dir)
        .args(["generate", "--difficulty", "hard", "--seed", "42"])
        .output()
        .unwrap();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let items: Vec<mnemo_core::model::TestItem> = serde_json::from_slice(&first.stdout).unwrap();
    assert_eq!(items.len(), 5);
    assert!(items
        .iter()
        .all(|i| i.difficulty == mnemo_core::model::Difficulty::Hard));
}

#[test]
fn generate_rejects_unknown_difficulty() {
    mnemo()
        .args(["generate", "--difficulty", "extreme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown difficulty"));
}

#[test]
fn run_reads_answers_from_stdin() {
    let dir = TempDir::new().unwrap();

    mnemo_in(&dir)
        .args(["run", "--item-set", "../../item-sets/example.toml"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .write_stdin("6,1,9,4\nlamp\n15\ncircle\nhammer\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: 100.0%"))
        .stdout(predicate::str::contains("Working Memory"));

    let history = dir.path().join("data").join("history.json");
    assert!(history.exists());
}

#[test]
fn run_without_save_leaves_history_alone() {
    let dir = TempDir::new().unwrap();

    mnemo_in(&dir)
        .args(["run", "--difficulty", "easy", "--seed", "1", "--no-save"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: 0.0%"))
        .stdout(predicate::str::contains("skipped"));

    assert!(!dir.path().join("data").join("history.json").exists());
}

#[test]
fn history_when_empty() {
    let dir = TempDir::new().unwrap();

    mnemo_in(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No sessions recorded yet"));
}

#[test]
fn recommend_without_history_is_medium() {
    let dir = TempDir::new().unwrap();

    mnemo_in(&dir)
        .args(["recommend", "--category", "attention"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recommended difficulty: medium"))
        .stdout(predicate::str::contains("Tip:"));
}

#[test]
fn compare_reports() {
    let dir = TempDir::new().unwrap();

    let baseline = make_session_json(90.0, 80.0);
    let current = make_session_json(40.0, 80.0);

    let baseline_path = dir.path().join("baseline.json");
    let current_path = dir.path().join("current.json");

    std::fs::write(&baseline_path, &baseline).unwrap();
    std::fs::write(&current_path, &current).unwrap();

    mnemo_in(&dir)
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline_path)
        .arg("--current")
        .arg(&current_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 regressions"))
        .stdout(predicate::str::contains("Working Memory 90.0% -> 40.0%"));
}

#[test]
fn compare_markdown_format() {
    let dir = TempDir::new().unwrap();
    let baseline_path = dir.path().join("baseline.json");
    let current_path = dir.path().join("current.json");
    std::fs::write(&baseline_path, make_session_json(50.0, 50.0)).unwrap();
    std::fs::write(&current_path, make_session_json(70.0, 50.0)).unwrap();

    mnemo_in(&dir)
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline_path)
        .arg("--current")
        .arg(&current_path)
        .args(["--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### Improvements"));
}

#[test]
fn compare_nonexistent_report() {
    mnemo()
        .arg("compare")
        .arg("--baseline")
        .arg("no_such_file.json")
        .arg("--current")
        .arg("also_no_file.json")
        .arg("--threshold")
        .arg("5")
        .assert()
        .failure();
}

#[test]
fn report_writes_html() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("progress.html");

    mnemo_in(&dir)
        .arg("report")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("HTML report"));

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("mnemo progress report"));
}

#[test]
fn arena_records_scores_and_unlocks() {
    let dir = TempDir::new().unwrap();

    mnemo_in(&dir)
        .args(["arena", "--game", "nback", "--score", "120"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded 120 points for nback"))
        .stdout(predicate::str::contains("Achievement unlocked: First Steps"))
        .stdout(predicate::str::contains("Level 2"));

    assert!(dir.path().join("data").join("arena.json").exists());

    mnemo_in(&dir)
        .arg("arena")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 games"));
}

#[test]
fn arena_needs_both_game_and_score() {
    mnemo()
        .args(["arena", "--game", "nback"])
        .assert()
        .failure();
}

#[test]
fn profile_from_answers() {
    mnemo()
        .args(["profile", "--answers", "1,1,1,1,1,2,2,4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Primary style: visual"))
        .stdout(predicate::str::contains("Secondary style: auditory"));
}

#[test]
fn profile_rejects_wrong_answer_count() {
    mnemo()
        .args(["profile", "--answers", "1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 8 answers"));
}

#[test]
fn challenge_lifecycle() {
    let dir = TempDir::new().unwrap();

    mnemo_in(&dir)
        .arg("challenge")
        .assert()
        .success()
        .stdout(predicate::str::contains("No active challenges"));

    mnemo_in(&dir)
        .args(["challenge", "start", "--length", "week", "--level", "beginner"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Started challenge 1: 7-Day Memory Kickstart (21 goals over 7 days)",
        ))
        .stdout(predicate::str::contains("[ ] 1-0 Take memory assessment (+15)"));

    mnemo_in(&dir)
        .args(["challenge", "complete", "--challenge", "1", "--goal", "1-0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed goal 1-0: +15 points"))
        .stdout(predicate::str::contains("Level 1 | 15 points | streak 1"))
        .stdout(predicate::str::contains("[x] 1-0"));

    mnemo_in(&dir)
        .args(["challenge", "complete", "--challenge", "1", "--goal", "1-0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already completed"));

    assert!(dir.path().join("data").join("challenges.json").exists());
}

#[test]
fn challenge_rejects_unknown_level() {
    mnemo()
        .args(["challenge", "start", "--level", "expert"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown challenge level"));
}

#[test]
fn tasks_plan_and_complete() {
    let dir = TempDir::new().unwrap();

    mnemo_in(&dir)
        .arg("tasks")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks planned yet"));

    mnemo_in(&dir)
        .args(["tasks", "plan", "--days", "3", "--style", "visual", "--seed", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("over 3 days"))
        .stdout(predicate::str::contains("1-1-technique"))
        .stdout(predicate::str::contains("Today: 0/"));

    mnemo_in(&dir)
        .args(["tasks", "done", "1-1-technique"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed 1-1-technique"))
        .stdout(predicate::str::contains("Today: 1/"))
        .stdout(predicate::str::contains("best streak 1"));

    mnemo_in(&dir)
        .args(["tasks", "done", "1-1-technique"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked 1-1-technique as not done"))
        .stdout(predicate::str::contains("best streak 0"));

    mnemo_in(&dir)
        .args(["tasks", "done", "9-9-nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no task with id"));
}

#[test]
fn help_output() {
    mnemo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Memory training and assessment"));
}

#[test]
fn version_output() {
    mnemo()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mnemo"));
}

/// A minimal session result JSON with two categories.
fn make_session_json(working_memory: f64, attention: f64) -> String {
    format!(
        r#"{{
    "id": "00000000-0000-0000-0000-000000000000",
    "created_at": "2026-01-01T00:00:00Z",
    "difficulty": "medium",
    "category_scores": [
        {{ "category": "working_memory", "correct": 1, "attempted": 2, "percentage": {working_memory} }},
        {{ "category": "attention", "correct": 1, "attempted": 1, "percentage": {attention} }}
    ],
    "overall": {overall},
    "elapsed_ms": 60000
}}"#,
        overall = (working_memory + attention) / 2.0
    )
}
