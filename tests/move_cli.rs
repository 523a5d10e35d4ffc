mod support;

use predicates::str::contains;
use support::{json_stdout, TestBoard};

#[test]
fn move_to_completed_updates_counts() -> Result<(), Box<dyn std::error::Error>> {
    let board = TestBoard::new();
    let output = board
        .cmd()
        .args(["--json", "move", "1", "completed"])
        .output()?;
    assert!(output.status.success());

    let json = json_stdout(&output);
    let data = &json["data"];
    assert_eq!(data["outcome"], "moved");
    assert_eq!(data["from"], "to-do");
    assert_eq!(data["to"], "completed");
    assert_eq!(data["task"]["status"], "Completed");
    assert_eq!(data["task"]["priority"], "Low");

    let counts: Vec<(String, u64)> = data["counts"]
        .as_array()
        .expect("counts")
        .iter()
        .map(|entry| {
            (
                entry["lane"].as_str().unwrap_or_default().to_string(),
                entry["count"].as_u64().unwrap_or_default(),
            )
        })
        .collect();
    assert_eq!(
        counts,
        vec![
            ("to-do".to_string(), 2),
            ("in-progress".to_string(), 3),
            ("not-started".to_string(), 3),
            ("completed".to_string(), 4),
        ]
    );
    Ok(())
}

#[test]
fn move_to_same_lane_is_noop() {
    let board = TestBoard::new();
    board
        .cmd()
        .args(["move", "5", "in-progress"])
        .assert()
        .success()
        .stdout(contains("Task not moved"))
        .stdout(contains("- In Progress: 3"));
}

#[test]
fn move_does_not_persist() -> Result<(), Box<dyn std::error::Error>> {
    let board = TestBoard::new();
    board.cmd().args(["move", "7", "to-do"]).assert().success();

    let output = board.cmd().args(["--json", "show", "7"]).output()?;
    assert_eq!(json_stdout(&output)["data"]["task"]["status"], "Not Started");
    Ok(())
}

#[test]
fn move_to_unknown_lane_is_rejected() {
    let board = TestBoard::new();
    board
        .cmd()
        .args(["move", "1", "archived"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Unknown lane: archived"))
        .stderr(contains("hint: tender-board lanes"));
}

#[test]
fn move_missing_task_is_rejected() {
    let board = TestBoard::new();
    board
        .cmd()
        .args(["move", "42", "completed"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn move_lane_id_with_padding_is_rejected() {
    let board = TestBoard::new();
    board
        .cmd()
        .args(["move", "1", " completed "])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Unknown lane:  completed "));
}
