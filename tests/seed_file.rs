mod support;

use predicates::str::contains;
use support::{json_stdout, TestBoard};

const CUSTOM_SEED: &str = r#"[
  {
    "id": 21,
    "title": "Bridge resurfacing",
    "description": "Deck and joints",
    "assignee": "Ada Park",
    "dueDate": "03 Feb 25",
    "priority": "High",
    "status": "Not Started",
    "comments": 0,
    "attachments": 1
  },
  {
    "id": 22,
    "title": "School roof",
    "description": "Replace sheeting",
    "assignee": "Sam Reid",
    "dueDate": "14 Mar 25",
    "priority": "Low",
    "status": "To Do",
    "comments": 2,
    "attachments": 0
  }
]"#;

#[test]
fn seed_flag_replaces_builtin_tasks() -> Result<(), Box<dyn std::error::Error>> {
    let board = TestBoard::new();
    let seed = board.write_file("tenders.json", CUSTOM_SEED)?;

    let output = board
        .cmd()
        .arg("--json")
        .arg("--seed")
        .arg(&seed)
        .arg("list")
        .output()?;
    assert!(output.status.success());

    let json = json_stdout(&output);
    let ids: Vec<u64> = json["data"]["tasks"]
        .as_array()
        .expect("tasks")
        .iter()
        .filter_map(|task| task["id"].as_u64())
        .collect();
    assert_eq!(ids, vec![22, 21]);
    Ok(())
}

#[test]
fn seed_from_config_resolves_relative_path() -> Result<(), Box<dyn std::error::Error>> {
    let board = TestBoard::new();
    board.write_file("data/tenders.json", CUSTOM_SEED)?;
    board.write_config("[board]\nseed = \"data/tenders.json\"\n")?;

    board
        .cmd()
        .args(["board", "--search", "roof"])
        .assert()
        .success()
        .stdout(contains("- Total: 1"))
        .stdout(contains("to-do #22 [Low] School roof"));
    Ok(())
}

#[test]
fn seed_env_var_is_honoured() -> Result<(), Box<dyn std::error::Error>> {
    let board = TestBoard::new();
    let seed = board.write_file("tenders.json", CUSTOM_SEED)?;

    board
        .cmd()
        .env("TENDER_BOARD_SEED", &seed)
        .args(["show", "21"])
        .assert()
        .success()
        .stdout(contains("Task 21: Bridge resurfacing"));
    Ok(())
}

#[test]
fn unknown_status_in_seed_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let board = TestBoard::new();
    let seed = board.write_file(
        "bad.json",
        &CUSTOM_SEED.replace("\"Not Started\"", "\"Blocked\""),
    )?;

    board
        .cmd()
        .arg("--seed")
        .arg(&seed)
        .arg("board")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Invalid seed file"));
    Ok(())
}

#[test]
fn duplicate_ids_in_seed_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let board = TestBoard::new();
    let seed = board.write_file("dup.json", &CUSTOM_SEED.replace("\"id\": 22", "\"id\": 21"))?;

    board
        .cmd()
        .arg("--seed")
        .arg(&seed)
        .arg("board")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Duplicate task id: 21"));
    Ok(())
}
