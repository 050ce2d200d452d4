//! Integration tests for the `aisle` CLI.
//!
//! Each test creates a temp planning directory, runs `aisle` as a
//! subprocess, and verifies stdout and/or store contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Get the path to the built `aisle` binary.
fn aisle_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("aisle");
    path
}

/// Create a minimal planning directory in the given root.
fn create_planner(root: &Path) {
    let aisle_dir = root.join("aisle");
    fs::create_dir_all(&aisle_dir).unwrap();
    fs::write(
        aisle_dir.join("config.toml"),
        "[planner]\ncouple = \"Test Couple\"\n",
    )
    .unwrap();
}

/// Run `aisle` with the given args in the given directory, returning
/// (stdout, stderr, success).
fn run(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(aisle_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run aisle");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `aisle` expecting success, return stdout.
fn run_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run(dir, args);
    if !success {
        panic!(
            "aisle {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

fn store_json(root: &Path) -> serde_json::Value {
    let content = fs::read_to_string(root.join("aisle/planner.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

// ---------------------------------------------------------------------------
// Init & identity
// ---------------------------------------------------------------------------

#[test]
fn init_creates_planning_directory() {
    let tmp = TempDir::new().unwrap();
    let stdout = run_ok(tmp.path(), &["init", "--couple", "Sam & Riley"]);
    assert!(stdout.contains("Initialized"));
    assert!(tmp.path().join("aisle/config.toml").exists());

    // A second init without --force refuses
    let (_stdout, stderr, success) = run(tmp.path(), &["init"]);
    assert!(!success);
    assert!(stderr.contains("already exists"));
}

#[test]
fn signin_normalizes_and_persists() {
    let tmp = TempDir::new().unwrap();
    create_planner(tmp.path());

    let stdout = run_ok(tmp.path(), &["signin", "  Sam Lee "]);
    assert!(stdout.contains("signed in as sam_lee"));

    let stdout = run_ok(tmp.path(), &["whoami"]);
    assert_eq!(stdout.trim(), "sam_lee");

    let store = store_json(tmp.path());
    assert_eq!(store["wedding_planner_user"], "sam_lee");

    run_ok(tmp.path(), &["signout"]);
    let stdout = run_ok(tmp.path(), &["whoami"]);
    assert!(stdout.contains("not signed in"));
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[test]
fn task_add_done_rm_round_trip() {
    let tmp = TempDir::new().unwrap();
    create_planner(tmp.path());
    run_ok(tmp.path(), &["signin", "sam"]);

    // Starts with the seeded checklist
    let stdout = run_ok(tmp.path(), &["task", "list"]);
    assert!(stdout.contains("Book a venue"));

    let id = run_ok(tmp.path(), &["task", "add", "Taste wedding cakes"]);
    let id = id.trim().to_string();
    // Seeds occupy 0..=6, so the first add gets 7
    assert_eq!(id, "7");

    run_ok(tmp.path(), &["task", "done", &id]);
    let stdout = run_ok(tmp.path(), &["task", "list"]);
    assert!(stdout.contains("[x]   7  Taste wedding cakes"));

    run_ok(tmp.path(), &["task", "rm", &id]);
    let stdout = run_ok(tmp.path(), &["task", "list"]);
    assert!(!stdout.contains("Taste wedding cakes"));

    // Unknown ids fail cleanly
    let (_stdout, stderr, success) = run(tmp.path(), &["task", "done", "99"]);
    assert!(!success);
    assert!(stderr.contains("no task with id 99"));
}

#[test]
fn task_list_json_has_progress() {
    let tmp = TempDir::new().unwrap();
    create_planner(tmp.path());
    run_ok(tmp.path(), &["signin", "sam"]);

    let stdout = run_ok(tmp.path(), &["task", "list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["tasks"].as_array().unwrap().len(), 7);
    assert_eq!(parsed["done"], 2);
    assert_eq!(parsed["progress_percent"], 29);
}

// ---------------------------------------------------------------------------
// Identity isolation & durability
// ---------------------------------------------------------------------------

#[test]
fn data_is_isolated_per_identity() {
    let tmp = TempDir::new().unwrap();
    create_planner(tmp.path());

    run_ok(tmp.path(), &["signin", "sam"]);
    run_ok(tmp.path(), &["task", "add", "Sam's secret task"]);

    run_ok(tmp.path(), &["signin", "riley"]);
    let stdout = run_ok(tmp.path(), &["task", "list"]);
    assert!(!stdout.contains("Sam's secret task"));

    run_ok(tmp.path(), &["signin", "sam"]);
    let stdout = run_ok(tmp.path(), &["task", "list"]);
    assert!(stdout.contains("Sam's secret task"));
}

#[test]
fn anonymous_mutations_are_not_persisted() {
    let tmp = TempDir::new().unwrap();
    create_planner(tmp.path());

    run_ok(tmp.path(), &["task", "add", "Ephemeral task"]);
    let stdout = run_ok(tmp.path(), &["task", "list"]);
    // Each invocation is a fresh process; nothing was stored
    assert!(!stdout.contains("Ephemeral task"));
}

#[test]
fn corrupt_store_value_falls_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    create_planner(tmp.path());
    run_ok(tmp.path(), &["signin", "sam"]);
    run_ok(tmp.path(), &["task", "add", "Will be lost"]);

    // Corrupt just the tasks payload, keeping the store file valid JSON
    let store_path = tmp.path().join("aisle/planner.json");
    let mut store: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&store_path).unwrap()).unwrap();
    store["wedding_tasks_sam"] = serde_json::Value::String("not json {{{".into());
    fs::write(&store_path, serde_json::to_string(&store).unwrap()).unwrap();

    let stdout = run_ok(tmp.path(), &["task", "list"]);
    assert!(stdout.contains("Book a venue"));
    assert!(!stdout.contains("Will be lost"));
}

// ---------------------------------------------------------------------------
// Guests, budget, vendors
// ---------------------------------------------------------------------------

#[test]
fn guest_rsvp_flow() {
    let tmp = TempDir::new().unwrap();
    create_planner(tmp.path());
    run_ok(tmp.path(), &["signin", "sam"]);

    let id = run_ok(
        tmp.path(),
        &["guest", "add", "Nana Rose", "--side", "bride", "--notes", "no shellfish"],
    );
    let id = id.trim().to_string();

    run_ok(tmp.path(), &["guest", "rsvp", &id, "attending"]);
    let stdout = run_ok(tmp.path(), &["guest", "list"]);
    assert!(stdout.contains("Nana Rose"));
    assert!(stdout.contains("no shellfish"));
    assert!(stdout.contains("3 attending"));

    let (_stdout, stderr, success) = run(tmp.path(), &["guest", "rsvp", &id, "maybe"]);
    assert!(!success);
    assert!(stderr.contains("not a status"));
}

#[test]
fn budget_totals_update() {
    let tmp = TempDir::new().unwrap();
    create_planner(tmp.path());
    run_ok(tmp.path(), &["signin", "sam"]);

    let id = run_ok(tmp.path(), &["budget", "add", "Flowers", "1200"]);
    run_ok(tmp.path(), &["budget", "actual", id.trim(), "$1350.25"]);

    let stdout = run_ok(tmp.path(), &["budget", "list"]);
    assert!(stdout.contains("Flowers"));
    assert!(stdout.contains("$1350.25"));

    // Validation: non-positive estimates are rejected
    let (_stdout, stderr, success) = run(tmp.path(), &["budget", "add", "Confetti", "0"]);
    assert!(!success);
    assert!(stderr.contains("positive estimate"));
}

#[test]
fn vendor_directory_booking() {
    let tmp = TempDir::new().unwrap();
    create_planner(tmp.path());
    run_ok(tmp.path(), &["signin", "sam"]);

    let stdout = run_ok(tmp.path(), &["vendor", "directory", "--category", "venue"]);
    assert!(stdout.contains("Elegance Venues"));
    assert!(stdout.contains("The Lakeside Manor"));

    run_ok(tmp.path(), &["vendor", "book", "101"]);
    let stdout = run_ok(tmp.path(), &["vendor", "list"]);
    assert!(stdout.contains("Elegance Venues"));
    assert!(stdout.contains("Contacted"));
}

// ---------------------------------------------------------------------------
// Slideshow bound
// ---------------------------------------------------------------------------

#[test]
fn slideshow_rejects_a_sixth_image() {
    let tmp = TempDir::new().unwrap();
    create_planner(tmp.path());
    run_ok(tmp.path(), &["signin", "sam"]);

    for i in 0..5 {
        let url = format!("https://example.com/slide{i}.jpg");
        run_ok(tmp.path(), &["slides", "add", &url]);
    }
    let (_stdout, stderr, success) =
        run(tmp.path(), &["slides", "add", "https://example.com/slide5.jpg"]);
    assert!(!success);
    assert!(stderr.contains("full"));

    let stdout = run_ok(tmp.path(), &["slides", "list"]);
    assert_eq!(stdout.lines().count(), 5);
}

#[test]
fn image_urls_are_validated() {
    let tmp = TempDir::new().unwrap();
    create_planner(tmp.path());
    run_ok(tmp.path(), &["signin", "sam"]);

    let (_stdout, stderr, success) = run(tmp.path(), &["mood", "add", "not a url"]);
    assert!(!success);
    assert!(stderr.contains("not a valid image URL"));
}

// ---------------------------------------------------------------------------
// Date
// ---------------------------------------------------------------------------

#[test]
fn date_set_and_countdown() {
    let tmp = TempDir::new().unwrap();
    create_planner(tmp.path());
    run_ok(tmp.path(), &["signin", "sam"]);

    run_ok(tmp.path(), &["date", "set", "2090-06-14"]);
    let stdout = run_ok(tmp.path(), &["date"]);
    assert!(stdout.contains("2090-06-14"));
    assert!(stdout.contains("days"));

    // A date in the past shows the congratulations state
    run_ok(tmp.path(), &["date", "set", "2001-06-14"]);
    let stdout = run_ok(tmp.path(), &["date"]);
    assert!(stdout.contains("Congratulations"));

    let (_stdout, stderr, success) = run(tmp.path(), &["date", "set", "June 14th"]);
    assert!(!success);
    assert!(stderr.contains("not a date"));
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[test]
fn find_searches_across_lists() {
    let tmp = TempDir::new().unwrap();
    create_planner(tmp.path());
    run_ok(tmp.path(), &["signin", "sam"]);

    let stdout = run_ok(tmp.path(), &["find", "photo"]);
    assert!(stdout.contains("task"));
    assert!(stdout.contains("Hire a photographer"));
    assert!(stdout.contains("vendor"));
    assert!(stdout.contains("Evergreen Photography"));

    let stdout = run_ok(tmp.path(), &["find", "zzz-no-such-thing"]);
    assert!(stdout.contains("no matches"));
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

#[test]
fn commands_work_from_a_subdirectory() {
    let tmp = TempDir::new().unwrap();
    create_planner(tmp.path());
    let nested = tmp.path().join("photos/venue");
    fs::create_dir_all(&nested).unwrap();

    run_ok(&nested, &["signin", "sam"]);
    let stdout = run_ok(&nested, &["whoami"]);
    assert_eq!(stdout.trim(), "sam");
}

#[test]
fn missing_planner_is_a_clean_error() {
    let tmp = TempDir::new().unwrap();
    let (_stdout, stderr, success) = run(tmp.path(), &["task", "list"]);
    assert!(!success);
    assert!(stderr.contains("aisle init"));
}
