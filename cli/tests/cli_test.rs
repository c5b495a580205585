use assert_cmd::{Command, cargo_bin_cmd};
use predicates::prelude::*;
use tempfile::TempDir;

fn crm_demo(knowledge_dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("crm-demo");
    cmd.env_remove("ATTIO_ACCESS_TOKEN")
        .env_remove("OPENAI_API_KEY")
        .env("NO_COLOR", "1")
        .env("KNOWLEDGE_DIR", knowledge_dir.path());
    cmd
}

#[test]
fn test_help_lists_pages() {
    let dir = TempDir::new().unwrap();
    crm_demo(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("coach"))
        .stdout(predicate::str::contains("enrich"));
}

#[test]
fn test_knowledge_prints_concatenated_markdown() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("product.md"), "# Squadbase\nHosting for AI apps").unwrap();

    crm_demo(&dir)
        .arg("knowledge")
        .assert()
        .success()
        .stdout(predicate::str::contains("<!-- product.md -->"))
        .stdout(predicate::str::contains("Hosting for AI apps"));
}

#[test]
fn test_empty_knowledge_warns() {
    let dir = TempDir::new().unwrap();
    crm_demo(&dir)
        .arg("knowledge")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Knowledge base is empty!"))
        .stderr(predicate::str::contains("No markdown files found"));
}

#[test]
fn test_dashboard_rejects_inverted_range() {
    let dir = TempDir::new().unwrap();
    crm_demo(&dir)
        .args(["dashboard", "--start", "2024-02-01", "--end", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Start date must be before end date"));
}

#[test]
fn test_dashboard_without_token_shows_notice() {
    let dir = TempDir::new().unwrap();
    crm_demo(&dir)
        .args(["dashboard", "--start", "2024-01-01", "--end", "2024-01-31"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Please add your Attio access token to continue."));
}

#[test]
fn test_chat_without_key_shows_notice() {
    let dir = TempDir::new().unwrap();
    crm_demo(&dir)
        .args(["chat", "--message", "hello"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Please add your OpenAI API key to continue."));
}

#[test]
fn test_coach_notes_without_token_shows_notice() {
    let dir = TempDir::new().unwrap();
    crm_demo(&dir)
        .args(["coach", "--show-notes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Please add your Attio access token to continue."));
}

#[test]
fn test_coach_notes_conflicts_with_question() {
    let dir = TempDir::new().unwrap();
    crm_demo(&dir)
        .args(["coach", "--show-notes", "How do we win?"])
        .assert()
        .failure();
}
