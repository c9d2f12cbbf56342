use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STATEMENT: &str = "HDFC Bank Credit Card Statement
Customer Name: JOHN DOE
Card Number: 4281****9388
Statement Date: 15/03/2024
Payment Due Date: 04/04/2024
Credit Limit: 50,000.00
Total Amount Due: 12,345.67
REWARDS SUMMARY Opening Balance 1000 Rewards Earned 250 Redeemed/Adjusted 0 Closing Balance 1250
YOUR TRANSACTIONS
01/03/2024 AMAZON PAY 1,499.00
05/03/2024 PAYMENT RECEIVED 5,000.00 CR
KEY OFFERS
";

fn cardsense(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cardsense").unwrap();
    cmd.arg("--config").arg(config_dir.join("config.json"));
    cmd
}

fn write_config(dir: &Path) {
    let config = serde_json::json!({"generation": {"enabled": false}});
    fs::write(dir.join("config.json"), config.to_string()).unwrap();
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("cardsense")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("ask"));
}

#[test]
fn test_process_text_statement_offline() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path());
    let input = dir.path().join("march.txt");
    fs::write(&input, STATEMENT).unwrap();

    let output = cardsense(dir.path())
        .args(["process", "--offline"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let obj = record.as_object().unwrap();
    assert_eq!(obj.len(), 11);
    assert_eq!(record["card_number"], "4281****9388");
    assert_eq!(record["bank_name"], "HDFC Bank");
    assert_eq!(record["available_credit_limit"], serde_json::json!(37654.33));
    assert_eq!(record["minimum_amount_due"], serde_json::json!(617.28));
    assert_eq!(record["transactions"].as_array().unwrap().len(), 2);
    assert_eq!(record["reward_points_summary"]["closing_balance"], 1250);
}

#[test]
fn test_process_csv_format() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path());
    let input = dir.path().join("march.txt");
    fs::write(&input, STATEMENT).unwrap();

    cardsense(dir.path())
        .args(["process", "--offline", "--format", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("customer_name,statement_date"))
        .stdout(predicate::str::contains("JOHN DOE,15/03/2024,04/04/2024"));
}

#[test]
fn test_process_missing_file() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path());

    cardsense(dir.path())
        .args(["process", "--offline"])
        .arg(dir.path().join("missing.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_process_invalid_pdf_fails() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path());
    let input = dir.path().join("broken.pdf");
    fs::write(&input, b"this is not a pdf").unwrap();

    cardsense(dir.path())
        .args(["process", "--offline"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("PDF"));
}

#[test]
fn test_batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path());
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), STATEMENT).unwrap();
    fs::write(inputs.join("b.txt"), "Total Amount Due: 2,000.00").unwrap();

    let pattern = inputs.join("*.txt");
    cardsense(dir.path())
        .args(["batch", "--offline", "--summary", "-j", "2", "--output-dir"])
        .arg(&outputs)
        .arg(pattern.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 succeeded"));

    let b: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(outputs.join("b.json")).unwrap()).unwrap();
    assert_eq!(b["minimum_amount_due"], serde_json::json!(100.0));

    let summary = fs::read_to_string(outputs.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("filename,status,customer_name"));
    assert!(lines[1].starts_with("a.txt,success,JOHN DOE"));
}

#[test]
fn test_config_set_and_get() {
    let dir = TempDir::new().unwrap();

    cardsense(dir.path())
        .args(["config", "get", "generation.model"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gemini-2.0-flash-exp"));

    cardsense(dir.path())
        .args(["config", "set", "extraction.max_source_chars", "5000"])
        .assert()
        .success();

    cardsense(dir.path())
        .args(["config", "get", "extraction.max_source_chars"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5000"));

    cardsense(dir.path())
        .args(["config", "set", "extraction.unknown_key", "1"])
        .assert()
        .failure();
}
