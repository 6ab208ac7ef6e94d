use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const CATALOG: &str = "tests/fixtures/catalog.csv";

#[test]
fn test_cli_products_sorted_by_name() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("fichas"));
    cmd.arg("--catalog").arg(CATALOG).arg("products");

    let output = cmd.output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let names: Vec<&str> = stdout
        .lines()
        .skip(1)
        .filter_map(|line| line.split(',').nth(1))
        .collect();
    assert_eq!(names, vec!["IPA", "Pilsen", "Vodka", "Water"]);
    assert!(stdout.contains("1,Pilsen,12.00,https://cdn.example.com/pilsen.png"));

    Ok(())
}

#[test]
fn test_cli_buy_prints_tokens() {
    let mut cmd = Command::new(cargo_bin!("fichas"));
    cmd.arg("--catalog")
        .arg(CATALOG)
        .args(["buy", "1", "--quantity", "2"]);

    let output = cmd.output().expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("id,status,product_name,product_image,created_at"));
    let rows: Vec<&str> = stdout.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    assert!(
        rows.iter()
            .all(|row| row.contains(",AVAILABLE,Pilsen,https://cdn.example.com/pilsen.png,"))
    );
}

#[test]
fn test_cli_buy_unknown_product() {
    let mut cmd = Command::new(cargo_bin!("fichas"));
    cmd.arg("--catalog").arg(CATALOG).args(["buy", "99"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown product: 99"));
}

#[test]
fn test_cli_buy_zero_quantity() {
    let mut cmd = Command::new(cargo_bin!("fichas"));
    cmd.arg("--catalog")
        .arg(CATALOG)
        .args(["buy", "1", "--quantity", "0"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Quantity must be at least 1"));
}

#[test]
fn test_cli_redeem_unknown_code() {
    let mut cmd = Command::new(cargo_bin!("fichas"));
    cmd.args(["redeem", "nonexistent-id"]);

    cmd.assert()
        .code(3)
        .stdout(predicate::str::contains("NOT_FOUND"));
}

#[test]
fn test_cli_redeem_blank_code() {
    let mut cmd = Command::new(cargo_bin!("fichas"));
    cmd.args(["redeem", "  "]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Token code must not be empty"));
}

#[test]
fn test_cli_show_unknown_code() {
    let mut cmd = Command::new(cargo_bin!("fichas"));
    cmd.args(["show", "6f1c4a8e-8f59-4c47-9b8e-2d1d3c0f9a11"]);

    cmd.assert()
        .code(3)
        .stdout(predicate::str::contains("NOT_FOUND"));
}

#[test]
fn test_cli_wallet_empty() {
    let mut cmd = Command::new(cargo_bin!("fichas"));
    cmd.arg("wallet");

    cmd.assert()
        .success()
        .stdout("id,status,product_name,product_image,created_at\n");
}
