//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::Command;

const FIXTURES: &str = r#"
name: cli
fixtures:
  customers.create:
    id: cus_42
  "prices.*":
    id: price_1
"#;

fn run_cli(args: &[&str], envs: &[(&str, &Path)]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_stripe-fake");
    let mut command = Command::new(bin);
    command
        .args(args)
        .env_remove("STRIPE_FAKE_FIXTURES")
        .env_remove("STRIPE_FAKE_RECORD");
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().expect("failed to run stripe-fake binary")
}

fn fixture_file(dir: &tempfile::TempDir) -> String {
    let path = dir.path().join("cli.yaml");
    std::fs::write(&path, FIXTURES).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn resolve_prints_coerced_json() {
    let dir = tempfile::tempdir().unwrap();
    let fixtures = fixture_file(&dir);
    let output = run_cli(
        &["resolve", "customers.create", "--fixtures", &fixtures],
        &[],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["id"], "cus_42");
    assert_eq!(value["object"], "customer");
}

#[test]
fn resolve_unregistered_method_fails_with_hint() {
    let dir = tempfile::tempdir().unwrap();
    let fixtures = fixture_file(&dir);
    let output = run_cli(
        &["resolve", "products.retrieve", "--fixtures", &fixtures],
        &[],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("products.retrieve"));
    assert!(stderr.contains("client.fake("));
}

#[test]
fn keys_lists_fixture_keys() {
    let dir = tempfile::tempdir().unwrap();
    let fixtures = fixture_file(&dir);
    let output = run_cli(&["keys"], &[("STRIPE_FAKE_FIXTURES", Path::new(&fixtures))]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("customers.create"));
    assert!(stdout.contains("prices.*  (wildcard)"));
}

#[test]
fn keys_without_fixture_file_fails() {
    let output = run_cli(&["keys"], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("STRIPE_FAKE_FIXTURES"));
}

#[test]
fn record_env_writes_cassette_even_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let fixtures = fixture_file(&dir);
    let cassette = dir.path().join("calls.cassette.yaml");
    let output = run_cli(
        &[
            "resolve",
            "products.retrieve",
            "--fixtures",
            &fixtures,
            "--params",
            r#"{"id":"prod_1"}"#,
        ],
        &[("STRIPE_FAKE_RECORD", &cassette)],
    );
    assert!(!output.status.success());
    let content = std::fs::read_to_string(&cassette).unwrap();
    assert!(content.contains("products.retrieve"));
    assert!(content.contains("prod_1"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_cli(&["nonsense"], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
