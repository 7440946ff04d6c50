use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn fixture_path(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join(name)
}

#[test]
fn cli_apply_runs_the_script_in_order() {
    let mut cmd = cargo_bin_cmd!("cap");
    cmd.args([
        "apply",
        fixture_path("policy.json").to_str().unwrap(),
        fixture_path("script.json").to_str().unwrap(),
        "--min",
    ]);

    let out = cmd.assert().success().get_output().stdout.clone();
    let policy: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(policy["heading"], "<h2>EDU 101: Revised</h2>");

    let ids: Vec<&str> = policy["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["sec-additional", "sec-course", "sec-ai"]);

    // The use-cases subsection was deleted; its sibling survives.
    let ai_subs = policy["sections"][2]["subsections"].as_array().unwrap();
    assert_eq!(ai_subs.len(), 1);
    assert_eq!(ai_subs[0]["id"], "sub-ai-intro");
}

#[test]
fn cli_apply_invalid_script_exits_two_with_the_exact_message() {
    let mut cmd = cargo_bin_cmd!("cap");
    cmd.args([
        "apply",
        fixture_path("policy.json").to_str().unwrap(),
        fixture_path("script.invalid.json").to_str().unwrap(),
    ]);

    cmd.assert()
        .failure()
        .code(2)
        .stderr("ops[0] (move_section) missing to\n");
}

#[test]
fn cli_apply_telemetry_lands_on_stderr() {
    let mut cmd = cargo_bin_cmd!("cap");
    cmd.args([
        "apply",
        fixture_path("policy.json").to_str().unwrap(),
        fixture_path("script.json").to_str().unwrap(),
        "--min",
        "--telemetry",
    ]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("\"ok\":true"))
        .stderr(predicate::str::contains("\"script_ops\":3"))
        .stderr(predicate::str::contains("\"move_section\":1"));
}

#[test]
fn cli_validate_reports_ok_or_exits_two() {
    let mut cmd = cargo_bin_cmd!("cap");
    cmd.args(["validate", fixture_path("script.json").to_str().unwrap()]);
    cmd.assert().success().stdout("OK\n");

    let mut cmd = cargo_bin_cmd!("cap");
    cmd.args(["validate", fixture_path("script.invalid.json").to_str().unwrap()]);
    cmd.assert()
        .failure()
        .code(2)
        .stderr("ops[0] (move_section) missing to\n");
}
