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
fn cli_inspect_lists_every_subsection_row() {
    let mut cmd = cargo_bin_cmd!("cap");
    cmd.args(["inspect", fixture_path("policy.json").to_str().unwrap()]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("sectionId"))
        .stdout(predicate::str::contains("sub-course-intro"))
        .stdout(predicate::str::contains("sub-ai-intro"))
        .stdout(predicate::str::contains("sub-ai-usecases"))
        .stdout(predicate::str::contains("sub-additional-intro"));
}

#[test]
fn cli_inspect_previews_are_bounded() {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("cap_inspect_long_{pid}_{nanos}.json"));

    let long_text = "a".repeat(200);
    let doc_json = format!(
        r#"{{"id":"p1","heading":"<h2>x</h2>","sections":[{{"id":"s1","title":"A","subsections":[{{"id":"s1a","title":"Intro","body":{long_text:?}}}]}}]}}"#
    );
    fs::write(&path, doc_json).unwrap();

    let mut cmd = cargo_bin_cmd!("cap");
    cmd.args(["inspect", path.to_str().unwrap()]);

    let out = cmd.assert().success().get_output().stdout.clone();
    let out = String::from_utf8(out).unwrap();
    let row = out.lines().nth(1).unwrap();
    let preview = row.split_whitespace().last().unwrap();

    // 80-char bound, with ellipsis when truncated.
    assert!(preview.chars().count() <= 80);
    assert!(preview.ends_with('…'));

    let _ = fs::remove_file(&path);
}

#[test]
fn cli_inspect_rejects_a_structurally_broken_document() {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("cap_inspect_dup_{pid}_{nanos}.json"));

    fs::write(
        &path,
        r#"{"id":"p1","heading":"<h2>x</h2>","sections":[
            {"id":"dup","title":"A","subsections":[{"id":"dup","title":"Intro","body":"<p>x</p>"}]}
        ]}"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("cap");
    cmd.args(["inspect", path.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicates::str::contains("duplicate node id 'dup'"));

    let _ = fs::remove_file(&path);
}
