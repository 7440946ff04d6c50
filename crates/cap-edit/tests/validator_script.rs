mod util;

use serde_json::json;

use cap_edit::{EditScriptV1, EditTelemetry, apply_script, validate_script};
use util::sample_policy;

fn script(value: serde_json::Value) -> EditScriptV1 {
    serde_json::from_value(value).expect("script fixture must parse")
}

#[test]
fn unsupported_version_fails_with_stable_message() {
    let s = script(json!({"v": 2, "ops": []}));
    assert_eq!(
        validate_script(&s).unwrap_err(),
        "unsupported edit script version 2"
    );
}

#[test]
fn missing_fields_fail_with_stable_messages() {
    let cases = [
        (
            json!({"op": "delete_section"}),
            "ops[0] (delete_section) missing section_id",
        ),
        (
            json!({"op": "delete_subsection", "section_id": "s1"}),
            "ops[0] (delete_subsection) missing subsection_id",
        ),
        (
            json!({"op": "move_section", "from": "s1"}),
            "ops[0] (move_section) missing to",
        ),
        (
            json!({"op": "move_subsection", "from": "a", "to": "b"}),
            "ops[0] (move_subsection) missing section_index",
        ),
        (
            json!({"op": "edit_heading"}),
            "ops[0] (edit_heading) missing value",
        ),
        (
            json!({"op": "edit_subsection_body", "section_id": "s1", "subsection_id": "s1a"}),
            "ops[0] (edit_subsection_body) missing body",
        ),
        (
            json!({"op": "edit_use_case_text", "section_id": "s1", "subsection_id": "s1a", "value": "<p>x</p>"}),
            "ops[0] (edit_use_case_text) missing side",
        ),
    ];

    for (op, expected) in cases {
        let s = script(json!({"v": 1, "ops": [op]}));
        assert_eq!(validate_script(&s).unwrap_err(), expected);
    }
}

#[test]
fn replacement_fields_are_rejected_where_they_make_no_sense() {
    let s = script(json!({
        "v": 1,
        "ops": [{"op": "delete_section", "section_id": "s1", "value": "<p>x</p>"}]
    }));
    assert_eq!(
        validate_script(&s).unwrap_err(),
        "ops[0] (delete_section) unexpected replacement field (only valid for edits)"
    );

    let s = script(json!({
        "v": 1,
        "ops": [{
            "op": "edit_subsection_body",
            "section_id": "s1", "subsection_id": "s1a",
            "body": "<p>x</p>", "value": "<p>x</p>"
        }]
    }));
    assert_eq!(
        validate_script(&s).unwrap_err(),
        "ops[0] (edit_subsection_body) unexpected value (use body)"
    );
}

#[test]
fn a_script_applies_in_order_and_reports_each_outcome() {
    let policy = sample_policy(3);
    let s = script(json!({
        "v": 1,
        "ops": [
            {"op": "move_section", "from": "s2", "to": "s0"},
            {"op": "delete_section", "section_id": "s1"},
            {"op": "delete_section", "section_id": "s1"},
            {"op": "add_section"}
        ]
    }));

    let outcome = apply_script(&policy, &s).unwrap();
    outcome.policy.check_invariants().unwrap();

    let ids: Vec<_> = outcome.policy.sections.iter().map(|x| x.id.as_str()).collect();
    assert_eq!(ids.len(), 3);
    assert_eq!(&ids[..2], ["s2", "s0"]);

    assert_eq!(outcome.events.len(), 4);
    assert!(outcome.events[0].changed());
    assert!(outcome.events[1].changed());
    // The repeated delete addresses an id that no longer resolves.
    assert!(!outcome.events[2].changed());
    assert!(outcome.events[3].changed());
}

#[test]
fn telemetry_counts_are_deterministic() {
    let s = script(json!({
        "v": 1,
        "ops": [
            {"op": "delete_section", "section_id": "s1"},
            {"op": "delete_subsection", "section_id": "s1", "subsection_id": "s1a"},
            {"op": "add_section"}
        ]
    }));

    let (total, by_type, target_sections, target_subsections) =
        EditTelemetry::op_counts(&s.ops);
    assert_eq!(total, 3);
    assert_eq!(by_type.get("delete_section"), Some(&1));
    assert_eq!(by_type.get("delete_subsection"), Some(&1));
    assert_eq!(by_type.get("add_section"), Some(&1));
    assert_eq!(target_sections, 1);
    assert_eq!(target_subsections, 1);
}
