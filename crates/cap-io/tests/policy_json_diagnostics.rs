use cap_io::prelude::*;

#[test]
fn missing_top_level_fields_are_named_in_the_message() {
    let err = parse_policy_json_str(r#"{"heading": "<h2>x</h2>"}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid Policy JSON: missing required top-level field(s): id, sections. \
         Required top-level fields: id, heading, sections."
    );
}

#[test]
fn invalid_json_is_reported_as_such() {
    let err = parse_policy_json_str("{not json").unwrap_err();
    assert!(err.to_string().starts_with("Invalid JSON:"), "got: {err}");

    let err = parse_policy_json_str("[1, 2, 3]").unwrap_err();
    assert!(
        err.to_string().starts_with("Invalid Policy JSON shape:"),
        "got: {err}"
    );
}

#[test]
fn structural_violations_fail_the_parse() {
    let err = parse_policy_json_str(
        r#"{
            "id": "policy-1",
            "heading": "<h2>x</h2>",
            "createdAt": "", "updatedAt": "",
            "sections": [
                {"id": "dup", "title": "A", "subsections": [
                    {"id": "dup", "title": "Intro", "body": "<p>x</p>"}
                ]}
            ]
        }"#,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid Policy structure: duplicate node id 'dup'."
    );
}

#[test]
fn generation_parse_is_lenient_about_missing_fields_but_not_vocabulary() {
    let raw = parse_generation_json_str("{}").unwrap();
    assert_eq!(raw, GenerationResult::default());

    let raw = parse_generation_json_str(r#"{"courseNumber": "EDU 101"}"#).unwrap();
    assert_eq!(raw.course_number.as_deref(), Some("EDU 101"));

    let err = parse_generation_json_str(r#"{"overallPolicy": "banned"}"#).unwrap_err();
    assert!(
        err.to_string().contains("unrecognized overall policy 'banned'"),
        "got: {err}"
    );
}
