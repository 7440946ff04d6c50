use serde_json::json;

use cap_core::model::Policy;

/// A policy with `n` sections (`s0`..) of two subsections each (`s0a`, `s0b`, ..).
#[allow(dead_code)]
pub fn sample_policy(n: usize) -> Policy {
    let sections: Vec<_> = (0..n)
        .map(|i| {
            json!({
                "id": format!("s{i}"),
                "title": format!("Section {i}"),
                "subsections": [
                    {"id": format!("s{i}a"), "title": "Introduction", "body": format!("<p>intro {i}</p>")},
                    {"id": format!("s{i}b"), "title": "Details", "body": format!("<p>details {i}</p>")}
                ]
            })
        })
        .collect();

    serde_json::from_value(json!({
        "id": "policy-1",
        "heading": "<h2>EDU 101: Intro</h2>",
        "createdAt": "2024-01-10T00:00:00Z",
        "updatedAt": "2024-01-12T00:00:00Z",
        "sections": sections
    }))
    .unwrap()
}

#[allow(dead_code)]
pub fn section_ids(policy: &Policy) -> Vec<&str> {
    policy.sections.iter().map(|s| s.id.as_str()).collect()
}
