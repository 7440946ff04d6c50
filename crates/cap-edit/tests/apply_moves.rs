mod util;

use cap_edit::EditEvent;
use cap_edit::apply::{move_section, move_subsection};
use util::{sample_policy, section_ids};

#[test]
fn moving_a_section_reorders_without_touching_content() {
    let policy = sample_policy(4);

    // Drag section at index 2 onto section at index 0.
    let moved = move_section(&policy, "s2", "s0");
    assert_eq!(section_ids(&moved.policy), vec!["s2", "s0", "s1", "s3"]);
    assert_eq!(
        moved.event,
        EditEvent::SectionMoved {
            section_id: "s2".to_string(),
            to_index: 0
        }
    );

    // Same id set, subsections and content untouched.
    moved.policy.check_invariants().unwrap();
    for section in &policy.sections {
        let after = moved.policy.section(&section.id).unwrap();
        assert_eq!(after.subsections, section.subsections);
    }
}

#[test]
fn source_takes_the_targets_previous_position() {
    let policy = sample_policy(5);
    let moved = move_section(&policy, "s1", "s3").policy;
    assert_eq!(moved.section_index("s1"), Some(3));
    assert_eq!(section_ids(&moved), vec!["s0", "s2", "s3", "s1", "s4"]);
}

#[test]
fn moving_past_itself_by_one_does_not_oscillate() {
    let policy = sample_policy(3);
    let down = move_section(&policy, "s0", "s1").policy;
    assert_eq!(section_ids(&down), vec!["s1", "s0", "s2"]);
    let back = move_section(&down, "s0", "s1").policy;
    assert_eq!(section_ids(&back), vec!["s0", "s1", "s2"]);
}

#[test]
fn self_moves_and_unresolved_ids_are_noops() {
    let policy = sample_policy(3);

    for (from, to) in [("s1", "s1"), ("ghost", "s1"), ("s1", "ghost")] {
        let applied = move_section(&policy, from, to);
        assert_eq!(applied.event, EditEvent::Noop);
        assert_eq!(applied.policy, policy);
    }
}

#[test]
fn subsection_moves_are_scoped_to_one_section() {
    let policy = sample_policy(3);

    let moved = move_subsection(&policy, 1, "s1b", "s1a");
    let subs: Vec<_> = moved.policy.sections[1]
        .subsections
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(subs, vec!["s1b", "s1a"]);
    // Other sections untouched.
    assert_eq!(moved.policy.sections[0], policy.sections[0]);
    assert_eq!(moved.policy.sections[2], policy.sections[2]);

    // Ids from another section do not resolve in this scope.
    let cross = move_subsection(&policy, 1, "s0a", "s1a");
    assert_eq!(cross.event, EditEvent::Noop);
    assert_eq!(cross.policy, policy);

    // Out-of-range section position.
    let out = move_subsection(&policy, 9, "s1b", "s1a");
    assert_eq!(out.event, EditEvent::Noop);
}
