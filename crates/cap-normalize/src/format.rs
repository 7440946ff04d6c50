//! Generation result -> canonical policy tree.
//!
//! Deterministic on structure: for a fixed input, the section and subsection
//! titles (and their order) never vary. Node ids are freshly minted on every
//! run and carry no content.

use cap_core::ident::new_node_id;
use cap_core::model::{Body, Policy, RichText, Section, Subsection, SubsectionMeta};

use crate::render;
use crate::schema::{GenerationResult, present, present_list};

/// Which of the two product document variants to format.
///
/// Both variants share the tree type and the whole mutation contract; they
/// differ only in how formatted bodies are shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Freshly generated, display-oriented: bodies are `<section>`-wrapped
    /// with `<h3>` headings.
    Generated,
    /// Persisted/editable: bodies are standalone fragments led by an `<h2>`,
    /// the shape the rich-text widget expects.
    Editable,
}

/// Format a raw generation result into the canonical three-section tree.
///
/// Always produces exactly: Course Description, Generative AI Policy,
/// Additional Policies, in that order. A structurally empty section still
/// gets its Introduction subsection. Absent raw fields yield absent
/// subsections, not placeholders. Duplicate list entries are preserved
/// verbatim.
pub fn format_policy(raw: &GenerationResult, policy_id: &str, variant: Variant) -> Policy {
    let stamp = raw.generated_at.clone().unwrap_or_default();
    Policy {
        id: policy_id.to_string(),
        heading: heading(raw),
        created_at: stamp.clone(),
        updated_at: stamp,
        sections: vec![
            section("Course Description", course_description_subsections(raw, variant)),
            section("Generative AI Policy", generative_ai_policy_subsections(raw, variant)),
            section("Additional Policies", additional_policies_subsections(raw, variant)),
        ],
    }
}

fn section(title: &str, subsections: Vec<Subsection>) -> Section {
    Section {
        id: new_node_id(),
        title: title.to_string(),
        subsections,
    }
}

fn subsection(title: &str, body: Body) -> Subsection {
    Subsection {
        id: new_node_id(),
        title: title.to_string(),
        body,
        metadata: None,
    }
}

/// Variant-specific wrapper for a titled block.
fn block(variant: Variant, heading: &str, inner: &str) -> RichText {
    match variant {
        Variant::Generated => format!("<section>{}{inner}</section>", render::h3(heading)),
        Variant::Editable => format!("{}{inner}", render::h2(heading)),
    }
}

/// Document heading from course metadata.
fn heading(raw: &GenerationResult) -> RichText {
    let title_line = match (present(&raw.course_number), present(&raw.course_title)) {
        (Some(number), Some(title)) => format!("{number}: {title}"),
        (Some(one), None) | (None, Some(one)) => one.to_string(),
        (None, None) => "Course Policy".to_string(),
    };

    let mut out = render::h2(&title_line);
    let mut byline = String::new();
    if let Some(instructor) = present(&raw.instructor) {
        byline.push_str("Course Instructor: ");
        byline.push_str(instructor);
        if let Some(email) = present(&raw.email) {
            byline.push_str(&format!("[{email}]"));
        }
    }
    if !byline.is_empty() {
        out.push_str("<p>");
        out.push_str(&render::escape_html(&byline));
        if let Some(generated_at) = present(&raw.generated_at) {
            out.push(' ');
            out.push_str(&render::span(&format!("Generated on {generated_at}")));
        }
        out.push_str("</p>");
    }
    out
}

fn course_description_subsections(raw: &GenerationResult, variant: Variant) -> Vec<Subsection> {
    let text = present(&raw.course_description).unwrap_or_default();
    vec![subsection(
        "Introduction",
        Body::Single(block(variant, "Course Description", &render::p(text))),
    )]
}

fn generative_ai_policy_subsections(raw: &GenerationResult, variant: Variant) -> Vec<Subsection> {
    let mut subs = Vec::new();

    let heading = match present(&raw.course_number) {
        Some(number) => format!("1. {number} Generative AI Policy"),
        None => "1. Generative AI Policy".to_string(),
    };
    let mut inner = String::new();
    if let Some(policy) = raw.overall_policy {
        inner.push_str(&format!(
            "<p>Overall generative AI policy: {}</p>",
            render::span(policy.as_str())
        ));
    }
    inner.push_str(&render::p(present(&raw.overall_policy_text).unwrap_or_default()));
    let mut intro = subsection("Introduction", Body::Single(block(variant, &heading, &inner)));
    if let Some(policy) = raw.overall_policy {
        intro.metadata = Some(SubsectionMeta {
            overall_policy: Some(policy),
        });
    }
    subs.push(intro);

    if let Some(use_cases) = &raw.use_cases {
        subs.push(subsection(
            "Use Cases",
            Body::Split(
                render::use_case_list("Reasonable Use Cases", use_cases.reasonable.as_deref()),
                render::use_case_list("Unreasonable Use Cases", use_cases.unreasonable.as_deref()),
            ),
        ));
    }

    if let Some(text) = present(&raw.specific_policies_for_assignments) {
        let body = block(variant, "Assignment/Project Specific AI Policies", &render::p(text));
        subs.push(subsection("Assignment Specific AI Policies", Body::Single(body.clone())));
        // Historical duplicate, spelling included. Kept for output
        // compatibility with existing saved policies.
        subs.push(subsection("Asignment Specific AI Policies", Body::Single(body)));
    }

    if let Some(guidelines) = present_list(&raw.ethical_guidelines) {
        let mut inner = String::new();
        for text in guidelines {
            inner.push_str(&render::p(text));
        }
        if let Some(tail) = present(&raw.additional_guidelines) {
            inner.push_str(&render::p(tail));
        }
        subs.push(subsection(
            "Ethical Guidelines",
            Body::Single(block(
                variant,
                "Ethical guidelines for using generative AI for this course:",
                &inner,
            )),
        ));
    }

    if let Some(declarations) = present_list(&raw.generative_ai_tool_declarations) {
        let mut inner = String::new();
        for text in declarations {
            inner.push_str(&render::p(text));
        }
        if let Some(tail) = present(&raw.additional_generative_ai_tools_declarations) {
            inner.push_str(&render::p(tail));
        }
        subs.push(subsection(
            "Declaration",
            Body::Single(block(
                variant,
                "How to declare the use of generative tools:",
                &inner,
            )),
        ));
    }

    let notes = match present(&raw.additional_notes) {
        Some(text) => render::p(text),
        None => String::new(),
    };
    subs.push(subsection(
        "Additional Notes",
        Body::Single(block(variant, "Additional Notes", &notes)),
    ));

    subs
}

fn additional_policies_subsections(raw: &GenerationResult, variant: Variant) -> Vec<Subsection> {
    let mut subs = Vec::new();

    let text = present(&raw.additional_policy_text).unwrap_or_default();
    subs.push(subsection(
        "Introduction",
        Body::Single(block(variant, "2. Additional Policies", &render::p(text))),
    ));

    // Present-but-empty link fields still get a line (rendered "N/A");
    // absent fields get none. The whole subsection is gated on the course
    // actually restricting AI use.
    let restricted = raw.overall_policy.map_or(true, |p| p.restricted());
    if restricted {
        let mut lines = String::from("<ul>");
        if let Some(value) = raw.campus_wide_policy.as_deref() {
            lines.push_str(&render::link_line("Campus-wide generative AI policy", value));
        }
        if let Some(value) = raw.department_wide_policy.as_deref() {
            lines.push_str(&render::link_line("Department-wide generative AI policy", value));
        }
        if let Some(value) = raw.academic_integrity_policy.as_deref() {
            lines.push_str(&render::link_line("Academic Integrity policy", value));
        }
        if let Some(value) = raw.other_policies.as_deref() {
            lines.push_str(&render::link_line("Other policies", value));
        }
        lines.push_str("</ul>");

        let body = match variant {
            Variant::Generated => format!("<section>{lines}</section>"),
            Variant::Editable => lines,
        };
        subs.push(subsection("Policy Links", Body::Single(body)));
    }

    subs
}
