//! Tiny HTML fragment builders.
//!
//! Formatting is the one place the engine *produces* rich text; everything
//! downstream treats bodies as opaque. Free text from the generation result
//! is escaped before it lands in a fragment.

use crate::schema::UseCaseEntry;

/// Escape text for use inside an HTML fragment.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn p(text: &str) -> String {
    format!("<p>{}</p>", escape_html(text))
}

pub fn h2(text: &str) -> String {
    format!("<h2>{}</h2>", escape_html(text))
}

pub fn h3(text: &str) -> String {
    format!("<h3>{}</h3>", escape_html(text))
}

pub fn span(text: &str) -> String {
    format!("<span>{}</span>", escape_html(text))
}

/// One side of the use-cases split: a titled entry list, or a literal
/// "None" placeholder when the list is absent or empty.
pub fn use_case_list(title: &str, entries: Option<&[UseCaseEntry]>) -> String {
    let mut out = h3(title);
    match entries {
        Some(entries) if !entries.is_empty() => {
            out.push_str("<ul>");
            for entry in entries {
                out.push_str("<li><strong>");
                out.push_str(&escape_html(&entry.label));
                out.push_str("</strong>");
                out.push_str(&p(&entry.text));
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
        _ => out.push_str("<p>None</p>"),
    }
    out
}

/// One policy-link line. An empty value renders as "N/A".
pub fn link_line(label: &str, value: &str) -> String {
    let shown = if value.is_empty() { "N/A" } else { value };
    format!("<li>{}: {}</li>", escape_html(label), span(shown))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_free_text() {
        assert_eq!(p("a < b & c"), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn empty_link_value_renders_na() {
        assert_eq!(
            link_line("Other policies", ""),
            "<li>Other policies: <span>N/A</span></li>"
        );
    }

    #[test]
    fn missing_use_case_side_renders_none() {
        let html = use_case_list("Reasonable Use Cases", None);
        assert!(html.ends_with("<p>None</p>"));
        let html = use_case_list("Unreasonable Use Cases", Some(&[]));
        assert!(html.ends_with("<p>None</p>"));
    }
}
