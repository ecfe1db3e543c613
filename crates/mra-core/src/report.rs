//! Report document assembly: frontmatter plus the five fixed sections.

use crate::error::Result;
use crate::frontmatter::render_frontmatter;
use crate::record::{ReportBody, ReportMetadata};

/// The five fixed section headings, in document order.
pub const SECTIONS: [&str; 5] = [
    "# Summary",
    "# Background",
    "# Analysis",
    "# References",
    "# Conclusions",
];

/// Assemble the full Markdown document for a report.
///
/// Pure over its inputs: identical metadata and body always produce
/// byte-identical output, which is what makes change-aware writing work.
///
/// # Errors
///
/// Returns an error only if the metadata cannot be serialized.
pub fn build_report(meta: &ReportMetadata, body: &ReportBody) -> Result<String> {
    let mut lines: Vec<String> = Vec::new();
    lines.push(render_frontmatter(meta)?.trim_end().to_string());
    lines.push(String::new());

    push_section(&mut lines, SECTIONS[0], &body.summary);
    push_section(&mut lines, SECTIONS[1], &body.background);
    push_section(&mut lines, SECTIONS[2], &body.analysis);

    lines.push(SECTIONS[3].to_string());
    for r in &body.references {
        lines.push(format!("- [{}]({})", r.name, r.url));
    }
    lines.push(String::new());

    lines.push(SECTIONS[4].to_string());
    for item in &body.conclusions {
        lines.push(format!("- {item}"));
    }
    lines.push(String::new());

    Ok(lines.join("\n"))
}

fn push_section(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    lines.push(heading.to_string());
    for item in items {
        lines.push(format!("- {item}"));
    }
    lines.push(String::new());
}
