//! YAML frontmatter parsing and writing for report documents.
//!
//! Every report starts with a `---` delimited YAML block:
//! ```markdown
//! ---
//! title: "Local LLM Optimization"
//! date: "2025-01-01"
//! edition: v1
//! category_slug: llm
//! ...
//! ---
//!
//! # Summary
//! ```

use crate::error::{MraError, Result};
use crate::record::ReportMetadata;

/// Split a markdown document into frontmatter YAML and body content.
///
/// Returns `(yaml_str, body)` where `yaml_str` is the raw YAML between
/// `---` delimiters and `body` is everything after the closing `---`.
///
/// # Errors
///
/// Returns [`MraError::Parse`] if the document does not contain valid
/// frontmatter delimiters.
pub fn split_frontmatter(content: &str) -> Result<(&str, &str)> {
    let content = content.trim_start();

    if !content.starts_with("---") {
        return Err(MraError::Parse(
            "document must start with '---' frontmatter delimiter".to_string(),
        ));
    }

    let after_first = &content[3..];
    let after_first = after_first.trim_start_matches(['\r', '\n']);

    let close_pos = after_first.find("\n---").ok_or_else(|| {
        MraError::Parse("no closing '---' frontmatter delimiter found".to_string())
    })?;

    let yaml = &after_first[..close_pos];
    let rest = &after_first[close_pos + 4..]; // skip \n---

    let body = rest.strip_prefix('\n').unwrap_or(rest);
    let body = body.strip_prefix('\r').unwrap_or(body);

    Ok((yaml, body))
}

/// Render report metadata as a frontmatter block, including the `---`
/// delimiters and a trailing newline.
///
/// # Errors
///
/// Returns [`MraError::Serialization`] if the metadata cannot be
/// serialized.
pub fn render_frontmatter(meta: &ReportMetadata) -> Result<String> {
    let yaml =
        serde_yaml::to_string(meta).map_err(|e| MraError::Serialization(e.to_string()))?;

    let mut out = String::with_capacity(yaml.len() + 10);
    out.push_str("---\n");
    out.push_str(&yaml);
    out.push_str("---\n");
    Ok(out)
}

/// Parse a report document's frontmatter into [`ReportMetadata`].
///
/// # Errors
///
/// Returns [`MraError::Parse`] if frontmatter is missing and
/// [`MraError::Serialization`] if the YAML cannot be deserialized.
pub fn parse_metadata(content: &str) -> Result<(ReportMetadata, &str)> {
    let (yaml, body) = split_frontmatter(content)?;
    let meta: ReportMetadata =
        serde_yaml::from_str(yaml).map_err(|e| MraError::Serialization(e.to_string()))?;
    Ok((meta, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> ReportMetadata {
        ReportMetadata {
            title: "Local LLM Optimization".to_string(),
            date: "2025-01-01".to_string(),
            edition: "v1".to_string(),
            category_slug: "llm".to_string(),
            category_display: "Large Language Models".to_string(),
            source: "unit-test".to_string(),
            slug: "local-llm-optimization".to_string(),
            run_id: "run-1".to_string(),
        }
    }

    #[test]
    fn split_frontmatter_extracts_yaml_and_body() {
        let content = "---\ntitle: test\ndate: '2025-01-01'\n---\n\n# Summary\n";
        let (yaml, body) = split_frontmatter(content).unwrap();
        assert!(yaml.contains("title: test"));
        assert!(body.contains("# Summary"));
    }

    #[test]
    fn split_frontmatter_rejects_missing_opener() {
        assert!(split_frontmatter("title: test\n---\n").is_err());
    }

    #[test]
    fn split_frontmatter_rejects_missing_closer() {
        assert!(split_frontmatter("---\ntitle: test\n").is_err());
    }

    #[test]
    fn metadata_roundtrips_through_frontmatter() {
        let original = meta();
        let block = render_frontmatter(&original).unwrap();
        let content = format!("{block}\n# Summary\n- point\n");

        let (parsed, body) = parse_metadata(&content).unwrap();
        assert_eq!(parsed, original);
        assert!(body.contains("# Summary"));
    }

    #[test]
    fn rendered_frontmatter_uses_snake_case_keys() {
        let block = render_frontmatter(&meta()).unwrap();
        assert!(block.contains("category_slug: llm"));
        assert!(block.contains("run_id: run-1"));
        assert!(block.starts_with("---\n"));
        assert!(block.ends_with("---\n"));
    }
}
