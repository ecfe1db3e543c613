//! Marker-delimited region patching for human-edited documents.
//!
//! Generic over the document: callers supply the marker pair, the
//! replacement block, and a scaffold used when the document is absent.
//! A document that exists but lacks either marker is treated as absent
//! and fully replaced by the scaffold — that deliberately overwrites
//! unmarked hand content in exchange for idempotence, and callers must
//! document that trade-off to their users.

/// Replace the marker-delimited region of a document.
///
/// `start_marker` may be a prefix of the actual marker line (so marker
/// attributes like `version=1` still match); `end_marker` must match in
/// full. `replacement_block` carries the marker pair itself, so on a hit
/// the result is `before + blank line + replacement_block + blank line +
/// after`, with everything outside the pair preserved.
#[must_use]
pub fn patch_region(
    existing: Option<&str>,
    start_marker: &str,
    end_marker: &str,
    replacement_block: &str,
    scaffold: &str,
) -> String {
    let Some(text) = existing else {
        return scaffold.to_string();
    };
    let (Some(start), Some(end)) = (text.find(start_marker), text.find(end_marker)) else {
        return scaffold.to_string();
    };

    let before = text[..start].trim_end();
    let after = text[end + end_marker.len()..].trim_start();

    let mut parts: Vec<&str> = Vec::with_capacity(3);
    if !before.is_empty() {
        parts.push(before);
    }
    parts.push(replacement_block.trim_matches('\n'));
    if !after.is_empty() {
        parts.push(after);
    }
    let mut out = parts.join("\n\n");
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Replace the inner text of a region whose start marker carries
/// attributes (`<!-- NAME:START attr=... -->`), keeping both marker
/// lines. Returns `None` when the markers are not found.
#[must_use]
pub fn replace_region(
    text: &str,
    start_prefix: &str,
    end_marker: &str,
    new_inner: &str,
) -> Option<String> {
    let start = text.find(start_prefix)?;
    let close = text[start..].find("-->")? + start + "-->".len();
    let end = text[close..].find(end_marker)? + close;
    Some(format!(
        "{}\n{}\n{}",
        &text[..close],
        new_inner.trim_matches('\n'),
        &text[end..]
    ))
}

/// Replace the value between a single-value marker pair, keeping the
/// markers. Returns `None` when the markers are not found.
#[must_use]
pub fn replace_value(
    text: &str,
    start_marker: &str,
    end_marker: &str,
    value: &str,
) -> Option<String> {
    let start = text.find(start_marker)? + start_marker.len();
    let end = text[start..].find(end_marker)? + start;
    Some(format!("{}{}{}", &text[..start], value, &text[end..]))
}
