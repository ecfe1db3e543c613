//! Naming helpers: URL-safe slugs and filesystem-safe file names.

/// Characters that may not appear in archive file names.
const ILLEGAL: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|', '\r', '\n'];

/// Fallback name when sanitization leaves nothing usable.
pub const UNTITLED: &str = "untitled";

/// Derive a URL-safe ASCII slug from a title.
///
/// Non-ASCII characters are dropped; a title with no ASCII alphanumerics
/// (for example a purely CJK title) falls back to [`UNTITLED`]. The slug
/// is an internal identifier, so lossy transliteration is acceptable.
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    if out.is_empty() {
        UNTITLED.to_string()
    } else {
        out
    }
}

/// Sanitize a title into a filesystem-safe file name component.
///
/// Unlike [`slugify`] this preserves non-Latin script: only
/// filesystem-illegal punctuation is replaced (runs collapse to a single
/// `-`), whitespace runs collapse to single spaces, and an empty result
/// falls back to [`UNTITLED`].
#[must_use]
pub fn safe_file_name(input: &str) -> String {
    let mut replaced = String::with_capacity(input.len());
    let mut prev_illegal = false;
    for ch in input.chars() {
        if ILLEGAL.contains(&ch) {
            if !prev_illegal {
                replaced.push('-');
            }
            prev_illegal = true;
        } else {
            replaced.push(ch);
            prev_illegal = false;
        }
    }
    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        UNTITLED.to_string()
    } else {
        collapsed
    }
}
