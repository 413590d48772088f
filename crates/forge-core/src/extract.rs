//! Site-document extraction from raw model output.
//!
//! Models frequently wrap the document in a Markdown fence, sometimes with
//! prose around it. The policy here is explicit: only the FIRST fenced
//! region is used; any later fenced regions are discarded.

/// Extract the site document from raw generation output.
///
/// 1. A fence opened with the `html` language tag wins: everything between
///    the first ```` ```html ```` and the next ```` ``` ````, trimmed.
/// 2. Otherwise any fence: everything between the first pair of ```` ``` ````
///    markers, trimmed.
/// 3. Otherwise the whole text, trimmed.
pub fn extract_document(raw: &str) -> String {
    if let Some(inner) = between_fences(raw, "```html") {
        return inner.trim().to_string();
    }
    if let Some(inner) = between_fences(raw, "```") {
        return inner.trim().to_string();
    }
    raw.trim().to_string()
}

/// Content between the first occurrence of `open` and the next ```` ``` ````.
/// `None` when the opening marker is absent or unclosed.
fn between_fences<'a>(text: &'a str, open: &str) -> Option<&'a str> {
    let start = text.find(open)? + open.len();
    let rest = &text[start..];
    let end = rest.find("```")?;
    Some(&rest[..end])
}
