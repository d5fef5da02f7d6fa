//! Code fence extraction from free-form model replies.

/// Return the contents of the first fenced block tagged `json` (or untagged).
///
/// Fences in other languages are skipped. An unterminated fence yields
/// everything after the opening line.
pub fn extract_fenced(source: &str) -> Option<&str> {
    let mut offset = 0;
    for raw in source.split_inclusive('\n') {
        let trimmed = raw.trim_start();
        if let Some(tag) = trimmed.strip_prefix("```") {
            let tag = tag.trim();
            let body_start = offset + raw.len();
            if tag.is_empty() || tag.eq_ignore_ascii_case("json") {
                let body = &source[body_start..];
                let end = find_closing_fence(body).unwrap_or(body.len());
                return Some(body[..end].trim());
            }
            // Skip over a fence in some other language
            let rest = &source[body_start..];
            let close = find_closing_fence(rest)?;
            let after = body_start + close;
            return extract_fenced(skip_line(&source[after..]));
        }
        offset += raw.len();
    }
    None
}

/// Byte offset of the closing ``` fence line. Lines are walked with their
/// terminators so CRLF text keeps offsets on char boundaries.
fn find_closing_fence(source: &str) -> Option<usize> {
    let mut offset = 0;
    for raw in source.split_inclusive('\n') {
        if raw.trim() == "```" {
            return Some(offset);
        }
        offset += raw.len();
    }
    None
}

fn skip_line(source: &str) -> &str {
    match source.find('\n') {
        Some(i) => &source[i + 1..],
        None => "",
    }
}
