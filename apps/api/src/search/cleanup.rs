//! Best-effort unwrap of markdown code fences around model output.
//!
//! Handles a leading ```` ``` ```` line (with or without a language tag) and a
//! trailing ```` ``` ````, together or on their own. Multiple fences or prose
//! around the fence are not unwrapped; that text fails CSV parsing instead.

const FENCE: &str = "```";

/// Strips ```` ```csv ... ``` ```` or ```` ``` ... ``` ```` fences from LLM output.
pub fn strip_csv_fences(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix(FENCE) {
        body = match rest.split_once('\n') {
            Some((tag, after)) if is_language_tag(tag) => after,
            // CSV starts on the fence line itself.
            Some(_) => rest,
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }

    let body = body.trim();
    body.strip_suffix(FENCE).map(str::trim_end).unwrap_or(body).trim()
}

fn is_language_tag(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
