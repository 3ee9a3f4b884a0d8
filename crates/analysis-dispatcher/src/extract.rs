//! JSON extraction from raw completion text.
//!
//! Models are instructed to return a bare JSON object but frequently wrap it
//! in prose. Try a whole-text parse first, then scan for the first balanced
//! `{...}` span that parses as an object.

use serde_json::Value;

pub fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if value.is_object() {
            return Some(value);
        }
    }

    scan_balanced_object(text)
}

/// Find the first balanced top-level `{...}` span and parse it. Brace depth
/// is only tracked outside JSON string literals, so braces inside quoted
/// values do not break the scan.
fn scan_balanced_object(text: &str) -> Option<Value> {
    let bytes = text.as_bytes();
    let mut start: Option<usize> = None;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if depth == 0 {
            if b == b'{' {
                start = Some(i);
                depth = 1;
            }
            continue;
        }

        if escaped {
            escaped = false;
            continue;
        }

        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    let span = &text[start?..=i];
                    if let Ok(value) = serde_json::from_str::<Value>(span) {
                        if value.is_object() {
                            return Some(value);
                        }
                    }
                    start = None;
                }
            }
            _ => {}
        }
    }

    None
}
