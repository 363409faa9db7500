//! Comma-separated list fields.
//!
//! List-valued DTO fields (highlights, includes, image URLs, ...) are
//! edited as one line of text and sent as arrays.

/// Split comma-separated text into trimmed, non-empty entries.
pub fn csv_to_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join list entries back into editable text.
pub fn list_to_csv(items: &[String]) -> String {
    items.join(", ")
}

/// Trim a text field, mapping blank input to `None`.
pub fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
