//! String utility functions

/// Parse a token list that may be a JSON array or comma-separated values.
///
/// Handles:
/// - JSON arrays: `["alice", "bob"]`
/// - Comma-separated: `alice, bob`
///
/// Blank entries are dropped.
pub fn parse_string_array(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    if trimmed.starts_with('[')
        && let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed)
    {
        return items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    trimmed
        .trim_matches(|c| c == '[' || c == ']')
        .split(',')
        .map(|s| s.trim().trim_matches('"').trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Pad or truncate to exactly `width` characters for table output
pub fn fit_width(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let keep = width.saturating_sub(1);
        format!("{}…", text.chars().take(keep).collect::<String>())
    } else {
        format!("{}{}", text, " ".repeat(width - count))
    }
}
