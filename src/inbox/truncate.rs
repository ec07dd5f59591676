//! Character-safe truncation helpers.
//!
//! All limits count Unicode scalar values, so a cut never lands inside a
//! multi-byte character.

/// Character budget for summaries, latest replies, and comment bodies.
pub const DISPLAY_LIMIT: usize = 220;

/// Character budget for the pull request goal.
pub const GOAL_LIMIT: usize = 400;

const ELLIPSIS: &str = "...";

/// Truncates `text` to `limit` characters, marking the cut with `...`.
///
/// Text within the limit is returned unchanged. Longer text keeps its first
/// `limit - 3` characters followed by `...`, so the result is exactly `limit`
/// characters long. Limits of three or fewer leave no room for the marker
/// and keep the first `limit` characters instead.
///
/// # Examples
///
/// ```
/// use pr_inbox::inbox::truncate_chars;
///
/// assert_eq!(truncate_chars("short", 10), "short");
/// assert_eq!(truncate_chars("ééééé", 4), "é...");
/// ```
#[must_use]
pub fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_owned();
    }

    if limit <= ELLIPSIS.len() {
        return take_chars(text, limit);
    }

    let mut truncated = take_chars(text, limit - ELLIPSIS.len());
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Returns the first `limit` characters of `text` without a marker.
#[must_use]
pub fn take_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Trims surrounding whitespace and truncates to [`DISPLAY_LIMIT`].
#[must_use]
pub fn condense(text: &str) -> String {
    truncate_chars(text.trim(), DISPLAY_LIMIT)
}
