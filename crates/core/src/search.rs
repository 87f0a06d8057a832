//! Listing and search helpers shared by the API and repository layers.
//!
//! Complaint search is a plain case-insensitive substring match over title,
//! category, and description — a filter over the current snapshot, not an
//! index. At this system's scale that is deliberate: no relevance ranking.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of complaints per page.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Maximum number of complaints per page.
pub const MAX_LIST_LIMIT: i64 = 200;

/// Clamp a requested limit into `[1, max]`, falling back to `default`.
pub fn clamp_limit(requested: Option<i64>, default: i64, max: i64) -> i64 {
    match requested {
        Some(n) if n >= 1 => n.min(max),
        _ => default,
    }
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(requested: Option<i64>) -> i64 {
    requested.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Search term handling
// ---------------------------------------------------------------------------

/// Prepare a user-supplied search string for an `ILIKE` pattern.
///
/// Escapes the SQL LIKE metacharacters (`%`, `_`, `\`) so user input is
/// matched literally, then wraps it in `%...%`. Returns `None` for empty
/// or whitespace-only input (meaning: no search filter).
pub fn build_like_pattern(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut escaped = String::with_capacity(trimmed.len() + 2);
    for c in trimmed.chars() {
        if c == '%' || c == '_' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    Some(format!("%{escaped}%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped_into_range() {
        assert_eq!(clamp_limit(None, 50, 200), 50);
        assert_eq!(clamp_limit(Some(0), 50, 200), 50);
        assert_eq!(clamp_limit(Some(-5), 50, 200), 50);
        assert_eq!(clamp_limit(Some(10), 50, 200), 10);
        assert_eq!(clamp_limit(Some(9999), 50, 200), 200);
    }

    #[test]
    fn offset_is_non_negative() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-1)), 0);
        assert_eq!(clamp_offset(Some(30)), 30);
    }

    #[test]
    fn empty_query_means_no_filter() {
        assert_eq!(build_like_pattern(""), None);
        assert_eq!(build_like_pattern("   "), None);
    }

    #[test]
    fn plain_terms_are_wrapped() {
        assert_eq!(build_like_pattern("pothole"), Some("%pothole%".to_string()));
        assert_eq!(build_like_pattern("  light "), Some("%light%".to_string()));
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(build_like_pattern("100%"), Some("%100\\%%".to_string()));
        assert_eq!(build_like_pattern("a_b"), Some("%a\\_b%".to_string()));
        assert_eq!(build_like_pattern("a\\b"), Some("%a\\\\b%".to_string()));
    }
}
