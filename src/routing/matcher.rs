//! Route pattern matching.
//!
//! # Responsibilities
//! - Match a request path against a route pattern
//!
//! # Design Decisions
//! - Path matching is ASCII case-insensitive
//! - A trailing `*` makes the pattern a prefix match; `"*"` alone matches
//!   every path
//! - No parameter capture and no regex, to guarantee O(n) matching

/// Returns true if the request path matches the route pattern.
///
/// Exact match first, then prefix match for wildcard-suffixed patterns.
pub fn path_matches(pattern: &str, path: &str) -> bool {
    if pattern.eq_ignore_ascii_case(path) {
        return true;
    }

    if let Some(prefix) = pattern.strip_suffix('*') {
        return starts_with_ignore_ascii_case(path, prefix);
    }

    false
}

fn starts_with_ignore_ascii_case(path: &str, prefix: &str) -> bool {
    path.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_is_case_insensitive() {
        assert!(path_matches("/hello/world", "/hello/world"));
        assert!(path_matches("/hello/world", "/Hello/World"));
        assert!(!path_matches("/hello/world", "/hello"));
        assert!(!path_matches("/hello", "/hello/world"));
    }

    #[test]
    fn wildcard_suffix_matches_prefix() {
        assert!(path_matches("/static/*", "/static/app.js"));
        assert!(path_matches("/static/*", "/STATIC/app.js"));
        assert!(path_matches("/static/*", "/static/"));
        assert!(!path_matches("/static/*", "/assets/app.js"));
    }

    #[test]
    fn bare_star_matches_everything() {
        assert!(path_matches("*", "/"));
        assert!(path_matches("*", "/anything/at/all"));
    }

    #[test]
    fn multibyte_paths_do_not_panic() {
        assert!(!path_matches("/héllo*", "/h"));
        assert!(path_matches("/caf*", "/café"));
    }
}
