//! Path joining and normalization.
//!
//! Every prefix and route path in the tree is produced by [`join`], so the
//! same rule applies at every level:
//!
//! ```text
//!  join("", "/g1/g1")          => "/g1/g1"
//!  join("/g1/g1", "/g3/g3/")   => "/g1/g1/g3/g3"
//!  join("/g2", "")             => "/g2"
//!  join("", "")                => ""
//! ```

/// Joins `base` and `relative` into one absolute path.
///
/// Both parts are split on '/', empty segments are dropped and the rest are
/// re-joined with single slashes behind a leading '/'. If nothing remains the
/// result is the empty string, which is the prefix of the root group.
pub fn join(base: &str, relative: &str) -> String {
    let mut out = String::with_capacity(base.len() + relative.len() + 1);
    for segment in base
        .split('/')
        .chain(relative.split('/'))
        .filter(|s| !s.is_empty())
    {
        out.push('/');
        out.push_str(segment);
    }
    out
}

/// Like [`join`], but never returns an empty path: the root is "/".
pub fn route_path(base: &str, relative: &str) -> String {
    let path = join(base, relative);
    if path.is_empty() {
        "/".to_string()
    } else {
        path
    }
}

/// Normalizes a request path so it can be looked up against registered
/// routes: `//a//b/` becomes `/a/b`, and an empty path becomes `/`.
pub fn normalize(path: &str) -> String {
    route_path("", path)
}

/// A relative path is either empty or starts with '/'.
pub fn is_valid_relative(path: &str) -> bool {
    path.is_empty() || path.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_nested_prefixes() {
        let g1 = join("", "/g1/g1");
        assert_eq!(g1, "/g1/g1");
        let g3 = join(&g1, "/g3/g3");
        assert_eq!(g3, "/g1/g1/g3/g3");
        assert_eq!(route_path(&g3, "/t4"), "/g1/g1/g3/g3/t4");
    }

    #[test]
    fn test_join_collapses_redundant_slashes() {
        assert_eq!(join("/a/", "//b//c/"), "/a/b/c");
        assert_eq!(join("//", "/"), "");
    }

    #[test]
    fn test_empty_relative_keeps_prefix() {
        assert_eq!(join("/g2", ""), "/g2");
        assert_eq!(join("", ""), "");
        assert_eq!(route_path("", ""), "/");
        assert_eq!(route_path("/g2", ""), "/g2");
    }

    #[test]
    fn test_route_path_drops_trailing_slash() {
        assert_eq!(route_path("", "/t1/"), "/t1");
        assert_eq!(route_path("", "/"), "/");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("//a//b/"), "/a/b");
    }

    #[test]
    fn test_is_valid_relative() {
        assert!(is_valid_relative(""));
        assert!(is_valid_relative("/t1"));
        assert!(!is_valid_relative("t7"));
    }
}
