//! URL path helpers.
//!
//! Pure string functions mapping between browser locations, the deployment
//! root and route paths. No browser APIs are touched here.

/// Normalize a deployment root into `/segment/.../` form.
///
/// An empty root (or one made only of slashes) becomes `/`.
pub fn normalize_root(root: &str) -> String {
    let trimmed = root.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// Join a prefix and a relative resource path with exactly one `/`.
pub fn join_path(prefix: &str, resource: &str) -> String {
    let resource = resource.trim_start_matches('/');
    if prefix.is_empty() {
        return resource.to_string();
    }
    if prefix.ends_with('/') {
        format!("{}{}", prefix, resource)
    } else {
        format!("{}/{}", prefix, resource)
    }
}

/// Remove the deployment root from a location path, yielding a route path.
///
/// Paths outside the root are returned unchanged (with a leading `/`).
pub fn strip_root(base: &str, path: &str) -> String {
    let path = ensure_leading_slash(path);
    if base == "/" {
        return path;
    }

    if let Some(rest) = path.strip_prefix(base) {
        return format!("/{}", rest);
    }
    if path == base.trim_end_matches('/') {
        return "/".to_string();
    }
    path
}

/// Strip the query string and fragment from a path.
///
/// `"/buy?id=3#top"` becomes `"/buy"`.
pub fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

/// Parse a route path out of a URL hash (`#/about`, `#about`).
///
/// Returns `None` for an empty hash.
pub fn path_from_hash(hash: &str) -> Option<String> {
    let hash = hash.trim_start_matches('#');
    if hash.is_empty() {
        return None;
    }
    Some(ensure_leading_slash(strip_query(hash)))
}

/// Whether an anchor `href` is an in-site route link the router should handle.
///
/// Only root-relative paths qualify; protocol-relative (`//host`) links and
/// direct links to static files are left to the browser.
pub fn is_internal_href(href: &str) -> bool {
    if !href.starts_with('/') || href.starts_with("//") {
        return false;
    }
    let path = strip_query(href);
    let last = path.rsplit('/').next().unwrap_or_default();
    !last.contains('.')
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_root() {
        assert_eq!(normalize_root(""), "/");
        assert_eq!(normalize_root("/"), "/");
        assert_eq!(normalize_root("//"), "/");
        assert_eq!(normalize_root("portal"), "/portal/");
        assert_eq!(normalize_root("/portal"), "/portal/");
        assert_eq!(normalize_root("/a/b/"), "/a/b/");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("/", "pages/home.html"), "/pages/home.html");
        assert_eq!(join_path("/", "/about"), "/about");
        assert_eq!(join_path("/portal/", "components/header.html"), "/portal/components/header.html");
        assert_eq!(join_path("../", "components/footer.html"), "../components/footer.html");
        assert_eq!(join_path("", "components/footer.html"), "components/footer.html");
        assert_eq!(join_path("/portal", "x.html"), "/portal/x.html");
        assert_eq!(join_path("/portal/", ""), "/portal/");
    }

    #[test]
    fn test_strip_root() {
        assert_eq!(strip_root("/", "/about"), "/about");
        assert_eq!(strip_root("/", "about"), "/about");
        assert_eq!(strip_root("/portal/", "/portal/about"), "/about");
        assert_eq!(strip_root("/portal/", "/portal"), "/");
        assert_eq!(strip_root("/portal/", "/elsewhere"), "/elsewhere");
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("/buy?id=3"), "/buy");
        assert_eq!(strip_query("/buy#top"), "/buy");
        assert_eq!(strip_query("/buy?id=3#top"), "/buy");
        assert_eq!(strip_query("/"), "/");
        assert_eq!(strip_query("?x=1"), "");
    }

    #[test]
    fn test_path_from_hash() {
        assert_eq!(path_from_hash(""), None);
        assert_eq!(path_from_hash("#"), None);
        assert_eq!(path_from_hash("#/about"), Some("/about".to_string()));
        assert_eq!(path_from_hash("#about"), Some("/about".to_string()));
        assert_eq!(path_from_hash("#/buy?x=1"), Some("/buy".to_string()));
    }

    #[test]
    fn test_is_internal_href() {
        assert!(is_internal_href("/"));
        assert!(is_internal_href("/about"));
        assert!(is_internal_href("/user-profile?target=cartSection"));
        assert!(!is_internal_href("https://example.gov"));
        assert!(!is_internal_href("//cdn.example.com/x"));
        assert!(!is_internal_href("#top"));
        assert!(!is_internal_href("pages/home.html"));
        assert!(!is_internal_href("/assets/report.pdf"));
    }
}
