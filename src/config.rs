//! Application configuration.
//!
//! Centralizes the constants used throughout the application plus the
//! runtime [`SiteConfig`] that is resolved once at startup. The route table
//! is loaded at compile time using `include_str!`.

// =============================================================================
// Text Assets (loaded at compile time)
// =============================================================================

/// Site route table (TOML).
pub const ROUTES_TOML: &str = include_str!("../assets/routes.toml");

// =============================================================================
// Application Metadata
// =============================================================================

/// Document title used when a route does not declare one.
pub const DEFAULT_TITLE: &str = "Publications Division";

/// Route table key of the not-found route.
pub const NOT_FOUND_KEY: &str = "notFound";

// =============================================================================
// Shell Element Ids
// =============================================================================

/// Element ids of the persistent shell.
pub mod ids {
    /// Root element the Leptos shell is mounted into.
    pub const APP_ROOT: &str = "app";
    /// Content slot receiving page fragments.
    pub const CONTENT: &str = "app-content";
    /// Header chrome placeholder.
    pub const HEADER: &str = "header-placeholder";
    /// Footer chrome placeholder.
    pub const FOOTER: &str = "footer-placeholder";
    /// Skip-link target inside page content.
    pub const MAIN_CONTENT: &str = "main-content";
}

// =============================================================================
// Chrome Fragments
// =============================================================================

/// Header markup, relative to the deployment root.
pub const HEADER_FRAGMENT: &str = "components/header.html";

/// Footer markup, relative to the deployment root.
pub const FOOTER_FRAGMENT: &str = "components/footer.html";

/// Inline notice shown when the header cannot be loaded.
pub const HEADER_FAILURE_HTML: &str = "<div class=\"alert alert-warning\">Header component failed to load. Please refresh the page.</div>";

/// Inline notice shown when the footer cannot be loaded.
pub const FOOTER_FAILURE_HTML: &str =
    "<p class=\"text-danger\">Footer component failed to load.</p>";

/// Error panel rendered into the content slot when a page fragment fails.
pub const PAGE_ERROR_HTML: &str = r#"<div class="container py-5 text-center">
  <h2>Page Load Error</h2>
  <p>Unable to load the requested page.</p>
  <a href="/" class="btn btn-primary">Return Home</a>
</div>"#;

// =============================================================================
// Event Names
// =============================================================================

/// DOM event names dispatched on `window` / `document`.
pub mod events {
    /// Fired after new page content is in place.
    pub const PAGE_LOADED: &str = "pageLoaded";
    /// Fired after the header chrome has been injected and wired.
    pub const HEADER_LOADED: &str = "headerLoaded";
    /// Fired when the login flag changes.
    pub const AUTH_STATUS_CHANGED: &str = "authStatusChanged";
    /// Native history navigation event.
    pub const POPSTATE: &str = "popstate";
}

// =============================================================================
// Network / Timing Configuration
// =============================================================================

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

/// Delay after chrome injection before wiring dependent behavior.
pub const DOM_SETTLE_MS: u32 = 50;

/// Delay before retrying a missing header placeholder.
pub const PLACEHOLDER_RETRY_MS: u32 = 100;

/// Delay before the post-login reload.
pub const LOGIN_REFRESH_DELAY_MS: u32 = 100;

// =============================================================================
// Auth Storage
// =============================================================================

/// localStorage keys owned by the auth-state utility.
pub mod storage_keys {
    /// `"true"` / `"false"` login flag.
    pub const LOGGED_IN: &str = "userLoggedIn";
    /// JSON user blob.
    pub const USER_DATA: &str = "userData";
    /// Set on login, cleared by the one-shot reload.
    pub const REFRESH_PENDING: &str = "login_refresh_pending";
}

/// Path of the login route (refresh is deferred while on it).
pub const LOGIN_PATH: &str = "/login";

/// Path of the profile route (header wishlist/cart targets).
pub const PROFILE_PATH: &str = "/user-profile";

// =============================================================================
// Accessibility Panel
// =============================================================================

/// Font scaling bounds for the accessibility panel (percent).
pub mod font_scale {
    pub const MIN: u32 = 80;
    pub const MAX: u32 = 130;
    pub const STEP: u32 = 10;
    pub const DEFAULT: u32 = 100;
}

// =============================================================================
// Runtime Site Configuration
// =============================================================================

/// Deployment configuration resolved once at startup.
///
/// Every fragment URL and every history entry is derived from `base_path`,
/// so the same build serves from `/` or from a nested directory.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Deployment root, always with leading and trailing `/`.
    pub base_path: String,
    /// Ordered prefixes tried when loading chrome fragments.
    pub chrome_prefixes: Vec<String>,
    /// Re-execute `<script>` elements found in injected page fragments.
    pub rerun_fragment_scripts: bool,
}

impl SiteConfig {
    /// Build a configuration rooted at `root` (e.g. `/` or `/portal`).
    pub fn from_root(root: &str) -> Self {
        let base_path = crate::utils::normalize_root(root);
        Self {
            chrome_prefixes: vec![base_path.clone()],
            base_path,
            rerun_fragment_scripts: true,
        }
    }

    /// Replace the chrome lookup prefixes. An empty list keeps the root.
    pub fn with_chrome_prefixes(mut self, prefixes: Vec<String>) -> Self {
        if !prefixes.is_empty() {
            self.chrome_prefixes = prefixes;
        }
        self
    }

    /// Toggle re-execution of inline fragment scripts.
    pub fn with_fragment_scripts(mut self, enabled: bool) -> Self {
        self.rerun_fragment_scripts = enabled;
        self
    }

    /// URL of a deployment-relative resource (e.g. `pages/home.html`).
    pub fn resource_url(&self, resource: &str) -> String {
        crate::utils::join_path(&self.base_path, resource)
    }

    /// Candidate URLs for a chrome fragment, in lookup order.
    pub fn chrome_candidates(&self, fragment: &str) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::with_capacity(self.chrome_prefixes.len());
        for prefix in &self.chrome_prefixes {
            let url = crate::utils::join_path(prefix, fragment);
            if !candidates.contains(&url) {
                candidates.push(url);
            }
        }
        candidates
    }

    /// Map a browser location path into route space (strips the root).
    pub fn route_path(&self, location_path: &str) -> String {
        crate::utils::strip_root(&self.base_path, location_path)
    }

    /// Map a route path into a browser location path.
    pub fn href(&self, route_path: &str) -> String {
        crate::utils::join_path(&self.base_path, route_path.trim_start_matches('/'))
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_root("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_config() {
        let config = SiteConfig::default();
        assert_eq!(config.base_path, "/");
        assert_eq!(config.resource_url("pages/home.html"), "/pages/home.html");
        assert_eq!(
            config.chrome_candidates(HEADER_FRAGMENT),
            vec!["/components/header.html".to_string()]
        );
        assert_eq!(config.route_path("/about"), "/about");
        assert_eq!(config.href("/about"), "/about");
        assert_eq!(config.href("/"), "/");
    }

    #[test]
    fn test_nested_config() {
        let config = SiteConfig::from_root("portal");
        assert_eq!(config.base_path, "/portal/");
        assert_eq!(config.resource_url("pages/buy.html"), "/portal/pages/buy.html");
        assert_eq!(config.route_path("/portal/buy"), "/buy");
        assert_eq!(config.route_path("/portal/"), "/");
        assert_eq!(config.route_path("/portal"), "/");
        assert_eq!(config.href("/buy"), "/portal/buy");
        assert_eq!(config.href("/"), "/portal/");
    }

    #[test]
    fn test_chrome_candidates_dedup() {
        let config = SiteConfig::default().with_chrome_prefixes(vec![
            "/".to_string(),
            "/".to_string(),
            "../".to_string(),
        ]);
        assert_eq!(
            config.chrome_candidates(FOOTER_FRAGMENT),
            vec![
                "/components/footer.html".to_string(),
                "../components/footer.html".to_string()
            ]
        );
    }

    #[test]
    fn test_empty_prefixes_keep_root() {
        let config = SiteConfig::default().with_chrome_prefixes(Vec::new());
        assert_eq!(config.chrome_prefixes, vec!["/".to_string()]);
    }

    #[test]
    fn test_embedded_routes_present() {
        assert!(ROUTES_TOML.contains(NOT_FOUND_KEY));
    }
}
