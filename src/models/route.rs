//! Route declarations and layout kinds.

use serde::{Deserialize, Serialize};

/// Which chrome elements a route requires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    /// Header and footer.
    #[default]
    Default,
    /// Header only.
    Auth,
    /// Placeholders kept in the DOM but hidden.
    ContentOnly,
    /// No chrome action; navigation links still intercepted.
    Minimal,
    /// Nothing at all.
    None,
}

impl LayoutKind {
    /// Stable name, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Auth => "auth",
            Self::ContentOnly => "content-only",
            Self::Minimal => "minimal",
            Self::None => "none",
        }
    }

    pub fn loads_header(&self) -> bool {
        matches!(self, Self::Default | Self::Auth)
    }

    pub fn loads_footer(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// `content-only` hides the chrome placeholders instead of loading them.
    pub fn hides_chrome(&self) -> bool {
        matches!(self, Self::ContentOnly)
    }

    /// Every layout except `none` attaches link interception.
    pub fn intercepts_links(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl std::fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declarative mapping from a URL path to page content and display metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Stable identifier (e.g. `home`, `notFound`).
    pub key: String,
    /// Exact-match path, always starting with `/`.
    pub path: String,
    /// Deployment-relative location of the page fragment.
    #[serde(rename = "page")]
    pub fragment: String,
    /// Document title.
    pub title: String,
    /// Chrome required by this route.
    #[serde(default)]
    pub layout: LayoutKind,
    /// Name of the page initializer to invoke after page-ready.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<String>,
}

impl Route {
    pub fn new(
        key: impl Into<String>,
        path: impl Into<String>,
        fragment: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            fragment: fragment.into(),
            title: title.into(),
            layout: LayoutKind::Default,
            init: None,
        }
    }

    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_init(mut self, init: impl Into<String>) -> Self {
        self.init = Some(init.into());
        self
    }

    /// Title to display, falling back to the site default for blank titles.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            crate::config::DEFAULT_TITLE
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_flags() {
        assert!(LayoutKind::Default.loads_header());
        assert!(LayoutKind::Default.loads_footer());
        assert!(LayoutKind::Auth.loads_header());
        assert!(!LayoutKind::Auth.loads_footer());
        for kind in [LayoutKind::ContentOnly, LayoutKind::Minimal, LayoutKind::None] {
            assert!(!kind.loads_header());
            assert!(!kind.loads_footer());
        }
        assert!(LayoutKind::ContentOnly.hides_chrome());
        assert!(!LayoutKind::Minimal.hides_chrome());
        assert!(!LayoutKind::Default.hides_chrome());
        assert!(LayoutKind::Minimal.intercepts_links());
        assert!(!LayoutKind::None.intercepts_links());
    }

    #[test]
    fn test_layout_serde_names() {
        let json = serde_json::to_string(&LayoutKind::ContentOnly).unwrap();
        assert_eq!(json, "\"content-only\"");
        let kind: LayoutKind = serde_json::from_str("\"minimal\"").unwrap();
        assert_eq!(kind, LayoutKind::Minimal);
        assert_eq!(LayoutKind::ContentOnly.to_string(), "content-only");
    }

    #[test]
    fn test_route_builder() {
        let route = Route::new("home", "/", "pages/home.html", "Home")
            .with_layout(LayoutKind::Auth)
            .with_init("initHomePage");
        assert_eq!(route.layout, LayoutKind::Auth);
        assert_eq!(route.init.as_deref(), Some("initHomePage"));
    }

    #[test]
    fn test_blank_title_falls_back() {
        let route = Route::new("x", "/x", "pages/x.html", "  ");
        assert_eq!(route.display_title(), crate::config::DEFAULT_TITLE);
    }
}
