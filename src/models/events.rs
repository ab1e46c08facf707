//! Lifecycle signal payloads.

use serde::{Deserialize, Serialize};

use super::{LayoutKind, Route};
use crate::config::events;

/// Payload of the page-ready signal.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageReady {
    pub route: Route,
    pub layout_kind: LayoutKind,
}

/// Payload of the auth change signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthChange {
    pub is_logged_in: bool,
}

/// Events dispatched to the page for script consumers.
#[derive(Clone, Debug, PartialEq)]
pub enum SiteEvent {
    PageLoaded(PageReady),
    HeaderLoaded,
    AuthStatusChanged(AuthChange),
}

impl SiteEvent {
    /// DOM event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PageLoaded(_) => events::PAGE_LOADED,
            Self::HeaderLoaded => events::HEADER_LOADED,
            Self::AuthStatusChanged(_) => events::AUTH_STATUS_CHANGED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ready_payload_shape() {
        let ready = PageReady {
            route: Route::new("about", "/about", "pages/about.html", "About"),
            layout_kind: LayoutKind::Default,
        };
        let json = serde_json::to_value(&ready).unwrap();
        assert_eq!(json["route"]["path"], "/about");
        assert_eq!(json["route"]["page"], "pages/about.html");
        assert_eq!(json["layoutKind"], "default");
    }

    #[test]
    fn test_auth_change_payload_shape() {
        let json = serde_json::to_string(&AuthChange { is_logged_in: true }).unwrap();
        assert_eq!(json, r#"{"isLoggedIn":true}"#);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(SiteEvent::HeaderLoaded.name(), "headerLoaded");
        assert_eq!(
            SiteEvent::AuthStatusChanged(AuthChange { is_logged_in: false }).name(),
            "authStatusChanged"
        );
    }
}
