//! Navigation and chrome state.

use std::cell::RefCell;
use std::rc::Rc;

use super::{LayoutKind, Route};
use crate::config::ids;

/// Router progress through one navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RouterPhase {
    #[default]
    Idle,
    Resolving,
    LoadingChrome,
    LoadingContent,
    Ready,
    /// Last navigation ended on the error panel.
    Failed,
}

/// What the router last rendered successfully.
///
/// Owned by the router; the layout composer only reads it through a
/// [`SharedNavigation`] handle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigationState {
    pub current_route: Option<Route>,
    pub current_layout: Option<LayoutKind>,
}

impl NavigationState {
    /// Path of the current route, if any navigation has completed.
    pub fn current_path(&self) -> Option<&str> {
        self.current_route.as_ref().map(|r| r.path.as_str())
    }
}

/// Read handle to the router's navigation state.
pub type SharedNavigation = Rc<RefCell<NavigationState>>;

/// Load status of the shared chrome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChromeLoadState {
    pub header_loaded: bool,
    pub footer_loaded: bool,
    /// Body-level link interception attached (once per page lifetime).
    pub listeners_attached: bool,
}

/// Shell regions written by the router and the layout composer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Header,
    Content,
    Footer,
}

impl Slot {
    /// DOM id of the slot element.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Header => ids::HEADER,
            Self::Content => ids::CONTENT,
            Self::Footer => ids::FOOTER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = NavigationState::default();
        assert_eq!(state.current_path(), None);
        assert_eq!(state.current_layout, None);
        assert_eq!(RouterPhase::default(), RouterPhase::Idle);
        assert!(!ChromeLoadState::default().listeners_attached);
    }

    #[test]
    fn test_slot_ids() {
        assert_eq!(Slot::Header.id(), "header-placeholder");
        assert_eq!(Slot::Content.id(), "app-content");
        assert_eq!(Slot::Footer.id(), "footer-placeholder");
    }
}
