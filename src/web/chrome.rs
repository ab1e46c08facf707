//! Interactive widgets inside injected header/footer markup.
//!
//! Chrome markup is replaced on every header load, so everything here is
//! re-attached each time and never guarded.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Event, EventTarget};

use crate::config::{LOGIN_PATH, PROFILE_PATH};
use crate::utils::dom;
use crate::{debug_log, warn_log};

use super::accessibility;
use super::page::{BrowserPage, navigate_route};

/// Header icon that leads into a profile dashboard section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileSection {
    Wishlist,
    Cart,
}

impl ProfileSection {
    pub fn link_id(self) -> &'static str {
        match self {
            Self::Wishlist => "wishlistHeaderLink",
            Self::Cart => "cartHeaderLink",
        }
    }

    pub fn section_id(self) -> &'static str {
        match self {
            Self::Wishlist => "wishlistSection",
            Self::Cart => "cartSection",
        }
    }

    /// Route the icon leads to for the given login state.
    pub fn destination(self, logged_in: bool) -> String {
        if logged_in {
            format!("{}?target={}", PROFILE_PATH, self.section_id())
        } else {
            LOGIN_PATH.to_string()
        }
    }
}

/// Attach a click listener that lives as long as the element.
pub(crate) fn on_click<T>(target: &T, handler: impl FnMut(Event) + 'static)
where
    T: AsRef<EventTarget>,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let _ = target
        .as_ref()
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Show or hide the shared dimming overlay.
pub(crate) fn set_active_overlay(active: bool) {
    if let Some(overlay) = dom::element_by_id("overlay") {
        dom::toggle_class(&overlay, "active", active);
    }
}

/// Wire every chrome widget found in the current header/footer markup.
pub fn wire(page: &BrowserPage) {
    wire_sidebar();
    wire_language_dropdown();
    accessibility::wire();
    wire_header_auth(page);
    debug_log!("Chrome widgets wired");
}

/// Toggle the login/profile controls and the profile label.
pub fn show_auth_controls(page: &BrowserPage, logged_in: bool) {
    let (Some(login), Some(profile)) = (
        dom::query(".auth-login-btn").and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok()),
        dom::query(".auth-profile-btn").and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok()),
    ) else {
        return;
    };

    let (login_display, profile_display) = if logged_in {
        ("none", "inline-block")
    } else {
        ("inline-block", "none")
    };
    dom::set_style(&login, "display", login_display);
    dom::set_style(&profile, "display", profile_display);

    if let Some(label) = dom::query(".auth-profile-name") {
        let user = page.auth().and_then(|auth| auth.user_data());
        let text = user.as_ref().map(|u| u.display_name()).unwrap_or("Profile");
        label.set_text_content(Some(text));
    }
}

fn wire_sidebar() {
    let (Some(menu), Some(sidebar), Some(overlay), Some(close)) = (
        dom::element_by_id("menuBtn"),
        dom::element_by_id("sidebar"),
        dom::element_by_id("overlay"),
        dom::element_by_id("closeBtn"),
    ) else {
        return;
    };

    {
        let sidebar = sidebar.clone();
        on_click(&menu, move |_| {
            dom::toggle_class(&sidebar, "active", true);
            set_active_overlay(true);
        });
    }
    {
        let sidebar = sidebar.clone();
        on_click(&close, move |_| {
            dom::toggle_class(&sidebar, "active", false);
            set_active_overlay(false);
        });
    }
    on_click(&overlay, move |_| {
        dom::toggle_class(&sidebar, "active", false);
        set_active_overlay(false);
    });
}

/// Selecting a language copies its label into the dropdown toggle.
fn wire_language_dropdown() {
    for item in dom::query_all(".dropdown-item") {
        let href = item.get_attribute("href");
        if href.as_deref().is_some_and(|h| h != "#") {
            continue;
        }
        let source = item.clone();
        on_click(&item, move |event| {
            event.prevent_default();
            if let Some(toggle) = dom::element_by_id("languageDropdown") {
                let label = source.text_content().unwrap_or_default();
                toggle.set_text_content(Some(label.trim()));
            }
        });
    }
}

fn wire_header_auth(page: &BrowserPage) {
    let config = page.config().clone();

    for section in [ProfileSection::Wishlist, ProfileSection::Cart] {
        let Some(link) = dom::element_by_id(section.link_id()) else {
            continue;
        };
        let config = config.clone();
        let auth = page.auth();
        on_click(&link, move |event| {
            event.prevent_default();
            let logged_in = auth.as_ref().is_some_and(|a| a.is_logged_in());
            navigate_route(&config, &section.destination(logged_in));
        });
    }

    if let Some(logout) = dom::element_by_id("headerLogoutBtn") {
        let auth = page.auth();
        on_click(&logout, move |event| {
            event.prevent_default();
            if let Some(auth) = &auth
                && let Err(err) = auth.logout()
            {
                warn_log!("Logout failed: {}", err);
            }
            navigate_route(&config, "/");
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_destinations() {
        assert_eq!(
            ProfileSection::Wishlist.destination(true),
            "/user-profile?target=wishlistSection"
        );
        assert_eq!(
            ProfileSection::Cart.destination(true),
            "/user-profile?target=cartSection"
        );
        assert_eq!(ProfileSection::Cart.destination(false), "/login");
    }

    #[test]
    fn test_link_ids() {
        assert_eq!(ProfileSection::Wishlist.link_id(), "wishlistHeaderLink");
        assert_eq!(ProfileSection::Cart.link_id(), "cartHeaderLink");
    }
}
