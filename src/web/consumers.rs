//! Page-ready consumers that must re-run after every navigation.

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;

use crate::config::{LOGIN_REFRESH_DELAY_MS, ids};
use crate::core::{AuthStore, LifecycleHub};
use crate::models::PageReady;
use crate::utils::dom;
use crate::{debug_log, info_log};

/// Subscribe the site-wide consumers to the page-ready signal.
pub fn register(hooks: &LifecycleHub, auth: Rc<AuthStore>) {
    hooks.subscribe(tag_skip_target);
    hooks.subscribe(move |ready| reload_after_login(&auth, &ready.route.path));
}

/// Whether an element with this tag name can receive the skip-link id.
pub fn is_skip_target_tag(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("section") || tag.eq_ignore_ascii_case("div")
}

/// Give the first block after the intro section the skip-link id.
///
/// Pages that already define the id are left alone.
fn tag_skip_target(ready: &PageReady) {
    if dom::element_by_id(ids::MAIN_CONTENT).is_some() {
        return;
    }
    let Some(intro) = dom::query("section.intro-section") else {
        return;
    };

    let mut next = intro.next_element_sibling();
    while let Some(element) = &next {
        let tag = element.tag_name();
        if !tag.eq_ignore_ascii_case("script") && !tag.eq_ignore_ascii_case("style") {
            break;
        }
        next = element.next_element_sibling();
    }

    if let Some(element) = next.filter(|e| is_skip_target_tag(&e.tag_name())) {
        element.set_id(ids::MAIN_CONTENT);
        debug_log!("Skip target tagged on {}", ready.route.path);
    }
}

/// One-shot reload after a login, once the user has left the login page.
fn reload_after_login(auth: &AuthStore, route_path: &str) {
    if !auth.take_pending_refresh(route_path) {
        return;
    }
    info_log!("Reloading after login");
    spawn_local(async {
        gloo_timers::future::TimeoutFuture::new(LOGIN_REFRESH_DELAY_MS).await;
        dom::reload();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_target_tags() {
        assert!(is_skip_target_tag("SECTION"));
        assert!(is_skip_target_tag("div"));
        assert!(!is_skip_target_tag("SCRIPT"));
        assert!(!is_skip_target_tag("NAV"));
    }
}
