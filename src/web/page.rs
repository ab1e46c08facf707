//! [`Page`] implementation over the live DOM.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Element, Event, MouseEvent, ScrollBehavior, ScrollToOptions};

use crate::config::{SiteConfig, events};
use crate::core::auth::AuthStore;
use crate::core::platform::Page;
use crate::models::{SiteEvent, Slot};
use crate::utils::{dom, is_internal_href};
use crate::{error_log, warn_log};

use super::chrome;

/// The browser document hosting the shell.
pub struct BrowserPage {
    config: Rc<SiteConfig>,
    auth: RefCell<Option<Rc<AuthStore>>>,
}

impl BrowserPage {
    pub fn new(config: Rc<SiteConfig>) -> Self {
        Self {
            config,
            auth: RefCell::new(None),
        }
    }

    /// Give chrome widgets (logout, wishlist, cart) access to the login flag.
    pub fn attach_auth(&self, auth: Rc<AuthStore>) {
        *self.auth.borrow_mut() = Some(auth);
    }

    pub fn config(&self) -> &Rc<SiteConfig> {
        &self.config
    }

    pub fn auth(&self) -> Option<Rc<AuthStore>> {
        self.auth.borrow().clone()
    }
}

/// Push `url` onto the history stack and fire the navigation-change signal.
pub fn push_and_notify(url: &str) {
    dom::push_state(url);
    if let Some(window) = dom::window()
        && let Ok(event) = Event::new(events::POPSTATE)
    {
        let _ = window.dispatch_event(&event);
    }
}

/// Navigate to a route path (or a location already under the root).
pub fn navigate_route(config: &SiteConfig, path: &str) {
    push_and_notify(&config.href(&config.route_path(path)));
}

impl Page for BrowserPage {
    fn location_path(&self) -> String {
        format!("{}{}", dom::location_path(), dom::location_search())
    }

    fn location_hash(&self) -> String {
        dom::get_hash()
    }

    fn push_path(&self, url: &str) {
        push_and_notify(url);
    }

    fn replace_path(&self, url: &str) {
        dom::replace_state(url);
    }

    fn on_navigation(&self, handler: Box<dyn Fn()>) {
        let closure = Closure::wrap(Box::new(move |_: Event| handler()) as Box<dyn FnMut(Event)>);

        if let Some(window) = dom::window() {
            let _ = window
                .add_event_listener_with_callback(events::POPSTATE, closure.as_ref().unchecked_ref());
        }

        // Keep the closure alive for the lifetime of the app
        closure.forget();
    }

    fn set_title(&self, title: &str) {
        if let Some(document) = dom::document() {
            document.set_title(title);
        }
    }

    fn has_slot(&self, slot: Slot) -> bool {
        dom::element_by_id(slot.id()).is_some()
    }

    fn set_slot_html(&self, slot: Slot, html: &str) -> bool {
        match dom::element_by_id(slot.id()) {
            Some(element) => {
                element.set_inner_html(html);
                true
            }
            None => false,
        }
    }

    fn set_slot_visible(&self, slot: Slot, visible: bool) {
        if let Some(element) = dom::html_element_by_id(slot.id()) {
            dom::set_style(&element, "display", if visible { "block" } else { "none" });
            if visible {
                dom::set_style(&element, "visibility", "visible");
            }
        }
    }

    fn rerun_scripts(&self, slot: Slot) -> usize {
        let (Some(document), Some(container)) = (dom::document(), dom::element_by_id(slot.id()))
        else {
            return 0;
        };
        let Ok(scripts) = container.query_selector_all("script") else {
            return 0;
        };

        let mut count = 0;
        for i in 0..scripts.length() {
            let Some(old) = scripts.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Ok(fresh) = document.create_element("script") else {
                continue;
            };

            let attributes = old.attributes();
            for j in 0..attributes.length() {
                if let Some(attr) = attributes.item(j) {
                    let _ = fresh.set_attribute(&attr.name(), &attr.value());
                }
            }
            fresh.set_text_content(old.text_content().as_deref());

            if let Some(parent) = old.parent_node()
                && parent.replace_child(&fresh, &old).is_ok()
            {
                count += 1;
            }
        }
        count
    }

    fn mark_nav_links(&self, is_active: &dyn Fn(&str) -> bool) -> usize {
        let links = dom::query_all(".nav-link");
        for link in &links {
            let href = link.get_attribute("href").unwrap_or_default();
            dom::toggle_class(link, "active", is_active(&href));
        }
        links.len()
    }

    fn intercept_links(&self) {
        let Some(body) = dom::body() else {
            warn_log!("No document body; link interception not attached");
            return;
        };

        let config = self.config.clone();
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            if event.default_prevented()
                || event.button() != 0
                || event.ctrl_key()
                || event.meta_key()
                || event.shift_key()
                || event.alt_key()
            {
                return;
            }
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Some(link) = target.closest("a[href^=\"/\"]").ok().flatten() else {
                return;
            };
            if link.get_attribute("target").is_some_and(|t| t == "_blank") {
                return;
            }
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            if !is_internal_href(&href) {
                return;
            }

            event.prevent_default();
            navigate_route(&config, &href);
        }) as Box<dyn FnMut(MouseEvent)>);

        let _ = body.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn wire_chrome(&self) {
        chrome::wire(self);
    }

    fn show_auth_controls(&self, logged_in: bool) {
        chrome::show_auth_controls(self, logged_in);
    }

    fn emit(&self, event: &SiteEvent) {
        let detail = match event {
            SiteEvent::PageLoaded(ready) => serde_wasm_bindgen::to_value(ready),
            SiteEvent::AuthStatusChanged(change) => serde_wasm_bindgen::to_value(change),
            SiteEvent::HeaderLoaded => Ok(JsValue::NULL),
        };
        let detail = detail.unwrap_or_else(|err| {
            error_log!("Could not serialize {} detail: {}", event.name(), err);
            JsValue::NULL
        });

        let init = CustomEventInit::new();
        init.set_detail(&detail);
        let Ok(custom) = CustomEvent::new_with_event_init_dict(event.name(), &init) else {
            return;
        };

        // headerLoaded is a document event; the rest go to window.
        let dispatched = match event {
            SiteEvent::HeaderLoaded => dom::document().map(|d| d.dispatch_event(&custom)),
            _ => dom::window().map(|w| w.dispatch_event(&custom)),
        };
        if let Some(Err(err)) = dispatched {
            error_log!("{} listener failed: {:?}", event.name(), err);
        }
    }

    fn invoke_global(&self, name: &str) -> bool {
        let Some(window) = dom::window() else {
            return false;
        };
        let Ok(value) = js_sys::Reflect::get(&window, &JsValue::from_str(name)) else {
            return false;
        };
        let Some(function) = value.dyn_ref::<js_sys::Function>() else {
            return false;
        };
        if let Err(err) = function.call0(&window) {
            error_log!("{} threw: {:?}", name, err);
        }
        true
    }

    fn scroll_to_top(&self) {
        if let Some(window) = dom::window() {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }
    }

    fn delay(&self, ms: u32) -> impl Future<Output = ()> {
        gloo_timers::future::TimeoutFuture::new(ms)
    }
}
