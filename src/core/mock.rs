//! In-memory implementations of the platform seams.
//!
//! Available under `cfg(test)` and the `mock` feature so integration tests
//! can drive the router without a browser.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::core::error::{FetchError, StorageError};
use crate::core::platform::{Fetcher, KeyValueStore, Page};
use crate::models::{PageReady, SiteEvent, Slot};
use crate::utils::is_internal_href;

// =============================================================================
// MockPage
// =============================================================================

#[derive(Clone, Debug)]
struct NavLink {
    href: String,
    active: bool,
}

/// Recording [`Page`] backed by plain collections.
///
/// All three slots start present, empty and visible.
#[derive(Default)]
pub struct MockPage {
    location: RefCell<String>,
    hash: RefCell<String>,
    title: RefCell<String>,
    slots: RefCell<HashMap<Slot, String>>,
    hidden: RefCell<HashSet<Slot>>,
    restore_on_delay: RefCell<Vec<Slot>>,
    nav_links: RefCell<Vec<NavLink>>,
    pushed: RefCell<Vec<String>>,
    replaced: RefCell<Vec<String>>,
    events: RefCell<Vec<SiteEvent>>,
    globals: RefCell<HashSet<String>>,
    invoked: RefCell<Vec<String>>,
    delays: RefCell<Vec<u32>>,
    auth_controls: Cell<Option<bool>>,
    interceptions: Cell<usize>,
    chrome_wirings: Cell<usize>,
    script_reruns: Cell<usize>,
    scrolls: Cell<usize>,
    navigation_handler: RefCell<Option<Rc<dyn Fn()>>>,
}

impl MockPage {
    pub fn new() -> Self {
        let page = Self::default();
        *page.location.borrow_mut() = "/".to_string();
        {
            let mut slots = page.slots.borrow_mut();
            for slot in [Slot::Header, Slot::Content, Slot::Footer] {
                slots.insert(slot, String::new());
            }
        }
        page
    }

    pub fn set_location(&self, path: &str) {
        *self.location.borrow_mut() = path.to_string();
    }

    pub fn set_hash(&self, hash: &str) {
        *self.hash.borrow_mut() = hash.to_string();
    }

    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    pub fn slot_html(&self, slot: Slot) -> Option<String> {
        self.slots.borrow().get(&slot).cloned()
    }

    pub fn remove_slot(&self, slot: Slot) {
        self.slots.borrow_mut().remove(&slot);
    }

    /// Re-insert `slot` (empty) the next time [`Page::delay`] is awaited.
    pub fn restore_slot_on_delay(&self, slot: Slot) {
        self.restore_on_delay.borrow_mut().push(slot);
    }

    pub fn is_visible(&self, slot: Slot) -> bool {
        !self.hidden.borrow().contains(&slot)
    }

    pub fn set_nav_links(&self, hrefs: &[&str]) {
        *self.nav_links.borrow_mut() = hrefs
            .iter()
            .map(|href| NavLink {
                href: href.to_string(),
                active: false,
            })
            .collect();
    }

    /// Hrefs of navigation entries currently marked active.
    pub fn active_links(&self) -> Vec<String> {
        self.nav_links
            .borrow()
            .iter()
            .filter(|l| l.active)
            .map(|l| l.href.clone())
            .collect()
    }

    pub fn define_global(&self, name: &str) {
        self.globals.borrow_mut().insert(name.to_string());
    }

    pub fn invoked_globals(&self) -> Vec<String> {
        self.invoked.borrow().clone()
    }

    pub fn pushed(&self) -> Vec<String> {
        self.pushed.borrow().clone()
    }

    pub fn replaced(&self) -> Vec<String> {
        self.replaced.borrow().clone()
    }

    pub fn events(&self) -> Vec<SiteEvent> {
        self.events.borrow().clone()
    }

    /// Page-ready payloads emitted so far, in order.
    pub fn page_ready_events(&self) -> Vec<PageReady> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                SiteEvent::PageLoaded(ready) => Some(ready.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.delays.borrow().clone()
    }

    pub fn auth_controls(&self) -> Option<bool> {
        self.auth_controls.get()
    }

    pub fn clear_auth_controls(&self) {
        self.auth_controls.set(None);
    }

    pub fn interceptions(&self) -> usize {
        self.interceptions.get()
    }

    pub fn chrome_wirings(&self) -> usize {
        self.chrome_wirings.get()
    }

    pub fn script_reruns(&self) -> usize {
        self.script_reruns.get()
    }

    pub fn scrolls(&self) -> usize {
        self.scrolls.get()
    }

    pub fn has_navigation_handler(&self) -> bool {
        self.navigation_handler.borrow().is_some()
    }

    /// Simulate a click on an anchor: every attached interceptor handles it.
    pub fn click_link(&self, href: &str) {
        if !is_internal_href(href) {
            return;
        }
        for _ in 0..self.interceptions.get() {
            self.push_path(href);
        }
    }
}

impl Page for MockPage {
    fn location_path(&self) -> String {
        self.location.borrow().clone()
    }

    fn location_hash(&self) -> String {
        self.hash.borrow().clone()
    }

    fn push_path(&self, url: &str) {
        self.pushed.borrow_mut().push(url.to_string());
        self.set_location(url);
        let handler = self.navigation_handler.borrow().clone();
        if let Some(handler) = handler {
            handler();
        }
    }

    fn replace_path(&self, url: &str) {
        self.replaced.borrow_mut().push(url.to_string());
        self.set_location(url);
    }

    fn on_navigation(&self, handler: Box<dyn Fn()>) {
        *self.navigation_handler.borrow_mut() = Some(Rc::from(handler));
    }

    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
    }

    fn has_slot(&self, slot: Slot) -> bool {
        self.slots.borrow().contains_key(&slot)
    }

    fn set_slot_html(&self, slot: Slot, html: &str) -> bool {
        match self.slots.borrow_mut().get_mut(&slot) {
            Some(content) => {
                *content = html.to_string();
                true
            }
            None => false,
        }
    }

    fn set_slot_visible(&self, slot: Slot, visible: bool) {
        let mut hidden = self.hidden.borrow_mut();
        if visible {
            hidden.remove(&slot);
        } else {
            hidden.insert(slot);
        }
    }

    fn rerun_scripts(&self, slot: Slot) -> usize {
        let count = self
            .slot_html(slot)
            .map(|html| html.matches("<script").count())
            .unwrap_or_default();
        self.script_reruns.set(self.script_reruns.get() + count);
        count
    }

    fn mark_nav_links(&self, is_active: &dyn Fn(&str) -> bool) -> usize {
        let mut links = self.nav_links.borrow_mut();
        for link in links.iter_mut() {
            link.active = is_active(&link.href);
        }
        links.len()
    }

    fn intercept_links(&self) {
        self.interceptions.set(self.interceptions.get() + 1);
    }

    fn wire_chrome(&self) {
        self.chrome_wirings.set(self.chrome_wirings.get() + 1);
    }

    fn show_auth_controls(&self, logged_in: bool) {
        self.auth_controls.set(Some(logged_in));
    }

    fn emit(&self, event: &SiteEvent) {
        self.events.borrow_mut().push(event.clone());
    }

    fn invoke_global(&self, name: &str) -> bool {
        if self.globals.borrow().contains(name) {
            self.invoked.borrow_mut().push(name.to_string());
            true
        } else {
            false
        }
    }

    fn scroll_to_top(&self) {
        self.scrolls.set(self.scrolls.get() + 1);
    }

    fn delay(&self, ms: u32) -> impl Future<Output = ()> {
        self.delays.borrow_mut().push(ms);
        let restored: Vec<Slot> = self.restore_on_delay.borrow_mut().drain(..).collect();
        let mut slots = self.slots.borrow_mut();
        for slot in restored {
            slots.entry(slot).or_default();
        }
        std::future::ready(())
    }
}

// =============================================================================
// MockFetcher
// =============================================================================

/// Manually opened barrier for holding a fetch in flight.
#[derive(Clone, Default)]
pub struct Gate(Rc<RefCell<GateState>>);

#[derive(Default)]
struct GateState {
    open: bool,
    wakers: Vec<Waker>,
}

impl Gate {
    pub fn open(&self) {
        let mut state = self.0.borrow_mut();
        state.open = true;
        for waker in state.wakers.drain(..) {
            waker.wake();
        }
    }

    fn wait(&self) -> GateWait {
        GateWait(self.clone())
    }
}

struct GateWait(Gate);

impl Future for GateWait {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = (self.0).0.borrow_mut();
        if state.open {
            Poll::Ready(())
        } else {
            state.wakers.push(cx.waker().clone());
            Poll::Pending
        }
    }
}

/// Scripted [`Fetcher`]. Unknown URLs answer `HttpError(404)`.
#[derive(Default)]
pub struct MockFetcher {
    responses: RefCell<HashMap<String, Result<String, FetchError>>>,
    gates: RefCell<HashMap<String, Gate>>,
    requests: RefCell<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, body: &str) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), Ok(body.to_string()));
    }

    pub fn fail(&self, url: &str, error: FetchError) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), Err(error));
    }

    /// Hold requests for `url` until the returned gate is opened.
    pub fn hold(&self, url: &str) -> Gate {
        let gate = Gate::default();
        self.gates.borrow_mut().insert(url.to_string(), gate.clone());
        gate
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|u| *u == url).count()
    }
}

impl Fetcher for MockFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.requests.borrow_mut().push(url.to_string());

        let gate = self.gates.borrow().get(url).cloned();
        if let Some(gate) = gate {
            gate.wait().await;
        }

        self.responses
            .borrow()
            .get(url)
            .cloned()
            .unwrap_or(Err(FetchError::HttpError(404)))
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// Shared in-memory [`KeyValueStore`]; clones see the same entries.
#[derive(Clone, Default)]
pub struct MemoryStore(Rc<RefCell<HashMap<String, String>>>);

impl MemoryStore {
    pub fn value(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.value(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.insert(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.0.borrow_mut().remove(key);
        Ok(())
    }
}
