//! Layout composer: shared chrome around the routed content.
//!
//! Loads header and footer fragments into their placeholders according to
//! the route's [`LayoutKind`], wires chrome-local widgets after every load,
//! and owns the one-time body-level link interception.
//!
//! Chrome failures never propagate. A placeholder that cannot be filled
//! shows an inline notice and the page keeps rendering.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::join;

use crate::config::{
    DOM_SETTLE_MS, FOOTER_FAILURE_HTML, FOOTER_FRAGMENT, HEADER_FAILURE_HTML, HEADER_FRAGMENT,
    PLACEHOLDER_RETRY_MS, SiteConfig,
};
use crate::core::auth::AuthStore;
use crate::core::error::{ChromePart, NavigationError};
use crate::core::platform::{Fetcher, Page};
use crate::models::{ChromeLoadState, LayoutKind, SharedNavigation, SiteEvent, Slot};
use crate::utils::{path_from_hash, strip_query};
use crate::{debug_log, error_log, info_log, warn_log};

/// Prepares header/footer chrome for each navigation.
pub struct LayoutComposer<P: Page, F: Fetcher> {
    page: Rc<P>,
    fetcher: Rc<F>,
    config: Rc<SiteConfig>,
    state: Cell<ChromeLoadState>,
    current_layout: Cell<Option<LayoutKind>>,
    generation: Cell<u64>,
    navigation: RefCell<Option<SharedNavigation>>,
    auth: RefCell<Option<Rc<AuthStore>>>,
}

impl<P: Page, F: Fetcher> LayoutComposer<P, F> {
    pub fn new(page: Rc<P>, fetcher: Rc<F>, config: Rc<SiteConfig>) -> Self {
        Self {
            page,
            fetcher,
            config,
            state: Cell::new(ChromeLoadState::default()),
            current_layout: Cell::new(None),
            generation: Cell::new(0),
            navigation: RefCell::new(None),
            auth: RefCell::new(None),
        }
    }

    pub fn page(&self) -> &Rc<P> {
        &self.page
    }

    pub fn fetcher(&self) -> &Rc<F> {
        &self.fetcher
    }

    pub fn config(&self) -> &Rc<SiteConfig> {
        &self.config
    }

    pub fn state(&self) -> ChromeLoadState {
        self.state.get()
    }

    /// Layout most recently requested through [`Self::ensure_layout`].
    pub fn current_layout(&self) -> Option<LayoutKind> {
        self.current_layout.get()
    }

    /// Give the composer read access to the router's navigation state.
    pub fn bind_navigation(&self, navigation: SharedNavigation) {
        *self.navigation.borrow_mut() = Some(navigation);
    }

    /// Reflect the login flag in the header and follow its changes.
    pub fn bind_auth(self: &Rc<Self>, auth: Rc<AuthStore>)
    where
        P: 'static,
        F: 'static,
    {
        let weak = Rc::downgrade(self);
        auth.subscribe(move |change| {
            if let Some(composer) = weak.upgrade() {
                composer.page.show_auth_controls(change.is_logged_in);
            }
        });
        *self.auth.borrow_mut() = Some(auth);
        self.apply_auth_state();
    }

    /// Prepare chrome for `kind`. Always resolves, whatever failed.
    ///
    /// Starts a new chrome generation: loads still in flight from an earlier
    /// call stop touching the placeholders once they resume.
    pub async fn ensure_layout(&self, kind: LayoutKind) {
        self.current_layout.set(Some(kind));
        self.generation.set(self.generation.get() + 1);

        match (kind.loads_header(), kind.loads_footer()) {
            // Settle both: one side failing must not cancel the other.
            (true, true) => {
                join(self.load_header(), self.load_footer()).await;
            }
            (true, false) => self.load_header().await,
            (false, true) => self.load_footer().await,
            (false, false) if kind.hides_chrome() => self.hide_placeholders(),
            (false, false) => {}
        }

        if kind.intercepts_links() {
            self.attach_navigation();
        }
    }

    /// Reload the header. A failure leaves an inline notice in the placeholder.
    pub async fn load_header(&self) {
        let generation = self.generation.get();

        if !self.page.has_slot(Slot::Header) {
            warn_log!("Header placeholder not found in DOM, retrying");
            self.page.delay(PLACEHOLDER_RETRY_MS).await;
            if !self.is_current(generation) {
                return;
            }
            if !self.page.has_slot(Slot::Header) {
                error_log!("{}", NavigationError::SlotMissing(Slot::Header.id()));
                return;
            }
        }

        self.page.set_slot_html(Slot::Header, "");
        self.update(|s| s.header_loaded = false);

        let fetched = self.fetch_chrome(ChromePart::Header, HEADER_FRAGMENT).await;
        if !self.is_current(generation) {
            debug_log!("Discarding superseded header load");
            return;
        }

        match fetched {
            Ok(html) => {
                self.page.set_slot_html(Slot::Header, &html);
                self.page.set_slot_visible(Slot::Header, true);
                self.update(|s| s.header_loaded = true);

                self.page.delay(DOM_SETTLE_MS).await;
                if self.is_current(generation) {
                    self.wire_chrome();
                }
            }
            Err(err) => {
                self.page.set_slot_html(Slot::Header, HEADER_FAILURE_HTML);
                error_log!("Header load error: {}", err);
            }
        }
    }

    /// Reload the footer. A failure leaves an inline notice in the placeholder.
    pub async fn load_footer(&self) {
        let generation = self.generation.get();

        if !self.page.has_slot(Slot::Footer) {
            warn_log!("Footer placeholder not found");
            return;
        }

        self.page.set_slot_html(Slot::Footer, "");
        self.update(|s| s.footer_loaded = false);

        let fetched = self.fetch_chrome(ChromePart::Footer, FOOTER_FRAGMENT).await;
        if !self.is_current(generation) {
            debug_log!("Discarding superseded footer load");
            return;
        }

        match fetched {
            Ok(html) => {
                self.page.set_slot_html(Slot::Footer, &html);
                self.page.set_slot_visible(Slot::Footer, true);
                self.update(|s| s.footer_loaded = true);
            }
            Err(err) => {
                self.page.set_slot_html(Slot::Footer, FOOTER_FAILURE_HTML);
                error_log!("Footer load error: {}", err);
            }
        }
    }

    /// Hide both placeholders, keeping them in the DOM for later layouts.
    pub fn hide_placeholders(&self) {
        self.page.set_slot_visible(Slot::Header, false);
        self.page.set_slot_visible(Slot::Footer, false);
    }

    /// Attach body-level link interception (once per page lifetime) and
    /// refresh the active navigation entry.
    pub fn attach_navigation(&self) {
        if !self.state.get().listeners_attached {
            self.page.intercept_links();
            self.update(|s| s.listeners_attached = true);
            debug_log!("Navigation link interception attached");
        }
        self.refresh_active_link();
    }

    /// Mark the navigation entry matching the current path as active.
    ///
    /// Uses the router's current route when bound and populated, otherwise
    /// the path parsed from the location. Returns the number of entries seen.
    pub fn refresh_active_link(&self) -> usize {
        let current = self.current_path();
        let href = self.config.href(&current);
        self.page
            .mark_nav_links(&|target: &str| target == current || target == href)
    }

    fn current_path(&self) -> String {
        let routed = self
            .navigation
            .borrow()
            .as_ref()
            .and_then(|nav| nav.borrow().current_path().map(str::to_string));
        if let Some(path) = routed {
            return path;
        }

        path_from_hash(&self.page.location_hash()).unwrap_or_else(|| {
            let location = self.page.location_path();
            self.config.route_path(strip_query(&location))
        })
    }

    fn wire_chrome(&self) {
        self.page.wire_chrome();
        self.apply_auth_state();
        self.page.emit(&SiteEvent::HeaderLoaded);
    }

    fn apply_auth_state(&self) {
        if let Some(auth) = self.auth.borrow().as_ref() {
            self.page.show_auth_controls(auth.is_logged_in());
        }
    }

    /// Try each candidate location in order until one succeeds.
    async fn fetch_chrome(&self, part: ChromePart, fragment: &str) -> Result<String, NavigationError> {
        let mut last_error = None;

        for url in self.config.chrome_candidates(fragment) {
            match self.fetcher.fetch_text(&url).await {
                Ok(html) => {
                    if part == ChromePart::Header && html.trim().is_empty() {
                        return Err(NavigationError::ChromeLoad {
                            part,
                            reason: format!("empty markup from {}", url),
                        });
                    }
                    info_log!("{} loaded from {}", part, url);
                    return Ok(html);
                }
                Err(err) => {
                    debug_log!("{} candidate {} failed: {}", part, url, err);
                    last_error = Some(err);
                }
            }
        }

        Err(NavigationError::ChromeLoad {
            part,
            reason: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no candidate locations".to_string()),
        })
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }

    fn update(&self, f: impl FnOnce(&mut ChromeLoadState)) {
        let mut state = self.state.get();
        f(&mut state);
        self.state.set(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FetchError;
    use crate::core::mock::{MemoryStore, MockFetcher, MockPage};
    use crate::models::{NavigationState, Route};

    const HEADER: &str = "<header><a class=\"nav-link\" href=\"/\">Home</a></header>";
    const FOOTER: &str = "<footer>Publications Division</footer>";

    fn composer(page: &Rc<MockPage>, fetcher: &Rc<MockFetcher>) -> Rc<LayoutComposer<MockPage, MockFetcher>> {
        Rc::new(LayoutComposer::new(
            page.clone(),
            fetcher.clone(),
            Rc::new(SiteConfig::default()),
        ))
    }

    fn chrome_fetcher() -> Rc<MockFetcher> {
        let fetcher = MockFetcher::new();
        fetcher.respond("/components/header.html", HEADER);
        fetcher.respond("/components/footer.html", FOOTER);
        Rc::new(fetcher)
    }

    #[tokio::test]
    async fn test_default_layout_loads_both() {
        let page = Rc::new(MockPage::new());
        let fetcher = chrome_fetcher();
        let layout = composer(&page, &fetcher);

        layout.ensure_layout(LayoutKind::Default).await;

        assert_eq!(page.slot_html(Slot::Header).as_deref(), Some(HEADER));
        assert_eq!(page.slot_html(Slot::Footer).as_deref(), Some(FOOTER));
        let state = layout.state();
        assert!(state.header_loaded && state.footer_loaded && state.listeners_attached);
        assert_eq!(page.chrome_wirings(), 1);
        assert!(page.events().contains(&SiteEvent::HeaderLoaded));
        assert_eq!(layout.current_layout(), Some(LayoutKind::Default));
    }

    #[tokio::test]
    async fn test_header_failure_is_isolated() {
        let page = Rc::new(MockPage::new());
        let fetcher = Rc::new(MockFetcher::new());
        fetcher.fail("/components/header.html", FetchError::HttpError(500));
        fetcher.respond("/components/footer.html", FOOTER);
        let layout = composer(&page, &fetcher);

        layout.ensure_layout(LayoutKind::Default).await;

        assert_eq!(page.slot_html(Slot::Footer).as_deref(), Some(FOOTER));
        assert_eq!(page.slot_html(Slot::Header).as_deref(), Some(HEADER_FAILURE_HTML));
        let state = layout.state();
        assert!(!state.header_loaded);
        assert!(state.footer_loaded);
        assert_eq!(page.chrome_wirings(), 0);
        assert!(state.listeners_attached);
    }

    #[tokio::test]
    async fn test_footer_failure_is_isolated() {
        let page = Rc::new(MockPage::new());
        let fetcher = Rc::new(MockFetcher::new());
        fetcher.respond("/components/header.html", HEADER);
        let layout = composer(&page, &fetcher);

        layout.ensure_layout(LayoutKind::Default).await;

        assert_eq!(page.slot_html(Slot::Header).as_deref(), Some(HEADER));
        assert_eq!(page.slot_html(Slot::Footer).as_deref(), Some(FOOTER_FAILURE_HTML));
        assert!(layout.state().header_loaded);
        assert!(!layout.state().footer_loaded);
    }

    #[tokio::test]
    async fn test_empty_header_is_failure() {
        let page = Rc::new(MockPage::new());
        let fetcher = Rc::new(MockFetcher::new());
        fetcher.respond("/components/header.html", "   \n");
        let layout = composer(&page, &fetcher);

        layout.load_header().await;

        assert_eq!(page.slot_html(Slot::Header).as_deref(), Some(HEADER_FAILURE_HTML));
        assert!(!layout.state().header_loaded);
    }

    #[tokio::test]
    async fn test_auth_layout_loads_header_only() {
        let page = Rc::new(MockPage::new());
        let fetcher = chrome_fetcher();
        let layout = composer(&page, &fetcher);

        layout.ensure_layout(LayoutKind::Auth).await;

        assert_eq!(page.slot_html(Slot::Header).as_deref(), Some(HEADER));
        assert_eq!(page.slot_html(Slot::Footer).as_deref(), Some(""));
        assert_eq!(fetcher.request_count("/components/footer.html"), 0);
    }

    #[tokio::test]
    async fn test_content_only_hides_placeholders() {
        let page = Rc::new(MockPage::new());
        let fetcher = chrome_fetcher();
        let layout = composer(&page, &fetcher);

        layout.ensure_layout(LayoutKind::ContentOnly).await;

        assert!(fetcher.requests().is_empty());
        assert!(page.has_slot(Slot::Header));
        assert!(!page.is_visible(Slot::Header));
        assert!(!page.is_visible(Slot::Footer));
        assert!(layout.state().listeners_attached);

        // A later default layout shows them again.
        layout.ensure_layout(LayoutKind::Default).await;
        assert!(page.is_visible(Slot::Header));
        assert!(page.is_visible(Slot::Footer));
    }

    #[tokio::test]
    async fn test_minimal_and_none() {
        let page = Rc::new(MockPage::new());
        let fetcher = chrome_fetcher();
        let layout = composer(&page, &fetcher);

        layout.ensure_layout(LayoutKind::None).await;
        assert!(!layout.state().listeners_attached);
        assert_eq!(page.interceptions(), 0);

        layout.ensure_layout(LayoutKind::Minimal).await;
        assert!(fetcher.requests().is_empty());
        assert!(page.is_visible(Slot::Header));
        assert_eq!(page.interceptions(), 1);
    }

    #[tokio::test]
    async fn test_link_interception_attached_once() {
        let page = Rc::new(MockPage::new());
        let fetcher = chrome_fetcher();
        let layout = composer(&page, &fetcher);

        layout.ensure_layout(LayoutKind::Default).await;
        layout.ensure_layout(LayoutKind::Default).await;

        assert_eq!(page.interceptions(), 1);
        assert_eq!(page.chrome_wirings(), 2);

        page.click_link("/about");
        assert_eq!(page.pushed(), vec!["/about".to_string()]);
    }

    #[tokio::test]
    async fn test_header_placeholder_retry() {
        let page = Rc::new(MockPage::new());
        page.remove_slot(Slot::Header);
        page.restore_slot_on_delay(Slot::Header);
        let fetcher = chrome_fetcher();
        let layout = composer(&page, &fetcher);

        layout.load_header().await;

        assert_eq!(page.delays().first(), Some(&PLACEHOLDER_RETRY_MS));
        assert_eq!(page.slot_html(Slot::Header).as_deref(), Some(HEADER));
    }

    #[tokio::test]
    async fn test_header_placeholder_missing_gives_up() {
        let page = Rc::new(MockPage::new());
        page.remove_slot(Slot::Header);
        let fetcher = chrome_fetcher();
        let layout = composer(&page, &fetcher);

        layout.load_header().await;

        assert!(fetcher.requests().is_empty());
        assert!(!layout.state().header_loaded);
    }

    #[tokio::test]
    async fn test_candidates_tried_in_order() {
        let page = Rc::new(MockPage::new());
        let fetcher = Rc::new(MockFetcher::new());
        fetcher.respond("../components/header.html", HEADER);
        let config = SiteConfig::default()
            .with_chrome_prefixes(vec!["/".to_string(), "".to_string(), "../".to_string()]);
        let layout = LayoutComposer::new(page.clone(), fetcher.clone(), Rc::new(config));

        layout.load_header().await;

        assert_eq!(
            fetcher.requests(),
            vec![
                "/components/header.html".to_string(),
                "components/header.html".to_string(),
                "../components/header.html".to_string(),
            ]
        );
        assert!(layout.state().header_loaded);
    }

    #[test]
    fn test_refresh_active_link_without_router() {
        let page = Rc::new(MockPage::new());
        page.set_nav_links(&["/", "/about", "/buy"]);
        page.set_hash("#/about");
        let fetcher = Rc::new(MockFetcher::new());
        let layout = composer(&page, &fetcher);

        assert_eq!(layout.refresh_active_link(), 3);
        assert_eq!(page.active_links(), vec!["/about".to_string()]);

        page.set_hash("");
        page.set_location("/buy?ref=home");
        layout.refresh_active_link();
        assert_eq!(page.active_links(), vec!["/buy".to_string()]);
    }

    #[test]
    fn test_refresh_active_link_follows_navigation_state() {
        let page = Rc::new(MockPage::new());
        page.set_nav_links(&["/", "/about", "/buy"]);
        page.set_location("/");
        let fetcher = Rc::new(MockFetcher::new());
        let layout = composer(&page, &fetcher);

        let nav: SharedNavigation = Rc::new(RefCell::new(NavigationState::default()));
        layout.bind_navigation(nav.clone());
        layout.refresh_active_link();
        assert_eq!(page.active_links(), vec!["/".to_string()]);

        nav.borrow_mut().current_route = Some(Route::new("buy", "/buy", "pages/buy.html", "Buy"));
        layout.refresh_active_link();
        assert_eq!(page.active_links(), vec!["/buy".to_string()]);
    }

    #[tokio::test]
    async fn test_auth_controls_follow_store() {
        let page = Rc::new(MockPage::new());
        let fetcher = chrome_fetcher();
        let layout = composer(&page, &fetcher);
        let auth = Rc::new(AuthStore::new(MemoryStore::default()));

        layout.bind_auth(auth.clone());
        assert_eq!(page.auth_controls(), Some(false));

        auth.set_login_status(true).unwrap();
        assert_eq!(page.auth_controls(), Some(true));

        // Reloaded chrome picks up the current flag.
        page.clear_auth_controls();
        layout.load_header().await;
        assert_eq!(page.auth_controls(), Some(true));
    }

    #[tokio::test]
    async fn test_superseded_header_stays_out_of_content_only_page() {
        let page = Rc::new(MockPage::new());
        let fetcher = chrome_fetcher();
        let gate = fetcher.hold("/components/header.html");
        let layout = composer(&page, &fetcher);

        tokio::join!(layout.ensure_layout(LayoutKind::Default), async {
            layout.ensure_layout(LayoutKind::ContentOnly).await;
            gate.open();
        });

        assert_eq!(layout.current_layout(), Some(LayoutKind::ContentOnly));
        assert!(!page.is_visible(Slot::Header));
        assert!(!page.is_visible(Slot::Footer));
        assert_eq!(page.slot_html(Slot::Header).as_deref(), Some(""));
        assert!(!layout.state().header_loaded);
        assert_eq!(page.chrome_wirings(), 0);
        assert!(!page.events().contains(&SiteEvent::HeaderLoaded));
    }

    #[tokio::test]
    async fn test_overlapping_header_loads_wire_once() {
        let page = Rc::new(MockPage::new());
        let fetcher = chrome_fetcher();
        let gate = fetcher.hold("/components/header.html");
        let layout = composer(&page, &fetcher);

        tokio::join!(
            layout.ensure_layout(LayoutKind::Default),
            layout.ensure_layout(LayoutKind::Default),
            async { gate.open() }
        );

        assert_eq!(fetcher.request_count("/components/header.html"), 2);
        assert_eq!(page.slot_html(Slot::Header).as_deref(), Some(HEADER));
        assert_eq!(page.chrome_wirings(), 1);
        let header_events = page
            .events()
            .iter()
            .filter(|e| matches!(e, SiteEvent::HeaderLoaded))
            .count();
        assert_eq!(header_events, 1);
    }

    #[tokio::test]
    async fn test_footer_cleared_while_loading() {
        let page = Rc::new(MockPage::new());
        page.set_slot_html(Slot::Footer, "<footer>previous</footer>");
        let fetcher = chrome_fetcher();
        let gate = fetcher.hold("/components/footer.html");
        let layout = composer(&page, &fetcher);

        let in_flight = RefCell::new(None);
        tokio::join!(layout.load_footer(), async {
            *in_flight.borrow_mut() = page.slot_html(Slot::Footer);
            gate.open();
        });

        assert_eq!(in_flight.into_inner().as_deref(), Some(""));
        assert_eq!(page.slot_html(Slot::Footer).as_deref(), Some(FOOTER));
        assert!(layout.state().footer_loaded);
    }
}
