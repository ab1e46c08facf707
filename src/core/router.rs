//! Path-based page router.
//!
//! Handles URL-based routing with the history API:
//!
//! - **The location is the source of truth**: [`Router::navigate`] only pushes
//!   a history entry; the navigation-change signal then calls
//!   [`Router::handle_route`], so programmatic and back/forward navigation
//!   share one code path
//! - **Chrome before content**: the layout composer settles the header and
//!   footer before the page fragment is fetched
//! - **Stale responses are dropped**: every navigation takes a sequence
//!   number and abandons itself once a newer navigation has started
//! - **Failures are contained**: an unknown path or a failed fragment leads
//!   to at most one redirect to the not-found route

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::{PAGE_ERROR_HTML, SiteConfig, ids};
use crate::core::error::NavigationError;
use crate::core::layout::LayoutComposer;
use crate::core::lifecycle::LifecycleHub;
use crate::core::platform::{Fetcher, Page};
use crate::core::routes::RouteTable;
use crate::models::{
    NavigationState, PageReady, Route, RouterPhase, SharedNavigation, SiteEvent, Slot,
};
use crate::utils::{extract_content, strip_query};
use crate::{debug_log, error_log, info_log};

/// How a call to [`Router::handle_route`] ended.
#[derive(Clone, Debug, PartialEq)]
pub enum NavigationOutcome {
    /// The route's content is in the content slot.
    Rendered(Route),
    /// The navigation ended on the error panel.
    Failed(NavigationError),
    /// A newer navigation started before this one finished.
    Superseded,
}

/// Owns the navigation state and drives page composition.
pub struct Router<P: Page, F: Fetcher> {
    table: RouteTable,
    layout: Rc<LayoutComposer<P, F>>,
    hooks: Rc<LifecycleHub>,
    page: Rc<P>,
    fetcher: Rc<F>,
    config: Rc<SiteConfig>,
    navigation: SharedNavigation,
    phase: Cell<RouterPhase>,
    sequence: Cell<u64>,
}

impl<P: Page, F: Fetcher> Router<P, F> {
    /// Create the router and give the layout composer read access to its
    /// navigation state.
    pub fn new(table: RouteTable, layout: Rc<LayoutComposer<P, F>>, hooks: Rc<LifecycleHub>) -> Self {
        let navigation: SharedNavigation = Rc::new(RefCell::new(NavigationState::default()));
        layout.bind_navigation(navigation.clone());

        Self {
            page: layout.page().clone(),
            fetcher: layout.fetcher().clone(),
            config: layout.config().clone(),
            table,
            layout,
            hooks,
            navigation,
            phase: Cell::new(RouterPhase::Idle),
            sequence: Cell::new(0),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn phase(&self) -> RouterPhase {
        self.phase.get()
    }

    /// Snapshot of the navigation state.
    pub fn navigation(&self) -> NavigationState {
        self.navigation.borrow().clone()
    }

    pub fn current_route(&self) -> Option<Route> {
        self.navigation.borrow().current_route.clone()
    }

    /// Request a transition to `path` (route space, may carry a query).
    ///
    /// Only updates the location; the navigation-change signal does the rest.
    pub fn navigate(&self, path: &str) {
        self.page.push_path(&self.config.href(path));
    }

    /// Listen for navigation changes and render the initial location.
    pub async fn start(self: &Rc<Self>)
    where
        P: 'static,
        F: 'static,
    {
        let router = Rc::downgrade(self);
        self.page.on_navigation(Box::new(move || {
            if let Some(router) = router.upgrade() {
                wasm_bindgen_futures::spawn_local(async move {
                    router.handle_location().await;
                });
            }
        }));

        self.handle_location().await;
    }

    /// Handle whatever the browser location currently points at.
    pub async fn handle_location(&self) -> NavigationOutcome {
        let location = self.page.location_path();
        let path = self.config.route_path(&location);
        self.handle_route(&path).await
    }

    /// Resolve and render `requested`, redirecting at most once to the
    /// not-found route when the path is unknown or its content fails.
    pub async fn handle_route(&self, requested: &str) -> NavigationOutcome {
        let sequence = self.sequence.get() + 1;
        self.sequence.set(sequence);

        let mut path = match strip_query(requested) {
            "" => "/".to_string(),
            p => p.to_string(),
        };
        let mut redirected = false;

        loop {
            let err = match self.render(&path, sequence).await {
                Ok(outcome) => return outcome,
                Err(err) => err,
            };

            let not_found_path = self.table.not_found().path.clone();
            if redirected || path == not_found_path {
                error_log!("Navigation to {} failed: {}", path, err);
                self.phase.set(RouterPhase::Failed);
                return NavigationOutcome::Failed(err);
            }

            match &err {
                NavigationError::RouteNotFound(_) => info_log!("{}, showing not-found page", err),
                _ => error_log!("Route handling error: {}", err),
            }

            redirected = true;
            path = not_found_path;
            self.page.replace_path(&self.config.href(&path));
        }
    }

    fn is_current(&self, sequence: u64) -> bool {
        self.sequence.get() == sequence
    }

    async fn render(&self, path: &str, sequence: u64) -> Result<NavigationOutcome, NavigationError> {
        self.phase.set(RouterPhase::Resolving);

        let route = self.table.resolve(path).clone();
        if self.table.is_not_found(&route) && route.path != path {
            return Err(NavigationError::RouteNotFound(path.to_string()));
        }

        self.page.set_title(route.display_title());
        let layout = route.layout;

        self.phase.set(RouterPhase::LoadingChrome);
        self.layout.ensure_layout(layout).await;
        if !self.is_current(sequence) {
            return Ok(NavigationOutcome::Superseded);
        }

        self.phase.set(RouterPhase::LoadingContent);
        let url = self.config.resource_url(&route.fragment);
        let markup = match self.fetcher.fetch_text(&url).await {
            Ok(markup) => markup,
            Err(source) => {
                if !self.is_current(sequence) {
                    return Ok(NavigationOutcome::Superseded);
                }
                self.page.set_slot_html(Slot::Content, PAGE_ERROR_HTML);
                return Err(NavigationError::ContentLoad { url, source });
            }
        };
        if !self.is_current(sequence) {
            debug_log!("Discarding stale response for {}", url);
            return Ok(NavigationOutcome::Superseded);
        }

        let content = extract_content(&markup);
        if !self.page.set_slot_html(Slot::Content, &content) {
            return Err(NavigationError::SlotMissing(ids::CONTENT));
        }

        {
            let mut nav = self.navigation.borrow_mut();
            nav.current_route = Some(route.clone());
            nav.current_layout = Some(layout);
        }
        self.layout.refresh_active_link();

        if self.config.rerun_fragment_scripts {
            let count = self.page.rerun_scripts(Slot::Content);
            if count > 0 {
                debug_log!("Re-executed {} page script(s)", count);
            }
        }

        let ready = PageReady {
            route: route.clone(),
            layout_kind: layout,
        };
        self.page.emit(&SiteEvent::PageLoaded(ready.clone()));
        self.hooks.notify(&ready);
        if let Some(name) = &route.init {
            self.run_initializer(name, &ready);
        }

        self.page.scroll_to_top();
        self.phase.set(RouterPhase::Ready);
        Ok(NavigationOutcome::Rendered(route))
    }

    /// Registered hooks win over page globals of the same name.
    fn run_initializer(&self, name: &str, ready: &PageReady) {
        if self.hooks.run_initializer(name, ready) {
            debug_log!("Ran initializer {}", name);
        } else if self.page.invoke_global(name) {
            debug_log!("Ran page global {}", name);
        } else {
            debug_log!("No initializer named {}", name);
        }
    }
}
