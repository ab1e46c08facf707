//! Root application module.
//!
//! Contains the [`App`] component and the startup sequence that wires the
//! browser seams into the router.

use std::rc::Rc;

use leptos::prelude::*;

use crate::components::{Shell, StartupError};
use crate::config::SiteConfig;
use crate::core::{AuthStore, LayoutComposer, LifecycleHub, RouteTable, Router};
use crate::core::platform::Page;
use crate::models::SiteEvent;
use crate::utils::dom;
use crate::web::{BrowserFetcher, BrowserPage, LocalStore, bridge, consumers};
use crate::{error_log, info_log};

/// Router over the live document.
pub type SiteRouter = Router<BrowserPage, BrowserFetcher>;

/// Root application component.
///
/// Renders the shell, or the startup error when the site cannot boot.
#[component]
pub fn App(#[prop(optional)] startup_error: Option<String>) -> impl IntoView {
    match startup_error {
        Some(reason) => view! { <StartupError reason=reason /> }.into_any(),
        None => view! { <Shell /> }.into_any(),
    }
}

/// Deployment configuration read from the document.
///
/// `<meta name="site-root">` sets the root; `<meta name="chrome-prefixes">`
/// adds comma-separated chrome lookup locations; `<meta name="fragment-scripts"
/// content="off">` disables inline script re-execution.
pub fn site_config() -> SiteConfig {
    let root = dom::meta_content("site-root").unwrap_or_else(|| "/".to_string());
    let prefixes = dom::meta_content("chrome-prefixes")
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let scripts = dom::meta_content("fragment-scripts").is_none_or(|v| v != "off");

    SiteConfig::from_root(&root)
        .with_chrome_prefixes(prefixes)
        .with_fragment_scripts(scripts)
}

/// Build the router and its collaborators, then render the initial location.
///
/// Must run after the shell is mounted so the slots exist.
pub async fn boot(table: RouteTable) {
    let config = Rc::new(site_config());
    let page = Rc::new(BrowserPage::new(config.clone()));
    let auth = Rc::new(AuthStore::new(LocalStore));

    {
        let page = page.clone();
        auth.subscribe(move |change| page.emit(&SiteEvent::AuthStatusChanged(change)));
    }
    page.attach_auth(auth.clone());

    let layout = Rc::new(LayoutComposer::new(page, Rc::new(BrowserFetcher), config));
    layout.bind_auth(auth.clone());

    let hooks = Rc::new(LifecycleHub::new());
    consumers::register(&hooks, auth.clone());

    let router: Rc<SiteRouter> = Rc::new(Router::new(table, layout, hooks));

    // The bridge owns the router for the rest of the page session.
    let owner = router.clone();
    bridge::install(Rc::new(move |path: &str| owner.navigate(path)), auth);

    info_log!("Router starting with {} routes", router.table().len());
    router.start().await;
}

/// Load the route table, logging why it is unusable.
pub fn load_routes() -> Result<RouteTable, String> {
    RouteTable::site().map_err(|err| {
        error_log!("Route table invalid: {}", err);
        err.to_string()
    })
}
