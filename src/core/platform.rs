//! Seams between the navigation core and the browser.
//!
//! The router, layout composer and auth store only talk to the outside world
//! through these traits. [`crate::web`] implements them with `web-sys`; the
//! [`crate::core::mock`] module implements them in memory for tests.

use std::future::Future;

use crate::core::error::{FetchError, StorageError};
use crate::models::{SiteEvent, Slot};

/// Document, history and event effects.
pub trait Page {
    /// Current location path plus query string (e.g. `/buy?id=3`).
    fn location_path(&self) -> String;

    /// Current location hash including `#`, or empty.
    fn location_hash(&self) -> String;

    /// Add a history entry for `url` and fire the navigation-change signal.
    fn push_path(&self, url: &str);

    /// Replace the current history entry. Does not fire the signal.
    fn replace_path(&self, url: &str);

    /// Register the navigation-change handler (back/forward and `push_path`).
    fn on_navigation(&self, handler: Box<dyn Fn()>);

    fn set_title(&self, title: &str);

    fn has_slot(&self, slot: Slot) -> bool;

    /// Replace a slot's markup. Returns `false` when the slot is missing.
    fn set_slot_html(&self, slot: Slot, html: &str) -> bool;

    /// Show or hide a slot without removing it.
    fn set_slot_visible(&self, slot: Slot, visible: bool);

    /// Re-create every `<script>` in the slot so it executes, in document
    /// order. Returns the number of scripts re-created.
    fn rerun_scripts(&self, slot: Slot) -> usize;

    /// Set the active marker on each navigation entry for which `is_active`
    /// returns true for its `href`, clearing it elsewhere. Returns the
    /// number of entries visited.
    fn mark_nav_links(&self, is_active: &dyn Fn(&str) -> bool) -> usize;

    /// Attach the body-level click listener that turns in-site link clicks
    /// into `push_path` calls.
    fn intercept_links(&self);

    /// Wire interactivity inside freshly injected chrome.
    fn wire_chrome(&self);

    /// Toggle the header's login/profile controls.
    fn show_auth_controls(&self, logged_in: bool);

    /// Dispatch a lifecycle event to script consumers.
    fn emit(&self, event: &SiteEvent);

    /// Call a page-global function by name. Returns `false` when absent.
    fn invoke_global(&self, name: &str) -> bool;

    fn scroll_to_top(&self);

    /// Yield for `ms` milliseconds to let the DOM settle.
    fn delay(&self, ms: u32) -> impl Future<Output = ()>;
}

/// Fragment transport.
pub trait Fetcher {
    /// GET `url` as UTF-8 text. Non-2xx responses are errors.
    fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String, FetchError>>;
}

/// String key/value persistence (localStorage in the browser).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
