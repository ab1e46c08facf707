//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`Route`], [`LayoutKind`] - Route table entries
//! - [`NavigationState`], [`RouterPhase`], [`ChromeLoadState`], [`Slot`] - Router and chrome state
//! - [`PageReady`], [`AuthChange`], [`SiteEvent`] - Lifecycle signal payloads
//! - [`UserData`] - Persisted user blob

mod auth;
mod events;
mod navigation;
mod route;

pub use auth::UserData;
pub use events::{AuthChange, PageReady, SiteEvent};
pub use navigation::{ChromeLoadState, NavigationState, RouterPhase, SharedNavigation, Slot};
pub use route::{LayoutKind, Route};
