//! Core navigation logic, independent of the browser.
//!
//! This module provides:
//! - [`RouteTable`] path resolution with a not-found fallback
//! - [`LayoutComposer`] header/footer chrome management
//! - [`Router`] navigation state machine and page composition
//! - [`LifecycleHub`] page-ready consumers
//! - [`AuthStore`] login flag persistence
//! - [`Page`], [`Fetcher`], [`KeyValueStore`] platform seams

pub mod auth;
pub mod error;
pub mod layout;
pub mod lifecycle;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod platform;
pub mod router;
pub mod routes;

pub use auth::AuthStore;
pub use layout::LayoutComposer;
pub use lifecycle::{LifecycleHub, PageHook};
pub use platform::{Fetcher, KeyValueStore, Page};
pub use router::{NavigationOutcome, Router};
pub use routes::RouteTable;
