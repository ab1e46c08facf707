//! Browser implementations of the platform seams.
//!
//! - [`BrowserPage`] - [`Page`](crate::core::Page) over the live document
//! - [`BrowserFetcher`], [`LocalStore`] - Fetch API and localStorage
//! - Chrome widgets, page-ready consumers and the fragment script bridge

mod accessibility;
pub mod bridge;
mod chrome;
pub mod consumers;
mod page;
mod store;

pub use accessibility::{Alignment, FontStep, Spacing, Theme};
pub use chrome::ProfileSection;
pub use page::{BrowserPage, navigate_route, push_and_notify};
pub use store::{BrowserFetcher, LocalStore};
