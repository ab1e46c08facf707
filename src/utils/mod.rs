//! Utility modules for web, DOM, and markup operations.
//!
//! Provides:
//! - [`fetch_text`] - Network fetching with timeout
//! - [`extract_content`] - Page fragment extraction from full documents
//! - [`join_path`], [`strip_query`] and friends - URL path helpers
//! - [`dom`] - Browser API accessors

pub mod dom;
mod fetch;
mod html;
mod url;

pub use fetch::fetch_text;
pub use html::extract_content;
pub use url::{is_internal_href, join_path, normalize_root, path_from_hash, strip_query, strip_root};
