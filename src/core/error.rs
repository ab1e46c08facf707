//! Custom error types for the application.
//!
//! Provides structured error handling with meaningful error messages
//! and proper error categorization for each domain:
//!
//! - [`FetchError`] - Network/fetch-related errors for HTTP requests
//! - [`NavigationError`] - Failures contained inside a single navigation
//! - [`RouteTableError`] - Invalid route table declarations
//! - [`StorageError`] - localStorage operations for the auth flag

use thiserror::Error;

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, offline, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Invalid response content (not text)
    #[error("Invalid response content")]
    InvalidContent,
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

/// Which chrome element failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromePart {
    Header,
    Footer,
}

impl std::fmt::Display for ChromePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Footer => write!(f, "footer"),
        }
    }
}

/// Errors raised while handling one navigation.
///
/// None of these escape the router: chrome failures are recovered with an
/// inline notice, everything else ends in the not-found redirect or the
/// error panel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigationError {
    /// Header or footer could not be fetched or was empty.
    #[error("{part} failed to load: {reason}")]
    ChromeLoad { part: ChromePart, reason: String },
    /// Page fragment could not be fetched.
    #[error("page {url} failed to load: {source}")]
    ContentLoad { url: String, source: FetchError },
    /// No route matched the requested path.
    #[error("no route for {0}")]
    RouteNotFound(String),
    /// A shell slot required for rendering is not in the document.
    #[error("{0} element not found")]
    SlotMissing(&'static str),
}

/// Invalid route table declarations.
#[derive(Debug, Error)]
pub enum RouteTableError {
    /// TOML could not be parsed into routes.
    #[error("route table parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Two routes share a path.
    #[error("duplicate route path: {0}")]
    DuplicatePath(String),
    /// Two routes share a key.
    #[error("duplicate route key: {0}")]
    DuplicateKey(String),
    /// A route path is not absolute.
    #[error("route path must start with '/': {0}")]
    RelativePath(String),
    /// The not-found sentinel is missing.
    #[error("route table has no not-found route")]
    MissingNotFound,
}

/// Errors from the persisted auth flag.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    /// localStorage not available.
    #[error("localStorage not available")]
    Unavailable,
    /// Failed to write to storage.
    #[error("failed to save to localStorage")]
    WriteFailed,
    /// Failed to remove from storage.
    #[error("failed to remove from localStorage")]
    RemoveFailed,
    /// Stored user data could not be (de)serialized.
    #[error("user data serialization failed: {0}")]
    Serialization(String),
}
