//! Browser-backed fetch and storage seams.

use crate::core::error::{FetchError, StorageError};
use crate::core::platform::{Fetcher, KeyValueStore};
use crate::utils::{dom, fetch_text};

/// [`Fetcher`] over the Fetch API with the standard timeout.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserFetcher;

impl Fetcher for BrowserFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        fetch_text(url).await
    }
}

/// [`KeyValueStore`] over `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        dom::local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        dom::local_storage()
            .ok_or(StorageError::Unavailable)?
            .set_item(key, value)
            .map_err(|_| StorageError::WriteFailed)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        dom::local_storage()
            .ok_or(StorageError::Unavailable)?
            .remove_item(key)
            .map_err(|_| StorageError::RemoveFailed)
    }
}
