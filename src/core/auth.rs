//! Login flag persistence and change broadcasting.
//!
//! There is no real authentication: the flag is a local value the login page
//! sets. The layout composer reads it and subscribes to changes, but never
//! writes it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{LOGIN_PATH, storage_keys};
use crate::core::error::StorageError;
use crate::core::platform::KeyValueStore;
use crate::models::{AuthChange, UserData};
use crate::utils::strip_query;
use crate::warn_log;

/// Listener for login state changes.
pub type AuthListener = Rc<dyn Fn(AuthChange)>;

/// Persisted login flag plus optional user blob.
pub struct AuthStore {
    store: Box<dyn KeyValueStore>,
    listeners: RefCell<Vec<AuthListener>>,
}

impl AuthStore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.store.get(storage_keys::LOGGED_IN).as_deref() == Some("true")
    }

    /// Persist the login flag and broadcast the change.
    ///
    /// Logging in also arms the one-shot post-login refresh.
    pub fn set_login_status(&self, logged_in: bool) -> Result<(), StorageError> {
        let value = if logged_in { "true" } else { "false" };
        self.store.set(storage_keys::LOGGED_IN, value)?;

        self.broadcast(AuthChange {
            is_logged_in: logged_in,
        });

        if logged_in {
            self.store.set(storage_keys::REFRESH_PENDING, "true")?;
        }
        Ok(())
    }

    /// Stored user data, only while logged in.
    ///
    /// Unreadable JSON is logged and treated as absent.
    pub fn user_data(&self) -> Option<UserData> {
        if !self.is_logged_in() {
            return None;
        }
        let raw = self.store.get(storage_keys::USER_DATA)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn_log!("Ignoring unreadable user data: {}", err);
                None
            }
        }
    }

    pub fn set_user_data(&self, user: &UserData) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(user).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(storage_keys::USER_DATA, &json)
    }

    /// Clear the flag and user data, then broadcast the logged-out state.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.store.remove(storage_keys::LOGGED_IN)?;
        self.store.remove(storage_keys::USER_DATA)?;
        self.set_login_status(false)
    }

    pub fn subscribe(&self, listener: impl Fn(AuthChange) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Consume the post-login refresh flag once the user has left the login
    /// page. Returns `true` when the caller should reload.
    pub fn take_pending_refresh(&self, current_path: &str) -> bool {
        if self.store.get(storage_keys::REFRESH_PENDING).as_deref() != Some("true") {
            return false;
        }
        if strip_query(current_path).starts_with(LOGIN_PATH) {
            return false;
        }
        if let Err(err) = self.store.remove(storage_keys::REFRESH_PENDING) {
            warn_log!("Could not clear refresh flag: {}", err);
            return false;
        }
        true
    }

    fn broadcast(&self, change: AuthChange) {
        let listeners: Vec<AuthListener> = self.listeners.borrow().clone();
        for listener in &listeners {
            listener(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::core::mock::MemoryStore;

    fn store() -> (AuthStore, MemoryStore) {
        let backing = MemoryStore::default();
        (AuthStore::new(backing.clone()), backing)
    }

    #[test]
    fn test_login_flag_round_trip() {
        let (auth, backing) = store();
        assert!(!auth.is_logged_in());

        auth.set_login_status(true).unwrap();
        assert!(auth.is_logged_in());
        assert_eq!(backing.value(storage_keys::LOGGED_IN).as_deref(), Some("true"));
        assert_eq!(backing.value(storage_keys::REFRESH_PENDING).as_deref(), Some("true"));

        auth.set_login_status(false).unwrap();
        assert!(!auth.is_logged_in());
    }

    #[test]
    fn test_listeners_receive_changes() {
        let (auth, _) = store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        auth.subscribe(move |change| sink.borrow_mut().push(change.is_logged_in));

        auth.set_login_status(true).unwrap();
        auth.logout().unwrap();
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_user_data_requires_login() {
        let (auth, _) = store();
        let user = UserData {
            name: Some("Asha".to_string()),
            ..UserData::default()
        };
        auth.set_user_data(&user).unwrap();
        assert_eq!(auth.user_data(), None);

        auth.set_login_status(true).unwrap();
        assert_eq!(auth.user_data(), Some(user));
    }

    #[test]
    fn test_corrupt_user_data_is_absent() {
        let (auth, backing) = store();
        auth.set_login_status(true).unwrap();
        backing.insert(storage_keys::USER_DATA, "{not json");
        assert_eq!(auth.user_data(), None);
    }

    #[test]
    fn test_logout_clears_everything() {
        let (auth, backing) = store();
        auth.set_login_status(true).unwrap();
        auth.set_user_data(&UserData::default()).unwrap();
        auth.logout().unwrap();

        assert!(!auth.is_logged_in());
        assert_eq!(backing.value(storage_keys::USER_DATA), None);
        assert_eq!(backing.value(storage_keys::LOGGED_IN).as_deref(), Some("false"));
    }

    #[test]
    fn test_pending_refresh_waits_for_login_page_exit() {
        let (auth, _) = store();
        assert!(!auth.take_pending_refresh("/"));

        auth.set_login_status(true).unwrap();
        assert!(!auth.take_pending_refresh("/login"));
        assert!(!auth.take_pending_refresh("/login?next=/buy"));
        assert!(auth.take_pending_refresh("/buy"));
        assert!(!auth.take_pending_refresh("/buy"));
    }
}
