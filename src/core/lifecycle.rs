//! Page lifecycle consumers.
//!
//! Two kinds of consumers react to the page-ready signal:
//! - subscribers run on every navigation (skip links, auth refresh checks)
//! - named initializers run only for routes that declare them via `init`

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::models::PageReady;

/// Callback receiving the page-ready payload.
pub type PageHook = Rc<dyn Fn(&PageReady)>;

/// Registry of page-ready consumers.
#[derive(Default)]
pub struct LifecycleHub {
    subscribers: RefCell<Vec<PageHook>>,
    initializers: RefCell<HashMap<String, PageHook>>,
}

impl LifecycleHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `hook` after every successful navigation.
    pub fn subscribe(&self, hook: impl Fn(&PageReady) + 'static) {
        self.subscribers.borrow_mut().push(Rc::new(hook));
    }

    /// Register a page initializer under `name`, replacing any previous one.
    pub fn register_initializer(&self, name: impl Into<String>, hook: impl Fn(&PageReady) + 'static) {
        self.initializers
            .borrow_mut()
            .insert(name.into(), Rc::new(hook));
    }

    /// Deliver the signal to every subscriber. Returns how many ran.
    pub fn notify(&self, ready: &PageReady) -> usize {
        // Snapshot so hooks may subscribe further consumers.
        let hooks: Vec<PageHook> = self.subscribers.borrow().clone();
        for hook in &hooks {
            hook(ready);
        }
        hooks.len()
    }

    /// Run the initializer named `name`. Returns `false` if none is registered.
    pub fn run_initializer(&self, name: &str, ready: &PageReady) -> bool {
        let hook = self.initializers.borrow().get(name).cloned();
        match hook {
            Some(hook) => {
                hook(ready);
                true
            }
            None => false,
        }
    }
}
