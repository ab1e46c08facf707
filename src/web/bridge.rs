//! Globals for scripts embedded in page fragments.
//!
//! Fragment markup (login form, profile dashboard) calls into the shell
//! through `window.Router.navigate` and the `window.*` auth functions.

use std::rc::Rc;

use js_sys::{Object, Reflect};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::WasmClosure;
use wasm_bindgen::prelude::Closure;

use crate::config::LOGIN_PATH;
use crate::core::AuthStore;
use crate::models::UserData;
use crate::utils::dom;
use crate::{error_log, warn_log};

/// Route-space navigation callback.
pub type Navigate = Rc<dyn Fn(&str)>;

/// Install `window.Router` and the auth helpers.
pub fn install(navigate: Navigate, auth: Rc<AuthStore>) {
    let Some(window) = dom::window() else {
        return;
    };
    let window: &JsValue = window.as_ref();

    let router = Object::new();
    {
        let navigate = navigate.clone();
        set_function(&router, "navigate", Closure::<dyn Fn(String)>::new(move |path: String| {
            navigate(&path)
        }));
    }
    if Reflect::set(window, &JsValue::from_str("Router"), &router).is_err() {
        error_log!("Could not install window.Router");
    }

    {
        let auth = auth.clone();
        set_function(window, "isLoggedIn", Closure::<dyn Fn() -> bool>::new(move || {
            auth.is_logged_in()
        }));
    }
    {
        let auth = auth.clone();
        set_function(window, "setLoginStatus", Closure::<dyn Fn(bool)>::new(move |status: bool| {
            if let Err(err) = auth.set_login_status(status) {
                warn_log!("setLoginStatus failed: {}", err);
            }
        }));
    }
    {
        let auth = auth.clone();
        set_function(window, "getUserData", Closure::<dyn Fn() -> JsValue>::new(move || {
            // Plain object rather than a JS Map; user data carries flattened extras.
            let serializer = serde_wasm_bindgen::Serializer::json_compatible();
            auth.user_data()
                .and_then(|user| user.serialize(&serializer).ok())
                .unwrap_or(JsValue::NULL)
        }));
    }
    {
        let auth = auth.clone();
        set_function(window, "setUserData", Closure::<dyn Fn(JsValue)>::new(move |data: JsValue| {
            let stored = serde_wasm_bindgen::from_value::<UserData>(data)
                .map_err(|e| e.to_string())
                .and_then(|user| auth.set_user_data(&user).map_err(|e| e.to_string()));
            if let Err(err) = stored {
                warn_log!("setUserData failed: {}", err);
            }
        }));
    }
    {
        let auth = auth.clone();
        set_function(window, "logout", Closure::<dyn Fn()>::new(move || {
            if let Err(err) = auth.logout() {
                warn_log!("logout failed: {}", err);
            }
        }));
    }
    set_function(window, "requireLogin", Closure::<dyn Fn(JsValue) -> bool>::new(move |redirect: JsValue| {
        if auth.is_logged_in() {
            return true;
        }
        let target = redirect.as_string().unwrap_or_else(|| LOGIN_PATH.to_string());
        navigate(&target);
        false
    }));
}

fn set_function<T: ?Sized + WasmClosure>(target: &JsValue, name: &str, closure: Closure<T>) {
    if Reflect::set(target, &JsValue::from_str(name), closure.as_ref()).is_err() {
        error_log!("Could not install {}", name);
    }
    closure.forget();
}
