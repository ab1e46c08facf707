//! Network fetching utilities with timeout support.
//!
//! Provides the Fetch API wrapper used for chrome and page fragments.

use js_sys::{Array, Promise};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, Window};

use crate::config::FETCH_TIMEOUT_MS;
use crate::core::error::FetchError;

/// Fetch UTF-8 text from a same-origin URL with the standard timeout.
///
/// Any non-2xx status is reported as [`FetchError::HttpError`].
pub async fn fetch_text(url: &str) -> Result<String, FetchError> {
    fetch_text_within(url, FETCH_TIMEOUT_MS).await
}

/// Fetch UTF-8 text, giving up after `timeout_ms`.
async fn fetch_text_within(url: &str, timeout_ms: i32) -> Result<String, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| FetchError::RequestCreationFailed)?;

    let result = settle_within(&window, window.fetch_with_request(&request), timeout_ms).await?;
    let resp: Response = result.dyn_into().map_err(|_| FetchError::InvalidContent)?;

    if !resp.ok() {
        return Err(FetchError::HttpError(resp.status()));
    }

    let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
        .await
        .map_err(|_| FetchError::ResponseReadFailed)?;

    text.as_string().ok_or(FetchError::InvalidContent)
}

/// Await `promise`, racing it against a timer that resolves to `undefined`.
async fn settle_within(window: &Window, promise: Promise, timeout_ms: i32) -> Result<JsValue, FetchError> {
    let timer = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let contenders = Array::of2(&promise, &timer);
    match JsFuture::from(Promise::race(&contenders)).await {
        Ok(value) if value.is_undefined() => Err(FetchError::Timeout),
        Ok(value) => Ok(value),
        Err(e) => Err(FetchError::NetworkError(
            e.as_string().unwrap_or_else(|| format!("{:?}", e)),
        )),
    }
}
