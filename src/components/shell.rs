//! Persistent page shell.

use leptos::prelude::*;

use crate::config::ids;

/// Header placeholder, content slot and footer placeholder.
///
/// Rendered once; the router and layout composer fill the slots by id.
#[component]
pub fn Shell() -> impl IntoView {
    view! {
        <a class="skip-link visually-hidden-focusable" href=format!("#{}", ids::MAIN_CONTENT)>
            "Skip to main content"
        </a>
        <div id=ids::HEADER></div>
        <main id=ids::CONTENT tabindex="-1"></main>
        <div id=ids::FOOTER></div>
    }
}

/// Shown instead of the shell when the site cannot start.
#[component]
pub fn StartupError(reason: String) -> impl IntoView {
    view! {
        <div class="container py-5 text-center">
            <h1>"Something went wrong"</h1>
            <p>"The site could not be started. Please try reloading the page."</p>
            <details>
                <summary>"Error details"</summary>
                <p class="text-danger">{reason}</p>
            </details>
            <button
                class="btn btn-primary"
                on:click=move |_| {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().reload();
                    }
                }
            >
                "Reload Page"
            </button>
        </div>
    }
}
