use gazette::app::{App, boot, load_routes};
use gazette::config::ids;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

fn main() {
    console_error_panic_hook::set_once();

    let root = document()
        .get_element_by_id(ids::APP_ROOT)
        .expect("Failed to find #app element")
        .unchecked_into::<web_sys::HtmlElement>();

    match load_routes() {
        Ok(table) => {
            mount_to(root, || view! { <App /> }).forget();
            wasm_bindgen_futures::spawn_local(boot(table));
        }
        Err(reason) => {
            mount_to(root, move || view! { <App startup_error=reason /> }).forget();
        }
    }
}
