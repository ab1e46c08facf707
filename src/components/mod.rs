//! UI components built with Leptos.
//!
//! - [`Shell`] - Header/content/footer slots the router composes into
//! - [`StartupError`] - Fallback when the route table cannot be loaded

mod shell;

pub use shell::{Shell, StartupError};
