//! Client-side navigation and layout composition for the publications portal.
//!
//! The browser-independent engine lives in [`core`]; [`web`] binds it to the
//! live document and [`app`] wires everything together at startup.

#[macro_use]
pub mod logging;

pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;
pub mod web;
