//! Console logging that works on both WASM and native targets.
//!
//! | Macro | Enabled | WASM | Native |
//! |-------|---------|------|--------|
//! | `debug_log!` | `debug_assertions` | `console.debug` | `eprintln!` |
//! | `info_log!` | `debug_assertions` | `console.info` | `eprintln!` |
//! | `warn_log!` | always | `console.warn` | `eprintln!` |
//! | `error_log!` | always | `console.error` | `eprintln!` |
//!
//! Warnings and errors are emitted in release builds too.

/// Logs a debug message (debug builds only).
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        ::web_sys::console::debug_1(&format!($($arg)*).into());
    }};
}

/// Logs a debug message (debug builds only).
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        eprintln!("[DEBUG] {}", format!($($arg)*));
    }};
}

/// No-op debug_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

/// Logs an info message (debug builds only).
///
/// # Example
///
/// ```ignore
/// info_log!("Header loaded from {}", url);
/// ```
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        ::web_sys::console::info_1(&format!($($arg)*).into());
    }};
}

/// Logs an info message (debug builds only).
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        eprintln!("[INFO] {}", format!($($arg)*));
    }};
}

/// No-op info_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

/// Logs a warning message.
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        ::web_sys::console::warn_1(&format!($($arg)*).into());
    }};
}

/// Logs a warning message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        eprintln!("[WARN] {}", format!($($arg)*));
    }};
}

/// Logs an error message.
///
/// # Example
///
/// ```ignore
/// error_log!("Page load failed: {}", err);
/// ```
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! error_log {
    ($($arg:tt)*) => {{
        ::web_sys::console::error_1(&format!($($arg)*).into());
    }};
}

/// Logs an error message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! error_log {
    ($($arg:tt)*) => {{
        eprintln!("[ERROR] {}", format!($($arg)*));
    }};
}
