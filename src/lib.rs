//! # barrovivo-chat
//!
//! Leptos + WASM chat widget for the Barrovivo storefront. A collapsible
//! panel where visitors ask for ceramic pieces; each message is posted to
//! the site's chat endpoint and the reply is rendered as text or as product
//! links.
//!
//! The interaction logic (`state`, `controller`) is plain Rust and runs
//! natively under test; only `app`, `components` and the HTTP transport
//! touch the browser.

pub mod app;
pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod net;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the widget on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::debug!("bv-chat: mounting");
    leptos::mount::mount_to_body(app::App);
}
