//! Loadveil UI entry point for WASM.

#![no_main]

use leptos::prelude::*;
use loadveil_ui::{App, global, logging};
use tracing::error;
use wasm_bindgen::prelude::wasm_bindgen;

/// Entry point for the WASM application.
/// This function is called automatically when the WASM module is loaded.
#[wasm_bindgen(start)]
pub fn start() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();

    if let Err(err) = logging::init_auto() {
        web_sys::console::warn_1(&format!("Console logging disabled: {err}").into());
    }

    if let Err(err) = global::init_default() {
        error!(%err, "Failed to initialize loading overlay");
    }

    // Mount the Leptos app to the DOM
    mount_to_body(App);
}
