//! JavaScript bindings for page scripts that are not written in Rust.
//!
//! ```js
//! import init, { initLoading, showLoading, updateLoading, hideLoading } from "./loadveil_ui.js";
//!
//! await init();
//! initLoading({ default_message: "Please wait..." });
//! showLoading("Saving changes...");
//! updateLoading("Almost done...");
//! hideLoading();
//! ```

use loadveil_core::{Error, OverlayConfig};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::global;

fn to_js(err: Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Install the page-wide overlay. `config` may be omitted; missing fields use
/// their defaults.
#[wasm_bindgen(js_name = initLoading)]
pub fn init_loading(config: JsValue) -> Result<(), JsValue> {
    let config = if config.is_undefined() || config.is_null() {
        OverlayConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| to_js(Error::Configuration(format!("Invalid overlay config: {e}"))))?
    };
    global::init(config).map_err(to_js)
}

/// Show the overlay and return its element. Without a message the configured
/// default is used.
#[wasm_bindgen(js_name = showLoading)]
pub fn show_loading(message: Option<String>) -> Result<Element, JsValue> {
    match message {
        Some(message) => global::show_message(message),
        None => global::show(),
    }
    .map_err(to_js)
}

/// Hide the overlay. Safe to call when nothing is shown.
#[wasm_bindgen(js_name = hideLoading)]
pub fn hide_loading() {
    global::hide();
}

/// Replace the overlay message. No-op when nothing is shown.
#[wasm_bindgen(js_name = updateLoading)]
pub fn update_loading(message: String) {
    global::update(message);
}

/// Whether the overlay is shown.
#[wasm_bindgen(js_name = isLoadingShown)]
pub fn is_loading_shown() -> bool {
    global::state().is_shown()
}
