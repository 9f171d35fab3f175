//! Page-wide loading overlay.
//!
//! Any part of the page can show, update or hide the overlay without holding
//! a controller. The controller lives in a thread-local slot that must be
//! filled once with [`init`] (or [`init_default`]) at start-up:
//!
//! ```rust,ignore
//! loadveil_ui::global::init_default()?;
//!
//! loadveil_ui::global::show_message("Saving changes...")?;
//! loadveil_ui::global::update("Almost done...");
//! loadveil_ui::global::hide();
//! ```
//!
//! Before initialization `hide` and `update` are no-ops and `show` returns
//! [`Error::NotInitialized`].

use std::cell::RefCell;

use loadveil_core::{Error, OverlayConfig, OverlayController, OverlayState, Result};
use tracing::{info, trace};
use web_sys::Element;

use crate::dom::DomSurface;

thread_local! {
    static LOADING: RefCell<Option<OverlayController<DomSurface>>> = const { RefCell::new(None) };
}

/// Install the page-wide controller on the window's document.
pub fn init(config: OverlayConfig) -> Result<()> {
    let surface = DomSurface::from_window()?;
    let controller = OverlayController::with_config(surface, config)?;

    LOADING.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return Err(Error::AlreadyInitialized);
        }
        info!(id = %controller.config().element_id, "Loading overlay initialized");
        *slot = Some(controller);
        Ok(())
    })
}

/// Install the page-wide controller with the default configuration.
pub fn init_default() -> Result<()> {
    init(OverlayConfig::default())
}

/// Whether [`init`] has run.
pub fn is_initialized() -> bool {
    LOADING.with(|slot| slot.borrow().is_some())
}

fn with_controller<T>(f: impl FnOnce(&mut OverlayController<DomSurface>) -> T) -> Option<T> {
    LOADING.with(|slot| slot.borrow_mut().as_mut().map(f))
}

/// Show the overlay with the default message.
pub fn show() -> Result<Element> {
    with_controller(OverlayController::show).ok_or(Error::NotInitialized)?
}

/// Show the overlay with `message`.
pub fn show_message(message: impl Into<String>) -> Result<Element> {
    let message = message.into();
    with_controller(|loading| loading.show_message(message)).ok_or(Error::NotInitialized)?
}

/// Hide the overlay.
pub fn hide() {
    if with_controller(OverlayController::hide).is_none() {
        trace!("Loading overlay hidden before initialization");
    }
}

/// Replace the overlay message.
pub fn update(message: impl Into<String>) {
    let message = message.into();
    if with_controller(|loading| loading.update(message)).is_none() {
        trace!("Loading overlay updated before initialization");
    }
}

/// Current overlay state. `Hidden` before initialization.
pub fn state() -> OverlayState {
    with_controller(|loading| loading.state()).unwrap_or_default()
}
