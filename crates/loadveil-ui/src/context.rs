//! Leptos context for the page-wide loading overlay.
//!
//! Components reach the overlay through [`use_loading`] and can react to its
//! state through [`LoadingContext::state`].

use leptos::prelude::*;
use loadveil_core::{OverlayConfig, OverlayState, Result};
use tracing::error;

use crate::global;

/// Context mirroring the overlay state into a signal.
///
/// Calls made through the JS bindings bypass the signal; [`sync`] refreshes
/// it.
///
/// [`sync`]: LoadingContext::sync
#[derive(Clone, Copy)]
pub struct LoadingContext {
    /// Current overlay state.
    pub state: ReadSignal<OverlayState>,
    /// Signal to update the state.
    set_state: WriteSignal<OverlayState>,
}

impl LoadingContext {
    /// Create a context seeded with the current overlay state.
    #[must_use]
    pub fn new() -> Self {
        let (state, set_state) = signal(global::state());
        Self { state, set_state }
    }

    /// Show the overlay with the default message.
    pub fn show(&self) -> Result<()> {
        let result = global::show().map(drop);
        self.sync();
        result
    }

    /// Show the overlay with `message`.
    pub fn show_message(&self, message: impl Into<String>) -> Result<()> {
        let result = global::show_message(message).map(drop);
        self.sync();
        result
    }

    /// Hide the overlay.
    pub fn hide(&self) {
        global::hide();
        self.sync();
    }

    /// Replace the overlay message.
    pub fn update(&self, message: impl Into<String>) {
        global::update(message);
        self.sync();
    }

    /// Whether the overlay is shown (tracked).
    pub fn is_shown(&self) -> bool {
        self.state.with(OverlayState::is_shown)
    }

    /// Copy the page-wide state into the signal.
    pub fn sync(&self) {
        self.set_state.set(global::state());
    }
}

impl Default for LoadingContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Provider component that sets up the loading context.
///
/// Initializes the page-wide overlay with `config` unless it already is.
#[component]
pub fn LoadingProvider(
    /// Overlay configuration used if the overlay is not initialized yet.
    #[prop(optional)]
    config: Option<OverlayConfig>,
    /// Child components that can access the loading context.
    children: Children,
) -> impl IntoView {
    if !global::is_initialized()
        && let Err(err) = global::init(config.unwrap_or_default())
    {
        error!(%err, "Failed to initialize loading overlay");
    }

    provide_context(LoadingContext::new());

    view! { {children()} }
}

/// Hook to access the loading context.
///
/// # Panics
/// Panics if called outside of a `LoadingProvider`.
pub fn use_loading() -> LoadingContext {
    expect_context::<LoadingContext>()
}
