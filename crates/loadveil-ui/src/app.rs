//! Demo application.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use loadveil_core::OverlayState;
use tracing::error;

use crate::context::{LoadingProvider, use_loading};

/// Delay between demo steps.
const STEP_MS: u32 = 1_200;

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <LoadingProvider>
            <AppContent />
        </LoadingProvider>
    }
}

/// Inner application content with access to the loading context.
#[component]
fn AppContent() -> impl IntoView {
    let loading = use_loading();

    let on_save = move |_: web_sys::MouseEvent| {
        if let Err(err) = loading.show_message("Saving changes...") {
            error!(%err, "Could not show loading overlay");
            return;
        }
        spawn_local(async move {
            TimeoutFuture::new(STEP_MS).await;
            loading.update("Almost done...");
            TimeoutFuture::new(STEP_MS).await;
            loading.hide();
        });
    };

    let on_load = move |_: web_sys::MouseEvent| {
        if let Err(err) = loading.show() {
            error!(%err, "Could not show loading overlay");
            return;
        }
        spawn_local(async move {
            TimeoutFuture::new(STEP_MS).await;
            loading.hide();
        });
    };

    let status = move || match loading.state.get() {
        OverlayState::Hidden => "Idle".to_string(),
        OverlayState::Shown { message } => format!("Busy: {message}"),
    };

    view! {
        <main class="min-h-screen bg-gray-900 text-gray-100 flex flex-col items-center justify-center gap-6">
            <h1 class="text-2xl font-semibold">"Loadveil"</h1>
            <p class="text-gray-400" data-testid="loading-status">{status}</p>
            <div class="flex gap-4">
                <button
                    class="px-4 py-2 rounded bg-blue-600 hover:bg-blue-500"
                    on:click=on_load
                    disabled=move || loading.is_shown()
                >
                    "Load"
                </button>
                <button
                    class="px-4 py-2 rounded bg-emerald-600 hover:bg-emerald-500"
                    on:click=on_save
                    disabled=move || loading.is_shown()
                >
                    "Save changes"
                </button>
            </div>
        </main>
    }
}
