//! `Loadveil` UI - browser front end for the loading overlay.
//!
//! This crate draws the overlay from `loadveil-core` on the page DOM and
//! exposes it to the rest of the page:
//! - [`global`]: explicitly initialized page-wide controller
//! - [`bindings`]: `initLoading` / `showLoading` / `updateLoading` / `hideLoading` for JS
//! - [`context`]: Leptos context and provider
//! - [`logging`]: tracing output to the browser console

pub mod app;
pub mod bindings;
pub mod context;
pub mod dom;
pub mod global;
pub mod logging;

pub use app::App;
pub use context::{LoadingContext, LoadingProvider, use_loading};
pub use dom::DomSurface;
