//! `Loadveil` Core Library
//!
//! This crate provides the host-independent part of the loading overlay:
//! - The overlay controller (show, hide, update)
//! - The host surface abstraction the controller draws on
//! - The overlay markup tree (scrim, panel, spinner, message)
//! - Overlay configuration
//! - An in-memory surface for tests and headless hosts
//!
//! # Example
//!
//! ```rust
//! use loadveil_core::{MemorySurface, OverlayController, OverlayState};
//!
//! let mut loading = OverlayController::new(MemorySurface::new());
//! loading.show_message("Saving changes...")?;
//! loading.update("Almost done...");
//! assert_eq!(loading.message(), Some("Almost done..."));
//!
//! loading.hide();
//! assert_eq!(loading.state(), OverlayState::Hidden);
//! # Ok::<(), loadveil_core::Error>(())
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod markup;
pub mod memory;
pub mod surface;

pub use config::{
    DEFAULT_ELEMENT_ID, DEFAULT_MESSAGE, DEFAULT_MESSAGE_MARKER, OverlayClasses, OverlayConfig,
};
pub use controller::{OverlayController, OverlayGuard, OverlayState};
pub use error::{Error, Result};
pub use markup::{ElementSpec, overlay_tree};
pub use memory::{MemorySurface, NodeId};
pub use surface::Surface;
