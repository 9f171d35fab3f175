//! Loading overlay controller.
//!
//! Manages the lifecycle of a single full-page loading overlay on a host
//! [`Surface`]:
//!
//! ```text
//!             show(m)                    update(m2)
//!   Hidden ────────────▶ Shown(m) ──────────────────▶ Shown(m2)
//!     ▲                    │  ▲                          │
//!     └──── hide() ────────┘  └──────── show(m3) ────────┘
//! ```
//!
//! `update` on `Hidden` and `hide` on `Hidden` are no-ops.

use tracing::{debug, trace, warn};

use crate::config::OverlayConfig;
use crate::error::Result;
use crate::markup::overlay_tree;
use crate::surface::Surface;

/// Observable state of the controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OverlayState {
    /// No overlay is tracked.
    #[default]
    Hidden,
    /// An overlay is tracked and displays `message`.
    Shown {
        /// Currently displayed message.
        message: String,
    },
}

impl OverlayState {
    /// Whether an overlay is shown.
    #[must_use]
    pub const fn is_shown(&self) -> bool {
        matches!(self, Self::Shown { .. })
    }
}

/// Controller owning at most one overlay on a host surface.
#[derive(Debug)]
pub struct OverlayController<S: Surface> {
    surface: S,
    config: OverlayConfig,
    current: Option<S::Element>,
    message: Option<String>,
}

impl<S: Surface> OverlayController<S> {
    /// Create a controller with the default configuration.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            config: OverlayConfig::default(),
            current: None,
            message: None,
        }
    }

    /// Create a controller with the given configuration.
    ///
    /// Fails with [`Error::Configuration`](crate::Error::Configuration) when
    /// the configuration does not pass [`OverlayConfig::validate`].
    pub fn with_config(surface: S, config: OverlayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            surface,
            config,
            current: None,
            message: None,
        })
    }

    /// Show the overlay with the configured default message.
    pub fn show(&mut self) -> Result<S::Element> {
        let message = self.config.default_message.clone();
        self.show_message(message)
    }

    /// Show the overlay with `message`, replacing any overlay already present.
    ///
    /// Returns the handle of the created overlay element.
    pub fn show_message(&mut self, message: impl Into<String>) -> Result<S::Element> {
        let message = message.into();
        self.hide();

        let tree = overlay_tree(&self.config, &message);
        let element = self.surface.build(&tree)?;
        self.surface.append_to_root(&element)?;

        debug!(id = %self.config.element_id, %message, "Loading overlay shown");
        self.current = Some(element.clone());
        self.message = Some(message);
        Ok(element)
    }

    /// Remove every overlay carrying the reserved id.
    ///
    /// The lookup goes through the surface rather than the tracked handle, so
    /// overlays duplicated or re-created outside the controller are removed
    /// too. Safe to call when nothing is shown.
    pub fn hide(&mut self) {
        let id = self.config.element_id.as_str();
        let mut removed = 0usize;
        let mut last: Option<S::Element> = None;

        while let Some(existing) = self.surface.find_by_id(id) {
            if last.as_ref() == Some(&existing) {
                warn!(%id, "Surface kept an overlay after removal, giving up");
                break;
            }
            self.surface.remove(&existing);
            removed += 1;
            last = Some(existing);
        }

        if removed > 1 {
            warn!(%id, removed, "Removed duplicated loading overlays");
        } else if removed == 1 {
            debug!(%id, "Loading overlay hidden");
        } else {
            trace!(%id, "No loading overlay to hide");
        }

        self.current = None;
        self.message = None;
    }

    /// Replace the message of the tracked overlay.
    ///
    /// No-op when nothing is shown or the message region cannot be found.
    pub fn update(&mut self, message: impl Into<String>) {
        let Some(current) = &self.current else {
            trace!("No loading overlay to update");
            return;
        };

        let Some(region) = self
            .surface
            .find_marked(current, &self.config.message_marker)
        else {
            debug!(
                marker = %self.config.message_marker,
                "Loading overlay has no message region"
            );
            return;
        };

        let message = message.into();
        self.surface.set_text(&region, &message);
        debug!(%message, "Loading overlay updated");
        self.message = Some(message);
    }

    /// Show `message` and return a guard that hides the overlay when dropped.
    pub fn scoped(&mut self, message: impl Into<String>) -> Result<OverlayGuard<'_, S>> {
        self.show_message(message)?;
        Ok(OverlayGuard { controller: self })
    }

    /// Current state.
    pub fn state(&self) -> OverlayState {
        match (&self.current, &self.message) {
            (Some(_), Some(message)) => OverlayState::Shown {
                message: message.clone(),
            },
            _ => OverlayState::Hidden,
        }
    }

    /// Whether an overlay is tracked.
    pub const fn is_shown(&self) -> bool {
        self.current.is_some()
    }

    /// Message of the tracked overlay.
    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().and(self.message.as_deref())
    }

    /// Handle of the tracked overlay.
    pub const fn element(&self) -> Option<&S::Element> {
        self.current.as_ref()
    }

    /// Active configuration.
    pub const fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Host surface.
    pub const fn surface(&self) -> &S {
        &self.surface
    }
}

/// Keeps the overlay shown for as long as it lives.
///
/// Created by [`OverlayController::scoped`].
#[must_use = "the overlay is hidden as soon as the guard is dropped"]
pub struct OverlayGuard<'a, S: Surface> {
    controller: &'a mut OverlayController<S>,
}

impl<S: Surface> OverlayGuard<'_, S> {
    /// Replace the displayed message.
    pub fn update(&mut self, message: impl Into<String>) {
        self.controller.update(message);
    }

    /// Current state of the underlying controller.
    pub fn state(&self) -> OverlayState {
        self.controller.state()
    }
}

impl<S: Surface> Drop for OverlayGuard<'_, S> {
    fn drop(&mut self) {
        self.controller.hide();
    }
}
