//! Overlay configuration.
//!
//! Holds the reserved element id, the default message, the marker attribute
//! that identifies the message region, and the CSS classes applied to each
//! part of the overlay. The default classes are Tailwind utilities matching
//! the visual contract: full viewport, dark translucent scrim, centered
//! panel, circular spinner, layered above everything else.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Reserved id of the overlay element.
pub const DEFAULT_ELEMENT_ID: &str = "loading-overlay";

/// Message shown when none is given.
pub const DEFAULT_MESSAGE: &str = "Loading...";

/// Attribute marking the element that holds the message text.
pub const DEFAULT_MESSAGE_MARKER: &str = "data-loading-message";

/// CSS classes applied to each part of the overlay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OverlayClasses {
    /// Full-viewport scrim.
    pub overlay: String,
    /// Centered panel holding the spinner and message.
    pub panel: String,
    /// Spinner container.
    pub spinner: String,
    /// Static ring behind the spinning arc.
    pub spinner_track: String,
    /// Spinning arc.
    pub spinner_arc: String,
    /// Message text.
    pub message: String,
}

impl Default for OverlayClasses {
    fn default() -> Self {
        Self {
            overlay: "fixed inset-0 bg-black bg-opacity-75 z-[60] flex items-center justify-center"
                .to_string(),
            panel: "bg-gray-800 rounded-xl shadow-2xl p-8 flex flex-col items-center gap-4 border border-gray-700"
                .to_string(),
            spinner: "relative w-16 h-16".to_string(),
            spinner_track: "absolute inset-0 border-4 border-gray-600 rounded-full".to_string(),
            spinner_arc:
                "absolute inset-0 border-4 border-blue-500 rounded-full border-t-transparent animate-spin"
                    .to_string(),
            message: "text-gray-200 font-medium text-lg".to_string(),
        }
    }
}

/// Loading overlay configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OverlayConfig {
    /// Reserved id used to find the overlay in the host surface.
    pub element_id: String,
    /// Message used by `show()`.
    pub default_message: String,
    /// Attribute name marking the message region.
    pub message_marker: String,
    /// Classes applied to the overlay parts.
    pub classes: OverlayClasses,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            element_id: DEFAULT_ELEMENT_ID.to_string(),
            default_message: DEFAULT_MESSAGE.to_string(),
            message_marker: DEFAULT_MESSAGE_MARKER.to_string(),
            classes: OverlayClasses::default(),
        }
    }
}

impl OverlayConfig {
    /// Parse a configuration from JSON and validate it.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Configuration(format!("Failed to parse overlay config: {e}")))?;
        config.validate()?;
        debug!(element_id = %config.element_id, "Loaded overlay config");
        Ok(config)
    }

    /// Serialize the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the id and marker can be used to query a document.
    pub fn validate(&self) -> Result<()> {
        if self.element_id.is_empty() {
            return Err(Error::Configuration(
                "Overlay element id must not be empty".to_string(),
            ));
        }
        if self.element_id.chars().any(char::is_whitespace) {
            return Err(Error::Configuration(format!(
                "Overlay element id must not contain whitespace: {:?}",
                self.element_id
            )));
        }
        if !is_valid_attribute_name(&self.message_marker) {
            return Err(Error::Configuration(format!(
                "Invalid message marker attribute name: {:?}",
                self.message_marker
            )));
        }
        Ok(())
    }

    /// Set the reserved element id.
    #[must_use]
    pub fn with_element_id(mut self, id: impl Into<String>) -> Self {
        self.element_id = id.into();
        self
    }

    /// Set the message used by `show()`.
    #[must_use]
    pub fn with_default_message(mut self, message: impl Into<String>) -> Self {
        self.default_message = message.into();
        self
    }

    /// Set the marker attribute of the message region.
    #[must_use]
    pub fn with_message_marker(mut self, marker: impl Into<String>) -> Self {
        self.message_marker = marker.into();
        self
    }

    /// Replace the overlay classes.
    #[must_use]
    pub fn with_classes(mut self, classes: OverlayClasses) -> Self {
        self.classes = classes;
        self
    }
}

/// Attribute names are restricted to a conservative subset so the marker is
/// usable unquoted in a `[name]` selector.
fn is_valid_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OverlayConfig::default();
        assert_eq!(config.element_id, "loading-overlay");
        assert_eq!(config.default_message, "Loading...");
        assert_eq!(config.message_marker, "data-loading-message");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_classes_cover_viewport_above_content() {
        let classes = OverlayClasses::default();
        assert!(classes.overlay.contains("fixed inset-0"));
        assert!(classes.overlay.contains("z-[60]"));
        assert!(classes.spinner_arc.contains("animate-spin"));
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let config =
            OverlayConfig::from_json(r#"{ "default_message": "Please wait..." }"#).unwrap();
        assert_eq!(config.default_message, "Please wait...");
        assert_eq!(config.element_id, DEFAULT_ELEMENT_ID);
        assert_eq!(config.classes, OverlayClasses::default());
    }

    #[test]
    fn test_from_json_partial_classes() {
        let config =
            OverlayConfig::from_json(r#"{ "classes": { "message": "veil-message" } }"#).unwrap();
        assert_eq!(config.classes.message, "veil-message");
        assert_eq!(config.classes.panel, OverlayClasses::default().panel);
    }

    #[test]
    fn test_from_json_invalid_syntax() {
        let err = OverlayConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_from_json_rejects_invalid_values() {
        let err = OverlayConfig::from_json(r#"{ "element_id": "" }"#).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_json_round_trip() {
        let config = OverlayConfig::default()
            .with_element_id("busy")
            .with_default_message("Working...");
        let json = config.to_json().unwrap();
        assert_eq!(OverlayConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_whitespace_id() {
        let config = OverlayConfig::default().with_element_id("loading overlay");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_marker_names() {
        let valid = ["data-msg", "x", "data_loading-message2"];
        for marker in valid {
            let config = OverlayConfig::default().with_message_marker(marker);
            assert!(config.validate().is_ok(), "{marker} should be valid");
        }

        let invalid = ["", "1data", "-data", "data msg", "data]", ".text-gray-200"];
        for marker in invalid {
            let config = OverlayConfig::default().with_message_marker(marker);
            assert!(config.validate().is_err(), "{marker} should be invalid");
        }
    }

    #[test]
    fn test_config_builder() {
        let classes = OverlayClasses {
            overlay: "veil".to_string(),
            ..OverlayClasses::default()
        };
        let config = OverlayConfig::default()
            .with_element_id("busy")
            .with_default_message("Hold on")
            .with_message_marker("data-busy-text")
            .with_classes(classes.clone());

        assert_eq!(config.element_id, "busy");
        assert_eq!(config.default_message, "Hold on");
        assert_eq!(config.message_marker, "data-busy-text");
        assert_eq!(config.classes, classes);
    }
}
