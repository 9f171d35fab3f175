//! Error types for Loadveil core operations.

use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the loading overlay.
///
/// A missing overlay or message region is never an error; those cases are
/// silent no-ops. Errors only describe a host surface that cannot be used at
/// all, or invalid configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// The host surface rejected an operation (element creation, attach).
    #[error("Surface error: {0}")]
    Surface(String),

    /// The host surface is not available (no window, document or body).
    #[error("Surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The page-wide overlay was initialized twice.
    #[error("Loading overlay already initialized")]
    AlreadyInitialized,

    /// The page-wide overlay was used before initialization.
    #[error("Loading overlay not initialized")]
    NotInitialized,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_error_display() {
        let err = Error::Surface("createElement failed".to_string());
        assert_eq!(err.to_string(), "Surface error: createElement failed");
    }

    #[test]
    fn test_surface_unavailable_display() {
        let err = Error::SurfaceUnavailable("no document body".to_string());
        assert_eq!(err.to_string(), "Surface unavailable: no document body");
    }

    #[test]
    fn test_initialization_errors_display() {
        assert_eq!(
            Error::AlreadyInitialized.to_string(),
            "Loading overlay already initialized"
        );
        assert_eq!(
            Error::NotInitialized.to_string(),
            "Loading overlay not initialized"
        );
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = serde_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
