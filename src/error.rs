//! Error types for orrery.
//!
//! The geometry kernel itself never constructs these: it signals
//! degenerate queries with NaN, matching the conventions of the path
//! data it feeds. Everything above the kernel (configuration, scene
//! assembly, the season calendar, I/O) returns `Result<T, OrreryError>`.

use thiserror::Error;

/// Result type alias for orrery operations.
pub type OrreryResult<T> = Result<T, OrreryError>;

/// Unified error type for all orrery operations.
#[derive(Debug, Error)]
pub enum OrreryError {
    // ===== Geometry boundary =====
    /// Non-finite value crossed the kernel boundary where finite
    /// coordinates were required.
    #[error("non-finite value at {location}")]
    NonFinite {
        /// Location where the non-finite value was detected.
        location: String,
    },

    /// Newton iteration failed to converge.
    #[error("no convergence after {iterations} iterations (residual {residual:.3e})")]
    Convergence {
        /// Iterations performed before giving up.
        iterations: u32,
        /// Final residual in degrees.
        residual: f64,
    },

    /// Date outside the range the season calendar can represent.
    #[error("invalid date: {message}")]
    InvalidDate {
        /// Description of the rejected date.
        message: String,
    },

    // ===== Configuration errors =====
    /// Invalid configuration parameter.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl OrreryError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a non-finite-value error naming the offending location.
    #[must_use]
    pub fn non_finite(location: impl Into<String>) -> Self {
        Self::NonFinite {
            location: location.into(),
        }
    }

    /// Create an invalid-date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this error came from the geometry boundary (degenerate
    /// input rather than a configuration or I/O problem).
    #[must_use]
    pub const fn is_geometry_fault(&self) -> bool {
        matches!(self, Self::NonFinite { .. } | Self::Convergence { .. })
    }
}
