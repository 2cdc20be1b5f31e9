//! Error types for the endpoint facade

use thiserror::Error;

use crate::config::Orientation;
use crate::engine::EngineError;

/// Result type for endpoint operations.
pub type EndpointResult<T> = Result<T, EndpointError>;

/// Errors surfaced by the endpoint facade.
///
/// The facade performs no recovery: engine failures pass through with
/// their payload intact, and the only locally raised errors are argument
/// validation and the fixed not-implemented stubs.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The engine reported a failure; `reason` is its payload, verbatim.
    #[error("engine error: {reason}")]
    Engine {
        /// Failure payload exactly as the engine delivered it.
        reason: serde_json::Value,
    },

    /// An orientation value outside the recognized set was passed.
    #[error("invalid device orientation {value:?}, expected one of: {}", Orientation::accepted_names())]
    InvalidOrientation {
        /// The rejected value.
        value: String,
    },

    /// The operation is explicitly unsupported and will never succeed.
    #[error("not implemented: {feature}")]
    NotImplemented {
        /// Name of the unsupported operation.
        feature: &'static str,
    },

    /// An engine payload did not match the expected shape.
    #[error("malformed engine payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl From<EngineError> for EndpointError {
    fn from(error: EngineError) -> Self {
        Self::Engine {
            reason: error.reason,
        }
    }
}
