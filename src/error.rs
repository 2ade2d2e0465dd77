//! Pipeline error types

use thiserror::Error;

/// Errors that can occur while answering a route query
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A record carries a categorical value outside its known enumeration.
    /// The encoder never substitutes a default code.
    #[error("route {route_id}: unknown {field} {value:?}")]
    Encoding {
        route_id: String,
        field: &'static str,
        value: String,
    },

    /// A route's path literal could not be decoded into coordinates.
    #[error("invalid path literal: {reason}")]
    PathDecode { reason: String },

    /// The classifier produced a label outside the known risk set.
    #[error("unrecognized risk label {0:?}")]
    UnknownLabel(String),

    /// The classifier invocation itself failed.
    #[error("classifier error: {0}")]
    Classifier(String),

    /// The dataset or model artifact is malformed.
    #[error("data error: {0}")]
    Data(String),
}

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
