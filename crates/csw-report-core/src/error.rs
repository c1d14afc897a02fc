//! Error types for report view-model construction.

use thiserror::Error;

/// Errors surfaced by the view-model builders.
///
/// An unresolved status id is not an error: it is carried into the view
/// as `None` so the page still renders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Timestamp does not start with `YYYY-MM-DDTHH:MM:SS`, or the matched
    /// components are not a real calendar date/time.
    #[error("malformed timestamp: {input:?}")]
    MalformedTimestamp { input: String },

    /// No check in the audit carries the requested id.
    #[error("check not found: {check_id}")]
    CheckNotFound { check_id: String },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
