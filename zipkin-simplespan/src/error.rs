/// Errors returned by the fallible helpers around the converter.
///
/// Conversion itself never fails; only identifier parsing and JSON output do.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The input is not a 16 or 32 character lower-hex trace id.
    #[error("invalid trace id: {0:?}")]
    InvalidTraceId(String),

    /// The input is not a 1 to 16 character hex span id.
    #[error("invalid span id: {0:?}")]
    InvalidSpanId(String),

    /// Spans could not be serialized to JSON.
    #[error("json serialization failed with {0}")]
    Json(#[from] serde_json::Error),
}
