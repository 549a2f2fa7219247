//! Error types for the extraction pipeline.

/// Failures raised while driving the browser session.
///
/// Structural problems in the rendered document are never errors; they
/// surface as empty sub-extractions instead. Only the fetch itself can
/// fail.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("browser launch failed: {0}")]
    Launch(String),
    #[error("navigation to {url} failed: {message}")]
    Navigate { url: String, message: String },
    #[error("page capture failed: {0}")]
    Capture(String),
}
