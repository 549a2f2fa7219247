//! Error types for the tracker library.

/// Failures surfaced to API callers.
#[derive(thiserror::Error, Debug)]
pub enum TrackerError {
    #[error("Profile not found")]
    UnknownProfile(String),
}
