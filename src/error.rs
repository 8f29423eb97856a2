//! Error types for the onboarding wizard.

use crate::wizard::step::WizardStep;

/// Top-level error type for the wizard.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("Submission error: {0}")]
    Submit(#[from] SubmitError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors from the remote profile backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Request to {endpoint} failed: {reason}")]
    RequestFailed { endpoint: String, reason: String },

    #[error("Backend returned {status} for {endpoint}: {body}")]
    BadStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("No active session: {0}")]
    NoSession(String),

    #[error("Row not found: {table} where {filter}")]
    RowNotFound { table: String, filter: String },

    #[error("Unexpected response shape from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-step validation failures. Block advancement; re-presentable.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Step {step} is missing required fields: {fields:?}")]
    MissingFields {
        step: WizardStep,
        fields: Vec<&'static str>,
    },

    #[error("Photo limit reached ({max} max)")]
    TooManyPhotos { max: usize },

    #[error("{kind} limit reached ({max} max)")]
    TooManyTags { kind: &'static str, max: usize },

    #[error("Empty {kind} name")]
    EmptyTag { kind: &'static str },
}

/// Device location failures. Recoverable — the user picks a building manually.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location access denied")]
    PermissionDenied,

    #[error("Location not supported on this device")]
    Unsupported,

    #[error("Position lookup failed: {0}")]
    PositionUnavailable(String),
}

/// Submission orchestration failures.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Draft incomplete: {0}")]
    Incomplete(ValidationError),

    #[error("Session lookup failed: {0}")]
    Session(StoreError),

    #[error("Profile upsert failed: {0}")]
    ProfileWrite(StoreError),

    #[error("Could not resolve canonical profile id: {0}")]
    ProfileIdLookup(StoreError),

    #[error("Linking {kind} \"{name}\" failed: {reason}")]
    TagLink {
        kind: &'static str,
        name: String,
        reason: String,
    },
}

/// Result type alias for the wizard.
pub type Result<T> = std::result::Result<T, Error>;
