//! Configuration types.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Connection settings for the remote profile backend.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the backend, e.g. `https://abc123.supabase.co`.
    pub base_url: String,
    /// Anon/public API key sent as `apikey` and bearer token.
    pub api_key: SecretString,
    /// Storage bucket for profile photos.
    pub photo_bucket: String,
}

impl StoreConfig {
    /// Build from environment variables.
    ///
    /// Requires `ONBOARDING_BACKEND_URL` and `ONBOARDING_BACKEND_KEY`;
    /// `ONBOARDING_PHOTO_BUCKET` defaults to `profile-photos`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("ONBOARDING_BACKEND_URL")
            .map_err(|_| ConfigError::MissingEnvVar("ONBOARDING_BACKEND_URL".into()))?;
        let api_key = std::env::var("ONBOARDING_BACKEND_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("ONBOARDING_BACKEND_KEY".into()))?;

        if base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "ONBOARDING_BACKEND_URL".into(),
                message: "must not be empty".into(),
            });
        }

        let photo_bucket = std::env::var("ONBOARDING_PHOTO_BUCKET")
            .unwrap_or_else(|_| "profile-photos".to_string());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: SecretString::from(api_key),
            photo_bucket,
        })
    }
}

/// Wizard limits. Defaults match the product caps.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Maximum photos per profile.
    pub max_photos: usize,
    /// Maximum selectable interests.
    pub max_interests: usize,
    /// Maximum selectable clubs.
    pub max_clubs: usize,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            max_photos: 6,
            max_interests: 5,
            max_clubs: 3,
        }
    }
}
