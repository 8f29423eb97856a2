//! Profile draft — the client-held form state for all wizard steps.
//!
//! Nothing here is persisted; the draft lives only for the wizard session and
//! is written to the backend in one shot at submission.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::store::models::CampusBuilding;

use super::step::WizardStep;

/// Self-identified gender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Woman,
    Man,
    NonBinary,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Woman => write!(f, "woman"),
            Self::Man => write!(f, "man"),
            Self::NonBinary => write!(f, "non_binary"),
        }
    }
}

/// Who the user wants to be shown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GenderPreference {
    Women,
    Men,
    Everyone,
}

impl std::fmt::Display for GenderPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Women => write!(f, "women"),
            Self::Men => write!(f, "men"),
            Self::Everyone => write!(f, "everyone"),
        }
    }
}

/// What the user is on the app for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Vibe {
    Dating,
    Friends,
    Open,
}

impl std::fmt::Display for Vibe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dating => write!(f, "dating"),
            Self::Friends => write!(f, "friends"),
            Self::Open => write!(f, "open"),
        }
    }
}

/// A photo staged for upload: local bytes plus a locally-generated preview
/// reference. The preview is released when the photo is removed or the draft
/// is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
    /// Local preview handle, never sent to the backend.
    pub preview_ref: String,
}

impl Photo {
    pub fn new(
        bytes: Vec<u8>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            content_type: content_type.into(),
            preview_ref: format!("preview://{}", Uuid::new_v4()),
        }
    }
}

/// The in-progress profile, populated incrementally across steps.
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub name: String,
    pub class_year: Option<u16>,
    pub major: String,
    pub bio: String,
    pub photos: Vec<Photo>,
    pub gender: Option<Gender>,
    pub preference: Option<GenderPreference>,
    pub vibe: Option<Vibe>,
    pub interests: Vec<String>,
    pub clubs: Vec<String>,
    pub building: Option<CampusBuilding>,
}

impl ProfileDraft {
    /// Stage a photo. Rejected (draft unchanged) once `max` photos are held.
    pub fn add_photo(&mut self, photo: Photo, max: usize) -> Result<(), ValidationError> {
        if self.photos.len() >= max {
            return Err(ValidationError::TooManyPhotos { max });
        }
        self.photos.push(photo);
        Ok(())
    }

    /// Remove a photo by index, releasing its preview. Returns the removed
    /// photo, or `None` if the index is out of range.
    pub fn remove_photo(&mut self, index: usize) -> Option<Photo> {
        if index < self.photos.len() {
            Some(self.photos.remove(index))
        } else {
            None
        }
    }

    /// Toggle an interest on or off. Returns whether it is now selected.
    pub fn toggle_interest(&mut self, name: &str, max: usize) -> Result<bool, ValidationError> {
        Self::toggle_tag(&mut self.interests, name, max, "interest")
    }

    /// Toggle a club on or off. Returns whether it is now selected.
    pub fn toggle_club(&mut self, name: &str, max: usize) -> Result<bool, ValidationError> {
        Self::toggle_tag(&mut self.clubs, name, max, "club")
    }

    fn toggle_tag(
        selected: &mut Vec<String>,
        name: &str,
        max: usize,
        kind: &'static str,
    ) -> Result<bool, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyTag { kind });
        }
        if let Some(pos) = selected.iter().position(|t| t.eq_ignore_ascii_case(name)) {
            selected.remove(pos);
            return Ok(false);
        }
        if selected.len() >= max {
            return Err(ValidationError::TooManyTags { kind, max });
        }
        selected.push(name.to_string());
        Ok(true)
    }

    /// Required fields still missing for a given step.
    pub fn missing_fields(&self, step: WizardStep) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            WizardStep::Basics => {
                if self.name.trim().is_empty() {
                    missing.push("name");
                }
                if self.class_year.is_none() {
                    missing.push("class_year");
                }
                if self.major.trim().is_empty() {
                    missing.push("major");
                }
            }
            WizardStep::Photos | WizardStep::Interests => {
                // Photos and tags are optional; caps are enforced at mutation.
            }
            WizardStep::Gender => {
                if self.gender.is_none() {
                    missing.push("gender");
                }
                if self.vibe.is_none() {
                    missing.push("vibe");
                }
            }
            WizardStep::Location => {
                if self.building.is_none() {
                    missing.push("building");
                }
            }
            WizardStep::Review => {
                for prior in [
                    WizardStep::Basics,
                    WizardStep::Gender,
                    WizardStep::Location,
                ] {
                    missing.extend(self.missing_fields(prior));
                }
            }
        }
        missing
    }

    /// Validate a step's required fields, for the advancement gate.
    pub fn validate_step(&self, step: WizardStep) -> Result<(), ValidationError> {
        let missing = self.missing_fields(step);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields {
                step,
                fields: missing,
            })
        }
    }
}
