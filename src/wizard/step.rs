//! Wizard step machine — tracks which screen of the wizard the user is on.

use serde::{Deserialize, Serialize};

/// The steps of the onboarding wizard.
///
/// Progresses linearly: Basics → Photos → Gender → Interests → Location →
/// Review. Forward transitions are gated by per-step validation; backward
/// transitions are unconditional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Basics,
    Photos,
    Gender,
    Interests,
    Location,
    Review,
}

impl WizardStep {
    /// Check if a transition from `self` to `target` is valid going forward.
    pub fn can_advance_to(&self, target: WizardStep) -> bool {
        use WizardStep::*;
        matches!(
            (self, target),
            (Basics, Photos)
                | (Photos, Gender)
                | (Gender, Interests)
                | (Interests, Location)
                | (Location, Review)
        )
    }

    /// Whether this step is the last one (submission happens here).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Review)
    }

    /// Get the next step in the linear progression, if any.
    pub fn next(&self) -> Option<WizardStep> {
        use WizardStep::*;
        match self {
            Basics => Some(Photos),
            Photos => Some(Gender),
            Gender => Some(Interests),
            Interests => Some(Location),
            Location => Some(Review),
            Review => None,
        }
    }

    /// Get the previous step, if any. `None` means the wizard exits to its
    /// parent context.
    pub fn prev(&self) -> Option<WizardStep> {
        use WizardStep::*;
        match self {
            Basics => None,
            Photos => Some(Basics),
            Gender => Some(Photos),
            Interests => Some(Gender),
            Location => Some(Interests),
            Review => Some(Location),
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::Basics
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Basics => "basics",
            Self::Photos => "photos",
            Self::Gender => "gender",
            Self::Interests => "interests",
            Self::Location => "location",
            Self::Review => "review",
        };
        write!(f, "{s}")
    }
}
