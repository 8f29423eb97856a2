//! Wizard session — the step sequencer plus the draft it gates.

use crate::config::WizardConfig;
use crate::error::{LocationError, ValidationError};
use crate::location::{self, GeoPoint, LocationProvider};
use crate::store::models::CampusBuilding;

use super::draft::{Photo, ProfileDraft};
use super::step::WizardStep;

/// Outcome of a forward transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the given step.
    Moved(WizardStep),
    /// Already at review with a complete draft; the caller should submit.
    ReadyToSubmit,
}

/// Outcome of a backward transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    /// Moved to the given step.
    Moved(WizardStep),
    /// Backed out of the first step; the wizard exits to its parent context.
    Exited,
}

/// Holds the current step and the in-progress draft. Forward transitions are
/// gated by the current step's validation; backward transitions always work.
#[derive(Debug, Default)]
pub struct WizardSession {
    step: WizardStep,
    pub draft: ProfileDraft,
    config: WizardConfig,
}

impl WizardSession {
    pub fn new(config: WizardConfig) -> Self {
        Self {
            step: WizardStep::default(),
            draft: ProfileDraft::default(),
            config,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// Try to move forward. Fails (step unchanged) if the current step's
    /// required fields are missing.
    pub fn advance(&mut self) -> Result<Advance, ValidationError> {
        self.draft.validate_step(self.step)?;
        match self.step.next() {
            Some(next) => {
                self.step = next;
                tracing::info!(step = %next, "Wizard advanced");
                Ok(Advance::Moved(next))
            }
            None => Ok(Advance::ReadyToSubmit),
        }
    }

    /// Move backward. From the first step the wizard exits.
    pub fn back(&mut self) -> Retreat {
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                Retreat::Moved(prev)
            }
            None => Retreat::Exited,
        }
    }

    // ── Draft mutation with configured caps ─────────────────────────

    pub fn add_photo(&mut self, photo: Photo) -> Result<(), ValidationError> {
        self.draft.add_photo(photo, self.config.max_photos)
    }

    pub fn remove_photo(&mut self, index: usize) -> Option<Photo> {
        self.draft.remove_photo(index)
    }

    pub fn toggle_interest(&mut self, name: &str) -> Result<bool, ValidationError> {
        self.draft.toggle_interest(name, self.config.max_interests)
    }

    pub fn toggle_club(&mut self, name: &str) -> Result<bool, ValidationError> {
        self.draft.toggle_club(name, self.config.max_clubs)
    }

    /// Resolve the device position and select the nearest building on the
    /// draft. `Ok(None)` means the building list was empty; a location error
    /// leaves selection to manual choice.
    pub async fn locate_nearest(
        &mut self,
        provider: &dyn LocationProvider,
        buildings: &[CampusBuilding],
    ) -> Result<Option<CampusBuilding>, LocationError> {
        let position: GeoPoint = provider.current_position().await?;
        match location::nearest_building(position, buildings) {
            Some(b) => {
                self.draft.building = Some(b.clone());
                tracing::info!(building = %b.name, "Nearest building selected");
                Ok(Some(b.clone()))
            }
            None => Ok(None),
        }
    }
}
