//! Option loader — fetches the selectable interests, clubs, and buildings
//! once at wizard start.

use crate::store::models::{CampusBuilding, TagKind, TagRow};
use crate::store::traits::ProfileStore;

/// The selectable option lists, immutable for the session.
#[derive(Debug, Clone, Default)]
pub struct OptionCatalog {
    pub interests: Vec<TagRow>,
    pub clubs: Vec<TagRow>,
    pub buildings: Vec<CampusBuilding>,
}

impl OptionCatalog {
    /// Load all option lists from the backend.
    ///
    /// Each list degrades independently: a failed fetch is logged and yields
    /// an empty list, leaving the wizard usable with free-text entry.
    pub async fn load(store: &dyn ProfileStore) -> Self {
        let interests = match store.list_tags(TagKind::Interest).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("Failed to load interests: {e}");
                Vec::new()
            }
        };
        let clubs = match store.list_tags(TagKind::Club).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("Failed to load clubs: {e}");
                Vec::new()
            }
        };
        let buildings = match store.list_buildings().await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("Failed to load buildings: {e}");
                Vec::new()
            }
        };

        tracing::info!(
            interests = interests.len(),
            clubs = clubs.len(),
            buildings = buildings.len(),
            "Option catalog loaded"
        );

        Self {
            interests,
            clubs,
            buildings,
        }
    }

    /// Look up a building by (case-insensitive) name, for manual selection.
    pub fn building_by_name(&self, name: &str) -> Option<&CampusBuilding> {
        self.buildings
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name.trim()))
    }
}
