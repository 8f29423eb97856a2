//! Remote backend access — models, trait, and REST implementation.

pub mod models;
pub mod rest;
pub mod traits;

pub use models::{CampusBuilding, ProfileRecord, TagKind, TagRow};
pub use rest::RestStore;
pub use traits::ProfileStore;
