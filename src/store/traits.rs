//! The `ProfileStore` trait — single async interface to the remote backend.
//!
//! Everything durable lives behind this seam: profile rows, tag tables, link
//! rows, photo storage, and session retrieval. Tests swap in an in-memory
//! implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;

use super::models::{CampusBuilding, ProfileRecord, TagKind, TagRow};

/// Backend-agnostic store trait covering profiles, tags, photos, and session.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    // ── Session ─────────────────────────────────────────────────────

    /// Get the authenticated user's id from the active session.
    async fn current_user(&self) -> Result<Uuid, StoreError>;

    // ── Profile ─────────────────────────────────────────────────────

    /// Upsert the profile row keyed by `user_id` (merge on conflict).
    async fn upsert_profile(&self, record: &ProfileRecord) -> Result<(), StoreError>;

    /// Fetch the canonical profile row id for a user. Dependent writes must
    /// use this id, not a client-side guess.
    async fn fetch_profile_id(&self, user_id: Uuid) -> Result<Uuid, StoreError>;

    /// Write the uploaded photo URLs onto the profile row.
    async fn set_photo_urls(&self, profile_id: Uuid, urls: &[String]) -> Result<(), StoreError>;

    // ── Tags ────────────────────────────────────────────────────────

    /// Look up a tag by name, case-insensitively. Returns `None` if it does
    /// not exist.
    async fn find_tag(&self, kind: TagKind, name: &str) -> Result<Option<TagRow>, StoreError>;

    /// Create a new tag row and return it.
    async fn insert_tag(&self, kind: TagKind, name: &str) -> Result<TagRow, StoreError>;

    /// Insert a profile↔tag link row.
    async fn insert_tag_link(
        &self,
        kind: TagKind,
        profile_id: Uuid,
        tag_id: Uuid,
    ) -> Result<(), StoreError>;

    /// List all tags of a kind, for the option picker.
    async fn list_tags(&self, kind: TagKind) -> Result<Vec<TagRow>, StoreError>;

    // ── Buildings ───────────────────────────────────────────────────

    /// List all campus buildings.
    async fn list_buildings(&self) -> Result<Vec<CampusBuilding>, StoreError>;

    // ── Photos ──────────────────────────────────────────────────────

    /// Upload a photo to object storage and return its public URL.
    async fn upload_photo(
        &self,
        profile_id: Uuid,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError>;
}
