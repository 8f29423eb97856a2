//! Submission orchestrator — writes the composed profile to the backend.
//!
//! Ordering matters: the profile row is upserted first and its canonical id
//! re-fetched (row-level security on the dependent tables expects the real
//! row id), then photos upload as one concurrent batch, then tags resolve and
//! link one at a time. Nothing is transactional; partial writes persist and
//! are reported, not rolled back.

use futures::future::join_all;
use uuid::Uuid;

use crate::error::{StoreError, SubmitError};
use crate::store::models::{ProfileRecord, TagKind};
use crate::store::traits::ProfileStore;

use super::draft::ProfileDraft;
use super::step::WizardStep;

/// What actually made it to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub profile_id: Uuid,
    pub photos_total: usize,
    pub photos_uploaded: usize,
    pub interests_linked: usize,
    pub clubs_linked: usize,
}

/// Submit the completed draft.
///
/// Photo uploads run concurrently and tolerate partial failure; the report
/// carries the success count. Tag linking is sequential to avoid
/// duplicate-creation races, and aborts on the first failure (already-written
/// rows persist).
pub async fn submit(
    store: &dyn ProfileStore,
    draft: &ProfileDraft,
) -> Result<SubmissionReport, SubmitError> {
    draft
        .validate_step(WizardStep::Review)
        .map_err(SubmitError::Incomplete)?;

    let user_id = store.current_user().await.map_err(SubmitError::Session)?;

    let record = compose_record(user_id, draft);
    store
        .upsert_profile(&record)
        .await
        .map_err(SubmitError::ProfileWrite)?;

    // Re-fetch the canonical row id before any dependent write.
    let profile_id = store
        .fetch_profile_id(user_id)
        .await
        .map_err(SubmitError::ProfileIdLookup)?;

    let photos_uploaded = upload_photos(store, profile_id, draft).await;

    for name in &draft.interests {
        link_tag(store, TagKind::Interest, profile_id, name).await?;
    }
    for name in &draft.clubs {
        link_tag(store, TagKind::Club, profile_id, name).await?;
    }

    let report = SubmissionReport {
        profile_id,
        photos_total: draft.photos.len(),
        photos_uploaded,
        interests_linked: draft.interests.len(),
        clubs_linked: draft.clubs.len(),
    };
    tracing::info!(
        profile_id = %report.profile_id,
        photos_uploaded = report.photos_uploaded,
        photos_total = report.photos_total,
        interests = report.interests_linked,
        clubs = report.clubs_linked,
        "Profile submitted"
    );
    Ok(report)
}

/// Upload all staged photos as independent concurrent requests and record the
/// successful URLs on the profile row. Returns the success count.
async fn upload_photos(
    store: &dyn ProfileStore,
    profile_id: Uuid,
    draft: &ProfileDraft,
) -> usize {
    if draft.photos.is_empty() {
        return 0;
    }

    let uploads = draft.photos.iter().map(|photo| {
        store.upload_photo(
            profile_id,
            &photo.file_name,
            &photo.content_type,
            photo.bytes.clone(),
        )
    });

    let mut urls = Vec::new();
    for (photo, result) in draft.photos.iter().zip(join_all(uploads).await) {
        match result {
            Ok(url) => urls.push(url),
            Err(e) => {
                tracing::warn!(file = %photo.file_name, "Photo upload failed: {e}");
            }
        }
    }

    if !urls.is_empty() {
        if let Err(e) = store.set_photo_urls(profile_id, &urls).await {
            // Uploads stay in storage either way; only the row update is lost.
            tracing::warn!("Failed to record photo URLs on profile: {e}");
        }
    }

    urls.len()
}

/// Look up a tag by name, create it if absent, then insert the link row.
async fn link_tag(
    store: &dyn ProfileStore,
    kind: TagKind,
    profile_id: Uuid,
    name: &str,
) -> Result<(), SubmitError> {
    let to_link_err = |e: StoreError| SubmitError::TagLink {
        kind: kind.label(),
        name: name.to_string(),
        reason: e.to_string(),
    };

    let tag = match store.find_tag(kind, name).await.map_err(to_link_err)? {
        Some(existing) => existing,
        None => store.insert_tag(kind, name).await.map_err(to_link_err)?,
    };

    store
        .insert_tag_link(kind, profile_id, tag.id)
        .await
        .map_err(to_link_err)
}

fn compose_record(user_id: Uuid, draft: &ProfileDraft) -> ProfileRecord {
    ProfileRecord {
        user_id,
        name: draft.name.trim().to_string(),
        class_year: draft.class_year.unwrap_or_default(),
        major: draft.major.trim().to_string(),
        bio: match draft.bio.trim() {
            "" => None,
            bio => Some(bio.to_string()),
        },
        gender: draft.gender.map(|g| g.to_string()).unwrap_or_default(),
        preference: draft.preference.map(|p| p.to_string()),
        vibe: draft.vibe.map(|v| v.to_string()).unwrap_or_default(),
        building_id: draft.building.as_ref().map(|b| b.id),
        photo_urls: Vec::new(),
        updated_at: chrono::Utc::now(),
    }
}
