//! Integration tests for the submission orchestrator.
//!
//! Each test runs the full submit flow against an in-memory `ProfileStore`
//! that records every write, so the tests can assert on exactly what reached
//! the backend — including partial photo failure and tag reuse.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use campus_onboarding::error::{StoreError, SubmitError};
use campus_onboarding::store::models::{CampusBuilding, ProfileRecord, TagKind, TagRow};
use campus_onboarding::store::traits::ProfileStore;
use campus_onboarding::wizard::draft::{Gender, Photo, ProfileDraft, Vibe};
use campus_onboarding::wizard::submit::submit;

#[derive(Default)]
struct MockState {
    profiles: Vec<ProfileRecord>,
    recorded_photo_urls: Option<(Uuid, Vec<String>)>,
    tags: HashMap<(&'static str, String), Uuid>,
    tags_inserted: usize,
    links: Vec<(&'static str, Uuid, Uuid)>,
}

/// In-memory backend double. Uploads fail for file names listed in
/// `fail_uploads`; link inserts fail for tag names in `fail_links`.
struct MockStore {
    user_id: Uuid,
    profile_id: Uuid,
    fail_uploads: HashSet<String>,
    fail_links: HashSet<String>,
    state: Mutex<MockState>,
}

impl MockStore {
    fn new() -> Self {
        Self {
            user_id: Uuid::new_v4(),
            profile_id: Uuid::new_v4(),
            fail_uploads: HashSet::new(),
            fail_links: HashSet::new(),
            state: Mutex::new(MockState::default()),
        }
    }

    fn seed_tag(&self, kind: TagKind, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        let mut state = self.state.lock().unwrap();
        state.tags.insert((kind.label(), name.to_string()), id);
        id
    }

    fn tag_name_of(&self, id: Uuid) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .tags
            .iter()
            .find(|(_, tag_id)| **tag_id == id)
            .map(|((_, name), _)| name.clone())
    }
}

#[async_trait]
impl ProfileStore for MockStore {
    async fn current_user(&self) -> Result<Uuid, StoreError> {
        Ok(self.user_id)
    }

    async fn upsert_profile(&self, record: &ProfileRecord) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.profiles.retain(|p| p.user_id != record.user_id);
        state.profiles.push(record.clone());
        Ok(())
    }

    async fn fetch_profile_id(&self, user_id: Uuid) -> Result<Uuid, StoreError> {
        let state = self.state.lock().unwrap();
        if state.profiles.iter().any(|p| p.user_id == user_id) {
            Ok(self.profile_id)
        } else {
            Err(StoreError::RowNotFound {
                table: "profiles".into(),
                filter: format!("user_id=eq.{user_id}"),
            })
        }
    }

    async fn set_photo_urls(&self, profile_id: Uuid, urls: &[String]) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.recorded_photo_urls = Some((profile_id, urls.to_vec()));
        Ok(())
    }

    async fn find_tag(&self, kind: TagKind, name: &str) -> Result<Option<TagRow>, StoreError> {
        // Case-insensitive, like the real backend's ilike lookup.
        let state = self.state.lock().unwrap();
        Ok(state
            .tags
            .iter()
            .find(|((k, n), _)| *k == kind.label() && n.eq_ignore_ascii_case(name))
            .map(|((_, n), id)| TagRow {
                id: *id,
                name: n.clone(),
            }))
    }

    async fn insert_tag(&self, kind: TagKind, name: &str) -> Result<TagRow, StoreError> {
        let id = Uuid::new_v4();
        let mut state = self.state.lock().unwrap();
        state.tags.insert((kind.label(), name.to_string()), id);
        state.tags_inserted += 1;
        Ok(TagRow {
            id,
            name: name.to_string(),
        })
    }

    async fn insert_tag_link(
        &self,
        kind: TagKind,
        profile_id: Uuid,
        tag_id: Uuid,
    ) -> Result<(), StoreError> {
        if let Some(name) = self.tag_name_of(tag_id) {
            if self.fail_links.contains(&name) {
                return Err(StoreError::BadStatus {
                    endpoint: kind.link_table().into(),
                    status: 409,
                    body: "simulated failure".into(),
                });
            }
        }
        let mut state = self.state.lock().unwrap();
        state.links.push((kind.label(), profile_id, tag_id));
        Ok(())
    }

    async fn list_tags(&self, kind: TagKind) -> Result<Vec<TagRow>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .tags
            .iter()
            .filter(|((k, _), _)| *k == kind.label())
            .map(|((_, name), id)| TagRow {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    async fn list_buildings(&self) -> Result<Vec<CampusBuilding>, StoreError> {
        Ok(Vec::new())
    }

    async fn upload_photo(
        &self,
        profile_id: Uuid,
        file_name: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, StoreError> {
        if self.fail_uploads.contains(file_name) {
            return Err(StoreError::BadStatus {
                endpoint: "storage upload".into(),
                status: 500,
                body: "simulated failure".into(),
            });
        }
        Ok(format!(
            "https://cdn.example/profile-photos/{profile_id}/{file_name}"
        ))
    }
}

fn complete_draft() -> ProfileDraft {
    let mut draft = ProfileDraft {
        name: "Sam".into(),
        class_year: Some(2027),
        major: "Biology".into(),
        bio: "Hi there".into(),
        ..Default::default()
    };
    draft.gender = Some(Gender::Woman);
    draft.vibe = Some(Vibe::Dating);
    draft.building = Some(CampusBuilding {
        id: Uuid::new_v4(),
        name: "Main Library".into(),
        latitude: 40.0,
        longitude: -75.0,
    });
    draft
}

fn photo(name: &str) -> Photo {
    Photo::new(vec![0xFF, 0xD8], name, "image/jpeg")
}

#[tokio::test]
async fn full_submission_writes_everything() {
    let store = MockStore::new();
    store.seed_tag(TagKind::Interest, "music");

    let mut draft = complete_draft();
    draft.add_photo(photo("a.jpg"), 6).unwrap();
    draft.add_photo(photo("b.jpg"), 6).unwrap();
    draft.toggle_interest("music", 5).unwrap();
    draft.toggle_interest("hiking", 5).unwrap();
    draft.toggle_club("robotics", 3).unwrap();

    let report = submit(&store, &draft).await.unwrap();

    assert_eq!(report.profile_id, store.profile_id);
    assert_eq!(report.photos_total, 2);
    assert_eq!(report.photos_uploaded, 2);
    assert_eq!(report.interests_linked, 2);
    assert_eq!(report.clubs_linked, 1);

    let state = store.state.lock().unwrap();
    assert_eq!(state.profiles.len(), 1);
    assert_eq!(state.profiles[0].user_id, store.user_id);
    assert_eq!(state.profiles[0].name, "Sam");

    // Only the missing tags were created
    assert_eq!(state.tags_inserted, 2, "music pre-existed");

    // Link rows use the canonical profile id, not the user id
    assert_eq!(state.links.len(), 3);
    assert!(state.links.iter().all(|(_, pid, _)| *pid == store.profile_id));
    assert_eq!(
        state.links.iter().filter(|(k, _, _)| *k == "interest").count(),
        2
    );
    assert_eq!(state.links.iter().filter(|(k, _, _)| *k == "club").count(), 1);

    // Photo URLs recorded on the profile row
    let (pid, urls) = state.recorded_photo_urls.clone().unwrap();
    assert_eq!(pid, store.profile_id);
    assert_eq!(urls.len(), 2);
}

#[tokio::test]
async fn partial_photo_failure_is_reported_not_fatal() {
    let mut store = MockStore::new();
    store.fail_uploads.insert("b.jpg".into());
    store.fail_uploads.insert("d.jpg".into());

    let mut draft = complete_draft();
    for name in ["a.jpg", "b.jpg", "c.jpg", "d.jpg"] {
        draft.add_photo(photo(name), 6).unwrap();
    }

    let report = submit(&store, &draft).await.unwrap();
    assert_eq!(report.photos_total, 4);
    assert_eq!(report.photos_uploaded, 2);

    let state = store.state.lock().unwrap();
    let (_, urls) = state.recorded_photo_urls.clone().unwrap();
    assert_eq!(urls.len(), 2);
    assert!(urls.iter().any(|u| u.ends_with("a.jpg")));
    assert!(urls.iter().any(|u| u.ends_with("c.jpg")));
}

#[tokio::test]
async fn all_uploads_failing_reports_zero_and_skips_url_write() {
    let mut store = MockStore::new();
    store.fail_uploads.insert("a.jpg".into());

    let mut draft = complete_draft();
    draft.add_photo(photo("a.jpg"), 6).unwrap();

    let report = submit(&store, &draft).await.unwrap();
    assert_eq!(report.photos_uploaded, 0);

    let state = store.state.lock().unwrap();
    assert!(state.recorded_photo_urls.is_none());
}

#[tokio::test]
async fn submission_without_photos_or_tags() {
    let store = MockStore::new();
    let draft = complete_draft();

    let report = submit(&store, &draft).await.unwrap();
    assert_eq!(report.photos_total, 0);
    assert_eq!(report.photos_uploaded, 0);
    assert_eq!(report.interests_linked, 0);
    assert_eq!(report.clubs_linked, 0);
}

#[tokio::test]
async fn differently_cased_tag_is_reused_not_duplicated() {
    let store = MockStore::new();
    let seeded = store.seed_tag(TagKind::Interest, "music");

    let mut draft = complete_draft();
    draft.toggle_interest("Music", 5).unwrap();

    let report = submit(&store, &draft).await.unwrap();
    assert_eq!(report.interests_linked, 1);

    let state = store.state.lock().unwrap();
    assert_eq!(state.tags_inserted, 0, "existing tag should be reused");
    assert_eq!(state.links, vec![("interest", store.profile_id, seeded)]);
}

#[tokio::test]
async fn tag_link_failure_aborts_but_profile_persists() {
    let mut store = MockStore::new();
    store.fail_links.insert("hiking".into());
    store.seed_tag(TagKind::Interest, "hiking");

    let mut draft = complete_draft();
    draft.toggle_interest("music", 5).unwrap();
    draft.toggle_interest("hiking", 5).unwrap();
    draft.toggle_club("robotics", 3).unwrap();

    let err = submit(&store, &draft).await.unwrap_err();
    assert!(
        matches!(&err, SubmitError::TagLink { kind: "interest", name, .. } if name == "hiking"),
        "got: {err}"
    );

    // Partial application: the profile upsert and the first link persist,
    // later clubs were never attempted.
    let state = store.state.lock().unwrap();
    assert_eq!(state.profiles.len(), 1);
    assert_eq!(state.links.len(), 1);
    assert_eq!(state.links[0].0, "interest");
    assert!(!state.links.iter().any(|(k, _, _)| *k == "club"));
}

#[tokio::test]
async fn resubmission_upserts_rather_than_duplicating() {
    let store = MockStore::new();
    let mut draft = complete_draft();

    submit(&store, &draft).await.unwrap();
    draft.major = "Chemistry".into();
    submit(&store, &draft).await.unwrap();

    let state = store.state.lock().unwrap();
    assert_eq!(state.profiles.len(), 1, "second submit merges, not inserts");
    assert_eq!(state.profiles[0].major, "Chemistry");
}
