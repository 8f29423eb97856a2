//! REST implementation of `ProfileStore`.
//!
//! Speaks PostgREST conventions against the managed backend: `/rest/v1/...`
//! for record CRUD with `eq.` filters and merge-duplicates upserts,
//! `/storage/v1/object/...` for photo storage, `/auth/v1/user` for the
//! session.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::error::StoreError;

use super::models::{CampusBuilding, ProfileRecord, TagKind, TagRow};
use super::traits::ProfileStore;

/// REST-backed store over the managed backend.
pub struct RestStore {
    config: StoreConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct IdRow {
    id: Uuid,
}

impl RestStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.config.base_url)
    }

    fn auth_url(&self) -> String {
        format!("{}/auth/v1/user", self.config.base_url)
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{path}",
            self.config.base_url, self.config.photo_bucket
        )
    }

    /// Public URL for an uploaded object (the bucket is public-read).
    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{path}",
            self.config.base_url, self.config.photo_bucket
        )
    }

    /// Attach the `apikey` and bearer headers every backend call needs.
    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let key = self.config.api_key.expose_secret();
        builder.header("apikey", key).bearer_auth(key)
    }

    async fn send(
        &self,
        endpoint: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, StoreError> {
        let resp = builder
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(StoreError::BadStatus {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        })
    }

    async fn json_body<T: serde::de::DeserializeOwned>(
        endpoint: &str,
        resp: reqwest::Response,
    ) -> Result<T, StoreError> {
        resp.json::<T>()
            .await
            .map_err(|e| StoreError::InvalidResponse {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl ProfileStore for RestStore {
    async fn current_user(&self) -> Result<Uuid, StoreError> {
        let resp = self
            .send("auth/user", self.authed(self.client.get(self.auth_url())))
            .await
            .map_err(|e| StoreError::NoSession(e.to_string()))?;

        let body: serde_json::Value = Self::json_body("auth/user", resp).await?;
        body.get("id")
            .and_then(|v| v.as_str())
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| StoreError::NoSession("response carried no user id".into()))
    }

    async fn upsert_profile(&self, record: &ProfileRecord) -> Result<(), StoreError> {
        let builder = self
            .authed(self.client.post(self.rest_url("profiles")))
            .query(&[("on_conflict", "user_id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&[record]);
        self.send("profiles upsert", builder).await?;
        Ok(())
    }

    async fn fetch_profile_id(&self, user_id: Uuid) -> Result<Uuid, StoreError> {
        let builder = self
            .authed(self.client.get(self.rest_url("profiles")))
            .query(&[("select", "id".to_string()), ("user_id", format!("eq.{user_id}"))]);
        let resp = self.send("profiles select", builder).await?;
        let rows: Vec<IdRow> = Self::json_body("profiles select", resp).await?;
        rows.into_iter()
            .next()
            .map(|r| r.id)
            .ok_or_else(|| StoreError::RowNotFound {
                table: "profiles".into(),
                filter: format!("user_id=eq.{user_id}"),
            })
    }

    async fn set_photo_urls(&self, profile_id: Uuid, urls: &[String]) -> Result<(), StoreError> {
        let builder = self
            .authed(self.client.patch(self.rest_url("profiles")))
            .query(&[("id", format!("eq.{profile_id}"))])
            .header("Prefer", "return=minimal")
            .json(&serde_json::json!({ "photo_urls": urls }));
        self.send("profiles update", builder).await?;
        Ok(())
    }

    async fn find_tag(&self, kind: TagKind, name: &str) -> Result<Option<TagRow>, StoreError> {
        // ilike so "Music" finds an existing "music" instead of creating a
        // near-duplicate row; the draft de-duplicates case-insensitively too.
        let builder = self
            .authed(self.client.get(self.rest_url(kind.table())))
            .query(&[
                ("select", "id,name".to_string()),
                ("name", format!("ilike.{}", like_literal(name))),
            ]);
        let resp = self.send(kind.table(), builder).await?;
        let rows: Vec<TagRow> = Self::json_body(kind.table(), resp).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_tag(&self, kind: TagKind, name: &str) -> Result<TagRow, StoreError> {
        let builder = self
            .authed(self.client.post(self.rest_url(kind.table())))
            .header("Prefer", "return=representation")
            .json(&[serde_json::json!({ "name": name })]);
        let resp = self.send(kind.table(), builder).await?;
        let rows: Vec<TagRow> = Self::json_body(kind.table(), resp).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::InvalidResponse {
                endpoint: kind.table().to_string(),
                reason: "insert returned no representation".into(),
            })
    }

    async fn insert_tag_link(
        &self,
        kind: TagKind,
        profile_id: Uuid,
        tag_id: Uuid,
    ) -> Result<(), StoreError> {
        // Column name varies by tag kind, so the body is built by hand.
        let mut body = serde_json::Map::new();
        body.insert(
            "profile_id".to_string(),
            serde_json::Value::String(profile_id.to_string()),
        );
        body.insert(
            kind.link_column().to_string(),
            serde_json::Value::String(tag_id.to_string()),
        );
        let builder = self
            .authed(self.client.post(self.rest_url(kind.link_table())))
            .header("Prefer", "return=minimal")
            .json(&body);
        self.send(kind.link_table(), builder).await?;
        Ok(())
    }

    async fn list_tags(&self, kind: TagKind) -> Result<Vec<TagRow>, StoreError> {
        let builder = self
            .authed(self.client.get(self.rest_url(kind.table())))
            .query(&[("select", "id,name"), ("order", "name.asc")]);
        let resp = self.send(kind.table(), builder).await?;
        Self::json_body(kind.table(), resp).await
    }

    async fn list_buildings(&self) -> Result<Vec<CampusBuilding>, StoreError> {
        let builder = self
            .authed(self.client.get(self.rest_url("buildings")))
            .query(&[("select", "id,name,latitude,longitude"), ("order", "name.asc")]);
        let resp = self.send("buildings", builder).await?;
        Self::json_body("buildings", resp).await
    }

    async fn upload_photo(
        &self,
        profile_id: Uuid,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError> {
        // Prefix with a fresh UUID so repeated uploads of the same filename
        // never collide.
        let path = format!("{profile_id}/{}-{file_name}", Uuid::new_v4());
        let builder = self
            .authed(self.client.post(self.object_url(&path)))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);
        self.send("storage upload", builder).await?;

        tracing::info!(path = %path, "Photo uploaded");
        Ok(self.public_url(&path))
    }
}

/// Escape LIKE wildcards so an `ilike` filter matches the name literally.
fn like_literal(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
