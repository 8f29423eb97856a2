//! Wire models for the remote profile backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A campus building reference row. Fetched once at wizard start and
/// immutable for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampusBuilding {
    pub id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A free-text tag row (interest or club).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRow {
    pub id: Uuid,
    pub name: String,
}

/// Which tag family a row belongs to. Interests and clubs share the same
/// lookup-or-create-then-link shape but live in separate tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Interest,
    Club,
}

impl TagKind {
    /// Table holding the tag rows.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Interest => "interests",
            Self::Club => "clubs",
        }
    }

    /// Join table holding the profile↔tag link rows.
    pub fn link_table(&self) -> &'static str {
        match self {
            Self::Interest => "profile_interests",
            Self::Club => "profile_clubs",
        }
    }

    /// Foreign-key column for the tag id in the join table.
    pub fn link_column(&self) -> &'static str {
        match self {
            Self::Interest => "interest_id",
            Self::Club => "club_id",
        }
    }

    /// Human-readable kind, used in errors and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Interest => "interest",
            Self::Club => "club",
        }
    }
}

impl std::fmt::Display for TagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The profile row as written at submission. Keyed by `user_id`; the backend
/// assigns the canonical `id` which dependent writes must use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub user_id: Uuid,
    pub name: String,
    pub class_year: u16,
    pub major: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference: Option<String>,
    pub vibe: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_id: Option<Uuid>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
    /// Client-side submission time; the upsert refreshes it on every merge.
    pub updated_at: DateTime<Utc>,
}
