//! Data types returned by the fan-site REST API.
//!
//! These mirror the JSON shapes the backend serializes. List endpoints
//! omit heavy fields (chapter text, episode video), so those are optional.

use serde::{Deserialize, Serialize};

/// Login payload for `POST /token/`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Access/refresh token pair returned by a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// New access token returned by `POST /token/refresh/`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedToken {
    pub access: String,
}

/// Profile of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
}

/// A published novel volume.
#[derive(Debug, Clone, Deserialize)]
pub struct Volume {
    pub id: u64,
    pub number: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Cover image, possibly a server-relative media path.
    pub cover: Option<String>,
}

/// A chapter belonging to a volume.
#[derive(Debug, Clone, Deserialize)]
pub struct Chapter {
    pub id: u64,
    pub volume: u64,
    pub number: u32,
    pub title: String,
    /// Full chapter text; present only on the detail endpoint.
    pub content: Option<String>,
}

/// A wiki character page.
#[derive(Debug, Clone, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Portrait image, possibly a server-relative media path.
    pub portrait: Option<String>,
}

/// An anime adaptation season.
#[derive(Debug, Clone, Deserialize)]
pub struct AnimeSeason {
    pub id: u64,
    pub number: u32,
    pub title: String,
}

/// An anime episode within a season.
#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub season: u64,
    pub number: u32,
    pub title: String,
    #[serde(default)]
    pub synopsis: String,
    /// Video source, possibly a server-relative media path.
    pub video: Option<String>,
}
