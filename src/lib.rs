//! Ranobe - client for a light-novel fan-site REST API.
//!
//! This library provides:
//! - A session store holding bearer tokens, persisted across runs
//! - A typed HTTP client for the novel, wiki, and anime endpoints
//! - In-memory list stores caching the most recent fetches
//! - A static route table mapping site paths to views

pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod routes;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use console::Console;
pub use error::{ApiError, ConfigError, SessionError};
pub use models::{
    AnimeSeason, Chapter, Character, Credentials, Episode, RefreshedToken, TokenPair, UserProfile,
    Volume,
};
pub use routes::{ROUTES, Route, RouteMatch, Router, View, match_path};
pub use session::SessionStore;
pub use store::{AnimeStore, NovelStore, WikiStore};
