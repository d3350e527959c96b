//! Session store holding authentication tokens and the user profile.
//!
//! Tokens are persisted under two fixed keys (one file each) in the
//! session directory, so a login survives process restarts. The store is
//! an explicit context object: it is handed to the API client rather than
//! living in a global.

use crate::error::SessionError;
use crate::models::UserProfile;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Durable storage key for the access token.
const ACCESS_TOKEN_KEY: &str = "access_token";

/// Durable storage key for the refresh token.
const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// In-memory session state.
#[derive(Debug, Default)]
struct SessionState {
    user: Option<UserProfile>,
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Shared handle to the current session.
///
/// Cloning is cheap; all clones see the same state. Mutation happens only
/// through the explicit set/clear operations below.
#[derive(Debug, Clone)]
pub struct SessionStore {
    state: Arc<RwLock<SessionState>>,
    dir: PathBuf,
}

impl SessionStore {
    /// Opens the session store rooted at `dir`, loading any persisted
    /// tokens from a previous run.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        let state = SessionState {
            user: None,
            access_token: read_key(&dir, ACCESS_TOKEN_KEY)?,
            refresh_token: read_key(&dir, REFRESH_TOKEN_KEY)?,
        };

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            dir,
        })
    }

    /// Overwrites both tokens, in memory and on disk.
    ///
    /// Token shape and expiry are not validated here.
    pub fn set_tokens(&self, access: &str, refresh: &str) -> Result<(), SessionError> {
        {
            let mut state = self.state.write().expect("session lock poisoned");
            state.access_token = Some(access.to_string());
            state.refresh_token = Some(refresh.to_string());
        }

        std::fs::write(self.dir.join(ACCESS_TOKEN_KEY), access)?;
        std::fs::write(self.dir.join(REFRESH_TOKEN_KEY), refresh)?;
        Ok(())
    }

    /// Replaces only the access token, keeping the refresh token.
    /// Used after a successful token refresh.
    pub fn set_access_token(&self, access: &str) -> Result<(), SessionError> {
        {
            let mut state = self.state.write().expect("session lock poisoned");
            state.access_token = Some(access.to_string());
        }

        std::fs::write(self.dir.join(ACCESS_TOKEN_KEY), access)?;
        Ok(())
    }

    /// Removes both tokens and the user profile, in memory and on disk.
    /// Idempotent: clearing an already-empty session succeeds.
    pub fn clear_tokens(&self) -> Result<(), SessionError> {
        {
            let mut state = self.state.write().expect("session lock poisoned");
            state.access_token = None;
            state.refresh_token = None;
            state.user = None;
        }

        remove_key(&self.dir, ACCESS_TOKEN_KEY)?;
        remove_key(&self.dir, REFRESH_TOKEN_KEY)?;
        Ok(())
    }

    /// Replaces the cached user profile. No merge semantics.
    pub fn set_user(&self, user: UserProfile) {
        let mut state = self.state.write().expect("session lock poisoned");
        state.user = Some(user);
    }

    /// Returns the cached user profile, if any.
    pub fn user(&self) -> Option<UserProfile> {
        let state = self.state.read().expect("session lock poisoned");
        state.user.clone()
    }

    /// True iff an access token is present.
    pub fn is_authenticated(&self) -> bool {
        let state = self.state.read().expect("session lock poisoned");
        state.access_token.is_some()
    }

    /// Returns the current access token, if any.
    pub fn access_token(&self) -> Option<String> {
        let state = self.state.read().expect("session lock poisoned");
        state.access_token.clone()
    }

    /// Returns the current refresh token, if any.
    pub fn refresh_token(&self) -> Option<String> {
        let state = self.state.read().expect("session lock poisoned");
        state.refresh_token.clone()
    }
}

/// Reads one token file, treating a missing file as "no token".
fn read_key(dir: &Path, key: &str) -> Result<Option<String>, SessionError> {
    match std::fs::read_to_string(dir.join(key)) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Removes one token file, tolerating its absence.
fn remove_key(dir: &Path, key: &str) -> Result<(), SessionError> {
    match std::fs::remove_file(dir.join(key)) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_tokens_authenticates_and_persists() {
        let dir = tempdir().unwrap();
        let session = SessionStore::open(dir.path()).unwrap();
        assert!(!session.is_authenticated());

        session.set_tokens("acc-123", "ref-456").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.access_token().as_deref(), Some("acc-123"));

        let on_disk = std::fs::read_to_string(dir.path().join(ACCESS_TOKEN_KEY)).unwrap();
        assert_eq!(on_disk, "acc-123");
    }

    #[test]
    fn test_tokens_survive_reopen() {
        let dir = tempdir().unwrap();
        {
            let session = SessionStore::open(dir.path()).unwrap();
            session.set_tokens("acc", "ref").unwrap();
        }

        let reopened = SessionStore::open(dir.path()).unwrap();
        assert!(reopened.is_authenticated());
        assert_eq!(reopened.access_token().as_deref(), Some("acc"));
        assert_eq!(reopened.refresh_token().as_deref(), Some("ref"));
    }

    #[test]
    fn test_clear_tokens_is_idempotent() {
        let dir = tempdir().unwrap();
        let session = SessionStore::open(dir.path()).unwrap();
        session.set_tokens("acc", "ref").unwrap();
        session.set_user(UserProfile {
            id: 1,
            username: "rika".to_string(),
        });

        session.clear_tokens().unwrap();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(!dir.path().join(ACCESS_TOKEN_KEY).exists());
        assert!(!dir.path().join(REFRESH_TOKEN_KEY).exists());

        // Second clear on an already-empty session
        session.clear_tokens().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_set_access_token_keeps_refresh() {
        let dir = tempdir().unwrap();
        let session = SessionStore::open(dir.path()).unwrap();
        session.set_tokens("old-acc", "ref").unwrap();

        session.set_access_token("new-acc").unwrap();
        assert_eq!(session.access_token().as_deref(), Some("new-acc"));
        assert_eq!(session.refresh_token().as_deref(), Some("ref"));
    }

    #[test]
    fn test_clones_share_state() {
        let dir = tempdir().unwrap();
        let session = SessionStore::open(dir.path()).unwrap();
        let clone = session.clone();

        session.set_tokens("acc", "ref").unwrap();
        assert!(clone.is_authenticated());
    }
}
