//! HTTP client for the fan-site REST API.
//!
//! Wraps a single `reqwest::Client` with a fixed base address and a
//! pre-request hook that attaches the session's bearer token. Exposes one
//! typed operation per endpoint; no retry, pagination, or caching. Error
//! recovery (including refresh-on-401) is the caller's business.

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{
    AnimeSeason, Chapter, Character, Credentials, Episode, RefreshedToken, TokenPair, Volume,
};
use crate::session::SessionStore;
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Typed client for the fan-site API.
pub struct ApiClient {
    http: reqwest::Client,
    /// Base address including the `/api` prefix, no trailing slash.
    base_url: String,
    /// Parsed form of the base address, used for media URL resolution.
    base: Url,
    session: SessionStore,
}

impl ApiClient {
    /// Creates a client against `config.base_url` with the configured
    /// timeout. The session store supplies the bearer token per request.
    pub fn new(config: &ApiConfig, session: SessionStore) -> Result<Self, ApiError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            base,
            session,
        })
    }

    /// Pre-request hook: builds a request for `path` and, when the session
    /// holds an access token, attaches `Authorization: Bearer <token>`.
    /// Without a token the request proceeds unauthenticated.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.session.access_token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Issues a GET and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).send().await?;
        let response = check_status(response).await?;
        decode_json(response).await
    }

    /// Issues a POST with a JSON body and decodes the JSON response.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        let response = check_status(response).await?;
        decode_json(response).await
    }

    /// Lists all novel volumes.
    pub async fn volumes(&self) -> Result<Vec<Volume>, ApiError> {
        self.get_json("/volumes/").await
    }

    /// Fetches one volume. The id is opaque and passed through unvalidated.
    pub async fn volume(&self, id: &str) -> Result<Volume, ApiError> {
        self.get_json(&format!("/volumes/{id}/")).await
    }

    /// Lists all chapters.
    pub async fn chapters(&self) -> Result<Vec<Chapter>, ApiError> {
        self.get_json("/chapters/").await
    }

    /// Fetches one chapter, including its text.
    pub async fn chapter(&self, id: &str) -> Result<Chapter, ApiError> {
        self.get_json(&format!("/chapters/{id}/")).await
    }

    /// Lists all wiki characters.
    pub async fn characters(&self) -> Result<Vec<Character>, ApiError> {
        self.get_json("/characters/").await
    }

    /// Fetches one character page.
    pub async fn character(&self, id: &str) -> Result<Character, ApiError> {
        self.get_json(&format!("/characters/{id}/")).await
    }

    /// Lists all anime seasons.
    pub async fn anime_seasons(&self) -> Result<Vec<AnimeSeason>, ApiError> {
        self.get_json("/anime-seasons/").await
    }

    /// Lists all episodes.
    pub async fn episodes(&self) -> Result<Vec<Episode>, ApiError> {
        self.get_json("/episodes/").await
    }

    /// Fetches one episode.
    pub async fn episode(&self, id: &str) -> Result<Episode, ApiError> {
        self.get_json(&format!("/episodes/{id}/")).await
    }

    /// Exchanges credentials for an access/refresh token pair.
    /// Storing the pair is left to the caller.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        self.post_json("/token/", credentials).await
    }

    /// Exchanges a refresh token for a new access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshedToken, ApiError> {
        self.post_json(
            "/token/refresh/",
            &serde_json::json!({ "refresh": refresh_token }),
        )
        .await
    }

    /// Resolves a possibly-relative media path against the service origin.
    ///
    /// Absolute URLs pass through unchanged; `None` stays `None`.
    pub fn media_url(&self, path: Option<&str>) -> Option<String> {
        let path = path?;
        if path.starts_with("http") {
            return Some(path.to_string());
        }
        self.base.join(path).ok().map(|u| u.to_string())
    }
}

/// Checks an HTTP response status, capturing the body text of failures
/// for the error message.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status { status, body });
    }
    Ok(response)
}

/// Decodes a JSON response body.
async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(ApiError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpListener};
    use tempfile::tempdir;

    fn test_client(session: SessionStore) -> ApiClient {
        let config = ApiConfig {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: 10,
        };
        ApiClient::new(&config, session).unwrap()
    }

    /// Serves one canned HTTP response on a local socket.
    fn spawn_one_shot_server(response: &'static str) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut socket, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf);
                let _ = socket.write_all(response.as_bytes());
            }
        });
        addr
    }

    fn client_for(addr: SocketAddr, timeout_secs: u64) -> ApiClient {
        let dir = tempdir().unwrap();
        let session = SessionStore::open(dir.path()).unwrap();
        let config = ApiConfig {
            base_url: format!("http://{addr}/api"),
            timeout_secs,
        };
        ApiClient::new(&config, session).unwrap()
    }

    #[test]
    fn test_bearer_header_attached_when_authenticated() {
        let dir = tempdir().unwrap();
        let session = SessionStore::open(dir.path()).unwrap();
        session.set_tokens("tok-abc", "ref").unwrap();

        let client = test_client(session);
        let request = client.request(Method::GET, "/volumes/").build().unwrap();

        let auth = request.headers().get(reqwest::header::AUTHORIZATION).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer tok-abc");
        assert_eq!(request.url().as_str(), "http://localhost:8000/api/volumes/");
    }

    #[test]
    fn test_no_bearer_header_without_token() {
        let dir = tempdir().unwrap();
        let session = SessionStore::open(dir.path()).unwrap();

        let client = test_client(session);
        let request = client.request(Method::GET, "/volumes/").build().unwrap();

        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_detail_path_interpolation() {
        let dir = tempdir().unwrap();
        let session = SessionStore::open(dir.path()).unwrap();

        let client = test_client(session);
        let request = client
            .request(Method::GET, "/chapters/42/")
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8000/api/chapters/42/"
        );
    }

    #[test]
    fn test_media_url_resolution() {
        let dir = tempdir().unwrap();
        let session = SessionStore::open(dir.path()).unwrap();
        let client = test_client(session);

        assert_eq!(client.media_url(None), None);
        assert_eq!(
            client.media_url(Some("http://cdn.example/x.png")),
            Some("http://cdn.example/x.png".to_string())
        );
        assert_eq!(
            client.media_url(Some("/media/a.png")),
            Some("http://localhost:8000/media/a.png".to_string())
        );
    }

    #[test]
    fn test_trailing_slash_in_base_url_is_trimmed() {
        let dir = tempdir().unwrap();
        let session = SessionStore::open(dir.path()).unwrap();
        let config = ApiConfig {
            base_url: "http://localhost:8000/api/".to_string(),
            timeout_secs: 10,
        };
        let client = ApiClient::new(&config, session).unwrap();

        let request = client.request(Method::GET, "/volumes/").build().unwrap();
        assert_eq!(request.url().as_str(), "http://localhost:8000/api/volumes/");
    }

    #[tokio::test]
    async fn test_unanswered_request_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept connections but never answer
        std::thread::spawn(move || {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept() {
                held.push(socket);
            }
        });

        let client = client_for(addr, 1);
        let err = client.volumes().await.unwrap_err();
        match err {
            ApiError::Http(e) => assert!(e.is_timeout()),
            other => panic!("expected a timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_captures_body() {
        let addr = spawn_one_shot_server(
            "HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found",
        );

        let client = client_for(addr, 10);
        let err = client.volume("9000").await.unwrap_err();
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert_eq!(body, "not found");
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_garbage_body_is_a_decode_error() {
        let addr = spawn_one_shot_server(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 4\r\nConnection: close\r\n\r\nnope",
        );

        let client = client_for(addr, 10);
        let err = client.volumes().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let dir = tempdir().unwrap();
        let session = SessionStore::open(dir.path()).unwrap();
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            timeout_secs: 10,
        };
        assert!(matches!(
            ApiClient::new(&config, session),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }
}
