use std::fmt;

use serde::Deserialize;
use serde_json::json;

use crate::auth::Session;

use super::error::{ApiError, ResolveError};

const DEFAULT_API_BASE_URL: &str = "https://api.zoom.us/v2";

/// Provider-internal user identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The authenticated account, as reported by `GET /users/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub id: Option<String>,
    pub email: Option<String>,
}

/// One assistant entry under a user.
#[derive(Debug, Clone, Deserialize)]
pub struct Assistant {
    pub id: Option<String>,
    pub email: Option<String>,
}

/// Zoom v2 user API client.
///
/// Holds no token; every call takes the [`Session`] it should act as.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Map an email address to the provider's user id.
    ///
    /// A non-200 answer is `NotFound`; a 200 body without an `id` field is a
    /// protocol failure and reported as `Transport`.
    pub async fn resolve_user(
        &self,
        email: &str,
        session: &Session,
    ) -> Result<UserId, ResolveError> {
        let url = format!("{}/users/{email}", self.base_url);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ResolveError::NotFound {
                email: email.to_string(),
                status: status.as_u16(),
            });
        }
        let payload: UserResponse = resp
            .json()
            .await
            .map_err(|err| ResolveError::Transport(err.to_string()))?;
        let id = payload.id.ok_or_else(|| {
            ResolveError::Transport(format!("user record for {email} missing id field"))
        })?;
        Ok(UserId(id))
    }

    /// Identity lookup for the session's own account.
    pub async fn current_user(&self, session: &Session) -> Result<Profile, ResolveError> {
        let url = format!("{}/users/me", self.base_url);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ResolveError::NotFound {
                email: "me".to_string(),
                status: status.as_u16(),
            });
        }
        resp.json()
            .await
            .map_err(|err| ResolveError::Transport(err.to_string()))
    }

    /// List the assistants currently delegated under a user.
    pub async fn list_assistants(
        &self,
        user_id: &UserId,
        session: &Session,
    ) -> Result<Vec<Assistant>, ApiError> {
        let url = format!("{}/users/{user_id}/assistants", self.base_url);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let payload: AssistantsResponse = resp
            .json()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(payload.assistants)
    }

    /// Add one assistant under an owner user id.
    ///
    /// The provider answers 200, 201, or 204 on success (204 also when the
    /// relationship already existed).
    pub async fn add_assistant(
        &self,
        owner: &UserId,
        assistant_email: &str,
        session: &Session,
    ) -> Result<(), ApiError> {
        let url = format!("{}/users/{owner}/assistants", self.base_url);
        let body = json!({ "assistants": [{ "email": assistant_email }] });
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&session.access_token)
            .json(&body)
            .send()
            .await?;
        let status = resp.status().as_u16();
        if !matches!(status, 200 | 201 | 204) {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssistantsResponse {
    #[serde(default)]
    assistants: Vec<Assistant>,
}
