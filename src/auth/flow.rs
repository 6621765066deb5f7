use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;

use crate::config::Credentials;

use super::device_code::{DeviceGrant, DevicePoll};
use super::error::AuthError;
use super::session::Session;

const DEFAULT_DEVICE_CODE_URL: &str = "https://zoom.us/oauth/devicecode";
const DEFAULT_TOKEN_URL: &str = "https://zoom.us/oauth/token";
const DEVICE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const SLOW_DOWN_STEP_SECS: u64 = 5;
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
const MAX_POLL_ATTEMPTS: u32 = 60;

/// Drives the OAuth device-authorization grant against Zoom.
///
/// [`begin`](Self::begin) obtains a [`DeviceGrant`]; the caller must surface
/// `verification_uri` to the human before
/// [`wait_for_authorization`](Self::wait_for_authorization) starts polling.
///
/// # Example
/// ```no_run
/// use attache::auth::DeviceAuthFlow;
/// use attache::config::Credentials;
///
/// # async fn example() -> Result<(), attache::auth::AuthError> {
/// let flow = DeviceAuthFlow::new(Credentials::new("id", "secret"));
/// let grant = flow.begin().await?;
/// println!("Visit {} and enter {}", grant.verification_uri, grant.user_code);
/// let session = flow.wait_for_authorization(&grant).await?;
/// # Ok(())
/// # }
/// ```
pub struct DeviceAuthFlow {
    client: reqwest::Client,
    credentials: Credentials,
    device_code_url: String,
    token_url: String,
}

impl DeviceAuthFlow {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            device_code_url: DEFAULT_DEVICE_CODE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }

    pub fn with_device_code_url(mut self, url: impl Into<String>) -> Self {
        self.device_code_url = url.into();
        self
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Request a device/user code pair from the identity endpoint.
    pub async fn begin(&self) -> Result<DeviceGrant, AuthError> {
        let url = format!(
            "{}?client_id={}",
            self.device_code_url, self.credentials.client_id
        );
        let resp = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.basic_auth_header())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .send()
            .await?;
        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::GrantRequestFailed(body));
        }
        let payload: DeviceCodeResponse = resp.json().await?;
        let expires_at = Utc::now() + chrono::Duration::seconds(payload.expires_in as i64);
        Ok(DeviceGrant {
            device_code: payload.device_code,
            user_code: payload.user_code,
            verification_uri: payload.verification_uri,
            interval_secs: payload.interval.unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
            expires_at,
        })
    }

    /// One poll of the token endpoint; pure state transition, no sleeping.
    pub async fn poll_once(&self, grant: &DeviceGrant) -> Result<DevicePoll, AuthError> {
        if Utc::now() >= grant.expires_at {
            return Ok(DevicePoll::Expired);
        }
        let resp = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", DEVICE_GRANT_TYPE),
                ("device_code", grant.device_code.as_str()),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
            ])
            .send()
            .await?;
        let status = resp.status();
        let payload: TokenResponse = resp.json().await?;

        if status.is_success() {
            let access_token = payload.access_token.ok_or_else(|| {
                AuthError::InvalidResponse("token response missing access_token".to_string())
            })?;
            let expires_in = payload.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
            let expires_at = Utc::now() + chrono::Duration::seconds(expires_in as i64);
            return Ok(DevicePoll::Authorized {
                access_token,
                expires_at,
            });
        }
        match payload.error.as_deref() {
            Some("authorization_pending") => Ok(DevicePoll::Pending),
            Some("slow_down") => Ok(DevicePoll::SlowDown),
            Some(error) => Ok(DevicePoll::Denied {
                description: payload
                    .error_description
                    .unwrap_or_else(|| error.to_string()),
            }),
            None => Err(AuthError::InvalidResponse(
                "token response missing both access_token and error".to_string(),
            )),
        }
    }

    /// Poll until a terminal outcome, sleeping between attempts.
    ///
    /// Starts at the grant's interval; `slow_down` adds 5 seconds each time
    /// and the interval never decreases within one flow. Bounded to 60
    /// attempts, after which the flow times out. The returned session has
    /// `email` unset; identity resolution is a separate lookup.
    pub async fn wait_for_authorization(&self, grant: &DeviceGrant) -> Result<Session, AuthError> {
        let mut interval = Duration::from_secs(grant.interval_secs);
        for attempt in 1..=MAX_POLL_ATTEMPTS {
            tokio::time::sleep(interval).await;
            match self.poll_once(grant).await? {
                DevicePoll::Authorized {
                    access_token,
                    expires_at,
                } => {
                    tracing::info!("device authorization granted");
                    return Ok(Session {
                        access_token,
                        expires_at,
                        email: None,
                    });
                }
                DevicePoll::Pending => {
                    tracing::debug!("authorization pending (attempt {attempt}/{MAX_POLL_ATTEMPTS})");
                }
                DevicePoll::SlowDown => {
                    interval += Duration::from_secs(SLOW_DOWN_STEP_SECS);
                    tracing::debug!("provider requested slower polling, interval now {}s", interval.as_secs());
                }
                DevicePoll::Denied { description } => {
                    tracing::error!("device authorization denied: {description}");
                    return Err(AuthError::Denied(description));
                }
                DevicePoll::Expired => {
                    tracing::error!("device grant expired before authorization");
                    return Err(AuthError::Timeout);
                }
            }
        }
        tracing::error!("device authorization timed out after {MAX_POLL_ATTEMPTS} attempts");
        Err(AuthError::Timeout)
    }

    fn basic_auth_header(&self) -> String {
        let raw = format!(
            "{}:{}",
            self.credentials.client_id, self.credentials.client_secret
        );
        format!("Basic {}", STANDARD.encode(raw))
    }
}

#[derive(Debug, Deserialize)]
struct DeviceCodeResponse {
    device_code: String,
    user_code: String,
    verification_uri: String,
    expires_in: u64,
    interval: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    error: Option<String>,
    error_description: Option<String>,
}
