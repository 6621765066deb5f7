//! Configuration: OAuth client credentials and endpoint overrides.

use crate::error::AttacheError;

/// OAuth application credentials, immutable for a run.
///
/// Supplied externally; the crate never generates or validates their format.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Load from `ZOOM_CLIENT_ID` / `ZOOM_CLIENT_SECRET` (reads `.env` if present).
    pub fn from_env() -> Result<Self, AttacheError> {
        let _ = dotenvy::dotenv();
        let client_id = require_env("ZOOM_CLIENT_ID")?;
        let client_secret = require_env("ZOOM_CLIENT_SECRET")?;
        Ok(Self {
            client_id,
            client_secret,
        })
    }
}

fn require_env(key: &str) -> Result<String, AttacheError> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AttacheError::Configuration(format!("{key} is not set")))
}

/// Identity-provider and resource-API locations.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub issuer_url: String,
    pub api_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            issuer_url: "https://zoom.us".to_string(),
            api_base_url: "https://api.zoom.us/v2".to_string(),
        }
    }
}

impl Endpoints {
    /// Defaults with `ZOOM_ISSUER_URL` / `ZOOM_API_BASE_URL` overrides.
    pub fn from_env() -> Self {
        let mut endpoints = Self::default();
        if let Ok(url) = std::env::var("ZOOM_ISSUER_URL") {
            endpoints.issuer_url = url;
        }
        if let Ok(url) = std::env::var("ZOOM_API_BASE_URL") {
            endpoints.api_base_url = url;
        }
        endpoints
    }

    pub fn device_code_url(&self) -> String {
        format!("{}/oauth/devicecode", self.issuer_url)
    }

    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.issuer_url)
    }
}
