use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::store::TokenStore;

/// An authenticated Zoom session.
///
/// Persisted as `{access_token, expires_at (epoch seconds), email}`.
/// Validity is always re-derived from `expires_at`; it is never cached as
/// a flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
    pub email: Option<String>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Owner of the in-memory session lifecycle.
///
/// The single source of truth for "are we authenticated and with whom".
/// All mutation goes through this type: device-flow completion calls
/// [`adopt`](Self::adopt), expiry and logout call
/// [`invalidate`](Self::invalidate). Checking validity is also the expiry
/// trigger: an expired session observed during [`is_valid`](Self::is_valid)
/// transitions the manager to the unauthenticated state and clears the
/// persisted record.
pub struct SessionManager {
    store: Arc<dyn TokenStore>,
    current: Option<Session>,
}

/// Advisory re-authentication window.
const NEAR_EXPIRY_MINUTES: i64 = 30;

impl SessionManager {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// Load the persisted session, if any.
    ///
    /// An unreadable record counts as "no cached session"; an expired one is
    /// purged immediately and never surfaced.
    pub fn restore(&mut self) -> Result<Option<Session>, AuthError> {
        let loaded = match self.store.load() {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::warn!("discarding unreadable cached session: {err}");
                self.store.clear()?;
                return Ok(None);
            }
        };
        let Some(session) = loaded else {
            return Ok(None);
        };
        if session.is_expired() {
            tracing::info!("cached session expired, clearing");
            self.store.clear()?;
            return Ok(None);
        }
        self.current = Some(session.clone());
        Ok(Some(session))
    }

    /// Replace the current session and persist it.
    pub fn adopt(&mut self, session: Session) -> Result<(), AuthError> {
        self.store.save(&session)?;
        self.current = Some(session);
        Ok(())
    }

    /// Whether a non-expired session is held right now.
    ///
    /// Observing expiry here invalidates the session, in memory and on disk.
    pub fn is_valid(&mut self) -> bool {
        match &self.current {
            Some(session) if !session.is_expired() => true,
            Some(_) => {
                tracing::warn!("session expired, re-authentication required");
                if let Err(err) = self.invalidate() {
                    tracing::warn!("failed to clear expired session: {err}");
                }
                false
            }
            None => false,
        }
    }

    /// Whether the session is valid but expires within 30 minutes.
    ///
    /// Advisory only; never blocks operations.
    pub fn near_expiry(&self) -> bool {
        match &self.current {
            Some(session) if !session.is_expired() => {
                session.expires_at - Utc::now() < Duration::minutes(NEAR_EXPIRY_MINUTES)
            }
            _ => false,
        }
    }

    /// Clear the session unconditionally, in memory and on disk.
    pub fn invalidate(&mut self) -> Result<(), AuthError> {
        self.current = None;
        self.store.clear()
    }

    /// The current session, without any validity side effects.
    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }
}
