#![allow(dead_code)]

use std::sync::Mutex;

use attache::auth::{AuthError, Session, TokenStore};
use chrono::{Duration, Utc};

#[derive(Default)]
pub struct InMemoryTokenStore {
    session: Mutex<Option<Session>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, session: Session) {
        *self.session.lock().expect("store lock poisoned") = Some(session);
    }

    pub fn get(&self) -> Option<Session> {
        self.session.lock().expect("store lock poisoned").clone()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.get())
    }

    fn save(&self, session: &Session) -> Result<(), AuthError> {
        *self.session.lock().expect("store lock poisoned") = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.session.lock().expect("store lock poisoned") = None;
        Ok(())
    }
}

pub fn session(access_token: &str) -> Session {
    Session {
        access_token: access_token.to_string(),
        expires_at: Utc::now() + Duration::hours(1),
        email: Some("admin@x.com".to_string()),
    }
}

pub fn expired_session(access_token: &str) -> Session {
    Session {
        access_token: access_token.to_string(),
        expires_at: Utc::now() - Duration::seconds(1),
        email: Some("admin@x.com".to_string()),
    }
}
