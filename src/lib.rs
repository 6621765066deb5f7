//! Attache — Zoom assistant delegation manager.
//!
//! Authenticates against Zoom with the OAuth device-authorization grant,
//! caches the resulting session on disk, and reconciles a list of assistant
//! emails into symmetric assistant relationships (target ↔ assistant) via
//! the Zoom v2 user API.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use attache::auth::{DeviceAuthFlow, FileTokenStore, SessionManager};
//! use attache::config::Credentials;
//!
//! # async fn example() -> Result<(), attache::error::AttacheError> {
//! let credentials = Credentials::from_env()?;
//! let flow = DeviceAuthFlow::new(credentials);
//! let grant = flow.begin().await?;
//! println!("Visit {} and enter {}", grant.verification_uri, grant.user_code);
//! let session = flow.wait_for_authorization(&grant).await?;
//!
//! let mut manager = SessionManager::new(Arc::new(FileTokenStore::new_default()));
//! manager.adopt(session)?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod reconcile;

#[cfg(feature = "cli")]
pub mod cli;
