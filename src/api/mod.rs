//! Zoom v2 resource API: directory lookups and assistant relationships.

pub mod client;
pub mod error;

pub use client::{ApiClient, Assistant, Profile, UserId};
pub use error::{ApiError, ResolveError};
