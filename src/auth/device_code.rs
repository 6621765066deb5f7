use chrono::{DateTime, Utc};

/// Device-authorization grant issued by the Zoom identity endpoint.
///
/// One grant exists per authentication attempt and is discarded after a
/// terminal poll outcome (authorized, denied, or timed out).
#[derive(Debug, Clone)]
pub struct DeviceGrant {
    pub device_code: String,
    pub user_code: String,
    pub verification_uri: String,
    pub interval_secs: u64,
    pub expires_at: DateTime<Utc>,
}

/// Outcome of a single poll against the token endpoint.
///
/// Pacing (the current interval, the slow-down increment) is the poll
/// driver's state, not part of the transition itself.
#[derive(Debug, Clone)]
pub enum DevicePoll {
    Pending,
    SlowDown,
    Authorized {
        access_token: String,
        expires_at: DateTime<Utc>,
    },
    Denied {
        description: String,
    },
    Expired,
}
