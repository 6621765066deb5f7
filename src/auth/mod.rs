//! OAuth device-authorization flow, session lifecycle, and token storage.

pub mod device_code;
pub mod error;
pub mod flow;
pub mod session;
pub mod store;

pub use device_code::{DeviceGrant, DevicePoll};
pub use error::AuthError;
pub use flow::DeviceAuthFlow;
pub use session::{Session, SessionManager};
pub use store::{FileTokenStore, TokenStore};
