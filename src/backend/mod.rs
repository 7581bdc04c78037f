mod client;
mod types;

pub use client::{BackendClient, BackendError};
pub use types::{AuthSession, Credentials, PhaseInfo, SignupRequest, UserProgress};
