//! HTTP client for the external progress/auth backend.
//!
//! Plain request/response calls with a fixed timeout and a single retry on
//! transport-level failure. Responses with an error status are never retried.
//! Gameplay must survive any of these calls failing; the host logs the error
//! and keeps the session alive.

use std::time::Duration;

use crate::backend::types::Availability;
use crate::backend::{AuthSession, Credentials, PhaseInfo, SignupRequest, UserProgress};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// What went wrong talking to the backend.
#[derive(Debug)]
pub enum BackendError {
    /// Request failed or timed out at the transport level, the server
    /// errored (5xx), or the response body could not be decoded.
    Network(String),
    /// The backend rejected the request (4xx other than 409).
    Validation(String),
    /// Username or email already taken (409).
    Conflict(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::Network(msg) => write!(f, "network error: {}", msg),
            BackendError::Validation(msg) => write!(f, "request rejected: {}", msg),
            BackendError::Conflict(msg) => write!(f, "already taken: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
}

impl BackendClient {
    /// Build a client for the backend at `base_url` (no trailing slash
    /// required).
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /phases/category/:id`
    pub async fn fetch_phases(&self, category_id: u32) -> Result<Vec<PhaseInfo>, BackendError> {
        let url = self.url(&format!("/phases/category/{}", category_id));
        let response = self.execute(self.http.get(&url)).await?;
        decode(response).await
    }

    /// `PUT /user-progress`
    pub async fn upsert_progress(&self, progress: &UserProgress) -> Result<(), BackendError> {
        let url = self.url("/user-progress");
        self.execute(self.http.put(&url).json(progress)).await?;
        Ok(())
    }

    /// `GET /auth/check-username/:name`
    pub async fn check_username_available(&self, name: &str) -> Result<bool, BackendError> {
        let url = self.url(&format!("/auth/check-username/{}", name));
        let response = self.execute(self.http.get(&url)).await?;
        let body: Availability = decode(response).await?;
        Ok(body.available)
    }

    /// `GET /auth/check-email/:email`
    pub async fn check_email_available(&self, email: &str) -> Result<bool, BackendError> {
        let url = self.url(&format!("/auth/check-email/{}", email));
        let response = self.execute(self.http.get(&url)).await?;
        let body: Availability = decode(response).await?;
        Ok(body.available)
    }

    /// `POST /auth/signup`
    pub async fn sign_up(&self, request: &SignupRequest) -> Result<AuthSession, BackendError> {
        let url = self.url("/auth/signup");
        let response = self.execute(self.http.post(&url).json(request)).await?;
        decode(response).await
    }

    /// `POST /auth/login`
    pub async fn log_in(&self, credentials: &Credentials) -> Result<AuthSession, BackendError> {
        let url = self.url("/auth/login");
        let response = self.execute(self.http.post(&url).json(credentials)).await?;
        decode(response).await
    }

    /// Send a request, retrying once on transport failure, and map error
    /// statuses to the backend error taxonomy.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, BackendError> {
        let retry = request.try_clone();
        match request.send().await {
            Ok(response) => check_status(response).await,
            Err(first) => {
                let Some(retry) = retry else {
                    return Err(BackendError::Network(first.to_string()));
                };
                log::warn!("backend request failed ({}), retrying once", first);
                match retry.send().await {
                    Ok(response) => check_status(response).await,
                    Err(second) => Err(BackendError::Network(second.to_string())),
                }
            }
        }
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.text().await {
        Ok(body) if !body.is_empty() => body,
        _ => status.to_string(),
    };

    match status.as_u16() {
        409 => Err(BackendError::Conflict(message)),
        400..=499 => Err(BackendError::Validation(message)),
        _ => Err(BackendError::Network(message)),
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, BackendError> {
    response
        .json()
        .await
        .map_err(|e| BackendError::Network(format!("undecodable response body: {}", e)))
}
