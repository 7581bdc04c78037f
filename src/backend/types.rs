//! Request and response bodies for the progress/auth backend.
//!
//! All bodies are JSON with camelCase field names.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One selectable phase within a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseInfo {
    pub id: u32,
    pub name: String,
    pub category_id: u32,
}

/// Write-forward progress record, upserted on phase selection and scenario
/// completion. The game never reads it back mid-play.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub user_id: Uuid,
    pub current_category_id: u32,
    pub current_phase: u32,
    pub current_scenario_index: usize,
}

/// New-account request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Session returned by signup and login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user_id: Uuid,
    pub username: String,
}

/// Body of the availability check responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Availability {
    pub available: bool,
}
