//! models/submission_model.rs
//! Request/response para disparar una generación de portada.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    pub url: Option<String>,
    #[serde(default)]
    pub prompt: String,
}

/// Ciclo de vida visto por el cliente:
/// idle -> submitting -> acknowledged | submit_failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Submitting,
    Acknowledged,
    SubmitFailed,
}

impl SubmissionState {
    pub fn begin(self) -> Self {
        match self {
            SubmissionState::Submitting => self,
            _ => SubmissionState::Submitting,
        }
    }

    /// Sólo un envío en curso puede terminar en acknowledged/submit_failed
    pub fn finish(self, ok: bool) -> Self {
        match (self, ok) {
            (SubmissionState::Submitting, true) => SubmissionState::Acknowledged,
            (SubmissionState::Submitting, false) => SubmissionState::SubmitFailed,
            (other, _) => other,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationResponse {
    pub success: bool,
    pub state: SubmissionState,
    pub message: String,
}
