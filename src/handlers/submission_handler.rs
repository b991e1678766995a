//! handlers/submission_handler.rs

use actix_web::{web, HttpResponse};

use crate::errors::SubmissionError;
use crate::handlers::session_handler::current_identity;
use crate::models::submission_model::{GenerationRequest, GenerationResponse, SubmissionState};
use crate::services::{session_service::SessionStore, submission_service::SubmissionService};

pub const SUBMIT_FAILED_NOTICE: &str =
    "Hubo un error al iniciar la generación. Inténtalo de nuevo.";

/// POST /api/generations
pub async fn submit_generation_endpoint(
    submission_service: web::Data<SubmissionService>,
    store: web::Data<SessionStore>,
    body: web::Json<GenerationRequest>,
) -> HttpResponse {
    let identity = current_identity(&store).await;

    match submission_service
        .submit(body.into_inner(), identity.as_ref())
        .await
    {
        Ok(state) => HttpResponse::Ok().json(GenerationResponse {
            success: true,
            state,
            message: "Generación en proceso. La portada aparecerá en el historial.".to_string(),
        }),
        Err(SubmissionError::MissingUrl) => HttpResponse::BadRequest().json(GenerationResponse {
            success: false,
            state: SubmissionState::Idle,
            message: SubmissionError::MissingUrl.to_string(),
        }),
        Err(SubmissionError::Gateway(_)) => HttpResponse::BadGateway().json(GenerationResponse {
            success: false,
            state: SubmissionState::SubmitFailed,
            message: SUBMIT_FAILED_NOTICE.to_string(),
        }),
    }
}
