//! services/submission_service.rs
//! Dispara la generación de portada en n8n. No se espera el resultado:
//! la portada aparece después en el historial.

use serde_json::{Map, Value};

use crate::errors::SubmissionError;
use crate::models::{
    gateway_model::HttpMethod,
    session_model::SessionIdentity,
    submission_model::{GenerationRequest, SubmissionState},
};
use crate::services::gateway_service::WorkflowGateway;

#[derive(Clone)]
pub struct SubmissionService {
    gateway: WorkflowGateway,
    submit_workflow_id: String,
}

impl SubmissionService {
    pub fn new(gateway: WorkflowGateway, submit_workflow_id: impl Into<String>) -> Self {
        Self {
            gateway,
            submit_workflow_id: submit_workflow_id.into(),
        }
    }

    /// Devuelve el estado final del envío. Sin URL no se llama a n8n.
    pub async fn submit(
        &self,
        req: GenerationRequest,
        identity: Option<&SessionIdentity>,
    ) -> Result<SubmissionState, SubmissionError> {
        // se valida recortado, pero a n8n va el valor tal como llegó
        let url = match req.url {
            Some(u) if !u.trim().is_empty() => u,
            _ => return Err(SubmissionError::MissingUrl),
        };

        let state = SubmissionState::Idle.begin();

        let mut payload = Map::new();
        payload.insert("url".to_string(), Value::String(url.clone()));
        payload.insert("prompt".to_string(), Value::String(req.prompt));

        match self
            .gateway
            .invoke(&self.submit_workflow_id, payload, HttpMethod::Get, identity)
            .await
        {
            Ok(_) => {
                log::info!("(submit) generación aceptada para url={}", url);
                Ok(state.finish(true))
            }
            Err(e) => {
                log::error!("(submit) no se pudo iniciar la generación: {}", e);
                Err(SubmissionError::Gateway(e))
            }
        }
    }
}
