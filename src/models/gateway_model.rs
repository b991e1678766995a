//! models/gateway_model.rs
//! Tipos de la llamada a webhooks de n8n.

use serde_json::{Map, Value};

/// Payload libre que se manda al webhook
pub type Payload = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}
