//! services/gateway_service.rs
//! Cliente de webhooks de n8n. Cada llamada va firmada con el usuario
//! de la sesión (email/name), que se recibe como parámetro.

use reqwest::Client;
use serde_json::Value;

use crate::errors::GatewayError;
use crate::models::{
    gateway_model::{HttpMethod, Payload},
    session_model::SessionIdentity,
};

#[derive(Clone)]
pub struct WorkflowGateway {
    http_client: Client,
    base_url: String,
}

impl WorkflowGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http_client: Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Id pelado -> `<base>/<id>`; si ya es una URL completa se usa tal cual
    pub fn resolve_url(&self, workflow_id: &str) -> String {
        if workflow_id.starts_with("http") {
            workflow_id.to_string()
        } else {
            format!("{}/{}", self.base_url.trim_end_matches('/'), workflow_id)
        }
    }

    /// Sin reintentos, sin timeout, sin llave de idempotencia:
    /// dos llamadas iguales son dos efectos en n8n.
    pub async fn invoke(
        &self,
        workflow_id: &str,
        payload: Payload,
        method: HttpMethod,
        identity: Option<&SessionIdentity>,
    ) -> Result<Value, GatewayError> {
        let payload = enrich_payload(payload, identity);
        // endpoint sin query: la query lleva email/name y no se loguea
        let endpoint = self.resolve_url(workflow_id);
        let mut url = endpoint.clone();

        let request = match method {
            HttpMethod::Get => {
                let query = encode_query(&payload);
                if !query.is_empty() {
                    url.push('?');
                    url.push_str(&query);
                }
                self.http_client.get(&url)
            }
            HttpMethod::Post => self.http_client.post(&url).json(&payload),
        };

        log::info!("(invoke) {:?} {}", method, endpoint);

        let resp = request.send().await.map_err(|e| {
            log::error!("(invoke) Falló la interacción con n8n: {:?}", e);
            GatewayError::Transport(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or("").to_string();
            log::error!("(invoke) n8n respondió {} para {}", status, endpoint);
            return Err(GatewayError::Status {
                status: status.as_u16(),
                status_text,
            });
        }

        let body = resp.bytes().await?;
        serde_json::from_slice::<Value>(&body).map_err(|e| {
            log::error!("(invoke) Respuesta no-JSON de {}: {}", endpoint, e);
            GatewayError::Decode(e.to_string())
        })
    }
}

/// email/name de la sesión pisan lo que traiga el payload con la misma llave
pub fn enrich_payload(mut payload: Payload, identity: Option<&SessionIdentity>) -> Payload {
    if let Some(identity) = identity {
        if let Some(email) = identity.email.as_deref().filter(|e| !e.is_empty()) {
            payload.insert("email".to_string(), Value::String(email.to_string()));
        }
        if let Some(name) = identity.name.as_deref().filter(|n| !n.is_empty()) {
            payload.insert("name".to_string(), Value::String(name.to_string()));
        }
    }
    payload
}

/// Payload -> query string con codificación de formulario (espacio = `+`).
/// Los valores se convierten a texto como lo haría el navegador:
/// arreglos unidos con coma, números sin `.0`, objetos como `[object Object]`.
pub fn encode_query(payload: &Payload) -> String {
    payload
        .iter()
        .map(|(k, v)| format!("{}={}", form_encode(k), form_encode(&query_value(v))))
        .collect::<Vec<_>>()
        .join("&")
}

fn form_encode(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            // Display de f64 ya omite el ".0"
            (_, _, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        // dentro de un arreglo null queda vacío
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => query_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
