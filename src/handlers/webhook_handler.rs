//! handlers/webhook_handler.rs
//! Receptor de callbacks de n8n. Sólo confirma recepción, no persiste nada.

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

/// Límite del body del callback (el default de actix es 256 KiB)
pub const WEBHOOK_PAYLOAD_LIMIT: usize = 50 * 1024 * 1024;

/// POST /api/webhook
pub async fn receive_webhook_endpoint(body: web::Bytes) -> HttpResponse {
    match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(payload) => log::info!("Webhook recibido: {}", payload),
        Err(_) => log::info!("Webhook recibido ({} bytes, no-JSON)", body.len()),
    }

    HttpResponse::Ok().json(json!({ "received": true }))
}

/// Cualquier otro método sobre /api/webhook
pub async fn webhook_method_not_allowed(req: HttpRequest) -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header(("Allow", "POST"))
        .content_type("text/plain; charset=utf-8")
        .body(format!("Method {} Not Allowed", req.method()))
}
