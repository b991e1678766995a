//! handlers/session_handler.rs
//! Login/logout: guarda o borra el perfil del usuario.

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::models::session_model::SessionIdentity;
use crate::services::session_service::SessionStore;

/// GET /api/session
pub async fn get_session_endpoint(store: web::Data<SessionStore>) -> HttpResponse {
    match store.load().await {
        Ok(Some(identity)) => HttpResponse::Ok().json(identity),
        Ok(None) => HttpResponse::NotFound().json(json!({
            "success": false,
            "error": "No hay sesión activa"
        })),
        Err(e) => session_error(e),
    }
}

/// POST /api/session
pub async fn login_endpoint(
    store: web::Data<SessionStore>,
    body: web::Json<SessionIdentity>,
) -> HttpResponse {
    let identity = body.into_inner();
    match store.save(&identity).await {
        Ok(()) => HttpResponse::Ok().json(identity),
        Err(e) => session_error(e),
    }
}

/// DELETE /api/session
pub async fn logout_endpoint(store: web::Data<SessionStore>) -> HttpResponse {
    match store.clear().await {
        Ok(()) => HttpResponse::Ok().json(json!({ "success": true })),
        Err(e) => session_error(e),
    }
}

fn session_error(e: anyhow::Error) -> HttpResponse {
    log::error!("Error de sesión: {:?}", e);
    HttpResponse::InternalServerError().json(json!({
        "success": false,
        "error": "Internal server error"
    }))
}

/// Sesión actual para firmar llamadas; un fallo de lectura cuenta como anónimo.
pub async fn current_identity(store: &SessionStore) -> Option<SessionIdentity> {
    match store.load().await {
        Ok(identity) => identity,
        Err(e) => {
            log::error!("No se pudo leer la sesión: {:?}", e);
            None
        }
    }
}
