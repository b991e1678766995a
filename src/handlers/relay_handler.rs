//! handlers/relay_handler.rs
//! GET /relay?url=... (y /api/proxy?url=...)

use actix_web::{http::StatusCode, web, HttpResponse};

use crate::errors::RelayError;
use crate::models::relay_model::RelayQuery;
use crate::services::relay_service::{RelayService, RELAY_CACHE_CONTROL};

pub async fn relay_endpoint(
    relay_service: web::Data<RelayService>,
    query: web::Query<RelayQuery>,
) -> HttpResponse {
    match relay_service.relay(query.url.as_deref()).await {
        Ok(resource) => {
            let mut builder = HttpResponse::Ok();
            if let Some(content_type) = resource.content_type {
                builder.insert_header(("Content-Type", content_type));
            }
            builder
                .insert_header(("Cache-Control", RELAY_CACHE_CONTROL))
                .body(resource.bytes)
        }
        Err(RelayError::MissingUrl) => HttpResponse::BadRequest()
            .content_type("text/plain; charset=utf-8")
            .body("Missing URL parameter"),
        Err(RelayError::UpstreamStatus { status }) => {
            let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            HttpResponse::build(code)
                .content_type("text/plain; charset=utf-8")
                .body("Failed to fetch image")
        }
        Err(e) => {
            log::error!("Proxy Error: {:?}", e);
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("Internal Server Error")
        }
    }
}
