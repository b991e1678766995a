//! handlers/task_handler.rs
//! Historial: listado con búsqueda y borrado.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::handlers::session_handler::current_identity;
use crate::models::task_model::{Task, TaskView};
use crate::services::{
    session_service::SessionStore,
    task_service::{search, TaskService},
};

pub const LIST_FAILED_NOTICE: &str = "No se pudieron cargar las tareas.";
pub const DELETE_FAILED_NOTICE: &str = "No se pudo eliminar la tarea.";

#[derive(Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    video: Option<String>,
}

/// GET /api/tasks?q=...
pub async fn list_tasks_endpoint(
    task_service: web::Data<TaskService>,
    store: web::Data<SessionStore>,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    let identity = current_identity(&store).await;

    match task_service.list_tasks(identity.as_ref()).await {
        Ok(tasks) => {
            let term = query.q.as_deref().unwrap_or("");
            let found = search(&tasks, term, task_service.fields());
            HttpResponse::Ok().json(json!({
                "success": true,
                "items": to_views(found, &task_service)
            }))
        }
        Err(e) => {
            log::error!("(list_tasks_endpoint) {}", e);
            HttpResponse::BadGateway().json(json!({
                "success": false,
                "error": LIST_FAILED_NOTICE,
                "retryable": true
            }))
        }
    }
}

/// DELETE /api/tasks?video=...
/// Siempre vuelve a listar desde n8n, haya funcionado o no el borrado.
pub async fn delete_task_endpoint(
    task_service: web::Data<TaskService>,
    store: web::Data<SessionStore>,
    query: web::Query<DeleteQuery>,
) -> HttpResponse {
    // valor crudo del campo "video", sin normalizar
    let video = match query.into_inner().video.filter(|v| !v.is_empty()) {
        Some(v) => v,
        None => {
            return HttpResponse::BadRequest().json(json!({
                "success": false,
                "error": "Falta el parámetro video"
            }))
        }
    };
    let identity = current_identity(&store).await;

    let deleted = match task_service.delete_task(&video, identity.as_ref()).await {
        Ok(()) => true,
        Err(e) => {
            log::error!("(delete_task_endpoint) video={}: {}", video, e);
            false
        }
    };
    let notice = (!deleted).then_some(DELETE_FAILED_NOTICE);

    match task_service.list_tasks(identity.as_ref()).await {
        Ok(tasks) => HttpResponse::Ok().json(json!({
            "success": deleted,
            "deleted": deleted,
            "notice": notice,
            "items": to_views(tasks, &task_service)
        })),
        Err(e) => {
            log::error!("(delete_task_endpoint) re-listado falló: {}", e);
            HttpResponse::BadGateway().json(json!({
                "success": false,
                "deleted": deleted,
                "notice": notice,
                "error": LIST_FAILED_NOTICE,
                "retryable": true
            }))
        }
    }
}

fn to_views(tasks: Vec<Task>, task_service: &TaskService) -> Vec<TaskView> {
    tasks
        .into_iter()
        .map(|t| TaskView::from_task(t, task_service.fields()))
        .collect()
}
