//! app.rs
use crate::config::app_config::AppConfig;
use crate::handlers::{
    relay_handler, session_handler, submission_handler, task_handler, webhook_handler,
};
use crate::services::{
    gateway_service::WorkflowGateway, relay_service::RelayService, session_service::SessionStore,
    submission_service::SubmissionService, task_service::TaskService,
};
use actix_web::web;

/// Servicios compartidos por todos los workers
#[derive(Clone)]
pub struct AppServices {
    pub relay: RelayService,
    pub tasks: TaskService,
    pub submissions: SubmissionService,
    pub session: SessionStore,
}

impl AppServices {
    pub fn from_config(config: &AppConfig) -> Self {
        // Un solo cliente HTTP (sin timeout: lo impone el transporte)
        let http_client = reqwest::Client::new();

        let gateway =
            WorkflowGateway::with_client(http_client.clone(), config.workflow_base_url.clone());

        AppServices {
            relay: RelayService::with_client(http_client, config.direct_download_base.clone()),
            tasks: TaskService::new(
                gateway.clone(),
                config.history_workflow_id.clone(),
                config.delete_workflow_id.clone(),
                config.task_fields.clone(),
            ),
            submissions: SubmissionService::new(gateway, config.submit_workflow_id.clone()),
            session: SessionStore::new(config.session_file.clone()),
        }
    }

    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.relay.clone()))
            .app_data(web::Data::new(self.tasks.clone()))
            .app_data(web::Data::new(self.submissions.clone()))
            .app_data(web::Data::new(self.session.clone()));
    }
}

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.route("/relay", web::get().to(relay_handler::relay_endpoint))
        .service(
            web::scope("/api")
                // ruta que usa la SPA para las miniaturas
                .route("/proxy", web::get().to(relay_handler::relay_endpoint))
                .service(
                    web::resource("/webhook")
                        // callbacks de n8n pueden traer imágenes embebidas
                        .app_data(web::PayloadConfig::new(webhook_handler::WEBHOOK_PAYLOAD_LIMIT))
                        .route(web::post().to(webhook_handler::receive_webhook_endpoint))
                        .default_service(web::to(webhook_handler::webhook_method_not_allowed)),
                )
                .service(
                    web::resource("/session")
                        .route(web::get().to(session_handler::get_session_endpoint))
                        .route(web::post().to(session_handler::login_endpoint))
                        .route(web::delete().to(session_handler::logout_endpoint)),
                )
                .route(
                    "/generations",
                    web::post().to(submission_handler::submit_generation_endpoint),
                )
                .service(
                    web::resource("/tasks")
                        .route(web::get().to(task_handler::list_tasks_endpoint))
                        .route(web::delete().to(task_handler::delete_task_endpoint)),
                ),
        );
}
