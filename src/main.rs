use actix_web::{middleware::Logger, App, HttpServer};
use dotenv::dotenv;

use crate::app::AppServices;
use crate::config::app_config::AppConfig;
use crate::logger::init_logger;

mod app;
mod config;
mod errors;
mod handlers;
mod logger;
mod models;
mod services;

#[cfg(test)]
mod tests;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let config = AppConfig::from_env()?;
    let services = AppServices::from_config(&config);

    log::info!(
        "Webhooks en {} (historial={}, generar={}, borrar={})",
        config.workflow_base_url,
        config.history_workflow_id,
        config.submit_workflow_id,
        config.delete_workflow_id
    );
    log::info!("Sesión en {:?}", services.session.path());

    // Levantar servidor
    log::info!("Levantando servidor en {}:{}", config.host, config.port);
    HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(Logger::default())
            .configure(move |cfg| services.register(cfg))
            .configure(app::init_app)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
