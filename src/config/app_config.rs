//! config/app_config.rs
//! Configuración global del servicio (puerto, webhooks, campos de tareas).
//! Se lee de variables de entorno (.env vía dotenv) con valores por defecto.

use std::{env, path::PathBuf};

use anyhow::{Context, Result};

/// Base de los webhooks de n8n
pub const DEFAULT_WORKFLOW_BASE_URL: &str = "https://n8n.forways.com.do/webhook";
/// Webhook que lista el historial de generaciones
pub const DEFAULT_HISTORY_WORKFLOW_ID: &str = "c7b04f3d-e624-40ed-9dc5-b67463ff12c8";
/// Webhook que dispara la generación de portadas
pub const DEFAULT_SUBMIT_WORKFLOW_ID: &str = "aa5bcefa-cf47-404f-a9e9-637db5c98975";
pub const DEFAULT_DELETE_WORKFLOW_ID: &str = "delete-task";
pub const DEFAULT_DIRECT_DOWNLOAD_BASE: &str = "https://drive.google.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub workflow_base_url: String,
    pub history_workflow_id: String,
    pub submit_workflow_id: String,
    pub delete_workflow_id: String,
    pub session_file: PathBuf,
    /// Host al que se reescriben los links `/d/<id>` del relay
    pub direct_download_base: String,
    pub task_fields: TaskFieldConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 5022,
            workflow_base_url: DEFAULT_WORKFLOW_BASE_URL.to_string(),
            history_workflow_id: DEFAULT_HISTORY_WORKFLOW_ID.to_string(),
            submit_workflow_id: DEFAULT_SUBMIT_WORKFLOW_ID.to_string(),
            delete_workflow_id: DEFAULT_DELETE_WORKFLOW_ID.to_string(),
            session_file: PathBuf::from("data").join("session.json"),
            direct_download_base: DEFAULT_DIRECT_DOWNLOAD_BASE.to_string(),
            task_fields: TaskFieldConfig::default(),
        }
    }
}

impl AppConfig {
    /// Lee la configuración del entorno. Lo que no esté definido queda
    /// con su valor por defecto; un PORT inválido es error de arranque.
    pub fn from_env() -> Result<Self> {
        let defaults = AppConfig::default();

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT inválido: '{}'", raw))?,
            Err(_) => defaults.port,
        };

        Ok(AppConfig {
            host: env_or("HOST", defaults.host),
            port,
            workflow_base_url: env_or("WORKFLOW_BASE_URL", defaults.workflow_base_url),
            history_workflow_id: env_or("HISTORY_WORKFLOW_ID", defaults.history_workflow_id),
            submit_workflow_id: env_or("SUBMIT_WORKFLOW_ID", defaults.submit_workflow_id),
            delete_workflow_id: env_or("DELETE_WORKFLOW_ID", defaults.delete_workflow_id),
            session_file: env::var("SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
            direct_download_base: env_or("DIRECT_DOWNLOAD_BASE", defaults.direct_download_base),
            task_fields: defaults.task_fields,
        })
    }
}

fn env_or(key: &str, default: String) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            log::debug!("{} no definido, usando default: {}", key, default);
            default
        }
    }
}

/// Qué campos de los registros de n8n usa cada derivación.
/// Los registros no tienen esquema; aquí queda explícito qué se lee y dónde.
#[derive(Debug, Clone)]
pub struct TaskFieldConfig {
    /// Si alguno tiene valor, la tarea está "completed"
    pub completion_fields: Vec<String>,
    pub error_field: String,
    /// Orden de preferencia para el video_id que se muestra
    pub display_video_fields: Vec<String>,
    /// Campo del que se extrae el video_id al buscar
    pub search_video_field: String,
    pub search_text_fields: Vec<String>,
    pub created_at_field: String,
    /// Campo cuyo valor crudo se manda como llave al borrar
    pub delete_key_field: String,
    /// Imágenes de portada en orden de preferencia; la siguiente es el respaldo
    pub cover_image_fields: Vec<String>,
    /// Link de la portada en alta resolución
    pub high_res_field: String,
}

impl Default for TaskFieldConfig {
    fn default() -> Self {
        TaskFieldConfig {
            completion_fields: strings(&["drive_link", "portada_link"]),
            error_field: "error".to_string(),
            display_video_fields: strings(&["video", "video_url", "url"]),
            search_video_field: "video".to_string(),
            search_text_fields: strings(&[
                "titulo",
                "name",
                "email",
                "texto",
                "descripcion",
                "prompt",
            ]),
            created_at_field: "createdAt".to_string(),
            delete_key_field: "video".to_string(),
            cover_image_fields: strings(&["miniatura_web", "portada_link"]),
            high_res_field: "portada_link".to_string(),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
