//! models/task_model.rs
//! Registros de tareas tal como los devuelve n8n, más las derivaciones
//! (estado, video_id, fecha, imágenes) que se calculan sin tocar el registro.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::app_config::TaskFieldConfig;
use crate::models::relay_model::share_link_file_id;

/// youtu.be/<id>, /v/<id>, /u/x/<id>, embed/<id>, shorts/<id>, watch?v=<id>, &v=<id>
static VIDEO_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.*(?:youtu\.be/|v/|u/\w/|embed/|shorts/|watch\?v=|&v=)([^#&?]*).*")
        .expect("regex de video_id inválida")
});

const VIDEO_ID_LEN: usize = 11;

/// Ruta del relay que consume la SPA para las imágenes
pub const RELAY_PATH: &str = "/api/proxy";
/// CDN de Google para incrustar imágenes de Drive: `<base>/<fileId>=w<ancho>`
const HIGH_RES_BASE: &str = "https://lh3.googleusercontent.com/d";
const HIGH_RES_WIDTH: u32 = 1000;

/// Registro sin esquema. Ningún campo es obligatorio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Task(pub Map<String, Value>);

impl Task {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Valor de texto del campo, sólo si es string no vacío
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.0.get(name).map(is_truthy).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Completed,
    Error,
    Pending,
}

/// Lo que ve el cliente por cada tarea del historial
#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub task: Task,
    pub status: TaskStatus,
    pub video_id: Option<String>,
    /// Portada a mostrar, siempre a través del relay
    pub cover_src: Option<String>,
    /// Se intenta sólo si `cover_src` falla al cargar
    pub cover_fallback_src: Option<String>,
    pub high_res_link: Option<String>,
}

impl TaskView {
    pub fn from_task(task: Task, fields: &TaskFieldConfig) -> Self {
        let status = derive_status(&task, fields);
        let video_id = display_video_id(&task, fields);
        let (cover_src, cover_fallback_src) = cover_sources(&task, fields);
        let high_res_link = high_res_link(&task, fields);
        TaskView {
            task,
            status,
            video_id,
            cover_src,
            cover_fallback_src,
            high_res_link,
        }
    }
}

/// Semántica "truthy" del backend: null, false, 0 y "" cuentan como ausentes.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// El link gana: un registro con link y con error queda "completed".
pub fn derive_status(task: &Task, fields: &TaskFieldConfig) -> TaskStatus {
    if fields.completion_fields.iter().any(|f| task.has(f)) {
        return TaskStatus::Completed;
    }
    if task.has(&fields.error_field) {
        return TaskStatus::Error;
    }
    TaskStatus::Pending
}

pub fn extract_video_id(url: &str) -> Option<String> {
    let caps = VIDEO_ID_RE.captures(url)?;
    let id = caps.get(1)?.as_str();
    if id.chars().count() == VIDEO_ID_LEN {
        Some(id.to_string())
    } else {
        None
    }
}

/// video_id para mostrar: primer campo con valor según la preferencia configurada
pub fn display_video_id(task: &Task, fields: &TaskFieldConfig) -> Option<String> {
    fields
        .display_video_fields
        .iter()
        .find_map(|f| task.text(f))
        .and_then(extract_video_id)
}

/// video_id para búsquedas: sólo el campo de búsqueda configurado
pub fn search_video_id(task: &Task, fields: &TaskFieldConfig) -> Option<String> {
    task.text(&fields.search_video_field)
        .and_then(extract_video_id)
}

/// `/api/proxy?url=<url codificada>`
pub fn relay_src(url: &str) -> String {
    format!("{}?url={}", RELAY_PATH, urlencoding::encode(url))
}

/// Primera imagen con valor y la siguiente como respaldo, ambas vía relay
pub fn cover_sources(task: &Task, fields: &TaskFieldConfig) -> (Option<String>, Option<String>) {
    let mut candidates = fields.cover_image_fields.iter().filter_map(|f| task.text(f));
    let primary = candidates.next().map(relay_src);
    let fallback = candidates.next().map(relay_src);
    (primary, fallback)
}

/// Links de Drive van al CDN en alta resolución; cualquier otro link queda igual
pub fn high_res_link(task: &Task, fields: &TaskFieldConfig) -> Option<String> {
    let link = task.text(&fields.high_res_field)?;
    Some(match share_link_file_id(link) {
        Some(file_id) => format!("{}/{}=w{}", HIGH_RES_BASE, file_id, HIGH_RES_WIDTH),
        None => link.to_string(),
    })
}

/// Fecha de creación para ordenar. Ausente o ilegible = epoch.
pub fn created_at(task: &Task, fields: &TaskFieldConfig) -> DateTime<Utc> {
    task.field(&fields.created_at_field)
        .and_then(parse_timestamp)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(Utc.from_utc_datetime(&naive));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
                return Some(Utc.from_utc_datetime(&naive));
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
        }
        // milisegundos desde epoch
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}
