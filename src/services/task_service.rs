//! services/task_service.rs
//! Historial de generaciones: listar, buscar y borrar tareas vía n8n.

use serde_json::{Map, Value};

use crate::config::app_config::TaskFieldConfig;
use crate::errors::GatewayError;
use crate::models::{
    gateway_model::HttpMethod,
    session_model::SessionIdentity,
    task_model::{created_at, search_video_id, Task},
};
use crate::services::gateway_service::WorkflowGateway;

#[derive(Clone)]
pub struct TaskService {
    gateway: WorkflowGateway,
    history_workflow_id: String,
    delete_workflow_id: String,
    fields: TaskFieldConfig,
}

impl TaskService {
    pub fn new(
        gateway: WorkflowGateway,
        history_workflow_id: impl Into<String>,
        delete_workflow_id: impl Into<String>,
        fields: TaskFieldConfig,
    ) -> Self {
        Self {
            gateway,
            history_workflow_id: history_workflow_id.into(),
            delete_workflow_id: delete_workflow_id.into(),
            fields,
        }
    }

    pub fn fields(&self) -> &TaskFieldConfig {
        &self.fields
    }

    /// Trae todas las tareas, más nuevas primero
    pub async fn list_tasks(
        &self,
        identity: Option<&SessionIdentity>,
    ) -> Result<Vec<Task>, GatewayError> {
        let data = self
            .gateway
            .invoke(&self.history_workflow_id, Map::new(), HttpMethod::Get, identity)
            .await?;

        let mut tasks = normalize_tasks(data);
        sort_newest_first(&mut tasks, &self.fields);
        log::info!("(list_tasks) {} tareas recibidas", tasks.len());
        Ok(tasks)
    }

    /// Borra por el valor crudo del campo de video. No toca ninguna lista local:
    /// quien llama debe volver a listar.
    pub async fn delete_task(
        &self,
        video: &str,
        identity: Option<&SessionIdentity>,
    ) -> Result<(), GatewayError> {
        let mut payload = Map::new();
        payload.insert(
            self.fields.delete_key_field.clone(),
            Value::String(video.to_string()),
        );

        self.gateway
            .invoke(&self.delete_workflow_id, payload, HttpMethod::Get, identity)
            .await?;
        log::info!("(delete_task) borrado solicitado para video={}", video);
        Ok(())
    }
}

/// n8n a veces devuelve un objeto suelto en vez de un arreglo.
pub fn normalize_tasks(data: Value) -> Vec<Task> {
    match data {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(Task(map)),
                other => {
                    log::warn!("(normalize_tasks) se ignora elemento no-objeto: {}", other);
                    None
                }
            })
            .collect(),
        Value::Object(map) => vec![Task(map)],
        Value::Null => Vec::new(),
        other => {
            log::warn!("(normalize_tasks) respuesta inesperada de n8n: {}", other);
            Vec::new()
        }
    }
}

/// Descendente por createdAt; sin fecha va al final. Orden estable.
pub fn sort_newest_first(tasks: &mut [Task], fields: &TaskFieldConfig) {
    tasks.sort_by_cached_key(|t| std::cmp::Reverse(created_at(t, fields)));
}

/// Búsqueda sin distinguir mayúsculas en los campos de texto y el video_id.
/// Término vacío devuelve la lista tal cual.
pub fn search(tasks: &[Task], term: &str, fields: &TaskFieldConfig) -> Vec<Task> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return tasks.to_vec();
    }

    tasks
        .iter()
        .filter(|t| matches_term(t, &term, fields))
        .cloned()
        .collect()
}

fn matches_term(task: &Task, term: &str, fields: &TaskFieldConfig) -> bool {
    let in_text = fields
        .search_text_fields
        .iter()
        .filter_map(|f| task.text(f))
        .any(|value| value.to_lowercase().contains(term));

    in_text
        || search_video_id(task, fields)
            .map(|id| id.to_lowercase().contains(term))
            .unwrap_or(false)
}
