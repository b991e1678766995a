//! tests/mod.rs
//! Utilidades compartidas: un servidor actix local que hace de n8n / origen
//! de imágenes, registra cada request y responde lo que se le programe.

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex};

use actix_web::{http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};

use crate::config::app_config::AppConfig;

mod task_tests;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn query_pairs(&self) -> HashMap<String, String> {
        self.query
            .split('&')
            .filter(|p| !p.is_empty())
            .filter_map(|pair| {
                let (k, v) = pair.split_once('=')?;
                Some((form_decode(k)?, form_decode(v)?))
            })
            .collect()
    }

    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("body no es JSON")
    }
}

fn form_decode(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|s| s.into_owned())
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl MockResponse {
    pub fn json(value: serde_json::Value) -> Self {
        MockResponse {
            status: 200,
            content_type: Some("application/json".to_string()),
            body: value.to_string().into_bytes(),
        }
    }

    pub fn raw(status: u16, content_type: Option<&str>, body: &[u8]) -> Self {
        MockResponse {
            status,
            content_type: content_type.map(|c| c.to_string()),
            body: body.to_vec(),
        }
    }
}

#[derive(Default)]
struct MockState {
    captured: Vec<CapturedRequest>,
    // por path; la última respuesta de la cola se repite
    responses: HashMap<String, VecDeque<MockResponse>>,
}

#[derive(Clone)]
pub struct MockUpstream {
    pub base_url: String,
    state: Arc<Mutex<MockState>>,
}

impl MockUpstream {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(MockState::default()));
        let data = web::Data::new(state.clone());

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(record_and_reply))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("no se pudo abrir puerto para el mock");

        let addr = server.addrs()[0];
        actix_rt::spawn(server.run());

        MockUpstream {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn respond(&self, path: &str, response: MockResponse) {
        let mut state = self.state.lock().expect("mock envenenado");
        state
            .responses
            .entry(path.to_string())
            .or_default()
            .push_back(response);
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.lock().expect("mock envenenado").captured.clone()
    }
}

async fn record_and_reply(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<Arc<Mutex<MockState>>>,
) -> HttpResponse {
    let mut state = state.lock().expect("mock envenenado");

    state.captured.push(CapturedRequest {
        method: req.method().to_string(),
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        content_type: req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string()),
        body: body.to_vec(),
    });

    let response = match state.responses.get_mut(req.path()) {
        Some(queue) if queue.len() > 1 => queue.pop_front(),
        Some(queue) => queue.front().cloned(),
        None => None,
    };

    match response {
        Some(r) => {
            let status = StatusCode::from_u16(r.status).expect("status inválido en mock");
            let mut builder = HttpResponse::build(status);
            if let Some(ct) = r.content_type {
                builder.insert_header(("content-type", ct));
            }
            builder.body(r.body)
        }
        None => HttpResponse::NotFound().finish(),
    }
}

/// Config apuntando todo al mock; la sesión vive en `session_dir`.
pub fn test_config(upstream: &MockUpstream, session_dir: &Path) -> AppConfig {
    AppConfig {
        workflow_base_url: upstream.url("/webhook"),
        history_workflow_id: "history".to_string(),
        submit_workflow_id: "submit".to_string(),
        delete_workflow_id: "delete".to_string(),
        session_file: session_dir.join("session.json"),
        direct_download_base: upstream.base_url.clone(),
        ..AppConfig::default()
    }
}
