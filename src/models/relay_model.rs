//! models/relay_model.rs

use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static SHARE_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/d/([a-zA-Z0-9_-]+)").expect("regex de share link inválida"));

#[derive(Debug, Clone, Deserialize)]
pub struct RelayQuery {
    pub url: Option<String>,
}

/// Recurso ya descargado completo en memoria
#[derive(Debug, Clone)]
pub struct RelayedResource {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

/// fileId de un link compartido de Drive (`.../d/<fileId>/...`)
pub fn share_link_file_id(url: &str) -> Option<&str> {
    SHARE_LINK_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
