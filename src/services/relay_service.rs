//! services/relay_service.rs
//! Proxy de imágenes: resuelve links de Drive a descarga directa, baja el
//! recurso completo y lo devuelve con su content-type.

use reqwest::{header::CONTENT_TYPE, Client};

use crate::errors::RelayError;
use crate::models::relay_model::{share_link_file_id, RelayedResource};

/// Directiva de caché para intermediarios: 1 hora, revalidación en segundo plano
pub const RELAY_CACHE_CONTROL: &str = "s-maxage=3600, stale-while-revalidate";

#[derive(Clone)]
pub struct RelayService {
    http_client: Client,
    direct_download_base: String,
}

impl RelayService {
    pub fn new(direct_download_base: impl Into<String>) -> Self {
        Self::with_client(Client::new(), direct_download_base)
    }

    pub fn with_client(http_client: Client, direct_download_base: impl Into<String>) -> Self {
        Self {
            http_client,
            direct_download_base: direct_download_base.into(),
        }
    }

    /// Un único fetch, sin reintentos ni fallback a la URL original.
    pub async fn relay(&self, target_url: Option<&str>) -> Result<RelayedResource, RelayError> {
        let target_url = match target_url {
            Some(u) if !u.is_empty() => u,
            _ => return Err(RelayError::MissingUrl),
        };

        let fetch_url = resolve_fetch_url(target_url, &self.direct_download_base);
        log::debug!("(relay) {} -> {}", target_url, fetch_url);

        let resp = self.http_client.get(&fetch_url).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            log::warn!("(relay) upstream respondió {} para {}", status, fetch_url);
            return Err(RelayError::UpstreamStatus { status });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        // Todo el cuerpo en memoria: pensado para imágenes, no videos
        let bytes = resp.bytes().await?;
        log::info!(
            "(relay) {} bytes desde {} (content-type={:?})",
            bytes.len(),
            fetch_url,
            content_type
        );

        Ok(RelayedResource {
            bytes,
            content_type,
        })
    }
}

/// Links con segmento `/d/<fileId>` se reescriben a `<base>/uc?export=download&id=<fileId>`;
/// el resto se usa tal cual.
pub fn resolve_fetch_url(target_url: &str, direct_download_base: &str) -> String {
    match share_link_file_id(target_url) {
        Some(file_id) => format!(
            "{}/uc?export=download&id={}",
            direct_download_base.trim_end_matches('/'),
            file_id
        ),
        None => target_url.to_string(),
    }
}
