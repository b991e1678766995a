//! services/session_service.rs
//! Guarda el usuario logueado en un archivo JSON (equivalente al
//! localStorage del cliente). Se crea al login y se borra al logout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;

use crate::models::session_model::SessionIdentity;

#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Un archivo corrupto se ignora igual que si no hubiera sesión
    pub async fn load(&self) -> Result<Option<SessionIdentity>> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("No se pudo leer la sesión en {:?}", self.path))
            }
        };

        match serde_json::from_slice::<SessionIdentity>(&raw) {
            Ok(identity) => Ok(Some(identity)),
            Err(e) => {
                log::error!("Error leyendo usuario de {:?}: {}", self.path, e);
                Ok(None)
            }
        }
    }

    pub async fn save(&self, identity: &SessionIdentity) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("No se pudo crear directorio {:?}", parent))?;
        }

        let data = serde_json::to_vec_pretty(identity).context("Error serializando sesión")?;
        fs::write(&self.path, data)
            .await
            .with_context(|| format!("No se pudo guardar la sesión en {:?}", self.path))?;
        log::info!("Sesión guardada para {:?}", identity.email);
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("No se pudo borrar {:?}", self.path)),
        }
    }
}
