//! errors.rs
//! Errores tipados del relay, del gateway de webhooks y de los envíos.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Missing URL parameter")]
    MissingUrl,

    /// El origen respondió con un status no exitoso; se reenvía tal cual.
    #[error("upstream respondió {status}")]
    UpstreamStatus { status: u16 },

    #[error("fallo al obtener el recurso: {0}")]
    Fetch(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Error: {status_text}")]
    Status { status: u16, status_text: String },

    #[error("fallo de red llamando al webhook: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("respuesta del webhook no es JSON: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Falta la URL del video")]
    MissingUrl,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
