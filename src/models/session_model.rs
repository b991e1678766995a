//! models/session_model.rs

use serde::{Deserialize, Serialize};

/// Perfil del usuario logueado (lo que devuelve el userinfo de OAuth).
/// Se guarda mientras dure la sesión y firma cada llamada a n8n.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}
