//! models/mod.rs
//! Módulo raíz para modelos/estructuras compartidas.

pub mod gateway_model;
pub mod relay_model;
pub mod session_model;
pub mod submission_model;
pub mod task_model;
