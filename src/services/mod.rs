//! services/mod.rs
//! Módulo que agrupa distintos "servicios" o "capas de negocio" de la app.

pub mod gateway_service;
pub mod relay_service;
pub mod session_service;
pub mod submission_service;
pub mod task_service;
