//! handlers/mod.rs
//! Módulo que agrupa los distintos handlers (relay, tareas, sesión, etc.).
pub mod relay_handler;
pub mod session_handler;
pub mod submission_handler;
pub mod task_handler;
pub mod webhook_handler;
