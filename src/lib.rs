// Biblioteca raíz del crate `rankboard`.
// Reexporta los módulos principales y la función `run_server` que
// levanta la API del panel.
pub mod dashboard;
pub mod models;
pub mod report;
pub mod server;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
