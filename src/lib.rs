//! Esquema de la plataforma: binario de arranque y su librería.
//!
//! - `config`: configuración resuelta una vez desde el entorno.
//! - `bootstrap`: orquestador de las fases de esquema y datos iniciales.
//! - `cli`: comandos y códigos de salida de `esquema-bootstrap`.
//! - `errors`: errores de nivel aplicación.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod errors;

pub use bootstrap::{BootstrapOutcome, BootstrapPhases, Bootstrapper, PgPhases};
pub use config::AppConfig;
pub use errors::CoreError;
