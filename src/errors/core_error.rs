use esquema_core::CatalogError;
use esquema_persistence::{ConfigError, PersistenceError};
use thiserror::Error;

use crate::cli::{EXIT_CONFIG, EXIT_SCHEMA_FAILED, EXIT_USAGE};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error de configuración: {0}")]
    Config(#[from] ConfigError),
    #[error("Error de persistencia: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("Catálogo inválido: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Uso incorrecto: {0}")]
    Usage(String),
}

impl CoreError {
    /// Código de salida del proceso para este error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CoreError::Config(_) => EXIT_CONFIG,
            CoreError::Usage(_) => EXIT_USAGE,
            CoreError::Persistence(_) | CoreError::Catalog(_) | CoreError::Io(_) => EXIT_SCHEMA_FAILED,
        }
    }
}
