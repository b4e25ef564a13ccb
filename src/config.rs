//! Configuración central de la aplicación.
//! Se resuelve una sola vez en `main` y se pasa explícitamente hacia abajo
//! (`AppConfig` → `PgConnectionProvider`); no hay estado global.

use std::env;

use esquema_core::ConstraintMode;
use esquema_persistence::{init_dotenv, ConfigError, DbConfig};

/// Configuración global de la aplicación.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Parámetros de conexión a la base de datos.
    pub database: DbConfig,
    /// Cómo se agregan las llaves foráneas (`ESQUEMA_CONSTRAINTS`).
    pub constraint_mode: ConstraintMode,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        init_dotenv();
        Self::from_lookup(|key: &str| env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        let database = DbConfig::from_lookup(&get)?;
        let constraint_mode = match get("ESQUEMA_CONSTRAINTS").filter(|v| !v.trim().is_empty()) {
            Some(raw) => ConstraintMode::parse(&raw).ok_or_else(|| ConfigError::Invalid { key: "ESQUEMA_CONSTRAINTS".into(),
                                                                                          value: raw.clone(),
                                                                                          reason: "se espera guarded o strict".into() })?,
            None => ConstraintMode::default(),
        };
        Ok(Self { database, constraint_mode })
    }
}
