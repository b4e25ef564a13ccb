//! Ejecución del catálogo sobre Postgres (Diesel).
//!
//! Modelo de recursos:
//! - Cada fase obtiene una conexión nueva del `ConnectionProvider`; no hay
//!   pool ni estado compartido entre fases.
//! - Todas las sentencias de una fase corren dentro de una sola transacción
//!   (`Connection::transaction`): cualquier error revierte la fase completa.
//! - La conexión vive en el scope de la fase y se cierra al soltarse, tanto en
//!   el camino feliz como en el de error.

pub mod inspect;
pub mod schema;
pub mod seed;

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::Connection;
use log::{debug, error, info};

use esquema_core::ddl::quote_ident;
use esquema_core::{PhaseReport, PhaseTracker};

use crate::config::DbConfig;
use crate::error::{PersistenceError, PhaseFailure};

pub use inspect::{SchemaStatus, TableStatus};
pub use schema::SchemaCreator;
pub use seed::SeedLoader;

/// Proveedor abstracto de conexiones.
///
/// Permite:
/// - Inyectar el proveedor real basado en configuración.
/// - Simular fallos de conexión en pruebas sin levantar una base.
///
/// Contrato:
/// - Devuelve una conexión lista o `PersistenceError::Connection`; nunca
///   entra en pánico.
pub trait ConnectionProvider {
    fn connect(&self) -> Result<PgConnection, PersistenceError>;
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for &P {
    fn connect(&self) -> Result<PgConnection, PersistenceError> { (**self).connect() }
}

/// Implementación concreta respaldada por `DbConfig`.
#[derive(Debug, Clone)]
pub struct PgConnectionProvider {
    config: DbConfig,
}

impl PgConnectionProvider {
    pub fn new(config: DbConfig) -> Self { Self { config } }

    pub fn config(&self) -> &DbConfig { &self.config }
}

impl ConnectionProvider for PgConnectionProvider {
    fn connect(&self) -> Result<PgConnection, PersistenceError> {
        debug!("connect:start {}", self.config.safe_connection_string());
        let mut conn = PgConnection::establish(&self.config.connection_string()).map_err(|e| {
                                                                                  error!("Error al conectar a PostgreSQL: {e}");
                                                                                  PersistenceError::from(e)
                                                                              })?;
        if !self.config.uses_default_schema() {
            let schema = quote_ident(&self.config.schema);
            conn.batch_execute(&format!("CREATE SCHEMA IF NOT EXISTS {schema}; SET search_path TO {schema};"))?;
        }
        debug!("connect:done schema={}", self.config.schema);
        Ok(conn)
    }
}

/// Cierra el ciclo de vida de una fase: confirma el reporte o registra el
/// fallo con el estado en que quedó.
pub(crate) fn finish_phase(mut tracker: PhaseTracker,
                           result: Result<(), PersistenceError>)
                           -> Result<PhaseReport, PhaseFailure> {
    let phase = tracker.phase();
    match result.and_then(|()| tracker.commit().map_err(PersistenceError::from)) {
        Ok(report) => {
            info!("{}: confirmada ({} sentencias, {} filas, {} ms)",
                  phase.label(),
                  report.statements_executed,
                  report.rows_inserted,
                  report.elapsed_ms());
            Ok(report)
        }
        Err(error) => {
            let state = tracker.rollback();
            error!("Error en {}: {error} (estado {:?}, {} sentencias revertidas)",
                   phase.label(),
                   state,
                   tracker.statements());
            Err(PhaseFailure { phase, state, error })
        }
    }
}
