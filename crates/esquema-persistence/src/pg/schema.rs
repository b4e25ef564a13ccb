//! Fase 1: creación de tablas y llaves foráneas.

use diesel::connection::SimpleConnection;
use diesel::Connection;
use log::{debug, error, info};

use esquema_core::ddl::{add_foreign_key_sql, create_table_sql};
use esquema_core::{Catalog, ConstraintMode, PhaseKind, PhaseReport, PhaseTracker};

use super::{finish_phase, ConnectionProvider};
use crate::error::{PersistenceError, PhaseFailure};

/// Crea el esquema en dos pasadas dentro de una transacción:
/// 1. `CREATE TABLE IF NOT EXISTS` en orden topológico.
/// 2. Una llave foránea por relación, cuando todas las tablas ya existen.
pub struct SchemaCreator<'c, P: ConnectionProvider> {
    provider: P,
    catalog: &'c Catalog,
    mode: ConstraintMode,
}

impl<'c, P: ConnectionProvider> SchemaCreator<'c, P> {
    pub fn new(provider: P, catalog: &'c Catalog) -> Self {
        Self { provider, catalog, mode: ConstraintMode::default() }
    }

    pub fn with_mode(mut self, mode: ConstraintMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn create_schema(&self) -> Result<PhaseReport, PhaseFailure> {
        let mut tracker = PhaseTracker::new(PhaseKind::Schema);
        let result = self.run(&mut tracker);
        finish_phase(tracker, result)
    }

    fn run(&self, tracker: &mut PhaseTracker) -> Result<(), PersistenceError> {
        self.catalog.validate()?;
        let mut conn = self.provider.connect()?;
        tracker.begin()?;
        conn.transaction::<_, PersistenceError, _>(|tx| {
                let graph = self.catalog.graph();
                let mut current_group = None;
                for table in graph.creation_order() {
                    if current_group != Some(table.group) {
                        current_group = Some(table.group);
                        info!("Creando {}...", table.group.label());
                    }
                    debug!("create_table {}", table.name);
                    tx.batch_execute(&create_table_sql(table)).map_err(|e| {
                                                                   error!("create_table {} falló: {e}", table.name);
                                                                   e
                                                               })?;
                    tracker.record_statement(0);
                }

                info!("Agregando constraints de foreign keys ({})...", self.mode.as_str());
                for fk in self.catalog.foreign_keys() {
                    debug!("add_constraint {}", fk.name);
                    tx.batch_execute(&add_foreign_key_sql(fk, self.mode)).map_err(|e| {
                                                                              error!("add_constraint {} falló: {e}", fk.name);
                                                                              e
                                                                          })?;
                    tracker.record_statement(0);
                }
                Ok(())
            })
        // `conn` se suelta aquí: la conexión se cierra en todos los caminos.
    }
}
