//! Fase 2: carga de datos de referencia.

use diesel::pg::{Pg, PgConnection};
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{Bool, Integer, Json, Text};
use diesel::{Connection, RunQueryDsl};
use log::{debug, info};

use esquema_core::ddl::insert_seed_row_sql;
use esquema_core::{Catalog, PhaseKind, PhaseReport, PhaseTracker, SeedSet, SeedValue};

use super::{finish_phase, ConnectionProvider};
use crate::error::{PersistenceError, PhaseFailure};

/// Inserta cada `SeedSet` del catálogo con `ON CONFLICT DO NOTHING`.
///
/// Una sentencia parametrizada por fila; el conteo de filas afectadas permite
/// distinguir una primera carga (todas insertadas) de una re-ejecución (cero).
pub struct SeedLoader<'c, P: ConnectionProvider> {
    provider: P,
    catalog: &'c Catalog,
}

impl<'c, P: ConnectionProvider> SeedLoader<'c, P> {
    pub fn new(provider: P, catalog: &'c Catalog) -> Self { Self { provider, catalog } }

    pub fn insert_initial_data(&self) -> Result<PhaseReport, PhaseFailure> {
        let mut tracker = PhaseTracker::new(PhaseKind::Seed);
        let result = self.run(&mut tracker);
        finish_phase(tracker, result)
    }

    fn run(&self, tracker: &mut PhaseTracker) -> Result<(), PersistenceError> {
        self.catalog.validate()?;
        let mut conn = self.provider.connect()?;
        tracker.begin()?;
        info!("Insertando datos iniciales...");
        conn.transaction::<_, PersistenceError, _>(|tx| {
                for seed in self.catalog.seeds() {
                    let inserted = insert_seed(tx, seed, tracker)?;
                    info!("{}: {} de {} filas insertadas", seed.table, inserted, seed.len());
                }
                Ok(())
            })
    }
}

fn insert_seed(conn: &mut PgConnection, seed: &SeedSet, tracker: &mut PhaseTracker) -> Result<usize, PersistenceError> {
    let sql = insert_seed_row_sql(seed);
    let mut inserted = 0;
    for row in &seed.rows {
        let query = row.iter().fold(diesel::sql_query(sql.as_str()).into_boxed::<Pg>(), bind_value);
        let affected = query.execute(conn)?;
        debug!("seed {} fila {:?}: {} afectadas", seed.table, row.first(), affected);
        tracker.record_statement(affected);
        inserted += affected;
    }
    Ok(inserted)
}

fn bind_value<'f>(query: BoxedSqlQuery<'f, Pg, SqlQuery>, value: &SeedValue) -> BoxedSqlQuery<'f, Pg, SqlQuery> {
    match value {
        SeedValue::Text(s) => query.bind::<Text, _>(s.clone()),
        SeedValue::Int(n) => query.bind::<Integer, _>(*n),
        SeedValue::Bool(b) => query.bind::<Bool, _>(*b),
        SeedValue::Json(v) => query.bind::<Json, _>(v.clone()),
    }
}
