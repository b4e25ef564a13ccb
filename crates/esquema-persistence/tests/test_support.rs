//! Utilidades compartidas por las pruebas de integración.
//!
//! Cada prueba trabaja en su propio schema (recreado vacío) y con su propio
//! `application_name`, de modo que pueden correr en paralelo contra la misma
//! base y es posible contar sus backends en `pg_stat_activity`.
#![allow(dead_code)]

use std::time::{Duration, Instant};

use diesel::connection::SimpleConnection;
use diesel::sql_types::{BigInt, Text};
use diesel::{QueryableByName, RunQueryDsl};
use esquema_persistence::{ConnectionProvider, DbConfig, PersistenceError, PgConnectionProvider};

/// Proveedor aislado en el schema `schema`, o `None` si no hay `DATABASE_URL`.
pub fn isolated(schema: &str) -> Option<PgConnectionProvider> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL no definido: omitiendo test");
        return None;
    }
    let base = DbConfig::from_env().expect("config desde entorno");
    let mut admin = PgConnectionProvider::new(base.clone()).connect().expect("conexión admin");
    admin.batch_execute(&format!("DROP SCHEMA IF EXISTS {schema} CASCADE;")).expect("drop schema");
    let cfg = base.with_schema(schema)
                  .expect("schema válido")
                  .with_application_name(&format!("esq-test-{schema}"))
                  .expect("application_name válido");
    Some(PgConnectionProvider::new(cfg))
}

/// Proveedor que siempre falla, como un servidor caído.
pub struct FailingProvider;

impl ConnectionProvider for FailingProvider {
    fn connect(&self) -> Result<diesel::PgConnection, PersistenceError> {
        Err(PersistenceError::Connection("servidor no disponible".into()))
    }
}

#[derive(QueryableByName)]
struct Backends {
    #[diesel(sql_type = BigInt)]
    total: i64,
}

/// Backends abiertos con el `application_name` del proveedor. Espera hasta
/// ~2 s a que el servidor registre los cierres.
pub fn open_backends(provider: &PgConnectionProvider) -> i64 {
    let observer_cfg = provider.config().clone().with_application_name("esq-test-observer").expect("nombre");
    let mut observer = PgConnectionProvider::new(observer_cfg).connect().expect("conexión observadora");
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        let row: Backends = diesel::sql_query("SELECT COUNT(*) AS total FROM pg_stat_activity WHERE application_name = $1")
            .bind::<Text, _>(provider.config().application_name.as_str())
            .get_result(&mut observer)
            .expect("pg_stat_activity");
        if row.total == 0 || Instant::now() >= deadline {
            return row.total;
        }
        std::thread::sleep(Duration::from_millis(100));
    }
}
