//! Proveedor de conexiones.

mod test_support;

use diesel::sql_types::Text;
use diesel::{QueryableByName, RunQueryDsl};
use esquema_core::{Catalog, PhaseState};
use esquema_persistence::{schema_status, ConnectionProvider, DbConfig, PgConnectionProvider, SchemaCreator};
use test_support::isolated;

#[derive(QueryableByName)]
struct CurrentSchema {
    #[diesel(sql_type = Text)]
    name: String,
}

fn unreachable() -> PgConnectionProvider {
    let cfg = DbConfig::from_lookup(|key: &str| match key {
                  "DB_HOST" => Some("127.0.0.1".into()),
                  "DB_PORT" => Some("1".into()),
                  "DB_SSLMODE" => Some("disable".into()),
                  "DB_CONNECT_TIMEOUT" => Some("2".into()),
                  _ => None,
              }).expect("config");
    PgConnectionProvider::new(cfg)
}

#[test]
fn unreachable_server_is_a_connection_error() {
    let err = unreachable().connect().err().expect("puerto cerrado");
    assert!(err.is_connection(), "{err}");
}

#[test]
fn unreachable_server_leaves_schema_phase_not_started() {
    let catalog = Catalog::platform();
    let failure = SchemaCreator::new(unreachable(), &catalog).create_schema().expect_err("sin servidor");
    assert_eq!(failure.state, PhaseState::NotStarted);
    assert!(failure.error.is_connection());
}

#[test]
fn custom_schema_sets_search_path() {
    let Some(provider) = isolated("esq_conn_schema") else { return };
    let mut conn = provider.connect().expect("conn");
    let row: CurrentSchema = diesel::sql_query("SELECT current_schema()::text AS name").get_result(&mut conn).expect("schema");
    assert_eq!(row.name, "esq_conn_schema");
}

#[test]
fn status_of_empty_schema_reports_everything_missing() {
    let Some(provider) = isolated("esq_conn_estado") else { return };
    let catalog = Catalog::platform();
    let status = schema_status(&provider, &catalog).expect("estado");
    assert_eq!(status.schema, "esq_conn_estado");
    assert_eq!(status.missing_tables().len(), 39);
    assert_eq!(status.constraints_present, 0);
    assert!(!status.is_complete());

    SchemaCreator::new(&provider, &catalog).create_schema().expect("create_schema");
    let status = schema_status(&provider, &catalog).expect("estado");
    assert!(status.is_complete());
    assert!(status.tables.iter().all(|t| t.rows == Some(0)));
}
