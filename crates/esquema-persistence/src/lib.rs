//! esquema-persistence
//!
//! Ejecuta el catálogo de `esquema-core` contra PostgreSQL usando Diesel.
//! Cada fase abre su propia conexión, corre todas sus sentencias en una única
//! transacción y libera la conexión al salir, haya éxito o error.
//!
//! Módulos:
//! - `config`: parámetros de conexión desde entorno / `.env`.
//! - `error`: mapeo de errores Diesel a variantes semánticas.
//! - `pg`: proveedor de conexiones, creador de esquema, cargador de seeds e
//!   introspección.

pub mod config;
pub mod error;
pub mod pg;

pub use config::{init_dotenv, ConfigError, ConnectionTarget, DbConfig};
pub use error::{PersistenceError, PhaseFailure};
pub use pg::inspect::{constraint_exists, count_rows, list_tables, lookup_reference_id, schema_status};
pub use pg::{ConnectionProvider, PgConnectionProvider, SchemaCreator, SchemaStatus, SeedLoader, TableStatus};
