//! esquema-core: modelo declarativo del esquema de la plataforma.
//!
//! No realiza I/O. Describe qué tablas, llaves foráneas y filas de
//! referencia existen, en qué orden se crean y cómo se traducen a SQL.
//! La ejecución contra PostgreSQL vive en `esquema-persistence`.
//!
//! Módulos:
//! - `model`: columnas, tablas y llaves foráneas tipadas.
//! - `catalog`: catálogo fijo de la plataforma (39 tablas, 53 FKs) y su validación.
//! - `seed`: conjuntos de filas de referencia con llave natural.
//! - `graph`: grafo de dependencias y orden topológico de creación.
//! - `ddl`: renderizado de sentencias SQL (tablas, constraints, seeds, plan).
//! - `phase`: máquina de estados de cada fase transaccional.

pub mod catalog;
pub mod ddl;
pub mod errors;
pub mod graph;
pub mod model;
pub mod phase;
pub mod seed;

pub use catalog::Catalog;
pub use ddl::{render_plan, ConstraintMode};
pub use errors::{CatalogError, PhaseError};
pub use graph::SchemaGraph;
pub use model::{Column, ColumnType, DefaultValue, ForeignKey, TableDef, TableGroup};
pub use phase::{PhaseKind, PhaseReport, PhaseState, PhaseTracker};
pub use seed::{SeedSet, SeedValue};
