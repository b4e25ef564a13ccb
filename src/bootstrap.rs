//! Orquestador: crea el esquema y, sólo si se confirmó, carga los datos
//! iniciales. Cada fase es dueña de su transacción; no hay coordinación de
//! rollback entre fases.

use log::{error, info, warn};

use esquema_core::{Catalog, ConstraintMode, PhaseReport};
use esquema_persistence::{ConnectionProvider, PhaseFailure, SchemaCreator, SeedLoader};

use crate::cli::{EXIT_OK, EXIT_PARTIAL, EXIT_SCHEMA_FAILED};

/// Las dos fases del arranque, detrás de un trait para poder sustituirlas.
pub trait BootstrapPhases {
    fn create_schema(&self) -> Result<PhaseReport, PhaseFailure>;
    fn insert_initial_data(&self) -> Result<PhaseReport, PhaseFailure>;
}

impl<B: BootstrapPhases + ?Sized> BootstrapPhases for &B {
    fn create_schema(&self) -> Result<PhaseReport, PhaseFailure> { (**self).create_schema() }

    fn insert_initial_data(&self) -> Result<PhaseReport, PhaseFailure> { (**self).insert_initial_data() }
}

/// Fases reales sobre Postgres.
pub struct PgPhases<'c, P: ConnectionProvider> {
    provider: P,
    catalog: &'c Catalog,
    mode: ConstraintMode,
}

impl<'c, P: ConnectionProvider> PgPhases<'c, P> {
    pub fn new(provider: P, catalog: &'c Catalog, mode: ConstraintMode) -> Self { Self { provider, catalog, mode } }
}

impl<P: ConnectionProvider> BootstrapPhases for PgPhases<'_, P> {
    fn create_schema(&self) -> Result<PhaseReport, PhaseFailure> {
        SchemaCreator::new(&self.provider, self.catalog).with_mode(self.mode).create_schema()
    }

    fn insert_initial_data(&self) -> Result<PhaseReport, PhaseFailure> {
        SeedLoader::new(&self.provider, self.catalog).insert_initial_data()
    }
}

/// Resultado combinado de ambas fases.
#[derive(Debug)]
pub enum BootstrapOutcome {
    Complete { schema: PhaseReport, seed: PhaseReport },
    /// El esquema quedó confirmado pero los datos iniciales fallaron.
    SchemaOnly { schema: PhaseReport, seed_failure: PhaseFailure },
    /// La creación del esquema falló; los datos iniciales no se intentaron.
    Failed { schema_failure: PhaseFailure },
}

impl BootstrapOutcome {
    pub fn is_complete(&self) -> bool { matches!(self, BootstrapOutcome::Complete { .. }) }

    pub fn exit_code(&self) -> i32 {
        match self {
            BootstrapOutcome::Complete { .. } => EXIT_OK,
            BootstrapOutcome::SchemaOnly { .. } => EXIT_PARTIAL,
            BootstrapOutcome::Failed { .. } => EXIT_SCHEMA_FAILED,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            BootstrapOutcome::Complete { schema, seed } => {
                format!("Base de datos creada exitosamente: {} sentencias de esquema, {} filas iniciales insertadas",
                        schema.statements_executed, seed.rows_inserted)
            }
            BootstrapOutcome::SchemaOnly { seed_failure, .. } => {
                format!("Esquema creado pero hubo errores en datos iniciales: {seed_failure}")
            }
            BootstrapOutcome::Failed { schema_failure } => {
                format!("Error al crear el esquema de la base de datos: {schema_failure}")
            }
        }
    }
}

pub struct Bootstrapper<B: BootstrapPhases> {
    phases: B,
}

impl<'c, P: ConnectionProvider> Bootstrapper<PgPhases<'c, P>> {
    pub fn postgres(provider: P, catalog: &'c Catalog, mode: ConstraintMode) -> Self {
        Self::new(PgPhases::new(provider, catalog, mode))
    }
}

impl<B: BootstrapPhases> Bootstrapper<B> {
    pub fn new(phases: B) -> Self { Self { phases } }

    pub fn run(&self) -> BootstrapOutcome {
        info!("Iniciando creación de la base de datos...");
        let outcome = match self.phases.create_schema() {
            Err(schema_failure) => BootstrapOutcome::Failed { schema_failure },
            Ok(schema) => match self.phases.insert_initial_data() {
                Ok(seed) => BootstrapOutcome::Complete { schema, seed },
                Err(seed_failure) => BootstrapOutcome::SchemaOnly { schema, seed_failure },
            },
        };
        match &outcome {
            BootstrapOutcome::Complete { .. } => info!("{}", outcome.summary()),
            BootstrapOutcome::SchemaOnly { .. } => warn!("{}", outcome.summary()),
            BootstrapOutcome::Failed { .. } => error!("{}", outcome.summary()),
        }
        outcome
    }
}
