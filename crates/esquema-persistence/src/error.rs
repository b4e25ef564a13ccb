//! Errores de persistencia.
//! Mapea errores de Diesel / conexión a variantes semánticas.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::ConnectionError;
use esquema_core::{CatalogError, PhaseError, PhaseKind, PhaseState};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("unique violation: {0}")]
    UniqueViolation(String),
    #[error("check violation: {0}")]
    CheckViolation(String),
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),
    #[error("not null violation: {0}")]
    NotNullViolation(String),
    #[error("not found")]
    NotFound,
    #[error("serialization conflict")]
    SerializationConflict,
    #[error("transient IO error: {0}")]
    TransientIo(String),
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("phase state: {0}")]
    Phase(#[from] PhaseError),
    #[error("unknown database error: {0}")]
    Unknown(String),
}

impl PersistenceError {
    pub fn is_foreign_key_violation(&self) -> bool { matches!(self, Self::ForeignKeyViolation(_)) }

    pub fn is_connection(&self) -> bool { matches!(self, Self::Connection(_)) }
}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation => Self::UniqueViolation(info.message().to_string()),
                DatabaseErrorKind::CheckViolation => Self::CheckViolation(info.message().to_string()),
                DatabaseErrorKind::ForeignKeyViolation => Self::ForeignKeyViolation(info.message().to_string()),
                DatabaseErrorKind::NotNullViolation => Self::NotNullViolation(info.message().to_string()),
                DatabaseErrorKind::SerializationFailure => Self::SerializationConflict,
                DatabaseErrorKind::ClosedConnection => Self::TransientIo(info.message().to_string()),
                other => Self::Unknown(format!("db error kind {:?}: {}", other, info.message())),
            },
            DieselError::DeserializationError(e) => Self::Unknown(format!("deser: {e}")),
            DieselError::SerializationError(e) => Self::Unknown(format!("ser: {e}")),
            DieselError::AlreadyInTransaction => Self::Unknown("already in transaction".into()),
            DieselError::RollbackErrorOnCommit { rollback_error, commit_error } => {
                Self::Unknown(format!("rollback={rollback_error}; commit={commit_error}"))
            }
            DieselError::BrokenTransactionManager => Self::TransientIo("broken transaction manager".into()),
            DieselError::QueryBuilderError(e) => Self::Unknown(format!("query builder: {e}")),
            DieselError::InvalidCString(e) => Self::Unknown(format!("invalid cstring: {e}")),
            DieselError::RollbackTransaction => Self::Unknown("rollback transaction".into()),
            DieselError::NotInTransaction => Self::Unknown("not in transaction".into()),
            other => Self::Unknown(format!("unhandled diesel error: {other:?}")),
        }
    }
}

impl From<ConnectionError> for PersistenceError {
    fn from(err: ConnectionError) -> Self { Self::Connection(err.to_string()) }
}

/// Fallo de una fase: qué fase, en qué estado quedó y la causa.
///
/// `state` es `NotStarted` si no llegó a abrirse la transacción (conexión o
/// catálogo inválido) y `RolledBack` si se revirtió.
#[derive(Debug, Error)]
#[error("fase '{}' falló ({:?}): {}", .phase.label(), .state, .error)]
pub struct PhaseFailure {
    pub phase: PhaseKind,
    pub state: PhaseState,
    #[source]
    pub error: PersistenceError,
}
