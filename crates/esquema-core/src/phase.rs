//! Estado de una fase transaccional (esquema o datos iniciales).
//!
//! Las transiciones válidas son:
//! - `NotStarted` -> `InProgress`
//! - `InProgress` -> `Committed`
//! - `InProgress` -> `RolledBack`
//!
//! No hay reintentos: una fase en estado terminal no vuelve a empezar.

use chrono::{DateTime, Utc};

use crate::errors::PhaseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Schema,
    Seed,
}

impl PhaseKind {
    pub fn label(&self) -> &'static str {
        match self {
            PhaseKind::Schema => "creación del esquema",
            PhaseKind::Seed => "datos iniciales",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseState {
    /// Aún no hay transacción abierta (p.ej. falló la conexión).
    NotStarted,
    InProgress,
    Committed,
    RolledBack,
}

impl PhaseState {
    pub fn advance(self, next: PhaseState) -> Result<PhaseState, PhaseError> {
        use PhaseState::*;
        match (self, next) {
            (NotStarted, InProgress) | (InProgress, Committed) | (InProgress, RolledBack) => Ok(next),
            (from, to) => Err(PhaseError::InvalidTransition { from, to }),
        }
    }

    pub fn is_terminal(&self) -> bool { matches!(self, PhaseState::Committed | PhaseState::RolledBack) }
}

/// Resumen de una fase confirmada.
#[derive(Debug, Clone)]
pub struct PhaseReport {
    pub phase: PhaseKind,
    pub state: PhaseState,
    pub statements_executed: usize,
    /// Filas efectivamente insertadas (0 en la fase de esquema y en re-ejecuciones del seed).
    pub rows_inserted: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl PhaseReport {
    pub fn is_success(&self) -> bool { self.state == PhaseState::Committed }

    pub fn elapsed_ms(&self) -> i64 { (self.finished_at - self.started_at).num_milliseconds() }
}

/// Acumula contadores y valida transiciones mientras la fase corre.
#[derive(Debug)]
pub struct PhaseTracker {
    phase: PhaseKind,
    state: PhaseState,
    started_at: DateTime<Utc>,
    statements: usize,
    rows: usize,
}

impl PhaseTracker {
    pub fn new(phase: PhaseKind) -> Self {
        Self { phase, state: PhaseState::NotStarted, started_at: Utc::now(), statements: 0, rows: 0 }
    }

    pub fn phase(&self) -> PhaseKind { self.phase }

    pub fn state(&self) -> PhaseState { self.state }

    pub fn begin(&mut self) -> Result<(), PhaseError> {
        self.state = self.state.advance(PhaseState::InProgress)?;
        self.started_at = Utc::now();
        Ok(())
    }

    pub fn record_statement(&mut self, rows_affected: usize) {
        self.statements += 1;
        self.rows += rows_affected;
    }

    pub fn statements(&self) -> usize { self.statements }

    pub fn commit(&mut self) -> Result<PhaseReport, PhaseError> {
        self.state = self.state.advance(PhaseState::Committed)?;
        Ok(PhaseReport { phase: self.phase,
                         state: self.state,
                         statements_executed: self.statements,
                         rows_inserted: self.rows,
                         started_at: self.started_at,
                         finished_at: Utc::now() })
    }

    /// Marca la fase como revertida si estaba en curso. Si nunca empezó, el
    /// estado se queda en `NotStarted`.
    pub fn rollback(&mut self) -> PhaseState {
        if let Ok(next) = self.state.advance(PhaseState::RolledBack) {
            self.state = next;
        }
        self.state
    }
}
