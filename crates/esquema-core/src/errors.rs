//! Errores del modelo declarativo.

use thiserror::Error;

use crate::phase::PhaseState;

/// Inconsistencias detectadas al validar un catálogo antes de tocar la base.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CatalogError {
    #[error("tabla duplicada: {0}")]
    DuplicateTable(String),
    #[error("tabla desconocida: {0}")]
    UnknownTable(String),
    #[error("columna desconocida: {table}.{column}")]
    UnknownColumn { table: String, column: String },
    #[error("constraint duplicado: {0}")]
    DuplicateConstraint(String),
    #[error("identificador inválido: {0}")]
    InvalidIdentifier(String),
    #[error("tabla sin llave primaria: {0}")]
    MissingPrimaryKey(String),
    #[error("fila {row} de {table} tiene {found} valores, se esperaban {expected}")]
    SeedArity { table: String, row: usize, expected: usize, found: usize },
    #[error("la llave natural {table}.{column} no es UNIQUE")]
    SeedKeyNotUnique { table: String, column: String },
    #[error("llave natural repetida en {table}: {key}")]
    DuplicateSeedKey { table: String, key: String },
}

/// Transición ilegal en la máquina de estados de una fase.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum PhaseError {
    #[error("transición inválida: {from:?} -> {to:?}")]
    InvalidTransition { from: PhaseState, to: PhaseState },
}
