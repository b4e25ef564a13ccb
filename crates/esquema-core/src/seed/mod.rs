//! Datos de referencia insertados tras crear el esquema.
//!
//! Cada `SeedSet` apunta a una tabla y declara su llave natural; la carga usa
//! `ON CONFLICT (<llave>) DO NOTHING`, por lo que repetirla no cambia nada.

pub mod rows;

use serde_json::Value;

use crate::ddl::quote_literal;

/// Valor de una celda de seed.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedValue {
    Text(String),
    Int(i32),
    Bool(bool),
    Json(Value),
}

impl SeedValue {
    /// Representación literal SQL (usada por el plan en seco).
    pub fn sql_literal(&self) -> String {
        match self {
            SeedValue::Text(s) => quote_literal(s),
            SeedValue::Int(n) => n.to_string(),
            SeedValue::Bool(b) => b.to_string(),
            SeedValue::Json(v) => quote_literal(&v.to_string()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SeedValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for SeedValue {
    fn from(v: &str) -> Self { SeedValue::Text(v.to_string()) }
}

impl From<i32> for SeedValue {
    fn from(v: i32) -> Self { SeedValue::Int(v) }
}

impl From<bool> for SeedValue {
    fn from(v: bool) -> Self { SeedValue::Bool(v) }
}

impl From<Value> for SeedValue {
    fn from(v: Value) -> Self { SeedValue::Json(v) }
}

/// Filas fijas para una tabla de referencia.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedSet {
    pub table: &'static str,
    /// Columna UNIQUE usada para detectar filas ya sembradas.
    pub key_column: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<SeedValue>>,
}

impl SeedSet {
    pub fn new(table: &'static str, key_column: &'static str, columns: &[&'static str]) -> Self {
        Self { table, key_column, columns: columns.to_vec(), rows: Vec::new() }
    }

    pub fn row(mut self, values: Vec<SeedValue>) -> Self {
        self.rows.push(values);
        self
    }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    fn key_index(&self) -> Option<usize> { self.columns.iter().position(|c| *c == self.key_column) }

    /// Valores de la llave natural, en orden de inserción.
    pub fn keys(&self) -> Vec<String> {
        let Some(idx) = self.key_index() else { return Vec::new() };
        self.rows
            .iter()
            .filter_map(|row| row.get(idx))
            .map(|v| v.as_text().map(str::to_string).unwrap_or_else(|| v.sql_literal()))
            .collect()
    }

    /// Fila cuya llave natural es `key`.
    pub fn find(&self, key: &str) -> Option<&[SeedValue]> {
        let idx = self.key_index()?;
        self.rows
            .iter()
            .find(|row| row.get(idx).and_then(SeedValue::as_text) == Some(key))
            .map(Vec::as_slice)
    }
}
