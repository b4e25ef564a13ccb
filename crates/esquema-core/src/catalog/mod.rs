//! Catálogo: tablas + llaves foráneas + seeds.
//!
//! `Catalog::platform()` devuelve el esquema fijo de la plataforma. Se pueden
//! construir catálogos propios con `Catalog::new`, que valida antes de
//! devolverlos (útil en pruebas que necesitan un esquema aislado).

pub mod constraints;
pub mod tables;

use std::collections::HashSet;

use crate::errors::CatalogError;
use crate::graph::SchemaGraph;
use crate::model::{is_valid_identifier, ForeignKey, TableDef};
use crate::seed::{rows::platform_seeds, SeedSet};

#[derive(Debug, Clone)]
pub struct Catalog {
    tables: Vec<TableDef>,
    foreign_keys: Vec<ForeignKey>,
    seeds: Vec<SeedSet>,
}

impl Catalog {
    /// Construye y valida un catálogo.
    pub fn new(tables: Vec<TableDef>, foreign_keys: Vec<ForeignKey>, seeds: Vec<SeedSet>) -> Result<Self, CatalogError> {
        let catalog = Self { tables, foreign_keys, seeds };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Esquema de la plataforma. Su validez está cubierta por las pruebas del
    /// crate; los ejecutores vuelven a llamar `validate` antes de usarlo.
    pub fn platform() -> Self {
        Self { tables: tables::platform_tables(),
               foreign_keys: constraints::platform_foreign_keys(),
               seeds: platform_seeds() }
    }

    pub fn tables(&self) -> &[TableDef] { &self.tables }

    pub fn foreign_keys(&self) -> &[ForeignKey] { &self.foreign_keys }

    pub fn seeds(&self) -> &[SeedSet] { &self.seeds }

    pub fn table(&self, name: &str) -> Option<&TableDef> { self.tables.iter().find(|t| t.name == name) }

    pub fn seed_for(&self, table: &str) -> Option<&SeedSet> { self.seeds.iter().find(|s| s.table == table) }

    pub fn graph(&self) -> SchemaGraph<'_> { SchemaGraph::new(self) }

    fn column_exists(&self, table: &str, column: &str) -> Result<(), CatalogError> {
        let def = self.table(table).ok_or_else(|| CatalogError::UnknownTable(table.to_string()))?;
        def.find_column(column)
           .map(|_| ())
           .ok_or_else(|| CatalogError::UnknownColumn { table: table.to_string(), column: column.to_string() })
    }

    /// Verifica la coherencia interna del catálogo.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for table in &self.tables {
            if !is_valid_identifier(table.name) {
                return Err(CatalogError::InvalidIdentifier(table.name.to_string()));
            }
            if !seen.insert(table.name) {
                return Err(CatalogError::DuplicateTable(table.name.to_string()));
            }
            if table.primary_key().is_none() {
                return Err(CatalogError::MissingPrimaryKey(table.name.to_string()));
            }
            if let Some(bad) = table.columns.iter().find(|c| !is_valid_identifier(c.name)) {
                return Err(CatalogError::InvalidIdentifier(bad.name.to_string()));
            }
        }

        let mut names = HashSet::new();
        for fk in &self.foreign_keys {
            if !is_valid_identifier(fk.name) {
                return Err(CatalogError::InvalidIdentifier(fk.name.to_string()));
            }
            if !names.insert(fk.name) {
                return Err(CatalogError::DuplicateConstraint(fk.name.to_string()));
            }
            self.column_exists(fk.table, fk.column)?;
            self.column_exists(fk.referenced_table, fk.referenced_column)?;
        }

        for seed in &self.seeds {
            let table = self.table(seed.table).ok_or_else(|| CatalogError::UnknownTable(seed.table.to_string()))?;
            for column in &seed.columns {
                self.column_exists(seed.table, column)?;
            }
            let key_unique = seed.columns.contains(&seed.key_column)
                             && table.find_column(seed.key_column).is_some_and(|c| c.unique);
            if !key_unique {
                return Err(CatalogError::SeedKeyNotUnique { table: seed.table.to_string(),
                                                            column: seed.key_column.to_string() });
            }
            for (i, row) in seed.rows.iter().enumerate() {
                if row.len() != seed.columns.len() {
                    return Err(CatalogError::SeedArity { table: seed.table.to_string(),
                                                         row: i,
                                                         expected: seed.columns.len(),
                                                         found: row.len() });
                }
            }
            let mut keys = HashSet::new();
            for key in seed.keys() {
                if !keys.insert(key.clone()) {
                    return Err(CatalogError::DuplicateSeedKey { table: seed.table.to_string(), key });
                }
            }
        }
        Ok(())
    }
}
