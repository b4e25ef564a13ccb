//! Introspección del esquema ya creado (comando `estado` y pruebas).

use diesel::pg::PgConnection;
use diesel::sql_types::{BigInt, Bool, Integer, Text};
use diesel::{OptionalExtension, QueryableByName, RunQueryDsl};
use serde::Serialize;

use esquema_core::ddl::quote_ident;
use esquema_core::{Catalog, CatalogError};

use super::ConnectionProvider;
use crate::error::PersistenceError;

#[derive(QueryableByName)]
struct TableNameRow {
    #[diesel(sql_type = Text)]
    table_name: String,
}

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    total: i64,
}

#[derive(QueryableByName)]
struct ExistsRow {
    #[diesel(sql_type = Bool)]
    present: bool,
}

#[derive(QueryableByName)]
struct IdRow {
    #[diesel(sql_type = Integer)]
    id: i32,
}

/// Tablas base del schema actual (`search_path`), ordenadas por nombre.
pub fn list_tables(conn: &mut PgConnection) -> Result<Vec<String>, PersistenceError> {
    let rows: Vec<TableNameRow> = diesel::sql_query("SELECT table_name::text AS table_name \
                                                     FROM information_schema.tables \
                                                     WHERE table_schema = current_schema() AND table_type = 'BASE TABLE' \
                                                     ORDER BY table_name")
        .load(conn)?;
    Ok(rows.into_iter().map(|r| r.table_name).collect())
}

/// `COUNT(*)` de una tabla del catálogo. Nombres fuera del catálogo se
/// rechazan antes de tocar la base.
pub fn count_rows(conn: &mut PgConnection, catalog: &Catalog, table: &str) -> Result<i64, PersistenceError> {
    let def = catalog.table(table).ok_or_else(|| CatalogError::UnknownTable(table.to_string()))?;
    let row: CountRow = diesel::sql_query(format!("SELECT COUNT(*) AS total FROM {}", quote_ident(def.name))).get_result(conn)?;
    Ok(row.total)
}

pub fn constraint_exists(conn: &mut PgConnection, name: &str) -> Result<bool, PersistenceError> {
    let row: ExistsRow = diesel::sql_query("SELECT EXISTS (SELECT 1 FROM pg_constraint \
                                            WHERE conname = $1 \
                                            AND connamespace = (SELECT oid FROM pg_namespace WHERE nspname = current_schema())) \
                                            AS present")
        .bind::<Text, _>(name)
        .get_result(conn)?;
    Ok(row.present)
}

/// Id sustituto de una fila de referencia a partir de su llave natural
/// (p. ej. `tipos_usuario` / `"docente"`). `None` si la fila no existe.
pub fn lookup_reference_id(conn: &mut PgConnection,
                           catalog: &Catalog,
                           table: &str,
                           code: &str)
                           -> Result<Option<i32>, PersistenceError> {
    let seed = catalog.seed_for(table).ok_or_else(|| CatalogError::UnknownTable(table.to_string()))?;
    let pk = catalog.table(table)
                    .and_then(|t| t.primary_key())
                    .ok_or_else(|| CatalogError::MissingPrimaryKey(table.to_string()))?;
    let sql = format!("SELECT {} AS id FROM {} WHERE {} = $1",
                      quote_ident(pk.name),
                      quote_ident(seed.table),
                      quote_ident(seed.key_column));
    let row: Option<IdRow> = diesel::sql_query(sql).bind::<Text, _>(code).get_result(conn).optional()?;
    Ok(row.map(|r| r.id))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStatus {
    pub name: String,
    pub exists: bool,
    /// `None` si la tabla no existe.
    pub rows: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaStatus {
    pub schema: String,
    pub tables: Vec<TableStatus>,
    pub constraints_present: usize,
    pub constraints_expected: usize,
}

impl SchemaStatus {
    pub fn missing_tables(&self) -> Vec<&str> {
        self.tables.iter().filter(|t| !t.exists).map(|t| t.name.as_str()).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_tables().is_empty() && self.constraints_present == self.constraints_expected
    }
}

/// Estado de cada tabla del catálogo en la base apuntada por `provider`.
pub fn schema_status<P: ConnectionProvider>(provider: P, catalog: &Catalog) -> Result<SchemaStatus, PersistenceError> {
    let mut conn = provider.connect()?;
    let schema: TableNameRow = diesel::sql_query("SELECT current_schema()::text AS table_name").get_result(&mut conn)?;
    let existing = list_tables(&mut conn)?;

    let mut tables = Vec::with_capacity(catalog.tables().len());
    for def in catalog.tables() {
        let exists = existing.iter().any(|t| t == def.name);
        let rows = if exists { Some(count_rows(&mut conn, catalog, def.name)?) } else { None };
        tables.push(TableStatus { name: def.name.to_string(), exists, rows });
    }

    let mut constraints_present = 0;
    for fk in catalog.foreign_keys() {
        if constraint_exists(&mut conn, fk.name)? {
            constraints_present += 1;
        }
    }

    Ok(SchemaStatus { schema: schema.table_name,
                      tables,
                      constraints_present,
                      constraints_expected: catalog.foreign_keys().len() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(missing: &[&str], present: usize) -> SchemaStatus {
        let tables = ["a", "b", "c"].iter()
                                    .map(|n| TableStatus { name: n.to_string(),
                                                           exists: !missing.contains(n),
                                                           rows: (!missing.contains(n)).then_some(0) })
                                    .collect();
        SchemaStatus { schema: "public".into(), tables, constraints_present: present, constraints_expected: 2 }
    }

    #[test]
    fn complete_requires_tables_and_constraints() {
        assert!(status(&[], 2).is_complete());
        assert!(!status(&[], 1).is_complete());
        let partial = status(&["b"], 2);
        assert_eq!(partial.missing_tables(), vec!["b"]);
        assert!(!partial.is_complete());
    }
}
