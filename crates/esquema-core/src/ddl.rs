//! Renderizado SQL (dialecto PostgreSQL).
//!
//! Los identificadores se emiten sin comillas; `Catalog::validate` garantiza
//! que todos cumplen `[a-z_][a-z0-9_]*`. Los literales pasan por
//! `quote_literal`.

use crate::catalog::Catalog;
use crate::model::{ForeignKey, TableDef};
use crate::seed::SeedSet;

/// Cómo se agregan las llaves foráneas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstraintMode {
    /// Cada constraint se envuelve en un bloque `DO` que consulta
    /// `pg_constraint` antes de agregarlo. Re-ejecutar es seguro.
    #[default]
    Guarded,
    /// `ALTER TABLE ... ADD CONSTRAINT` directo. Una segunda ejecución falla
    /// con "already exists".
    Strict,
}

impl ConstraintMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "guarded" | "idempotente" => Some(Self::Guarded),
            "strict" | "estricto" => Some(Self::Strict),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guarded => "guarded",
            Self::Strict => "strict",
        }
    }
}

/// `'texto'` con comillas simples duplicadas.
pub fn quote_literal(value: &str) -> String { format!("'{}'", value.replace('\'', "''")) }

/// `"ident"` con comillas dobles duplicadas. Solo para nombres que no vienen
/// del catálogo (p.ej. el schema configurado).
pub fn quote_ident(value: &str) -> String { format!("\"{}\"", value.replace('"', "\"\"")) }

pub fn create_table_sql(table: &TableDef) -> String {
    let columns: Vec<String> = table.columns.iter().map(|c| format!("    {}", c.definition())).collect();
    format!("CREATE TABLE IF NOT EXISTS {} (\n{}\n);", table.name, columns.join(",\n"))
}

fn alter_table_sql(fk: &ForeignKey) -> String {
    format!("ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {}({});",
            fk.table, fk.name, fk.column, fk.referenced_table, fk.referenced_column)
}

pub fn add_foreign_key_sql(fk: &ForeignKey, mode: ConstraintMode) -> String {
    match mode {
        ConstraintMode::Strict => alter_table_sql(fk),
        ConstraintMode::Guarded => format!(
            "DO $$\nBEGIN\n    IF NOT EXISTS (\n        SELECT 1 FROM pg_constraint\n        WHERE conname = {}\n          AND connamespace = (SELECT oid FROM pg_namespace WHERE nspname = current_schema())\n    ) THEN\n        {}\n    END IF;\nEND\n$$;",
            quote_literal(fk.name),
            alter_table_sql(fk)
        ),
    }
}

/// Sentencia parametrizada para una fila del seed (`$1..$n`).
pub fn insert_seed_row_sql(seed: &SeedSet) -> String {
    let placeholders: Vec<String> = (1..=seed.columns.len()).map(|i| format!("${i}")).collect();
    format!("INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) DO NOTHING",
            seed.table,
            seed.columns.join(", "),
            placeholders.join(", "),
            seed.key_column)
}

/// Sentencia multi-fila con literales, para el plan en seco.
pub fn insert_seed_literal_sql(seed: &SeedSet) -> String {
    let rows: Vec<String> = seed.rows
                                .iter()
                                .map(|row| {
                                    let values: Vec<String> = row.iter().map(|v| v.sql_literal()).collect();
                                    format!("    ({})", values.join(", "))
                                })
                                .collect();
    format!("INSERT INTO {} ({}) VALUES\n{}\nON CONFLICT ({}) DO NOTHING;",
            seed.table,
            seed.columns.join(", "),
            rows.join(",\n"),
            seed.key_column)
}

/// Script completo de ambas fases, tal como se ejecutaría.
pub fn render_plan(catalog: &Catalog, mode: ConstraintMode) -> String {
    let graph = catalog.graph();
    let mut out = String::new();
    out.push_str("-- fase 1: creación del esquema\nBEGIN;\n");
    let mut current_group = None;
    for table in graph.creation_order() {
        if current_group != Some(table.group) {
            current_group = Some(table.group);
            out.push_str(&format!("\n-- {}\n", table.group.label()));
        }
        out.push_str(&create_table_sql(table));
        out.push('\n');
    }
    out.push_str(&format!("\n-- llaves foráneas ({})\n", mode.as_str()));
    for fk in catalog.foreign_keys() {
        out.push_str(&add_foreign_key_sql(fk, mode));
        out.push('\n');
    }
    out.push_str("COMMIT;\n\n-- fase 2: datos iniciales\nBEGIN;\n");
    for seed in catalog.seeds() {
        out.push_str(&insert_seed_literal_sql(seed));
        out.push('\n');
    }
    out.push_str("COMMIT;\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog { Catalog::platform() }

    #[test]
    fn create_table_uses_if_not_exists() {
        let c = catalog();
        let sql = create_table_sql(c.table("tipos_usuario").unwrap());
        assert_eq!(sql,
                   "CREATE TABLE IF NOT EXISTS tipos_usuario (\n    id_tipo_usuario SERIAL PRIMARY KEY,\n    codigo VARCHAR(20) UNIQUE NOT NULL,\n    nombre VARCHAR(50) NOT NULL,\n    descripcion TEXT,\n    nivel_acceso INTEGER DEFAULT 0\n);");
    }

    #[test]
    fn strict_constraint_is_plain_alter() {
        let c = catalog();
        let fk = c.foreign_keys().iter().find(|f| f.name == "fk_cursos_docentes").unwrap();
        assert_eq!(add_foreign_key_sql(fk, ConstraintMode::Strict),
                   "ALTER TABLE cursos ADD CONSTRAINT fk_cursos_docentes FOREIGN KEY (id_docente_responsable) REFERENCES docentes(id_docente);");
    }

    #[test]
    fn guarded_constraint_checks_pg_constraint() {
        let c = catalog();
        let fk = &c.foreign_keys()[0];
        let sql = add_foreign_key_sql(fk, ConstraintMode::Guarded);
        assert!(sql.starts_with("DO $$"));
        assert!(sql.contains("WHERE conname = 'fk_usuarios_tipos_usuario'"));
        assert!(sql.contains("nspname = current_schema()"));
        assert!(sql.contains("ALTER TABLE usuarios ADD CONSTRAINT fk_usuarios_tipos_usuario"));
        assert!(sql.trim_end().ends_with("$$;"));
    }

    #[test]
    fn seed_rows_are_parameterised_with_conflict_skip() {
        let c = catalog();
        let roles = c.seed_for("roles_sistema").unwrap();
        assert_eq!(insert_seed_row_sql(roles),
                   "INSERT INTO roles_sistema (codigo_rol, nombre_rol, descripcion, permisos) VALUES ($1, $2, $3, $4) ON CONFLICT (codigo_rol) DO NOTHING");
    }

    #[test]
    fn literal_seed_contains_json_arrays() {
        let c = catalog();
        let sql = insert_seed_literal_sql(c.seed_for("roles_sistema").unwrap());
        assert!(sql.contains(r#"('superadmin', 'Super Administrador', 'Acceso total al sistema', '["*"]')"#));
        assert!(sql.ends_with("ON CONFLICT (codigo_rol) DO NOTHING;"));
    }

    #[test]
    fn plan_lists_every_statement() {
        let c = catalog();
        let plan = render_plan(&c, ConstraintMode::Guarded);
        assert_eq!(plan.matches("CREATE TABLE IF NOT EXISTS").count(), 39);
        assert_eq!(plan.matches("ADD CONSTRAINT").count(), 53);
        assert_eq!(plan.matches("ON CONFLICT").count(), 11);
        assert!(plan.contains("-- tablas de sesiones y FAQ"));
        let tables_end = plan.find("-- llaves foráneas").unwrap();
        assert!(plan[..tables_end].find("CREATE TABLE IF NOT EXISTS usuarios").is_some());
    }

    #[test]
    fn constraint_mode_parsing() {
        assert_eq!(ConstraintMode::parse("Strict"), Some(ConstraintMode::Strict));
        assert_eq!(ConstraintMode::parse(" guarded "), Some(ConstraintMode::Guarded));
        assert_eq!(ConstraintMode::parse("lax"), None);
        assert_eq!(ConstraintMode::default(), ConstraintMode::Guarded);
    }

    #[test]
    fn quoting() {
        assert_eq!(quote_literal("it's"), "'it''s'");
        assert_eq!(quote_ident("mi\"schema"), "\"mi\"\"schema\"");
    }
}
