//! Línea de comandos de `esquema-bootstrap`.
//!
//! Sin argumentos ejecuta el arranque completo; `plan` imprime el script SQL
//! sin tocar la base y `estado` muestra qué tablas existen y cuántas filas
//! tienen.

use std::io::{self, Write};

use esquema_core::{render_plan, Catalog};
use esquema_persistence::{schema_status, PgConnectionProvider, SchemaStatus};

use crate::bootstrap::Bootstrapper;
use crate::config::AppConfig;
use crate::errors::CoreError;

pub const EXIT_OK: i32 = 0;
pub const EXIT_SCHEMA_FAILED: i32 = 1;
pub const EXIT_PARTIAL: i32 = 2;
pub const EXIT_CONFIG: i32 = 3;
pub const EXIT_USAGE: i32 = 64;

pub const USAGE: &str = "Uso: esquema-bootstrap [plan | estado [--json] | ayuda]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Bootstrap,
    Plan,
    Status { json: bool },
    Help,
}

impl Command {
    /// Interpreta los argumentos (sin el nombre del programa).
    pub fn parse(args: &[String]) -> Result<Self, CoreError> {
        let Some((first, rest)) = args.split_first() else { return Ok(Command::Bootstrap) };
        let command = match first.as_str() {
            "plan" => Command::Plan,
            "estado" => {
                let mut json = false;
                for arg in rest {
                    match arg.as_str() {
                        "--json" => json = true,
                        other => return Err(CoreError::Usage(format!("opción desconocida para estado: {other}"))),
                    }
                }
                return Ok(Command::Status { json });
            }
            "ayuda" | "-h" | "--help" => Command::Help,
            other => return Err(CoreError::Usage(format!("comando desconocido: {other}"))),
        };
        if let Some(extra) = rest.first() {
            return Err(CoreError::Usage(format!("argumento inesperado: {extra}")));
        }
        Ok(command)
    }
}

/// Ejecuta `command` y devuelve el código de salida.
pub fn execute<W: Write>(command: Command, config: &AppConfig, catalog: &Catalog, out: &mut W) -> Result<i32, CoreError> {
    match command {
        Command::Help => {
            writeln!(out, "{USAGE}")?;
            Ok(EXIT_OK)
        }
        Command::Plan => {
            catalog.validate()?;
            out.write_all(render_plan(catalog, config.constraint_mode).as_bytes())?;
            Ok(EXIT_OK)
        }
        Command::Bootstrap => {
            let provider = PgConnectionProvider::new(config.database.clone());
            let outcome = Bootstrapper::postgres(provider, catalog, config.constraint_mode).run();
            writeln!(out, "{}", outcome.summary())?;
            Ok(outcome.exit_code())
        }
        Command::Status { json } => {
            let status = schema_status(PgConnectionProvider::new(config.database.clone()), catalog)?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &status).map_err(io::Error::from)?;
                writeln!(out)?;
            } else {
                write_status(&status, out)?;
            }
            Ok(if status.is_complete() { EXIT_OK } else { EXIT_SCHEMA_FAILED })
        }
    }
}

fn write_status<W: Write>(status: &SchemaStatus, out: &mut W) -> io::Result<()> {
    writeln!(out, "schema: {}", status.schema)?;
    for table in &status.tables {
        match table.rows {
            Some(rows) => writeln!(out, "  {:<28} {rows:>6} filas", table.name)?,
            None => writeln!(out, "  {:<28} (no existe)", table.name)?,
        }
    }
    writeln!(out,
             "tablas: {}/{}  llaves foráneas: {}/{}",
             status.tables.len() - status.missing_tables().len(),
             status.tables.len(),
             status.constraints_present,
             status.constraints_expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use esquema_persistence::TableStatus;

    fn args(v: &[&str]) -> Vec<String> { v.iter().map(|s| s.to_string()).collect() }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse(&args(&[])).unwrap(), Command::Bootstrap);
        assert_eq!(Command::parse(&args(&["plan"])).unwrap(), Command::Plan);
        assert_eq!(Command::parse(&args(&["estado"])).unwrap(), Command::Status { json: false });
        assert_eq!(Command::parse(&args(&["estado", "--json"])).unwrap(), Command::Status { json: true });
        assert_eq!(Command::parse(&args(&["--help"])).unwrap(), Command::Help);
    }

    #[test]
    fn rejects_unknown_arguments() {
        for bad in [&["migrar"][..], &["plan", "x"][..], &["estado", "--yaml"][..]] {
            let err = Command::parse(&args(bad)).unwrap_err();
            assert_eq!(err.exit_code(), EXIT_USAGE, "{bad:?}");
        }
    }

    #[test]
    fn plan_needs_no_database() {
        let config = AppConfig::from_lookup(|_: &str| None).unwrap();
        let mut out = Vec::new();
        let code = execute(Command::Plan, &config, &Catalog::platform(), &mut out).unwrap();
        assert_eq!(code, EXIT_OK);
        let script = String::from_utf8(out).unwrap();
        assert_eq!(script.matches("CREATE TABLE IF NOT EXISTS").count(), 39);
    }

    #[test]
    fn status_lines() {
        let status = SchemaStatus { schema: "public".into(),
                                    tables: vec![TableStatus { name: "usuarios".into(), exists: true, rows: Some(3) },
                                                 TableStatus { name: "perfiles".into(), exists: false, rows: None }],
                                    constraints_present: 1,
                                    constraints_expected: 2 };
        let mut out = Vec::new();
        write_status(&status, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("usuarios"));
        assert!(text.contains("(no existe)"));
        assert!(text.ends_with("tablas: 1/2  llaves foráneas: 1/2\n"));
    }
}
