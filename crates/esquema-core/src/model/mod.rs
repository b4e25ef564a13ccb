pub mod column;
pub mod foreign_key;
pub mod table;

pub use column::{Column, ColumnType, DefaultValue};
pub use foreign_key::ForeignKey;
pub use table::{TableDef, TableGroup};

/// Identificadores SQL admitidos sin comillas: `[a-z_][a-z0-9_]*`.
///
/// El DDL se genera sin citar identificadores, por lo que todo nombre del
/// catálogo debe pasar esta validación.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::is_valid_identifier;

    #[test]
    fn identifiers() {
        assert!(is_valid_identifier("tipos_usuario"));
        assert!(is_valid_identifier("_x9"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("9abc"));
        assert!(!is_valid_identifier("Usuarios"));
        assert!(!is_valid_identifier("a; DROP TABLE x"));
    }
}
