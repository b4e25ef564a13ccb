//! Columnas tipadas.

use crate::ddl::quote_literal;

/// Tipos SQL usados por el catálogo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Serial,
    Integer,
    BigInt,
    Varchar(u16),
    Text,
    Boolean,
    Timestamp,
    Date,
    Json,
}

impl ColumnType {
    pub fn sql(&self) -> String {
        match self {
            ColumnType::Serial => "SERIAL".into(),
            ColumnType::Integer => "INTEGER".into(),
            ColumnType::BigInt => "BIGINT".into(),
            ColumnType::Varchar(n) => format!("VARCHAR({n})"),
            ColumnType::Text => "TEXT".into(),
            ColumnType::Boolean => "BOOLEAN".into(),
            ColumnType::Timestamp => "TIMESTAMP".into(),
            ColumnType::Date => "DATE".into(),
            ColumnType::Json => "JSON".into(),
        }
    }
}

/// Valor por defecto de una columna.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// `DEFAULT (NOW())`, válido tanto para TIMESTAMP como para DATE.
    Now,
    Int(i64),
    Bool(bool),
    Text(&'static str),
}

impl DefaultValue {
    pub fn sql(&self) -> String {
        match self {
            DefaultValue::Now => "(NOW())".into(),
            DefaultValue::Int(n) => n.to_string(),
            DefaultValue::Bool(b) => b.to_string(),
            DefaultValue::Text(s) => quote_literal(s),
        }
    }
}

/// Definición de una columna. Se construye con los atajos por tipo y los
/// modificadores encadenables (`not_null`, `unique`, `default`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub primary_key: bool,
    pub not_null: bool,
    pub unique: bool,
    pub default: Option<DefaultValue>,
}

impl Column {
    pub fn new(name: &'static str, ty: ColumnType) -> Self {
        Self { name, ty, primary_key: false, not_null: false, unique: false, default: None }
    }

    /// Llave primaria sustituta (`SERIAL PRIMARY KEY`).
    pub fn serial(name: &'static str) -> Self {
        Self { primary_key: true, ..Self::new(name, ColumnType::Serial) }
    }

    pub fn varchar(name: &'static str, len: u16) -> Self { Self::new(name, ColumnType::Varchar(len)) }
    pub fn text(name: &'static str) -> Self { Self::new(name, ColumnType::Text) }
    pub fn integer(name: &'static str) -> Self { Self::new(name, ColumnType::Integer) }
    pub fn bigint(name: &'static str) -> Self { Self::new(name, ColumnType::BigInt) }
    pub fn boolean(name: &'static str) -> Self { Self::new(name, ColumnType::Boolean) }
    pub fn timestamp(name: &'static str) -> Self { Self::new(name, ColumnType::Timestamp) }
    pub fn date(name: &'static str) -> Self { Self::new(name, ColumnType::Date) }
    pub fn json(name: &'static str) -> Self { Self::new(name, ColumnType::Json) }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn default(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    pub fn default_now(self) -> Self { self.default(DefaultValue::Now) }

    /// Fragmento de `CREATE TABLE` para esta columna, p.ej.
    /// `codigo VARCHAR(20) UNIQUE NOT NULL`.
    pub fn definition(&self) -> String {
        let mut out = format!("{} {}", self.name, self.ty.sql());
        if self.primary_key {
            out.push_str(" PRIMARY KEY");
        }
        if self.unique {
            out.push_str(" UNIQUE");
        }
        if self.not_null {
            out.push_str(" NOT NULL");
        }
        if let Some(default) = &self.default {
            out.push_str(" DEFAULT ");
            out.push_str(&default.sql());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_follow_modifier_order() {
        assert_eq!(Column::serial("id_rol").definition(), "id_rol SERIAL PRIMARY KEY");
        assert_eq!(Column::varchar("codigo", 20).unique().not_null().definition(),
                   "codigo VARCHAR(20) UNIQUE NOT NULL");
        assert_eq!(Column::timestamp("fecha_creacion").default_now().definition(),
                   "fecha_creacion TIMESTAMP DEFAULT (NOW())");
        assert_eq!(Column::varchar("carpeta", 100).default(DefaultValue::Text("general")).definition(),
                   "carpeta VARCHAR(100) DEFAULT 'general'");
        assert_eq!(Column::boolean("leida").default(DefaultValue::Bool(false)).definition(),
                   "leida BOOLEAN DEFAULT false");
    }
}
