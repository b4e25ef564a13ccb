use super::column::Column;

/// Grupo lógico de tablas. El orden de las variantes es el orden en el que
/// se anuncian los grupos durante la creación del esquema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableGroup {
    Referencia,
    Usuarios,
    Perfiles,
    Preferencias,
    CategoriasCursos,
    Contenido,
    Interacciones,
    Reportes,
    Seguimiento,
    Historial,
    RolesConfiguracion,
    LogsNotificaciones,
    SesionesFaq,
}

impl TableGroup {
    /// Texto usado en los logs de progreso ("Creando tablas de ...").
    pub fn label(&self) -> &'static str {
        match self {
            TableGroup::Referencia => "tablas de referencia",
            TableGroup::Usuarios => "tabla de usuarios",
            TableGroup::Perfiles => "tablas de perfiles",
            TableGroup::Preferencias => "tablas de preferencias",
            TableGroup::CategoriasCursos => "tablas de categorías y cursos",
            TableGroup::Contenido => "tablas de contenido",
            TableGroup::Interacciones => "tablas de interacciones",
            TableGroup::Reportes => "tablas de reportes",
            TableGroup::Seguimiento => "tablas de seguimiento",
            TableGroup::Historial => "tablas de historial",
            TableGroup::RolesConfiguracion => "tablas de roles",
            TableGroup::LogsNotificaciones => "tablas de logs",
            TableGroup::SesionesFaq => "tablas de sesiones y FAQ",
        }
    }
}

/// Tabla del catálogo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    pub group: TableGroup,
    pub columns: Vec<Column>,
}

impl TableDef {
    pub fn new(name: &'static str, group: TableGroup) -> Self { Self { name, group, columns: Vec::new() } }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn primary_key(&self) -> Option<&Column> { self.columns.iter().find(|c| c.primary_key) }

    pub fn find_column(&self, name: &str) -> Option<&Column> { self.columns.iter().find(|c| c.name == name) }
}
