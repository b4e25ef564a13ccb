/// Relación `table.column -> referenced_table.referenced_column`.
///
/// Las llaves foráneas se aplican en una segunda pasada, cuando todas las
/// tablas ya existen; por eso admiten autorreferencias (`categorias`,
/// `comentarios`) y referencias hacia tablas declaradas más tarde.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub name: &'static str,
    pub table: &'static str,
    pub column: &'static str,
    pub referenced_table: &'static str,
    pub referenced_column: &'static str,
}

impl ForeignKey {
    pub fn new(name: &'static str,
               table: &'static str,
               column: &'static str,
               referenced_table: &'static str,
               referenced_column: &'static str)
               -> Self {
        Self { name, table, column, referenced_table, referenced_column }
    }

    pub fn is_self_reference(&self) -> bool { self.table == self.referenced_table }
}
