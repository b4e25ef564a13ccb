//! Grafo de dependencias entre tablas.
//!
//! Nodos: tablas del catálogo (en orden de declaración, vía `IndexMap`).
//! Aristas: llaves foráneas `tabla -> tabla_referenciada`.
//!
//! El orden de creación es topológico (Kahn) con desempate por orden de
//! declaración, de modo que un catálogo ya ordenado se recorre tal cual. Las
//! autorreferencias no cuentan para el orden: los constraints se aplican en
//! una pasada posterior, cuando todas las tablas existen.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, BTreeSet};

use indexmap::IndexMap;
use log::warn;

use crate::catalog::Catalog;
use crate::model::{ForeignKey, TableDef};

pub struct SchemaGraph<'a> {
    nodes: IndexMap<&'a str, &'a TableDef>,
    edges: Vec<&'a ForeignKey>,
}

impl<'a> SchemaGraph<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        let nodes = catalog.tables().iter().map(|t| (t.name, t)).collect();
        let edges = catalog.foreign_keys().iter().collect();
        Self { nodes, edges }
    }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Tablas de las que depende `table`, sin repetir y sin contarse a sí misma.
    pub fn dependencies(&self, table: &str) -> Vec<&'a str> {
        let mut out: Vec<&'a str> = Vec::new();
        for fk in self.edges.iter().filter(|fk| fk.table == table && !fk.is_self_reference()) {
            if self.nodes.contains_key(fk.referenced_table) && !out.contains(&fk.referenced_table) {
                out.push(fk.referenced_table);
            }
        }
        out
    }

    pub fn self_references(&self) -> impl Iterator<Item = &'a ForeignKey> + '_ {
        self.edges.iter().copied().filter(|fk| fk.is_self_reference())
    }

    /// Orden de creación de tablas.
    ///
    /// Si hubiese un ciclo entre tablas distintas, se rompe tomando la tabla
    /// pendiente declarada primero; la creación sigue siendo válida porque
    /// las llaves foráneas se agregan al final.
    pub fn creation_order(&self) -> Vec<&'a TableDef> {
        let n = self.nodes.len();
        let mut indegree = vec![0usize; n];
        let mut dependents: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
        for (idx, name) in self.nodes.keys().enumerate() {
            for dep in self.dependencies(name) {
                if let Some(dep_idx) = self.nodes.get_index_of(dep) {
                    if dependents[dep_idx].insert(idx) {
                        indegree[idx] += 1;
                    }
                }
            }
        }

        let mut ready: BinaryHeap<Reverse<usize>> =
            (0..n).filter(|&i| indegree[i] == 0).map(Reverse).collect();
        let mut emitted = vec![false; n];
        let mut order = Vec::with_capacity(n);

        while order.len() < n {
            let next = match ready.pop() {
                Some(Reverse(i)) => i,
                None => {
                    // ciclo: liberar la primera tabla pendiente
                    let Some(i) = (0..n).find(|&i| !emitted[i]) else { break };
                    warn!("ciclo de dependencias en {}; se crea según orden de declaración",
                          self.nodes.get_index(i).map(|(k, _)| *k).unwrap_or_default());
                    i
                }
            };
            if emitted[next] {
                continue;
            }
            emitted[next] = true;
            if let Some((_, table)) = self.nodes.get_index(next) {
                order.push(*table);
            }
            for &d in &dependents[next] {
                indegree[d] = indegree[d].saturating_sub(1);
                if indegree[d] == 0 && !emitted[d] {
                    ready.push(Reverse(d));
                }
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, TableGroup};

    fn table(name: &'static str, cols: &[&'static str]) -> TableDef {
        let mut t = TableDef::new(name, TableGroup::Referencia).column(Column::serial("id"));
        for c in cols {
            t = t.column(Column::integer(c));
        }
        t
    }

    #[test]
    fn platform_order_keeps_declaration_order() {
        let catalog = Catalog::platform();
        let graph = catalog.graph();
        let order: Vec<&str> = graph.creation_order().iter().map(|t| t.name).collect();
        let declared: Vec<&str> = catalog.tables().iter().map(|t| t.name).collect();
        assert_eq!(order, declared);
    }

    #[test]
    fn referenced_tables_precede_dependents() {
        let catalog = Catalog::platform();
        let graph = catalog.graph();
        let order: Vec<&str> = graph.creation_order().iter().map(|t| t.name).collect();
        let pos = |name: &str| order.iter().position(|n| *n == name).unwrap();
        for fk in catalog.foreign_keys() {
            assert!(pos(fk.referenced_table) <= pos(fk.table), "{} debe crearse antes que {}", fk.referenced_table, fk.table);
        }
    }

    #[test]
    fn self_references_are_ignored_for_ordering() {
        let catalog = Catalog::platform();
        let graph = catalog.graph();
        let selfs: Vec<&str> = graph.self_references().map(|fk| fk.name).collect();
        assert_eq!(selfs, vec!["fk_categorias_categorias_padre", "fk_comentarios_comentarios_padre"]);
        assert!(!graph.dependencies("categorias").contains(&"categorias"));
        assert_eq!(graph.dependencies("usuarios"), vec!["tipos_usuario", "estados_usuario"]);
    }

    #[test]
    fn reorders_out_of_order_declarations() {
        let catalog = Catalog::new(vec![table("hijo", &["id_padre"]), table("padre", &[])],
                                   vec![ForeignKey::new("fk_hijo_padre", "hijo", "id_padre", "padre", "id")],
                                   vec![]).unwrap();
        let order: Vec<&str> = catalog.graph().creation_order().iter().map(|t| t.name).collect();
        assert_eq!(order, vec!["padre", "hijo"]);
    }

    #[test]
    fn cycles_fall_back_to_declaration_order() {
        let catalog = Catalog::new(vec![table("a", &["id_b"]), table("b", &["id_a"]), table("c", &[])],
                                   vec![ForeignKey::new("fk_a_b", "a", "id_b", "b", "id"),
                                        ForeignKey::new("fk_b_a", "b", "id_a", "a", "id")],
                                   vec![]).unwrap();
        let order: Vec<&str> = catalog.graph().creation_order().iter().map(|t| t.name).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }
}
