//! Löschen mit Kanten-Bereinigung.
//!
//! Eine Base nimmt ihre Kinder mit. Welche anhängenden Kanten eines
//! gelöschten Endpunkts entfernt werden, regelt `SceneSettings::edge_pruning`;
//! stehen gebliebene Kanten werden leer neu aufgebaut und über
//! `dangling_edges` gemeldet.

use indexmap::IndexSet;

use super::{ChangeKind, Scene};
use crate::core::{EntityKey, EntityKind, Layer};
use crate::shared::EdgePruning;

impl Scene {
    /// Löscht eine Entity. Gibt `false` zurück, wenn sie nicht existiert.
    pub fn delete(&mut self, layer: Layer, key: EntityKey) -> bool {
        if !self.graph(layer).contains(key) {
            log::debug!("Delete: {} in {:?} nicht gefunden", key, layer);
            return false;
        }
        let mut orphaned = IndexSet::new();
        self.remove_subtree(layer, key, &mut orphaned);
        for edge in &orphaned {
            self.rebuild(layer, *edge);
        }
        if !orphaned.is_empty() {
            log::debug!("{}: {} Kanten ohne Endpunkt", key, orphaned.len());
        }
        self.on_entity_mutated(layer, key, ChangeKind::Removed);
        true
    }

    fn remove_subtree(&mut self, layer: Layer, key: EntityKey, orphaned: &mut IndexSet<EntityKey>) {
        if key.kind == EntityKind::Base {
            for child in self.graph(layer).children(key.id) {
                self.remove_subtree(layer, child, orphaned);
            }
        }
        let pruning = self.settings.edge_pruning;
        let graph = self.graph_mut(layer);
        let incident = graph.incident_edges(key);
        graph.remove(key);
        orphaned.shift_remove(&key);
        for edge in incident {
            if !graph.contains(edge) {
                continue;
            }
            if edge.kind == EntityKind::Link || pruning == EdgePruning::AllIncident {
                graph.remove(edge);
                orphaned.shift_remove(&edge);
            } else {
                orphaned.insert(edge);
            }
        }
    }
}
