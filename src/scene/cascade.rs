//! Nachführen abhängiger Kanten und Labels nach einer Mutation.
//!
//! Eine Kante hängt von einer Entity ab, wenn diese einer ihrer Endpunkte ist
//! oder die Base eines Endpunkts. Die Abhängigen kommen aus dem
//! Inzidenz-Index des Layers.

use indexmap::IndexSet;

use super::Scene;
use crate::core::{EntityKey, EntityKind, Layer};

/// Art einer Mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Moved,
    Rotated,
    Resized,
    /// Farben, Namen oder andere Darstellungswerte
    Restyled,
    Reparented,
    Removed,
}

impl ChangeKind {
    /// Gibt `true` zurück, wenn sich die Weltlage geändert haben kann.
    pub fn affects_placement(self) -> bool {
        !matches!(self, ChangeKind::Restyled)
    }
}

impl Scene {
    /// Kanten, die nach einer Mutation von `key` neu geroutet werden müssen.
    pub fn dependent_edges(&self, layer: Layer, key: EntityKey, change: ChangeKind) -> Vec<EntityKey> {
        let graph = self.graph(layer);
        let mut edges = IndexSet::new();
        match key.kind {
            EntityKind::Base => {
                for child in graph.children(key.id) {
                    edges.extend(graph.incident_edges(child));
                }
            }
            kind if kind.is_endpoint() && change.affects_placement() => {
                edges.extend(graph.incident_edges(key));
            }
            _ => {}
        }
        edges.into_iter().collect()
    }

    /// Führt Kanten und Labels nach einer Mutation nach und fordert einen
    /// Redraw an. Gibt die neu gerouteten Kanten zurück.
    pub fn on_entity_mutated(
        &mut self,
        layer: Layer,
        key: EntityKey,
        change: ChangeKind,
    ) -> Vec<EntityKey> {
        let edges = self.dependent_edges(layer, key, change);
        for edge in &edges {
            self.rebuild(layer, *edge);
        }
        if matches!(
            change,
            ChangeKind::Moved | ChangeKind::Rotated | ChangeKind::Reparented
        ) {
            match key.kind {
                EntityKind::Base => {
                    for child in self.graph(layer).children(key.id) {
                        self.adjust_label(layer, child);
                    }
                }
                _ => self.adjust_label(layer, key),
            }
        }
        if !edges.is_empty() {
            log::trace!("{:?} an {}: {} Kanten neu geroutet", change, key, edges.len());
        }
        self.redraw.request();
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::two_devices;
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;

    const L20: EntityKey = EntityKey::new(EntityKind::Link, 20);

    fn route_end(scene: &Scene) -> Vec3 {
        scene
            .find(Layer::Physical, L20)
            .and_then(|n| n.render.route.as_ref())
            .and_then(|r| r.end())
            .expect("Pfad erwartet")
    }

    #[test]
    fn base_move_reroutes_child_links() {
        let mut scene = two_devices();
        assert!(scene.move_entity(
            Layer::Physical,
            EntityKey::base(1),
            Vec3::new(3.0, 0.0, -2.0),
            None,
            false,
        ));
        let d11 = scene
            .world_position(Layer::Physical, EntityKey::new(EntityKind::Device, 11))
            .expect("Position erwartet");
        let end = route_end(&scene);
        assert_relative_eq!(end.x, d11.x, epsilon = 1e-5);
        assert_relative_eq!(end.y, d11.y + 0.25, epsilon = 1e-5);
        assert_relative_eq!(end.z, d11.z, epsilon = 1e-5);
    }

    #[test]
    fn restyling_an_endpoint_does_not_reroute() {
        let scene = two_devices();
        let d10 = EntityKey::new(EntityKind::Device, 10);
        assert!(scene.dependent_edges(Layer::Physical, d10, ChangeKind::Restyled).is_empty());
        assert_eq!(scene.dependent_edges(Layer::Physical, d10, ChangeKind::Moved), vec![L20]);
        assert_eq!(
            scene.dependent_edges(Layer::Physical, EntityKey::base(1), ChangeKind::Restyled),
            vec![L20]
        );
    }

    #[test]
    fn shared_edge_is_rerouted_once() {
        let mut scene = two_devices();
        let rerouted = scene.on_entity_mutated(Layer::Physical, EntityKey::base(1), ChangeKind::Moved);
        assert_eq!(rerouted, vec![L20]);
    }

    #[test]
    fn every_mutation_requests_a_redraw() {
        let mut scene = two_devices();
        assert!(scene.take_frame());
        assert!(!scene.take_frame());
        scene.on_entity_mutated(Layer::Physical, L20, ChangeKind::Restyled);
        assert!(scene.take_frame());
    }
}
