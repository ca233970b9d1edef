//! Joint-Bearbeitung und Endpunkte von Kanten.

use glam::Vec3;

use super::{ChangeKind, Scene};
use crate::core::{EdgeRecord, EntityKey, Layer, SpatialMatch};

impl Scene {
    fn edge_record_mut(&mut self, layer: Layer, edge: EntityKey) -> Option<&mut EdgeRecord> {
        self.graph_mut(layer)
            .find_mut(edge)
            .and_then(|n| n.record.as_edge_mut())
    }

    /// Fügt einen Joint (Weltkoordinaten) vor `index` ein; hinter dem Ende
    /// wird angehängt.
    pub fn add_joint(&mut self, layer: Layer, edge: EntityKey, index: usize, point: Vec3) -> bool {
        let Some(record) = self.edge_record_mut(layer, edge) else {
            log::debug!("Joint: Kante {} nicht gefunden", edge);
            return false;
        };
        let points = &mut record.linedata.points;
        points.insert(index.min(points.len()), point);
        self.rebuild(layer, edge);
        self.on_entity_mutated(layer, edge, ChangeKind::Restyled);
        true
    }

    /// Entfernt den Joint an `index`.
    pub fn delete_joint(&mut self, layer: Layer, edge: EntityKey, index: usize) -> bool {
        let Some(record) = self.edge_record_mut(layer, edge) else {
            log::debug!("Joint: Kante {} nicht gefunden", edge);
            return false;
        };
        if index >= record.linedata.points.len() {
            return false;
        }
        record.linedata.points.remove(index);
        self.rebuild(layer, edge);
        self.on_entity_mutated(layer, edge, ChangeKind::Restyled);
        true
    }

    /// Hängt eine Kante an neue Endpunkte.
    pub fn reconnect_edge(&mut self, layer: Layer, edge: EntityKey, ends: [u64; 2]) -> bool {
        if !self.graph_mut(layer).set_edge_ends(edge, ends) {
            log::debug!("Reconnect: Kante {} nicht gefunden", edge);
            return false;
        }
        self.rebuild(layer, edge);
        self.on_entity_mutated(layer, edge, ChangeKind::Restyled);
        true
    }

    /// Hängt das Kantenende `end` (0 oder 1) an den nächsten passenden
    /// Endpunkt innerhalb von `radius` um `point` (Weltkoordinaten).
    ///
    /// Passend heißt: Typ laut `EntityKind::endpoint_kinds` und nicht das
    /// gegenüberliegende Ende. Gibt den neuen Endpunkt zurück.
    pub fn snap_edge_end(
        &mut self,
        layer: Layer,
        edge: EntityKey,
        end: usize,
        point: Vec3,
        radius: f32,
    ) -> Option<EntityKey> {
        let Some(mut ends) = self.find(layer, edge).and_then(|n| n.record.as_edge()).map(|r| r.ends)
        else {
            log::debug!("Snap: Kante {} nicht gefunden", edge);
            return None;
        };
        let (first, second) = edge.kind.endpoint_kinds()?;
        let (wanted, opposite) = match end {
            0 => (first, EntityKey::new(second, ends[1])),
            1 => (second, EntityKey::new(first, ends[0])),
            _ => return None,
        };
        let admissible = |m: &SpatialMatch| m.key.kind == wanted && m.key != opposite;

        let graph = self.graph_mut(layer);
        let target = match graph.nearest_endpoint(point) {
            Some(m) if m.distance <= radius && admissible(&m) => m,
            _ => graph
                .endpoints_within_radius(point, radius)
                .into_iter()
                .find(admissible)?,
        };
        log::debug!(
            "Snap: {} Ende {} an {} (Abstand {:.3})",
            edge,
            end,
            target.key,
            target.distance
        );
        ends[end] = target.key.id;
        self.reconnect_edge(layer, edge, ends).then_some(target.key)
    }

    /// Kanten mit mindestens einem fehlenden Endpunkt.
    pub fn dangling_edges(&self, layer: Layer) -> Vec<EntityKey> {
        self.graph(layer).dangling_edges()
    }

    /// Index des gespeicherten Joints mit der kleinsten Distanz zu `point`.
    pub fn nearest_joint(&self, layer: Layer, edge: EntityKey, point: Vec3) -> Option<usize> {
        let record = self.find(layer, edge)?.record.as_edge()?;
        record
            .linedata
            .points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.distance_squared(point)
                    .total_cmp(&b.distance_squared(point))
            })
            .map(|(index, _)| index)
    }
}
