//! Anlegen und Abfragen von Entities.

use glam::Vec3;

use super::{ChangeKind, Scene};
use crate::core::{
    BaseRecord, DeviceRecord, EdgeRecord, EntityKey, EntityKind, EntityRecord, L2SegmentRecord,
    Layer, LineRecord, SceneNode, SymbolRecord, TextRecord,
};

impl Scene {
    /// Fügt eine Entity ein und baut ihre Geometrie auf.
    ///
    /// Mit `align` wird die Position am Raster ausgerichtet. Kanten, die die
    /// neue Entity bereits referenzieren, werden nachgeführt.
    pub fn add_entity(
        &mut self,
        layer: Layer,
        key: EntityKey,
        mut record: EntityRecord,
        align: bool,
    ) -> bool {
        let grid = self.settings.grid;
        if let Some(placement) = record.placement_mut() {
            placement.position = grid.align_position(placement.position, align);
        }
        if !self.graph_mut(layer).insert(SceneNode::new(key, record)) {
            return false;
        }
        self.rebuild(layer, key);
        self.on_entity_mutated(layer, key, ChangeKind::Added);
        log::debug!("{} in {:?} angelegt", key, layer);
        true
    }

    /// Legt eine Base an.
    pub fn add_base(&mut self, layer: Layer, id: u64, record: BaseRecord) -> bool {
        self.add_entity(layer, EntityKey::base(id), EntityRecord::Base(record), false)
    }

    /// Legt ein Gerät im physischen Layer an.
    pub fn add_device(&mut self, id: u64, record: DeviceRecord, align: bool) -> bool {
        let key = EntityKey::new(EntityKind::Device, id);
        self.add_entity(Layer::Physical, key, EntityRecord::Device(record), align)
    }

    /// Legt eine VRF im logischen Layer an.
    pub fn add_vrf(&mut self, id: u64, record: DeviceRecord, align: bool) -> bool {
        let key = EntityKey::new(EntityKind::Vrf, id);
        self.add_entity(Layer::Logical, key, EntityRecord::Vrf(record), align)
    }

    /// Legt ein L2-Segment im logischen Layer an.
    pub fn add_l2segment(&mut self, id: u64, record: L2SegmentRecord, align: bool) -> bool {
        let key = EntityKey::new(EntityKind::L2Segment, id);
        self.add_entity(Layer::Logical, key, EntityRecord::L2Segment(record), align)
    }

    /// Legt einen Text an.
    pub fn add_text(&mut self, layer: Layer, id: u64, record: TextRecord, align: bool) -> bool {
        let key = EntityKey::new(EntityKind::Text, id);
        self.add_entity(layer, key, EntityRecord::Text(record), align)
    }

    /// Legt ein Symbol an.
    pub fn add_symbol(&mut self, layer: Layer, id: u64, record: SymbolRecord, align: bool) -> bool {
        let key = EntityKey::new(EntityKind::Symbol, id);
        self.add_entity(layer, key, EntityRecord::Symbol(record), align)
    }

    /// Legt eine Kante an. `kind` muss ein Kanten-Typ sein.
    pub fn add_edge(&mut self, layer: Layer, kind: EntityKind, id: u64, record: EdgeRecord) -> bool {
        if !kind.is_edge() {
            log::warn!("{:?} ist kein Kanten-Typ", kind);
            return false;
        }
        self.add_entity(layer, EntityKey::new(kind, id), EntityRecord::Edge(record), false)
    }

    /// Legt ein freistehendes Debug-Segment an.
    pub fn add_line(&mut self, layer: Layer, id: u64, record: LineRecord) -> bool {
        let key = EntityKey::new(EntityKind::Line, id);
        self.add_entity(layer, key, EntityRecord::Line(record), false)
    }

    // ── Abfragen ────────────────────────────────────────────────────

    /// Sucht eine Entity.
    pub fn find(&self, layer: Layer, key: EntityKey) -> Option<&SceneNode> {
        self.graph(layer).find(key)
    }

    /// Lokale Position relativ zum Oberflächen-Frame der Base.
    pub fn position(&self, layer: Layer, key: EntityKey) -> Option<Vec3> {
        self.find(layer, key)?.record.placement().map(|p| p.position)
    }

    /// Lokale Rotation (Radiant).
    pub fn rotation(&self, layer: Layer, key: EntityKey) -> Option<Vec3> {
        self.find(layer, key)?.record.placement().map(|p| p.rotation)
    }

    /// Gespeicherte Größe.
    pub fn size(&self, layer: Layer, key: EntityKey) -> Option<Vec3> {
        self.find(layer, key)?.record.size()
    }

    /// Weltposition des Entity-Ursprungs.
    pub fn world_position(&self, layer: Layer, key: EntityKey) -> Option<Vec3> {
        self.graph(layer).world_position(key)
    }

    /// Rechnet eine Weltposition in den Oberflächen-Frame einer Base um.
    pub fn world_to_local(&self, layer: Layer, base: u64, world: Vec3) -> Option<Vec3> {
        let frame = self.graph(layer).surface_frame(base)?;
        Some(frame.inverse().transform_point3(world))
    }

    /// Rechnet eine Position im Oberflächen-Frame einer Base in Welt um.
    pub fn local_to_world(&self, layer: Layer, base: u64, local: Vec3) -> Option<Vec3> {
        let frame = self.graph(layer).surface_frame(base)?;
        Some(frame.transform_point3(local))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::two_devices;
    use super::*;
    use crate::core::Placement;
    use approx::assert_relative_eq;

    #[test]
    fn add_snaps_to_grid_when_requested() {
        let mut scene = two_devices();
        let record = DeviceRecord {
            base: 1,
            placement: Placement::at(Vec3::new(0.3, 0.0, 1.1)),
            ..DeviceRecord::default()
        };
        assert!(scene.add_device(12, record.clone(), true));
        assert!(scene.add_device(13, record, false));
        let p12 = scene
            .position(Layer::Physical, EntityKey::new(EntityKind::Device, 12))
            .expect("Position erwartet");
        let p13 = scene
            .position(Layer::Physical, EntityKey::new(EntityKind::Device, 13))
            .expect("Position erwartet");
        assert_eq!(p12, Vec3::new(0.5, 0.0, 1.0));
        assert_eq!(p13, Vec3::new(0.3, 0.0, 1.1));
    }

    #[test]
    fn add_rejects_wrong_layer_and_duplicates() {
        let mut scene = two_devices();
        assert!(!scene.add_device(10, DeviceRecord { base: 1, ..DeviceRecord::default() }, false));
        assert!(!scene.add_vrf(30, DeviceRecord { base: 1, ..DeviceRecord::default() }, false));
        assert!(!scene.add_edge(Layer::Physical, EntityKind::Text, 50, EdgeRecord::between(10, 11)));
    }

    #[test]
    fn dangling_edge_routes_once_endpoint_appears() {
        let mut scene = two_devices();
        assert!(scene.add_edge(Layer::Physical, EntityKind::Link, 21, EdgeRecord::between(10, 12)));
        let l21 = EntityKey::new(EntityKind::Link, 21);
        let segments = |scene: &Scene| {
            scene
                .find(Layer::Physical, l21)
                .and_then(|n| n.render.route.as_ref())
                .map(|r| r.segments.len())
        };
        assert_eq!(segments(&scene), Some(0));

        let record = DeviceRecord {
            base: 1,
            placement: Placement::at(Vec3::new(0.0, 0.0, 2.0)),
            ..DeviceRecord::default()
        };
        assert!(scene.add_device(12, record, false));
        assert_eq!(segments(&scene), Some(1));
    }

    #[test]
    fn local_world_conversion_uses_surface_frame() {
        let scene = two_devices();
        let world = scene
            .local_to_world(Layer::Physical, 1, Vec3::new(1.0, 0.0, 0.0))
            .expect("Welt erwartet");
        assert_relative_eq!(world.y, 1.0);
        let local = scene
            .world_to_local(Layer::Physical, 1, world)
            .expect("Lokal erwartet");
        assert_relative_eq!(local.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(local.y, 0.0, epsilon = 1e-6);
        assert!(scene.world_to_local(Layer::Physical, 9, world).is_none());
    }
}
