//! Handler für Anlegen, Transformieren, Löschen und Joint-Bearbeitung.

use glam::Vec3;

use crate::core::{EdgeRecord, EntityKey, EntityKind, EntityRecord, Layer};
use crate::scene::Scene;

/// Legt eine Entity an.
pub fn add(scene: &mut Scene, layer: Layer, key: EntityKey, record: EntityRecord, align: bool) -> bool {
    scene.add_entity(layer, key, record, align)
}

/// Legt eine Kante an; lehnt Nicht-Kanten-Typen ab.
pub fn add_edge(scene: &mut Scene, layer: Layer, kind: EntityKind, id: u64, record: EdgeRecord) -> bool {
    scene.add_edge(layer, kind, id, record)
}

/// Setzt die lokale Position, optional auf einer neuen Base.
pub fn move_entity(
    scene: &mut Scene,
    layer: Layer,
    key: EntityKey,
    position: Vec3,
    base: Option<u64>,
    align: bool,
) -> bool {
    scene.move_entity(layer, key, position, base, align)
}

/// Setzt die lokale Rotation.
pub fn rotate(scene: &mut Scene, layer: Layer, key: EntityKey, rotation: Vec3, align: bool) -> bool {
    scene.rotate_entity(layer, key, rotation, align)
}

/// Setzt die Größe (mit Mindestmaßen).
pub fn resize(scene: &mut Scene, layer: Layer, key: EntityKey, size: Vec3, align: bool) -> bool {
    scene.resize_entity(layer, key, size, align)
}

/// Hängt eine Entity an eine andere Base.
pub fn reparent(
    scene: &mut Scene,
    layer: Layer,
    key: EntityKey,
    base: u64,
    world: Option<Vec3>,
) -> bool {
    scene.reparent_entity(layer, key, base, world)
}

/// Löscht eine Entity und meldet stehen gebliebene Kanten.
pub fn delete(scene: &mut Scene, layer: Layer, key: EntityKey) -> bool {
    if !scene.delete(layer, key) {
        return false;
    }
    let dangling = scene.dangling_edges(layer);
    if !dangling.is_empty() {
        log::info!("{} Kanten in {:?} ohne Endpunkt", dangling.len(), layer);
    }
    true
}

/// Fügt einen Joint ein.
pub fn add_joint(scene: &mut Scene, layer: Layer, edge: EntityKey, index: usize, point: Vec3) -> bool {
    scene.add_joint(layer, edge, index, point)
}

/// Entfernt einen Joint.
pub fn delete_joint(scene: &mut Scene, layer: Layer, edge: EntityKey, index: usize) -> bool {
    scene.delete_joint(layer, edge, index)
}

/// Hängt eine Kante an neue Endpunkte.
pub fn reconnect(scene: &mut Scene, layer: Layer, edge: EntityKey, ends: [u64; 2]) -> bool {
    scene.reconnect_edge(layer, edge, ends)
}

/// Hängt ein Kantenende an den nächsten passenden Endpunkt.
pub fn snap_edge_end(
    scene: &mut Scene,
    layer: Layer,
    edge: EntityKey,
    end: usize,
    point: Vec3,
    radius: f32,
) -> bool {
    match scene.snap_edge_end(layer, edge, end, point, radius) {
        Some(_) => true,
        None => {
            log::debug!("Kein passender Endpunkt im Radius {} um {}", radius, point);
            false
        }
    }
}
