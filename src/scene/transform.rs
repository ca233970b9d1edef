//! Verschieben, Rotieren, Skalieren und Umhängen.

use glam::Vec3;

use super::{ChangeKind, Scene};
use crate::core::{EntityKey, EntityKind, Layer};
use crate::shared::{BASE_MIN_FOOTPRINT, BASE_MIN_HEIGHT, MIN_ENTITY_SIZE};

impl Scene {
    /// Setzt die lokale Position einer Entity.
    ///
    /// Mit `base` wechselt die Entity zusätzlich die Base; `position` und die
    /// Rotation gelten dann im Frame der neuen Base.
    pub fn move_entity(
        &mut self,
        layer: Layer,
        key: EntityKey,
        position: Vec3,
        base: Option<u64>,
        align: bool,
    ) -> bool {
        let position = self.settings.grid.align_position(position, align);
        let current = self.graph(layer).find(key).and_then(|n| n.parent());
        let change = match base {
            Some(new_base) if current != Some(new_base) => {
                let Some(frame) = self.graph(layer).surface_frame(new_base) else {
                    log::debug!("{}: Base {} nicht gefunden", key, new_base);
                    return false;
                };
                let world = frame.transform_point3(position);
                if !self.graph_mut(layer).reparent(key, new_base, Some(world)) {
                    return false;
                }
                ChangeKind::Reparented
            }
            _ => ChangeKind::Moved,
        };
        let Some(placement) = self
            .graph_mut(layer)
            .find_mut(key)
            .and_then(|n| n.record.placement_mut())
        else {
            log::debug!("Move: {} in {:?} nicht gefunden", key, layer);
            return false;
        };
        placement.position = position;
        self.on_entity_mutated(layer, key, change);
        true
    }

    /// Setzt die lokale Rotation (Radiant); mit `align` am Winkelraster.
    pub fn rotate_entity(&mut self, layer: Layer, key: EntityKey, rotation: Vec3, align: bool) -> bool {
        let grid = self.settings.grid;
        let Some(placement) = self
            .graph_mut(layer)
            .find_mut(key)
            .and_then(|n| n.record.placement_mut())
        else {
            log::debug!("Rotate: {} in {:?} nicht gefunden", key, layer);
            return false;
        };
        placement.rotation = Vec3::new(
            grid.align_angle(rotation.x, align),
            grid.align_angle(rotation.y, align),
            grid.align_angle(rotation.z, align),
        );
        self.on_entity_mutated(layer, key, ChangeKind::Rotated);
        true
    }

    /// Setzt die Größe einer Entity.
    ///
    /// Bases werden auf die Mindestmaße geklemmt. Bei allen anderen Typen
    /// bleibt eine Achse unverändert, wenn der neue Wert unter der
    /// Mindestgröße liegt.
    pub fn resize_entity(&mut self, layer: Layer, key: EntityKey, size: Vec3, align: bool) -> bool {
        let grid = self.settings.grid;
        let Some(stored) = self
            .graph_mut(layer)
            .find_mut(key)
            .and_then(|n| n.record.size_mut())
        else {
            log::debug!("Resize: {} in {:?} ohne Größe oder nicht gefunden", key, layer);
            return false;
        };
        let aligned = [size.x, size.y, size.z].map(|v| grid.align_size(v, align));
        if key.kind == EntityKind::Base {
            *stored = Vec3::new(
                aligned[0].max(BASE_MIN_FOOTPRINT),
                aligned[1].max(BASE_MIN_HEIGHT),
                aligned[2].max(BASE_MIN_FOOTPRINT),
            );
        } else {
            for (axis, value) in aligned.into_iter().enumerate() {
                if value >= MIN_ENTITY_SIZE {
                    stored[axis] = value;
                } else {
                    log::trace!("{}: Achse {} mit {} unter Mindestgröße", key, axis, value);
                }
            }
        }
        self.rebuild(layer, key);
        self.on_entity_mutated(layer, key, ChangeKind::Resized);
        true
    }

    /// Hängt eine Entity an eine andere Base.
    ///
    /// Ohne `world` bleibt die Weltlage erhalten, sonst landet die Entity an
    /// dieser Weltposition.
    pub fn reparent_entity(
        &mut self,
        layer: Layer,
        key: EntityKey,
        base: u64,
        world: Option<Vec3>,
    ) -> bool {
        if !self.graph_mut(layer).reparent(key, base, world) {
            return false;
        }
        self.on_entity_mutated(layer, key, ChangeKind::Reparented);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::two_devices;
    use super::*;
    use approx::assert_relative_eq;

    const D10: EntityKey = EntityKey::new(EntityKind::Device, 10);

    #[test]
    fn too_small_device_axis_is_kept() {
        let mut scene = two_devices();
        assert!(scene.resize_entity(Layer::Physical, D10, Vec3::new(0.01, 2.0, 1.5), false));
        let size = scene.size(Layer::Physical, D10).expect("Größe erwartet");
        assert_eq!(size, Vec3::new(1.0, 2.0, 1.5));
    }

    #[test]
    fn base_is_clamped_to_minimum() {
        let mut scene = two_devices();
        let b1 = EntityKey::base(1);
        assert!(scene.resize_entity(Layer::Physical, b1, Vec3::new(0.5, 0.2, 6.0), false));
        let size = scene.size(Layer::Physical, b1).expect("Größe erwartet");
        assert_eq!(size, Vec3::new(1.0, 0.5, 6.0));
    }

    #[test]
    fn resize_aligns_to_grid() {
        let mut scene = two_devices();
        assert!(scene.resize_entity(Layer::Physical, D10, Vec3::new(1.3, 1.0, 0.9), true));
        let size = scene.size(Layer::Physical, D10).expect("Größe erwartet");
        assert_relative_eq!(size.x, 1.25);
        assert_relative_eq!(size.z, 1.0);
    }

    #[test]
    fn rotation_snaps_to_angle_grid() {
        let mut scene = two_devices();
        assert!(scene.rotate_entity(Layer::Physical, D10, Vec3::new(0.0, 0.3, 0.0), true));
        let rotation = scene.rotation(Layer::Physical, D10).expect("Rotation erwartet");
        assert_relative_eq!(rotation.y, 15f32.to_radians());
    }

    #[test]
    fn move_with_base_keeps_local_coordinates() {
        let mut scene = two_devices();
        assert!(scene.add_base(
            Layer::Physical,
            2,
            crate::core::BaseRecord {
                placement: crate::core::Placement::at(Vec3::new(10.0, 0.0, 0.0)),
                size: Vec3::new(4.0, 0.5, 4.0),
                ..Default::default()
            },
        ));
        assert!(scene.move_entity(Layer::Physical, D10, Vec3::new(1.0, 0.0, 0.0), Some(2), false));
        let node = scene.find(Layer::Physical, D10).expect("Gerät erwartet");
        assert_eq!(node.parent(), Some(2));
        assert_eq!(scene.position(Layer::Physical, D10), Some(Vec3::new(1.0, 0.0, 0.0)));
        let world = scene.world_position(Layer::Physical, D10).expect("Welt erwartet");
        assert_relative_eq!(world.x, 11.0, epsilon = 1e-5);
        assert_relative_eq!(world.y, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn missing_entity_is_a_no_op() {
        let mut scene = two_devices();
        let ghost = EntityKey::new(EntityKind::Device, 99);
        assert!(!scene.move_entity(Layer::Physical, ghost, Vec3::ZERO, None, false));
        assert!(!scene.rotate_entity(Layer::Physical, ghost, Vec3::ZERO, false));
        assert!(!scene.resize_entity(Layer::Physical, ghost, Vec3::ONE, false));
        assert!(!scene.reparent_entity(Layer::Physical, ghost, 1, None));
    }
}
