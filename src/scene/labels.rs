//! Namens-Labels über Geräten, VRFs und L2-Segmenten.
//!
//! Die Neigung folgt dem Kamera-Pitch direkt. Die Drehung um Y gleicht die
//! eigene Rotation und die der Base aus, damit die Schrift zur Kamera zeigt.

use glam::Vec3;

use super::Scene;
use crate::core::{EntityKey, EntityKind, EntityRecord, Layer, NameLabel, TextAlign};
use crate::geometry::text_mesh;
use crate::shared::options::{NAME_LABEL_CLEARANCE, NAME_LABEL_SIZE, SEGMENT_LABEL_SIZE};

impl Scene {
    /// Label zu einem Record; leere Namen ergeben kein Label.
    pub(super) fn name_label(
        &self,
        layer: Layer,
        key: EntityKey,
        record: &EntityRecord,
        max_height: f32,
    ) -> Option<NameLabel> {
        let name = record.display_name().filter(|n| !n.is_empty())?;
        let size = match key.kind {
            EntityKind::L2Segment => SEGMENT_LABEL_SIZE,
            _ => NAME_LABEL_SIZE,
        };
        let (pitch, yaw) = self.label_orientation(layer, key);
        Some(NameLabel {
            mesh: text_mesh(self.font.as_ref(), name, size, TextAlign::Center, 0.0),
            offset: Vec3::new(0.0, max_height + NAME_LABEL_CLEARANCE, 0.0),
            pitch,
            yaw,
            visible: self.settings.show_device_name,
        })
    }

    /// (Pitch, Yaw) eines Labels für die aktuelle Kamera seines Layers.
    pub(super) fn label_orientation(&self, layer: Layer, key: EntityKey) -> (f32, f32) {
        let camera = self.cameras.cameras(layer).get(self.cameras.current());
        let graph = self.graph(layer);
        let yaw_of = |key: EntityKey| {
            graph
                .find(key)
                .and_then(|n| n.record.placement())
                .map(|p| p.rotation.y)
                .unwrap_or(0.0)
        };
        let own = yaw_of(key);
        let base = graph
            .find(key)
            .and_then(|n| n.parent())
            .map(|b| yaw_of(EntityKey::base(b)))
            .unwrap_or(0.0);
        (camera.pitch, camera.yaw - own - base)
    }

    /// Richtet das Label einer Entity neu aus.
    pub(super) fn adjust_label(&mut self, layer: Layer, key: EntityKey) {
        let (pitch, yaw) = self.label_orientation(layer, key);
        if let Some(label) = self
            .graph_mut(layer)
            .render_mut(key)
            .and_then(|r| r.label.as_mut())
        {
            label.pitch = pitch;
            label.yaw = yaw;
        }
    }

    /// Richtet alle Labels eines Layers neu aus.
    pub(super) fn adjust_labels(&mut self, layer: Layer) {
        for key in self.labelled(layer) {
            self.adjust_label(layer, key);
        }
    }

    /// Übernimmt `show_device_name` in alle Labels beider Layer.
    pub(super) fn apply_label_visibility(&mut self) {
        let visible = self.settings.show_device_name;
        for layer in Layer::ALL {
            for key in self.labelled(layer) {
                if let Some(label) = self
                    .graph_mut(layer)
                    .render_mut(key)
                    .and_then(|r| r.label.as_mut())
                {
                    label.visible = visible;
                }
            }
        }
    }

    fn labelled(&self, layer: Layer) -> Vec<EntityKey> {
        self.graph(layer)
            .iter()
            .filter(|n| n.render.label.is_some())
            .map(|n| n.key)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::two_devices;
    use super::*;
    use approx::assert_relative_eq;

    fn label(scene: &Scene, id: u64) -> NameLabel {
        scene
            .graph(Layer::Physical)
            .find(EntityKey::new(EntityKind::Device, id))
            .and_then(|n| n.render.label.clone())
            .expect("Label erwartet")
    }

    #[test]
    fn label_sits_above_geometry() {
        let scene = two_devices();
        let node = scene
            .graph(Layer::Physical)
            .find(EntityKey::new(EntityKind::Device, 10))
            .expect("Gerät erwartet");
        let label = node.render.label.as_ref().expect("Label erwartet");
        assert_relative_eq!(label.offset.y, node.render.max_height() + NAME_LABEL_CLEARANCE);
        assert!(label.visible);
    }

    #[test]
    fn label_yaw_compensates_device_and_base() {
        let mut scene = two_devices();
        let d10 = EntityKey::new(EntityKind::Device, 10);
        scene.rotate_entity(Layer::Physical, d10, Vec3::new(0.0, 0.5, 0.0), false);
        scene.rotate_entity(Layer::Physical, EntityKey::base(1), Vec3::new(0.0, 0.25, 0.0), false);

        let camera_yaw = scene.cameras().active().yaw;
        assert_relative_eq!(label(&scene, 10).yaw, camera_yaw - 0.5 - 0.25, epsilon = 1e-6);
        assert_relative_eq!(label(&scene, 11).yaw, camera_yaw - 0.25, epsilon = 1e-6);
        assert_relative_eq!(label(&scene, 10).pitch, scene.cameras().active().pitch);
    }

    #[test]
    fn empty_name_gives_no_label() {
        let mut scene = two_devices();
        assert!(scene.settings_device(10, "", 0x111111, 0x222222, Vec::new()));
        let node = scene
            .graph(Layer::Physical)
            .find(EntityKey::new(EntityKind::Device, 10))
            .expect("Gerät erwartet");
        assert!(node.render.label.is_none());
    }

    #[test]
    fn visibility_follows_setting() {
        let mut scene = two_devices();
        scene.set_show_device_name(false);
        assert!(!label(&scene, 10).visible);
        scene.set_show_device_name(true);
        assert!(label(&scene, 11).visible);
    }
}
