//! Ray-Picking gegen die Mesh-Gruppen des aktiven Layers.

use glam::{Mat4, Vec3};

use super::Scene;
use crate::core::{EntityKey, Layer, MeshRole};

/// Aufweitung der Bounding-Boxen gegen flache Meshes.
const BOUNDS_PADDING: f32 = 1e-4;

/// Ein Treffer des Pick-Strahls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub layer: Layer,
    pub key: EntityKey,
    /// Getroffene Mesh-Gruppe
    pub role: MeshRole,
    /// Schnittpunkt in Weltkoordinaten
    pub point: Vec3,
    /// Abstand vom Strahl-Ursprung
    pub distance: f32,
}

impl Scene {
    /// Alle Treffer unter einem Fensterpunkt, nächster zuerst.
    pub fn pick(&self, x: f32, y: f32) -> Vec<PickHit> {
        let layer = self.cameras.view();
        let ray = self.cameras.ray_from_window(x, y);
        let graph = self.graph(layer);
        let mut hits = Vec::new();
        for node in graph.iter() {
            let Some(world) = graph.world_matrix(node.key) else {
                continue;
            };
            for group in &node.render.groups {
                let Some(bounds) = group.mesh.bounds() else {
                    continue;
                };
                let matrix = world * Mat4::from_translation(group.offset);
                let inverse = matrix.inverse();
                let origin = inverse.transform_point3(ray.origin);
                let direction = inverse.transform_vector3(ray.direction);

                let mut padded = bounds;
                padded.min -= Vec3::splat(BOUNDS_PADDING);
                padded.max += Vec3::splat(BOUNDS_PADDING);
                if padded.ray_hit(origin, direction).is_none() {
                    continue;
                }
                if let Some(t) = group.mesh.intersect_ray(origin, direction) {
                    let point = ray.at(t);
                    hits.push(PickHit {
                        layer,
                        key: node.key,
                        role: group.role,
                        point,
                        distance: point.distance(ray.origin),
                    });
                }
            }
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Schnittpunkt des Strahls durch einen Viewport-Punkt mit der Ebene
    /// `y = height`.
    pub fn pick_ground_plane(&self, x: f32, y: f32, height: f32) -> Option<Vec3> {
        self.cameras.pick_level(x, y, height)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::two_devices;
    use super::*;
    use crate::core::{DeviceRecord, EntityKind, Placement};
    use approx::assert_relative_eq;

    #[test]
    fn hits_are_ordered_by_distance() {
        let mut scene = two_devices();
        let record = DeviceRecord {
            base: 1,
            placement: Placement::at(Vec3::new(0.0, 0.0, 1.0)),
            ..DeviceRecord::default()
        };
        assert!(scene.add_device(12, record, false));

        let hits = scene.pick(400.0, 300.0);
        assert_eq!(
            hits.first().map(|h| h.key),
            Some(EntityKey::new(EntityKind::Device, 12))
        );
        assert!(hits.iter().any(|h| h.key == EntityKey::base(1)));
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn pick_misses_empty_sky() {
        let scene = two_devices();
        assert!(scene.pick(400.0, 0.0).is_empty());
    }

    #[test]
    fn ground_plane_under_viewport_center() {
        let scene = two_devices();
        let point = scene
            .pick_ground_plane(400.0, 300.0, 1.0)
            .expect("Schnittpunkt erwartet");
        assert_relative_eq!(point.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(point.y, 1.0, epsilon = 1e-4);
        assert_relative_eq!(point.z, 1.0, epsilon = 1e-3);
    }
}
