//! Segment- und Joint-Meshes eines berechneten Pfads.

use glam::Vec3;

use super::path::{Route, RouteSegment};
use crate::core::{Material, MeshGroup, MeshRole};
use crate::geometry::primitives::{cylinder, uv_sphere, SPHERE_SEGMENTS};

/// Zylinder eines Segments, im Ursprung beginnend.
pub fn segment_mesh(segment: &RouteSegment, weight: f32) -> crate::core::Mesh {
    cylinder(segment.direction(), weight)
}

/// Kugel eines Joints um den Ursprung.
pub fn joint_mesh(weight: f32) -> crate::core::Mesh {
    uv_sphere(weight, SPHERE_SEGMENTS, SPHERE_SEGMENTS)
}

/// Mesh-Gruppen aller Segmente und Joints.
///
/// Die Versätze sind Weltkoordinaten; Kanten hängen direkt am Layer-Ursprung.
pub fn route_groups(route: &Route, weight: f32, material: &Material) -> Vec<MeshGroup> {
    let segments = route.segments.iter().enumerate().map(|(index, segment)| {
        MeshGroup::new(
            MeshRole::Segment { index },
            segment_mesh(segment, weight),
            material.clone(),
        )
        .at(segment.start)
    });
    let joint = joint_mesh(weight);
    let joints = route.joints.iter().enumerate().map(|(index, point)| {
        MeshGroup::new(MeshRole::Joint { index }, joint.clone(), material.clone()).at(*point)
    });
    segments.chain(joints).collect()
}

/// Segment-Gruppe einer freistehenden Linie.
pub fn line_group(start: Vec3, end: Vec3, radius: f32, material: Material) -> MeshGroup {
    let segment = RouteSegment { start, end };
    MeshGroup::new(
        MeshRole::Segment { index: 0 },
        segment_mesh(&segment, radius),
        material,
    )
    .at(start)
}
