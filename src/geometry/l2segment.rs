//! L2-Segment: um die X-Achse rotiertes Profil (torusartiger Ring).

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::core::{L2SegmentRecord, Mesh, Shading};

/// Anzahl der Rotationsschritte.
pub const RING_STEPS: u32 = 16;
/// Textur der Segmente.
pub const SEGMENT_TEXTURE: &str = "basic.png";

/// Profil als (x, Radius) in Einheitsgröße.
const PROFILE: [[f32; 2]; 10] = [
    [0.0, 0.6],
    [-0.54, 0.65],
    [-0.55, 0.7],
    [-0.54, 0.9],
    [-0.5, 1.0],
    [0.5, 1.0],
    [0.54, 0.9],
    [0.55, 0.7],
    [0.54, 0.65],
    [0.0, 0.6],
];

/// Erzeugt das Segment-Mesh mit geglätteten Normalen.
pub fn segment_mesh(record: &L2SegmentRecord) -> Mesh {
    let size = record.size;
    let columns = PROFILE.len() as u32;
    let mut mesh = Mesh::new(Shading::Smooth);

    for x in 0..=RING_STEPS {
        let (sin, cos) = (TAU * x as f32 / RING_STEPS as f32).sin_cos();
        mesh.push_vertices(PROFILE.iter().map(|[px, r]| {
            Vec3::new(
                px * size.x,
                (0.5 + 0.5 * r * sin) * size.y,
                0.5 * r * cos * size.z,
            )
        }));
    }

    for x in 0..RING_STEPS {
        let v0 = TAU * x as f32 / RING_STEPS as f32;
        let v1 = TAU * (x + 1) as f32 / RING_STEPS as f32;
        for y in 0..columns - 1 {
            let a = x * columns + y;
            let b = (x + 1) * columns + y;
            let u0 = PROFILE[y as usize][0] * size.x;
            let u1 = PROFILE[y as usize + 1][0] * size.x;
            mesh.push_face(
                [a, a + 1, b + 1],
                [Vec2::new(u0, v0), Vec2::new(u1, v0), Vec2::new(u1, v1)],
            );
            mesh.push_face(
                [a, b + 1, b],
                [Vec2::new(u0, v0), Vec2::new(u1, v1), Vec2::new(u0, v1)],
            );
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ring_counts() {
        let mesh = segment_mesh(&L2SegmentRecord::default());
        assert_eq!(mesh.positions.len(), 17 * 10);
        assert_eq!(mesh.faces.len(), 16 * 9 * 2);
        assert_eq!(mesh.shading, Shading::Smooth);
    }

    #[test]
    fn extent_follows_size() {
        let record = L2SegmentRecord {
            size: Vec3::new(2.0, 1.0, 3.0),
            ..L2SegmentRecord::default()
        };
        let bounds = segment_mesh(&record).bounds().expect("Bounds erwartet");
        assert_relative_eq!(bounds.max.x, 1.1);
        assert_relative_eq!(bounds.min.x, -1.1);
        assert_relative_eq!(bounds.max.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.min.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.max.z, 1.5, epsilon = 1e-6);
    }
}
