//! Wiederverwendbare Grundkörper: Quader, Zylinder-Mantel und UV-Kugel.

use glam::{Quat, Vec2, Vec3};

use crate::core::{Mesh, Shading};

/// Anzahl der Seiten eines Segment-Zylinders.
pub const CYLINDER_SIDES: u32 = 8;
/// Unterteilung der Joint-Kugel in Breite und Höhe.
pub const SPHERE_SEGMENTS: u32 = 10;

fn uv(u: f32, v: f32) -> Vec2 {
    Vec2::new(u, v)
}

/// Hängt einen achsenparallelen Quader an.
///
/// `u` und `v` spannen die Textur der Seitenflächen auf; Deckel und Boden
/// verwenden `u` für beide Achsen.
pub fn push_box(mesh: &mut Mesh, min: Vec3, max: Vec3, u: (f32, f32), v: (f32, f32)) {
    let (x1, y1, z1) = (min.x, min.y, min.z);
    let (x2, y2, z2) = (max.x, max.y, max.z);
    let i = mesh.push_vertices([
        Vec3::new(x2, y1, z1),
        Vec3::new(x1, y1, z1),
        Vec3::new(x1, y1, z2),
        Vec3::new(x2, y1, z2),
        Vec3::new(x2, y2, z1),
        Vec3::new(x1, y2, z1),
        Vec3::new(x1, y2, z2),
        Vec3::new(x2, y2, z2),
    ]);
    let (tu1, tu2) = u;
    let (tv1, tv2) = v;

    let side_a = [uv(tu1, tv1), uv(tu2, tv1), uv(tu2, tv2)];
    let side_b = [uv(tu1, tv1), uv(tu2, tv2), uv(tu1, tv2)];
    for k in 0..4 {
        let a = i + k;
        let b = i + (k + 1) % 4;
        mesh.push_face([a, b, b + 4], side_a);
        mesh.push_face([a, b + 4, a + 4], side_b);
    }

    mesh.push_face(
        [i, i + 2, i + 1],
        [uv(tu1, tu1), uv(tu2, tu2), uv(tu2, tu1)],
    );
    mesh.push_face(
        [i, i + 3, i + 2],
        [uv(tu1, tu1), uv(tu1, tu2), uv(tu2, tu2)],
    );
    mesh.push_face(
        [i + 4, i + 5, i + 6],
        [uv(tu1, tu1), uv(tu2, tu1), uv(tu2, tu2)],
    );
    mesh.push_face(
        [i + 4, i + 6, i + 7],
        [uv(tu1, tu1), uv(tu2, tu2), uv(tu1, tu2)],
    );
}

/// Offener 8-seitiger Zylinder-Mantel vom Ursprung nach `direction`.
///
/// Der Mantel wird entlang +Z erzeugt und auf `direction` gedreht. Bei
/// Länge 0 bleibt die Orientierung unverändert.
pub fn cylinder(direction: Vec3, radius: f32) -> Mesh {
    let length = direction.length();
    let mut mesh = Mesh::new(Shading::Smooth);
    let step = std::f32::consts::TAU / CYLINDER_SIDES as f32;

    for y in 0..2 {
        mesh.push_vertices((0..CYLINDER_SIDES).map(|x| {
            let angle = x as f32 * step;
            Vec3::new(angle.sin() * radius, angle.cos() * radius, y as f32 * length)
        }));
    }
    for x in 0..CYLINDER_SIDES {
        let x2 = (x + 1) % CYLINDER_SIDES;
        mesh.push_face(
            [x, x + CYLINDER_SIDES, x2 + CYLINDER_SIDES],
            [uv(0.0, 0.0), uv(0.0, length), uv(step, length)],
        );
        mesh.push_face(
            [x, x2 + CYLINDER_SIDES, x2],
            [uv(0.0, 0.0), uv(step, length), uv(step, 0.0)],
        );
    }

    if length > f32::EPSILON {
        let rotation = Quat::from_rotation_arc(Vec3::Z, direction / length);
        for p in &mut mesh.positions {
            *p = rotation * *p;
        }
    }
    mesh
}

/// UV-Kugel um den Ursprung.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let mut mesh = Mesh::new(Shading::Smooth);
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let row = width_segments + 1;

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        mesh.push_vertices((0..=width_segments).map(|ix| {
            let u = ix as f32 / width_segments as f32;
            let (sin_u, cos_u) = (u * std::f32::consts::TAU).sin_cos();
            let (sin_v, cos_v) = (v * std::f32::consts::PI).sin_cos();
            Vec3::new(-radius * cos_u * sin_v, radius * cos_v, radius * sin_u * sin_v)
        }));
    }

    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            let (u0, u1) = (
                ix as f32 / width_segments as f32,
                (ix + 1) as f32 / width_segments as f32,
            );
            let (v0, v1) = (
                1.0 - iy as f32 / height_segments as f32,
                1.0 - (iy + 1) as f32 / height_segments as f32,
            );
            if iy != 0 {
                mesh.push_face([a, b, d], [uv(u1, v0), uv(u0, v0), uv(u1, v1)]);
            }
            if iy != height_segments - 1 {
                mesh.push_face([b, c, d], [uv(u0, v0), uv(u0, v1), uv(u1, v1)]);
            }
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn box_has_twelve_faces() {
        let mut mesh = Mesh::default();
        push_box(&mut mesh, Vec3::ZERO, Vec3::ONE, (0.0, 1.0), (0.0, 1.0));
        assert_eq!(mesh.positions.len(), 8);
        assert_eq!(mesh.faces.len(), 12);
        let bounds = mesh.bounds().expect("Bounds erwartet");
        assert_eq!(bounds.max, Vec3::ONE);
    }

    #[test]
    fn cylinder_points_along_direction() {
        let mesh = cylinder(Vec3::new(2.0, 0.0, 0.0), 0.1);
        assert_eq!(mesh.positions.len(), 16);
        assert_eq!(mesh.faces.len(), 16);
        let bounds = mesh.bounds().expect("Bounds erwartet");
        assert_relative_eq!(bounds.max.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(bounds.min.x, 0.0, epsilon = 1e-5);
        assert!(bounds.max.y <= 0.1 + 1e-5);
    }

    #[test]
    fn zero_length_cylinder_keeps_orientation() {
        let mesh = cylinder(Vec3::ZERO, 0.1);
        assert!(mesh.positions.iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn sphere_vertices_on_radius() {
        let mesh = uv_sphere(0.5, SPHERE_SEGMENTS, SPHERE_SEGMENTS);
        assert_eq!(mesh.positions.len(), 121);
        assert_eq!(mesh.faces.len(), 180);
        for p in &mesh.positions {
            assert_relative_eq!(p.length(), 0.5, epsilon = 1e-5);
        }
    }
}
