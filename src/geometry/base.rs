//! Boden-Geometrie einer Base: Oberfläche und Sockel je nach Bauform.

use glam::{Vec2, Vec3};

use super::primitives::push_box;
use crate::core::{BaseRecord, BaseSubtype, Mesh, Shading};

/// Dicke der schwebenden Platte.
pub const FLOAT_THICKNESS: f32 = 0.1;
/// Überstand des Sockels über die Oberfläche.
const RIM: f32 = 0.10;
/// Absenkung der Sockelkante unter die Oberfläche.
const RIM_DROP: f32 = 0.05;
/// Textur-Skalierung der Seitenflächen.
const SIDE_TEXTURE_FACTOR: f32 = 0.5;

fn uv(u: f32, v: f32) -> Vec2 {
    Vec2::new(u, v)
}

/// Erzeugt Oberfläche (Gruppe 0) und Sockel (Gruppe 1) im Base-Frame.
pub fn floor_meshes(record: &BaseRecord) -> [Mesh; 2] {
    let size = record.size;
    let h = size.y;
    let w2 = size.x / 2.0;
    let d2 = size.z / 2.0;
    let tu1 = size.x * record.texture_repeat.x;
    let tv1 = size.z * record.texture_repeat.y;

    let mut surface = Mesh::new(Shading::Flat);
    surface.push_vertices([
        Vec3::new(-w2, h, d2),
        Vec3::new(w2, h, d2),
        Vec3::new(w2, h, -d2),
        Vec3::new(-w2, h, -d2),
    ]);
    surface.push_face([0, 1, 2], [uv(0.0, tv1), uv(tu1, tv1), uv(tu1, 0.0)]);
    surface.push_face([0, 2, 3], [uv(0.0, tv1), uv(tu1, 0.0), uv(0.0, 0.0)]);

    let mut elevation = Mesh::new(Shading::Flat);
    match record.subtype {
        BaseSubtype::None => {}
        BaseSubtype::Float => {
            push_slab(&mut elevation, w2, h, h - FLOAT_THICKNESS, d2, tu1, tv1);
        }
        BaseSubtype::Platform => {
            push_slab(&mut elevation, w2, h, h - FLOAT_THICKNESS, d2, tu1, tv1);
            push_columns(&mut elevation, w2, h, d2);
        }
        BaseSubtype::Solid => push_slab(&mut elevation, w2, h, 0.0, d2, tu1, tv1),
    }
    [surface, elevation]
}

/// Abgeschrägte Kante von `h` bis `bottom` mit Bodenfläche.
fn push_slab(mesh: &mut Mesh, w2: f32, h: f32, bottom: f32, d2: f32, tu1: f32, tv1: f32) {
    let ring = |half_w: f32, y: f32, half_d: f32| {
        [
            Vec3::new(-half_w, y, half_d),
            Vec3::new(half_w, y, half_d),
            Vec3::new(half_w, y, -half_d),
            Vec3::new(-half_w, y, -half_d),
        ]
    };
    let start = mesh.push_vertices(ring(w2, h, d2));
    mesh.push_vertices(ring(w2 + RIM, h - RIM_DROP, d2 + RIM));
    mesh.push_vertices(ring(w2 + RIM, bottom, d2 + RIM));

    let tf = SIDE_TEXTURE_FACTOR;
    let su = w2 * tf * 2.0;
    for i in [0u32, 4] {
        let tv = if i == 0 { 0.1 } else { h - bottom } * tf;
        for x in 0..4 {
            let x1 = start + i + x;
            let x2 = start + i + (x + 1) % 4;
            mesh.push_face([x1, 4 + x2, x2], [uv(0.0, tv), uv(su, 0.0), uv(su, tv)]);
            mesh.push_face([x1, 4 + x1, 4 + x2], [uv(0.0, tv), uv(0.0, 0.0), uv(su, 0.0)]);
        }
    }
    let b = start + 8;
    mesh.push_face([b, b + 2, b + 1], [uv(0.0, 0.0), uv(tu1, tv1), uv(0.0, tv1)]);
    mesh.push_face([b, b + 3, b + 2], [uv(0.0, 0.0), uv(tu1, 0.0), uv(tu1, tv1)]);
}

/// Vier Säulen nahe den Ecken bis unter die Platte.
fn push_columns(mesh: &mut Mesh, w2: f32, h: f32, d2: f32) {
    let col_x = w2 * 0.89;
    let col_w = w2 * 0.1;
    let col_z = d2 * 0.89;
    let col_d = d2 * 0.1;
    for (sx, sz) in [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
        let (cx, cz) = (sx * col_x, sz * col_z);
        push_box(
            mesh,
            Vec3::new(cx - col_w, 0.0, cz - col_d),
            Vec3::new(cx + col_w, h - FLOAT_THICKNESS, cz + col_d),
            (0.0, col_w),
            (0.0, h * 0.5),
        );
    }
}

/// Texturdateien von Oberfläche und Sockel.
pub fn floor_textures(record: &BaseRecord) -> [String; 2] {
    [
        format!("{}.png", record.texture1),
        format!("{}.png", record.texture2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(subtype: BaseSubtype) -> BaseRecord {
        BaseRecord {
            subtype,
            size: Vec3::new(4.0, 1.0, 2.0),
            ..BaseRecord::default()
        }
    }

    #[test]
    fn surface_sits_at_floor_height() {
        let [surface, _] = floor_meshes(&record(BaseSubtype::None));
        let bounds = surface.bounds().expect("Bounds erwartet");
        assert_relative_eq!(bounds.min.y, 1.0);
        assert_relative_eq!(bounds.max.y, 1.0);
        assert_relative_eq!(bounds.max.x, 2.0);
        assert_relative_eq!(bounds.max.z, 1.0);
        assert_relative_eq!(surface.face_normal(0).y, 1.0);
    }

    #[test]
    fn subtypes_control_elevation() {
        let [_, none] = floor_meshes(&record(BaseSubtype::None));
        assert!(none.is_empty());

        let [_, float] = floor_meshes(&record(BaseSubtype::Float));
        let bounds = float.bounds().expect("Bounds erwartet");
        assert_relative_eq!(bounds.min.y, 0.9);
        assert_relative_eq!(bounds.max.x, 2.1);
        assert_eq!(float.faces.len(), 18);

        let [_, solid] = floor_meshes(&record(BaseSubtype::Solid));
        assert_relative_eq!(solid.bounds().expect("Bounds erwartet").min.y, 0.0);

        let [_, platform] = floor_meshes(&record(BaseSubtype::Platform));
        assert_eq!(platform.faces.len(), 18 + 4 * 12);
        assert_relative_eq!(platform.bounds().expect("Bounds erwartet").min.y, 0.0);
    }

    #[test]
    fn slab_bottom_faces_down() {
        let [_, float] = floor_meshes(&record(BaseSubtype::Float));
        assert_relative_eq!(float.face_normal(16).y, -1.0);
        assert_relative_eq!(float.face_normal(17).y, -1.0);
    }

    #[test]
    fn texture_repeat_scales_surface_uvs() {
        let mut base = record(BaseSubtype::None);
        base.texture_repeat = Vec2::new(0.5, 2.0);
        let [surface, _] = floor_meshes(&base);
        assert_eq!(surface.face_uvs[0][1], Vec2::new(2.0, 4.0));
        assert_eq!(floor_textures(&base)[0], "b1-t1.png");
    }
}
