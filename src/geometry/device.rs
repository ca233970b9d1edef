//! Geräte- und VRF-Geometrie.
//!
//! Eigene Templates haben Vorrang; danach folgen die eingebauten Formen
//! `"S"` (Würfel mit eingelassener Oberseite) und `"LB"` (Keil), zuletzt
//! das `UNKNOWN`-Template.

use glam::{Vec2, Vec3};

use super::templates::TemplateTable;
use crate::core::{DeviceRecord, Mesh, Shading};

/// Skalierung der eingebauten Gerätekörper relativ zur Entity-Größe.
pub const SHELL_BASE_SCALE: Vec3 = Vec3::new(1.0, 0.4, 1.0);

/// Geometrie und Texturen eines Geräts.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceGeometry {
    pub meshes: [Mesh; 2],
    pub textures: [String; 2],
}

fn uv(u: f32, v: f32) -> Vec2 {
    Vec2::new(u, v)
}

/// Hinterkanten-Faktoren (Breite, Höhe) der eingebauten Formen.
fn shell_factors(device_type: &str) -> Option<(f32, f32)> {
    match device_type {
        "S" => Some((1.0, 1.0)),
        "LB" => Some((0.6, 0.8)),
        _ => None,
    }
}

/// Erzeugt die beiden Mesh-Gruppen eines Geräts oder einer VRF.
pub fn device_geometry(record: &DeviceRecord, templates: &TemplateTable) -> DeviceGeometry {
    let kind = record.device_type.as_str();
    if !templates.device.contains(kind) {
        if let Some((bfx, bfy)) = shell_factors(kind) {
            return DeviceGeometry {
                meshes: shell(record.size * SHELL_BASE_SCALE, bfx, bfy),
                textures: [format!("{kind}_1.png"), format!("{kind}_2.png")],
            };
        }
    }
    let template = templates.device.get(kind);
    DeviceGeometry {
        meshes: template.build(record.size),
        textures: template.texture.clone(),
    }
}

/// Gerätekörper mit eingelassener Ober- und Unterseite.
///
/// `bfx`/`bfy` verjüngen die Rückseite in Breite und Höhe.
fn shell(size: Vec3, bfx: f32, bfy: f32) -> [Mesh; 2] {
    let (sx, h, sz) = (size.x, size.y, size.z);
    let fxt = (1.0 - bfx) * 0.5;

    let ring = |inset: f32, front_y: f32, back_y: f32| {
        [
            Vec3::new(-sx * inset, front_y, sz * inset),
            Vec3::new(sx * inset, front_y, sz * inset),
            Vec3::new(sx * inset * bfx, back_y, -sz * inset),
            Vec3::new(-sx * inset * bfx, back_y, -sz * inset),
        ]
    };
    let top = |inset| ring(inset, h, h * bfy);
    let bottom = |inset| ring(inset, 0.0, h * (1.0 - bfy));

    let mut faces = Mesh::new(Shading::Flat);
    faces.push_vertices(top(0.45));
    faces.push_face([0, 1, 2], [uv(0.0, 1.0), uv(1.0, 1.0), uv(1.0 - fxt, 0.0)]);
    faces.push_face([0, 2, 3], [uv(0.0, 1.0), uv(1.0 - fxt, 0.0), uv(fxt, 0.0)]);
    faces.push_vertices(bottom(0.45));
    faces.push_face([4, 6, 5], [uv(0.0, 1.0), uv(1.0 - fxt, 0.0), uv(1.0, 1.0)]);
    faces.push_face([4, 7, 6], [uv(0.0, 1.0), uv(fxt, 0.0), uv(1.0 - fxt, 0.0)]);

    let mut sides = Mesh::new(Shading::Flat);
    sides.push_vertices(top(0.45));
    sides.push_vertices(top(0.5));
    sides.push_vertices(bottom(0.5));
    sides.push_vertices(bottom(0.45));

    for x in [0u32, 4, 8] {
        // Vorder-, rechte, hintere und linke Seite, je zwei Dreiecke
        let (long, short) = if x == 4 {
            ((sx, h), (sz, h))
        } else {
            ((sx, sz * 0.05), (sz, sx * 0.05))
        };
        for side in 0..4u32 {
            let a = x + side;
            let b = x + (side + 1) % 4;
            let (u, v) = if side % 2 == 0 { long } else { short };
            sides.push_face([a, b + 4, b], [uv(0.0, 0.0), uv(u, v), uv(u, 0.0)]);
            sides.push_face([a, a + 4, b + 4], [uv(0.0, 0.0), uv(0.0, v), uv(u, v)]);
        }
    }
    [faces, sides]
}
