//! Hintergrund- und Rahmen-Meshes hinter einem Text.
//!
//! Beide Meshes entstehen aus Ringen gleicher Punktzahl, die entlang Z
//! gestapelt und zu Mantelflächen verbunden werden. Die Ringe folgen der
//! Umrissform mit wachsendem Abstand zur Text-Bounding-Box.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::core::{Aabb, BackgroundShape, Mesh, Shading, TextRecord};

/// Punkte eines elliptischen Umrisses.
pub const CIRCLE_POINTS: usize = 32;
/// Fasen-Anteil der Rahmenbreite.
pub const BEVEL_FACTOR: f32 = 0.2;
/// Streckung der Ellipse relativ zur Box.
const CIRCLE_FACTOR: f32 = 0.707;
/// Abstand der Hintergrund-Vorderseite zur Rückseite.
const BACKGROUND_FRONT: f32 = 0.01;

/// Um den halben Zeilenabstand erweiterte Text-Box in der XY-Ebene.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frame {
    xmin: f32,
    xmax: f32,
    ymin: f32,
    ymax: f32,
}

impl Frame {
    fn around(bounds: &Aabb, height: f32) -> Self {
        Self {
            xmin: bounds.min.x - height / 2.0,
            xmax: bounds.max.x + height / 2.0,
            ymin: bounds.min.y - height / 2.0,
            ymax: bounds.max.y + height / 2.0,
        }
    }

    fn width(&self) -> f32 {
        self.xmax - self.xmin
    }

    fn height(&self) -> f32 {
        self.ymax - self.ymin
    }

    /// Umriss der Form, um `bevel + width` nach außen versetzt.
    ///
    /// Die Raute skaliert den Breitenanteil in X mit dem Seitenverhältnis.
    fn outline(&self, shape: BackgroundShape, bevel: f32, width: f32) -> Vec<Vec2> {
        let grow = bevel + width;
        let (dx, dy) = (self.width(), self.height());
        match shape {
            BackgroundShape::None => Vec::new(),
            BackgroundShape::Rectangle => vec![
                Vec2::new(self.xmin - grow, self.ymin - grow),
                Vec2::new(self.xmax + grow, self.ymin - grow),
                Vec2::new(self.xmax + grow, self.ymax + grow),
                Vec2::new(self.xmin - grow, self.ymax + grow),
            ],
            BackgroundShape::Circle => {
                let center = Vec2::new(self.xmax - dx / 2.0, self.ymax - dy / 2.0);
                let radius = Vec2::new(dx * CIRCLE_FACTOR + grow, dy * CIRCLE_FACTOR + grow);
                (0..CIRCLE_POINTS)
                    .map(|i| {
                        let (sin, cos) = (TAU * i as f32 / CIRCLE_POINTS as f32).sin_cos();
                        center + Vec2::new(cos, sin) * radius
                    })
                    .collect()
            }
            BackgroundShape::Hexagon => {
                let mid = Vec2::new(self.xmin + dx / 2.0, self.ymin + dy / 2.0);
                let gx = if dy > 0.0 { bevel + width * dx / dy } else { grow };
                let gy = grow;
                vec![
                    Vec2::new(mid.x - dx - gx, mid.y),
                    Vec2::new(mid.x, mid.y - dy - gy),
                    Vec2::new(mid.x + dx + gx, mid.y),
                    Vec2::new(mid.x, mid.y + dy + gy),
                ]
            }
            BackgroundShape::Pentagon => vec![
                Vec2::new(self.xmin - dy - grow * 3.0, self.ymin - grow),
                Vec2::new(self.xmax + grow, self.ymin - grow),
                Vec2::new(self.xmax + dy + grow * 3.0, self.ymax + grow),
                Vec2::new(self.xmin - grow, self.ymax + grow),
            ],
        }
    }
}

/// Verbindet gestapelte Ringe; `closed` schließt ersten und letzten Ring.
fn loft(rings: &[(Vec<Vec2>, f32)], closed: bool) -> Mesh {
    let mut mesh = Mesh::new(Shading::Flat);
    let Some(points) = rings.first().map(|(r, _)| r.len() as u32) else {
        return mesh;
    };
    if points < 3 {
        return mesh;
    }
    for (ring, z) in rings {
        mesh.push_vertices(ring.iter().map(|p| Vec3::new(p.x, p.y, *z)));
    }

    let segments = rings.len() as u32 - 1;
    let last = points * segments;
    if closed {
        for x in 0..points - 2 {
            mesh.push_face_plain([0, x + 1, x + 2]);
            mesh.push_face_plain([last, last + x + 2, last + x + 1]);
        }
    }
    for y in 0..segments {
        for x in 0..points {
            let x2 = (x + 1) % points;
            mesh.push_face_plain([y * points + x, (y + 1) * points + x2, y * points + x2]);
            mesh.push_face_plain([y * points + x, (y + 1) * points + x, (y + 1) * points + x2]);
        }
    }
    mesh
}

/// Erzeugt Hintergrund- und Rahmen-Mesh zu einem Text-Mesh.
///
/// Ohne Form, ohne Text oder bei ausgeschalteter Anzeige bleiben die
/// jeweiligen Meshes leer.
pub fn background_meshes(text: &Mesh, record: &TextRecord) -> (Mesh, Mesh) {
    let empty = || Mesh::new(Shading::Flat);
    let Some(bounds) = text.bounds() else {
        return (empty(), empty());
    };
    if record.bg_shape == BackgroundShape::None {
        return (empty(), empty());
    }

    let frame = Frame::around(&bounds, record.height);
    let shape = record.bg_shape;
    let zmin = bounds.min.z;
    let zb = zmin - record.bg_depth;
    let bw = record.border_width;
    let cb = bw * BEVEL_FACTOR;

    let background = if record.bg_show {
        let outline = frame.outline(shape, 0.0, 0.0);
        loft(
            &[(outline.clone(), zb + BACKGROUND_FRONT), (outline, zb)],
            true,
        )
    } else {
        empty()
    };

    let border = if record.border_show {
        let rings: Vec<(Vec<Vec2>, f32)> = [
            (0.0, 0.0, zb),
            (0.0, 0.0, zmin),
            (cb, 0.0, zmin + cb),
            (-cb, bw, zmin + cb),
            (0.0, bw, zmin),
            (0.0, bw, zb),
            (0.0, 0.0, zb),
        ]
        .into_iter()
        .map(|(bevel, width, z)| (frame.outline(shape, bevel, width), z))
        .collect();
        loft(&rings, false)
    } else {
        empty()
    };

    (background, border)
}
