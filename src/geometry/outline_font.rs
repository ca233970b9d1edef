//! TrueType/OpenType-Schrift über `ab_glyph`-Outlines.
//!
//! Jede Glyphe wird in geschlossene Konturen zerlegt, Bézier-Kurven werden
//! abgetastet und die Flächen mit `earcutr` trianguliert. Innenkonturen
//! (Löcher wie in "o" oder "A") haben den umgekehrten Umlaufsinn der
//! Außenkontur.

use ab_glyph::{Font, FontVec, GlyphId, OutlineCurve, Point};
use anyhow::{anyhow, Context};
use glam::{Vec2, Vec3};

use super::font::VectorFont;
use crate::core::{Mesh, Shading};

/// Stützpunkte pro Bézier-Kurve.
pub const CURVE_STEPS: usize = 6;

/// Schrift aus Font-Datei-Bytes.
pub struct OutlineFont {
    font: FontVec,
    units_per_em: f32,
}

impl std::fmt::Debug for OutlineFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFont")
            .field("units_per_em", &self.units_per_em)
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl OutlineFont {
    /// Parst eine TTF/OTF-Datei.
    pub fn from_bytes(bytes: Vec<u8>) -> anyhow::Result<Self> {
        let font = FontVec::try_from_vec(bytes).context("Ungültige Font-Datei")?;
        let units_per_em = font
            .units_per_em()
            .filter(|u| *u > 0.0)
            .ok_or_else(|| anyhow!("Font ohne units_per_em"))?;
        log::debug!(
            "Font geladen: {} Glyphen, {} Einheiten/em",
            font.glyph_count(),
            units_per_em
        );
        Ok(Self { font, units_per_em })
    }

    /// Dreiecke einer Glyphe in Font-Einheiten (y nach oben).
    fn glyph_triangles(&self, id: GlyphId) -> Vec<[Vec2; 3]> {
        match self.font.outline(id) {
            Some(outline) => triangulate(&contours(&outline.curves)),
            None => Vec::new(),
        }
    }
}

impl VectorFont for OutlineFont {
    fn shape_line(&self, line: &str, size: f32) -> Mesh {
        let mut mesh = Mesh::new(Shading::Flat);
        let scale = size / self.units_per_em;
        let mut pen = 0.0;
        let mut previous: Option<GlyphId> = None;

        for c in line.chars() {
            let id = self.font.glyph_id(c);
            if let Some(prev) = previous {
                pen += self.font.kern_unscaled(prev, id);
            }
            for triangle in self.glyph_triangles(id) {
                let i = mesh.push_vertices(
                    triangle.map(|p| Vec3::new((p.x + pen) * scale, p.y * scale, 0.0)),
                );
                mesh.push_face_plain([i, i + 1, i + 2]);
            }
            pen += self.font.h_advance_unscaled(id);
            previous = Some(id);
        }
        mesh
    }
}

// ── Konturen ────────────────────────────────────────────────────────

fn vec2(p: Point) -> Vec2 {
    Vec2::new(p.x, p.y)
}

fn quad_at(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

fn cubic_at(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Zerlegt eine Kurvenliste in geschlossene Polygone.
///
/// Eine neue Kontur beginnt, wo eine Kurve nicht am Ende der vorigen
/// ansetzt. Der schließende Punkt (gleich dem Startpunkt) entfällt.
fn contours(curves: &[OutlineCurve]) -> Vec<Vec<Vec2>> {
    let mut result: Vec<Vec<Vec2>> = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();

    for curve in curves {
        let start = match curve {
            OutlineCurve::Line(p0, _)
            | OutlineCurve::Quad(p0, _, _)
            | OutlineCurve::Cubic(p0, _, _, _) => vec2(*p0),
        };
        if current.last() != Some(&start) {
            if current.len() > 2 {
                result.push(std::mem::take(&mut current));
            }
            current.clear();
            current.push(start);
        }
        match curve {
            OutlineCurve::Line(_, p1) => current.push(vec2(*p1)),
            OutlineCurve::Quad(p0, p1, p2) => {
                let (p0, p1, p2) = (vec2(*p0), vec2(*p1), vec2(*p2));
                for step in 1..=CURVE_STEPS {
                    let t = step as f32 / CURVE_STEPS as f32;
                    current.push(quad_at(p0, p1, p2, t));
                }
            }
            OutlineCurve::Cubic(p0, p1, p2, p3) => {
                let (p0, p1, p2, p3) = (vec2(*p0), vec2(*p1), vec2(*p2), vec2(*p3));
                for step in 1..=CURVE_STEPS {
                    let t = step as f32 / CURVE_STEPS as f32;
                    current.push(cubic_at(p0, p1, p2, p3, t));
                }
            }
        }
    }
    if current.len() > 2 {
        result.push(current);
    }
    for contour in &mut result {
        if contour.len() > 1 && contour.first() == contour.last() {
            contour.pop();
        }
    }
    result.retain(|c| c.len() > 2);
    result
}

/// Vorzeichenbehaftete Fläche (positiv = gegen den Uhrzeigersinn).
fn signed_area(contour: &[Vec2]) -> f32 {
    let n = contour.len();
    (0..n)
        .map(|i| contour[i].perp_dot(contour[(i + 1) % n]))
        .sum::<f32>()
        / 2.0
}

/// Punkt-in-Polygon nach der Gerade-Ungerade-Regel.
fn contains(contour: &[Vec2], point: Vec2) -> bool {
    let n = contour.len();
    let mut inside = false;
    for i in 0..n {
        let a = contour[i];
        let b = contour[(i + n - 1) % n];
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
    }
    inside
}

/// Trianguliert Außenkonturen samt ihrer Löcher.
///
/// Den Umlaufsinn der Außenkonturen gibt die flächengrößte Kontur vor.
/// Alle Dreiecke werden gegen den Uhrzeigersinn ausgegeben (Normale +Z).
fn triangulate(contours: &[Vec<Vec2>]) -> Vec<[Vec2; 3]> {
    let areas: Vec<f32> = contours.iter().map(|c| signed_area(c)).collect();
    let Some(outer_sign) = areas
        .iter()
        .copied()
        .max_by(|a, b| a.abs().total_cmp(&b.abs()))
        .map(f32::signum)
    else {
        return Vec::new();
    };

    let outers: Vec<usize> = (0..contours.len())
        .filter(|i| areas[*i].signum() == outer_sign)
        .collect();
    let mut holes: Vec<Vec<usize>> = vec![Vec::new(); outers.len()];
    for i in (0..contours.len()).filter(|i| areas[*i].signum() != outer_sign) {
        match outers.iter().position(|o| contains(&contours[*o], contours[i][0])) {
            Some(slot) => holes[slot].push(i),
            None => log::trace!("Innenkontur {} ohne Außenkontur verworfen", i),
        }
    }

    let mut triangles = Vec::new();
    for (slot, outer) in outers.iter().enumerate() {
        let mut points: Vec<Vec2> = contours[*outer].clone();
        let mut hole_indices = Vec::with_capacity(holes[slot].len());
        for hole in &holes[slot] {
            hole_indices.push(points.len());
            points.extend_from_slice(&contours[*hole]);
        }
        let data: Vec<f64> = points
            .iter()
            .flat_map(|p| [p.x as f64, p.y as f64])
            .collect();
        let indices = match earcutr::earcut(data.as_slice(), &hole_indices, 2) {
            Ok(indices) => indices,
            Err(err) => {
                log::warn!("Triangulierung einer Glyphen-Kontur fehlgeschlagen: {:?}", err);
                continue;
            }
        };
        for tri in indices.chunks_exact(3) {
            let (a, b, c) = (points[tri[0]], points[tri[1]], points[tri[2]]);
            if (b - a).perp_dot(c - a) < 0.0 {
                triangles.push([a, c, b]);
            } else {
                triangles.push([a, b, c]);
            }
        }
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_glyph::point;
    use approx::assert_relative_eq;

    fn square(min: f32, max: f32, clockwise: bool) -> Vec<OutlineCurve> {
        let mut corners = vec![
            point(min, min),
            point(max, min),
            point(max, max),
            point(min, max),
        ];
        if clockwise {
            corners.reverse();
        }
        (0..4)
            .map(|i| OutlineCurve::Line(corners[i], corners[(i + 1) % 4]))
            .collect()
    }

    fn area(triangles: &[[Vec2; 3]]) -> f32 {
        triangles
            .iter()
            .map(|[a, b, c]| (*b - *a).perp_dot(*c - *a) / 2.0)
            .sum()
    }

    #[test]
    fn curves_split_into_closed_contours() {
        let mut curves = square(0.0, 10.0, true);
        curves.extend(square(3.0, 7.0, false));
        let split = contours(&curves);
        assert_eq!(split.len(), 2);
        assert!(split.iter().all(|c| c.len() == 4));
        assert!(signed_area(&split[0]) < 0.0);
        assert!(signed_area(&split[1]) > 0.0);
    }

    #[test]
    fn quad_curve_is_flattened() {
        let curves = [
            OutlineCurve::Quad(point(0.0, 0.0), point(5.0, 10.0), point(10.0, 0.0)),
            OutlineCurve::Line(point(10.0, 0.0), point(0.0, 0.0)),
        ];
        let split = contours(&curves);
        assert_eq!(split.len(), 1);
        assert_eq!(split[0].len(), CURVE_STEPS + 1);
        assert!(split[0].iter().all(|p| p.y >= 0.0 && p.y <= 5.0));
        assert_eq!(split[0][CURVE_STEPS], Vec2::new(10.0, 0.0));
    }

    #[test]
    fn hole_is_cut_out_of_outer_contour() {
        let mut curves = square(0.0, 10.0, true);
        curves.extend(square(3.0, 7.0, false));
        let triangles = triangulate(&contours(&curves));
        assert!(!triangles.is_empty());
        assert_relative_eq!(area(&triangles), 100.0 - 16.0, epsilon = 1e-3);
        for [a, b, c] in &triangles {
            assert!((*b - *a).perp_dot(*c - *a) > 0.0, "Dreieck nicht gegen den Uhrzeigersinn");
            let centre = (*a + *b + *c) / 3.0;
            assert!(!(centre.x > 3.0 && centre.x < 7.0 && centre.y > 3.0 && centre.y < 7.0));
        }
    }

    #[test]
    fn separate_outers_are_triangulated_independently() {
        let mut curves = square(0.0, 2.0, false);
        curves.extend(square(5.0, 6.0, false));
        let triangles = triangulate(&contours(&curves));
        assert_eq!(triangles.len(), 4);
        assert_relative_eq!(area(&triangles), 4.0 + 1.0, epsilon = 1e-4);
    }

    #[test]
    fn no_curves_give_no_triangles() {
        assert!(triangulate(&contours(&[])).is_empty());
    }

    #[test]
    fn invalid_bytes_are_rejected() {
        assert!(OutlineFont::from_bytes(b"keine Schrift".to_vec()).is_err());
        assert!(OutlineFont::from_bytes(Vec::new()).is_err());
    }
}
