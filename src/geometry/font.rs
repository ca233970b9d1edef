//! Vektor-Schriften für Texte und Namens-Labels.
//!
//! Die Szene kennt nur den `VectorFont`-Trait. Echte Glyphen formt
//! `OutlineFont` aus einer TTF/OTF-Datei; bis diese geladen ist, zeichnet
//! `BlockFont` ein Rechteck pro Zeichen.

use glam::{Vec2, Vec3};

use crate::core::{Mesh, Shading};

/// Erzeugt Dreiecks-Meshes für eine Textzeile.
pub trait VectorFont: std::fmt::Debug {
    /// Formt eine Zeile in der XY-Ebene (Grundlinie y = 0, Lesrichtung +X,
    /// Vorderseite +Z). Leere Zeilen ergeben ein leeres Mesh.
    fn shape_line(&self, line: &str, size: f32) -> Mesh;
}

/// Platzhalter-Schrift: ein Rechteck pro sichtbarem Zeichen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockFont {
    /// Glyphenbreite relativ zur Schriftgröße
    pub glyph_width: f32,
    /// Vorschub relativ zur Schriftgröße
    pub advance: f32,
}

impl Default for BlockFont {
    fn default() -> Self {
        Self {
            glyph_width: 0.5,
            advance: 0.6,
        }
    }
}

impl VectorFont for BlockFont {
    fn shape_line(&self, line: &str, size: f32) -> Mesh {
        let mut mesh = Mesh::new(Shading::Flat);
        let width = size * self.glyph_width;
        for (column, _) in line.chars().enumerate().filter(|(_, c)| !c.is_whitespace()) {
            let x = column as f32 * size * self.advance;
            let i = mesh.push_vertices([
                Vec3::new(x, 0.0, 0.0),
                Vec3::new(x + width, 0.0, 0.0),
                Vec3::new(x + width, size, 0.0),
                Vec3::new(x, size, 0.0),
            ]);
            mesh.push_face(
                [i, i + 1, i + 2],
                [Vec2::ZERO, Vec2::X, Vec2::ONE],
            );
            mesh.push_face([i, i + 2, i + 3], [Vec2::ZERO, Vec2::ONE, Vec2::Y]);
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn block_font_skips_whitespace() {
        let mesh = BlockFont::default().shape_line("a b", 1.0);
        assert_eq!(mesh.faces.len(), 4);
        let bounds = mesh.bounds().expect("Bounds erwartet");
        assert_relative_eq!(bounds.min.x, 0.0);
        assert_relative_eq!(bounds.max.x, 1.7);
        assert_relative_eq!(bounds.max.y, 1.0);
        assert_relative_eq!(mesh.face_normal(0).z, 1.0);
    }

    #[test]
    fn empty_line_is_empty_mesh() {
        assert!(BlockFont::default().shape_line("", 0.3).is_empty());
        assert!(BlockFont::default().shape_line("   ", 0.3).is_empty());
    }
}
