//! Mehrzeilige Texte aus einer Vektor-Schrift.

use glam::Vec3;

use super::font::VectorFont;
use crate::core::{Mesh, Shading, TextAlign};

/// Zeilenabstand relativ zur Schriftgröße.
pub const LINE_SPACING: f32 = 1.2;

/// Formt einen (mehrzeiligen) Text.
///
/// Jede Zeile wird für sich ausgerichtet und um X geneigt. Vor jeder Zeile
/// rückt der bisherige Text um eine Zeilenhöhe nach oben, die erste Zeile
/// landet damit zuoberst.
pub fn text_mesh(
    font: &dyn VectorFont,
    text: &str,
    height: f32,
    align: TextAlign,
    rotation_x_deg: f32,
) -> Mesh {
    let mut result = Mesh::new(Shading::Flat);
    for line in text.split('\n') {
        let mut line_mesh = font.shape_line(line, height);
        align_line(&mut line_mesh, align);
        line_mesh.rotate_x(rotation_x_deg.to_radians());
        result.translate(Vec3::new(0.0, height * LINE_SPACING, 0.0));
        result.merge(&line_mesh);
    }
    result
}

fn align_line(mesh: &mut Mesh, align: TextAlign) {
    let Some(bounds) = mesh.bounds() else {
        return;
    };
    let z = -bounds.min.z - bounds.size().z / 2.0;
    let x = match align {
        TextAlign::Center => -bounds.min.x - bounds.size().x / 2.0,
        TextAlign::Left => -bounds.min.x,
        TextAlign::Right => -bounds.max.x,
    };
    mesh.translate(Vec3::new(x, 0.0, z));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::font::BlockFont;
    use approx::assert_relative_eq;

    #[test]
    fn alignment_moves_line_relative_to_origin() {
        let font = BlockFont::default();
        let left = text_mesh(&font, "abc", 1.0, TextAlign::Left, 0.0);
        let bounds = left.bounds().expect("Bounds erwartet");
        assert_relative_eq!(bounds.min.x, 0.0);

        let right = text_mesh(&font, "abc", 1.0, TextAlign::Right, 0.0);
        assert_relative_eq!(right.bounds().expect("Bounds erwartet").max.x, 0.0);

        let center = text_mesh(&font, "abc", 1.0, TextAlign::Center, 0.0);
        let bounds = center.bounds().expect("Bounds erwartet");
        assert_relative_eq!(bounds.min.x, -bounds.max.x);
    }

    #[test]
    fn first_line_is_stacked_on_top() {
        let font = BlockFont::default();
        let mesh = text_mesh(&font, "a\nb", 1.0, TextAlign::Left, 0.0);
        assert_eq!(mesh.faces.len(), 4);
        assert_relative_eq!(mesh.positions[0].y, 1.2);
        assert_relative_eq!(mesh.positions[4].y, 0.0);
    }

    #[test]
    fn rotation_tilts_line_around_x() {
        let font = BlockFont::default();
        let mesh = text_mesh(&font, "a", 1.0, TextAlign::Left, -90.0);
        let bounds = mesh.bounds().expect("Bounds erwartet");
        assert_relative_eq!(bounds.size().y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(bounds.size().z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn empty_text_gives_empty_mesh() {
        let mesh = text_mesh(&BlockFont::default(), "", 0.3, TextAlign::Center, 0.0);
        assert!(mesh.is_empty());
    }
}
