//! Dreiecks-Meshes mit Face-UVs, Normalen-Berechnung und Ray-Test.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

/// Normalen-Modus eines Meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    /// Eine Normale pro Dreieck
    #[default]
    Flat,
    /// Gemittelte Normalen pro Vertex
    Smooth,
}

/// Achsenparallele Bounding-Box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Mittelpunkt der Box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Kantenlängen der Box.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Slab-Test: Eintrittsdistanz entlang des Strahls oder `None`.
    pub fn ray_hit(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let inv = direction.recip();
        let t1 = (self.min - origin) * inv;
        let t2 = (self.max - origin) * inv;
        let t_min = t1.min(t2);
        let t_max = t1.max(t2);
        let enter = t_min.max_element();
        let exit = t_max.min_element();
        if enter <= exit && exit >= 0.0 {
            Some(enter.max(0.0))
        } else {
            None
        }
    }
}

/// GPU-Vertex für den Upload (Position, Normale, UV).
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Indiziertes Dreiecks-Mesh mit UVs pro Face-Ecke.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
    /// Ein UV-Tripel pro Face, gleiche Länge wie `faces`
    pub face_uvs: Vec<[Vec2; 3]>,
    pub shading: Shading,
}

impl Mesh {
    /// Erstellt ein leeres Mesh mit dem gegebenen Normalen-Modus.
    pub fn new(shading: Shading) -> Self {
        Self {
            shading,
            ..Self::default()
        }
    }

    /// Gibt `true` zurück, wenn das Mesh keine Dreiecke enthält.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Aktueller Vertex-Index für relative Face-Listen.
    pub fn next_index(&self) -> u32 {
        self.positions.len() as u32
    }

    /// Hängt Vertices an und gibt den Index des ersten zurück.
    pub fn push_vertices<I>(&mut self, vertices: I) -> u32
    where
        I: IntoIterator<Item = Vec3>,
    {
        let start = self.next_index();
        self.positions.extend(vertices);
        start
    }

    /// Fügt ein Dreieck mit UVs hinzu.
    pub fn push_face(&mut self, face: [u32; 3], uvs: [Vec2; 3]) {
        self.faces.push(face);
        self.face_uvs.push(uvs);
    }

    /// Fügt ein Dreieck ohne Textur-Koordinaten hinzu.
    pub fn push_face_plain(&mut self, face: [u32; 3]) {
        self.push_face(face, [Vec2::ZERO; 3]);
    }

    /// Bounding-Box über alle Vertices.
    pub fn bounds(&self) -> Option<Aabb> {
        let first = *self.positions.first()?;
        let (min, max) = self
            .positions
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Aabb { min, max })
    }

    /// Verschiebt alle Vertices.
    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Rotiert alle Vertices um die X-Achse.
    pub fn rotate_x(&mut self, angle: f32) {
        if angle == 0.0 {
            return;
        }
        self.transform(Mat4::from_rotation_x(angle));
    }

    /// Transformiert alle Vertices mit einer Matrix.
    pub fn transform(&mut self, matrix: Mat4) {
        for p in &mut self.positions {
            *p = matrix.transform_point3(*p);
        }
    }

    /// Hängt ein anderes Mesh an (Indices werden verschoben).
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.next_index();
        self.positions.extend_from_slice(&other.positions);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]),
        );
        self.face_uvs.extend_from_slice(&other.face_uvs);
    }

    fn corners(&self, face: [u32; 3]) -> Option<[Vec3; 3]> {
        Some([
            *self.positions.get(face[0] as usize)?,
            *self.positions.get(face[1] as usize)?,
            *self.positions.get(face[2] as usize)?,
        ])
    }

    /// Normale eines Dreiecks (Gegenuhrzeigersinn = Vorderseite).
    pub fn face_normal(&self, index: usize) -> Vec3 {
        self.faces
            .get(index)
            .and_then(|f| self.corners(*f))
            .map(|[a, b, c]| (b - a).cross(c - a).normalize_or_zero())
            .unwrap_or(Vec3::ZERO)
    }

    /// Flächengewichtete, gemittelte Normalen pro Vertex.
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for face in &self.faces {
            let Some([a, b, c]) = self.corners(*face) else {
                continue;
            };
            let n = (b - a).cross(c - a);
            for index in face {
                normals[*index as usize] += n;
            }
        }
        normals.iter().map(|n| n.normalize_or_zero()).collect()
    }

    /// Expandiert das Mesh in eine nicht-indizierte Vertex-Liste für die GPU.
    pub fn gpu_vertices(&self) -> Vec<GpuVertex> {
        let smooth = match self.shading {
            Shading::Smooth => Some(self.vertex_normals()),
            Shading::Flat => None,
        };
        let mut out = Vec::with_capacity(self.faces.len() * 3);
        for (face_index, face) in self.faces.iter().enumerate() {
            let flat = self.face_normal(face_index);
            let uvs = self
                .face_uvs
                .get(face_index)
                .copied()
                .unwrap_or([Vec2::ZERO; 3]);
            for (corner, index) in face.iter().enumerate() {
                let Some(position) = self.positions.get(*index as usize) else {
                    continue;
                };
                let normal = smooth
                    .as_ref()
                    .and_then(|n| n.get(*index as usize).copied())
                    .unwrap_or(flat);
                out.push(GpuVertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                    uv: uvs[corner].to_array(),
                });
            }
        }
        out
    }

    /// Nächster Schnitt eines Strahls mit einem Dreieck (beidseitig).
    ///
    /// `direction` muss nicht normiert sein; das Ergebnis ist der Strahlparameter.
    pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        self.faces
            .iter()
            .filter_map(|face| {
                let [a, b, c] = self.corners(*face)?;
                ray_triangle(origin, direction, a, b, c)
            })
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Byte-Sicht auf eine Vertex-Liste für Buffer-Uploads.
pub fn vertex_bytes(vertices: &[GpuVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Möller–Trumbore-Schnitt; liefert den Strahlparameter `t >= 0`.
fn ray_triangle(origin: Vec3, direction: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;
    let edge1 = b - a;
    let edge2 = c - a;
    let p = direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = edge2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_quad() -> Mesh {
        let mut mesh = Mesh::new(Shading::Flat);
        let i = mesh.push_vertices([
            Vec3::new(-0.5, 0.0, 0.5),
            Vec3::new(0.5, 0.0, 0.5),
            Vec3::new(0.5, 0.0, -0.5),
            Vec3::new(-0.5, 0.0, -0.5),
        ]);
        mesh.push_face_plain([i, i + 1, i + 2]);
        mesh.push_face_plain([i, i + 2, i + 3]);
        mesh
    }

    #[test]
    fn quad_normal_points_up() {
        let mesh = unit_quad();
        assert_relative_eq!(mesh.face_normal(0).y, 1.0);
        for n in mesh.vertex_normals() {
            assert_relative_eq!(n.y, 1.0);
        }
    }

    #[test]
    fn ray_hits_quad_from_above() {
        let mesh = unit_quad();
        let t = mesh
            .intersect_ray(Vec3::new(0.1, 5.0, 0.1), Vec3::NEG_Y)
            .expect("Treffer erwartet");
        assert_relative_eq!(t, 5.0);
        assert!(mesh
            .intersect_ray(Vec3::new(3.0, 5.0, 0.0), Vec3::NEG_Y)
            .is_none());
    }

    #[test]
    fn merge_offsets_indices() {
        let mut a = unit_quad();
        let mut b = unit_quad();
        b.translate(Vec3::Y);
        a.merge(&b);
        assert_eq!(a.positions.len(), 8);
        assert_eq!(a.faces[2], [4, 5, 6]);
        assert_eq!(a.faces.len(), a.face_uvs.len());
        let bounds = a.bounds().expect("Bounds erwartet");
        assert_relative_eq!(bounds.max.y, 1.0);
    }

    #[test]
    fn gpu_export_expands_faces() {
        let mesh = unit_quad();
        let vertices = mesh.gpu_vertices();
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertex_bytes(&vertices).len(), 6 * 32);
    }

    #[test]
    fn aabb_slab_test() {
        let bounds = Aabb {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        };
        let t = bounds
            .ray_hit(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z)
            .expect("Treffer erwartet");
        assert_relative_eq!(t, 9.0);
        assert!(bounds.ray_hit(Vec3::new(5.0, 0.0, 10.0), Vec3::NEG_Z).is_none());
    }
}
