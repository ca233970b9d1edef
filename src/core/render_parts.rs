//! Render-fertige Bestandteile einer Entity: Mesh-Gruppen, Materialien, Namens-Label.

use glam::{Mat4, Quat, Vec3};

use super::mesh::Mesh;
use crate::core::color_to_rgb;
use crate::routing::Route;
use crate::shared::ResourceHandle;

/// Rolle einer Mesh-Gruppe innerhalb ihrer Entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshRole {
    /// Erste einfärbbare Region (z.B. Oberseite)
    Primary,
    /// Zweite einfärbbare Region (z.B. Seitenflächen)
    Secondary,
    /// Zylinder-Segment einer Kante
    Segment { index: usize },
    /// Kugel an einem Knickpunkt einer Kante
    Joint { index: usize },
    Text,
    Background,
    Border,
}

/// Shader-Familie eines Materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    /// Geräte-Shader mit den Uniforms `map` und `mycolor`
    Device,
    /// PBR-Material der Bases und Debug-Linien
    Standard,
    /// Einfaches Phong-Material für Kanten und Texte
    Phong,
}

/// Material einer Mesh-Gruppe.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,
    /// Grundfarbe bzw. `mycolor` (RGB 0..1)
    pub color: [f32; 3],
    /// Textur; bis zur Auflösung rendert das Material ohne Textur
    pub map: Option<ResourceHandle>,
    pub opacity: f32,
    pub double_sided: bool,
    /// Sortierschlüssel für transparente Flächen
    pub render_order: f32,
}

/// Uniform-Vertrag des Geräte-Shaders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialUniforms<'a> {
    pub map: Option<&'a ResourceHandle>,
    pub mycolor: [f32; 3],
}

impl Material {
    /// Geräte-Material mit Textur und Färbung.
    pub fn device(color: u32, map: ResourceHandle) -> Self {
        Self {
            kind: MaterialKind::Device,
            color: color_to_rgb(color),
            map: Some(map),
            opacity: 1.0,
            double_sided: false,
            render_order: 0.0,
        }
    }

    /// PBR-Material, transparent bei `opacity < 1`.
    pub fn standard(
        color: u32,
        map: Option<ResourceHandle>,
        opacity: f32,
        render_order: f32,
    ) -> Self {
        Self {
            kind: MaterialKind::Standard,
            color: color_to_rgb(color),
            map,
            opacity,
            double_sided: false,
            render_order,
        }
    }

    /// Untexturiertes Phong-Material.
    pub fn phong(color: u32) -> Self {
        Self {
            kind: MaterialKind::Phong,
            color: color_to_rgb(color),
            map: None,
            opacity: 1.0,
            double_sided: false,
            render_order: 0.0,
        }
    }

    /// Schaltet beidseitiges Rendering ein.
    pub fn with_double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    /// Uniforms für den Geräte-Shader.
    pub fn uniforms(&self) -> MaterialUniforms<'_> {
        MaterialUniforms {
            map: self.map.as_ref(),
            mycolor: self.color,
        }
    }
}

/// Ein Mesh mit Material und Versatz im Frame seiner Entity.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGroup {
    pub role: MeshRole,
    pub mesh: Mesh,
    pub offset: Vec3,
    pub material: Material,
}

impl MeshGroup {
    /// Gruppe ohne Versatz.
    pub fn new(role: MeshRole, mesh: Mesh, material: Material) -> Self {
        Self {
            role,
            mesh,
            offset: Vec3::ZERO,
            material,
        }
    }

    /// Setzt den Versatz.
    pub fn at(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }
}

/// Namens-Label über einem Gerät, einer VRF oder einem Segment.
#[derive(Debug, Clone, PartialEq)]
pub struct NameLabel {
    pub mesh: Mesh,
    /// Position im Frame der Entity
    pub offset: Vec3,
    /// Neigung (Kamera-Pitch)
    pub pitch: f32,
    /// Drehung um Y, gleicht Geräte- und Base-Rotation aus
    pub yaw: f32,
    pub visible: bool,
}

impl NameLabel {
    /// Lokale Matrix (Rotation in YXZ-Reihenfolge).
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(
            Quat::from_euler(glam::EulerRot::YXZ, self.yaw, self.pitch, 0.0),
            self.offset,
        )
    }
}

/// Alle render-fertigen Bestandteile einer Entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderParts {
    pub groups: Vec<MeshGroup>,
    pub label: Option<NameLabel>,
    /// Zuletzt berechneter Pfad (nur Kanten)
    pub route: Option<Route>,
}

impl RenderParts {
    /// Erste Gruppe mit der gegebenen Rolle.
    pub fn group(&self, role: MeshRole) -> Option<&MeshGroup> {
        self.groups.iter().find(|g| g.role == role)
    }

    /// Alle Segment-Gruppen in Routing-Reihenfolge.
    pub fn segments(&self) -> impl Iterator<Item = &MeshGroup> {
        self.groups
            .iter()
            .filter(|g| matches!(g.role, MeshRole::Segment { .. }))
    }

    /// Alle Joint-Gruppen.
    pub fn joints(&self) -> impl Iterator<Item = &MeshGroup> {
        self.groups
            .iter()
            .filter(|g| matches!(g.role, MeshRole::Joint { .. }))
    }

    /// Höchster Y-Wert aller Gruppen (ohne Label), 0 ohne Geometrie.
    pub fn max_height(&self) -> f32 {
        self.groups
            .iter()
            .filter_map(|g| g.mesh.bounds().map(|b| b.max.y + g.offset.y))
            .fold(0.0, f32::max)
    }
}
