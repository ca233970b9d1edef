//! Geometrie-Templates für Geräte- und Symbol-Typen.
//!
//! Jede Familie enthält einen Pflicht-Eintrag `UNKNOWN`, auf den unbekannte
//! Typ-Codes zurückfallen. Templates lassen sich aus JSON laden; fehlt dort
//! der `UNKNOWN`-Eintrag, wird der eingebaute verwendet.

use anyhow::{bail, Context};
use glam::{Vec2, Vec3};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Mesh, Shading};

/// Schlüssel des Fallback-Templates.
pub const UNKNOWN: &str = "UNKNOWN";
/// Textur aller eingebauten Templates.
pub const BASIC_TEXTURE: &str = "basic.png";

/// Vertex-, Face- und UV-Listen für bis zu zwei Mesh-Gruppen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryTemplate {
    /// Vertices je Gruppe, in Einheitsgröße
    #[serde(rename = "v")]
    pub vertices: Vec<Vec<[f32; 3]>>,
    /// Dreiecke je Gruppe
    #[serde(rename = "f")]
    pub faces: Vec<Vec<[u32; 3]>>,
    /// UVs je Dreieck; fehlende Einträge werden mit 0 ergänzt
    #[serde(rename = "uv", default)]
    pub uvs: Vec<Vec<[[f32; 2]; 3]>>,
    /// Zusätzliche Skalierung zur Entity-Größe
    #[serde(default = "unit_scale")]
    pub base_scale: [f32; 3],
    #[serde(default = "default_flat")]
    pub flat_normals: bool,
    /// Texturdateien der beiden Gruppen
    #[serde(default = "basic_textures")]
    pub texture: [String; 2],
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_flat() -> bool {
    true
}

fn basic_textures() -> [String; 2] {
    [BASIC_TEXTURE.to_string(), BASIC_TEXTURE.to_string()]
}

impl GeometryTemplate {
    /// Template mit Standardwerten aus rohen Gruppen.
    pub fn from_groups(groups: Vec<(Vec<[f32; 3]>, Vec<[u32; 3]>)>, base_scale: [f32; 3]) -> Self {
        let (vertices, faces) = groups.into_iter().unzip();
        Self {
            vertices,
            faces,
            uvs: Vec::new(),
            base_scale,
            flat_normals: true,
            texture: basic_textures(),
        }
    }

    /// Prüft, ob alle Face-Indices auf vorhandene Vertices zeigen.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.faces.len() > self.vertices.len() {
            bail!(
                "{} Face-Gruppen, aber nur {} Vertex-Gruppen",
                self.faces.len(),
                self.vertices.len()
            );
        }
        for (group, faces) in self.faces.iter().enumerate() {
            let count = self.vertices[group].len() as u32;
            if let Some(face) = faces.iter().find(|f| f.iter().any(|i| *i >= count)) {
                bail!(
                    "Gruppe {}: Face {:?} außerhalb von {} Vertices",
                    group,
                    face,
                    count
                );
            }
        }
        Ok(())
    }

    /// Erzeugt die beiden Meshes für eine Entity-Größe.
    ///
    /// Gruppen ohne Daten bleiben leer.
    pub fn build(&self, size: Vec3) -> [Mesh; 2] {
        let shading = if self.flat_normals {
            Shading::Flat
        } else {
            Shading::Smooth
        };
        let scale = size * Vec3::from(self.base_scale);
        let mut meshes = [Mesh::new(shading), Mesh::new(shading)];

        for (group, mesh) in meshes.iter_mut().enumerate() {
            let Some(vertices) = self.vertices.get(group) else {
                continue;
            };
            mesh.push_vertices(vertices.iter().map(|v| Vec3::from(*v) * scale));
            let uvs = self.uvs.get(group);
            for (index, face) in self.faces.get(group).into_iter().flatten().enumerate() {
                let corners = uvs
                    .and_then(|u| u.get(index))
                    .map(|c| c.map(Vec2::from))
                    .unwrap_or([Vec2::ZERO; 3]);
                mesh.push_face(*face, corners);
            }
        }
        meshes
    }
}

/// Templates einer Familie (Geräte oder Symbole).
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateFamily {
    unknown: GeometryTemplate,
    entries: IndexMap<String, GeometryTemplate>,
}

impl TemplateFamily {
    /// Familie mit Fallback und ohne weitere Einträge.
    pub fn new(unknown: GeometryTemplate) -> Self {
        Self {
            unknown,
            entries: IndexMap::new(),
        }
    }

    /// Fügt ein Template hinzu oder ersetzt es. `UNKNOWN` ersetzt den Fallback.
    pub fn insert(&mut self, key: &str, template: GeometryTemplate) {
        if key == UNKNOWN {
            self.unknown = template;
        } else {
            self.entries.insert(key.to_string(), template);
        }
    }

    /// Gibt `true` zurück, wenn ein eigenes Template für den Typ existiert.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Template zum Typ-Code, sonst `UNKNOWN`.
    pub fn get(&self, key: &str) -> &GeometryTemplate {
        self.entries.get(key).unwrap_or(&self.unknown)
    }

    /// Fallback-Template.
    pub fn unknown(&self) -> &GeometryTemplate {
        &self.unknown
    }

    /// Alle registrierten Typ-Codes (ohne `UNKNOWN`).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[derive(Debug, Deserialize)]
struct TemplateFile {
    #[serde(rename = "DEVICE", default)]
    device: IndexMap<String, GeometryTemplate>,
    #[serde(rename = "SYMBOL", default)]
    symbol: IndexMap<String, GeometryTemplate>,
}

/// Alle Geometrie-Templates der Szene.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateTable {
    pub device: TemplateFamily,
    pub symbol: TemplateFamily,
}

impl Default for TemplateTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateTable {
    /// Eingebaute Templates: Geräte-Fallback sowie die Symbole F, X und V.
    pub fn builtin() -> Self {
        let mut symbol = TemplateFamily::new(unknown_symbol());
        symbol.insert("F", flag_symbol());
        symbol.insert("X", cross_symbol());
        symbol.insert("V", check_symbol());
        Self {
            device: TemplateFamily::new(unknown_device()),
            symbol,
        }
    }

    /// Lädt Templates aus JSON (`{"DEVICE": {...}, "SYMBOL": {...}}`).
    ///
    /// Geladene Einträge ergänzen bzw. ersetzen die eingebauten.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let file: TemplateFile =
            serde_json::from_str(json).context("Template-JSON ungültig")?;
        let mut table = Self::builtin();
        for (family, entries) in [(&mut table.device, file.device), (&mut table.symbol, file.symbol)]
        {
            for (key, template) in entries {
                template
                    .validate()
                    .with_context(|| format!("Template '{key}' fehlerhaft"))?;
                family.insert(&key, template);
            }
        }
        log::info!(
            "{} Geräte- und {} Symbol-Templates geladen",
            table.device.entries.len(),
            table.symbol.entries.len()
        );
        Ok(table)
    }

    /// Lädt Templates aus einer JSON-Datei.
    pub fn load_from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Template-Datei {} nicht lesbar", path.display()))?;
        Self::from_json_str(&json)
    }
}

// ── Eingebaute Templates ────────────────────────────────────────────

fn unit_box(half: f32, height: f32) -> (Vec<[f32; 3]>, Vec<[u32; 3]>) {
    let mut mesh = Mesh::default();
    super::primitives::push_box(
        &mut mesh,
        Vec3::new(-half, 0.0, -half),
        Vec3::new(half, height, half),
        (0.0, 1.0),
        (0.0, 1.0),
    );
    (
        mesh.positions.iter().map(|p| p.to_array()).collect(),
        mesh.faces,
    )
}

fn unknown_device() -> GeometryTemplate {
    GeometryTemplate::from_groups(vec![unit_box(0.5, 1.0)], [1.0, 0.4, 1.0])
}

fn unknown_symbol() -> GeometryTemplate {
    GeometryTemplate::from_groups(vec![unit_box(0.25, 0.5)], unit_scale())
}

fn flag_symbol() -> GeometryTemplate {
    const WB: f32 = 0.2;
    const WT: f32 = 0.07;
    const HM: f32 = 0.1;
    const H: f32 = 1.0;
    const HP: f32 = 1.2;
    const WF: f32 = 1.0;
    const DF: f32 = 0.05;
    const HF: f32 = 0.5;

    let pole = vec![
        [0.0, 0.0, WB],
        [WB, 0.0, 0.0],
        [0.0, 0.0, -WB],
        [-WB, 0.0, 0.0],
        [0.0, HM, WT],
        [WT, HM, 0.0],
        [0.0, HM, -WT],
        [-WT, HM, 0.0],
        [0.0, H, WT],
        [WT, H, 0.0],
        [0.0, H, -WT],
        [-WT, H, 0.0],
        [0.0, HP, 0.0],
    ];
    let pole_faces = vec![
        [0, 2, 1],
        [0, 3, 2],
        [0, 1, 5],
        [0, 5, 4],
        [1, 2, 6],
        [1, 6, 5],
        [2, 3, 7],
        [2, 7, 6],
        [3, 0, 4],
        [3, 4, 7],
        [4, 5, 9],
        [4, 9, 8],
        [5, 6, 10],
        [5, 10, 9],
        [6, 7, 11],
        [6, 11, 10],
        [7, 4, 8],
        [7, 8, 11],
        [8, 9, 12],
        [9, 10, 12],
        [10, 11, 12],
        [11, 8, 12],
    ];
    let cloth = vec![
        [WT, H, DF],
        [WF, H, DF],
        [WF, HF, DF],
        [WT, HF, DF],
        [WT, H, -DF],
        [WF, H, -DF],
        [WF, HF, -DF],
        [WT, HF, -DF],
    ];
    let cloth_faces = vec![
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [1, 2, 6],
        [1, 6, 5],
        [2, 3, 7],
        [2, 7, 6],
        [3, 0, 4],
        [3, 4, 7],
    ];
    GeometryTemplate::from_groups(vec![(pole, pole_faces), (cloth, cloth_faces)], unit_scale())
}

/// Gemeinsame Faces der Balken-Symbole X und V.
fn bar_symbol_faces() -> Vec<[u32; 3]> {
    vec![
        [0, 4, 1],
        [0, 5, 4],
        [2, 6, 3],
        [2, 7, 6],
        [8, 9, 12],
        [8, 12, 13],
        [10, 11, 14],
        [10, 14, 15],
        [0, 9, 8],
        [0, 1, 9],
        [1, 4, 12],
        [1, 12, 9],
        [4, 5, 13],
        [4, 13, 12],
        [5, 0, 8],
        [5, 8, 13],
        [2, 11, 10],
        [2, 3, 11],
        [3, 6, 14],
        [3, 14, 11],
        [6, 7, 15],
        [6, 15, 14],
        [7, 2, 10],
        [7, 10, 15],
    ]
}

/// Front-Outline (z = +0.1) gespiegelt auf die Rückseite (z = -0.1).
fn extrude(outline: [[f32; 2]; 8]) -> Vec<[f32; 3]> {
    [0.1, -0.1]
        .into_iter()
        .flat_map(|z| outline.into_iter().map(move |[x, y]| [x, y, z]))
        .collect()
}

fn cross_symbol() -> GeometryTemplate {
    let vertices = extrude([
        [-0.5, 0.9],
        [-0.4, 1.0],
        [0.4, 1.0],
        [0.5, 0.9],
        [0.5, 0.1],
        [0.4, 0.0],
        [-0.4, 0.0],
        [-0.5, 0.1],
    ]);
    GeometryTemplate::from_groups(vec![(vertices, bar_symbol_faces())], unit_scale())
}

fn check_symbol() -> GeometryTemplate {
    let vertices = extrude([
        [-0.5, 0.6],
        [-0.3, 0.6],
        [0.3, 1.0],
        [0.5, 1.0],
        [0.1, 0.0],
        [-0.1, 0.0],
        [0.1, 0.0],
        [-0.1, 0.0],
    ]);
    GeometryTemplate::from_groups(vec![(vertices, bar_symbol_faces())], unit_scale())
}
