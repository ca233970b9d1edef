//! Zentrale Konfiguration der Diagramm-Szene.
//!
//! `SceneSettings` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{BackgroundShape, LineData, TextAlign, TextRecord};
use crate::core::{DEFAULT_COLOR1, DEFAULT_COLOR2, DEFAULT_LINK_COLOR};
use crate::core::{DEFAULT_LINK_HEIGHT, DEFAULT_LINK_WEIGHT};

// ── Raster ──────────────────────────────────────────────────────────

/// Rasterweite in X (Welteinheiten).
pub const GRID_STEP_X: f32 = 0.5;
/// Rasterweite in Z (Welteinheiten).
pub const GRID_STEP_Z: f32 = 0.5;
/// Winkelraster in Grad.
pub const GRID_ANGLE_DEG: f32 = 15.0;
/// Größenraster für Resize-Operationen.
pub const GRID_RESIZE_STEP: f32 = 0.25;

// ── Größen-Untergrenzen ─────────────────────────────────────────────

/// Kleinste Kantenlänge von Geräten, VRFs, Segmenten und Symbolen.
pub const MIN_ENTITY_SIZE: f32 = 0.1;
/// Kleinste Grundfläche einer Base in X und Z.
pub const BASE_MIN_FOOTPRINT: f32 = 1.0;
/// Kleinste Bodenhöhe einer Base.
pub const BASE_MIN_HEIGHT: f32 = 0.5;

// ── Namens-Labels ───────────────────────────────────────────────────

/// Schriftgröße der Geräte- und VRF-Namen.
pub const NAME_LABEL_SIZE: f32 = 0.3;
/// Schriftgröße der L2-Segment-Namen.
pub const SEGMENT_LABEL_SIZE: f32 = 0.2;
/// Abstand des Labels über der höchsten Geometrie.
pub const NAME_LABEL_CLEARANCE: f32 = 0.5;

// ── Darstellung ─────────────────────────────────────────────────────

/// Standard-Hintergrundfarbe des Viewports.
pub const BACKGROUND_COLOR: u32 = 0xf0f0f0;

/// Raster-Einstellungen für Verschieben, Rotieren und Skalieren.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub active: bool,
    pub x: f32,
    pub z: f32,
    /// Winkelraster in Grad
    pub angle: f32,
    pub resize: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            active: true,
            x: GRID_STEP_X,
            z: GRID_STEP_Z,
            angle: GRID_ANGLE_DEG,
            resize: GRID_RESIZE_STEP,
        }
    }
}

fn snap(value: f32, step: f32) -> f32 {
    if step <= 0.0 {
        return value;
    }
    (value / step).round() * step
}

impl GridSettings {
    /// Richtet X und Z am Raster aus (Y bleibt frei).
    pub fn align_position(&self, position: Vec3, align: bool) -> Vec3 {
        if !(align && self.active) {
            return position;
        }
        Vec3::new(snap(position.x, self.x), position.y, snap(position.z, self.z))
    }

    /// Rundet einen Winkel (Radiant) auf das Winkelraster.
    pub fn align_angle(&self, angle: f32, align: bool) -> f32 {
        if !(align && self.active) {
            return angle;
        }
        snap(angle, self.angle.to_radians())
    }

    /// Rundet eine Kantenlänge auf das Größenraster.
    pub fn align_size(&self, size: f32, align: bool) -> f32 {
        if !(align && self.active) {
            return size;
        }
        snap(size, self.resize)
    }
}

/// Format-Vorgaben für neu angelegte Elemente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatDefaults {
    pub color1: u32,
    pub color2: u32,
    pub scale: f32,
    pub link_weight: f32,
    pub link_height: f32,
    pub link_color: u32,
    pub text_color: u32,
    pub text_height: f32,
    pub text_align: TextAlign,
    pub text_bg_shape: BackgroundShape,
    pub text_bg_show: bool,
    pub text_bg_color: u32,
    pub text_border_show: bool,
    pub text_border_color: u32,
    pub text_border_width: f32,
    pub text_bg_depth: f32,
    pub text_rotation_x: f32,
}

impl Default for FormatDefaults {
    fn default() -> Self {
        Self {
            color1: DEFAULT_COLOR1,
            color2: DEFAULT_COLOR2,
            scale: 1.0,
            link_weight: DEFAULT_LINK_WEIGHT,
            link_height: DEFAULT_LINK_HEIGHT,
            link_color: DEFAULT_LINK_COLOR,
            text_color: 0x000000,
            text_height: 0.3,
            text_align: TextAlign::Left,
            text_bg_shape: BackgroundShape::None,
            text_bg_show: false,
            text_bg_color: 0xffffff,
            text_border_show: false,
            text_border_color: 0x000000,
            text_border_width: 0.1,
            text_bg_depth: 0.1,
            text_rotation_x: 0.0,
        }
    }
}

impl FormatDefaults {
    /// Darstellungsdaten für eine neue Kante.
    pub fn line_data(&self) -> LineData {
        LineData {
            color: self.link_color,
            weight: self.link_weight,
            height: self.link_height,
            points: Vec::new(),
        }
    }

    /// Text-Record mit den Format-Vorgaben auf der angegebenen Base.
    pub fn text_record(&self, text: &str, base: u64) -> TextRecord {
        TextRecord {
            text: text.to_string(),
            base,
            height: self.text_height,
            color: self.text_color,
            align: self.text_align,
            bg_shape: self.text_bg_shape,
            bg_show: self.text_bg_show,
            bg_color: self.text_bg_color,
            border_show: self.text_border_show,
            border_color: self.text_border_color,
            border_width: self.text_border_width,
            bg_depth: self.text_bg_depth,
            rotation_x: self.text_rotation_x,
            ..TextRecord::default()
        }
    }
}

/// Reichweite der Kanten-Bereinigung beim Löschen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePruning {
    /// Nur physische Links gelöschter Geräte entfernen; logische Kanten bleiben
    /// stehen und werden über `Scene::dangling_edges` gemeldet
    #[default]
    PhysicalLinks,
    /// Jede Kante entfernen, deren Endpunkt gelöscht wurde
    AllIncident,
}

/// Optionen des Routings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingOptions {
    /// Nach der Achsen-Reihenfolge ein Abschluss-Segment zum Ziel ziehen,
    /// wenn nicht gelistete Achsen noch abweichen (Standard). Aus:
    /// Abweichungen in nicht gelisteten Achsen bleiben offen
    pub catch_up_unlisted_axes: bool,
}

impl Default for RoutingOptions {
    fn default() -> Self {
        Self {
            catch_up_unlisted_axes: true,
        }
    }
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Szenen-Optionen.
/// Wird als `netdiagram3d.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSettings {
    /// Namens-Labels von Geräten, VRFs und Segmenten anzeigen
    #[serde(default = "default_show_device_name")]
    pub show_device_name: bool,
    /// Hintergrundfarbe (0xRRGGBB)
    #[serde(default = "default_background_color")]
    pub background_color: u32,
    #[serde(default)]
    pub edge_pruning: EdgePruning,
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub format: FormatDefaults,
    #[serde(default)]
    pub routing: RoutingOptions,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            show_device_name: default_show_device_name(),
            background_color: default_background_color(),
            edge_pruning: EdgePruning::default(),
            grid: GridSettings::default(),
            format: FormatDefaults::default(),
            routing: RoutingOptions::default(),
        }
    }
}

fn default_show_device_name() -> bool {
    true
}

fn default_background_color() -> u32 {
    BACKGROUND_COLOR
}

impl SceneSettings {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler → Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Pfad der Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("netdiagram3d"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("netdiagram3d.toml")
    }
}
