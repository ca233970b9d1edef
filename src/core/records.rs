//! Deklarative Attribut-Records aller Entity-Typen.
//!
//! Die Records sind die einzige Quelle der Wahrheit für Position, Größe und
//! Styling. Fehlende Felder fallen beim Deserialisieren auf die Standardwerte
//! zurück.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::EntityKind;

/// Standard-Primärfarbe neuer Elemente.
pub const DEFAULT_COLOR1: u32 = 0x888888;
/// Standard-Sekundärfarbe neuer Elemente.
pub const DEFAULT_COLOR2: u32 = 0x444444;
/// Standard-Linkstärke (Radius) in Welteinheiten.
pub const DEFAULT_LINK_WEIGHT: f32 = 0.025;
/// Standard-Höhe eines Links über dem Endpunkt-Ursprung.
pub const DEFAULT_LINK_HEIGHT: f32 = 0.25;
/// Standard-Linkfarbe.
pub const DEFAULT_LINK_COLOR: u32 = 0x888888;

/// Wandelt eine 0xRRGGBB-Farbe in lineare RGB-Anteile (0..1).
pub fn color_to_rgb(color: u32) -> [f32; 3] {
    [
        ((color >> 16) & 0xFF) as f32 / 255.0,
        ((color >> 8) & 0xFF) as f32 / 255.0,
        (color & 0xFF) as f32 / 255.0,
    ]
}

/// Welt-Achse für orthogonales Routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Komponente eines Vektors entlang der Achse.
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// Kopie von `v` mit ersetzter Komponente.
    pub fn with_component(self, v: Vec3, value: f32) -> Vec3 {
        match self {
            Axis::X => Vec3::new(value, v.y, v.z),
            Axis::Y => Vec3::new(v.x, value, v.z),
            Axis::Z => Vec3::new(v.x, v.y, value),
        }
    }
}

/// Routing-Modus einer Kante (0 = frei, 1 = orthogonal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RouteStyle {
    /// Polylinie über die gespeicherten Joint-Punkte
    #[default]
    Free,
    /// Achsenweise Segmente in der Reihenfolge `order`
    Orthogonal,
}

impl TryFrom<u8> for RouteStyle {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RouteStyle::Free),
            1 => Ok(RouteStyle::Orthogonal),
            other => Err(format!("Unbekannter Routing-Typ: {other}")),
        }
    }
}

impl From<RouteStyle> for u8 {
    fn from(style: RouteStyle) -> Self {
        match style {
            RouteStyle::Free => 0,
            RouteStyle::Orthogonal => 1,
        }
    }
}

/// Position und Rotation (Euler-Winkel in Radiant) relativ zum Eltern-Frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Placement {
    /// Placement an einer Position ohne Rotation.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }
}

// ── Base ────────────────────────────────────────────────────────────

/// Bauform einer Base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BaseSubtype {
    /// Nur die Oberfläche, kein Sockel
    #[serde(rename = "n")]
    None,
    /// Schwebende Platte mit 0.1 Dicke
    #[default]
    #[serde(rename = "f")]
    Float,
    /// Schwebende Platte auf vier Säulen
    #[serde(rename = "p")]
    Platform,
    /// Massiver Block bis zum Boden
    #[serde(other)]
    Solid,
}

/// Attribute einer Base (Container/Plattform).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseRecord {
    pub name: String,
    pub subtype: BaseSubtype,
    pub placement: Placement,
    /// Grundfläche (x, z) und Bodenhöhe (y)
    pub size: Vec3,
    pub color1: u32,
    pub color2: u32,
    /// Deckkraft; fehlend oder 0 bedeutet 1
    pub opacity: Option<f32>,
    /// Texturname der Oberfläche (ohne Endung)
    pub texture1: String,
    /// Texturname des Sockels (ohne Endung)
    pub texture2: String,
    /// Textur-Wiederholung pro Welteinheit (x, z)
    pub texture_repeat: Vec2,
}

impl Default for BaseRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            subtype: BaseSubtype::default(),
            placement: Placement::default(),
            size: Vec3::new(4.0, 1.0, 4.0),
            color1: DEFAULT_COLOR1,
            color2: DEFAULT_COLOR2,
            opacity: None,
            texture1: "b1-t1".to_string(),
            texture2: "b1-t2".to_string(),
            texture_repeat: Vec2::ONE,
        }
    }
}

impl BaseRecord {
    /// Effektive Deckkraft.
    pub fn effective_opacity(&self) -> f32 {
        self.opacity.filter(|o| *o > 0.0).unwrap_or(1.0)
    }
}

// ── Device / Vrf ────────────────────────────────────────────────────

/// Domänen-Konfiguration eines Geräts (für die Geometrie opak).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub vlans: serde_json::Value,
    pub vrfs: serde_json::Value,
    pub svis: serde_json::Value,
    pub los: serde_json::Value,
}

/// Attribute eines Geräts (physisch) oder einer VRF (logisch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceRecord {
    pub name: String,
    /// Visueller Typ-Code, wählt das Geometrie-Template
    pub device_type: String,
    /// ID der besitzenden Base
    pub base: u64,
    pub placement: Placement,
    pub size: Vec3,
    pub color1: u32,
    pub color2: u32,
    /// Interface-Namensschema des Geräts
    pub ifnaming: Vec<String>,
    pub config: DeviceConfig,
}

impl Default for DeviceRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            device_type: "S".to_string(),
            base: 0,
            placement: Placement::default(),
            size: Vec3::ONE,
            color1: DEFAULT_COLOR1,
            color2: DEFAULT_COLOR2,
            ifnaming: Vec::new(),
            config: DeviceConfig::default(),
        }
    }
}

// ── L2-Segment ──────────────────────────────────────────────────────

/// Attribute eines L2-Segments (Broadcast-Domäne).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct L2SegmentRecord {
    pub name: String,
    pub base: u64,
    pub placement: Placement,
    pub size: Vec3,
    pub color1: u32,
}

impl Default for L2SegmentRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            base: 0,
            placement: Placement::default(),
            size: Vec3::ONE,
            color1: DEFAULT_COLOR1,
        }
    }
}

// ── Text ────────────────────────────────────────────────────────────

/// Horizontale Ausrichtung einer Textzeile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    #[serde(rename = "l")]
    Left,
    #[serde(rename = "c")]
    Center,
    #[serde(rename = "r")]
    Right,
}

/// Form des Texthintergrunds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackgroundShape {
    #[default]
    #[serde(rename = "n")]
    None,
    #[serde(rename = "r")]
    Rectangle,
    /// Ellipse über 32 Punkte
    #[serde(rename = "c")]
    Circle,
    /// Raute um die Textmitte
    #[serde(rename = "h")]
    Hexagon,
    /// Parallelogramm
    #[serde(rename = "p")]
    Pentagon,
}

/// Attribute eines Text-Labels auf einer Base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRecord {
    pub text: String,
    pub base: u64,
    /// `position.y` ist der Abstand über der Bodenhöhe der Base
    pub placement: Placement,
    pub height: f32,
    pub color: u32,
    pub align: TextAlign,
    pub bg_shape: BackgroundShape,
    pub bg_show: bool,
    pub bg_color: u32,
    pub border_show: bool,
    pub border_color: u32,
    pub border_width: f32,
    pub bg_depth: f32,
    /// Neigung jeder Zeile um X in Grad
    pub rotation_x: f32,
}

impl Default for TextRecord {
    fn default() -> Self {
        Self {
            text: String::new(),
            base: 0,
            placement: Placement::default(),
            height: 0.3,
            color: 0x000000,
            align: TextAlign::Left,
            bg_shape: BackgroundShape::None,
            bg_show: false,
            bg_color: 0xffffff,
            border_show: false,
            border_color: 0x000000,
            border_width: 0.1,
            bg_depth: 0.1,
            rotation_x: 0.0,
        }
    }
}

// ── Symbol ──────────────────────────────────────────────────────────

/// Attribute eines dekorativen Symbols (Flagge, X, V).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolRecord {
    /// Typ-Code, wählt das Symbol-Template
    pub symbol_type: String,
    pub base: u64,
    pub placement: Placement,
    pub size: Vec3,
    pub color: u32,
    /// Farbe des Flaggentuchs (nur Typ "F")
    pub flag_color: u32,
}

impl Default for SymbolRecord {
    fn default() -> Self {
        Self {
            symbol_type: "F".to_string(),
            base: 0,
            placement: Placement::default(),
            size: Vec3::ONE,
            color: DEFAULT_COLOR1,
            flag_color: 0xcc0000,
        }
    }
}

// ── Kanten ──────────────────────────────────────────────────────────

/// Darstellungsdaten einer Kante.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineData {
    pub color: u32,
    /// Radius von Segment-Zylindern und Joint-Kugeln
    pub weight: f32,
    /// Vertikaler Versatz über dem Endpunkt-Ursprung
    pub height: f32,
    /// Joint-Punkte in Weltkoordinaten (nur freies Routing)
    pub points: Vec<Vec3>,
}

impl Default for LineData {
    fn default() -> Self {
        Self {
            color: DEFAULT_LINK_COLOR,
            weight: DEFAULT_LINK_WEIGHT,
            height: DEFAULT_LINK_HEIGHT,
            points: Vec::new(),
        }
    }
}

/// Physische Konfiguration eines Links.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkPhysicalConfig {
    pub ifbindings: serde_json::Value,
    pub lag_name: String,
    pub lacp: bool,
    pub transceiver: String,
}

/// Funktion eines Link-Endpunkts auf dem jeweiligen Gerät.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "lowercase")]
pub enum InterfaceFunction {
    #[default]
    None,
    Switching {
        vlans: serde_json::Value,
        native_vlan: serde_json::Value,
    },
    Routing {
        subinterfaces: serde_json::Value,
    },
}

/// Attribute aller Kanten-Typen (Link, L2Link, Interfaces).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeRecord {
    /// IDs der beiden Endpunkte; Typen ergeben sich aus dem Kanten-Typ
    pub ends: [u64; 2],
    pub routing: RouteStyle,
    /// Achsen-Reihenfolge für orthogonales Routing
    pub order: Vec<Axis>,
    pub linedata: LineData,
    /// Nur für physische Links
    pub phy: Option<LinkPhysicalConfig>,
    /// Endpunkt-Funktionen (nur für physische Links relevant)
    pub end_functions: [InterfaceFunction; 2],
}

impl EdgeRecord {
    /// Kante zwischen zwei Endpunkten mit Standard-Darstellung.
    pub fn between(a: u64, b: u64) -> Self {
        Self {
            ends: [a, b],
            ..Self::default()
        }
    }

    /// Setzt orthogonales Routing mit der gegebenen Achsen-Reihenfolge.
    pub fn orthogonal(mut self, order: &[Axis]) -> Self {
        self.routing = RouteStyle::Orthogonal;
        self.order = order.to_vec();
        self
    }
}

/// Attribute eines freistehenden Debug-Segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineRecord {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
    pub color: u32,
}

impl Default for LineRecord {
    fn default() -> Self {
        Self {
            start: Vec3::ZERO,
            end: Vec3::X,
            radius: DEFAULT_LINK_WEIGHT,
            color: 0x000000,
        }
    }
}

// ── Tagged Record ───────────────────────────────────────────────────

/// Record einer Entity, getaggt nach Typ.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityRecord {
    Base(BaseRecord),
    Device(DeviceRecord),
    Vrf(DeviceRecord),
    L2Segment(L2SegmentRecord),
    /// Gemeinsamer Record aller fünf Kanten-Typen
    Edge(EdgeRecord),
    Text(TextRecord),
    Symbol(SymbolRecord),
    Line(LineRecord),
}

impl EntityRecord {
    /// Prüft, ob der Record zum Typ-Tag passt.
    pub fn matches_kind(&self, kind: EntityKind) -> bool {
        match self {
            EntityRecord::Base(_) => kind == EntityKind::Base,
            EntityRecord::Device(_) => kind == EntityKind::Device,
            EntityRecord::Vrf(_) => kind == EntityKind::Vrf,
            EntityRecord::L2Segment(_) => kind == EntityKind::L2Segment,
            EntityRecord::Edge(_) => kind.is_edge(),
            EntityRecord::Text(_) => kind == EntityKind::Text,
            EntityRecord::Symbol(_) => kind == EntityKind::Symbol,
            EntityRecord::Line(_) => kind == EntityKind::Line,
        }
    }

    /// Placement relativ zum Eltern-Frame, sofern die Entity eines hat.
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            EntityRecord::Base(r) => Some(&r.placement),
            EntityRecord::Device(r) | EntityRecord::Vrf(r) => Some(&r.placement),
            EntityRecord::L2Segment(r) => Some(&r.placement),
            EntityRecord::Text(r) => Some(&r.placement),
            EntityRecord::Symbol(r) => Some(&r.placement),
            EntityRecord::Edge(_) | EntityRecord::Line(_) => None,
        }
    }

    /// Veränderbares Placement.
    pub fn placement_mut(&mut self) -> Option<&mut Placement> {
        match self {
            EntityRecord::Base(r) => Some(&mut r.placement),
            EntityRecord::Device(r) | EntityRecord::Vrf(r) => Some(&mut r.placement),
            EntityRecord::L2Segment(r) => Some(&mut r.placement),
            EntityRecord::Text(r) => Some(&mut r.placement),
            EntityRecord::Symbol(r) => Some(&mut r.placement),
            EntityRecord::Edge(_) | EntityRecord::Line(_) => None,
        }
    }

    /// Größe (sx, sy, sz), sofern die Entity eine hat.
    pub fn size(&self) -> Option<Vec3> {
        match self {
            EntityRecord::Base(r) => Some(r.size),
            EntityRecord::Device(r) | EntityRecord::Vrf(r) => Some(r.size),
            EntityRecord::L2Segment(r) => Some(r.size),
            EntityRecord::Symbol(r) => Some(r.size),
            EntityRecord::Text(_) | EntityRecord::Edge(_) | EntityRecord::Line(_) => None,
        }
    }

    /// Veränderbare Größe.
    pub fn size_mut(&mut self) -> Option<&mut Vec3> {
        match self {
            EntityRecord::Base(r) => Some(&mut r.size),
            EntityRecord::Device(r) | EntityRecord::Vrf(r) => Some(&mut r.size),
            EntityRecord::L2Segment(r) => Some(&mut r.size),
            EntityRecord::Symbol(r) => Some(&mut r.size),
            EntityRecord::Text(_) | EntityRecord::Edge(_) | EntityRecord::Line(_) => None,
        }
    }

    /// ID der besitzenden Base.
    pub fn base_id(&self) -> Option<u64> {
        match self {
            EntityRecord::Device(r) | EntityRecord::Vrf(r) => Some(r.base),
            EntityRecord::L2Segment(r) => Some(r.base),
            EntityRecord::Text(r) => Some(r.base),
            EntityRecord::Symbol(r) => Some(r.base),
            EntityRecord::Base(_) | EntityRecord::Edge(_) | EntityRecord::Line(_) => None,
        }
    }

    /// Setzt die besitzende Base. Gibt `false` zurück für nicht besessene Typen.
    pub(crate) fn set_base_id(&mut self, base: u64) -> bool {
        match self {
            EntityRecord::Device(r) | EntityRecord::Vrf(r) => r.base = base,
            EntityRecord::L2Segment(r) => r.base = base,
            EntityRecord::Text(r) => r.base = base,
            EntityRecord::Symbol(r) => r.base = base,
            EntityRecord::Base(_) | EntityRecord::Edge(_) | EntityRecord::Line(_) => return false,
        }
        true
    }

    /// Anzeigename für Namens-Labels.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            EntityRecord::Device(r) | EntityRecord::Vrf(r) => Some(&r.name),
            EntityRecord::L2Segment(r) => Some(&r.name),
            EntityRecord::Base(r) => Some(&r.name),
            _ => None,
        }
    }

    /// Kanten-Record, falls vorhanden.
    pub fn as_edge(&self) -> Option<&EdgeRecord> {
        match self {
            EntityRecord::Edge(r) => Some(r),
            _ => None,
        }
    }

    /// Veränderbarer Kanten-Record.
    pub fn as_edge_mut(&mut self) -> Option<&mut EdgeRecord> {
        match self {
            EntityRecord::Edge(r) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_style_uses_numeric_codes() {
        let record: EdgeRecord =
            serde_json::from_str(r#"{"ends":[1,2],"routing":1,"order":["X","Z"]}"#)
                .expect("Kanten-Record erwartet");
        assert_eq!(record.routing, RouteStyle::Orthogonal);
        assert_eq!(record.order, vec![Axis::X, Axis::Z]);
        assert_eq!(record.linedata.weight, DEFAULT_LINK_WEIGHT);

        let json = serde_json::to_string(&record).expect("Serialisierung erwartet");
        assert!(json.contains("\"routing\":1"));
        assert!(serde_json::from_str::<EdgeRecord>(r#"{"routing":7}"#).is_err());
    }

    #[test]
    fn unknown_base_subtype_falls_back_to_solid() {
        let record: BaseRecord =
            serde_json::from_str(r#"{"subtype":"x"}"#).expect("Base-Record erwartet");
        assert_eq!(record.subtype, BaseSubtype::Solid);
        let record: BaseRecord =
            serde_json::from_str(r#"{"subtype":"p"}"#).expect("Base-Record erwartet");
        assert_eq!(record.subtype, BaseSubtype::Platform);
    }

    #[test]
    fn missing_or_zero_opacity_means_opaque() {
        let mut record = BaseRecord::default();
        assert_eq!(record.effective_opacity(), 1.0);
        record.opacity = Some(0.0);
        assert_eq!(record.effective_opacity(), 1.0);
        record.opacity = Some(0.4);
        assert_eq!(record.effective_opacity(), 0.4);
    }

    #[test]
    fn interface_function_tagged_by_name() {
        let function: InterfaceFunction =
            serde_json::from_str(r#"{"function":"switching","vlans":[10,20],"native_vlan":10}"#)
                .expect("Funktion erwartet");
        assert!(matches!(function, InterfaceFunction::Switching { .. }));
    }

    #[test]
    fn color_conversion_splits_channels() {
        assert_eq!(color_to_rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(color_to_rgb(0x00ff00), [0.0, 1.0, 0.0]);
        assert_eq!(color_to_rgb(0x000000), [0.0, 0.0, 0.0]);
    }
}
