//! Darstellungs- und Domänen-Einstellungen einzelner Entities.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{ChangeKind, Scene};
use crate::core::{
    Axis, BaseSubtype, DeviceConfig, EntityKey, EntityKind, EntityRecord, InterfaceFunction, Layer,
    LinkPhysicalConfig, RouteStyle, TextRecord,
};
use crate::geometry::FLAG_TYPE;
use crate::shared::BASE_MIN_HEIGHT;

/// Änderbare Werte einer Base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseSettings {
    pub name: String,
    pub subtype: BaseSubtype,
    pub color1: u32,
    pub color2: u32,
    pub opacity: Option<f32>,
    pub texture1: String,
    pub texture2: String,
    /// Bodenhöhe (sy)
    pub height: f32,
    pub texture_repeat: Vec2,
}

/// Änderbare Werte einer Kante.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSettings {
    pub routing: RouteStyle,
    pub order: Vec<Axis>,
    pub color: u32,
    pub weight: f32,
    pub height: f32,
}

impl Scene {
    /// Wendet `update` auf den Record an, baut neu auf und führt nach.
    fn restyle<F>(&mut self, layer: Layer, key: EntityKey, update: F) -> bool
    where
        F: FnOnce(&mut EntityRecord) -> bool,
    {
        let Some(node) = self.graph_mut(layer).find_mut(key) else {
            log::debug!("Settings: {} in {:?} nicht gefunden", key, layer);
            return false;
        };
        if !update(&mut node.record) {
            return false;
        }
        self.rebuild(layer, key);
        self.on_entity_mutated(layer, key, ChangeKind::Restyled);
        true
    }

    /// Stil, Texturen und Bodenhöhe einer Base.
    ///
    /// Die Höhe wird wie beim Skalieren auf `BASE_MIN_HEIGHT` begrenzt.
    /// Kinder bleiben auf der Oberfläche, ihre Kanten werden nachgeführt.
    pub fn settings_base(&mut self, layer: Layer, id: u64, settings: BaseSettings) -> bool {
        self.restyle(layer, EntityKey::base(id), |record| {
            let EntityRecord::Base(r) = record else {
                return false;
            };
            r.name = settings.name;
            r.subtype = settings.subtype;
            r.color1 = settings.color1;
            r.color2 = settings.color2;
            r.opacity = settings.opacity;
            r.texture1 = settings.texture1;
            r.texture2 = settings.texture2;
            if settings.height < BASE_MIN_HEIGHT {
                log::trace!("Base {}: Höhe {} auf Minimum begrenzt", id, settings.height);
            }
            r.size.y = settings.height.max(BASE_MIN_HEIGHT);
            r.texture_repeat = settings.texture_repeat;
            true
        })
    }

    /// Name, Farben und Interface-Schema eines Geräts.
    pub fn settings_device(
        &mut self,
        id: u64,
        name: &str,
        color1: u32,
        color2: u32,
        ifnaming: Vec<String>,
    ) -> bool {
        let key = EntityKey::new(EntityKind::Device, id);
        self.restyle(Layer::Physical, key, |record| {
            let EntityRecord::Device(r) = record else {
                return false;
            };
            r.name = name.to_string();
            r.color1 = color1;
            r.color2 = color2;
            r.ifnaming = ifnaming;
            true
        })
    }

    /// Farben einer VRF.
    pub fn settings_vrf(&mut self, id: u64, color1: u32, color2: u32) -> bool {
        let key = EntityKey::new(EntityKind::Vrf, id);
        self.restyle(Layer::Logical, key, |record| {
            let EntityRecord::Vrf(r) = record else {
                return false;
            };
            r.color1 = color1;
            r.color2 = color2;
            true
        })
    }

    /// Benennt eine VRF um; das Label wird neu aufgebaut.
    pub fn rename_vrf(&mut self, id: u64, name: &str) -> bool {
        let key = EntityKey::new(EntityKind::Vrf, id);
        self.restyle(Layer::Logical, key, |record| {
            let EntityRecord::Vrf(r) = record else {
                return false;
            };
            r.name = name.to_string();
            true
        })
    }

    /// Farbe eines L2-Segments.
    pub fn settings_l2segment(&mut self, id: u64, color1: u32) -> bool {
        let key = EntityKey::new(EntityKind::L2Segment, id);
        self.restyle(Layer::Logical, key, |record| {
            let EntityRecord::L2Segment(r) = record else {
                return false;
            };
            r.color1 = color1;
            true
        })
    }

    /// Routing und Darstellung einer Kante.
    pub fn settings_edge(&mut self, layer: Layer, key: EntityKey, settings: EdgeSettings) -> bool {
        self.restyle(layer, key, |record| {
            let Some(r) = record.as_edge_mut() else {
                return false;
            };
            r.routing = settings.routing;
            r.order = settings.order;
            r.linedata.color = settings.color;
            r.linedata.weight = settings.weight;
            r.linedata.height = settings.height;
            true
        })
    }

    /// Inhalt, Stil und Abstand über dem Boden eines Texts.
    ///
    /// Base, X/Z-Position und Rotation bleiben erhalten; `style.placement.position.y`
    /// setzt den Abstand über der Bodenhöhe.
    pub fn settings_text(&mut self, layer: Layer, id: u64, style: &TextRecord) -> bool {
        let key = EntityKey::new(EntityKind::Text, id);
        self.restyle(layer, key, |record| {
            let EntityRecord::Text(r) = record else {
                return false;
            };
            let mut placement = r.placement;
            placement.position.y = style.placement.position.y;
            *r = TextRecord {
                base: r.base,
                placement,
                ..style.clone()
            };
            true
        })
    }

    /// Farben eines Symbols. Nur Flaggen sind einfärbbar.
    pub fn settings_symbol(&mut self, layer: Layer, id: u64, color: u32, flag_color: u32) -> bool {
        let key = EntityKey::new(EntityKind::Symbol, id);
        self.restyle(layer, key, |record| {
            let EntityRecord::Symbol(r) = record else {
                return false;
            };
            if r.symbol_type != FLAG_TYPE {
                log::trace!("Symbol {} vom Typ {} ist nicht einfärbbar", id, r.symbol_type);
                return false;
            }
            r.color = color;
            r.flag_color = flag_color;
            true
        })
    }

    // ── Domänen-Konfiguration (geometrisch ohne Wirkung) ────────────

    /// Ersetzt die Domänen-Konfiguration eines Geräts.
    pub fn configure_device(&mut self, id: u64, config: DeviceConfig) -> bool {
        let key = EntityKey::new(EntityKind::Device, id);
        match self
            .graph_mut(Layer::Physical)
            .find_mut(key)
            .map(|n| &mut n.record)
        {
            Some(EntityRecord::Device(r)) => {
                r.config = config;
                true
            }
            _ => {
                log::debug!("Configure: {} nicht gefunden", key);
                false
            }
        }
    }

    /// Ersetzt die physische Konfiguration eines Links.
    pub fn configure_link(&mut self, id: u64, config: LinkPhysicalConfig) -> bool {
        let key = EntityKey::new(EntityKind::Link, id);
        match self
            .graph_mut(Layer::Physical)
            .find_mut(key)
            .and_then(|n| n.record.as_edge_mut())
        {
            Some(r) => {
                r.phy = Some(config);
                true
            }
            None => {
                log::debug!("Configure: {} nicht gefunden", key);
                false
            }
        }
    }

    /// Setzt die Funktion eines Link-Endpunkts (`end` 0 oder 1).
    pub fn configure_link_endpoint(
        &mut self,
        id: u64,
        end: usize,
        function: InterfaceFunction,
    ) -> bool {
        let key = EntityKey::new(EntityKind::Link, id);
        let Some(r) = self
            .graph_mut(Layer::Physical)
            .find_mut(key)
            .and_then(|n| n.record.as_edge_mut())
        else {
            log::debug!("Configure: {} nicht gefunden", key);
            return false;
        };
        match r.end_functions.get_mut(end) {
            Some(slot) => {
                *slot = function;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::two_devices;
    use super::*;
    use crate::core::{MeshRole, SymbolRecord};
    use approx::assert_relative_eq;
    use glam::Vec3;

    const L20: EntityKey = EntityKey::new(EntityKind::Link, 20);

    #[test]
    fn base_height_reseats_children_and_links() {
        let mut scene = two_devices();
        let settings = BaseSettings {
            name: "rack".into(),
            subtype: BaseSubtype::Solid,
            color1: 0x101010,
            color2: 0x202020,
            opacity: None,
            texture1: "t1".into(),
            texture2: "t2".into(),
            height: 2.0,
            texture_repeat: Vec2::ONE,
        };
        assert!(scene.settings_base(Layer::Physical, 1, settings));
        let d10 = scene
            .world_position(Layer::Physical, EntityKey::new(EntityKind::Device, 10))
            .expect("Position erwartet");
        assert_relative_eq!(d10.y, 2.0);
        let end = scene
            .find(Layer::Physical, L20)
            .and_then(|n| n.render.route.as_ref())
            .and_then(|r| r.end())
            .expect("Pfad erwartet");
        assert_relative_eq!(end.y, 2.25);
    }

    #[test]
    fn base_height_is_clamped_to_minimum() {
        let mut scene = two_devices();
        let settings = BaseSettings {
            name: "flat".into(),
            subtype: BaseSubtype::None,
            color1: 0x101010,
            color2: 0x202020,
            opacity: None,
            texture1: String::new(),
            texture2: String::new(),
            height: -1.0,
            texture_repeat: Vec2::ONE,
        };
        assert!(scene.settings_base(Layer::Physical, 1, settings));
        assert_eq!(
            scene.size(Layer::Physical, EntityKey::base(1)),
            Some(Vec3::new(4.0, BASE_MIN_HEIGHT, 4.0))
        );
        let d10 = scene
            .world_position(Layer::Physical, EntityKey::new(EntityKind::Device, 10))
            .expect("Position erwartet");
        assert_relative_eq!(d10.y, BASE_MIN_HEIGHT);
    }

    #[test]
    fn edge_settings_switch_to_orthogonal() {
        let mut scene = two_devices();
        let settings = EdgeSettings {
            routing: RouteStyle::Orthogonal,
            order: vec![Axis::X],
            color: 0xff0000,
            weight: 0.05,
            height: 0.5,
        };
        assert!(scene.settings_edge(Layer::Physical, L20, settings));
        let node = scene.find(Layer::Physical, L20).expect("Link erwartet");
        let segment = node.render.segments().next().expect("Segment erwartet");
        assert_eq!(segment.material.color, [1.0, 0.0, 0.0]);
        assert_relative_eq!(segment.offset.y, 1.5);
    }

    #[test]
    fn only_flags_take_symbol_colors() {
        let mut scene = two_devices();
        let flag = SymbolRecord { base: 1, ..SymbolRecord::default() };
        let cross = SymbolRecord {
            symbol_type: "X".into(),
            base: 1,
            ..SymbolRecord::default()
        };
        assert!(scene.add_symbol(Layer::Physical, 60, flag, false));
        assert!(scene.add_symbol(Layer::Physical, 61, cross, false));
        assert!(scene.settings_symbol(Layer::Physical, 60, 0x0000ff, 0x00ff00));
        assert!(!scene.settings_symbol(Layer::Physical, 61, 0x0000ff, 0x00ff00));

        let node = scene
            .find(Layer::Physical, EntityKey::new(EntityKind::Symbol, 60))
            .expect("Symbol erwartet");
        let cloth = node.render.group(MeshRole::Secondary).expect("Tuch erwartet");
        assert_eq!(cloth.material.color, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn text_settings_keep_base_and_position() {
        let mut scene = two_devices();
        let record = TextRecord {
            text: "a".into(),
            base: 1,
            placement: crate::core::Placement::at(Vec3::new(1.0, 0.0, 1.0)),
            ..TextRecord::default()
        };
        assert!(scene.add_text(Layer::Physical, 40, record, false));
        let style = TextRecord {
            text: "b\nc".into(),
            height: 0.5,
            placement: crate::core::Placement::at(Vec3::new(9.0, 0.2, 9.0)),
            ..TextRecord::default()
        };
        assert!(scene.settings_text(Layer::Physical, 40, &style));
        let key = EntityKey::new(EntityKind::Text, 40);
        let node = scene.find(Layer::Physical, key).expect("Text erwartet");
        assert_eq!(node.parent(), Some(1));
        assert_eq!(scene.position(Layer::Physical, key), Some(Vec3::new(1.0, 0.2, 1.0)));
    }

    #[test]
    fn configuration_is_stored() {
        let mut scene = two_devices();
        let config = LinkPhysicalConfig {
            lag_name: "po1".into(),
            lacp: true,
            ..LinkPhysicalConfig::default()
        };
        assert!(scene.configure_link(20, config));
        assert!(scene.configure_link_endpoint(
            20,
            1,
            InterfaceFunction::Routing {
                subinterfaces: serde_json::json!([]),
            },
        ));
        assert!(!scene.configure_link_endpoint(20, 2, InterfaceFunction::None));
        assert!(scene.configure_device(10, DeviceConfig::default()));
        assert!(!scene.configure_device(99, DeviceConfig::default()));

        let edge = scene
            .find(Layer::Physical, L20)
            .and_then(|n| n.record.as_edge())
            .expect("Link erwartet");
        assert_eq!(edge.phy.as_ref().map(|p| p.lacp), Some(true));
        assert!(matches!(edge.end_functions[1], InterfaceFunction::Routing { .. }));
    }
}
