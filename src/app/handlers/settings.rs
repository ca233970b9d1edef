//! Handler für Darstellungs- und Domänen-Einstellungen.

use crate::core::{DeviceConfig, EntityKey, InterfaceFunction, Layer, LinkPhysicalConfig, TextRecord};
use crate::scene::{BaseSettings, EdgeSettings, Scene};

/// Stil und Bodenhöhe einer Base.
pub fn base(scene: &mut Scene, layer: Layer, id: u64, settings: BaseSettings) -> bool {
    scene.settings_base(layer, id, settings)
}

/// Name, Farben und Interface-Schema eines Geräts.
pub fn device(scene: &mut Scene, id: u64, name: &str, colors: [u32; 2], ifnaming: Vec<String>) -> bool {
    scene.settings_device(id, name, colors[0], colors[1], ifnaming)
}

/// Farben einer VRF.
pub fn vrf(scene: &mut Scene, id: u64, colors: [u32; 2]) -> bool {
    scene.settings_vrf(id, colors[0], colors[1])
}

/// Neuer Name einer VRF.
pub fn rename_vrf(scene: &mut Scene, id: u64, name: &str) -> bool {
    scene.rename_vrf(id, name)
}

/// Farbe eines L2-Segments.
pub fn l2segment(scene: &mut Scene, id: u64, color1: u32) -> bool {
    scene.settings_l2segment(id, color1)
}

/// Routing und Darstellung einer Kante.
pub fn edge(scene: &mut Scene, layer: Layer, key: EntityKey, settings: EdgeSettings) -> bool {
    scene.settings_edge(layer, key, settings)
}

/// Inhalt und Stil eines Texts.
pub fn text(scene: &mut Scene, layer: Layer, id: u64, style: &TextRecord) -> bool {
    scene.settings_text(layer, id, style)
}

/// Farben eines Symbols.
pub fn symbol(scene: &mut Scene, layer: Layer, id: u64, color: u32, flag_color: u32) -> bool {
    scene.settings_symbol(layer, id, color, flag_color)
}

/// Domänen-Konfiguration eines Geräts.
pub fn configure_device(scene: &mut Scene, id: u64, config: DeviceConfig) -> bool {
    scene.configure_device(id, config)
}

/// Physische Konfiguration eines Links.
pub fn configure_link(scene: &mut Scene, id: u64, config: LinkPhysicalConfig) -> bool {
    scene.configure_link(id, config)
}

/// Funktion eines Link-Endpunkts.
pub fn configure_link_endpoint(
    scene: &mut Scene,
    id: u64,
    end: usize,
    function: InterfaceFunction,
) -> bool {
    scene.configure_link_endpoint(id, end, function)
}
