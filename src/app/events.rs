//! `SceneCommand`: serialisierbare Mutationen und View-Befehle eines Hosts.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{
    BaseRecord, DeviceConfig, DeviceRecord, EdgeRecord, EntityKey, EntityKind, InterfaceFunction,
    L2SegmentRecord, Layer, LineRecord, LinkPhysicalConfig, SymbolRecord, TextRecord,
};
use crate::scene::{BaseSettings, EdgeSettings};
use crate::shared::{FormatDefaults, GridSettings};

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
///
/// Als JSON mit dem Feld `op` getaggt, z.B.
/// `{"op":"delete","layer":"Physical","key":{"kind":"Device","id":3}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SceneCommand {
    // === Anlegen ===
    AddBase {
        layer: Layer,
        id: u64,
        record: BaseRecord,
    },
    AddDevice {
        id: u64,
        record: DeviceRecord,
        #[serde(default)]
        align: bool,
    },
    AddVrf {
        id: u64,
        record: DeviceRecord,
        #[serde(default)]
        align: bool,
    },
    AddL2Segment {
        id: u64,
        record: L2SegmentRecord,
        #[serde(default)]
        align: bool,
    },
    AddText {
        layer: Layer,
        id: u64,
        record: TextRecord,
        #[serde(default)]
        align: bool,
    },
    AddSymbol {
        layer: Layer,
        id: u64,
        record: SymbolRecord,
        #[serde(default)]
        align: bool,
    },
    AddEdge {
        layer: Layer,
        kind: EntityKind,
        id: u64,
        record: EdgeRecord,
    },
    AddLine {
        layer: Layer,
        id: u64,
        record: LineRecord,
    },

    // === Transformation ===
    /// Lokale Position setzen, optional mit Basiswechsel
    Move {
        layer: Layer,
        key: EntityKey,
        position: Vec3,
        #[serde(default)]
        base: Option<u64>,
        #[serde(default)]
        align: bool,
    },
    Rotate {
        layer: Layer,
        key: EntityKey,
        rotation: Vec3,
        #[serde(default)]
        align: bool,
    },
    Resize {
        layer: Layer,
        key: EntityKey,
        size: Vec3,
        #[serde(default)]
        align: bool,
    },
    /// Umhängen; ohne `world` bleibt die Weltlage erhalten
    Reparent {
        layer: Layer,
        key: EntityKey,
        base: u64,
        #[serde(default)]
        world: Option<Vec3>,
    },
    Delete {
        layer: Layer,
        key: EntityKey,
    },

    // === Kanten ===
    AddJoint {
        layer: Layer,
        edge: EntityKey,
        index: usize,
        point: Vec3,
    },
    DeleteJoint {
        layer: Layer,
        edge: EntityKey,
        index: usize,
    },
    ReconnectEdge {
        layer: Layer,
        edge: EntityKey,
        ends: [u64; 2],
    },
    /// Kantenende an den nächsten passenden Endpunkt im Radius hängen
    SnapEdgeEnd {
        layer: Layer,
        edge: EntityKey,
        end: usize,
        point: Vec3,
        radius: f32,
    },

    // === Darstellung ===
    SettingsBase {
        layer: Layer,
        id: u64,
        settings: BaseSettings,
    },
    SettingsDevice {
        id: u64,
        name: String,
        color1: u32,
        color2: u32,
        #[serde(default)]
        ifnaming: Vec<String>,
    },
    SettingsVrf {
        id: u64,
        color1: u32,
        color2: u32,
    },
    RenameVrf {
        id: u64,
        name: String,
    },
    SettingsL2Segment {
        id: u64,
        color1: u32,
    },
    SettingsEdge {
        layer: Layer,
        key: EntityKey,
        settings: EdgeSettings,
    },
    SettingsText {
        layer: Layer,
        id: u64,
        style: TextRecord,
    },
    SettingsSymbol {
        layer: Layer,
        id: u64,
        color: u32,
        flag_color: u32,
    },

    // === Domänen-Konfiguration ===
    ConfigureDevice {
        id: u64,
        config: DeviceConfig,
    },
    ConfigureLink {
        id: u64,
        config: LinkPhysicalConfig,
    },
    ConfigureLinkEndpoint {
        id: u64,
        end: usize,
        function: InterfaceFunction,
    },

    // === Kamera & Viewport ===
    SetCamera {
        position: Vec3,
        rotation: Vec3,
    },
    MoveCamera {
        dx: f32,
        dy: f32,
    },
    RotateCamera {
        dx: f32,
        dy: f32,
    },
    ZoomCamera {
        dy: f32,
    },
    ToggleProjection,
    SetView {
        view: Layer,
    },
    ResizeViewport {
        width: f32,
        height: f32,
        #[serde(default)]
        offset_left: f32,
        #[serde(default)]
        offset_top: f32,
    },

    // === Szenen-Optionen ===
    SetBackgroundColor {
        color: u32,
    },
    SetGrid {
        grid: GridSettings,
    },
    SetShowDeviceName {
        show: bool,
    },
    SetFormat {
        format: FormatDefaults,
    },
}

impl SceneCommand {
    /// Gibt `true` zurück für Commands, die nur Kamera oder Viewport betreffen.
    pub fn is_view_only(&self) -> bool {
        matches!(
            self,
            SceneCommand::SetCamera { .. }
                | SceneCommand::MoveCamera { .. }
                | SceneCommand::RotateCamera { .. }
                | SceneCommand::ZoomCamera { .. }
                | SceneCommand::ToggleProjection
                | SceneCommand::SetView { .. }
                | SceneCommand::ResizeViewport { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_tagged_by_op() {
        let command: SceneCommand = serde_json::from_str(
            r#"{"op":"move","layer":"Physical","key":{"kind":"Device","id":3},"position":[1.0,0.0,2.0]}"#,
        )
        .expect("Command erwartet");
        assert_eq!(
            command,
            SceneCommand::Move {
                layer: Layer::Physical,
                key: EntityKey::new(EntityKind::Device, 3),
                position: Vec3::new(1.0, 0.0, 2.0),
                base: None,
                align: false,
            }
        );
        assert!(!command.is_view_only());

        let toggle: SceneCommand =
            serde_json::from_str(r#"{"op":"toggle_projection"}"#).expect("Command erwartet");
        assert!(toggle.is_view_only());
    }

    #[test]
    fn snap_command_parses() {
        let command: SceneCommand = serde_json::from_str(
            r#"{"op":"snap_edge_end","layer":"Physical","edge":{"kind":"Link","id":20},"end":1,"point":[0.0,1.0,2.0],"radius":0.5}"#,
        )
        .expect("Command erwartet");
        assert!(matches!(command, SceneCommand::SnapEdgeEnd { end: 1, .. }));
        assert!(!command.is_view_only());
    }

    #[test]
    fn records_use_defaults_for_missing_fields() {
        let command: SceneCommand = serde_json::from_str(
            r#"{"op":"add_device","id":1,"record":{"name":"sw1","base":2}}"#,
        )
        .expect("Command erwartet");
        let SceneCommand::AddDevice { record, align, .. } = command else {
            panic!("AddDevice erwartet");
        };
        assert_eq!(record.device_type, "S");
        assert!(!align);
    }
}
