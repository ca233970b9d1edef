//! Scene Controller für zentrale Command-Verarbeitung.

use super::{CommandLog, SceneCommand};
use crate::core::{EntityKey, EntityKind, EntityRecord, Layer};
use crate::scene::Scene;

/// Führt SceneCommands auf einer Szene aus und protokolliert Mutationen.
#[derive(Default)]
pub struct SceneController {
    scene: Scene,
    log: CommandLog,
}

impl SceneController {
    /// Erstellt einen Controller um eine bestehende Szene.
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            log: CommandLog::new(),
        }
    }

    /// Read-only Zugriff auf die Szene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Direkter Zugriff für Abfragen mit Seiteneffekten (Picking, Frames).
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Log aller ausgeführten Mutationen.
    pub fn log(&self) -> &CommandLog {
        &self.log
    }

    /// Parst einen JSON-Command und führt ihn aus.
    pub fn handle_json(&mut self, json: &str) -> anyhow::Result<bool> {
        let command: SceneCommand = serde_json::from_str(json)?;
        Ok(self.handle_command(command))
    }

    /// Führt einen Command aus. Dispatcht an Feature-Handler in `handlers/`.
    ///
    /// Gibt `false` zurück, wenn der Command nichts verändert hat (z.B.
    /// unbekannte Entity). Kamera- und Viewport-Commands werden nicht geloggt.
    pub fn handle_command(&mut self, command: SceneCommand) -> bool {
        if !command.is_view_only() {
            self.log.record(&command);
        }
        use super::handlers;
        let scene = &mut self.scene;

        match command {
            // === Anlegen ===
            SceneCommand::AddBase { layer, id, record } => handlers::editing::add(
                scene,
                layer,
                EntityKey::base(id),
                EntityRecord::Base(record),
                false,
            ),
            SceneCommand::AddDevice { id, record, align } => handlers::editing::add(
                scene,
                Layer::Physical,
                EntityKey::new(EntityKind::Device, id),
                EntityRecord::Device(record),
                align,
            ),
            SceneCommand::AddVrf { id, record, align } => handlers::editing::add(
                scene,
                Layer::Logical,
                EntityKey::new(EntityKind::Vrf, id),
                EntityRecord::Vrf(record),
                align,
            ),
            SceneCommand::AddL2Segment { id, record, align } => handlers::editing::add(
                scene,
                Layer::Logical,
                EntityKey::new(EntityKind::L2Segment, id),
                EntityRecord::L2Segment(record),
                align,
            ),
            SceneCommand::AddText {
                layer,
                id,
                record,
                align,
            } => handlers::editing::add(
                scene,
                layer,
                EntityKey::new(EntityKind::Text, id),
                EntityRecord::Text(record),
                align,
            ),
            SceneCommand::AddSymbol {
                layer,
                id,
                record,
                align,
            } => handlers::editing::add(
                scene,
                layer,
                EntityKey::new(EntityKind::Symbol, id),
                EntityRecord::Symbol(record),
                align,
            ),
            SceneCommand::AddEdge {
                layer,
                kind,
                id,
                record,
            } => handlers::editing::add_edge(scene, layer, kind, id, record),
            SceneCommand::AddLine { layer, id, record } => handlers::editing::add(
                scene,
                layer,
                EntityKey::new(EntityKind::Line, id),
                EntityRecord::Line(record),
                false,
            ),

            // === Transformation ===
            SceneCommand::Move {
                layer,
                key,
                position,
                base,
                align,
            } => handlers::editing::move_entity(scene, layer, key, position, base, align),
            SceneCommand::Rotate {
                layer,
                key,
                rotation,
                align,
            } => handlers::editing::rotate(scene, layer, key, rotation, align),
            SceneCommand::Resize {
                layer,
                key,
                size,
                align,
            } => handlers::editing::resize(scene, layer, key, size, align),
            SceneCommand::Reparent {
                layer,
                key,
                base,
                world,
            } => handlers::editing::reparent(scene, layer, key, base, world),
            SceneCommand::Delete { layer, key } => handlers::editing::delete(scene, layer, key),

            // === Kanten ===
            SceneCommand::AddJoint {
                layer,
                edge,
                index,
                point,
            } => handlers::editing::add_joint(scene, layer, edge, index, point),
            SceneCommand::DeleteJoint { layer, edge, index } => {
                handlers::editing::delete_joint(scene, layer, edge, index)
            }
            SceneCommand::ReconnectEdge { layer, edge, ends } => {
                handlers::editing::reconnect(scene, layer, edge, ends)
            }
            SceneCommand::SnapEdgeEnd {
                layer,
                edge,
                end,
                point,
                radius,
            } => handlers::editing::snap_edge_end(scene, layer, edge, end, point, radius),

            // === Darstellung ===
            SceneCommand::SettingsBase {
                layer,
                id,
                settings,
            } => handlers::settings::base(scene, layer, id, settings),
            SceneCommand::SettingsDevice {
                id,
                name,
                color1,
                color2,
                ifnaming,
            } => handlers::settings::device(scene, id, &name, [color1, color2], ifnaming),
            SceneCommand::SettingsVrf { id, color1, color2 } => {
                handlers::settings::vrf(scene, id, [color1, color2])
            }
            SceneCommand::RenameVrf { id, name } => handlers::settings::rename_vrf(scene, id, &name),
            SceneCommand::SettingsL2Segment { id, color1 } => {
                handlers::settings::l2segment(scene, id, color1)
            }
            SceneCommand::SettingsEdge {
                layer,
                key,
                settings,
            } => handlers::settings::edge(scene, layer, key, settings),
            SceneCommand::SettingsText { layer, id, style } => {
                handlers::settings::text(scene, layer, id, &style)
            }
            SceneCommand::SettingsSymbol {
                layer,
                id,
                color,
                flag_color,
            } => handlers::settings::symbol(scene, layer, id, color, flag_color),

            // === Domänen-Konfiguration ===
            SceneCommand::ConfigureDevice { id, config } => {
                handlers::settings::configure_device(scene, id, config)
            }
            SceneCommand::ConfigureLink { id, config } => {
                handlers::settings::configure_link(scene, id, config)
            }
            SceneCommand::ConfigureLinkEndpoint { id, end, function } => {
                handlers::settings::configure_link_endpoint(scene, id, end, function)
            }

            // === Kamera & Viewport ===
            SceneCommand::SetCamera { position, rotation } => {
                handlers::view::set_camera(scene, position, rotation);
                true
            }
            SceneCommand::MoveCamera { dx, dy } => {
                handlers::view::pan(scene, dx, dy);
                true
            }
            SceneCommand::RotateCamera { dx, dy } => {
                handlers::view::rotate(scene, dx, dy);
                true
            }
            SceneCommand::ZoomCamera { dy } => {
                handlers::view::zoom(scene, dy);
                true
            }
            SceneCommand::ToggleProjection => {
                handlers::view::toggle_projection(scene);
                true
            }
            SceneCommand::SetView { view } => {
                handlers::view::set_view(scene, view);
                true
            }
            SceneCommand::ResizeViewport {
                width,
                height,
                offset_left,
                offset_top,
            } => {
                handlers::view::resize_viewport(scene, [width, height], [offset_left, offset_top]);
                true
            }

            // === Szenen-Optionen ===
            SceneCommand::SetBackgroundColor { color } => {
                handlers::view::set_background_color(scene, color);
                true
            }
            SceneCommand::SetGrid { grid } => {
                handlers::view::set_grid(scene, grid);
                true
            }
            SceneCommand::SetShowDeviceName { show } => {
                handlers::view::set_show_device_name(scene, show);
                true
            }
            SceneCommand::SetFormat { format } => {
                handlers::view::set_format(scene, format);
                true
            }
        }
    }
}
