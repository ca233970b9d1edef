//! Die Diagramm-Szene: beide Layer, Kameras, Optionen und Ressourcen.
//!
//! `Scene` ist der einzige Einstiegspunkt für Mutationen. Jede Operation
//! aktualisiert den Record, baut die eigene Geometrie neu, leitet abhängige
//! Kanten und Labels über den Kaskaden-Propagator nach und fordert genau
//! einen Redraw an.

mod build;
mod cascade;
mod delete;
mod edges;
mod entities;
mod labels;
mod picking;
mod settings;
mod transform;
mod view;

pub use cascade::ChangeKind;
pub use picking::PickHit;
pub use settings::{BaseSettings, EdgeSettings};

use crate::core::{CameraRig, LayerGraph, Layer, Viewport};
use crate::geometry::{BlockFont, OutlineFont, TemplateTable, VectorFont};
use crate::shared::{
    DeferredLoader, FontHandle, PollOutcome, RedrawScheduler, ResourceCache, ResourceHandle,
    ResourceLoader, ResourceState, SceneSettings,
};

/// Vollständiger Zustand eines Diagramms.
pub struct Scene {
    physical: LayerGraph,
    logical: LayerGraph,
    settings: SceneSettings,
    templates: TemplateTable,
    font: Box<dyn VectorFont>,
    /// Angeforderte, noch nicht übernommene Schrift
    font_request: Option<FontHandle>,
    cameras: CameraRig,
    redraw: RedrawScheduler,
    resources: ResourceCache,
    loader: Box<dyn ResourceLoader>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneSettings::default())
    }
}

impl Scene {
    /// Erstellt eine leere Szene mit eingebauten Templates und Platzhalter-Schrift.
    pub fn new(settings: SceneSettings) -> Self {
        Self {
            physical: LayerGraph::new(Layer::Physical),
            logical: LayerGraph::new(Layer::Logical),
            settings,
            templates: TemplateTable::builtin(),
            font: Box::new(BlockFont::default()),
            font_request: None,
            cameras: CameraRig::new(Viewport::default()),
            redraw: RedrawScheduler::new(),
            resources: ResourceCache::new(),
            loader: Box::new(DeferredLoader::default()),
        }
    }

    /// Ersetzt die Geometrie-Templates (vor dem Anlegen von Entities).
    pub fn with_templates(mut self, templates: TemplateTable) -> Self {
        self.templates = templates;
        self
    }

    /// Ersetzt die Schrift für Texte und Namens-Labels.
    pub fn with_font(mut self, font: Box<dyn VectorFont>) -> Self {
        self.font = font;
        self
    }

    /// Ersetzt den Textur-Lader.
    pub fn with_loader(mut self, loader: Box<dyn ResourceLoader>) -> Self {
        self.loader = loader;
        self
    }

    /// Setzt die Viewport-Größe.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.cameras.resize(viewport);
        self
    }

    /// Szenengraph eines Layers.
    pub fn graph(&self, layer: Layer) -> &LayerGraph {
        match layer {
            Layer::Physical => &self.physical,
            Layer::Logical => &self.logical,
        }
    }

    fn graph_mut(&mut self, layer: Layer) -> &mut LayerGraph {
        match layer {
            Layer::Physical => &mut self.physical,
            Layer::Logical => &mut self.logical,
        }
    }

    /// Aktuelle Optionen.
    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    /// Geometrie-Templates.
    pub fn templates(&self) -> &TemplateTable {
        &self.templates
    }

    /// Kameras und Viewport.
    pub fn cameras(&self) -> &CameraRig {
        &self.cameras
    }

    /// Redraw-Zustand.
    pub fn redraw(&self) -> &RedrawScheduler {
        &self.redraw
    }

    /// Gibt `true` zurück, wenn ein Frame gezeichnet werden soll, und
    /// quittiert die Anforderung.
    pub fn take_frame(&mut self) -> bool {
        self.redraw.take_frame()
    }

    /// Noch nicht aufgelöste Textur-Handles für den Host.
    pub fn pending_resources(&self) -> Vec<ResourceHandle> {
        self.resources.pending()
    }

    /// Sammelt aufgelöste Texturen und die angeforderte Schrift ein und
    /// fordert bei Bedarf einen Redraw an.
    pub fn poll_resources(&mut self) -> PollOutcome {
        let mut outcome = self.resources.poll();
        self.poll_font(&mut outcome);
        if outcome.settled > 0 {
            self.redraw.request();
        }
        outcome
    }

    /// Fordert eine TTF/OTF-Schrift über den Lader an.
    ///
    /// Bis zur Auflösung formt die bisherige Schrift alle Texte; danach baut
    /// `poll_resources` Texte und Namens-Labels mit der neuen Schrift neu.
    pub fn load_font(&mut self, name: &str) -> FontHandle {
        let handle = self.loader.request_font(name);
        self.font_request = Some(handle.clone());
        handle
    }

    /// Angeforderte Schrift, solange sie noch nicht aufgelöst ist.
    pub fn pending_font(&self) -> Option<FontHandle> {
        self.font_request.as_ref().filter(|h| h.is_pending()).cloned()
    }

    /// Ersetzt die Schrift und formt alle Texte und Namens-Labels neu.
    pub fn set_font(&mut self, font: Box<dyn VectorFont>) {
        self.font = font;
        self.rebuild_glyphs();
        self.redraw.request();
    }

    fn poll_font(&mut self, outcome: &mut PollOutcome) {
        let Some(handle) = self.font_request.clone() else {
            return;
        };
        let font = match handle.state() {
            ResourceState::Pending => return,
            ResourceState::Ready(bytes) => {
                OutlineFont::from_bytes(bytes.clone()).map_err(|e| format!("{e:#}"))
            }
            ResourceState::Failed(message) => Err(message.to_string()),
        };
        self.font_request = None;
        outcome.settled += 1;
        match font {
            Ok(font) => {
                log::info!("Schrift '{}' übernommen", handle.name());
                self.set_font(Box::new(font));
            }
            Err(message) => {
                log::warn!(
                    "Schrift '{}' nicht verwendbar, Platzhalter bleibt: {}",
                    handle.name(),
                    message
                );
                outcome.failed.push(handle.name().to_string());
            }
        }
    }

    fn texture(&mut self, name: &str) -> ResourceHandle {
        self.resources.texture(self.loader.as_mut(), name)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use glam::Vec3;

    use super::Scene;
    use crate::core::{BaseRecord, DeviceRecord, EdgeRecord, EntityKind, Layer, Placement};

    /// Base 1 (4×1×4) mit Geräten 10 bei (0,0,0) und 11 bei (2,0,0) und Link 20.
    pub(crate) fn two_devices() -> Scene {
        let mut scene = Scene::default();
        assert!(scene.add_base(
            Layer::Physical,
            1,
            BaseRecord {
                size: Vec3::new(4.0, 1.0, 4.0),
                ..BaseRecord::default()
            },
        ));
        for (id, x) in [(10, 0.0), (11, 2.0)] {
            assert!(scene.add_device(
                id,
                DeviceRecord {
                    name: format!("d{id}"),
                    base: 1,
                    placement: Placement::at(Vec3::new(x, 0.0, 0.0)),
                    ..DeviceRecord::default()
                },
                false,
            ));
        }
        assert!(scene.add_edge(Layer::Physical, EntityKind::Link, 20, EdgeRecord::between(10, 11)));
        scene
    }
}
