//! Asynchrones Laden von Texturen und Schriften über Handles mit einmaliger
//! Fertigstellung.
//!
//! Ein Handle ist sofort verwendbar; bis zur Auflösung rendert das Material
//! ohne Textur bzw. der Text mit der Platzhalter-Schrift. Die Auflösung darf
//! von jedem Thread kommen, die Szene bemerkt sie beim nächsten `poll`.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;

/// Sampler-Einstellungen für geladene Texturen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerSettings {
    /// Wiederholtes Kacheln in U und V
    pub repeat: bool,
    /// Anisotrope Filterung
    pub anisotropy: u8,
}

/// Sampler-Einstellungen aller Szenen-Texturen.
pub const TEXTURE_SAMPLER: SamplerSettings = SamplerSettings {
    repeat: true,
    anisotropy: 4,
};

/// Metadaten einer geladenen Textur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
}

/// Zustand eines Handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState<'a, T> {
    /// Noch nicht aufgelöst, Material bzw. Text nutzt den Standardwert
    Pending,
    Ready(&'a T),
    /// Fehlgeschlagen, der Standardwert bleibt
    Failed(&'a str),
}

/// Zustand eines Textur-Handles.
pub type TextureState<'a> = ResourceState<'a, TextureInfo>;

/// Geteiltes, einmal auflösbares Handle. Standard-Inhalt ist eine Textur.
#[derive(Debug)]
pub struct ResourceHandle<T = TextureInfo> {
    name: Arc<str>,
    slot: Arc<OnceLock<Result<T, String>>>,
}

/// Handle auf die Bytes einer TTF/OTF-Datei.
pub type FontHandle = ResourceHandle<Vec<u8>>;

impl<T> Clone for ResourceHandle<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> ResourceHandle<T> {
    /// Erstellt ein noch offenes Handle.
    pub fn pending(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            slot: Arc::new(OnceLock::new()),
        }
    }

    /// Dateiname der Ressource.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Löst das Handle auf. Gibt `false` zurück, wenn es bereits aufgelöst war.
    pub fn resolve(&self, result: Result<T, String>) -> bool {
        self.slot.set(result).is_ok()
    }

    /// Aktueller Zustand.
    pub fn state(&self) -> ResourceState<'_, T> {
        match self.slot.get() {
            None => ResourceState::Pending,
            Some(Ok(value)) => ResourceState::Ready(value),
            Some(Err(message)) => ResourceState::Failed(message),
        }
    }

    /// Gibt `true` zurück, solange das Handle nicht aufgelöst ist.
    pub fn is_pending(&self) -> bool {
        self.slot.get().is_none()
    }

    /// Gibt `true` zurück, sobald der Inhalt verfügbar ist.
    pub fn is_ready(&self) -> bool {
        matches!(self.slot.get(), Some(Ok(_)))
    }
}

impl<T> PartialEq for ResourceHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

/// Externer Lader, der zu einem Dateinamen ein Handle liefert.
pub trait ResourceLoader {
    /// Startet (oder vermerkt) das Laden einer Textur und kehrt sofort zurück.
    fn request(&mut self, name: &str) -> ResourceHandle;

    /// Startet das Laden einer Schriftdatei. Ohne eigene Implementierung
    /// bleibt das Handle offen, bis der Host es auflöst.
    fn request_font(&mut self, name: &str) -> FontHandle {
        FontHandle::pending(name)
    }
}

/// Lader, der nur offene Handles erzeugt; der Host holt sie über
/// `Scene::pending_resources` ab und löst sie auf.
#[derive(Debug, Clone)]
pub struct DeferredLoader {
    root: String,
}

impl DeferredLoader {
    /// Standard-Pfad der Texturen.
    pub const DEFAULT_ROOT: &'static str = "/static/textures/";

    /// Erstellt einen Lader mit Basis-Pfad.
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    /// Vollständiger Pfad einer Textur.
    pub fn url_for(&self, name: &str) -> String {
        format!("{}{}", self.root, name)
    }
}

impl Default for DeferredLoader {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ROOT)
    }
}

impl ResourceLoader for DeferredLoader {
    fn request(&mut self, name: &str) -> ResourceHandle {
        log::debug!("Textur angefordert: {}", self.url_for(name));
        ResourceHandle::pending(name)
    }

    fn request_font(&mut self, name: &str) -> FontHandle {
        log::debug!("Schrift angefordert: {}", self.url_for(name));
        FontHandle::pending(name)
    }
}

/// Ergebnis eines `poll`-Durchlaufs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollOutcome {
    /// Anzahl seit dem letzten Poll aufgelöster Handles
    pub settled: usize,
    /// Namen der fehlgeschlagenen Handles darunter
    pub failed: Vec<String>,
}

/// Cache aller angeforderten Texturen, je Name ein Handle.
#[derive(Debug, Default)]
pub struct ResourceCache {
    handles: IndexMap<String, ResourceHandle>,
    settled: HashSet<String>,
}

impl ResourceCache {
    /// Erstellt einen leeren Cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Liefert das Handle zu `name`, fordert es beim ersten Zugriff an.
    pub fn texture(&mut self, loader: &mut dyn ResourceLoader, name: &str) -> ResourceHandle {
        if let Some(handle) = self.handles.get(name) {
            return handle.clone();
        }
        let handle = loader.request(name);
        self.handles.insert(name.to_string(), handle.clone());
        handle
    }

    /// Alle noch offenen Handles.
    pub fn pending(&self) -> Vec<ResourceHandle> {
        self.handles
            .values()
            .filter(|h| h.is_pending())
            .cloned()
            .collect()
    }

    /// Anzahl angeforderter Texturen.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Gibt `true` zurück, wenn noch keine Textur angefordert wurde.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Sammelt neu aufgelöste Handles ein.
    pub fn poll(&mut self) -> PollOutcome {
        let mut outcome = PollOutcome::default();
        for (name, handle) in &self.handles {
            if self.settled.contains(name) {
                continue;
            }
            match handle.state() {
                TextureState::Pending => continue,
                TextureState::Ready(_) => {}
                TextureState::Failed(message) => {
                    log::warn!("Textur '{}' konnte nicht geladen werden: {}", name, message);
                    outcome.failed.push(name.clone());
                }
            }
            outcome.settled += 1;
        }
        for name in self
            .handles
            .iter()
            .filter(|(_, h)| !h.is_pending())
            .map(|(n, _)| n)
        {
            self.settled.insert(name.clone());
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_resolves_once() {
        let handle = ResourceHandle::pending("S_1.png");
        assert_eq!(handle.state(), TextureState::Pending);
        assert!(handle.resolve(Ok(TextureInfo {
            width: 64,
            height: 64
        })));
        assert!(!handle.resolve(Err("zu spät".into())));
        assert!(handle.is_ready());
    }

    #[test]
    fn cache_deduplicates_requests() {
        let mut loader = DeferredLoader::default();
        let mut cache = ResourceCache::new();
        let a = cache.texture(&mut loader, "basic.png");
        let b = cache.texture(&mut loader, "basic.png");
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.pending().len(), 1);
    }

    #[test]
    fn poll_reports_each_settlement_once() {
        let mut loader = DeferredLoader::default();
        let mut cache = ResourceCache::new();
        let ok = cache.texture(&mut loader, "a.png");
        let bad = cache.texture(&mut loader, "b.png");
        assert_eq!(cache.poll(), PollOutcome::default());

        ok.resolve(Ok(TextureInfo {
            width: 1,
            height: 1,
        }));
        bad.resolve(Err("404".into()));
        let outcome = cache.poll();
        assert_eq!(outcome.settled, 2);
        assert_eq!(outcome.failed, vec!["b.png".to_string()]);
        assert_eq!(cache.poll().settled, 0);
    }

    #[test]
    fn font_handle_carries_bytes() {
        let mut loader = DeferredLoader::default();
        let font = loader.request_font("label.ttf");
        assert!(font.is_pending());
        assert!(font.resolve(Ok(vec![0, 1, 0, 0])));
        assert_eq!(font.state(), ResourceState::Ready(&vec![0, 1, 0, 0]));
        assert_eq!(font.name(), "label.ttf");
    }

    #[test]
    fn handle_resolvable_from_other_thread() {
        let handle = ResourceHandle::pending("remote.png");
        let remote = handle.clone();
        std::thread::spawn(move || {
            remote.resolve(Ok(TextureInfo {
                width: 2,
                height: 2,
            }))
        })
        .join()
        .expect("Thread erwartet");
        assert!(handle.is_ready());
    }
}
