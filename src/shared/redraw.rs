//! Zusammenfassung von Redraw-Anforderungen zu höchstens einem Frame pro Tick.

/// Idempotentes Dirty-Flag für den Render-Loop des Hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedrawScheduler {
    dirty: bool,
    coalesced: u32,
    frames: u64,
}

impl RedrawScheduler {
    /// Erstellt einen Scheduler; der erste Frame ist bereits angefordert.
    pub fn new() -> Self {
        Self {
            dirty: true,
            coalesced: 1,
            frames: 0,
        }
    }

    /// Markiert die Szene als neu zu zeichnen.
    pub fn request(&mut self) {
        self.dirty = true;
        self.coalesced = self.coalesced.saturating_add(1);
    }

    /// Gibt `true` zurück, wenn ein Frame aussteht.
    pub fn is_pending(&self) -> bool {
        self.dirty
    }

    /// Anzahl Anforderungen seit dem letzten Frame.
    pub fn coalesced_requests(&self) -> u32 {
        self.coalesced
    }

    /// Anzahl bisher ausgelöster Frames.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Vom Host einmal pro Display-Tick aufgerufen.
    /// Gibt `true` zurück, wenn jetzt gerendert werden soll, und setzt das Flag zurück.
    pub fn take_frame(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        self.coalesced = 0;
        self.frames += 1;
        true
    }
}
