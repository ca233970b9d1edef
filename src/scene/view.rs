//! Kamera-, View- und szenenweite Darstellungs-Operationen.

use glam::Vec3;

use super::Scene;
use crate::core::{Layer, Projection, Viewport};
use crate::shared::{FormatDefaults, GridSettings};

impl Scene {
    // ── Kamera ──────────────────────────────────────────────────────

    /// Setzt Position und Rotation (Pitch, Yaw, Roll) der aktiven Kamera.
    pub fn set_camera(&mut self, position: Vec3, rotation: Vec3) {
        self.cameras.set_camera(position, rotation);
        self.adjust_labels(self.cameras.view());
        self.redraw.request();
    }

    /// Verschiebt die aktive Kamera entlang ihrer Blickrichtung in der Ebene.
    pub fn move_camera(&mut self, dx: f32, dy: f32) {
        self.cameras.move_camera(dx, dy);
        self.redraw.request();
    }

    /// Dreht die aktive Kamera und richtet die Labels des Layers neu aus.
    pub fn rotate_camera(&mut self, dx: f32, dy: f32) {
        self.cameras.rotate_camera(dx, dy);
        self.adjust_labels(self.cameras.view());
        self.redraw.request();
    }

    /// Zoomt die aktive Kamera.
    pub fn zoom_camera(&mut self, dy: f32) {
        self.cameras.zoom_camera(dy);
        self.redraw.request();
    }

    /// Schaltet die Projektionsart beider Layer um.
    pub fn toggle_projection(&mut self) -> Projection {
        let projection = self.cameras.toggle_camera();
        for layer in Layer::ALL {
            self.adjust_labels(layer);
        }
        self.redraw.request();
        projection
    }

    // ── View und Viewport ───────────────────────────────────────────

    /// Wechselt den angezeigten Layer.
    pub fn set_view(&mut self, view: Layer) {
        self.cameras.set_view(view);
        self.adjust_labels(view);
        self.redraw.request();
    }

    /// Übernimmt die Größe und Lage des Viewports im Fenster.
    pub fn resize_viewport(&mut self, width: f32, height: f32, offset_left: f32, offset_top: f32) {
        self.cameras.resize(Viewport {
            offset_left,
            offset_top,
            ..Viewport::new(width, height)
        });
        self.redraw.request();
    }

    // ── Szenenweite Optionen ────────────────────────────────────────

    /// Setzt die Hintergrundfarbe.
    pub fn set_background_color(&mut self, color: u32) {
        self.settings.background_color = color;
        self.redraw.request();
    }

    /// Ersetzt das Raster.
    pub fn set_grid(&mut self, grid: GridSettings) {
        self.settings.grid = grid;
    }

    /// Zeigt oder verbirgt alle Namens-Labels.
    pub fn set_show_device_name(&mut self, show: bool) {
        self.settings.show_device_name = show;
        self.apply_label_visibility();
        self.redraw.request();
    }

    /// Ersetzt die Format-Vorgaben für neue Elemente.
    pub fn set_format(&mut self, format: FormatDefaults) {
        self.settings.format = format;
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::two_devices;
    use super::*;
    use crate::core::{EntityKey, EntityKind};
    use approx::assert_relative_eq;

    fn label_yaw(scene: &Scene) -> f32 {
        scene
            .find(Layer::Physical, EntityKey::new(EntityKind::Device, 10))
            .and_then(|n| n.render.label.as_ref())
            .map(|l| l.yaw)
            .expect("Label erwartet")
    }

    #[test]
    fn camera_rotation_turns_labels() {
        let mut scene = two_devices();
        scene.rotate_camera(50.0, 0.0);
        assert_relative_eq!(label_yaw(&scene), scene.cameras().active().yaw);
        assert!(scene.cameras().active().yaw != 0.0);
    }

    #[test]
    fn toggle_reorients_labels_for_new_camera() {
        let mut scene = two_devices();
        assert_eq!(scene.toggle_projection(), Projection::Orthographic);
        let label = scene
            .find(Layer::Physical, EntityKey::new(EntityKind::Device, 10))
            .and_then(|n| n.render.label.clone())
            .expect("Label erwartet");
        assert_relative_eq!(label.pitch, scene.cameras().active().pitch);
        assert_relative_eq!(label.pitch, -std::f32::consts::FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn viewport_offset_is_applied() {
        let mut scene = two_devices();
        scene.resize_viewport(400.0, 200.0, 10.0, 20.0);
        let viewport = scene.cameras().viewport();
        assert_eq!(viewport.width, 400.0);
        assert_eq!(viewport.offset_top, 20.0);
    }

    #[test]
    fn background_and_grid_are_stored() {
        let mut scene = two_devices();
        scene.set_background_color(0x123456);
        let grid = GridSettings {
            active: false,
            ..GridSettings::default()
        };
        scene.set_grid(grid);
        assert_eq!(scene.settings().background_color, 0x123456);
        assert!(!scene.settings().grid.active);
    }
}
