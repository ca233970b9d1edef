//! Handler für Kamera, Viewport und szenenweite Optionen.

use glam::Vec3;

use crate::core::Layer;
use crate::scene::Scene;
use crate::shared::{FormatDefaults, GridSettings};

/// Setzt Position und Rotation der aktiven Kamera.
pub fn set_camera(scene: &mut Scene, position: Vec3, rotation: Vec3) {
    scene.set_camera(position, rotation);
}

/// Verschiebt die aktive Kamera.
pub fn pan(scene: &mut Scene, dx: f32, dy: f32) {
    scene.move_camera(dx, dy);
}

/// Dreht die aktive Kamera.
pub fn rotate(scene: &mut Scene, dx: f32, dy: f32) {
    scene.rotate_camera(dx, dy);
}

/// Zoomt die aktive Kamera.
pub fn zoom(scene: &mut Scene, dy: f32) {
    scene.zoom_camera(dy);
}

/// Schaltet Perspektive/Orthografie um.
pub fn toggle_projection(scene: &mut Scene) {
    let projection = scene.toggle_projection();
    log::info!("Projektion: {:?}", projection);
}

/// Wechselt den angezeigten Layer.
pub fn set_view(scene: &mut Scene, view: Layer) {
    scene.set_view(view);
    log::info!("View: {:?}", view);
}

/// Aktualisiert Größe und Lage des Viewports.
pub fn resize_viewport(scene: &mut Scene, size: [f32; 2], offset: [f32; 2]) {
    scene.resize_viewport(size[0], size[1], offset[0], offset[1]);
}

/// Setzt die Hintergrundfarbe.
pub fn set_background_color(scene: &mut Scene, color: u32) {
    scene.set_background_color(color);
}

/// Ersetzt das Raster.
pub fn set_grid(scene: &mut Scene, grid: GridSettings) {
    scene.set_grid(grid);
}

/// Zeigt oder verbirgt Namens-Labels.
pub fn set_show_device_name(scene: &mut Scene, show: bool) {
    scene.set_show_device_name(show);
}

/// Ersetzt die Format-Vorgaben.
pub fn set_format(scene: &mut Scene, format: FormatDefaults) {
    scene.set_format(format);
}
