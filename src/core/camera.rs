//! 3D-Kameras je Layer mit Perspektiv- und Orthografie-Modus.
//!
//! Die Rotation folgt der YXZ-Reihenfolge: Gieren um Y, danach Neigen um X.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};

use super::Layer;

/// Projektionsart der aktiven Kamera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    #[default]
    Perspective,
    Orthographic,
}

impl Projection {
    /// Die jeweils andere Projektionsart.
    pub fn toggled(self) -> Self {
        match self {
            Projection::Perspective => Projection::Orthographic,
            Projection::Orthographic => Projection::Perspective,
        }
    }
}

/// Größe und Lage des Viewports im Host-Fenster (Pixel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Abstand des Viewports vom linken Fensterrand
    pub offset_left: f32,
    /// Abstand des Viewports vom oberen Fensterrand
    pub offset_top: f32,
}

impl Viewport {
    /// Viewport ohne Versatz.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset_left: 0.0,
            offset_top: 0.0,
        }
    }

    /// Seitenverhältnis Breite / Höhe.
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Fensterkoordinaten → NDC, mit Viewport-Versatz.
    pub fn window_to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            ((x - self.offset_left) / self.width) * 2.0 - 1.0,
            ((-y + self.offset_top) / self.height) * 2.0 + 1.0,
        )
    }

    /// Viewport-Koordinaten → NDC, ohne Versatz.
    pub fn local_to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new((x / self.width) * 2.0 - 1.0, (-y / self.height) * 2.0 + 1.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Strahl in Weltkoordinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Normierte Richtung
    pub direction: Vec3,
}

impl Ray {
    /// Punkt auf dem Strahl im Abstand `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Schnittpunkt mit der horizontalen Ebene `y = height`.
    /// `None`, wenn der Strahl parallel verläuft oder von der Ebene wegzeigt.
    pub fn intersect_plane_y(&self, height: f32) -> Option<Vec3> {
        if self.direction.y.abs() < f32::EPSILON {
            return None;
        }
        let t = (height - self.origin.y) / self.direction.y;
        (t >= 0.0).then(|| self.at(t))
    }
}

/// Eine einzelne Kamera.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera3D {
    pub projection: Projection,
    pub position: Vec3,
    /// Neigung um X (Radiant)
    pub pitch: f32,
    /// Drehung um Y (Radiant)
    pub yaw: f32,
    pub roll: f32,
    /// Vertikaler Öffnungswinkel in Grad (nur Perspektive)
    pub fov_deg: f32,
    /// Halbe sichtbare Höhe (nur Orthografie)
    pub ortho_size: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera3D {
    /// Standard-Öffnungswinkel.
    pub const PERSPECTIVE_FOV_DEG: f32 = 30.0;
    /// Anfangsgröße der orthografischen Ansicht.
    pub const INITIAL_ORTHO_SIZE: f32 = 7.0;
    /// Kleinste orthografische Größe.
    pub const ORTHO_SIZE_MIN: f32 = 1.0;
    /// Obergrenze der orthografischen Größe je Viewport-Pixel.
    pub const ORTHO_SIZE_PER_PIXEL: f32 = 0.1;
    /// Schrittweite für Verschieben und Zoomen.
    pub const STEP: f32 = 0.1;
    /// Pixel pro Radiant beim Drehen.
    pub const ROTATE_DIVISOR: f32 = 100.0;

    /// Perspektiv-Kamera schräg von oben.
    pub fn perspective() -> Self {
        Self {
            projection: Projection::Perspective,
            position: Vec3::new(0.0, 30.0, 30.0),
            pitch: -std::f32::consts::FRAC_PI_4,
            yaw: 0.0,
            roll: 0.0,
            fov_deg: Self::PERSPECTIVE_FOV_DEG,
            ortho_size: Self::INITIAL_ORTHO_SIZE,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Orthografische Kamera senkrecht von oben.
    pub fn orthographic() -> Self {
        Self {
            projection: Projection::Orthographic,
            position: Vec3::new(0.0, 30.0, 0.0),
            pitch: -std::f32::consts::FRAC_PI_2,
            yaw: 0.0,
            roll: 0.0,
            fov_deg: Self::PERSPECTIVE_FOV_DEG,
            ortho_size: Self::INITIAL_ORTHO_SIZE,
            near: 1.0,
            far: 200.0,
        }
    }

    /// Orientierung der Kamera (YXZ).
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, self.roll)
    }

    /// Welt-Matrix der Kamera.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position)
    }

    /// View-Matrix (Inverse der Welt-Matrix).
    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().inverse()
    }

    /// Projektionsmatrix für das gegebene Seitenverhältnis.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection {
            Projection::Perspective => {
                Mat4::perspective_rh_gl(self.fov_deg.to_radians(), aspect, self.near, self.far)
            }
            Projection::Orthographic => Mat4::orthographic_rh_gl(
                -self.ortho_size * aspect,
                self.ortho_size * aspect,
                -self.ortho_size,
                self.ortho_size,
                self.near,
                self.far,
            ),
        }
    }

    /// View-Projektion für das gegebene Seitenverhältnis.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Verschiebt die Kamera horizontal relativ zu ihrer Blickrichtung.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let (sin, cos) = self.yaw.sin_cos();
        self.position.x -= dx * Self::STEP * cos + dy * Self::STEP * sin;
        self.position.z -= -dx * Self::STEP * sin + dy * Self::STEP * cos;
    }

    /// Dreht die Kamera. Orthografisch wirkt nur das Gieren.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw += dx / Self::ROTATE_DIVISOR;
        if self.projection == Projection::Perspective {
            self.pitch = (self.pitch + dy / Self::ROTATE_DIVISOR)
                .clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
        }
    }

    /// Zoomt: Perspektive fährt entlang der lokalen Z-Achse,
    /// Orthografie ändert die sichtbare Größe.
    pub fn zoom(&mut self, dy: f32, viewport_height: f32) {
        match self.projection {
            Projection::Perspective => {
                self.position += self.orientation() * Vec3::new(0.0, 0.0, dy * Self::STEP);
            }
            Projection::Orthographic => {
                let mut size = (self.ortho_size + dy * Self::STEP).max(Self::ORTHO_SIZE_MIN);
                let limit = viewport_height * Self::ORTHO_SIZE_PER_PIXEL;
                if size > limit {
                    size = limit;
                }
                self.ortho_size = size;
            }
        }
    }

    /// Strahl durch einen Punkt in NDC.
    pub fn ray_from_ndc(&self, ndc: Vec2, aspect: f32) -> Ray {
        let inverse = self.view_projection(aspect).inverse();
        let unproject = |z: f32| {
            let p = inverse * Vec4::new(ndc.x, ndc.y, z, 1.0);
            p.truncate() / p.w
        };
        let near = unproject(-1.0);
        let far = unproject(1.0);
        Ray {
            origin: near,
            direction: (far - near).normalize_or_zero(),
        }
    }
}

/// Perspektiv- und Orthografie-Kamera eines Layers.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewCameras {
    pub perspective: Camera3D,
    pub orthographic: Camera3D,
}

impl ViewCameras {
    /// Kamera der gegebenen Projektionsart.
    pub fn get(&self, projection: Projection) -> &Camera3D {
        match projection {
            Projection::Perspective => &self.perspective,
            Projection::Orthographic => &self.orthographic,
        }
    }

    fn get_mut(&mut self, projection: Projection) -> &mut Camera3D {
        match projection {
            Projection::Perspective => &mut self.perspective,
            Projection::Orthographic => &mut self.orthographic,
        }
    }
}

impl Default for ViewCameras {
    fn default() -> Self {
        Self {
            perspective: Camera3D::perspective(),
            orthographic: Camera3D::orthographic(),
        }
    }
}

/// Alle Kameras der Szene, aktiver Layer und aktive Projektionsart.
///
/// Die Projektionsart gilt für beide Layer gemeinsam.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CameraRig {
    physical: ViewCameras,
    logical: ViewCameras,
    current: Projection,
    view: Layer,
    viewport: Viewport,
}

impl CameraRig {
    /// Erstellt die Kameras für einen Viewport.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Aktiver Layer.
    pub fn view(&self) -> Layer {
        self.view
    }

    /// Wechselt den aktiven Layer.
    pub fn set_view(&mut self, view: Layer) {
        self.view = view;
    }

    /// Aktive Projektionsart.
    pub fn current(&self) -> Projection {
        self.current
    }

    /// Aktueller Viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Kameras eines Layers.
    pub fn cameras(&self, layer: Layer) -> &ViewCameras {
        match layer {
            Layer::Physical => &self.physical,
            Layer::Logical => &self.logical,
        }
    }

    fn cameras_mut(&mut self, layer: Layer) -> &mut ViewCameras {
        match layer {
            Layer::Physical => &mut self.physical,
            Layer::Logical => &mut self.logical,
        }
    }

    /// Aktive Kamera (Layer × Projektion).
    pub fn active(&self) -> &Camera3D {
        self.cameras(self.view).get(self.current)
    }

    /// Veränderbare aktive Kamera.
    pub fn active_mut(&mut self) -> &mut Camera3D {
        let (view, current) = (self.view, self.current);
        self.cameras_mut(view).get_mut(current)
    }

    /// Setzt Position und Rotation der aktiven Kamera.
    pub fn set_camera(&mut self, position: Vec3, rotation: Vec3) {
        let camera = self.active_mut();
        camera.position = position;
        camera.pitch = rotation.x;
        camera.yaw = rotation.y;
        camera.roll = rotation.z;
    }

    /// Verschiebt die aktive Kamera.
    pub fn move_camera(&mut self, dx: f32, dy: f32) {
        self.active_mut().pan(dx, dy);
    }

    /// Dreht die aktive Kamera.
    pub fn rotate_camera(&mut self, dx: f32, dy: f32) {
        self.active_mut().orbit(dx, dy);
    }

    /// Zoomt die aktive Kamera.
    pub fn zoom_camera(&mut self, dy: f32) {
        let height = self.viewport.height;
        self.active_mut().zoom(dy, height);
    }

    /// Schaltet zwischen Perspektive und Orthografie um und gibt die neue Art zurück.
    pub fn toggle_camera(&mut self) -> Projection {
        self.current = self.current.toggled();
        self.current
    }

    /// Übernimmt eine neue Viewport-Größe.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Strahl durch einen Fensterpunkt (berücksichtigt den Viewport-Versatz).
    pub fn ray_from_window(&self, x: f32, y: f32) -> Ray {
        self.active()
            .ray_from_ndc(self.viewport.window_to_ndc(x, y), self.viewport.aspect())
    }

    /// Strahl durch einen Viewport-Punkt (ohne Versatz).
    pub fn ray_from_viewport(&self, x: f32, y: f32) -> Ray {
        self.active()
            .ray_from_ndc(self.viewport.local_to_ndc(x, y), self.viewport.aspect())
    }

    /// Schnittpunkt des Strahls durch einen Viewport-Punkt mit der Ebene `y = height`.
    pub fn pick_level(&self, x: f32, y: f32, height: f32) -> Option<Vec3> {
        self.ray_from_viewport(x, y).intersect_plane_y(height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn starts_in_perspective_for_physical_layer() {
        let rig = CameraRig::new(Viewport::new(800.0, 600.0));
        assert_eq!(rig.current(), Projection::Perspective);
        assert_eq!(rig.view(), Layer::Physical);
        assert_eq!(rig.active().position, Vec3::new(0.0, 30.0, 30.0));
    }

    #[test]
    fn pitch_is_clamped_in_perspective() {
        let mut rig = CameraRig::default();
        rig.rotate_camera(0.0, 10_000.0);
        assert_relative_eq!(rig.active().pitch, std::f32::consts::FRAC_PI_2);
        rig.rotate_camera(0.0, -100_000.0);
        assert_relative_eq!(rig.active().pitch, -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn orthographic_rotation_only_yaws() {
        let mut rig = CameraRig::default();
        assert_eq!(rig.toggle_camera(), Projection::Orthographic);
        rig.rotate_camera(50.0, 80.0);
        assert_relative_eq!(rig.active().yaw, 0.5);
        assert_relative_eq!(rig.active().pitch, -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn orthographic_zoom_is_clamped() {
        let mut rig = CameraRig::new(Viewport::new(400.0, 300.0));
        rig.toggle_camera();
        rig.zoom_camera(-1000.0);
        assert_relative_eq!(rig.active().ortho_size, Camera3D::ORTHO_SIZE_MIN);
        rig.zoom_camera(10_000.0);
        assert_relative_eq!(rig.active().ortho_size, 30.0);
    }

    #[test]
    fn perspective_zoom_moves_along_view_axis() {
        let mut rig = CameraRig::default();
        let before = rig.active().position;
        rig.zoom_camera(-10.0);
        let after = rig.active().position;
        assert!(after.y < before.y);
        assert!(after.z < before.z);
        assert_relative_eq!(before.distance(after), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn pan_follows_yaw() {
        let mut rig = CameraRig::default();
        rig.move_camera(10.0, 0.0);
        assert_relative_eq!(rig.active().position.x, -1.0);

        rig.set_camera(Vec3::ZERO, Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));
        rig.move_camera(10.0, 0.0);
        assert_relative_eq!(rig.active().position.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn cameras_are_per_layer() {
        let mut rig = CameraRig::default();
        rig.move_camera(10.0, 0.0);
        rig.set_view(Layer::Logical);
        assert_relative_eq!(rig.active().position.x, 0.0);
    }

    #[test]
    fn center_ray_of_top_down_camera_hits_below() {
        let mut rig = CameraRig::new(Viewport::new(200.0, 100.0));
        rig.toggle_camera();
        let hit = rig.pick_level(100.0, 50.0, 0.0).expect("Schnitt erwartet");
        assert_relative_eq!(hit.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(hit.z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn window_offset_shifts_ndc() {
        let viewport = Viewport {
            offset_left: 50.0,
            offset_top: 20.0,
            ..Viewport::new(100.0, 100.0)
        };
        assert_eq!(viewport.window_to_ndc(100.0, 70.0), Vec2::ZERO);
        assert_eq!(viewport.local_to_ndc(50.0, 50.0), Vec2::ZERO);
    }

    #[test]
    fn ray_parallel_to_plane_misses() {
        let ray = Ray {
            origin: Vec3::Y,
            direction: Vec3::X,
        };
        assert!(ray.intersect_plane_y(0.0).is_none());
    }
}
