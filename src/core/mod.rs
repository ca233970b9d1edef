//! Core-Domänentypen: Entities, Records, Meshes, Szenengraph, Kamera, Spatial-Index.

pub mod camera;
pub mod entity;
pub mod mesh;
/// Attribut-Records aller Entity-Typen
///
/// Die Records sind die deklarative Quelle der Wahrheit:
/// - BaseRecord, DeviceRecord, L2SegmentRecord, TextRecord, SymbolRecord
/// - EdgeRecord: gemeinsamer Record aller Kanten-Typen
/// - EntityRecord: nach Typ getaggte Vereinigung
pub mod records;
pub mod render_parts;
pub mod scene_graph;
pub mod spatial;

pub use camera::{Camera3D, CameraRig, Projection, Ray, ViewCameras, Viewport};
pub use entity::{EntityKey, EntityKind, Layer};
pub use mesh::{vertex_bytes, Aabb, GpuVertex, Mesh, Shading};
pub use records::{
    color_to_rgb, Axis, BackgroundShape, BaseRecord, BaseSubtype, DeviceConfig, DeviceRecord,
    EdgeRecord, EntityRecord, InterfaceFunction, L2SegmentRecord, LineData, LineRecord,
    LinkPhysicalConfig, Placement, RouteStyle, SymbolRecord, TextAlign, TextRecord,
};
pub use records::{
    DEFAULT_COLOR1, DEFAULT_COLOR2, DEFAULT_LINK_COLOR, DEFAULT_LINK_HEIGHT, DEFAULT_LINK_WEIGHT,
};
pub use render_parts::{
    Material, MaterialKind, MaterialUniforms, MeshGroup, MeshRole, NameLabel, RenderParts,
};
pub use scene_graph::{euler_order, rotation_quat, rotation_vector, LayerGraph, SceneNode};
pub use spatial::{SpatialIndex, SpatialMatch};
