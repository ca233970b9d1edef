//! netdiagram3d Library.
//! Szenengraph, prozedurale Geometrie und Routing editierbarer 3D-Netzwerkdiagramme.

pub mod app;
pub mod core;
pub mod geometry;
pub mod routing;
pub mod scene;
pub mod shared;

pub use app::{CommandLog, SceneCommand, SceneController};
pub use core::{
    Axis, BaseRecord, DeviceRecord, EdgeRecord, EntityKey, EntityKind, EntityRecord,
    L2SegmentRecord, Layer, LayerGraph, Placement, RouteStyle, SymbolRecord, TextRecord,
};
pub use core::{Camera3D, CameraRig, Projection, Viewport};
pub use routing::{Route, RouteSegment};
pub use scene::{ChangeKind, PickHit, Scene};
pub use shared::{EdgePruning, SceneSettings};
