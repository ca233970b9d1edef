//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Optionen, Ressourcen-Handles (Texturen, Schriften) und den
//! Redraw-Scheduler, die zwischen `core`, `geometry` und `scene` geteilt
//! werden.

pub mod options;
mod redraw;
mod resources;

pub use options::{
    EdgePruning, FormatDefaults, GridSettings, RoutingOptions, SceneSettings, BASE_MIN_FOOTPRINT,
    BASE_MIN_HEIGHT, MIN_ENTITY_SIZE,
};
pub use redraw::RedrawScheduler;
pub use resources::{
    DeferredLoader, FontHandle, PollOutcome, ResourceCache, ResourceHandle, ResourceLoader,
    ResourceState, SamplerSettings, TextureInfo, TextureState, TEXTURE_SAMPLER,
};
