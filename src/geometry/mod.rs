//! Prozedurale Geometrie-Generatoren.
//!
//! Alle Funktionen sind rein: sie lesen einen Record und liefern Meshes im
//! lokalen Frame der Entity. Materialien und Platzierung übernimmt die Szene.

mod base;
mod device;
mod font;
mod l2segment;
mod outline_font;
pub mod primitives;
mod symbol;
mod templates;
mod text;
mod text_background;

pub use base::{floor_meshes, floor_textures, FLOAT_THICKNESS};
pub use device::{device_geometry, DeviceGeometry, SHELL_BASE_SCALE};
pub use font::{BlockFont, VectorFont};
pub use l2segment::{segment_mesh, RING_STEPS, SEGMENT_TEXTURE};
pub use outline_font::{OutlineFont, CURVE_STEPS};
pub use symbol::{symbol_colors, symbol_geometry, FLAG_TYPE};
pub use templates::{GeometryTemplate, TemplateFamily, TemplateTable, BASIC_TEXTURE, UNKNOWN};
pub use text::{text_mesh, LINE_SPACING};
pub use text_background::{background_meshes, BEVEL_FACTOR, CIRCLE_POINTS};
