// crates/lumacut-core/src/lib.rs
//
// Pure editor data and logic: no network, no file I/O, no UI toolkit.
// Shared by lumacut-suggest (the remote adapter) and lumacut-cli.
//
// Layering, leaves first:
//   filter:     the seven-field FilterValue and typed field updates
//   presets:    the static, categorized preset catalog
//   render:     FilterValue → native filter-function string
//   history:    EditorState: linear undo/redo over FilterValue snapshots
//   suggestion: the remote suggestion contract (request, result, errors)
//   commands:   every user action as an EditorCommand, executed here
//   raster:     software render path for RGBA frames (mirrors `render`)

pub mod commands;
pub mod filter;
pub mod helpers;
pub mod history;
pub mod media;
pub mod notify;
pub mod presets;
pub mod raster;
pub mod render;
pub mod suggestion;
pub mod transform;

pub use filter::{FieldUpdate, FilterField, FilterValue};
pub use history::EditorState;
pub use presets::{Category, FilterPreset};
pub use render::{to_image_render_string, to_render_string, ImageExtras};
pub use suggestion::{ActionKind, RemoteSuggestion, SuggestError, SuggestPayload};
