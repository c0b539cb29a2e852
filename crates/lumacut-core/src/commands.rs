// crates/lumacut-core/src/commands.rs
//
// Every user action in an editor is expressed as an EditorCommand.
// Front ends emit these; `EditorSession::execute` applies them and returns the
// notification (if any) the action should surface.
// Adding a new action = add a variant here + one match arm in `execute`.

use serde::{Deserialize, Serialize};

use crate::filter::FieldUpdate;
use crate::history::EditorState;
use crate::media::{self, MediaInfo, MediaKind};
use crate::notify::Notification;
use crate::presets;
use crate::render::{self, ImageExtras};
use crate::suggestion::RemoteSuggestion;
use crate::transform::Orientation;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EditorCommand {
    // ── Filter ───────────────────────────────────────────────────────────────
    SetField(FieldUpdate),
    /// Looked up by name, case-insensitive.
    ApplyPreset(String),
    /// Merge a resolved remote suggestion over the current value.
    ApplySuggestion(RemoteSuggestion),
    /// Image editor only: invert / opacity. Not part of the undo history.
    SetExtras(ImageExtras),

    // ── Undo / Redo ───────────────────────────────────────────────────────────
    Undo,
    Redo,
    /// Back to identity with a fresh history.
    Reset,

    // ── Transform ─────────────────────────────────────────────────────────────
    RotateCw,
    RotateCcw,
    FlipHorizontal,
    FlipVertical,

    // ── Media ─────────────────────────────────────────────────────────────────
    /// A file picked or dropped by the user. Validated before any state changes.
    LoadMedia { name: String, mime: String, size_bytes: u64 },
}

/// One editor screen: the filter history plus the editor-local extras.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorSession {
    pub kind:        MediaKind,
    pub state:       EditorState,
    pub media:       Option<MediaInfo>,
    pub orientation: Orientation,
    pub extras:      ImageExtras,
}

impl EditorSession {
    pub fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            state:       EditorState::new(),
            media:       None,
            orientation: Orientation::default(),
            extras:      ImageExtras::IDENTITY,
        }
    }

    /// Render string for the current state (image editor appends extras).
    pub fn render_string(&self) -> String {
        match self.kind {
            MediaKind::Image => render::to_image_render_string(self.state.current(), &self.extras),
            _                => render::to_render_string(self.state.current()),
        }
    }

    pub fn execute(&mut self, cmd: EditorCommand) -> Option<Notification> {
        match cmd {
            EditorCommand::SetField(update) => {
                self.state.set_field(update);
                None
            }
            EditorCommand::ApplyPreset(name) => match presets::find(&name) {
                Some(preset) => {
                    self.state.apply_preset(preset);
                    Some(Notification::success(format!("Applied {} filter", preset.name)))
                }
                None => Some(Notification::error(format!("No preset named \"{name}\""))),
            },
            EditorCommand::ApplySuggestion(suggestion) => {
                if self.state.apply_suggestion(&suggestion) {
                    let msg = if suggestion.description.is_empty() {
                        "AI suggestion applied".to_string()
                    } else {
                        format!("AI suggestion applied: {}", suggestion.description)
                    };
                    Some(Notification::success(msg))
                } else if suggestion.description.is_empty() {
                    Some(Notification::info("The AI returned no filter changes"))
                } else {
                    Some(Notification::info(suggestion.description))
                }
            }
            EditorCommand::SetExtras(extras) => {
                self.extras = extras;
                None
            }
            EditorCommand::Undo => {
                self.state.undo();
                None
            }
            EditorCommand::Redo => {
                self.state.redo();
                None
            }
            EditorCommand::Reset => {
                self.reset_edits();
                Some(Notification::info("All adjustments reset"))
            }
            EditorCommand::RotateCw => {
                self.orientation.rotation = self.orientation.rotation.rotate_cw();
                None
            }
            EditorCommand::RotateCcw => {
                self.orientation.rotation = self.orientation.rotation.rotate_ccw();
                None
            }
            EditorCommand::FlipHorizontal => {
                self.orientation.flip_h = !self.orientation.flip_h;
                None
            }
            EditorCommand::FlipVertical => {
                self.orientation.flip_v = !self.orientation.flip_v;
                None
            }
            EditorCommand::LoadMedia { name, mime, size_bytes } => {
                match media::validate_upload(self.kind, &name, &mime, size_bytes) {
                    Ok(info) => {
                        log::info!("[editor] loaded {} ({} bytes)", info.name, info.size_bytes);
                        self.reset_edits();
                        let msg = format!("{} uploaded", info.name);
                        self.media = Some(info);
                        Some(Notification::success(msg))
                    }
                    Err(e) => {
                        log::warn!("[editor] rejected upload: {e}");
                        Some(Notification::from(&e))
                    }
                }
            }
        }
    }

    fn reset_edits(&mut self) {
        self.state.reset(crate::filter::FilterValue::IDENTITY);
        self.orientation = Orientation::default();
        self.extras      = ImageExtras::IDENTITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterField, FilterValue};
    use crate::notify::Level;
    use crate::transform::Rotation;

    #[test]
    fn preset_then_render_matches_noir() {
        let mut s = EditorSession::new(MediaKind::Video);
        let n = s.execute(EditorCommand::ApplyPreset("noir".into())).unwrap();
        assert_eq!(n.level, Level::Success);
        assert!(s.render_string().contains(
            "brightness(88%) contrast(150%) saturate(30%) blur(0px) hue-rotate(0deg) sepia(15%) grayscale(50%)"
        ));
    }

    #[test]
    fn unknown_preset_is_one_error_and_no_commit() {
        let mut s = EditorSession::new(MediaKind::Image);
        let n = s.execute(EditorCommand::ApplyPreset("Nope".into())).unwrap();
        assert!(n.is_error());
        assert_eq!(s.state.history().len(), 1);
    }

    #[test]
    fn rejected_upload_leaves_state_alone() {
        let mut s = EditorSession::new(MediaKind::Image);
        s.execute(EditorCommand::SetField(FieldUpdate::new(FilterField::Sepia, 30.0)));
        let before = s.clone();
        let n = s.execute(EditorCommand::LoadMedia {
            name:       "clip.mp4".into(),
            mime:       "video/mp4".into(),
            size_bytes: 1000,
        });
        assert!(n.unwrap().is_error());
        assert_eq!(s, before);
    }

    #[test]
    fn accepted_upload_resets_history() {
        let mut s = EditorSession::new(MediaKind::Image);
        s.execute(EditorCommand::SetField(FieldUpdate::new(FilterField::Sepia, 30.0)));
        s.execute(EditorCommand::RotateCw);
        let n = s.execute(EditorCommand::LoadMedia {
            name:       "photo.jpg".into(),
            mime:       "image/jpeg".into(),
            size_bytes: 1000,
        });
        assert_eq!(n.unwrap().level, Level::Success);
        assert_eq!(s.state.history(), &[FilterValue::IDENTITY]);
        assert_eq!(s.orientation.rotation, Rotation::Deg0);
        assert!(s.media.is_some());
    }

    #[test]
    fn undo_redo_are_silent() {
        let mut s = EditorSession::new(MediaKind::Video);
        assert_eq!(s.execute(EditorCommand::Undo), None);
        assert_eq!(s.execute(EditorCommand::Redo), None);
    }

    #[test]
    fn description_only_suggestion_is_info() {
        let mut s = EditorSession::new(MediaKind::Video);
        let n = s
            .execute(EditorCommand::ApplySuggestion(RemoteSuggestion::description_only("A calm lake")))
            .unwrap();
        assert_eq!(n, Notification::info("A calm lake"));
        assert!(s.state.current().is_identity());
    }

    #[test]
    fn image_render_string_includes_extras() {
        let mut s = EditorSession::new(MediaKind::Image);
        s.execute(EditorCommand::SetExtras(ImageExtras { invert: 20.0, opacity: 90.0 }));
        assert!(s.render_string().ends_with("invert(20%) opacity(90%)"));
    }
}
