// crates/lumacut-core/src/suggestion.rs
//
// Contract between the editors and the remote "suggest filter values" service.
//
// Transport lives in lumacut-suggest. This module holds everything both ends
// agree on: the action enumeration, the request payload and its validation,
// the wire request body, the (all-optional) suggestion result and the error
// taxonomy the caller turns into a notification.
//
// A suggestion never touches EditorState directly: the caller merges it over
// the current value with `merge_onto` and commits the result.

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::filter::{FilterField, FilterValue};

// ── Actions ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// General enhancement of a captured frame.
    Enhance,
    /// Grade toward a look described in the prompt.
    ColorGrade,
    /// Match an artistic style described in the prompt.
    StyleTransfer,
    /// Describe scene type, lighting and mood, plus filter values.
    SceneAnalysis,
    /// Fix exposure/colour problems in a captured frame.
    AutoCorrect,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Enhance,
        ActionKind::ColorGrade,
        ActionKind::StyleTransfer,
        ActionKind::SceneAnalysis,
        ActionKind::AutoCorrect,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Enhance       => "enhance",
            ActionKind::ColorGrade    => "color_grade",
            ActionKind::StyleTransfer => "style_transfer",
            ActionKind::SceneAnalysis => "scene_analysis",
            ActionKind::AutoCorrect   => "auto_correct",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Enhance       => "AI Enhance",
            ActionKind::ColorGrade    => "AI Color Grade",
            ActionKind::StyleTransfer => "AI Style Transfer",
            ActionKind::SceneAnalysis => "Scene Analysis",
            ActionKind::AutoCorrect   => "Auto Correct",
        }
    }

    pub fn requires_frame(self) -> bool {
        matches!(self, ActionKind::Enhance | ActionKind::SceneAnalysis | ActionKind::AutoCorrect)
    }

    pub fn requires_prompt(self) -> bool {
        matches!(self, ActionKind::ColorGrade | ActionKind::StyleTransfer)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = SuggestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        ActionKind::ALL
            .into_iter()
            .find(|a| a.as_str() == tag)
            .ok_or_else(|| SuggestError::InvalidInput(format!("unknown action: {tag}")))
    }
}

// ── Payload ───────────────────────────────────────────────────────────────────

/// A still frame as base64 or a `data:` URL. Both forms are accepted on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedImage(String);

impl EncodedImage {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// `data:image/png;base64,...` from raw PNG bytes.
    pub fn from_png_bytes(bytes: &[u8]) -> Self {
        Self::from_bytes("image/png", bytes)
    }

    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self(format!("data:{mime};base64,{b64}"))
    }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Data URL as-is; bare base64 wrapped as `image/jpeg` (what the
    /// editors' canvas capture produces).
    pub fn to_data_url(&self) -> String {
        if self.0.starts_with("data:") {
            self.0.clone()
        } else {
            format!("data:image/jpeg;base64,{}", self.0)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuggestPayload {
    pub prompt: Option<String>,
    pub frame:  Option<EncodedImage>,
}

impl SuggestPayload {
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_frame(mut self, frame: EncodedImage) -> Self {
        self.frame = Some(frame);
        self
    }

    fn prompt_text(&self) -> Option<&str> {
        self.prompt.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }

    fn frame_present(&self) -> bool {
        self.frame.as_ref().is_some_and(|f| !f.is_empty())
    }
}

/// Precondition check run before any network call.
pub fn validate(action: ActionKind, payload: &SuggestPayload) -> Result<(), SuggestError> {
    if action.requires_frame() && !payload.frame_present() {
        return Err(SuggestError::InvalidInput(format!(
            "{} needs a captured frame", action.label()
        )));
    }
    if action.requires_prompt() && payload.prompt_text().is_none() {
        return Err(SuggestError::InvalidInput(format!(
            "{} needs a description of the look you want", action.label()
        )));
    }
    Ok(())
}

/// JSON request body: `{ action, prompt?, frameBase64? }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuggestRequest {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, rename = "frameBase64", skip_serializing_if = "Option::is_none")]
    pub frame_base64: Option<String>,
}

impl SuggestRequest {
    pub fn new(action: ActionKind, payload: &SuggestPayload) -> Self {
        Self {
            action:       action.as_str().to_string(),
            prompt:       payload.prompt_text().map(str::to_string),
            frame_base64: payload.frame.as_ref().map(|f| f.as_str().to_string()),
        }
    }

    /// Parse `action` and rebuild the payload; runs `validate`.
    pub fn into_parts(self) -> Result<(ActionKind, SuggestPayload), SuggestError> {
        let action  = self.action.parse::<ActionKind>()?;
        let payload = SuggestPayload {
            prompt: self.prompt,
            frame:  self.frame_base64.map(EncodedImage::new),
        };
        validate(action, &payload)?;
        Ok((action, payload))
    }
}

// ── Result ────────────────────────────────────────────────────────────────────

/// Descriptive extras returned by scene analysis. Not part of FilterValue.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneAnalysis {
    pub scene_type: Option<String>,
    pub lighting:   Option<String>,
    pub mood:       Option<String>,
}

impl SceneAnalysis {
    pub fn is_empty(&self) -> bool {
        self.scene_type.is_none() && self.lighting.is_none() && self.mood.is_none()
    }
}

/// A partial FilterValue plus free text. Absent fields mean "keep current".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteSuggestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness:  Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast:    Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation:  Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue:         Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur:        Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sepia:       Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grayscale:   Option<f32>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene:       Option<SceneAnalysis>,
    /// True when the upstream text could not be parsed and only a
    /// description came back.
    #[serde(default)]
    pub raw:         bool,
}

impl RemoteSuggestion {
    pub fn description_only(description: impl Into<String>) -> Self {
        Self { description: description.into(), raw: true, ..Default::default() }
    }

    pub fn get(&self, field: FilterField) -> Option<f32> {
        match field {
            FilterField::Brightness => self.brightness,
            FilterField::Contrast   => self.contrast,
            FilterField::Saturation => self.saturation,
            FilterField::Hue        => self.hue,
            FilterField::Blur       => self.blur,
            FilterField::Sepia      => self.sepia,
            FilterField::Grayscale  => self.grayscale,
        }
    }

    fn slot(&mut self, field: FilterField) -> &mut Option<f32> {
        match field {
            FilterField::Brightness => &mut self.brightness,
            FilterField::Contrast   => &mut self.contrast,
            FilterField::Saturation => &mut self.saturation,
            FilterField::Hue        => &mut self.hue,
            FilterField::Blur       => &mut self.blur,
            FilterField::Sepia      => &mut self.sepia,
            FilterField::Grayscale  => &mut self.grayscale,
        }
    }

    pub fn has_values(&self) -> bool {
        FilterField::ALL.iter().any(|f| self.get(*f).is_some())
    }

    /// `base` with every present field replaced; absent fields untouched.
    pub fn merge_onto(&self, base: &FilterValue) -> FilterValue {
        let mut out = *base;
        for field in FilterField::ALL {
            if let Some(value) = self.get(field) {
                out.set(crate::filter::FieldUpdate::new(field, value));
            }
        }
        out
    }

    /// Lenient parse of a model-produced JSON object.
    ///
    /// Accepts numbers or numeric strings, the render-token spellings
    /// (`saturate`, `hue-rotate`, `hue_rotate`), and scene fields either at
    /// top level or under `analysis`. Non-numeric values are ignored.
    pub fn from_json_value(value: &Value) -> Result<Self, SuggestError> {
        let obj = value
            .as_object()
            .ok_or_else(|| SuggestError::Malformed("suggestion is not a JSON object".into()))?;

        let mut out = RemoteSuggestion::default();
        for field in FilterField::ALL {
            let found = field_aliases(field)
                .iter()
                .find_map(|key| obj.get(*key).and_then(number_of));
            *out.slot(field) = found;
        }

        out.description = obj
            .get("description")
            .or_else(|| obj.get("explanation"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        out.raw = obj.get("raw").and_then(Value::as_bool).unwrap_or(false);

        let scene_src = obj.get("analysis").and_then(Value::as_object).unwrap_or(obj);
        let text = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| scene_src.get(*k).and_then(Value::as_str))
                .map(str::to_string)
        };
        let scene = SceneAnalysis {
            scene_type: text(&["scene_type", "sceneType"]),
            lighting:   text(&["lighting"]),
            mood:       text(&["mood"]),
        };
        out.scene = (!scene.is_empty()).then_some(scene);

        Ok(out)
    }
}

fn field_aliases(field: FilterField) -> &'static [&'static str] {
    match field {
        FilterField::Brightness => &["brightness"],
        FilterField::Contrast   => &["contrast"],
        FilterField::Saturation => &["saturation", "saturate"],
        FilterField::Hue        => &["hue", "hue_rotate", "hue-rotate", "hueRotate"],
        FilterField::Blur       => &["blur"],
        FilterField::Sepia      => &["sepia"],
        FilterField::Grayscale  => &["grayscale", "greyscale"],
    }
}

fn number_of(v: &Value) -> Option<f32> {
    let n = match v {
        Value::Number(n) => n.as_f64().map(|f| f as f32),
        Value::String(s) => s
            .trim()
            .trim_end_matches(['%', '°'])
            .trim_end_matches("px")
            .trim_end_matches("deg")
            .trim()
            .parse::<f32>()
            .ok(),
        _ => None,
    };
    n.filter(|f| f.is_finite())
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Everything a suggestion request can fail with. None of these are retried
/// automatically; each becomes exactly one notification.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SuggestError {
    /// Missing frame/prompt or unknown action. Raised before any network call.
    #[error("{0}")]
    InvalidInput(String),
    #[error("rate limit exceeded, please try again later")]
    RateLimited,
    #[error("AI usage limit reached, please add credits to continue")]
    QuotaExhausted,
    #[error("the suggestion response could not be read: {0}")]
    Malformed(String),
    #[error("suggestion service unreachable: {0}")]
    Unreachable(String),
    #[error("suggestion service error (status {status}): {message}")]
    Unknown { status: u16, message: String },
}

impl SuggestError {
    /// Transient failures the user may retry by hand. Quota exhaustion is
    /// treated as final for the session.
    pub fn is_retryable_later(&self) -> bool {
        matches!(
            self,
            SuggestError::RateLimited | SuggestError::Unreachable(_) | SuggestError::Unknown { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn frame_actions_reject_missing_frame() {
        let payload = SuggestPayload::default().with_prompt("make it pop");
        for action in [ActionKind::Enhance, ActionKind::SceneAnalysis, ActionKind::AutoCorrect] {
            assert!(matches!(validate(action, &payload), Err(SuggestError::InvalidInput(_))));
        }
    }

    #[test]
    fn prompt_actions_reject_blank_prompt() {
        let payload = SuggestPayload::default()
            .with_prompt("   ")
            .with_frame(EncodedImage::new("abcd"));
        assert!(matches!(
            validate(ActionKind::ColorGrade, &payload),
            Err(SuggestError::InvalidInput(_))
        ));
        let ok = payload.with_prompt("teal shadows");
        assert_eq!(validate(ActionKind::StyleTransfer, &ok), Ok(()));
    }

    #[test]
    fn request_body_uses_wire_names() {
        let payload = SuggestPayload::default().with_frame(EncodedImage::new("QUJD"));
        let body = serde_json::to_value(SuggestRequest::new(ActionKind::SceneAnalysis, &payload)).unwrap();
        assert_eq!(body, json!({ "action": "scene_analysis", "frameBase64": "QUJD" }));
    }

    #[test]
    fn request_into_parts_validates() {
        let req = SuggestRequest { action: "scene_analysis".into(), prompt: None, frame_base64: None };
        assert!(matches!(req.into_parts(), Err(SuggestError::InvalidInput(_))));

        let req = SuggestRequest { action: "sharpen".into(), prompt: Some("x".into()), frame_base64: None };
        assert!(matches!(req.into_parts(), Err(SuggestError::InvalidInput(_))));
    }

    #[test]
    fn png_bytes_become_data_url() {
        let img = EncodedImage::from_png_bytes(b"ABC");
        assert_eq!(img.as_str(), "data:image/png;base64,QUJD");
        assert_eq!(EncodedImage::new("QUJD").to_data_url(), "data:image/jpeg;base64,QUJD");
    }

    #[test]
    fn merge_preserves_absent_fields() {
        let base = FilterValue { brightness: 120.0, ..FilterValue::IDENTITY };
        let sug  = RemoteSuggestion { contrast: Some(140.0), ..Default::default() };
        assert_eq!(
            sug.merge_onto(&base),
            FilterValue { brightness: 120.0, contrast: 140.0, ..FilterValue::IDENTITY },
        );
    }

    #[test]
    fn lenient_parse_accepts_aliases_and_strings() {
        let v = json!({
            "brightness": 110,
            "saturate": "130%",
            "hue-rotate": "15deg",
            "blur": "not a number",
            "description": "warmer and punchier",
        });
        let s = RemoteSuggestion::from_json_value(&v).unwrap();
        assert_eq!(s.brightness, Some(110.0));
        assert_eq!(s.saturation, Some(130.0));
        assert_eq!(s.hue, Some(15.0));
        assert_eq!(s.blur, None);
        assert_eq!(s.contrast, None);
        assert_eq!(s.description, "warmer and punchier");
        assert!(s.scene.is_none());
        assert!(!s.raw);
    }

    #[test]
    fn scene_fields_parse_from_nested_analysis() {
        let v = json!({
            "analysis": { "scene_type": "beach", "lighting": "harsh noon", "mood": "cheerful" },
            "contrast": 95,
        });
        let s = RemoteSuggestion::from_json_value(&v).unwrap();
        let scene = s.scene.unwrap();
        assert_eq!(scene.scene_type.as_deref(), Some("beach"));
        assert_eq!(scene.mood.as_deref(), Some("cheerful"));
        assert_eq!(s.contrast, Some(95.0));
    }

    #[test]
    fn raw_fallback_has_no_values() {
        let v = json!({ "description": "It is a sunset.", "raw": true });
        let s = RemoteSuggestion::from_json_value(&v).unwrap();
        assert!(s.raw);
        assert!(!s.has_values());
        assert!(RemoteSuggestion::from_json_value(&json!([1, 2])).is_err());
    }

    #[test]
    fn quota_is_not_retryable() {
        assert!(SuggestError::RateLimited.is_retryable_later());
        assert!(!SuggestError::QuotaExhausted.is_retryable_later());
        assert!(!SuggestError::InvalidInput("x".into()).is_retryable_later());
    }
}
