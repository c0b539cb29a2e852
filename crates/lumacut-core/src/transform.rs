// crates/lumacut-core/src/transform.rs
//
// Non-filter edits: orientation (rotate/flip), trim markers, playback speed
// and the text editor's transforms. All are declarative values; the renderer
// (CSS transform string or `raster::apply_orientation`) does the work.

use serde::{Deserialize, Serialize};

use crate::helpers::time::{clock, timecode, TIMECODE_FPS};

// ── Orientation ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0   => 0,
            Rotation::Deg90  => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Nearest quarter turn; any integer, negative values wrap.
    pub fn from_degrees(deg: i32) -> Self {
        let quarter = ((deg as f32 / 90.0).round() as i32).rem_euclid(4);
        match quarter {
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            3 => Rotation::Deg270,
            _ => Rotation::Deg0,
        }
    }

    pub fn rotate_cw(self) -> Self {
        Self::from_degrees(self.degrees() as i32 + 90)
    }

    pub fn rotate_ccw(self) -> Self {
        Self::from_degrees(self.degrees() as i32 - 90)
    }

    /// True when width and height swap.
    pub fn is_quarter(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orientation {
    pub rotation: Rotation,
    pub flip_h:   bool,
    pub flip_v:   bool,
}

impl Orientation {
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// CSS `transform` value; `none` for identity.
    ///
    /// ```
    /// use lumacut_core::transform::{Orientation, Rotation};
    /// let o = Orientation { rotation: Rotation::Deg90, flip_h: true, flip_v: false };
    /// assert_eq!(o.to_transform_string(), "rotate(90deg) scaleX(-1)");
    /// assert_eq!(Orientation::default().to_transform_string(), "none");
    /// ```
    pub fn to_transform_string(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(3);
        if self.rotation != Rotation::Deg0 {
            parts.push(format!("rotate({}deg)", self.rotation.degrees()));
        }
        if self.flip_h {
            parts.push("scaleX(-1)".to_string());
        }
        if self.flip_v {
            parts.push("scaleY(-1)".to_string());
        }
        if parts.is_empty() { "none".to_string() } else { parts.join(" ") }
    }
}

// ── Trim markers ──────────────────────────────────────────────────────────────

/// Minimum distance kept between the in and out markers.
pub const MIN_TRIM_SECS: f64 = 0.1;

/// In/out markers for audio and video. Always 0 ≤ start < end ≤ duration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrimMarkers {
    start:    f64,
    end:      f64,
    duration: f64,
}

impl TrimMarkers {
    /// Full-length markers for media of `duration` seconds.
    pub fn new(duration: f64) -> Self {
        let duration = if duration.is_finite() { duration.max(MIN_TRIM_SECS) } else { MIN_TRIM_SECS };
        Self { start: 0.0, end: duration, duration }
    }

    pub fn start(&self) -> f64 { self.start }
    pub fn end(&self) -> f64 { self.end }
    pub fn media_duration(&self) -> f64 { self.duration }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Non-finite `t` is ignored.
    pub fn set_start(&mut self, t: f64) {
        if !t.is_finite() {
            return;
        }
        self.start = t.clamp(0.0, (self.end - MIN_TRIM_SECS).max(0.0));
    }

    /// Non-finite `t` is ignored.
    pub fn set_end(&mut self, t: f64) {
        if !t.is_finite() {
            return;
        }
        self.end = t.clamp((self.start + MIN_TRIM_SECS).min(self.duration), self.duration);
    }

    pub fn is_full(&self) -> bool {
        self.start == 0.0 && self.end == self.duration
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }

    /// `MM:SS:FF – MM:SS:FF` for the trim bar.
    pub fn label(&self) -> String {
        format!("{} – {}", timecode(self.start, TIMECODE_FPS), timecode(self.end, TIMECODE_FPS))
    }

    /// Compact length of the kept range, e.g. `3:07`.
    pub fn duration_label(&self) -> String {
        clock(self.duration())
    }
}

// ── Playback speed ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSpeed(f32);

impl PlaybackSpeed {
    pub const MIN: f32 = 0.25;
    pub const MAX: f32 = 4.0;
    pub const PRESETS: [f32; 8] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 2.0, 4.0];

    pub fn new(rate: f32) -> Self {
        if rate.is_nan() {
            return Self::default();
        }
        Self(rate.clamp(Self::MIN, Self::MAX))
    }

    pub fn rate(self) -> f32 { self.0 }

    pub fn label(self) -> String {
        format!("{}x", self.0)
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self { Self(1.0) }
}

// ── Text editor ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextTransform {
    Uppercase,
    Lowercase,
    TitleCase,
    SentenceCase,
    Reverse,
    TrimWhitespace,
}

impl TextTransform {
    pub const ALL: [TextTransform; 6] = [
        TextTransform::Uppercase,
        TextTransform::Lowercase,
        TextTransform::TitleCase,
        TextTransform::SentenceCase,
        TextTransform::Reverse,
        TextTransform::TrimWhitespace,
    ];

    /// Same tag as the serde form.
    pub fn as_str(self) -> &'static str {
        match self {
            TextTransform::Uppercase      => "uppercase",
            TextTransform::Lowercase      => "lowercase",
            TextTransform::TitleCase      => "title_case",
            TextTransform::SentenceCase   => "sentence_case",
            TextTransform::Reverse        => "reverse",
            TextTransform::TrimWhitespace => "trim_whitespace",
        }
    }

    pub fn apply(self, text: &str) -> String {
        match self {
            TextTransform::Uppercase      => text.to_uppercase(),
            TextTransform::Lowercase      => text.to_lowercase(),
            TextTransform::TitleCase      => title_case(text),
            TextTransform::SentenceCase   => sentence_case(text),
            TextTransform::Reverse        => text.chars().rev().collect(),
            TextTransform::TrimWhitespace => text
                .lines()
                .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string(),
        }
    }
}

impl std::str::FromStr for TextTransform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        TextTransform::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| format!("unknown text transform \"{tag}\""))
    }
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

fn sentence_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_sentence_start = true;
    for c in text.chars() {
        if at_sentence_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            at_sentence_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
        if matches!(c, '.' | '!' | '?') {
            at_sentence_start = true;
        }
    }
    out
}

/// Counts shown under the text editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub chars: usize,
    pub words: usize,
    pub lines: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            chars: text.chars().count(),
            words: text.split_whitespace().count(),
            lines: if text.is_empty() { 0 } else { text.lines().count() },
        }
    }

    /// Whole minutes at 200 wpm, minimum 1 for non-empty text.
    pub fn reading_minutes(&self) -> usize {
        if self.words == 0 { 0 } else { self.words.div_ceil(200) }
    }
}
