// crates/lumacut-cli/src/helpers/report.rs
//
// Text and timing reports for the `text` and `trim` subcommands. Pure so the
// output can be checked without a terminal.

use lumacut_core::helpers::time::clock;
use lumacut_core::transform::{PlaybackSpeed, TextStats, TextTransform, TrimMarkers};

/// Transformed text plus the stats of what will be printed.
pub fn transform_text(text: &str, transform: Option<TextTransform>) -> (String, TextStats) {
    let out = match transform {
        Some(t) => t.apply(text),
        None    => text.to_string(),
    };
    let stats = TextStats::of(&out);
    (out, stats)
}

pub fn stats_line(stats: &TextStats) -> String {
    format!(
        "{} chars, {} words, {} lines, ~{} min read",
        stats.chars,
        stats.words,
        stats.lines,
        stats.reading_minutes(),
    )
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrimReport {
    pub markers: TrimMarkers,
    pub speed:   PlaybackSpeed,
}

impl TrimReport {
    /// End is applied before start so a start past the old end still lands.
    pub fn new(duration: f64, start: Option<f64>, end: Option<f64>, rate: f32) -> Self {
        let mut markers = TrimMarkers::new(duration);
        if let Some(e) = end {
            markers.set_end(e);
        }
        if let Some(s) = start {
            markers.set_start(s);
        }
        Self { markers, speed: PlaybackSpeed::new(rate) }
    }

    /// Wall-clock seconds the kept range plays for at the chosen speed.
    pub fn playback_secs(&self) -> f64 {
        self.markers.duration() / f64::from(self.speed.rate())
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("range     {}", self.markers.label()),
            format!("length    {}", self.markers.duration_label()),
            format!("speed     {}", self.speed.label()),
            format!("playback  {}", clock(self.playback_secs())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_transformed_then_counted() {
        let (out, stats) = transform_text("  hello   there \n world ", Some(TextTransform::TrimWhitespace));
        assert_eq!(out, "hello there\nworld");
        assert_eq!(stats, TextStats { chars: 17, words: 3, lines: 2 });
        assert_eq!(stats_line(&stats), "17 chars, 3 words, 2 lines, ~1 min read");
    }

    #[test]
    fn no_transform_passes_text_through() {
        let (out, stats) = transform_text("as is", None);
        assert_eq!(out, "as is");
        assert_eq!(stats.words, 2);
    }

    #[test]
    fn trim_report_scales_by_speed() {
        let r = TrimReport::new(120.0, Some(10.0), Some(70.0), 2.0);
        assert_eq!(r.markers.start(), 10.0);
        assert_eq!(r.markers.end(), 70.0);
        assert_eq!(r.playback_secs(), 30.0);
        assert_eq!(r.lines()[1], "length    1:00");
        assert_eq!(r.lines()[2], "speed     2x");
        assert_eq!(r.lines()[3], "playback  0:30");
    }

    #[test]
    fn trim_report_clamps_input() {
        let r = TrimReport::new(60.0, Some(-5.0), Some(500.0), 10.0);
        assert!(r.markers.is_full());
        assert_eq!(r.speed.rate(), PlaybackSpeed::MAX);

        let nan = TrimReport::new(60.0, Some(f64::NAN), None, f32::NAN);
        assert!(nan.markers.is_full());
        assert_eq!(nan.speed, PlaybackSpeed::default());
    }
}
